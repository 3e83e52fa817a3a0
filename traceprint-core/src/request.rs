//! Investigation requests
//!
//! A request is validated once at construction and immutable afterwards.
//! The platform hint narrows nothing - every active probe still runs - but
//! lets adapters weight matching hits and travels into the audit record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::MAX_USERNAME_LEN;

/// Errors from request construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("username must not be empty")]
    EmptyUsername,

    #[error("username exceeds {MAX_USERNAME_LEN} characters")]
    UsernameTooLong,

    #[error("unknown platform hint: {0}")]
    UnknownPlatform(String),
}

/// Optional hint about where the analyst expects the username to live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformHint {
    GitHub,
    GitLab,
    Twitter,
    Instagram,
    Reddit,
    TikTok,
    YouTube,
    Mastodon,
}

impl PlatformHint {
    /// Label matching the platform catalogue entry names
    pub fn label(&self) -> &'static str {
        match self {
            PlatformHint::GitHub => "GitHub",
            PlatformHint::GitLab => "GitLab",
            PlatformHint::Twitter => "Twitter",
            PlatformHint::Instagram => "Instagram",
            PlatformHint::Reddit => "Reddit",
            PlatformHint::TikTok => "TikTok",
            PlatformHint::YouTube => "YouTube",
            PlatformHint::Mastodon => "Mastodon",
        }
    }
}

impl FromStr for PlatformHint {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "github" => Ok(PlatformHint::GitHub),
            "gitlab" => Ok(PlatformHint::GitLab),
            "twitter" | "x" => Ok(PlatformHint::Twitter),
            "instagram" => Ok(PlatformHint::Instagram),
            "reddit" => Ok(PlatformHint::Reddit),
            "tiktok" => Ok(PlatformHint::TikTok),
            "youtube" => Ok(PlatformHint::YouTube),
            "mastodon" => Ok(PlatformHint::Mastodon),
            other => Err(RequestError::UnknownPlatform(other.to_string())),
        }
    }
}

impl fmt::Display for PlatformHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Domain-context flags supplied by the caller as additional scoring input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskContextFlags {
    /// The caller matched this username against a watchlist
    pub watchlist_match: bool,
}

/// A validated, immutable investigation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestigationRequest {
    /// Target username (1-100 chars, validated at construction)
    pub username: String,
    /// Optional platform hint from the analyst
    pub platform_hint: Option<PlatformHint>,
    /// Caller-supplied risk context
    pub risk_context: RiskContextFlags,
    /// Opaque request token
    pub request_id: Uuid,
}

impl InvestigationRequest {
    /// Validate inputs and build a request
    pub fn new(
        username: &str,
        platform_hint: Option<PlatformHint>,
        risk_context: RiskContextFlags,
    ) -> Result<Self, RequestError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(RequestError::EmptyUsername);
        }
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(RequestError::UsernameTooLong);
        }

        Ok(Self {
            username: username.to_string(),
            platform_hint,
            risk_context,
            request_id: Uuid::new_v4(),
        })
    }
}
