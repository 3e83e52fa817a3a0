//! Platform URL-template catalogue
//!
//! The fixed catalogue the URL-pattern checker probes. Each entry carries a
//! `{username}` template and the confidence a bare status-code hit implies;
//! platforms that answer 200 for unknown users are marked inactive rather
//! than left to produce noise.

use serde::Serialize;

use crate::Confidence;

/// One checkable platform
#[derive(Debug, Clone, Serialize)]
pub struct Platform {
    /// Human-readable name, matches `PlatformHint::label` where applicable
    pub name: &'static str,
    /// Profile URL template with {username} placeholder
    pub url_template: &'static str,
    /// Whether existence checks against this platform are currently reliable
    pub active: bool,
    /// Confidence implied by a 200 response
    pub hit_confidence: Confidence,
}

impl Platform {
    /// Build the profile URL for a username
    pub fn build_url(&self, username: &str) -> String {
        self.url_template
            .replace("{username}", &urlencoding::encode(username))
    }
}

/// Default platform catalogue for the URL-pattern checker
pub static PLATFORM_CATALOGUE: &[Platform] = &[
    Platform {
        name: "GitHub",
        url_template: "https://github.com/{username}",
        active: true,
        hit_confidence: Confidence::Medium,
    },
    Platform {
        name: "GitLab",
        url_template: "https://gitlab.com/{username}",
        active: true,
        hit_confidence: Confidence::Medium,
    },
    Platform {
        name: "Reddit",
        url_template: "https://www.reddit.com/user/{username}",
        active: true,
        hit_confidence: Confidence::Low,
    },
    Platform {
        name: "Twitter",
        url_template: "https://x.com/{username}",
        // Anonymous checks get interstitials, not profile status codes
        active: false,
        hit_confidence: Confidence::Unknown,
    },
    Platform {
        name: "Instagram",
        url_template: "https://www.instagram.com/{username}/",
        active: false,
        hit_confidence: Confidence::Unknown,
    },
    Platform {
        name: "TikTok",
        url_template: "https://www.tiktok.com/@{username}",
        active: true,
        hit_confidence: Confidence::Low,
    },
    Platform {
        name: "YouTube",
        url_template: "https://www.youtube.com/@{username}",
        active: true,
        hit_confidence: Confidence::Low,
    },
    Platform {
        name: "Twitch",
        url_template: "https://www.twitch.tv/{username}",
        active: false,
        hit_confidence: Confidence::Unknown,
    },
    Platform {
        name: "Pinterest",
        url_template: "https://www.pinterest.com/{username}/",
        active: true,
        hit_confidence: Confidence::Low,
    },
    Platform {
        name: "Medium",
        url_template: "https://medium.com/@{username}",
        active: true,
        hit_confidence: Confidence::Medium,
    },
    Platform {
        name: "Dev.to",
        url_template: "https://dev.to/{username}",
        active: true,
        hit_confidence: Confidence::Medium,
    },
    Platform {
        name: "Keybase",
        url_template: "https://keybase.io/{username}",
        active: true,
        hit_confidence: Confidence::High,
    },
    Platform {
        name: "HackerNews",
        url_template: "https://news.ycombinator.com/user?id={username}",
        // HN returns 200 with "No such user" body; status codes say nothing
        active: false,
        hit_confidence: Confidence::Unknown,
    },
    Platform {
        name: "SoundCloud",
        url_template: "https://soundcloud.com/{username}",
        active: true,
        hit_confidence: Confidence::Low,
    },
    Platform {
        name: "Spotify",
        url_template: "https://open.spotify.com/user/{username}",
        active: true,
        hit_confidence: Confidence::Low,
    },
    Platform {
        name: "Telegram",
        url_template: "https://t.me/{username}",
        active: false,
        hit_confidence: Confidence::Unknown,
    },
    Platform {
        name: "Mastodon",
        url_template: "https://mastodon.social/@{username}",
        active: true,
        hit_confidence: Confidence::Medium,
    },
    Platform {
        name: "Patreon",
        url_template: "https://www.patreon.com/{username}",
        active: true,
        hit_confidence: Confidence::Low,
    },
    Platform {
        name: "Linktree",
        url_template: "https://linktr.ee/{username}",
        active: true,
        hit_confidence: Confidence::Low,
    },
    Platform {
        name: "npm",
        url_template: "https://www.npmjs.com/~{username}",
        active: true,
        hit_confidence: Confidence::Medium,
    },
];

/// All platforms usable for status-code existence checks
pub fn active_platforms() -> impl Iterator<Item = &'static Platform> {
    PLATFORM_CATALOGUE.iter().filter(|p| p.active)
}
