//! Public GitHub profile counters shown next to the project list.

use crate::fetch::fetch_json;
use serde::{Deserialize, Serialize};

pub const GITHUB_USERS_API: &str = "https://api.github.com/users";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitHubProfile {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub public_gists: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
}

pub fn profile_source(base: &str, username: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), username)
}

/// `None` when the profile cannot be fetched or parsed.
pub fn fetch_profile(base: &str, username: &str) -> Option<GitHubProfile> {
    fetch_json(&profile_source(base, username))
}
