// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PostrError, Result};
use crate::types::PageTemplate;

/// Top-level settings, persisted as JSON by the embedding application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostrConfig {
    pub provider: ProviderConfig,
    pub curation: CurationConfig,
    pub poster: PosterConfig,
}

impl PostrConfig {
    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Write settings to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.curation.desired_count == 0 {
            return Err(PostrError::Config("curation.desired_count must be at least 1".into()));
        }
        if self.curation.max_pages == 0 {
            return Err(PostrError::Config("curation.max_pages must be at least 1".into()));
        }
        if self.provider.timeout_secs == 0 {
            return Err(PostrError::Config("provider.timeout_secs must be at least 1".into()));
        }
        Ok(())
    }
}

/// Connection settings for the metadata provider.
///
/// The access token is always passed in explicitly; the HTTP client never
/// reads it from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Bearer token for the provider API.
    pub api_token: String,
    pub api_base_url: String,
    /// Base URL that image file paths are appended to (without the size segment).
    pub image_base_url: String,
    pub language: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl ProviderConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            ..Self::default()
        }
    }

    /// Build a config from the named environment variable.
    ///
    /// Intended for binaries at start-up; library code takes the resulting
    /// value rather than consulting the environment itself.
    pub fn from_env(var: &str) -> Result<Self> {
        let token = std::env::var(var)
            .map_err(|_| PostrError::Config(format!("environment variable {var} is not set")))?;
        if token.trim().is_empty() {
            return Err(PostrError::Config(format!("environment variable {var} is empty")));
        }
        Ok(Self::new(token))
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            api_base_url: "https://api.themoviedb.org/3".into(),
            image_base_url: "https://image.tmdb.org/t/p".into(),
            language: "en-US".into(),
            timeout_secs: 30,
        }
    }
}

/// Defaults for artwork-aware search curation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurationConfig {
    /// How many validated candidates to collect.
    pub desired_count: usize,
    /// Minimum number of backdrops a candidate needs.
    pub min_images: usize,
    /// Upper bound on search pages scanned per query.
    pub max_pages: u32,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            desired_count: 5,
            min_images: 1,
            max_pages: 5,
        }
    }
}

/// Poster output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PosterConfig {
    pub template: PageTemplate,
    /// Directory containing the font files below. `None` falls back to the
    /// standard PDF Helvetica faces.
    pub font_dir: Option<PathBuf>,
    pub bold_font: String,
    pub regular_font: String,
    pub medium_font: String,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            template: PageTemplate::Poster18x24,
            font_dir: None,
            bold_font: "Inter-Bold.ttf".into(),
            regular_font: "Inter-Regular.ttf".into(),
            medium_font: "Inter-Medium.ttf".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_curation_bounds() {
        let config = PostrConfig::default();
        assert_eq!(config.curation.desired_count, 5);
        assert_eq!(config.curation.min_images, 1);
        assert_eq!(config.curation.max_pages, 5);
        assert_eq!(config.poster.template, PageTemplate::Poster18x24);
        assert!(config.provider.api_token.is_empty());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("postr.json");

        let mut config = PostrConfig::default();
        config.provider.api_token = "secret".into();
        config.curation.desired_count = 3;
        config.poster.template = PageTemplate::Square;
        config.save(&path).expect("save");

        let loaded = PostrConfig::load(&path).expect("load");
        assert_eq!(loaded.provider.api_token, "secret");
        assert_eq!(loaded.curation.desired_count, 3);
        assert_eq!(loaded.poster.template, PageTemplate::Square);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("postr.json");
        std::fs::write(&path, r#"{ "provider": { "api_token": "abc" } }"#).expect("write");

        let loaded = PostrConfig::load(&path).expect("load");
        assert_eq!(loaded.provider.api_token, "abc");
        assert_eq!(loaded.provider.language, "en-US");
        assert_eq!(loaded.curation, CurationConfig::default());
    }

    #[test]
    fn zero_page_bound_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("postr.json");
        std::fs::write(&path, r#"{ "curation": { "max_pages": 0 } }"#).expect("write");

        assert!(matches!(PostrConfig::load(&path), Err(PostrError::Config(_))));
    }
}
