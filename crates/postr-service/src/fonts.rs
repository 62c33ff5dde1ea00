// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Font sources — where the three poster faces come from.
//
// The composer only sees loaded fonts; these sources do the loading from a
// local directory, from URLs through an `AssetSource`, or fall back to the
// standard Helvetica faces.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use postr_core::config::PosterConfig;
use postr_core::error::{PostrError, Result};
use postr_document::{FontRole, FontSet, LoadedFont};
use postr_tmdb::AssetSource;
use tracing::{debug, instrument};

/// Loads the font used for one [`FontRole`].
#[async_trait]
pub trait FontSource: Send + Sync {
    async fn load(&self, role: FontRole) -> Result<LoadedFont>;
}

/// Picks the source the poster settings ask for: font files from
/// `font_dir` when set, the standard faces otherwise.
pub fn font_source_for(config: &PosterConfig) -> Arc<dyn FontSource> {
    match &config.font_dir {
        Some(dir) => Arc::new(DirectoryFontSource::new(
            dir,
            &config.bold_font,
            &config.regular_font,
            &config.medium_font,
        )),
        None => Arc::new(StandardFontSource),
    }
}

/// Name a font after its file, e.g. `Inter-Bold.ttf` → `Inter-Bold`.
fn font_name(file: &str) -> String {
    Path::new(file)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string())
}

// -- Directory ----------------------------------------------------------------

/// TrueType files in a local directory.
#[derive(Debug, Clone)]
pub struct DirectoryFontSource {
    dir: PathBuf,
    bold: String,
    regular: String,
    medium: String,
}

impl DirectoryFontSource {
    pub fn new(dir: impl Into<PathBuf>, bold: &str, regular: &str, medium: &str) -> Self {
        Self {
            dir: dir.into(),
            bold: bold.to_string(),
            regular: regular.to_string(),
            medium: medium.to_string(),
        }
    }

    fn file_for(&self, role: FontRole) -> &str {
        match role {
            FontRole::Bold => &self.bold,
            FontRole::Regular => &self.regular,
            FontRole::Medium => &self.medium,
        }
    }
}

#[async_trait]
impl FontSource for DirectoryFontSource {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn load(&self, role: FontRole) -> Result<LoadedFont> {
        let file = self.file_for(role);
        let path = self.dir.join(file);
        let data = tokio::fs::read(&path).await.map_err(|err| {
            PostrError::AssetFetch(format!("font {}: {err}", path.display()))
        })?;
        debug!(path = %path.display(), bytes = data.len(), "Font file read");
        LoadedFont::from_ttf(&font_name(file), data)
    }
}

// -- Remote -------------------------------------------------------------------

/// TrueType files downloaded by URL.
#[derive(Clone)]
pub struct RemoteFontSource {
    assets: Arc<dyn AssetSource>,
    bold: String,
    regular: String,
    medium: String,
}

impl RemoteFontSource {
    pub fn new(assets: Arc<dyn AssetSource>, bold: &str, regular: &str, medium: &str) -> Self {
        Self {
            assets,
            bold: bold.to_string(),
            regular: regular.to_string(),
            medium: medium.to_string(),
        }
    }

    fn url_for(&self, role: FontRole) -> &str {
        match role {
            FontRole::Bold => &self.bold,
            FontRole::Regular => &self.regular,
            FontRole::Medium => &self.medium,
        }
    }
}

#[async_trait]
impl FontSource for RemoteFontSource {
    #[instrument(skip(self))]
    async fn load(&self, role: FontRole) -> Result<LoadedFont> {
        let url = self.url_for(role);
        let data = self.assets.fetch_bytes(url).await?;
        let file = url.rsplit('/').next().unwrap_or(url);
        LoadedFont::from_ttf(&font_name(file), data)
    }
}

// -- Standard -----------------------------------------------------------------

/// Helvetica and Helvetica-Bold, referenced without embedding.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFontSource;

#[async_trait]
impl FontSource for StandardFontSource {
    async fn load(&self, role: FontRole) -> Result<LoadedFont> {
        Ok(FontSet::standard().get(role).clone())
    }
}
