// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Poster service — search, then generate a poster for the chosen movie.
//
// Generating a poster fetches movie detail, the backdrop list and all three
// fonts concurrently, downloads the first backdrop, and composes the page.
// Any failure aborts the whole call; nothing partial is returned.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use postr_core::config::PostrConfig;
use postr_core::error::{PostrError, Result};
use postr_core::types::{ArtworkImage, ComposedDocument, MovieId, PageTemplate, SearchCandidate};
use postr_document::{DocumentComposer, FontRole, FontSet};
use postr_search::SearchCurator;
use postr_tmdb::{AssetSource, MetadataProvider, TmdbClient};
use tracing::{info, instrument};

use crate::fonts::{FontSource, font_source_for};

/// Entry point for embedding applications.
#[derive(Clone)]
pub struct PosterService {
    provider: Arc<dyn MetadataProvider>,
    assets: Arc<dyn AssetSource>,
    fonts: Arc<dyn FontSource>,
    curator: SearchCurator,
    composer: DocumentComposer,
    default_template: PageTemplate,
}

impl PosterService {
    pub fn new(
        provider: Arc<dyn MetadataProvider>,
        assets: Arc<dyn AssetSource>,
        fonts: Arc<dyn FontSource>,
        config: &PostrConfig,
    ) -> Self {
        Self {
            curator: SearchCurator::new(Arc::clone(&provider), config.curation),
            provider,
            assets,
            fonts,
            composer: DocumentComposer::new(),
            default_template: config.poster.template,
        }
    }

    /// TMDB for metadata and artwork, fonts as the poster settings describe.
    pub fn from_config(config: &PostrConfig) -> Result<Self> {
        config.validate()?;
        let client = Arc::new(TmdbClient::new(&config.provider)?);
        Ok(Self::new(
            client.clone(),
            client,
            font_source_for(&config.poster),
            config,
        ))
    }

    /// Template used when the caller has no preference.
    pub fn default_template(&self) -> PageTemplate {
        self.default_template
    }

    /// Poster-worthy matches for `query`, using the configured curation limits.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchCandidate>> {
        self.curator.search(query).await
    }

    /// Compose a poster for `movie_id` on `template`.
    #[instrument(skip_all, fields(movie_id = %movie_id, template = %template))]
    pub async fn generate_poster(
        &self,
        movie_id: MovieId,
        template: PageTemplate,
    ) -> Result<ComposedDocument> {
        let (detail, backdrops, bold, regular, medium) = tokio::try_join!(
            self.provider.movie_detail(movie_id),
            self.provider.movie_images(movie_id),
            self.fonts.load(FontRole::Bold),
            self.fonts.load(FontRole::Regular),
            self.fonts.load(FontRole::Medium),
        )?;

        let backdrop = backdrops.into_iter().next().ok_or_else(|| {
            PostrError::MissingAsset(format!("no backdrop images for \"{}\"", detail.title))
        })?;
        let data = self.assets.fetch_bytes(&backdrop.url).await?;

        let fonts = FontSet::new(bold, regular, medium);
        let document = self.composer.compose(
            &detail,
            &[ArtworkImage::new(backdrop, data)],
            &fonts,
            template,
        )?;

        info!(filename = %document.filename, bytes = document.bytes.len(), "Poster generated");
        Ok(document)
    }

    /// Write a composed poster to `dir/<filename>`, creating `dir` if needed.
    #[instrument(skip(self, document), fields(filename = %document.filename))]
    pub async fn save_poster(&self, document: &ComposedDocument, dir: &Path) -> Result<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&document.filename);
        tokio::fs::write(&path, &document.bytes).await?;
        info!(path = %path.display(), "Poster saved");
        Ok(path)
    }
}
