// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub provider for tests and offline builds where the TMDB API is not
// reachable.
//
// Everything is served from in-memory fixtures assembled with the builder
// methods. Unknown movies have no images and no details; failures can be
// injected per search page or per movie. Call counters let tests check how
// much provider traffic an operation caused.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use postr_core::error::{PostrError, Result};
use postr_core::types::{
    ArtworkAsset, Credits, MovieDetails, MovieId, SearchCandidate, SearchPage,
};

use crate::provider::{AssetSource, MetadataProvider};

/// In-memory `MetadataProvider` + `AssetSource`.
#[derive(Default)]
pub struct StubProvider {
    /// Query → pages in order (page 1 first).
    searches: HashMap<String, Vec<Vec<SearchCandidate>>>,
    details: HashMap<MovieId, MovieDetails>,
    credits: HashMap<MovieId, Credits>,
    backdrops: HashMap<MovieId, Vec<ArtworkAsset>>,
    assets: HashMap<String, Vec<u8>>,
    failing_pages: HashSet<u32>,
    failing_movies: HashSet<MovieId>,
    search_calls: AtomicUsize,
    image_calls: AtomicUsize,
    asset_calls: AtomicUsize,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register search results for `query`, split into pages of `per_page`.
    pub fn with_search(mut self, query: &str, results: Vec<SearchCandidate>, per_page: usize) -> Self {
        let pages = results
            .chunks(per_page.max(1))
            .map(<[SearchCandidate]>::to_vec)
            .collect();
        self.searches.insert(query.to_string(), pages);
        self
    }

    /// Register details and credits for a movie.
    pub fn with_movie(mut self, id: MovieId, details: MovieDetails, credits: Credits) -> Self {
        self.details.insert(id, details);
        self.credits.insert(id, credits);
        self
    }

    pub fn with_backdrops(mut self, id: MovieId, backdrops: Vec<ArtworkAsset>) -> Self {
        self.backdrops.insert(id, backdrops);
        self
    }

    /// Bytes served for `url` by [`AssetSource::fetch_bytes`].
    pub fn with_asset(mut self, url: &str, data: Vec<u8>) -> Self {
        self.assets.insert(url.to_string(), data);
        self
    }

    /// Make every search request for `page` fail.
    pub fn failing_search_page(mut self, page: u32) -> Self {
        self.failing_pages.insert(page);
        self
    }

    /// Make every per-movie request for `id` fail.
    pub fn failing_movie(mut self, id: MovieId) -> Self {
        self.failing_movies.insert(id);
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    pub fn asset_calls(&self) -> usize {
        self.asset_calls.load(Ordering::SeqCst)
    }

    fn check_movie(&self, id: MovieId) -> Result<()> {
        if self.failing_movies.contains(&id) {
            return Err(PostrError::ProviderUnavailable(format!(
                "stub: injected failure for movie {id}"
            )));
        }
        Ok(())
    }
}

/// A search candidate with only an id and a title set.
pub fn candidate(id: u64, title: &str) -> SearchCandidate {
    SearchCandidate {
        id: MovieId(id),
        title: Some(title.to_string()),
        release_date: None,
        overview: None,
        thumbnail_url: None,
        average_rating: None,
    }
}

/// `count` 16:9 backdrops with distinct URLs for movie `id`.
pub fn backdrops(id: u64, count: usize) -> Vec<ArtworkAsset> {
    (0..count)
        .filter_map(|n| {
            ArtworkAsset::new(
                1.778,
                Some(1920),
                Some(1080),
                format!("stub://backdrops/{id}/{n}.jpg"),
            )
            .ok()
        })
        .collect()
}

#[async_trait]
impl MetadataProvider for StubProvider {
    async fn search_movies(&self, query: &str, page: u32) -> Result<SearchPage> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_pages.contains(&page) {
            return Err(PostrError::ProviderUnavailable(format!(
                "stub: injected failure for search page {page}"
            )));
        }

        let pages = self.searches.get(query);
        let total_pages = pages.map_or(0, Vec::len) as u32;
        let total_results = pages.map_or(0, |pages| pages.iter().map(Vec::len).sum::<usize>()) as u32;
        let results = pages
            .and_then(|pages| pages.get((page as usize).checked_sub(1)?))
            .cloned()
            .unwrap_or_default();

        Ok(SearchPage {
            results,
            page,
            total_pages,
            total_results,
        })
    }

    async fn movie_details(&self, id: MovieId) -> Result<MovieDetails> {
        self.check_movie(id)?;
        self.details
            .get(&id)
            .cloned()
            .ok_or_else(|| PostrError::ProviderUnavailable(format!("stub: HTTP 404 for movie {id}")))
    }

    async fn movie_credits(&self, id: MovieId) -> Result<Credits> {
        self.check_movie(id)?;
        Ok(self.credits.get(&id).cloned().unwrap_or_default())
    }

    async fn movie_images(&self, id: MovieId) -> Result<Vec<ArtworkAsset>> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        self.check_movie(id)?;
        Ok(self.backdrops.get(&id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl AssetSource for StubProvider {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.asset_calls.fetch_add(1, Ordering::SeqCst);
        self.assets
            .get(url)
            .cloned()
            .ok_or_else(|| PostrError::AssetFetch(format!("stub: no asset at {url}")))
    }
}
