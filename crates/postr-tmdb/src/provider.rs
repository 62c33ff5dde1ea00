// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Provider traits — the operations postr needs from a movie database and from
// whatever serves artwork bytes.
//
// Implementations must be `Send + Sync` so they can be shared as
// `Arc<dyn MetadataProvider>` across spawned tasks.

use async_trait::async_trait;
use postr_core::error::Result;
use postr_core::types::{ArtworkAsset, Credits, MovieDetail, MovieDetails, MovieId, SearchPage};

/// Search, detail, credits and image lookups against a movie database.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// One page (1-indexed) of title search results, in provider rank order.
    async fn search_movies(&self, query: &str, page: u32) -> Result<SearchPage>;

    /// Title and release date.
    async fn movie_details(&self, id: MovieId) -> Result<MovieDetails>;

    /// Raw cast and crew lists.
    async fn movie_credits(&self, id: MovieId) -> Result<Credits>;

    /// Backdrop images, in provider order.
    async fn movie_images(&self, id: MovieId) -> Result<Vec<ArtworkAsset>>;

    /// Number of usable backdrops for a movie.
    async fn backdrop_count(&self, id: MovieId) -> Result<usize> {
        Ok(self.movie_images(id).await?.len())
    }

    /// Details and credits fetched concurrently and folded together.
    async fn movie_detail(&self, id: MovieId) -> Result<MovieDetail> {
        let (details, credits) = tokio::try_join!(self.movie_details(id), self.movie_credits(id))?;
        Ok(MovieDetail::from_parts(details, credits))
    }
}

/// Downloads artwork (or any other binary asset) by URL.
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Fetch the raw bytes at `url`. Failures map to `PostrError::AssetFetch`.
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}
