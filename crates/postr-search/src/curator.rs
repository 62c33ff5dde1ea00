// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Search curator — pages through provider search results and keeps the
// candidates that have enough backdrop artwork.
//
// Pages are fetched strictly one after another. Within a page every
// candidate's backdrop count is checked concurrently on a `JoinSet` and the
// curator waits for all of them before moving on. The first failure aborts
// the whole call; dropping the set cancels the checks still in flight.

use std::sync::Arc;

use postr_core::config::CurationConfig;
use postr_core::error::{PostrError, Result};
use postr_core::types::SearchCandidate;
use postr_tmdb::MetadataProvider;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument};

/// Artwork-aware search over a [`MetadataProvider`].
#[derive(Clone)]
pub struct SearchCurator {
    provider: Arc<dyn MetadataProvider>,
    defaults: CurationConfig,
}

impl SearchCurator {
    pub fn new(provider: Arc<dyn MetadataProvider>, defaults: CurationConfig) -> Self {
        Self { provider, defaults }
    }

    /// The limits [`SearchCurator::search`] applies.
    pub fn defaults(&self) -> CurationConfig {
        self.defaults
    }

    /// Curate with the configured defaults.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchCandidate>> {
        let CurationConfig {
            desired_count,
            min_images,
            max_pages,
        } = self.defaults;
        self.curate(query, desired_count, min_images, max_pages).await
    }

    /// Up to `desired_count` candidates with at least `min_images` backdrops,
    /// in provider rank order, scanning at most `max_pages` search pages.
    ///
    /// A short (or empty) result is not an error. The same movie showing up
    /// on two pages is returned twice. An empty query or a `desired_count`
    /// of zero returns nothing without contacting the provider.
    #[instrument(skip(self))]
    pub async fn curate(
        &self,
        query: &str,
        desired_count: usize,
        min_images: usize,
        max_pages: u32,
    ) -> Result<Vec<SearchCandidate>> {
        if desired_count == 0 || query.trim().is_empty() {
            debug!("Nothing to search for");
            return Ok(Vec::new());
        }

        let mut curated = Vec::with_capacity(desired_count);
        let mut page = 1;
        let mut pages_scanned = 0u32;

        while curated.len() < desired_count && page <= max_pages {
            let response = self.provider.search_movies(query, page).await?;
            if response.results.is_empty() || page > response.total_pages {
                debug!(page, total_pages = response.total_pages, "Search results exhausted");
                break;
            }

            let scanned = response.results.len();
            let kept = self.with_artwork(response.results, min_images).await?;
            let kept_count = kept.len();
            pages_scanned += 1;

            let remaining = desired_count - curated.len();
            curated.extend(kept.into_iter().take(remaining));

            debug!(page, scanned, kept = kept_count, total = curated.len(), "Search page curated");
            page += 1;
        }

        info!(found = curated.len(), pages = pages_scanned, "Search curated");
        Ok(curated)
    }

    /// Filter one page down to candidates with enough backdrops, keeping
    /// their order.
    async fn with_artwork(
        &self,
        candidates: Vec<SearchCandidate>,
        min_images: usize,
    ) -> Result<Vec<SearchCandidate>> {
        let mut checks = JoinSet::new();
        for (rank, candidate) in candidates.iter().enumerate() {
            let provider = Arc::clone(&self.provider);
            let id = candidate.id;
            checks.spawn(async move {
                provider
                    .backdrop_count(id)
                    .await
                    .map(|count| (rank, count))
            });
        }

        let mut keep = vec![false; candidates.len()];
        while let Some(joined) = checks.join_next().await {
            let (rank, count) = joined.map_err(|err| {
                PostrError::ProviderUnavailable(format!("artwork check did not complete: {err}"))
            })??;
            keep[rank] = count >= min_images;
        }

        Ok(candidates
            .into_iter()
            .zip(keep)
            .filter_map(|(candidate, keep)| keep.then_some(candidate))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use async_trait::async_trait;
    use postr_core::types::{ArtworkAsset, Credits, MovieDetails, MovieId, SearchPage};
    use postr_tmdb::StubProvider;
    use postr_tmdb::stub::{backdrops, candidate};
    use tokio::sync::Barrier;

    use super::*;

    fn curator(stub: &Arc<StubProvider>) -> SearchCurator {
        SearchCurator::new(stub.clone(), CurationConfig::default())
    }

    fn ids(found: &[SearchCandidate]) -> Vec<u64> {
        found.iter().map(|c| c.id.0).collect()
    }

    /// Twelve results over three pages; every third movie has no artwork and
    /// the rest have one or two backdrops.
    fn catalogue() -> StubProvider {
        let results = (1..=12).map(|id| candidate(id, "Alien")).collect();
        (1..=12u64).fold(
            StubProvider::new().with_search("alien", results, 4),
            |stub, id| {
                let count = match id % 3 {
                    0 => 0,
                    1 => 1,
                    _ => 2,
                };
                stub.with_backdrops(MovieId(id), backdrops(id, count))
            },
        )
    }

    #[tokio::test]
    async fn inception_scenario() {
        let stub = Arc::new(
            StubProvider::new()
                .with_search(
                    "Inception",
                    vec![
                        candidate(27205, "Inception"),
                        candidate(64956, "Inception: The Cobol Job"),
                    ],
                    20,
                )
                .with_backdrops(MovieId(27205), backdrops(27205, 3)),
        );

        let found = curator(&stub).curate("Inception", 5, 1, 5).await.expect("curate");
        assert_eq!(ids(&found), vec![27205]);
        assert_eq!(found[0].title.as_deref(), Some("Inception"));
        // Page 2 comes back empty and ends the scan.
        assert_eq!(stub.search_calls(), 2);
    }

    #[tokio::test]
    async fn never_returns_more_than_requested() {
        let stub = Arc::new(catalogue());
        for desired in 1..=10 {
            let found = curator(&stub).curate("alien", desired, 1, 5).await.expect("curate");
            assert!(found.len() <= desired, "{} > {desired}", found.len());
        }
    }

    #[tokio::test]
    async fn keeps_rank_order_across_pages() {
        let stub = Arc::new(catalogue());
        let found = curator(&stub).curate("alien", 6, 1, 5).await.expect("curate");
        assert_eq!(ids(&found), vec![1, 2, 4, 5, 7, 8]);
        assert_eq!(stub.search_calls(), 2);
    }

    #[tokio::test]
    async fn min_images_filters_by_backdrop_count() {
        let stub = Arc::new(catalogue());
        let found = curator(&stub).curate("alien", 20, 2, 5).await.expect("curate");
        assert_eq!(ids(&found), vec![2, 5, 8, 11]);
    }

    #[tokio::test]
    async fn zero_min_images_is_a_superset() {
        let stub = Arc::new(catalogue());
        let curator = curator(&stub);
        let all: HashSet<u64> = ids(&curator.curate("alien", 20, 0, 5).await.expect("curate"))
            .into_iter()
            .collect();
        let with_art = ids(&curator.curate("alien", 20, 1, 5).await.expect("curate"));
        assert_eq!(all.len(), 12);
        assert_eq!(with_art.len(), 8);
        for id in &with_art {
            assert!(all.contains(id), "{id} missing from unfiltered results");
        }
    }

    #[tokio::test]
    async fn stops_at_max_pages() {
        let results = (1..=50).map(|id| candidate(id, "Nothing")).collect();
        let stub = Arc::new(StubProvider::new().with_search("nothing", results, 5));

        let found = curator(&stub).curate("nothing", 5, 1, 3).await.expect("curate");
        assert!(found.is_empty());
        assert_eq!(stub.search_calls(), 3);
        assert_eq!(stub.image_calls(), 15);
    }

    #[tokio::test]
    async fn stops_when_results_run_out() {
        let stub = Arc::new(catalogue());
        let found = curator(&stub).curate("alien", 50, 1, 10).await.expect("curate");
        assert_eq!(found.len(), 8);
        // Three full pages, then an empty fourth.
        assert_eq!(stub.search_calls(), 4);
    }

    #[tokio::test]
    async fn stops_once_enough_are_found() {
        let stub = Arc::new(catalogue());
        let found = curator(&stub).curate("alien", 2, 1, 5).await.expect("curate");
        assert_eq!(ids(&found), vec![1, 2]);
        assert_eq!(stub.search_calls(), 1);
    }

    #[tokio::test]
    async fn cross_page_duplicates_are_kept() {
        let stub = Arc::new(
            StubProvider::new()
                .with_search(
                    "heat",
                    vec![candidate(949, "Heat"), candidate(949, "Heat")],
                    1,
                )
                .with_backdrops(MovieId(949), backdrops(949, 1)),
        );
        let found = curator(&stub).curate("heat", 5, 1, 5).await.expect("curate");
        assert_eq!(ids(&found), vec![949, 949]);
    }

    #[tokio::test]
    async fn empty_query_and_zero_count_skip_the_provider() {
        let stub = Arc::new(catalogue());
        let curator = curator(&stub);
        assert!(curator.curate("   ", 5, 1, 5).await.expect("curate").is_empty());
        assert!(curator.curate("alien", 0, 1, 5).await.expect("curate").is_empty());
        assert_eq!(stub.search_calls(), 0);
    }

    #[tokio::test]
    async fn failed_image_check_aborts_the_call() {
        let stub = Arc::new(catalogue().failing_movie(MovieId(3)));
        let result = curator(&stub).curate("alien", 5, 1, 5).await;
        assert!(matches!(result, Err(PostrError::ProviderUnavailable(_))));
    }

    #[tokio::test]
    async fn failed_later_page_returns_no_partial_results() {
        let stub = Arc::new(catalogue().failing_search_page(2));
        let result = curator(&stub).curate("alien", 10, 1, 5).await;
        assert!(matches!(result, Err(PostrError::ProviderUnavailable(_))));
    }

    #[tokio::test]
    async fn search_uses_configured_defaults() {
        let stub = Arc::new(catalogue());
        let defaults = CurationConfig {
            desired_count: 3,
            min_images: 2,
            max_pages: 1,
        };
        let curator = SearchCurator::new(stub.clone(), defaults);
        assert_eq!(curator.defaults(), defaults);

        let found = curator.search("alien").await.expect("search");
        assert_eq!(ids(&found), vec![2]);
        assert_eq!(stub.search_calls(), 1);
    }

    /// Answers backdrop checks slowest-first for the best-ranked movies so
    /// completion order is the reverse of rank order.
    struct ReversedLatency(StubProvider);

    #[async_trait]
    impl MetadataProvider for ReversedLatency {
        async fn search_movies(&self, query: &str, page: u32) -> Result<SearchPage> {
            self.0.search_movies(query, page).await
        }

        async fn movie_details(&self, id: MovieId) -> Result<MovieDetails> {
            self.0.movie_details(id).await
        }

        async fn movie_credits(&self, id: MovieId) -> Result<Credits> {
            self.0.movie_credits(id).await
        }

        async fn movie_images(&self, id: MovieId) -> Result<Vec<ArtworkAsset>> {
            tokio::time::sleep(Duration::from_millis(10 * (5 - id.0.min(5)))).await;
            self.0.movie_images(id).await
        }
    }

    #[tokio::test]
    async fn rank_order_survives_out_of_order_completion() {
        let stub = (1..=4u64).fold(
            StubProvider::new().with_search(
                "slow",
                (1..=4).map(|id| candidate(id, "Slow")).collect(),
                4,
            ),
            |stub, id| stub.with_backdrops(MovieId(id), backdrops(id, 1)),
        );
        let curator = SearchCurator::new(Arc::new(ReversedLatency(stub)), CurationConfig::default());

        let found = curator.curate("slow", 4, 1, 1).await.expect("curate");
        assert_eq!(ids(&found), vec![1, 2, 3, 4]);
    }

    /// Holds every backdrop check at a barrier sized to one page, so a page
    /// only completes when all of its checks are in flight together.
    struct Rendezvous {
        inner: StubProvider,
        barrier: Barrier,
    }

    #[async_trait]
    impl MetadataProvider for Rendezvous {
        async fn search_movies(&self, query: &str, page: u32) -> Result<SearchPage> {
            self.inner.search_movies(query, page).await
        }

        async fn movie_details(&self, id: MovieId) -> Result<MovieDetails> {
            self.inner.movie_details(id).await
        }

        async fn movie_credits(&self, id: MovieId) -> Result<Credits> {
            self.inner.movie_credits(id).await
        }

        async fn movie_images(&self, id: MovieId) -> Result<Vec<ArtworkAsset>> {
            self.barrier.wait().await;
            self.inner.movie_images(id).await
        }
    }

    #[tokio::test]
    async fn artwork_checks_of_a_page_overlap() {
        let inner = catalogue();
        let curator = SearchCurator::new(
            Arc::new(Rendezvous {
                inner,
                barrier: Barrier::new(4),
            }),
            CurationConfig::default(),
        );

        let found = tokio::time::timeout(Duration::from_secs(5), curator.curate("alien", 2, 1, 1))
            .await
            .expect("checks of one page should run together")
            .expect("curate");
        assert_eq!(ids(&found), vec![1, 2]);
    }
}
