// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// TMDB v3 client — `MetadataProvider` and `AssetSource` over HTTPS using
// `reqwest`.
//
// Every request carries the configured bearer token and asks for JSON. Any
// transport error, non-2xx status or undecodable body surfaces as
// `ProviderUnavailable`; there is no retry.

use std::time::Duration;

use async_trait::async_trait;
use postr_core::config::ProviderConfig;
use postr_core::error::{PostrError, Result};
use postr_core::types::{ArtworkAsset, Credits, MovieDetails, MovieId, SearchPage};
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::provider::{AssetSource, MetadataProvider};
use crate::wire::{CreditsResponse, DetailsResponse, ImageUrls, ImagesResponse, SearchResponse};

/// HTTP client for the TMDB API.
#[derive(Clone)]
pub struct TmdbClient {
    http: Client,
    api_base: String,
    api_token: String,
    language: String,
    images: ImageUrls,
}

impl TmdbClient {
    /// Build a client from explicit configuration. An empty token is a
    /// configuration error rather than a 401 on first use.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        if config.api_token.trim().is_empty() {
            return Err(PostrError::Config("provider.api_token is empty".into()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| {
                PostrError::ProviderUnavailable(format!("failed to build HTTP client: {err}"))
            })?;

        Ok(Self {
            http,
            api_base: config.api_base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            language: config.language.clone(),
            images: ImageUrls::new(&config.image_base_url),
        })
    }

    /// GET `path` below the API base and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.api_base, path);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_token)
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|err| PostrError::ProviderUnavailable(format!("{path}: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(path, %status, "Provider request failed");
            return Err(PostrError::ProviderUnavailable(format!("{path}: HTTP {status}")));
        }

        response.json::<T>().await.map_err(|err| {
            PostrError::ProviderUnavailable(format!("{path}: undecodable response: {err}"))
        })
    }
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    #[instrument(skip(self))]
    async fn search_movies(&self, query: &str, page: u32) -> Result<SearchPage> {
        let raw: SearchResponse = self
            .get_json(
                "/search/movie",
                &[
                    ("query", query.to_string()),
                    ("language", self.language.clone()),
                    ("page", page.to_string()),
                ],
            )
            .await?;
        let page = raw.into_page(&self.images);
        debug!(
            results = page.results.len(),
            total_pages = page.total_pages,
            "Search page received"
        );
        Ok(page)
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn movie_details(&self, id: MovieId) -> Result<MovieDetails> {
        let raw: DetailsResponse = self.get_json(&format!("/movie/{id}"), &[]).await?;
        Ok(raw.into())
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn movie_credits(&self, id: MovieId) -> Result<Credits> {
        let raw: CreditsResponse = self.get_json(&format!("/movie/{id}/credits"), &[]).await?;
        Ok(raw.into())
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn movie_images(&self, id: MovieId) -> Result<Vec<ArtworkAsset>> {
        let raw: ImagesResponse = self.get_json(&format!("/movie/{id}/images"), &[]).await?;
        Ok(raw.into_backdrops(&self.images))
    }
}

#[async_trait]
impl AssetSource for TmdbClient {
    #[instrument(skip(self))]
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| PostrError::AssetFetch(format!("{url}: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PostrError::AssetFetch(format!("{url}: HTTP {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| PostrError::AssetFetch(format!("{url}: {err}")))?;
        debug!(bytes = bytes.len(), "Asset downloaded");
        Ok(bytes.to_vec())
    }
}
