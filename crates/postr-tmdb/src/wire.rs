// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// TMDB v3 response shapes and their mapping onto postr's domain types.
//
// The API is loose about nulls and empty strings; everything optional is
// deserialised leniently here and normalised once, so the domain types never
// see an empty title or a zero rating.

use chrono::NaiveDate;
use postr_core::types::{
    ArtworkAsset, CastMember, Credits, CrewMember, MovieDetails, MovieId, SearchCandidate,
    SearchPage,
};
use serde::Deserialize;
use tracing::warn;

/// Image size segment for full-resolution backdrops.
pub const BACKDROP_SIZE: &str = "original";
/// Image size segment for search-result thumbnails.
pub const THUMBNAIL_SIZE: &str = "w92";

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<MovieResult>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

#[derive(Debug, Deserialize)]
pub struct MovieResult {
    pub id: u64,
    pub title: Option<String>,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    #[serde(default)]
    pub title: String,
    pub release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreditsResponse {
    #[serde(default)]
    pub cast: Vec<CastEntry>,
    #[serde(default)]
    pub crew: Vec<CrewEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CastEntry {
    pub name: String,
    #[serde(default)]
    pub order: u32,
    pub character: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CrewEntry {
    pub name: String,
    #[serde(default)]
    pub job: String,
    pub department: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImagesResponse {
    #[serde(default)]
    pub backdrops: Vec<BackdropEntry>,
}

#[derive(Debug, Deserialize)]
pub struct BackdropEntry {
    pub aspect_ratio: f32,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub file_path: String,
}

/// Builds absolute image URLs from TMDB file paths.
#[derive(Debug, Clone)]
pub struct ImageUrls {
    base: String,
}

impl ImageUrls {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, size: &str, file_path: &str) -> String {
        format!("{}/{}{}", self.base, size, file_path)
    }
}

/// Parse a `YYYY-MM-DD` date. Anything else, including partial dates such as
/// `"2010"` or an empty string, is treated as unknown.
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl SearchResponse {
    pub fn into_page(self, images: &ImageUrls) -> SearchPage {
        SearchPage {
            results: self
                .results
                .into_iter()
                .map(|movie| movie.into_candidate(images))
                .collect(),
            page: self.page,
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}

impl MovieResult {
    pub fn into_candidate(self, images: &ImageUrls) -> SearchCandidate {
        SearchCandidate {
            id: MovieId(self.id),
            title: non_empty(self.title),
            release_date: self.release_date.as_deref().and_then(parse_release_date),
            overview: non_empty(self.overview),
            thumbnail_url: non_empty(self.poster_path)
                .map(|path| images.url(THUMBNAIL_SIZE, &path)),
            // A zero average means nobody has voted yet.
            average_rating: self.vote_average.filter(|rating| *rating > 0.0),
        }
    }
}

impl From<DetailsResponse> for MovieDetails {
    fn from(raw: DetailsResponse) -> Self {
        Self {
            title: raw.title,
            release_date: raw.release_date.as_deref().and_then(parse_release_date),
        }
    }
}

impl From<CreditsResponse> for Credits {
    fn from(raw: CreditsResponse) -> Self {
        Self {
            cast: raw
                .cast
                .into_iter()
                .map(|entry| CastMember {
                    name: entry.name,
                    order: entry.order,
                    character: non_empty(entry.character),
                })
                .collect(),
            crew: raw
                .crew
                .into_iter()
                .map(|entry| CrewMember {
                    name: entry.name,
                    job: entry.job,
                    department: non_empty(entry.department),
                })
                .collect(),
        }
    }
}

impl ImagesResponse {
    /// Backdrops as artwork assets. Entries with an unusable aspect ratio are
    /// dropped since they could never be laid out.
    pub fn into_backdrops(self, images: &ImageUrls) -> Vec<ArtworkAsset> {
        self.backdrops
            .into_iter()
            .filter_map(|entry| {
                let url = images.url(BACKDROP_SIZE, &entry.file_path);
                match ArtworkAsset::new(entry.aspect_ratio, entry.width, entry.height, url) {
                    Ok(asset) => Some(asset),
                    Err(err) => {
                        warn!(file_path = %entry.file_path, %err, "Skipping backdrop");
                        None
                    }
                }
            })
            .collect()
    }
}
