// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for postr: search candidates, movie metadata, artwork and
// page templates.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{PostrError, Result};

/// Provider-assigned movie identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MovieId(pub u64);

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MovieId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Crew jobs that count as writing credits.
pub const WRITER_JOBS: [&str; 4] = ["Writer", "Screenplay", "Story", "Screenstory"];

/// Crew job that identifies the director.
pub const DIRECTOR_JOB: &str = "Director";

/// Maximum number of actors kept on a [`MovieDetail`].
pub const MAX_ACTORS: usize = 10;

// -- Search -------------------------------------------------------------------

/// A single search result as returned by the metadata provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub id: MovieId,
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub overview: Option<String>,
    /// Small poster thumbnail URL (w92).
    pub thumbnail_url: Option<String>,
    /// Average user rating, 0–10.
    pub average_rating: Option<f32>,
}

impl SearchCandidate {
    /// Release year, if the release date is known.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.map(|date| date.year())
    }
}

/// One page of search results plus the provider's pagination counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub results: Vec<SearchCandidate>,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
}

// -- Movie metadata -----------------------------------------------------------

/// Title and release date from the provider's detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub title: String,
    pub release_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
    /// Billing rank, lowest first.
    pub order: u32,
    pub character: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub name: String,
    pub job: String,
    pub department: Option<String>,
}

/// Raw cast and crew lists for a movie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}

/// Everything the poster needs to know about a movie besides its artwork.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub director: Option<String>,
    /// Unique writer names in order of first appearance.
    pub writers: Vec<String>,
    /// Up to [`MAX_ACTORS`] names in billing order.
    pub actors: Vec<String>,
}

impl MovieDetail {
    /// Fold detail and credits responses into a `MovieDetail`.
    ///
    /// The director is the first crew member whose job is exactly
    /// `"Director"`. Writers are every crew member with a job in
    /// [`WRITER_JOBS`], deduplicated by name. Actors are sorted by billing
    /// order (stable for ties) and truncated to [`MAX_ACTORS`].
    pub fn from_parts(details: MovieDetails, credits: Credits) -> Self {
        let director = credits
            .crew
            .iter()
            .find(|member| member.job == DIRECTOR_JOB)
            .map(|member| member.name.clone());

        let mut seen = HashSet::new();
        let writers = credits
            .crew
            .iter()
            .filter(|member| WRITER_JOBS.contains(&member.job.as_str()))
            .filter(|member| seen.insert(member.name.clone()))
            .map(|member| member.name.clone())
            .collect();

        let mut cast = credits.cast;
        cast.sort_by_key(|member| member.order);
        let actors = cast
            .into_iter()
            .take(MAX_ACTORS)
            .map(|member| member.name)
            .collect();

        Self {
            title: details.title,
            release_date: details.release_date,
            director,
            writers,
            actors,
        }
    }

    /// Four-digit release year, if known.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.map(|date| date.year())
    }

    /// Release date in the `July 16, 2010` form used on the poster.
    pub fn formatted_release_date(&self) -> Option<String> {
        self.release_date
            .map(|date| date.format("%B %-d, %Y").to_string())
    }
}

// -- Artwork ------------------------------------------------------------------

/// A backdrop image reference with its geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkAsset {
    aspect_ratio: f32,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Absolute, fetchable image URL.
    pub url: String,
}

impl ArtworkAsset {
    /// Create an asset, rejecting non-positive or non-finite aspect ratios.
    pub fn new(
        aspect_ratio: f32,
        width: Option<u32>,
        height: Option<u32>,
        url: impl Into<String>,
    ) -> Result<Self> {
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return Err(PostrError::InvalidArtwork(format!(
                "aspect ratio must be positive, got {aspect_ratio}"
            )));
        }
        Ok(Self {
            aspect_ratio,
            width: width.filter(|w| *w > 0),
            height: height.filter(|h| *h > 0),
            url: url.into(),
        })
    }

    /// Width divided by height; always > 0.
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
}

/// An artwork asset together with its downloaded, still-encoded bytes.
#[derive(Debug, Clone)]
pub struct ArtworkImage {
    pub asset: ArtworkAsset,
    pub data: Vec<u8>,
}

impl ArtworkImage {
    pub fn new(asset: ArtworkAsset, data: Vec<u8>) -> Self {
        Self { asset, data }
    }
}

// -- Page templates -----------------------------------------------------------

/// Fixed page sizes a poster can be composed onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PageTemplate {
    #[serde(rename = "A4")]
    A4,
    #[default]
    #[serde(rename = "POSTER_18x24")]
    Poster18x24,
    #[serde(rename = "POSTER_24x36")]
    Poster24x36,
    #[serde(rename = "SQUARE")]
    Square,
}

impl PageTemplate {
    pub const ALL: [PageTemplate; 4] = [
        PageTemplate::A4,
        PageTemplate::Poster18x24,
        PageTemplate::Poster24x36,
        PageTemplate::Square,
    ];

    /// Page size in PDF points (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::A4 => (595, 842),
            Self::Poster18x24 => (1296, 1728),
            Self::Poster24x36 => (1728, 2592),
            Self::Square => (1080, 1080),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::A4 => "A4",
            Self::Poster18x24 => "POSTER_18x24",
            Self::Poster24x36 => "POSTER_24x36",
            Self::Square => "SQUARE",
        }
    }
}

impl std::fmt::Display for PageTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PageTemplate {
    type Err = PostrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|template| template.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PostrError::UnknownTemplate(s.to_string()))
    }
}

// -- Output -------------------------------------------------------------------

/// Suffix appended to the sanitized title to form the download filename.
pub const POSTER_FILE_SUFFIX: &str = "_poster.pdf";

/// A finished single-page poster.
#[derive(Debug, Clone)]
pub struct ComposedDocument {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub template: PageTemplate,
}

/// Derive the poster filename from a movie title.
///
/// Every character outside `[A-Za-z0-9]` is dropped; a title with nothing left
/// falls back to `untitled`.
pub fn poster_filename(title: &str) -> String {
    let stem: String = title.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    let stem = if stem.is_empty() { "untitled".to_string() } else { stem };
    format!("{stem}{POSTER_FILE_SUFFIX}")
}
