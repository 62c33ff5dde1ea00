// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for postr.

use thiserror::Error;

/// Top-level error type for all postr operations.
///
/// A search that finds nothing is not an error: curation returns an empty
/// `Vec` instead.
#[derive(Debug, Error)]
pub enum PostrError {
    // -- Metadata provider --
    #[error("metadata provider unavailable: {0}")]
    ProviderUnavailable(String),

    // -- Composition --
    #[error("missing asset: {0}")]
    MissingAsset(String),

    #[error("asset fetch failed: {0}")]
    AssetFetch(String),

    #[error("invalid artwork: {0}")]
    InvalidArtwork(String),

    #[error("unknown page template: {0}")]
    UnknownTemplate(String),

    #[error("PDF operation failed: {0}")]
    Pdf(String),

    // -- Configuration / persistence --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PostrError>;
