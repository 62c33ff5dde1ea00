// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// postr-tmdb — Movie metadata for postr.
//
// Defines the provider seams the rest of the workspace is written against
// (`MetadataProvider`, `AssetSource`), the TMDB v3 implementation of them, and
// an in-memory stub used by tests and offline builds.

pub mod client;
pub mod provider;
pub mod stub;
pub mod wire;

pub use client::TmdbClient;
pub use provider::{AssetSource, MetadataProvider};
pub use stub::StubProvider;
