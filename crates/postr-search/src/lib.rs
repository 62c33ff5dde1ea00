// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// postr-search — Finds movies worth turning into posters.
//
// Search results are only useful if the movie has backdrop artwork; the
// curator pages through provider results and keeps the ones that do.

pub mod curator;

pub use curator::SearchCurator;
