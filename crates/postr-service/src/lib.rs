// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// postr-service — Wires search, metadata, fonts and composition together.
//
// Embedding applications create one `PosterService` at start-up and call it
// from their UI; everything below it is plain async function calls.

pub mod fonts;
pub mod poster;
pub mod telemetry;

pub use fonts::{
    DirectoryFontSource, FontSource, RemoteFontSource, StandardFontSource, font_source_for,
};
pub use poster::PosterService;
pub use telemetry::init_tracing;
