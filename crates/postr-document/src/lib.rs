// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// postr-document — Poster composition for postr.
//
// Turns movie metadata, one piece of backdrop artwork and three fonts into a
// single-page PDF. Layout is planned as plain geometry first and then written
// out with lopdf; identical inputs give identical bytes.

pub mod font;
pub mod image;
pub mod layout;
pub mod pdf;

// Re-export the primary structs so callers can use `postr_document::DocumentComposer` etc.
pub use crate::font::{FontRole, FontSet, LoadedFont, StandardFont};
pub use crate::image::processor::ImageProcessor;
pub use crate::layout::poster::PosterLayout;
pub use crate::pdf::composer::DocumentComposer;
pub use crate::pdf::reader::PdfReader;
