// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — artwork decoding and PDF image preparation.

pub mod processor;

pub use processor::{ColorSpace, ImageProcessor, PdfImage};
