// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — composing posters and inspecting the result.

pub mod composer;
pub mod reader;

pub use composer::DocumentComposer;
pub use reader::PdfReader;
