// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Font module — WinAnsi text encoding and loaded font metrics.

pub mod encoding;
pub mod metrics;

pub use metrics::{FontRole, FontSet, LoadedFont, StandardFont};
