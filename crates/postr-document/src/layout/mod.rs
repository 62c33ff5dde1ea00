// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout module — word wrapping and poster page geometry.

pub mod poster;
pub mod wrap;

pub use poster::{LayoutElement, PosterLayout, Rect, Rgb, TextElement, TextKind};
pub use wrap::{TextMeasure, wrap_text};
