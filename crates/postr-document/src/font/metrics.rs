// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Loaded fonts: WinAnsi width tables for measurement plus whatever the PDF
// writer needs to embed or reference the face.
//
// TrueType programs are parsed once with `ttf-parser`; after loading only
// plain tables are kept so a `LoadedFont` owns no borrowed data.

use postr_core::error::{PostrError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use ttf_parser::{Face, GlyphId};

use super::encoding::{FIRST_CHAR, LAST_CHAR, decode_byte, encode_char};
use crate::layout::wrap::TextMeasure;

/// Which of the three poster faces a piece of text uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontRole {
    Bold,
    Regular,
    Medium,
}

impl FontRole {
    pub const ALL: [FontRole; 3] = [FontRole::Bold, FontRole::Regular, FontRole::Medium];

    /// Name of the font in the page's /Resources dictionary.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Self::Bold => "F1",
            Self::Regular => "F2",
            Self::Medium => "F3",
        }
    }
}

/// Standard-14 faces usable without embedding a font program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    pub fn base_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// AFM advance widths for 0x20..=0x7E.
    fn ascii_widths(&self) -> &'static [u16; 95] {
        match self {
            Self::Helvetica => &HELVETICA_WIDTHS,
            Self::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Width used for WinAnsi codes outside printable ASCII.
    fn fallback_width(&self) -> u16 {
        match self {
            Self::Helvetica => 556,
            Self::HelveticaBold => 611,
        }
    }
}

/// Font descriptor values and program bytes of an embedded TrueType face.
/// Metric values are in 1/1000 em.
#[derive(Debug, Clone)]
pub(crate) struct TrueTypeProgram {
    pub data: Vec<u8>,
    pub ascent: i32,
    pub descent: i32,
    pub cap_height: i32,
    pub bbox: [i32; 4],
}

#[derive(Debug, Clone)]
pub(crate) enum FontKind {
    Standard(StandardFont),
    TrueType(TrueTypeProgram),
}

/// A font ready for measurement and PDF embedding.
#[derive(Debug, Clone)]
pub struct LoadedFont {
    name: String,
    /// Advance widths in 1/1000 em, indexed by WinAnsi code.
    widths: [u16; 256],
    kind: FontKind,
}

impl LoadedFont {
    /// Parse a TrueType font program.
    ///
    /// `name` becomes the PDF /BaseFont (sanitised to a valid PDF name). CFF
    /// flavoured OpenType files are rejected because they cannot be embedded
    /// as /FontFile2.
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_ttf(name: &str, data: Vec<u8>) -> Result<Self> {
        if data.starts_with(b"OTTO") {
            return Err(PostrError::AssetFetch(format!(
                "font {name}: CFF-based OpenType is not supported, use a TrueType file"
            )));
        }

        let (widths, ascent, descent, cap_height, bbox) = {
            let face = Face::parse(&data, 0).map_err(|err| {
                PostrError::AssetFetch(format!("font {name}: not a usable font: {err}"))
            })?;
            let units = f32::from(face.units_per_em().max(1));
            let scale = |value: f32| (value * 1000.0 / units).round();

            let notdef = face.glyph_hor_advance(GlyphId(0)).unwrap_or(0);
            let mut widths = [0u16; 256];
            for code in FIRST_CHAR..=LAST_CHAR {
                let advance = decode_byte(code)
                    .and_then(|c| face.glyph_index(c))
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .unwrap_or(notdef);
                widths[code as usize] = scale(f32::from(advance)) as u16;
            }

            let ascent = scale(f32::from(face.ascender())) as i32;
            let descent = scale(f32::from(face.descender())) as i32;
            let cap_height = face
                .capital_height()
                .map(|height| scale(f32::from(height)) as i32)
                .unwrap_or(ascent);
            let rect = face.global_bounding_box();
            let bbox = [
                scale(f32::from(rect.x_min)) as i32,
                scale(f32::from(rect.y_min)) as i32,
                scale(f32::from(rect.x_max)) as i32,
                scale(f32::from(rect.y_max)) as i32,
            ];
            (widths, ascent, descent, cap_height, bbox)
        };

        debug!(name, ascent, descent, "TrueType font parsed");

        Ok(Self {
            name: pdf_name(name),
            widths,
            kind: FontKind::TrueType(TrueTypeProgram {
                data,
                ascent,
                descent,
                cap_height,
                bbox,
            }),
        })
    }

    /// A standard-14 face referenced by name, nothing embedded.
    pub fn standard(font: StandardFont) -> Self {
        let mut widths = [font.fallback_width(); 256];
        for (offset, width) in font.ascii_widths().iter().enumerate() {
            widths[usize::from(FIRST_CHAR) + offset] = *width;
        }
        Self {
            name: font.base_name().to_string(),
            widths,
            kind: FontKind::Standard(font),
        }
    }

    /// PDF /BaseFont name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a font program will be embedded in the PDF.
    pub fn is_embedded(&self) -> bool {
        matches!(self.kind, FontKind::TrueType(_))
    }

    /// Advance width of a WinAnsi code in 1/1000 em.
    pub fn code_width(&self, code: u8) -> u16 {
        self.widths[code as usize]
    }

    pub(crate) fn kind(&self) -> &FontKind {
        &self.kind
    }
}

impl TextMeasure for LoadedFont {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .map(|c| u32::from(self.code_width(encode_char(c))))
            .sum();
        units as f32 * font_size / 1000.0
    }
}

/// The three faces a poster is set in.
#[derive(Debug, Clone)]
pub struct FontSet {
    pub bold: LoadedFont,
    pub regular: LoadedFont,
    pub medium: LoadedFont,
}

impl FontSet {
    pub fn new(bold: LoadedFont, regular: LoadedFont, medium: LoadedFont) -> Self {
        Self {
            bold,
            regular,
            medium,
        }
    }

    /// Helvetica-based set for callers without font files.
    pub fn standard() -> Self {
        Self {
            bold: LoadedFont::standard(StandardFont::HelveticaBold),
            regular: LoadedFont::standard(StandardFont::Helvetica),
            medium: LoadedFont::standard(StandardFont::Helvetica),
        }
    }

    pub fn get(&self, role: FontRole) -> &LoadedFont {
        match role {
            FontRole::Bold => &self.bold,
            FontRole::Regular => &self.regular,
            FontRole::Medium => &self.medium,
        }
    }
}

/// Reduce a font name to characters that are safe in a PDF name token.
fn pdf_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'))
        .collect();
    if cleaned.is_empty() {
        "EmbeddedFont".to_string()
    } else {
        cleaned
    }
}

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];
