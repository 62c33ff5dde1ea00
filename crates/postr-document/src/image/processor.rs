// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decodes downloaded artwork and prepares it for embedding
// as a PDF image XObject using the `image` crate.
//
// Baseline/progressive JPEGs with one or three components are embedded as-is
// (DCTDecode); everything else is decoded and re-embedded as 8-bit RGB, which
// the PDF writer Flate-compresses.

use image::{DynamicImage, ImageFormat};
use postr_core::error::{PostrError, Result};
use tracing::{debug, instrument};

/// Colour space of an image XObject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceRgb,
    DeviceGray,
}

impl ColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::DeviceRgb => "DeviceRGB",
            Self::DeviceGray => "DeviceGray",
        }
    }
}

/// Image samples in the form the PDF writer embeds.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfImage {
    pub width: u32,
    pub height: u32,
    pub color_space: ColorSpace,
    /// `Some("DCTDecode")` when `data` is still a JPEG stream.
    pub filter: Option<&'static str>,
    pub data: Vec<u8>,
}

/// Decoded artwork plus the original encoded bytes.
pub struct ImageProcessor {
    /// The decoded image.
    image: DynamicImage,
    /// Container format detected from the bytes.
    format: ImageFormat,
    /// Original encoded bytes, kept for JPEG passthrough.
    encoded: Vec<u8>,
}

impl ImageProcessor {
    /// Decode raw encoded bytes (JPEG, PNG, WebP, …).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let format = image::guess_format(&data).map_err(|err| {
            PostrError::AssetFetch(format!("unrecognised artwork format: {err}"))
        })?;
        let decoded = image::load_from_memory_with_format(&data, format).map_err(|err| {
            PostrError::AssetFetch(format!("failed to decode artwork: {err}"))
        })?;
        debug!(
            width = decoded.width(),
            height = decoded.height(),
            ?format,
            "Artwork decoded"
        );
        Ok(Self {
            image: decoded,
            format,
            encoded: data,
        })
    }

    /// Pixel width.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Pixel height.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Width over height of the decoded pixels.
    pub fn aspect_ratio(&self) -> f32 {
        self.image.width() as f32 / self.image.height().max(1) as f32
    }

    /// Convert into embeddable samples.
    pub fn into_pdf_image(self) -> PdfImage {
        let (width, height) = (self.image.width(), self.image.height());

        if self.format == ImageFormat::Jpeg {
            let color_space = match jpeg_components(&self.encoded) {
                Some(1) => Some(ColorSpace::DeviceGray),
                Some(3) => Some(ColorSpace::DeviceRgb),
                _ => None,
            };
            if let Some(color_space) = color_space {
                debug!(?color_space, "Embedding JPEG without re-encoding");
                return PdfImage {
                    width,
                    height,
                    color_space,
                    filter: Some("DCTDecode"),
                    data: self.encoded,
                };
            }
        }

        PdfImage {
            width,
            height,
            color_space: ColorSpace::DeviceRgb,
            filter: None,
            data: self.image.to_rgb8().into_raw(),
        }
    }
}

/// Number of colour components declared in a JPEG's start-of-frame header.
fn jpeg_components(data: &[u8]) -> Option<u8> {
    if !data.starts_with(&[0xFF, 0xD8]) {
        return None;
    }

    let mut pos = 2;
    while pos + 1 < data.len() {
        if data[pos] != 0xFF {
            return None;
        }
        let marker = data[pos + 1];
        match marker {
            // Fill bytes.
            0xFF => {
                pos += 1;
                continue;
            }
            // Standalone markers carry no length.
            0x01 | 0xD0..=0xD8 => {
                pos += 2;
                continue;
            }
            // End of image or start of scan before any frame header.
            0xD9 | 0xDA => return None,
            _ => {}
        }

        let length = u16::from_be_bytes([*data.get(pos + 2)?, *data.get(pos + 3)?]) as usize;
        let is_frame = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_frame {
            // length(2) precision(1) height(2) width(2) components(1)
            return data.get(pos + 9).copied();
        }
        pos += 2 + length;
    }
    None
}
