// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document composer — renders a poster layout into a single-page PDF using
// `lopdf`.
//
// The object graph is built by hand so that output is a pure function of the
// inputs: no creation dates, no /ID, and object numbers assigned in a fixed
// order. Two calls with the same inputs produce identical bytes.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use postr_core::error::{PostrError, Result};
use postr_core::types::{ArtworkImage, ComposedDocument, MovieDetail, PageTemplate, poster_filename};
use tracing::{debug, info, instrument};

use crate::font::encoding::{FIRST_CHAR, LAST_CHAR, encode};
use crate::font::metrics::FontKind;
use crate::font::{FontRole, FontSet, LoadedFont};
use crate::image::{ImageProcessor, PdfImage};
use crate::layout::poster::{LayoutElement, PosterLayout, Rgb, TextElement};

/// Resource name of the artwork XObject.
const IMAGE_RESOURCE: &str = "Im1";
const PRODUCER: &str = "postr";

/// Lays out and serialises poster documents.
#[derive(Debug, Clone, Default)]
pub struct DocumentComposer;

impl DocumentComposer {
    pub fn new() -> Self {
        Self
    }

    /// Compose a single-page poster.
    ///
    /// The first entry of `artwork` is used. An empty slice fails with
    /// [`PostrError::MissingAsset`] before anything is decoded or drawn;
    /// undecodable artwork fails with [`PostrError::AssetFetch`].
    #[instrument(skip_all, fields(title = %detail.title, template = %template, artwork = artwork.len()))]
    pub fn compose(
        &self,
        detail: &MovieDetail,
        artwork: &[ArtworkImage],
        fonts: &FontSet,
        template: PageTemplate,
    ) -> Result<ComposedDocument> {
        let primary = artwork.first().ok_or_else(|| {
            PostrError::MissingAsset(format!("no artwork supplied for \"{}\"", detail.title))
        })?;

        let image = ImageProcessor::from_bytes(primary.data.clone())?.into_pdf_image();
        let layout = PosterLayout::plan(detail, primary.asset.aspect_ratio(), fonts, template);
        let bytes = self.render(&layout, &image, fonts, &detail.title)?;
        let filename = poster_filename(&detail.title);

        info!(bytes = bytes.len(), filename, "Poster composed");

        Ok(ComposedDocument {
            bytes,
            filename,
            template,
        })
    }

    /// Serialise a resolved layout with its image and fonts.
    pub fn render(
        &self,
        layout: &PosterLayout,
        image: &PdfImage,
        fonts: &FontSet,
        title: &str,
    ) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut font_resources = Dictionary::new();
        for role in FontRole::ALL {
            let font_id = embed_font(&mut doc, fonts.get(role));
            font_resources.set(role.resource_name(), font_id);
        }

        let image_id = doc.add_object(image_stream(image));

        let content = Content {
            operations: page_operations(layout),
        };
        let encoded = content
            .encode()
            .map_err(|err| PostrError::Pdf(format!("failed to encode page content: {err}")))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(layout.width.round() as i64),
                Object::Integer(layout.height.round() as i64),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => font_resources,
                "XObject" => dictionary! {
                    IMAGE_RESOURCE => image_id,
                },
            },
        });

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => Object::Integer(1),
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => text_string(title),
            "Producer" => Object::string_literal(PRODUCER),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        doc.compress();

        let mut output = Vec::new();
        doc.save_to(&mut output)
            .map_err(|err| PostrError::Pdf(format!("failed to serialise poster: {err}")))?;

        debug!(objects = doc.objects.len(), bytes = output.len(), "PDF serialised");
        Ok(output)
    }
}

/// Translate layout elements into content stream operators, in paint order.
fn page_operations(layout: &PosterLayout) -> Vec<Operation> {
    let mut ops = Vec::new();

    for element in &layout.elements {
        match element {
            LayoutElement::Fill { rect, color } => {
                ops.push(fill_color(*color));
                ops.push(Operation::new(
                    "re",
                    vec![real(rect.x), real(rect.y), real(rect.width), real(rect.height)],
                ));
                ops.push(Operation::new("f", vec![]));
            }
            LayoutElement::Image { rect } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "cm",
                    vec![
                        real(rect.width),
                        Object::Integer(0),
                        Object::Integer(0),
                        real(rect.height),
                        real(rect.x),
                        real(rect.y),
                    ],
                ));
                ops.push(Operation::new("Do", vec![Object::Name(IMAGE_RESOURCE.into())]));
                ops.push(Operation::new("Q", vec![]));
            }
            LayoutElement::Text(text) => ops.extend(text_operations(text)),
            LayoutElement::Rule {
                x1,
                x2,
                y,
                thickness,
                color,
            } => {
                ops.push(Operation::new(
                    "RG",
                    vec![real(color.r), real(color.g), real(color.b)],
                ));
                ops.push(Operation::new("w", vec![real(*thickness)]));
                ops.push(Operation::new("m", vec![real(*x1), real(*y)]));
                ops.push(Operation::new("l", vec![real(*x2), real(*y)]));
                ops.push(Operation::new("S", vec![]));
            }
        }
    }

    ops
}

fn text_operations(text: &TextElement) -> [Operation; 6] {
    [
        Operation::new("BT", vec![]),
        fill_color(text.color),
        Operation::new(
            "Tf",
            vec![Object::Name(text.font.resource_name().into()), real(text.size)],
        ),
        Operation::new("Td", vec![real(text.x), real(text.y)]),
        Operation::new("Tj", vec![Object::string_literal(encode(&text.text))]),
        Operation::new("ET", vec![]),
    ]
}

fn fill_color(color: Rgb) -> Operation {
    Operation::new("rg", vec![real(color.r), real(color.g), real(color.b)])
}

fn real(value: f32) -> Object {
    Object::Real(value)
}

/// PDF text string for document metadata: ASCII as a literal, anything else
/// as UTF-16BE with a byte order mark.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Image XObject stream. JPEG data keeps its DCTDecode filter; raw samples are
/// left unfiltered here and Flate-compressed by `Document::compress`.
fn image_stream(image: &PdfImage) -> Stream {
    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => i64::from(image.width),
        "Height" => i64::from(image.height),
        "ColorSpace" => image.color_space.pdf_name(),
        "BitsPerComponent" => Object::Integer(8),
    };
    if let Some(filter) = image.filter {
        dict.set("Filter", filter);
    }
    Stream::new(dict, image.data.clone())
}

/// Add a font dictionary (and, for TrueType, its descriptor and program) to
/// `doc`, returning the font dictionary's id.
fn embed_font(doc: &mut Document, font: &LoadedFont) -> ObjectId {
    match font.kind() {
        FontKind::Standard(face) => doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_name(),
            "Encoding" => "WinAnsiEncoding",
        }),
        FontKind::TrueType(program) => {
            let program_id = doc.add_object(Stream::new(
                dictionary! { "Length1" => program.data.len() as i64 },
                program.data.clone(),
            ));
            let descriptor_id = doc.add_object(dictionary! {
                "Type" => "FontDescriptor",
                "FontName" => font.name(),
                // Nonsymbolic: glyphs are addressed through WinAnsiEncoding.
                "Flags" => Object::Integer(32),
                "FontBBox" => program.bbox.iter().map(|v| Object::Integer(i64::from(*v))).collect::<Vec<_>>(),
                "ItalicAngle" => Object::Integer(0),
                "Ascent" => i64::from(program.ascent),
                "Descent" => i64::from(program.descent),
                "CapHeight" => i64::from(program.cap_height),
                "StemV" => Object::Integer(80),
                "FontFile2" => program_id,
            });
            let widths: Vec<Object> = (FIRST_CHAR..=LAST_CHAR)
                .map(|code| Object::Integer(i64::from(font.code_width(code))))
                .collect();
            doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "TrueType",
                "BaseFont" => font.name(),
                "FirstChar" => i64::from(FIRST_CHAR),
                "LastChar" => i64::from(LAST_CHAR),
                "Widths" => widths,
                "Encoding" => "WinAnsiEncoding",
                "FontDescriptor" => descriptor_id,
            })
        }
    }
}
