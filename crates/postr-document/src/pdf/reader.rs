// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open and inspect existing PDF documents using the `lopdf`
// crate. Used to check composed posters and saved files.

use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};
use postr_core::error::{PostrError, Result};
use tracing::{debug, info, instrument};

/// Read-only view over a parsed PDF.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            PostrError::Pdf(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data)
            .map_err(|err| PostrError::Pdf(format!("failed to load PDF from memory: {}", err)))?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// Width and height in points of a page (1-indexed), from its /MediaBox.
    pub fn page_size(&self, page_number: u32) -> Result<(f32, f32)> {
        let page = self.page_dict(page_number)?;
        let media_box = page
            .get(b"MediaBox")
            .ok()
            .map(|obj| self.resolve(obj))
            .and_then(|obj| obj.as_array().ok())
            .ok_or_else(|| PostrError::Pdf(format!("page {page_number} has no /MediaBox")))?;

        let coords = media_box
            .iter()
            .map(number)
            .collect::<Option<Vec<f32>>>()
            .filter(|coords| coords.len() == 4)
            .ok_or_else(|| PostrError::Pdf(format!("page {page_number} has a malformed /MediaBox")))?;

        Ok((coords[2] - coords[0], coords[3] - coords[1]))
    }

    /// /BaseFont names of the fonts in a page's resources, in resource-name order.
    pub fn font_names(&self, page_number: u32) -> Result<Vec<String>> {
        let Some(fonts) = self.resource_dict(page_number, b"Font")? else {
            return Ok(Vec::new());
        };

        let names = fonts
            .iter()
            .filter_map(|(_, font)| self.resolve(font).as_dict().ok())
            .filter_map(|font| font.get(b"BaseFont").ok())
            .filter_map(|name| name.as_name().ok())
            .map(|name| String::from_utf8_lossy(name).into_owned())
            .collect();
        Ok(names)
    }

    /// Number of image XObjects a page references.
    pub fn image_count(&self, page_number: u32) -> Result<usize> {
        let Some(xobjects) = self.resource_dict(page_number, b"XObject")? else {
            return Ok(0);
        };

        let count = xobjects
            .iter()
            .filter_map(|(_, xobject)| match self.resolve(xobject) {
                Object::Stream(stream) => Some(&stream.dict),
                _ => None,
            })
            .filter(|dict| {
                dict.get(b"Subtype")
                    .and_then(Object::as_name)
                    .is_ok_and(|subtype| subtype == b"Image")
            })
            .count();
        Ok(count)
    }

    /// Text drawn on a page (1-indexed).
    pub fn page_text(&self, page_number: u32) -> Result<String> {
        self.page_id(page_number)?;
        self.document.extract_text(&[page_number]).map_err(|err| {
            PostrError::Pdf(format!("failed to extract text from page {page_number}: {err}"))
        })
    }

    // -- Internals ------------------------------------------------------------

    fn page_id(&self, page_number: u32) -> Result<ObjectId> {
        let pages = self.document.get_pages();
        pages.get(&page_number).copied().ok_or_else(|| {
            PostrError::Pdf(format!(
                "page {} not found (document has {} pages)",
                page_number,
                pages.len()
            ))
        })
    }

    fn page_dict(&self, page_number: u32) -> Result<&Dictionary> {
        let page_id = self.page_id(page_number)?;
        self.document
            .get_object(page_id)
            .and_then(Object::as_dict)
            .map_err(|err| PostrError::Pdf(format!("page {page_number} is not a dictionary: {err}")))
    }

    /// A sub-dictionary of the page's /Resources, e.g. /Font or /XObject.
    fn resource_dict(&self, page_number: u32, key: &[u8]) -> Result<Option<&Dictionary>> {
        let page = self.page_dict(page_number)?;
        let resources = page
            .get(b"Resources")
            .ok()
            .map(|obj| self.resolve(obj))
            .and_then(|obj| obj.as_dict().ok());

        Ok(resources
            .and_then(|resources| resources.get(key).ok())
            .map(|obj| self.resolve(obj))
            .and_then(|obj| obj.as_dict().ok()))
    }

    /// Follow an indirect reference; dangling references resolve to the
    /// reference itself.
    fn resolve<'a>(&'a self, object: &'a Object) -> &'a Object {
        match object {
            Object::Reference(id) => self.document.get_object(*id).unwrap_or(object),
            other => other,
        }
    }
}

fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(value) => Some(*value as f32),
        Object::Real(value) => Some(*value),
        _ => None,
    }
}
