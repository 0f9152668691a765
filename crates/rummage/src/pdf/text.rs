//! Visible-text pass: content streams interpreted page by page.

use super::content::{FontResolver, interpret};
use super::error::{PdfError, Result};
use super::font::{Font, resolve};
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Bound on `/Parent` hops while looking for inherited resources.
const MAX_PARENT_DEPTH: usize = 64;

/// Recover the text shown on every page of `doc`, one string per page.
///
/// lopdf already decrypts documents that open with the empty password while
/// loading them. Any other encrypted document gets one empty-password attempt
/// here; if that fails the whole pass fails. A page whose content cannot be
/// read or decoded contributes an empty string.
pub fn extract_visible_text(doc: &mut Document) -> Result<Vec<String>> {
    if doc.is_encrypted() && doc.encryption_state.is_none() {
        doc.decrypt("")
            .map_err(|e| PdfError::DecryptionFailed(e.to_string()))?;
    }

    let pages = doc.get_pages();
    let fonts = FontCache::default();
    let mut texts = Vec::with_capacity(pages.len());

    for (page_number, page_id) in pages {
        match page_text(doc, &fonts, page_number, page_id) {
            Ok(text) => texts.push(text),
            Err(e) => {
                tracing::warn!(page = page_number, error = %e, "skipping unreadable page content");
                texts.push(String::new());
            }
        }
    }

    Ok(texts)
}

fn page_text(doc: &Document, fonts: &FontCache, page_number: u32, page_id: ObjectId) -> Result<String> {
    let data = doc.get_page_content(page_id).map_err(|e| PdfError::PageContentFailed {
        page: page_number,
        message: e.to_string(),
    })?;
    let content = Content::decode(&data).map_err(|e| PdfError::PageContentFailed {
        page: page_number,
        message: e.to_string(),
    })?;

    let resolver = PageFonts::new(doc, page_id, fonts);
    Ok(interpret(&resolver, &content.operations))
}

/// Fonts built once per document, keyed by the object id of their dictionary.
#[derive(Debug, Default)]
pub struct FontCache {
    fonts: RefCell<HashMap<ObjectId, Rc<Font>>>,
}

impl FontCache {
    fn get_or_build(&self, id: ObjectId, build: impl FnOnce() -> Font) -> Rc<Font> {
        if let Some(font) = self.fonts.borrow().get(&id) {
            return Rc::clone(font);
        }
        let font = Rc::new(build());
        self.fonts.borrow_mut().insert(id, Rc::clone(&font));
        font
    }
}

/// Fonts reachable from a page's `/Resources`, inherited through `/Parent`.
pub struct PageFonts<'a> {
    doc: &'a Document,
    page_id: ObjectId,
    cache: &'a FontCache,
}

impl<'a> PageFonts<'a> {
    /// Resolve fonts for `page_id`, sharing parsed fonts through `cache`.
    pub fn new(doc: &'a Document, page_id: ObjectId, cache: &'a FontCache) -> Self {
        Self { doc, page_id, cache }
    }

    /// The font dictionary registered under `name`, with its object id when it
    /// is an indirect object.
    fn font_dictionary(&self, name: &[u8]) -> Option<(Option<ObjectId>, &'a Dictionary)> {
        let doc = self.doc;
        let mut node_id = Some(self.page_id);

        for _ in 0..MAX_PARENT_DEPTH {
            let node = doc.get_dictionary(node_id?).ok()?;

            let font = node
                .get(b"Resources")
                .ok()
                .and_then(|o| resolve(doc, o))
                .and_then(|o| o.as_dict().ok())
                .and_then(|resources| resources.get(b"Font").ok())
                .and_then(|o| resolve(doc, o))
                .and_then(|o| o.as_dict().ok())
                .and_then(|fonts| fonts.get(name).ok())
                .and_then(|entry| match entry {
                    Object::Reference(id) => doc.get_dictionary(*id).ok().map(|dict| (Some(*id), dict)),
                    other => other.as_dict().ok().map(|dict| (None, dict)),
                });
            if font.is_some() {
                return font;
            }

            node_id = node.get(b"Parent").ok().and_then(|o| o.as_reference().ok());
        }

        None
    }
}

impl FontResolver for PageFonts<'_> {
    type Font = Rc<Font>;

    fn resolve_font(&self, name: &[u8]) -> Option<Rc<Font>> {
        let (id, dict) = self.font_dictionary(name)?;
        let build = || Font::from_dictionary(self.doc, dict);
        Some(match id {
            Some(id) => self.cache.get_or_build(id, build),
            None => Rc::new(build()),
        })
    }
}
