//! Object dump pass.
//!
//! Probes object numbers from 1 upward and renders every object found, with
//! indirect references inlined, in PDF-like syntax. Probing stops at the first
//! missing object, at the first object that renders as `null`, or at the probe
//! limit, whichever comes first.
//!
//! Within one top-level object each reference is inlined at most once; every
//! later occurrence is written as `n g R`. Output per object is therefore
//! bounded by the size of the document, whatever its reference graph.

use crate::extraction::text::clean_utf8;
use lopdf::{Document, Object, ObjectId};
use std::collections::HashSet;

/// Inlining depth after which references are left as `n g R`.
const MAX_INLINE_DEPTH: usize = 32;

/// Lookup of PDF objects by number.
pub trait ObjectSource {
    /// The object with number `number`, whatever its generation.
    fn object(&self, number: u32) -> Option<(ObjectId, &Object)>;

    /// The object an indirect reference points at.
    fn reference(&self, id: ObjectId) -> Option<&Object>;
}

impl ObjectSource for Document {
    fn object(&self, number: u32) -> Option<(ObjectId, &Object)> {
        self.objects
            .range((number, 0)..=(number, u16::MAX))
            .next()
            .map(|(id, object)| (*id, object))
    }

    fn reference(&self, id: ObjectId) -> Option<&Object> {
        self.get_object(id).ok()
    }
}

/// Render objects `1..=limit` of `source`, one string per object.
pub fn dump_objects<S: ObjectSource + ?Sized>(source: &S, limit: u32) -> Vec<String> {
    let mut rendered = Vec::new();

    for number in 1..=limit {
        let Some((id, object)) = source.object(number) else {
            tracing::debug!(object = number, "object lookup failed, stopping probe");
            break;
        };

        let text = render(source, object, &mut Expansion::rooted_at(id));
        if text == "null" {
            tracing::debug!(object = number, "null object, stopping probe");
            break;
        }
        rendered.push(text);
    }

    rendered
}

/// References already inlined while rendering one top-level object.
#[derive(Debug, Default)]
pub struct Expansion {
    inlined: HashSet<ObjectId>,
    depth: usize,
}

impl Expansion {
    /// State for rendering object `root`, which counts as already inlined.
    pub fn rooted_at(root: ObjectId) -> Self {
        Self {
            inlined: HashSet::from([root]),
            depth: 0,
        }
    }
}

/// Render `object`, inlining references that `expansion` has not inlined yet.
pub fn render<S: ObjectSource + ?Sized>(source: &S, object: &Object, expansion: &mut Expansion) -> String {
    match object {
        Object::Null => "null".to_string(),
        Object::Boolean(value) => value.to_string(),
        Object::Integer(value) => value.to_string(),
        Object::Real(value) => value.to_string(),
        Object::Name(name) => format!("/{}", String::from_utf8_lossy(name)),
        Object::String(bytes, _) => format!("({})", clean_utf8(bytes)),
        Object::Array(items) => {
            let parts: Vec<String> = items.iter().map(|item| render(source, item, expansion)).collect();
            format!("[{}]", parts.join(" "))
        }
        Object::Dictionary(dict) => render_dictionary(source, dict, expansion),
        Object::Stream(stream) => {
            let content = stream
                .decompressed_content()
                .unwrap_or_else(|_| stream.content.clone());
            format!(
                "{} stream {} endstream",
                render_dictionary(source, &stream.dict, expansion),
                clean_utf8(&content)
            )
        }
        Object::Reference(id) => {
            let reference = format!("{} {} R", id.0, id.1);
            if expansion.depth >= MAX_INLINE_DEPTH || expansion.inlined.contains(id) {
                return reference;
            }
            match source.reference(*id) {
                Some(target) => {
                    expansion.inlined.insert(*id);
                    expansion.depth += 1;
                    let text = render(source, target, expansion);
                    expansion.depth -= 1;
                    text
                }
                None => reference,
            }
        }
    }
}

fn render_dictionary<S: ObjectSource + ?Sized>(
    source: &S,
    dict: &lopdf::Dictionary,
    expansion: &mut Expansion,
) -> String {
    let entries: Vec<String> = dict
        .iter()
        .map(|(key, value)| format!("/{} {}", String::from_utf8_lossy(key), render(source, value, expansion)))
        .collect();
    format!("<<{}>>", entries.join(" "))
}
