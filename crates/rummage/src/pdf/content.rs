//! Content-stream interpretation.
//!
//! The interpreter is a fold over decoded operations. [`ScanState`] carries the
//! current font and the text recovered so far; [`step`] consumes one operation
//! and returns the next state. Only font selection and the text-show operators
//! affect the state, everything else passes through untouched.

use super::font::GlyphDecoder;
use lopdf::Object;
use lopdf::content::Operation;

/// Resolves a font resource name (the operand of `Tf`) to a decoder.
pub trait FontResolver {
    type Font: GlyphDecoder + Clone;

    fn resolve_font(&self, name: &[u8]) -> Option<Self::Font>;
}

/// Interpreter state threaded through [`step`].
#[derive(Debug, Clone)]
pub struct ScanState<F> {
    pub font: Option<F>,
    pub text: String,
}

impl<F> Default for ScanState<F> {
    fn default() -> Self {
        Self {
            font: None,
            text: String::new(),
        }
    }
}

impl<F: GlyphDecoder> ScanState<F> {
    fn show(&mut self, bytes: &[u8]) {
        let Some(font) = &self.font else {
            return;
        };
        self.text.extend(
            font.decode(bytes)
                .into_iter()
                .filter(|cp| *cp != 0)
                .filter_map(char::from_u32),
        );
    }
}

/// Apply one operation to `state`.
pub fn step<R: FontResolver>(resolver: &R, mut state: ScanState<R::Font>, op: &Operation) -> ScanState<R::Font> {
    match op.operator.as_str() {
        "Tf" => {
            if let Some(Object::Name(name)) = op.operands.first() {
                match resolver.resolve_font(name) {
                    Some(font) => state.font = Some(font),
                    None => tracing::debug!(font = %String::from_utf8_lossy(name), "unresolved font resource"),
                }
            }
        }
        "Tj" | "'" | "\"" => {
            if let Some(Object::String(bytes, _)) = op.operands.last() {
                state.show(bytes);
            }
        }
        "TJ" => {
            if let Some(Object::Array(items)) = op.operands.first() {
                for item in items {
                    if let Object::String(bytes, _) = item {
                        state.show(bytes);
                    }
                }
            }
        }
        _ => {}
    }
    state
}

/// Run every operation through [`step`] and return the recovered text.
pub fn interpret<R: FontResolver>(resolver: &R, operations: &[Operation]) -> String {
    operations
        .iter()
        .fold(ScanState::default(), |state, op| step(resolver, state, op))
        .text
}
