//! Glyph decoding for PDF fonts.
//!
//! A font turns the bytes of a shown string into Unicode codepoints. Decoding
//! prefers the font's `/ToUnicode` CMap; codes the CMap does not cover fall back
//! to the font's own encoding (a single-byte table for simple fonts, two-byte
//! codes read as codepoints for `Type0` fonts).

use super::encoding::{BaseEncoding, ByteTable, glyph_to_char};
use lopdf::{Dictionary, Document, Object};
use std::collections::HashMap;
use std::rc::Rc;

/// Bytes in, codepoints out.
pub trait GlyphDecoder {
    fn decode(&self, bytes: &[u8]) -> Vec<u32>;
}

impl<T: GlyphDecoder + ?Sized> GlyphDecoder for Rc<T> {
    fn decode(&self, bytes: &[u8]) -> Vec<u32> {
        (**self).decode(bytes)
    }
}

#[derive(Debug, Clone)]
enum BaseDecoding {
    SingleByte(Box<ByteTable>),
    TwoByte,
}

/// A font resolved from a page's resources.
#[derive(Debug, Clone)]
pub struct Font {
    to_unicode: Option<ToUnicodeMap>,
    base: BaseDecoding,
}

impl Font {
    /// Simple font using `encoding` for every byte.
    pub fn simple(encoding: BaseEncoding) -> Self {
        Self {
            to_unicode: None,
            base: BaseDecoding::SingleByte(Box::new(encoding.table())),
        }
    }

    /// Composite font without a CMap: two-byte codes are codepoints.
    pub fn two_byte() -> Self {
        Self {
            to_unicode: None,
            base: BaseDecoding::TwoByte,
        }
    }

    /// Attach a parsed `/ToUnicode` CMap.
    pub fn with_to_unicode(mut self, cmap: ToUnicodeMap) -> Self {
        self.to_unicode = Some(cmap);
        self
    }

    /// Build a font from its dictionary.
    pub fn from_dictionary(doc: &Document, dict: &Dictionary) -> Self {
        let subtype = dict.get(b"Subtype").ok().and_then(|o| o.as_name().ok()).unwrap_or_default();

        let mut font = if subtype == b"Type0" {
            Self::two_byte()
        } else {
            let default = if subtype == b"TrueType" {
                BaseEncoding::WinAnsi
            } else {
                BaseEncoding::Standard
            };
            let table = dict
                .get(b"Encoding")
                .ok()
                .and_then(|o| resolve(doc, o))
                .map(|encoding| simple_table(doc, encoding, default))
                .unwrap_or_else(|| default.table());
            Self {
                to_unicode: None,
                base: BaseDecoding::SingleByte(Box::new(table)),
            }
        };

        if let Some(data) = dict
            .get(b"ToUnicode")
            .ok()
            .and_then(|o| resolve(doc, o))
            .and_then(|o| o.as_stream().ok())
            .map(|stream| stream.decompressed_content().unwrap_or_else(|_| stream.content.clone()))
        {
            let cmap = ToUnicodeMap::parse(&data);
            if !cmap.is_empty() {
                font.to_unicode = Some(cmap);
            }
        }

        font
    }

    fn base_code_width(&self) -> usize {
        match self.base {
            BaseDecoding::SingleByte(_) => 1,
            BaseDecoding::TwoByte => 2,
        }
    }

    fn decode_base(&self, code: u32, out: &mut Vec<u32>) {
        match &self.base {
            BaseDecoding::SingleByte(table) => {
                if let Some(ch) = table.get(code as usize).copied().flatten() {
                    out.push(ch as u32);
                }
            }
            BaseDecoding::TwoByte => out.push(code),
        }
    }
}

impl GlyphDecoder for Font {
    fn decode(&self, bytes: &[u8]) -> Vec<u32> {
        let mut out = Vec::with_capacity(bytes.len());
        let mut rest = bytes;

        while !rest.is_empty() {
            let width = match &self.to_unicode {
                Some(cmap) => cmap.code_width(rest, self.base_code_width()),
                None => self.base_code_width(),
            }
            .min(rest.len());

            let code = rest[..width].iter().fold(0u32, |acc, b| (acc << 8) | *b as u32);
            rest = &rest[width..];

            match self.to_unicode.as_ref().and_then(|cmap| cmap.lookup(width, code)) {
                Some(units) => out.extend(
                    char::decode_utf16(units).map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER) as u32),
                ),
                None => self.decode_base(code, &mut out),
            }
        }

        out
    }
}

/// Follow an indirect reference, if `object` is one.
pub(crate) fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn simple_table(doc: &Document, encoding: &Object, default: BaseEncoding) -> ByteTable {
    match encoding {
        Object::Name(name) => BaseEncoding::from_name(name).unwrap_or(default).table(),
        Object::Dictionary(dict) => {
            let base = dict
                .get(b"BaseEncoding")
                .ok()
                .and_then(|o| o.as_name().ok())
                .and_then(BaseEncoding::from_name)
                .unwrap_or(default);
            let mut table = base.table();
            if let Some(differences) = dict
                .get(b"Differences")
                .ok()
                .and_then(|o| resolve(doc, o))
                .and_then(|o| o.as_array().ok())
            {
                apply_differences(&mut table, differences);
            }
            table
        }
        _ => default.table(),
    }
}

fn apply_differences(table: &mut ByteTable, differences: &[Object]) {
    let mut code: Option<usize> = None;
    for item in differences {
        match item {
            Object::Integer(start) => code = usize::try_from(*start).ok(),
            Object::Name(name) => {
                if let Some(current) = code
                    && current < table.len()
                {
                    table[current] = glyph_to_char(&String::from_utf8_lossy(name));
                    code = Some(current + 1);
                }
            }
            _ => {}
        }
    }
}

/// Parsed `/ToUnicode` CMap: codespace ranges plus `bfchar`/`bfrange` mappings.
///
/// Explicit mappings (`bfchar` and the array form of `bfrange`) are stored per
/// code; incrementing `bfrange` entries are kept as ranges and resolved on lookup.
#[derive(Debug, Clone, Default)]
pub struct ToUnicodeMap {
    codespaces: Vec<Codespace>,
    mappings: HashMap<(usize, u32), Vec<u16>>,
    ranges: Vec<BfRange>,
}

/// `<start> <end> <dst>`: code `start + n` maps to `dst` with `n` added to its last unit.
#[derive(Debug, Clone)]
struct BfRange {
    width: usize,
    start: u32,
    end: u32,
    dst: Vec<u16>,
}

impl BfRange {
    fn map(&self, width: usize, code: u32) -> Option<Vec<u16>> {
        if width != self.width || !(self.start..=self.end).contains(&code) {
            return None;
        }
        let mut units = self.dst.clone();
        if let Some(last) = units.last_mut() {
            *last = last.wrapping_add((code - self.start) as u16);
        }
        Some(units)
    }
}

#[derive(Debug, Clone, Copy)]
struct Codespace {
    width: usize,
    low: u32,
    high: u32,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Hex(Vec<u8>),
    ArrayStart,
    ArrayEnd,
    Keyword(String),
}

/// Bound on codes generated by one `bfrange` entry.
const MAX_RANGE_SPAN: u32 = 0xFFFF;

impl ToUnicodeMap {
    /// Parse CMap program text. Unknown constructs are ignored.
    pub fn parse(data: &[u8]) -> Self {
        let tokens = tokenize(data);
        let mut cmap = Self::default();
        let mut i = 0;

        while i < tokens.len() {
            match &tokens[i] {
                Token::Keyword(k) if k == "begincodespacerange" => {
                    i += 1;
                    while let (Some(Token::Hex(low)), Some(Token::Hex(high))) = (tokens.get(i), tokens.get(i + 1)) {
                        cmap.codespaces.push(Codespace {
                            width: low.len().clamp(1, 4),
                            low: code_value(low),
                            high: code_value(high),
                        });
                        i += 2;
                    }
                }
                Token::Keyword(k) if k == "beginbfchar" => {
                    i += 1;
                    while let (Some(Token::Hex(src)), Some(Token::Hex(dst))) = (tokens.get(i), tokens.get(i + 1)) {
                        cmap.mappings.insert((src.len(), code_value(src)), utf16_units(dst));
                        i += 2;
                    }
                }
                Token::Keyword(k) if k == "beginbfrange" => {
                    i += 1;
                    i = cmap.parse_bfrange(&tokens, i);
                }
                _ => i += 1,
            }
        }

        cmap
    }

    fn parse_bfrange(&mut self, tokens: &[Token], mut i: usize) -> usize {
        while let (Some(Token::Hex(low)), Some(Token::Hex(high))) = (tokens.get(i), tokens.get(i + 1)) {
            let width = low.len();
            let start = code_value(low);
            let end = start.saturating_add(code_value(high).saturating_sub(start).min(MAX_RANGE_SPAN));
            i += 2;

            match tokens.get(i) {
                Some(Token::Hex(dst)) => {
                    self.ranges.push(BfRange {
                        width,
                        start,
                        end,
                        dst: utf16_units(dst),
                    });
                    i += 1;
                }
                Some(Token::ArrayStart) => {
                    i += 1;
                    let mut code = start;
                    while let Some(Token::Hex(dst)) = tokens.get(i) {
                        if code <= end {
                            self.mappings.insert((width, code), utf16_units(dst));
                        }
                        code = code.saturating_add(1);
                        i += 1;
                    }
                    if tokens.get(i) == Some(&Token::ArrayEnd) {
                        i += 1;
                    }
                }
                _ => break,
            }
        }
        i
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty() && self.ranges.is_empty()
    }

    /// Number of bytes the next code occupies.
    fn code_width(&self, bytes: &[u8], fallback: usize) -> usize {
        let mut widths: Vec<usize> = self.codespaces.iter().map(|c| c.width).collect();
        widths.sort_unstable();
        widths.dedup();

        for width in widths {
            if width > bytes.len() {
                break;
            }
            let code = code_value(&bytes[..width]);
            if self
                .codespaces
                .iter()
                .any(|c| c.width == width && (c.low..=c.high).contains(&code))
            {
                return width;
            }
        }

        if self.codespaces.is_empty() {
            fallback
        } else {
            self.codespaces.iter().map(|c| c.width).min().unwrap_or(fallback)
        }
    }

    /// UTF-16 units for `code`. Later ranges take precedence over earlier ones.
    fn lookup(&self, width: usize, code: u32) -> Option<Vec<u16>> {
        if let Some(units) = self.mappings.get(&(width, code)) {
            return Some(units.clone());
        }
        self.ranges.iter().rev().find_map(|range| range.map(width, code))
    }
}

fn code_value(bytes: &[u8]) -> u32 {
    bytes.iter().take(4).fold(0u32, |acc, b| (acc << 8) | *b as u32)
}

fn utf16_units(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks(2)
        .map(|pair| match pair {
            [hi, lo] => u16::from_be_bytes([*hi, *lo]),
            [single] => *single as u16,
            _ => 0,
        })
        .collect()
}

fn tokenize(data: &[u8]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < data.len() {
        match data[i] {
            b'%' => {
                while i < data.len() && data[i] != b'\n' && data[i] != b'\r' {
                    i += 1;
                }
            }
            b'<' if data.get(i + 1) == Some(&b'<') => i += 2,
            b'>' if data.get(i + 1) == Some(&b'>') => i += 2,
            b'<' => {
                let start = i + 1;
                let end = data[start..]
                    .iter()
                    .position(|b| *b == b'>')
                    .map_or(data.len(), |p| start + p);
                tokens.push(Token::Hex(hex_bytes(&data[start..end])));
                i = end + 1;
            }
            b'[' => {
                tokens.push(Token::ArrayStart);
                i += 1;
            }
            b']' => {
                tokens.push(Token::ArrayEnd);
                i += 1;
            }
            b'(' => {
                let mut depth = 0usize;
                while i < data.len() {
                    match data[i] {
                        b'\\' => i += 1,
                        b'(' => depth += 1,
                        b')' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    i += 1;
                }
                i += 1;
            }
            b if b.is_ascii_whitespace() => i += 1,
            _ => {
                let start = i;
                while i < data.len() && !is_delimiter(data[i]) {
                    i += 1;
                }
                if i == start {
                    i += 1;
                    continue;
                }
                tokens.push(Token::Keyword(String::from_utf8_lossy(&data[start..i]).into_owned()));
            }
        }
    }

    tokens
}

fn is_delimiter(byte: u8) -> bool {
    byte.is_ascii_whitespace() || matches!(byte, b'<' | b'>' | b'[' | b']' | b'(' | b')' | b'%')
}

fn hex_bytes(hex: &[u8]) -> Vec<u8> {
    let digits: Vec<u8> = hex
        .iter()
        .filter_map(|b| (*b as char).to_digit(16).map(|d| d as u8))
        .collect();
    digits
        .chunks(2)
        .map(|pair| match pair {
            [hi, lo] => (hi << 4) | lo,
            [hi] => hi << 4,
            _ => 0,
        })
        .collect()
}
