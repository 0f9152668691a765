//! Single-byte base encodings and glyph names for simple fonts.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Byte-to-character table of a simple font.
pub type ByteTable = [Option<char>; 256];

/// Named base encodings a simple font can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseEncoding {
    Standard,
    WinAnsi,
    MacRoman,
}

impl BaseEncoding {
    pub fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"StandardEncoding" => Some(Self::Standard),
            b"WinAnsiEncoding" => Some(Self::WinAnsi),
            b"MacRomanEncoding" => Some(Self::MacRoman),
            _ => None,
        }
    }

    pub fn table(self) -> ByteTable {
        match self {
            Self::Standard => standard_table(),
            Self::WinAnsi => win_ansi_table(),
            Self::MacRoman => mac_roman_table(),
        }
    }
}

fn printable_ascii() -> ByteTable {
    let mut table = [None; 256];
    for byte in 0x20u8..0x7F {
        table[byte as usize] = Some(byte as char);
    }
    table
}

fn fill(table: &mut ByteTable, start: usize, codepoints: &[u16]) {
    for (offset, &cp) in codepoints.iter().enumerate() {
        table[start + offset] = if cp == 0 { None } else { char::from_u32(cp as u32) };
    }
}

const WIN_ANSI_80: [u16; 32] = [
    0x20AC, 0, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, 0x02C6, 0x2030, 0x0160, 0x2039, 0x0152, 0, 0x017D, 0,
    0, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014, 0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0, 0x017E,
    0x0178,
];

const MAC_ROMAN_80: [u16; 128] = [
    0x00C4, 0x00C5, 0x00C7, 0x00C9, 0x00D1, 0x00D6, 0x00DC, 0x00E1, 0x00E0, 0x00E2, 0x00E4, 0x00E3, 0x00E5, 0x00E7,
    0x00E9, 0x00E8, 0x00EA, 0x00EB, 0x00ED, 0x00EC, 0x00EE, 0x00EF, 0x00F1, 0x00F3, 0x00F2, 0x00F4, 0x00F6, 0x00F5,
    0x00FA, 0x00F9, 0x00FB, 0x00FC, 0x2020, 0x00B0, 0x00A2, 0x00A3, 0x00A7, 0x2022, 0x00B6, 0x00DF, 0x00AE, 0x00A9,
    0x2122, 0x00B4, 0x00A8, 0x2260, 0x00C6, 0x00D8, 0x221E, 0x00B1, 0x2264, 0x2265, 0x00A5, 0x00B5, 0x2202, 0x2211,
    0x220F, 0x03C0, 0x222B, 0x00AA, 0x00BA, 0x03A9, 0x00E6, 0x00F8, 0x00BF, 0x00A1, 0x00AC, 0x221A, 0x0192, 0x2248,
    0x2206, 0x00AB, 0x00BB, 0x2026, 0x00A0, 0x00C0, 0x00C3, 0x00D5, 0x0152, 0x0153, 0x2013, 0x2014, 0x201C, 0x201D,
    0x2018, 0x2019, 0x00F7, 0x25CA, 0x00FF, 0x0178, 0x2044, 0x00A4, 0x2039, 0x203A, 0xFB01, 0xFB02, 0x2021, 0x00B7,
    0x201A, 0x201E, 0x2030, 0x00C2, 0x00CA, 0x00C1, 0x00CB, 0x00C8, 0x00CD, 0x00CE, 0x00CF, 0x00CC, 0x00D3, 0x00D4,
    0, 0x00D2, 0x00DA, 0x00DB, 0x00D9, 0x0131, 0x02C6, 0x02DC, 0x00AF, 0x02D8, 0x02D9, 0x02DA, 0x00B8, 0x02DD,
    0x02DB, 0x02C7,
];

const STANDARD_HIGH: &[(u8, u16)] = &[
    (0xA1, 0x00A1),
    (0xA2, 0x00A2),
    (0xA3, 0x00A3),
    (0xA4, 0x2044),
    (0xA5, 0x00A5),
    (0xA6, 0x0192),
    (0xA7, 0x00A7),
    (0xA8, 0x00A4),
    (0xA9, 0x0027),
    (0xAA, 0x201C),
    (0xAB, 0x00AB),
    (0xAC, 0x2039),
    (0xAD, 0x203A),
    (0xAE, 0xFB01),
    (0xAF, 0xFB02),
    (0xB1, 0x2013),
    (0xB2, 0x2020),
    (0xB3, 0x2021),
    (0xB4, 0x00B7),
    (0xB6, 0x00B6),
    (0xB7, 0x2022),
    (0xB8, 0x201A),
    (0xB9, 0x201E),
    (0xBA, 0x201D),
    (0xBB, 0x00BB),
    (0xBC, 0x2026),
    (0xBD, 0x2030),
    (0xBF, 0x00BF),
    (0xC1, 0x0060),
    (0xC2, 0x00B4),
    (0xC3, 0x02C6),
    (0xC4, 0x02DC),
    (0xC5, 0x00AF),
    (0xC6, 0x02D8),
    (0xC7, 0x02D9),
    (0xC8, 0x00A8),
    (0xCA, 0x02DA),
    (0xCB, 0x00B8),
    (0xCD, 0x02DD),
    (0xCE, 0x02DB),
    (0xCF, 0x02C7),
    (0xD0, 0x2014),
    (0xE1, 0x00C6),
    (0xE3, 0x00AA),
    (0xE8, 0x0141),
    (0xE9, 0x00D8),
    (0xEA, 0x0152),
    (0xEB, 0x00BA),
    (0xF1, 0x00E6),
    (0xF5, 0x0131),
    (0xF8, 0x0142),
    (0xF9, 0x00F8),
    (0xFA, 0x0153),
    (0xFB, 0x00DF),
];

fn standard_table() -> ByteTable {
    let mut table = printable_ascii();
    table[0x27] = Some('\u{2019}');
    table[0x60] = Some('\u{2018}');
    for &(byte, cp) in STANDARD_HIGH {
        table[byte as usize] = char::from_u32(cp as u32);
    }
    table
}

fn win_ansi_table() -> ByteTable {
    let mut table = printable_ascii();
    fill(&mut table, 0x80, &WIN_ANSI_80);
    for byte in 0xA0u32..=0xFF {
        table[byte as usize] = char::from_u32(byte);
    }
    table
}

fn mac_roman_table() -> ByteTable {
    let mut table = printable_ascii();
    fill(&mut table, 0x80, &MAC_ROMAN_80);
    table
}

const NAMED_GLYPHS: &[(&str, char)] = &[
    ("space", ' '),
    ("exclam", '!'),
    ("quotedbl", '"'),
    ("numbersign", '#'),
    ("dollar", '$'),
    ("percent", '%'),
    ("ampersand", '&'),
    ("quotesingle", '\''),
    ("quoteright", '\u{2019}'),
    ("quoteleft", '\u{2018}'),
    ("parenleft", '('),
    ("parenright", ')'),
    ("asterisk", '*'),
    ("plus", '+'),
    ("comma", ','),
    ("hyphen", '-'),
    ("minus", '\u{2212}'),
    ("period", '.'),
    ("slash", '/'),
    ("zero", '0'),
    ("one", '1'),
    ("two", '2'),
    ("three", '3'),
    ("four", '4'),
    ("five", '5'),
    ("six", '6'),
    ("seven", '7'),
    ("eight", '8'),
    ("nine", '9'),
    ("colon", ':'),
    ("semicolon", ';'),
    ("less", '<'),
    ("equal", '='),
    ("greater", '>'),
    ("question", '?'),
    ("at", '@'),
    ("bracketleft", '['),
    ("backslash", '\\'),
    ("bracketright", ']'),
    ("asciicircum", '^'),
    ("underscore", '_'),
    ("grave", '`'),
    ("braceleft", '{'),
    ("bar", '|'),
    ("braceright", '}'),
    ("asciitilde", '~'),
    ("bullet", '\u{2022}'),
    ("endash", '\u{2013}'),
    ("emdash", '\u{2014}'),
    ("ellipsis", '\u{2026}'),
    ("quotedblleft", '\u{201C}'),
    ("quotedblright", '\u{201D}'),
    ("quotesinglbase", '\u{201A}'),
    ("quotedblbase", '\u{201E}'),
    ("guillemotleft", '\u{00AB}'),
    ("guillemotright", '\u{00BB}'),
    ("dagger", '\u{2020}'),
    ("daggerdbl", '\u{2021}'),
    ("perthousand", '\u{2030}'),
    ("trademark", '\u{2122}'),
    ("copyright", '\u{00A9}'),
    ("registered", '\u{00AE}'),
    ("degree", '\u{00B0}'),
    ("plusminus", '\u{00B1}'),
    ("multiply", '\u{00D7}'),
    ("divide", '\u{00F7}'),
    ("section", '\u{00A7}'),
    ("paragraph", '\u{00B6}'),
    ("sterling", '\u{00A3}'),
    ("yen", '\u{00A5}'),
    ("cent", '\u{00A2}'),
    ("Euro", '\u{20AC}'),
    ("fi", '\u{FB01}'),
    ("fl", '\u{FB02}'),
    ("germandbls", '\u{00DF}'),
    ("AE", '\u{00C6}'),
    ("ae", '\u{00E6}'),
    ("OE", '\u{0152}'),
    ("oe", '\u{0153}'),
    ("Oslash", '\u{00D8}'),
    ("oslash", '\u{00F8}'),
    ("Aacute", '\u{00C1}'),
    ("aacute", '\u{00E1}'),
    ("Agrave", '\u{00C0}'),
    ("agrave", '\u{00E0}'),
    ("Acircumflex", '\u{00C2}'),
    ("acircumflex", '\u{00E2}'),
    ("Adieresis", '\u{00C4}'),
    ("adieresis", '\u{00E4}'),
    ("Aring", '\u{00C5}'),
    ("aring", '\u{00E5}'),
    ("Atilde", '\u{00C3}'),
    ("atilde", '\u{00E3}'),
    ("Ccedilla", '\u{00C7}'),
    ("ccedilla", '\u{00E7}'),
    ("Eacute", '\u{00C9}'),
    ("eacute", '\u{00E9}'),
    ("Egrave", '\u{00C8}'),
    ("egrave", '\u{00E8}'),
    ("Ecircumflex", '\u{00CA}'),
    ("ecircumflex", '\u{00EA}'),
    ("Edieresis", '\u{00CB}'),
    ("edieresis", '\u{00EB}'),
    ("Iacute", '\u{00CD}'),
    ("iacute", '\u{00ED}'),
    ("Igrave", '\u{00CC}'),
    ("igrave", '\u{00EC}'),
    ("Icircumflex", '\u{00CE}'),
    ("icircumflex", '\u{00EE}'),
    ("Idieresis", '\u{00CF}'),
    ("idieresis", '\u{00EF}'),
    ("Ntilde", '\u{00D1}'),
    ("ntilde", '\u{00F1}'),
    ("Oacute", '\u{00D3}'),
    ("oacute", '\u{00F3}'),
    ("Ograve", '\u{00D2}'),
    ("ograve", '\u{00F2}'),
    ("Ocircumflex", '\u{00D4}'),
    ("ocircumflex", '\u{00F4}'),
    ("Odieresis", '\u{00D6}'),
    ("odieresis", '\u{00F6}'),
    ("Otilde", '\u{00D5}'),
    ("otilde", '\u{00F5}'),
    ("Uacute", '\u{00DA}'),
    ("uacute", '\u{00FA}'),
    ("Ugrave", '\u{00D9}'),
    ("ugrave", '\u{00F9}'),
    ("Ucircumflex", '\u{00DB}'),
    ("ucircumflex", '\u{00FB}'),
    ("Udieresis", '\u{00DC}'),
    ("udieresis", '\u{00FC}'),
    ("Yacute", '\u{00DD}'),
    ("yacute", '\u{00FD}'),
    ("ydieresis", '\u{00FF}'),
    ("Ydieresis", '\u{0178}'),
    ("Scaron", '\u{0160}'),
    ("scaron", '\u{0161}'),
    ("Zcaron", '\u{017D}'),
    ("zcaron", '\u{017E}'),
    ("Eth", '\u{00D0}'),
    ("eth", '\u{00F0}'),
    ("Thorn", '\u{00DE}'),
    ("thorn", '\u{00FE}'),
    ("dotlessi", '\u{0131}'),
    ("nbspace", '\u{00A0}'),
];

static GLYPH_NAMES: Lazy<HashMap<&'static str, char>> = Lazy::new(|| NAMED_GLYPHS.iter().copied().collect());

/// Map a glyph name from a `/Differences` array to a character.
///
/// Understands single-letter names, the `uniXXXX` and `uXXXX[XX]` forms and
/// the common Latin glyph names.
pub fn glyph_to_char(name: &str) -> Option<char> {
    let mut chars = name.chars();
    if let (Some(only), None) = (chars.next(), chars.next())
        && only.is_ascii_alphabetic()
    {
        return Some(only);
    }

    if let Some(&ch) = GLYPH_NAMES.get(name) {
        return Some(ch);
    }

    let hex = name
        .strip_prefix("uni")
        .filter(|hex| hex.len() == 4)
        .or_else(|| name.strip_prefix('u').filter(|hex| (4..=6).contains(&hex.len())))?;
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}
