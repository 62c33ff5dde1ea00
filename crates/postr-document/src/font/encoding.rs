// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// WinAnsiEncoding (Windows code page 1252) for single-byte PDF text strings.

/// Code used for characters WinAnsi cannot represent.
pub const REPLACEMENT: u8 = b'?';

/// First and last codes described by a simple font's /Widths array.
pub const FIRST_CHAR: u8 = 32;
pub const LAST_CHAR: u8 = 255;

/// Unicode values for codes 0x80..=0x9F; `None` marks unassigned codes.
const HIGH_CONTROL_RANGE: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

/// Map one character to its WinAnsi code.
pub fn encode_char(c: char) -> u8 {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => code as u8,
        // Tabs and line breaks only ever reach us as separators.
        0x09 | 0x0A | 0x0D => b' ',
        _ => HIGH_CONTROL_RANGE
            .iter()
            .position(|mapped| *mapped == Some(c))
            .map(|index| 0x80 + index as u8)
            .unwrap_or(REPLACEMENT),
    }
}

/// Encode a string as WinAnsi bytes, substituting `?` for unmappable chars.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars().map(encode_char).collect()
}

/// The Unicode character a WinAnsi code stands for, if any.
pub fn decode_byte(code: u8) -> Option<char> {
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(char::from(code)),
        0x80..=0x9F => HIGH_CONTROL_RANGE[(code - 0x80) as usize],
        _ => None,
    }
}
