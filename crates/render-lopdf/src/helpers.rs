//! Text encoding and fitting helpers for the standard PDF fonts.

use crate::metrics::{FontFace, text_width};

const ELLIPSIS: &str = "...";

/// Maps one character to its WinAnsiEncoding byte, `?` when it has none.
pub(crate) fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' | '\u{A0}'..='\u{FF}' => c as u8,
        '\t' | '\n' | '\r' => b' ',
        '€' => 0x80,
        '‚' => 0x82,
        '„' => 0x84,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        _ => b'?',
    }
}

/// Encodes `s` for a Type1 font using WinAnsiEncoding.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars().map(win_ansi_byte).collect()
}

/// Greedy word wrap of `text` into lines no wider than `max_width`.
///
/// Embedded newlines start a new line. A word wider than the line on its own
/// is broken between characters. Blank text yields no lines.
pub fn wrap_text(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };
            if text_width(&candidate, face, size) <= max_width {
                line = candidate;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if text_width(word, face, size) <= max_width {
                line = word.to_string();
            } else {
                let mut pieces = break_word(word, face, size, max_width);
                line = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}

fn break_word(word: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for c in word.chars() {
        piece.push(c);
        if piece.chars().count() > 1 && text_width(&piece, face, size) > max_width {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(c);
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Shortens `text` to fit `max_width`, ending it with `...` when cut.
pub fn truncate_to_width(text: &str, face: FontFace, size: f32, max_width: f32) -> String {
    let single_line: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if text_width(&single_line, face, size) <= max_width {
        return single_line;
    }

    let budget = max_width - text_width(ELLIPSIS, face, size);
    let mut kept = String::new();
    for c in single_line.chars() {
        kept.push(c);
        if text_width(&kept, face, size) > budget {
            kept.pop();
            break;
        }
    }
    let mut out = kept.trim_end().to_string();
    out.push_str(ELLIPSIS);
    out
}
