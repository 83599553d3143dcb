//! Small helpers shared by the part renderers

use std::borrow::Cow;
use std::fmt::Write as _;

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Escape text for element content or attribute values
///
/// Control characters that XML 1.0 cannot carry are written as `_xHHHH_`, and
/// a literal `_xHHHH_` sequence has its underscore encoded so it survives a
/// round trip.
pub fn escape_text(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_restricted) && !s.contains("_x") {
        return quick_xml::escape::escape(s);
    }
    let encoded = encode_restricted(s);
    Cow::Owned(quick_xml::escape::escape(&encoded).into_owned())
}

fn is_restricted(ch: char) -> bool {
    matches!(ch, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}')
}

fn starts_escape_sequence(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 7
        && b.starts_with(b"_x")
        && b[2..6].iter().all(u8::is_ascii_hexdigit)
        && b[6] == b'_'
}

fn encode_restricted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for (i, ch) in s.char_indices() {
        if ch == '_' && starts_escape_sequence(&s[i..]) {
            out.push_str("_x005F_");
        } else if is_restricted(ch) {
            let _ = write!(out, "_x{:04X}_", ch as u32);
        } else {
            out.push(ch);
        }
    }
    out
}
