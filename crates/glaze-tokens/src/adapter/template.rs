//! Byte scanner for JavaScript string and template literals.
//!
//! Every delimiter the scanner cares about is ASCII, so byte offsets always
//! fall on UTF-8 boundaries.

use super::Segment;

/// Static spans of one template literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Template {
    pub(crate) statics: Vec<Segment>,
    /// Offset just past the closing backtick.
    pub(crate) end: usize,
}

/// Scan the template literal whose opening backtick sits at `start`.
///
/// Returns `None` when the literal or one of its `${` spans is unterminated.
pub(crate) fn scan_template(bytes: &[u8], start: usize) -> Option<Template> {
    let mut statics = Vec::new();
    let mut pos = start + 1;
    let mut seg_start = pos;
    let mut after_interpolation = false;

    loop {
        match *bytes.get(pos)? {
            b'\\' => pos += 2,
            b'`' => {
                statics.push(Segment {
                    range: seg_start..pos,
                    glued_before: after_interpolation,
                    glued_after: false,
                });
                return Some(Template {
                    statics,
                    end: pos + 1,
                });
            }
            b'$' if bytes.get(pos + 1) == Some(&b'{') => {
                statics.push(Segment {
                    range: seg_start..pos,
                    glued_before: after_interpolation,
                    glued_after: true,
                });
                pos = skip_interpolation(bytes, pos + 2)?;
                seg_start = pos;
                after_interpolation = true;
            }
            _ => pos += 1,
        }
    }
}

/// Skip a `${...}` body starting just after the `${`; returns the offset past
/// the matching `}`.
fn skip_interpolation(bytes: &[u8], mut pos: usize) -> Option<usize> {
    let mut depth = 1_usize;
    loop {
        match *bytes.get(pos)? {
            b'{' => {
                depth += 1;
                pos += 1;
            }
            b'}' => {
                depth -= 1;
                pos += 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
            b'"' | b'\'' => pos = skip_string(bytes, pos)?,
            b'`' => pos = scan_template(bytes, pos)?.end,
            _ => pos += 1,
        }
    }
}

/// Skip a single- or double-quoted string starting at its opening quote;
/// returns the offset past the closing quote.
///
/// A newline before the closing quote means the string is unterminated.
pub(crate) fn skip_string(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = *bytes.get(start)?;
    let mut pos = start + 1;
    loop {
        match *bytes.get(pos)? {
            b'\\' => pos += 2,
            b'\n' => return None,
            b if b == quote => return Some(pos + 1),
            _ => pos += 1,
        }
    }
}

/// Skip a balanced run of `(`/`[`/`{` starting at `start`, stepping over any
/// string literals inside; returns the offset past the closing delimiter.
pub(crate) fn skip_balanced(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0_usize;
    let mut pos = start;
    loop {
        match *bytes.get(pos)? {
            b'(' | b'[' | b'{' => {
                depth += 1;
                pos += 1;
            }
            b')' | b']' | b'}' => {
                depth = depth.checked_sub(1)?;
                pos += 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
            b'"' | b'\'' => pos = skip_string(bytes, pos)?,
            b'`' => pos = scan_template(bytes, pos)?.end,
            _ => pos += 1,
        }
    }
}
