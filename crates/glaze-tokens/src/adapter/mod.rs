//! Locate class attributes in component source and splice rewrites back.
//!
//! Three attribute shapes are recognised after `className=` or `class=`:
//!
//! - a plain quoted string, `className="..."` or `className='...'`;
//! - a template literal, ``className={`... ${expr} ...`}``;
//! - an array join, ``className={["...", cond && '...', `...`].join(" ")}``.
//!
//! Only the static text of string literals is rewritten. Interpolations and
//! any other expression text pass through byte for byte, and a shape that
//! does not fully parse is left alone.

mod template;

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::change::Change;
use crate::pipeline::Pipeline;

use template::{scan_template, skip_balanced, skip_string};

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\w\-.$])(?:className|class)=").unwrap_or_else(|_| unreachable!())
});

/// A static span of class text inside an attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment {
    pub(crate) range: Range<usize>,
    /// The span directly follows a `${...}` interpolation.
    pub(crate) glued_before: bool,
    /// The span is directly followed by a `${...}` interpolation.
    pub(crate) glued_after: bool,
}

impl Segment {
    fn plain(range: Range<usize>) -> Self {
        Self {
            range,
            glued_before: false,
            glued_after: false,
        }
    }
}

/// Outcome of rewriting a whole source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRewrite {
    /// The rewritten source; the input verbatim when nothing changed.
    pub text: String,
    /// Number of static segments whose text changed.
    pub segments_changed: usize,
    /// Every change applied, in source order.
    pub changes: Vec<Change>,
}

impl SourceRewrite {
    /// Whether any segment changed.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.segments_changed > 0
    }
}

/// Rewrite every class attribute in `text` with `pipeline`.
///
/// # Examples
/// ```
/// use glaze_tokens::{Pipeline, rewrite_source};
///
/// let source = r#"<div className="border border-white/10 bg-white/[0.04] p-4" />"#;
/// let out = rewrite_source(source, &Pipeline::default());
/// assert_eq!(out.text, r#"<div className="glass-panel p-4" />"#);
/// assert_eq!(out.segments_changed, 1);
/// ```
#[must_use]
pub fn rewrite_source(text: &str, pipeline: &Pipeline) -> SourceRewrite {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut cursor = 0;

    for attr in ATTR_RE.find_iter(text) {
        if attr.end() < cursor {
            continue;
        }
        let Some((found, end)) = scan_value(bytes, attr.end()) else {
            trace!(offset = attr.end(), "skipping unparsed class attribute");
            continue;
        };
        segments.extend(found);
        cursor = end;
    }

    let mut out = SourceRewrite::default();
    let mut rewritten = String::with_capacity(text.len());
    let mut last = 0;
    for segment in segments {
        let Some(raw) = text.get(segment.range.clone()) else {
            continue;
        };
        let Some((replacement, changes)) = rewrite_segment(raw, &segment, pipeline) else {
            continue;
        };
        debug!(
            offset = segment.range.start,
            changes = changes.len(),
            "rewrote class segment"
        );
        rewritten.push_str(text.get(last..segment.range.start).unwrap_or_default());
        rewritten.push_str(&replacement);
        last = segment.range.end;
        out.segments_changed += 1;
        out.changes.extend(changes);
    }

    if out.is_changed() {
        rewritten.push_str(text.get(last..).unwrap_or_default());
        out.text = rewritten;
    } else {
        out.text = text.to_owned();
    }
    out
}

/// Parse the attribute value starting at `pos`, returning its static
/// segments and the offset just past the value.
fn scan_value(bytes: &[u8], pos: usize) -> Option<(Vec<Segment>, usize)> {
    match *bytes.get(pos)? {
        b'"' | b'\'' => {
            let end = skip_string(bytes, pos)?;
            Some((vec![Segment::plain(pos + 1..end - 1)], end))
        }
        b'{' => scan_expression(bytes, pos + 1),
        _ => None,
    }
}

/// Parse a braced value whose body starts at `pos`.
fn scan_expression(bytes: &[u8], pos: usize) -> Option<(Vec<Segment>, usize)> {
    let pos = skip_whitespace(bytes, pos);
    let (segments, pos) = match *bytes.get(pos)? {
        b'`' => {
            let template = scan_template(bytes, pos)?;
            (template.statics, template.end)
        }
        b'[' => scan_array_join(bytes, pos)?,
        _ => return None,
    };
    let pos = skip_whitespace(bytes, pos);
    (bytes.get(pos) == Some(&b'}')).then_some((segments, pos + 1))
}

/// Parse `[...].join(...)` starting at the opening bracket.
fn scan_array_join(bytes: &[u8], start: usize) -> Option<(Vec<Segment>, usize)> {
    let mut segments = Vec::new();
    let mut depth = 0_usize;
    let mut pos = start;
    loop {
        match *bytes.get(pos)? {
            b'[' | b'(' | b'{' => {
                depth += 1;
                pos += 1;
            }
            b']' | b')' | b'}' => {
                depth = depth.checked_sub(1)?;
                pos += 1;
                if depth == 0 {
                    break;
                }
            }
            b'"' | b'\'' => {
                let end = skip_string(bytes, pos)?;
                segments.push(Segment::plain(pos + 1..end - 1));
                pos = end;
            }
            b'`' => {
                let template = scan_template(bytes, pos)?;
                segments.extend(template.statics);
                pos = template.end;
            }
            _ => pos += 1,
        }
    }

    let pos = skip_whitespace(bytes, pos);
    let rest = bytes.get(pos..)?;
    if !rest.starts_with(b".join") {
        return None;
    }
    let pos = skip_whitespace(bytes, pos + b".join".len());
    if bytes.get(pos) != Some(&b'(') {
        return None;
    }
    let end = skip_balanced(bytes, pos)?;
    Some((segments, end))
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
        pos += 1;
    }
    pos
}

/// Rewrite one static segment, keeping its surrounding whitespace and any
/// fragment glued to an interpolation.
fn rewrite_segment(
    raw: &str,
    segment: &Segment,
    pipeline: &Pipeline,
) -> Option<(String, Vec<Change>)> {
    let core = rewritable_range(raw, segment)?;
    let rewrite = pipeline.rewrite_class_string(raw.get(core.clone())?);
    if !rewrite.is_changed() {
        return None;
    }
    let mut text = String::with_capacity(raw.len());
    text.push_str(raw.get(..core.start)?);
    text.push_str(&rewrite.text);
    text.push_str(raw.get(core.end..)?);
    Some((text, rewrite.changes))
}

/// Byte range of `raw` open to rewriting: its trimmed text minus any token
/// fragment touching an interpolation.
fn rewritable_range(raw: &str, segment: &Segment) -> Option<Range<usize>> {
    let mut start = raw.len() - raw.trim_start().len();
    let mut end = raw.trim_end().len();

    if segment.glued_before && start == 0 {
        let gap = raw.find(char::is_whitespace)?;
        let rest = raw.get(gap..)?;
        start = gap + (rest.len() - rest.trim_start().len());
    }
    if segment.glued_after && end == raw.len() {
        let gap = raw.rfind(char::is_whitespace)?;
        end = raw.get(..gap)?.trim_end().len();
    }
    (start < end).then_some(start..end)
}
