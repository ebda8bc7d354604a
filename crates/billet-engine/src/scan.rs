// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Flat marker scanner shared by every pass.
//!
//! Markers are `{{Name}}`, `{{#Name}}`, `{{^Name}}` and `{{/Name}}` with no
//! whitespace inside the braces. Names consist of alphanumerics and `_`.
//! Block matching is non-recursive: an open marker pairs with
//! the first `{{/Name}}` that follows it, whatever lies in between.

use std::borrow::Cow;

use serde::Serialize;

/// Byte offsets into the original template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end: usize,
}

impl Span {
    /// Span covering `start..end`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Marker kind, from the character after `{{`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sigil {
    /// `{{Name}}`
    Variable,
    /// `{{#Name}}`
    Section,
    /// `{{^Name}}`
    Inverted,
    /// `{{/Name}}`
    Close,
}

impl Sigil {
    fn from_char(chr: char) -> Option<Self> {
        match chr {
            '#' => Some(Sigil::Section),
            '^' => Some(Sigil::Inverted),
            '/' => Some(Sigil::Close),
            _ => None,
        }
    }

    /// The sigil character, empty for variables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sigil::Variable => "",
            Sigil::Section => "#",
            Sigil::Inverted => "^",
            Sigil::Close => "/",
        }
    }
}

/// One well-formed marker found in a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker<'s> {
    /// Marker kind.
    pub sigil: Sigil,
    /// The marker's name.
    pub name: &'s str,
    /// Covers the braces.
    pub span: Span,
}

/// A matched `{{<sigil>Name}}body{{/Name}}` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMatch<'s> {
    /// The marker's name.
    pub name: &'s str,
    /// The whole block including both markers.
    pub source: &'s str,
    /// Text between the open and close markers.
    pub body: &'s str,
    /// Covers both markers.
    pub span: Span,
}

pub(crate) fn is_name_char(chr: char) -> bool {
    chr.is_alphanumeric() || chr == '_'
}

/// Finds the next well-formed marker starting at byte offset `from`.
pub fn next_marker(source: &str, from: usize) -> Option<Marker<'_>> {
    let mut pos = from;
    while let Some(found) = source.get(pos..)?.find("{{") {
        let start = pos + found;
        if let Some(marker) = marker_at(source, start) {
            return Some(marker);
        }
        pos = start + 1;
    }
    None
}

fn marker_at(source: &str, start: usize) -> Option<Marker<'_>> {
    let rest = &source[start + 2..];
    let mut chars = rest.char_indices().peekable();

    let sigil = match chars.peek() {
        Some(&(_, chr)) => match Sigil::from_char(chr) {
            Some(sigil) => {
                chars.next();
                sigil
            }
            None => Sigil::Variable,
        },
        None => return None,
    };
    let name_start = sigil.as_str().len();

    let mut name_end = name_start;
    while let Some(&(idx, chr)) = chars.peek() {
        if !is_name_char(chr) {
            break;
        }
        name_end = idx + chr.len_utf8();
        chars.next();
    }
    if name_end == name_start || !rest[name_end..].starts_with("}}") {
        return None;
    }

    Some(Marker {
        sigil,
        name: &rest[name_start..name_end],
        span: Span::new(start, start + 2 + name_end + 2),
    })
}

/// Finds the next `{{<sigil>Name}}...{{/Name}}` block starting at `from`.
///
/// An open marker with no matching close anywhere after it is skipped and
/// stays in the output as literal text.
pub fn find_block(source: &str, from: usize, sigil: Sigil) -> Option<BlockMatch<'_>> {
    let mut pos = from;
    while let Some(open) = next_marker(source, pos) {
        pos = open.span.end;
        if open.sigil != sigil {
            continue;
        }

        let close = format!("{{{{/{}}}}}", open.name);
        match source[open.span.end..].find(&close) {
            Some(offset) => {
                let body_end = open.span.end + offset;
                let end = body_end + close.len();
                return Some(BlockMatch {
                    name: open.name,
                    source: &source[open.span.start..end],
                    body: &source[open.span.end..body_end],
                    span: Span::new(open.span.start, end),
                });
            }
            None => {
                tracing::debug!(
                    name = open.name,
                    offset = open.span.start,
                    "unclosed {}{} marker left as literal text",
                    sigil.as_str(),
                    open.name
                );
            }
        }
    }
    None
}

/// Replaces every block of the given kind with the closure's output.
pub(crate) fn replace_blocks<'s>(
    source: &'s str,
    sigil: Sigil,
    mut replacement: impl FnMut(&BlockMatch<'s>) -> Cow<'s, str>,
) -> String {
    let mut output = String::with_capacity(source.len());
    let mut last = 0;
    while let Some(block) = find_block(source, last, sigil) {
        output.push_str(&source[last..block.span.start]);
        output.push_str(&replacement(&block));
        last = block.span.end;
    }
    output.push_str(&source[last..]);
    output
}

/// Replaces every bare `{{Name}}` marker with the closure's output.
pub(crate) fn replace_variables(
    source: &str,
    mut replacement: impl FnMut(&str) -> String,
) -> String {
    let mut output = String::with_capacity(source.len());
    let mut last = 0;
    let mut pos = 0;
    while let Some(marker) = next_marker(source, pos) {
        pos = marker.span.end;
        if marker.sigil != Sigil::Variable {
            continue;
        }
        output.push_str(&source[last..marker.span.start]);
        output.push_str(&replacement(marker.name));
        last = marker.span.end;
    }
    output.push_str(&source[last..]);
    output
}
