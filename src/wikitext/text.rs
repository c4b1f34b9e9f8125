// src/wikitext/text.rs

//! Markup flattening helpers shared by the parser and the extractors.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::utils::decode_entities;

static EXTERNAL_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?:https?:)?//[^\s\]]+(?:\s+([^\]]*))?\]").expect("valid external link regex")
});
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'{2,5}").expect("valid emphasis regex"));
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid line break regex"));
static MAGIC_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__[A-Z]+__").expect("valid magic word regex"));

/// Namespaces whose links carry no readable text.
const HIDDEN_LINK_PREFIXES: [&str; 4] = ["file:", "image:", "category:", "media:"];

/// Flatten wikitext to display text.
///
/// Links keep their label, inline templates keep their positional
/// arguments, emphasis and HTML are removed, entities are decoded.
pub fn plain_text(markup: &str) -> String {
    let text = replace_links(markup);
    let text = replace_inline_templates(&text);
    let text = EXTERNAL_LINK.replace_all(&text, "$1");
    let text = EMPHASIS.replace_all(&text, "");
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = MAGIC_WORD.replace_all(&text, "");

    let lines: Vec<&str> = text
        .lines()
        .map(|line| line.trim().trim_start_matches(['*', '#', ':', ';']).trim())
        .filter(|line| !line.is_empty() && !line.starts_with("----"))
        .collect();

    decode_entities(&lines.join("\n")).trim().to_string()
}

/// Convert a parameter name to camelCase (`"item type"` → `"itemType"`).
pub fn camel_case(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    for chunk in key.split(|c: char| !c.is_alphanumeric()) {
        let mut current = String::new();
        let mut prev_lower = false;
        for c in chunk.chars() {
            if c.is_uppercase() && prev_lower {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
            current.push(c);
        }
        if !current.is_empty() {
            words.push(current);
        }
    }

    let mut out = String::with_capacity(key.len());
    for (i, word) in words.iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Byte ranges of top-level `open … close` blocks, delimiters included.
///
/// An unterminated block extends to the end of the input.
pub(crate) fn top_level_spans(s: &str, open: &str, close: &str) -> Vec<Range<usize>> {
    let bytes = s.as_bytes();
    let (open, close) = (open.as_bytes(), close.as_bytes());
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i..].starts_with(open) {
            if depth == 0 {
                start = i;
            }
            depth += 1;
            i += open.len();
        } else if depth > 0 && bytes[i..].starts_with(close) {
            depth -= 1;
            i += close.len();
            if depth == 0 {
                spans.push(start..i);
            }
        } else {
            i += 1;
        }
    }
    if depth > 0 {
        spans.push(start..bytes.len());
    }
    spans
}

/// Split on `sep` outside of `{{ }}` and `[[ ]]`.
pub(crate) fn split_top_level(s: &str, sep: u8) -> Vec<&str> {
    let bytes = s.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match &bytes[i..] {
            [b'{', b'{', ..] | [b'[', b'[', ..] => {
                depth += 1;
                i += 2;
            }
            [b'}', b'}', ..] | [b']', b']', ..] if depth > 0 => {
                depth -= 1;
                i += 2;
            }
            [c, ..] if *c == sep && depth == 0 => {
                parts.push(&s[start..i]);
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    parts.push(&s[start..]);
    parts
}

/// Remove the outer delimiters of a `{{…}}` or `[[…]]` span.
pub(crate) fn inner(span: &str) -> &str {
    let body = span.get(2..).unwrap_or("");
    body.strip_suffix("}}")
        .or_else(|| body.strip_suffix("]]"))
        .unwrap_or(body)
}

/// Replace spans of `s` using `f`, keeping the text in between.
pub(crate) fn replace_spans(s: &str, spans: &[Range<usize>], mut f: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last = 0;
    for span in spans {
        out.push_str(&s[last..span.start]);
        out.push_str(&f(&s[span.clone()]));
        last = span.end;
    }
    out.push_str(&s[last..]);
    out
}

fn replace_links(s: &str) -> String {
    let spans = top_level_spans(s, "[[", "]]");
    replace_spans(s, &spans, |span| {
        let body = inner(span);
        let target = body.trim_start_matches(':').trim_start().to_lowercase();
        if HIDDEN_LINK_PREFIXES.iter().any(|p| target.starts_with(p)) {
            return String::new();
        }
        let label = split_top_level(body, b'|').pop().unwrap_or(body);
        replace_links(label.trim())
    })
}

fn replace_inline_templates(s: &str) -> String {
    let spans = top_level_spans(s, "{{", "}}");
    replace_spans(s, &spans, |span| {
        let parts = split_top_level(inner(span), b'|');
        parts
            .iter()
            .skip(1)
            .filter(|part| !part.contains('='))
            .map(|part| replace_inline_templates(part.trim()))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    })
}
