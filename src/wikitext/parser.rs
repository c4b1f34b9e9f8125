// src/wikitext/parser.rs

//! Wikitext → [`Document`] conversion.

use std::sync::LazyLock;

use regex::Regex;

use super::text::{inner, plain_text, split_top_level, top_level_spans};
use super::{Document, Infobox, Section};

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"));
static REF_SELF_CLOSING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<ref[^>]*/>").expect("valid ref regex"));
static REF_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<ref[^>]*>.*?</ref>").expect("valid ref regex"));
static GALLERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<gallery[^>]*>.*?</gallery>").expect("valid gallery regex"));
static REDIRECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*#REDIRECT\s*:?\s*\[\[([^\]|#]+)").expect("valid redirect regex")
});
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(={2,6})\s*(.+?)\s*={2,6}\s*$").expect("valid heading regex"));
static CATEGORY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[\[\s*Category\s*:\s*([^\]|]+)").expect("valid category regex")
});

/// Parse raw wikitext into a [`Document`].
pub fn parse(markup: &str) -> Document {
    let cleaned = strip_noise(markup);
    let redirect = REDIRECT
        .captures(&cleaned)
        .map(|caps| caps[1].trim().to_string());

    let mut categories = Vec::new();
    let sections = split_sections(&cleaned)
        .into_iter()
        .map(|raw| build_section(raw, &mut categories))
        .collect();

    Document {
        sections,
        categories,
        redirect,
    }
}

/// Section before template/link processing.
struct RawSection {
    title: String,
    depth: usize,
    body: String,
}

fn strip_noise(markup: &str) -> String {
    let text = COMMENT.replace_all(markup, "");
    let text = REF_SELF_CLOSING.replace_all(&text, "");
    let text = REF_BLOCK.replace_all(&text, "");
    GALLERY.replace_all(&text, "").into_owned()
}

/// Split on heading lines that are not inside a template.
fn split_sections(markup: &str) -> Vec<RawSection> {
    let mut sections = vec![RawSection {
        title: String::new(),
        depth: 0,
        body: String::new(),
    }];
    let mut template_depth = 0usize;

    for line in markup.lines() {
        if template_depth == 0 {
            if let Some(caps) = HEADING.captures(line) {
                sections.push(RawSection {
                    title: plain_text(&caps[2]),
                    depth: caps[1].len() - 1,
                    body: String::new(),
                });
                continue;
            }
        }

        let opened = line.matches("{{").count();
        let closed = line.matches("}}").count();
        template_depth = (template_depth + opened).saturating_sub(closed);

        if let Some(current) = sections.last_mut() {
            current.body.push_str(line);
            current.body.push('\n');
        }
    }

    if sections.len() > 1 && sections[0].body.trim().is_empty() {
        sections.remove(0);
    }
    sections
}

fn build_section(raw: RawSection, categories: &mut Vec<String>) -> Section {
    let mut infoboxes = Vec::new();
    let mut templates = Vec::new();
    let mut body = String::with_capacity(raw.body.len());
    let mut last = 0;

    for span in top_level_spans(&raw.body, "{{", "}}") {
        let parts = split_top_level(inner(&raw.body[span.clone()]), b'|');
        let name = template_name(parts[0]);

        let infobox = is_infobox(&name);
        let block = is_block(&raw.body, span.start, span.end);
        if infobox {
            infoboxes.push(parse_infobox(name, &parts[1..]));
        } else if !name.is_empty() {
            templates.push(name);
        }

        // Inline templates stay in the text and get flattened later
        if infobox || block {
            body.push_str(&raw.body[last..span.start]);
            last = span.end;
        }
    }
    body.push_str(&raw.body[last..]);

    let body = strip_tables(&body);
    categories.extend(
        CATEGORY
            .captures_iter(&body)
            .map(|caps| caps[1].trim().to_string()),
    );

    Section {
        title: raw.title,
        depth: raw.depth,
        text: plain_text(&body),
        infoboxes,
        templates,
    }
}

fn template_name(raw: &str) -> String {
    let name = raw.trim();
    let name = name
        .strip_prefix("Template:")
        .or_else(|| name.strip_prefix("template:"))
        .unwrap_or(name);
    name.replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_infobox(name: &str) -> bool {
    name.to_lowercase().contains("infobox")
}

/// Whether a span occupies its own line(s).
fn is_block(body: &str, start: usize, end: usize) -> bool {
    let before = body[..start].rsplit('\n').next().unwrap_or("");
    let after = body[end..].split('\n').next().unwrap_or("");
    before.trim().is_empty() && after.trim().is_empty()
}

fn parse_infobox(name: String, params: &[&str]) -> Infobox {
    let fields = params
        .iter()
        .filter_map(|param| {
            let (key, value) = param.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), infobox_value(value.trim())))
        })
        .collect();

    Infobox { name, fields }
}

/// Display text of an infobox value; file links keep their target.
fn infobox_value(raw: &str) -> String {
    let target = raw.trim_start_matches("[[").trim_start().to_lowercase();
    if raw.starts_with("[[") && (target.starts_with("file:") || target.starts_with("image:")) {
        return raw.to_string();
    }
    plain_text(raw)
}

/// Drop `{| … |}` tables, including nested ones.
fn strip_tables(body: &str) -> String {
    let mut depth = 0usize;
    let mut kept = Vec::new();

    for line in body.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("{|") {
            depth += 1;
            continue;
        }
        if depth > 0 {
            if trimmed.starts_with("|}") {
                depth -= 1;
            }
            continue;
        }
        kept.push(line);
    }
    kept.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{{Infobox item
|image = Carsomyr.png
|type = [[Two-Handed Sword|Two-handed sword]]
|value = 20,000<!-- base price -->
|enchantment = +5
}}
'''Carsomyr +5''' is a weapon in [[Baldur's Gate II]].<ref>Item file</ref>

== Description ==
Carsomyr is a weapon of legend.

{| class="wikitable"
! Stat !! Value
|-
| THAC0 || +5
|}

== Notes ==
* Only paladins can wield it. {{SoA}}
{{Navbox weapons}}
[[Category:Two-handed swords]]
[[Category:Magical weapons]]
"#;

    #[test]
    fn test_sections_in_order() {
        let doc = parse(SAMPLE);
        let titles: Vec<_> = doc.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["", "Description", "Notes"]);
        assert_eq!(doc.sections[1].depth, 1);
    }

    #[test]
    fn test_infobox_fields() {
        let doc = parse(SAMPLE);
        let infobox = doc.first_infobox().unwrap();
        assert_eq!(infobox.name, "Infobox item");
        assert_eq!(infobox.get("type"), Some("Two-handed sword"));
        assert_eq!(infobox.get("value"), Some("20,000"));
        assert_eq!(infobox.get("image"), Some("Carsomyr.png"));
    }

    #[test]
    fn test_lead_text_has_no_markup() {
        let doc = parse(SAMPLE);
        let lead = doc.lead().unwrap();
        assert_eq!(lead.text, "Carsomyr +5 is a weapon in Baldur's Gate II.");
    }

    #[test]
    fn test_tables_removed_from_text() {
        let doc = parse(SAMPLE);
        let description = doc.section("description").unwrap();
        assert_eq!(description.text, "Carsomyr is a weapon of legend.");
    }

    #[test]
    fn test_categories_and_templates() {
        let doc = parse(SAMPLE);
        assert_eq!(doc.categories, vec!["Two-handed swords", "Magical weapons"]);
        let notes = doc.section("Notes").unwrap();
        assert_eq!(notes.templates, vec!["SoA", "Navbox weapons"]);
        assert_eq!(notes.text, "Only paladins can wield it.");
    }

    #[test]
    fn test_infobox_file_link_kept() {
        let doc = parse("{{Infobox item\n|image = [[File:Acorns.png|40px]]\n}}");
        let infobox = doc.first_infobox().unwrap();
        assert_eq!(infobox.get("image"), Some("[[File:Acorns.png|40px]]"));
    }

    #[test]
    fn test_redirect() {
        let doc = parse("#REDIRECT [[Carsomyr]]");
        assert_eq!(doc.redirect.as_deref(), Some("Carsomyr"));
        assert!(doc.is_redirect());
        assert!(!parse(SAMPLE).is_redirect());
    }

    #[test]
    fn test_heading_inside_template_is_not_a_section() {
        let doc = parse("{{Infobox item\n|notes =\n== not a heading ==\n}}\nBody");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].text, "Body");
    }

    #[test]
    fn test_empty_markup() {
        let doc = parse("");
        assert_eq!(doc.sections.len(), 1);
        assert!(doc.first_infobox().is_none());
        assert_eq!(doc.text(), "");
    }
}
