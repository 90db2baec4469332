use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;
use watchsync_models::SourceItem;

#[cfg(test)]
mod tests;

/// Anchor text shorter than this is treated as missing (icons, "›", etc.)
const MIN_TITLE_CHARS: usize = 2;

/// Elements that group one list entry on the page
const CONTAINER_TAGS: [&str; 5] = ["div", "li", "article", "section", "td"];

lazy_static! {
    static ref TITLE_ID_REGEX: Regex = Regex::new(r"(?i)/title/(tt\d+)").unwrap();
    static ref ANCHOR_SELECTOR: Selector = Selector::parse("a[href]").unwrap();
    static ref HEADING_SELECTOR: Selector = Selector::parse("h1, h2, h3, h4, h5, h6").unwrap();
    static ref LD_JSON_SELECTOR: Selector =
        Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
}

/// Pull the normalized `tt` identifier out of a URL or path.
///
/// Case and trailing path segments are ignored, so `/title/TT0113277/` and
/// `/title/tt0113277?ref_=x` both yield `tt0113277`.
pub fn extract_title_id(href: &str) -> Option<String> {
    TITLE_ID_REGEX
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
}

fn placeholder_title(external_id: &str) -> String {
    format!("ID:{}", external_id)
}

fn clean_text(element: &ElementRef) -> String {
    element.text().collect::<Vec<_>>().join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_meaningful(text: &str) -> bool {
    text.chars().count() >= MIN_TITLE_CHARS
}

/// Parse a list page into deduplicated items in first-discovery order.
///
/// Title anchors are scanned first, then embedded JSON-LD item lists. An
/// identifier seen by either strategy is never added again, so anchor-derived
/// titles take precedence.
pub fn parse_list_page(html: &str) -> Vec<SourceItem> {
    let document = Html::parse_document(html);
    let mut seen: HashSet<String> = HashSet::new();
    let mut items = Vec::new();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(external_id) = anchor.value().attr("href").and_then(extract_title_id) else {
            continue;
        };
        if !seen.insert(external_id.clone()) {
            continue;
        }
        let title = recover_anchor_title(&anchor, &external_id)
            .unwrap_or_else(|| placeholder_title(&external_id));
        items.push(SourceItem::new(title, external_id));
    }
    let from_anchors = items.len();

    for script in document.select(&LD_JSON_SELECTOR) {
        let raw = script.text().collect::<String>();
        for (external_id, name) in parse_structured_data(&raw) {
            if !seen.insert(external_id.clone()) {
                continue;
            }
            let title = name.unwrap_or_else(|| placeholder_title(&external_id));
            items.push(SourceItem::new(title, external_id));
        }
    }

    debug!(
        from_anchors,
        from_structured_data = items.len() - from_anchors,
        "Parsed list page"
    );
    items
}

/// Title for an anchor: its own text, else the enclosing container's heading,
/// else the text of another anchor in that container pointing at the same title.
fn recover_anchor_title(anchor: &ElementRef, external_id: &str) -> Option<String> {
    let own = clean_text(anchor);
    if is_meaningful(&own) {
        return Some(own);
    }

    let container = anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| CONTAINER_TAGS.contains(&el.value().name()))?;

    if let Some(heading) = container
        .select(&HEADING_SELECTOR)
        .map(|h| clean_text(&h))
        .find(|t| is_meaningful(t))
    {
        return Some(heading);
    }

    container
        .select(&ANCHOR_SELECTOR)
        .filter(|a| {
            a.value()
                .attr("href")
                .and_then(extract_title_id)
                .is_some_and(|id| id == external_id)
        })
        .map(|a| clean_text(&a))
        .find(|t| is_meaningful(t))
}

#[derive(Debug, Deserialize)]
struct LdListElement {
    #[serde(default)]
    item: Option<LdItemRef>,
    #[serde(default, deserialize_with = "lenient_text")]
    url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LdItemRef {
    Thing {
        #[serde(default, deserialize_with = "lenient_text")]
        url: Option<String>,
        #[serde(default, deserialize_with = "lenient_text")]
        name: Option<String>,
    },
    Url(String),
}

/// Text fields sometimes carry arrays or objects; anything but a string reads as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

/// (identifier, name) pairs from one JSON-LD block.
///
/// A block that is not JSON yields nothing. Elements are decoded one at a time
/// so a single odd entry does not cost the rest of the list.
fn parse_structured_data(raw: &str) -> Vec<(String, Option<String>)> {
    let document: Value = match serde_json::from_str(raw.trim()) {
        Ok(doc) => doc,
        Err(e) => {
            debug!(error = %e, "Skipping malformed structured-data block");
            return Vec::new();
        }
    };
    let lists: Vec<&Value> = match &document {
        Value::Array(lists) => lists.iter().collect(),
        other => vec![other],
    };

    let mut pairs = Vec::new();
    let entries = lists
        .into_iter()
        .filter_map(|list| list.get("itemListElement").and_then(Value::as_array))
        .flatten();
    for entry in entries {
        let element = match LdListElement::deserialize(entry) {
            Ok(element) => element,
            Err(e) => {
                debug!(error = %e, "Skipping unreadable structured-data entry");
                continue;
            }
        };
        let (item_url, item_name) = match element.item {
            Some(LdItemRef::Thing { url, name }) => (url, name),
            Some(LdItemRef::Url(url)) => (Some(url), None),
            None => (None, None),
        };
        let Some(external_id) = item_url
            .or(element.url)
            .as_deref()
            .and_then(extract_title_id)
        else {
            continue;
        };
        let name = item_name
            .or(element.name)
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        pairs.push((external_id, name));
    }
    pairs
}
