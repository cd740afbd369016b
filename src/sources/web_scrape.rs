use std::time::Duration;

use anyhow::{Context, Result};
use scraper::{ElementRef, Html, Selector};
use serde_json::json;

use super::RawRecord;
use crate::config::HarvestConfig;
use crate::http;
use crate::normalize::{category, short_hash};

/// Ranked card selection strategies; the first one that matches anything wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStrategy {
    /// Class-based CSS selector group.
    ClassSelector(&'static str),
    /// Every `div` whose lower-cased class list contains one of the needles.
    DivClassScan(&'static [&'static str]),
}

pub const CARD_STRATEGIES: &[CardStrategy] = &[
    CardStrategy::ClassSelector(".prompt-card, .card, [class*='prompt'], [class*='card']"),
    CardStrategy::DivClassScan(&["card", "prompt"]),
];

const TITLE_SELECTORS: &[&str] = &["h3", "h4", ".title", ".card-title", "[class*='title']"];
const PROMPT_SELECTORS: &[&str] = &["p", ".description", ".prompt", ".content", "[class*='desc']"];
const IMAGE_SELECTORS: &[&str] = &["img[src]", "img[data-src]"];
const IMAGE_ATTRS: &[&str] = &["src", "data-src"];
const TAG_SELECTOR: &str = ".tag, .label, .badge, [class*='tag']";
const AUTHOR_SELECTORS: &[&str] = &[".author", ".user", "[class*='author']"];

/// Compiled per-field selectors for card extraction.
pub struct CardSelectors {
    title: Vec<Selector>,
    prompt: Vec<Selector>,
    image: Vec<Selector>,
    tags: Selector,
    author: Vec<Selector>,
}

impl CardSelectors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            title: compile_all(TITLE_SELECTORS)?,
            prompt: compile_all(PROMPT_SELECTORS)?,
            image: compile_all(IMAGE_SELECTORS)?,
            tags: compile(TAG_SELECTOR)?,
            author: compile_all(AUTHOR_SELECTORS)?,
        })
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow::anyhow!("invalid selector '{}': {:?}", selector, e))
}

fn compile_all(selectors: &[&str]) -> Result<Vec<Selector>> {
    selectors.iter().map(|s| compile(s)).collect()
}

pub async fn fetch_page(client: &reqwest::Client, url: &str, timeout: Duration) -> Result<String> {
    tracing::info!(url = %url, "Fetching page");
    http::get_text(client, url, timeout)
        .await
        .context("failed to fetch site root")
}

/// Candidate card elements of `document`, using the first strategy in
/// `CARD_STRATEGIES` that yields anything.
pub fn select_cards(document: &Html) -> Result<Vec<ElementRef<'_>>> {
    for strategy in CARD_STRATEGIES {
        let cards = apply_strategy(document, *strategy)?;
        if !cards.is_empty() {
            tracing::debug!(strategy = ?strategy, count = cards.len(), "Selected card elements");
            return Ok(cards);
        }
    }
    Ok(Vec::new())
}

fn apply_strategy(document: &Html, strategy: CardStrategy) -> Result<Vec<ElementRef<'_>>> {
    match strategy {
        CardStrategy::ClassSelector(selector) => {
            let sel = compile(selector)?;
            Ok(document.select(&sel).collect())
        }
        CardStrategy::DivClassScan(needles) => {
            let div = compile("div")?;
            Ok(document
                .select(&div)
                .filter(|el| {
                    el.value()
                        .attr("class")
                        .map(|class| {
                            let class = class.to_lowercase();
                            needles.iter().any(|n| class.contains(n))
                        })
                        .unwrap_or(false)
                })
                .collect())
        }
    }
}

/// Parse the site root into raw records, one per usable card.
pub fn parse_cards(html: &str, config: &HarvestConfig, harvested_at: &str) -> Result<Vec<RawRecord>> {
    let document = Html::parse_document(html);
    let selectors = CardSelectors::new()?;
    let cards = select_cards(&document)?;
    tracing::info!(count = cards.len(), "Found card elements");

    let records = cards
        .into_iter()
        .enumerate()
        .filter_map(|(idx, card)| {
            let record = extract_card(card, &selectors, config, harvested_at);
            if record.is_none() {
                tracing::debug!(index = idx, "Skipping card without title or text");
            }
            record
        })
        .collect();

    Ok(records)
}

/// Raw record for one card, or `None` when it has neither title nor text.
pub fn extract_card(
    card: ElementRef<'_>,
    selectors: &CardSelectors,
    config: &HarvestConfig,
    harvested_at: &str,
) -> Option<RawRecord> {
    let title = first_text(card, &selectors.title);
    let prompt = first_text(card, &selectors.prompt);

    let text = prompt.clone().or_else(|| title.clone())?;

    let image_url = selectors
        .image
        .iter()
        .find_map(|sel| card.select(sel).next())
        .and_then(|img| {
            IMAGE_ATTRS
                .iter()
                .filter_map(|attr| img.value().attr(attr))
                .map(str::trim)
                .find(|src| !src.is_empty())
        })
        .map(|src| resolve_url(src, &config.site_url));

    let tags: Vec<String> = card.select(&selectors.tags).filter_map(element_text).collect();
    let author = first_text(card, &selectors.author);

    let id = format!("{}_{}", config.id_prefix, short_hash(&text));
    let category = category::classify(&tags, &text);

    Some(json!({
        "id": id,
        "title": title,
        "prompt": text,
        "thumbnailUrl": image_url,
        "author": author,
        "tags": tags,
        "category": category,
        "source": config.source_name,
        "sourceUrl": config.site_url,
        "createdAt": harvested_at,
    }))
}

fn first_text(card: ElementRef<'_>, selectors: &[Selector]) -> Option<String> {
    selectors
        .iter()
        .find_map(|sel| card.select(sel).find_map(element_text))
}

/// Collapsed text content; `None` when blank.
fn element_text(el: ElementRef<'_>) -> Option<String> {
    let text = el.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

/// Resolve an `src`/`href` against the page URL.
fn resolve_url(raw: &str, base_url: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    if raw.starts_with("http://") || raw.starts_with("https://") || raw.starts_with("data:") {
        return raw.to_string();
    }
    if let Some(rest) = raw.strip_prefix("//") {
        let scheme = base_url.split("://").next().unwrap_or("https");
        return format!("{scheme}://{rest}");
    }
    if raw.starts_with('/') {
        return format!("{}{raw}", origin(base_url));
    }
    let base = base_url.trim_end_matches('/');
    let raw = raw.trim_start_matches("./");
    format!("{base}/{raw}")
}

/// `scheme://host[:port]` part of a URL.
fn origin(url: &str) -> &str {
    match url.find("://") {
        Some(i) => {
            let after = i + 3;
            match url[after..].find('/') {
                Some(j) => &url[..after + j],
                None => url,
            }
        }
        None => url.trim_end_matches('/'),
    }
}
