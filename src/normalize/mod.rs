pub mod category;
pub mod fields;
pub mod record;

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::config::HarvestConfig;
use crate::sources::RawRecord;
pub use record::{Mode, PromptRecord};

const CONTENT_TYPE: &str = "image";

/// First 8 hex chars of the SHA-256 of `input`.
pub fn short_hash(input: &str) -> String {
    let digest = hex::encode(Sha256::digest(input.as_bytes()));
    digest[..8].to_string()
}

/// Map raw records to canonical ones, dropping records without a prompt.
/// Input order is preserved.
pub fn normalize_all(raw: &[RawRecord], config: &HarvestConfig, harvested_at: &str) -> Vec<PromptRecord> {
    let records: Vec<PromptRecord> = raw
        .iter()
        .enumerate()
        .filter_map(|(idx, value)| {
            let Some(map) = value.as_object() else {
                tracing::debug!(index = idx, "Skipping non-object record");
                return None;
            };
            let record = normalize_record(map, config, harvested_at);
            if record.is_none() {
                tracing::debug!(index = idx, field = fields::PROMPT.field, "Dropping record without prompt");
            }
            record
        })
        .collect();

    let dropped = raw.len() - records.len();
    if dropped > 0 {
        tracing::info!(kept = records.len(), dropped, "Normalized records");
    }
    records
}

pub fn normalize_record(
    raw: &Map<String, Value>,
    config: &HarvestConfig,
    harvested_at: &str,
) -> Option<PromptRecord> {
    let prompt = fields::PROMPT.resolve(raw)?;
    let tags = fields::tags(raw);

    let id = fields::ID
        .resolve(raw)
        .unwrap_or_else(|| short_hash(&Value::Object(raw.clone()).to_string()));

    let category = fields::CATEGORY
        .resolve(raw)
        .unwrap_or_else(|| category::classify(&tags, raw_prompt(raw)).to_string());

    Some(PromptRecord {
        id,
        title: fields::TITLE.resolve(raw).unwrap_or_default(),
        thumbnail_url: fields::THUMBNAIL.resolve(raw).unwrap_or_default(),
        author: fields::AUTHOR
            .resolve(raw)
            .unwrap_or_else(|| config.default_author.clone()),
        category,
        sub_category: fields::SUB_CATEGORY.resolve(raw).unwrap_or_default(),
        mode: Mode::from_raw(fields::MODE.resolve(raw).as_deref()),
        tags,
        content_type: CONTENT_TYPE.to_string(),
        source: config.source_name.clone(),
        source_link: fields::SOURCE_LINK.resolve(raw).unwrap_or_default(),
        created_at: fields::CREATED_AT
            .resolve(raw)
            .unwrap_or_else(|| harvested_at.to_string()),
        prompt,
    })
}

/// The record's own `prompt` string, ignoring the `content`/`description`
/// fallbacks. Only this feeds the classifier for upstream data records.
fn raw_prompt(raw: &Map<String, Value>) -> &str {
    raw.get("prompt").and_then(Value::as_str).unwrap_or_default()
}
