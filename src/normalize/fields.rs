use serde_json::{Map, Value};

/// Ordered alternate source keys for one canonical field. The first key
/// holding a non-empty value wins.
#[derive(Debug, Clone, Copy)]
pub struct FieldChain {
    pub field: &'static str,
    pub keys: &'static [&'static str],
}

pub const TITLE: FieldChain = FieldChain {
    field: "title",
    keys: &["title", "name"],
};

pub const PROMPT: FieldChain = FieldChain {
    field: "prompt",
    keys: &["prompt", "content", "description"],
};

pub const THUMBNAIL: FieldChain = FieldChain {
    field: "thumbnailUrl",
    keys: &["preview", "thumbnailUrl", "image", "thumbnail"],
};

pub const AUTHOR: FieldChain = FieldChain {
    field: "author",
    keys: &["author", "creator"],
};

pub const CATEGORY: FieldChain = FieldChain {
    field: "category",
    keys: &["category"],
};

pub const SUB_CATEGORY: FieldChain = FieldChain {
    field: "subCategory",
    keys: &["sub_category", "subCategory"],
};

pub const MODE: FieldChain = FieldChain {
    field: "mode",
    keys: &["mode"],
};

pub const SOURCE_LINK: FieldChain = FieldChain {
    field: "sourceLink",
    keys: &["link", "sourceLink", "sourceUrl"],
};

pub const CREATED_AT: FieldChain = FieldChain {
    field: "createdAt",
    keys: &["created", "createdAt"],
};

pub const ID: FieldChain = FieldChain {
    field: "id",
    keys: &["id"],
};

impl FieldChain {
    pub fn resolve(&self, record: &Map<String, Value>) -> Option<String> {
        self.keys.iter().find_map(|key| record.get(*key).and_then(scalar_text))
    }
}

/// Text of a string or number value, unmodified; empty strings, nulls, and
/// containers count as absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => (!s.is_empty()).then(|| s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Tag list of a raw record. Non-array values become a single tag when they
/// are non-empty text.
pub fn tags(record: &Map<String, Value>) -> Vec<String> {
    match record.get("tags") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::Bool(b) => Some(b.to_string()),
                other => scalar_text(other),
            })
            .collect(),
        Some(other) => scalar_text(other).into_iter().collect(),
        None => Vec::new(),
    }
}
