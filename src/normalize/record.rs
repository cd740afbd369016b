use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Generate,
    Edit,
}

impl Mode {
    /// Only an explicit `edit` selects edit mode.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.trim().eq_ignore_ascii_case("edit") => Mode::Edit,
            _ => Mode::Generate,
        }
    }
}

/// Canonical gallery record, as written to the output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRecord {
    pub id: String,
    pub title: String,
    pub prompt: String,
    pub thumbnail_url: String,
    pub author: String,
    pub category: String,
    pub sub_category: String,
    pub mode: Mode,
    pub tags: Vec<String>,
    pub content_type: String,
    pub source: String,
    pub source_link: String,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_raw() {
        assert_eq!(Mode::from_raw(Some("edit")), Mode::Edit);
        assert_eq!(Mode::from_raw(Some("EDIT ")), Mode::Edit);
        assert_eq!(Mode::from_raw(Some("generate")), Mode::Generate);
        assert_eq!(Mode::from_raw(Some("remix")), Mode::Generate);
        assert_eq!(Mode::from_raw(None), Mode::Generate);
    }

    #[test]
    fn test_serializes_camel_case_keys() {
        let record = PromptRecord {
            id: "banana_1a2b3c4d".into(),
            title: "Sunset".into(),
            prompt: "A beautiful sunset".into(),
            thumbnail_url: String::new(),
            author: "Banana社区".into(),
            category: "style".into(),
            sub_category: String::new(),
            mode: Mode::Edit,
            tags: vec!["style".into()],
            content_type: "image".into(),
            source: "banana-prompt-quicker".into(),
            source_link: String::new(),
            created_at: "2026-01-01T00:00:00Z".into(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["thumbnailUrl"], "");
        assert_eq!(value["subCategory"], "");
        assert_eq!(value["contentType"], "image");
        assert_eq!(value["sourceLink"], "");
        assert_eq!(value["createdAt"], "2026-01-01T00:00:00Z");
        assert_eq!(value["mode"], "edit");
        assert_eq!(value.as_object().unwrap().len(), 13);
    }
}
