use serde::Deserialize;

/// Response of `GET /repos/{owner}/{repo}/git/trees/{ref}?recursive=1`.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeResponse {
    #[serde(default)]
    pub tree: Vec<TreeEntry>,
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl TreeEntry {
    pub fn is_blob(&self) -> bool {
        self.kind == "blob"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_tree_response() {
        let json = r#"{
            "sha": "abc123",
            "url": "https://api.github.com/repos/o/r/git/trees/abc123",
            "tree": [
                {"path": "data", "mode": "040000", "type": "tree", "sha": "d1"},
                {"path": "data/prompts.json", "mode": "100644", "type": "blob", "sha": "f1", "size": 120}
            ],
            "truncated": false
        }"#;

        let resp: TreeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.tree.len(), 2);
        assert!(!resp.tree[0].is_blob());
        assert!(resp.tree[1].is_blob());
        assert_eq!(resp.tree[1].path, "data/prompts.json");
        assert!(!resp.truncated);
    }

    #[test]
    fn test_deserialize_tree_missing_fields() {
        let resp: TreeResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.tree.is_empty());
    }
}
