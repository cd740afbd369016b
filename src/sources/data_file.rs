use std::time::Duration;

use serde_json::Value;

use super::RawRecord;
use crate::http;

/// Try each candidate URL in order and return the first 200 + valid JSON
/// payload. Later candidates are never requested once one succeeds.
pub async fn probe(client: &reqwest::Client, candidates: &[String], timeout: Duration) -> Option<Value> {
    for url in candidates {
        tracing::info!(url = %url, "Probing data file");
        match http::get_json(client, url, timeout).await {
            Ok(payload) => {
                tracing::info!(url = %url, "Found data file");
                return Some(payload);
            }
            Err(e) => {
                tracing::debug!(url = %url, error = %format!("{e:#}"), "Data file candidate unavailable");
            }
        }
    }
    None
}

/// Records carried by a data-file payload: a bare array, or an object with a
/// `prompts` array. Any other shape carries nothing.
pub fn extract_records(payload: Value) -> Vec<RawRecord> {
    match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("prompts") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HarvestConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> reqwest::Client {
        http::build_client(&HarvestConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_probe_first_valid_candidate_wins() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/prompts.json"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/src/data/prompts.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"prompt": "second"}])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/prompts.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"prompt": "third"}])))
            .expect(0)
            .mount(&server)
            .await;

        let candidates = vec![
            format!("{}/data/prompts.json", server.uri()),
            format!("{}/src/data/prompts.json", server.uri()),
            format!("{}/prompts.json", server.uri()),
        ];
        let payload = probe(&client(), &candidates, Duration::from_secs(5)).await.unwrap();
        assert_eq!(payload, json!([{"prompt": "second"}]));
    }

    #[tokio::test]
    async fn test_probe_skips_malformed_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<!doctype html>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/b.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"prompts": []})))
            .mount(&server)
            .await;

        let candidates = vec![
            format!("{}/a.json", server.uri()),
            format!("{}/b.json", server.uri()),
        ];
        let payload = probe(&client(), &candidates, Duration::from_secs(5)).await.unwrap();
        assert_eq!(payload, json!({"prompts": []}));
    }

    #[tokio::test]
    async fn test_probe_all_candidates_fail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let candidates = vec![
            format!("{}/one.json", server.uri()),
            format!("{}/two.json", server.uri()),
        ];
        assert!(probe(&client(), &candidates, Duration::from_secs(5)).await.is_none());
    }

    #[tokio::test]
    async fn test_probe_unreachable_host() {
        let candidates = vec!["http://127.0.0.1:1/prompts.json".to_string()];
        assert!(probe(&client(), &candidates, Duration::from_secs(2)).await.is_none());
    }

    #[tokio::test]
    async fn test_probe_empty_candidate_list() {
        assert!(probe(&client(), &[], Duration::from_secs(1)).await.is_none());
    }

    #[test]
    fn test_extract_records_array() {
        let records = extract_records(json!([{"prompt": "a"}, {"prompt": "b"}]));
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["prompt"], "b");
    }

    #[test]
    fn test_extract_records_prompts_key() {
        let records = extract_records(json!({"version": 2, "prompts": [{"prompt": "a"}]}));
        assert_eq!(records, vec![json!({"prompt": "a"})]);
    }

    #[test]
    fn test_extract_records_other_shapes() {
        assert!(extract_records(json!({"items": [{"prompt": "a"}]})).is_empty());
        assert!(extract_records(json!({"prompts": "not a list"})).is_empty());
        assert!(extract_records(json!("text")).is_empty());
        assert!(extract_records(json!(null)).is_empty());
    }
}
