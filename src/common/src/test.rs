//! Scripted HTTP scenarios for server tests.
//!
//! A scenario is a JSON file holding a `sequence` of events. `${name}`
//! placeholders are substituted before parsing, so one file can be replayed
//! against fresh session ids and addresses.

use std::{fs, time::Duration};

use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, info};

#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "type")]
enum Event {
    Post {
        endpoint: String,
        request: Value,
        response_code: u16,
        response: Option<Value>,
    },
    // Body sent verbatim as `application/json`, for malformed payloads
    PostRaw {
        endpoint: String,
        body: String,
        response_code: u16,
        response: Option<Value>,
    },
    Get {
        endpoint: String,
        response_code: u16,
        response: Option<Value>,
    },
    Delete {
        endpoint: String,
        response_code: u16,
    },
    Comment {
        text: String,
    },
}

#[derive(Debug)]
enum Body<'a> {
    Json(&'a Value),
    Raw(&'a str),
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TestCase {
    sequence: Vec<Event>,
}

impl TestCase {
    pub fn load(file_path: String, replacements: Vec<(impl ToString, impl ToString)>) -> Self {
        let mut text = fs::read_to_string(file_path).expect("Unable to read file");
        for (from, to) in replacements {
            let from = &format!("${{{}}}", from.to_string());
            text = text.replace(from, &to.to_string());
        }
        let test_case: Self = serde_json::from_str(&text).expect("Could not parse test case");
        test_case
    }

    /// Replays the sequence against `address` (e.g. `http://127.0.0.1:1234`).
    pub async fn run(&self, address: &str) {
        let client = Client::new();
        for (step, event) in self.sequence.iter().enumerate() {
            match event {
                Event::Post {
                    endpoint,
                    request,
                    response_code,
                    response,
                } => {
                    Self::call(
                        &client,
                        step,
                        Method::POST,
                        address.to_owned() + endpoint,
                        Some(Body::Json(request)),
                        *response_code,
                        response.as_ref(),
                    )
                    .await;
                }
                Event::PostRaw {
                    endpoint,
                    body,
                    response_code,
                    response,
                } => {
                    Self::call(
                        &client,
                        step,
                        Method::POST,
                        address.to_owned() + endpoint,
                        Some(Body::Raw(body)),
                        *response_code,
                        response.as_ref(),
                    )
                    .await;
                }
                Event::Get {
                    endpoint,
                    response_code,
                    response,
                } => {
                    Self::call(
                        &client,
                        step,
                        Method::GET,
                        address.to_owned() + endpoint,
                        None,
                        *response_code,
                        response.as_ref(),
                    )
                    .await;
                }
                Event::Delete {
                    endpoint,
                    response_code,
                } => {
                    Self::call(
                        &client,
                        step,
                        Method::DELETE,
                        address.to_owned() + endpoint,
                        None,
                        *response_code,
                        None,
                    )
                    .await;
                }
                Event::Comment { text } => {
                    info!("Comment: {:}", text)
                }
            }
        }
    }

    async fn call(
        client: &Client,
        step: usize,
        method: Method,
        url: String,
        body: Option<Body<'_>>,
        expected_code: u16,
        expected: Option<&Value>,
    ) {
        let timeout_len = Duration::from_millis(2000);
        debug!("Step {}: {} {:?} {:?}", step, method, url, body);
        let mut builder = client.request(method, &url);
        match body {
            Some(Body::Json(value)) => builder = builder.json(value),
            Some(Body::Raw(text)) => {
                builder = builder
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(text.to_owned())
            }
            None => {}
        }
        let response = timeout(timeout_len, builder.send())
            .await
            .unwrap_or_else(|e| panic!("Timeout (error {:?}) at step {}", e, step))
            .expect("Request failed");
        debug!("Status: {:?}", response.status());
        assert_eq!(
            expected_code,
            response.status().as_u16(),
            "unexpected status at step {} ({})",
            step,
            url
        );
        let Some(expected) = expected else {
            return;
        };
        let actual: Value = response
            .json()
            .await
            .expect("Failed to deserialize response");
        debug!("Got response: {:?}", actual);
        assert_subset(expected, &actual, step);
    }
}

/// Every field present in `expected` must match `actual`; extra fields in
/// `actual` are ignored.
fn assert_subset(expected: &Value, actual: &Value, step: usize) {
    match (expected, actual) {
        (Value::Object(expected), Value::Object(actual)) => {
            for (key, value) in expected {
                let Some(actual_value) = actual.get(key) else {
                    panic!("Step {}: missing field {:?} in {:?}", step, key, actual);
                };
                assert_subset(value, actual_value, step);
            }
        }
        _ => assert_eq!(expected, actual, "mismatch at step {}", step),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn subset_ignores_extra_fields() {
        let expected = json!({"score": {"summary": "1/1"}});
        let actual = json!({"outcome": "PlayerWin", "score": {"summary": "1/1", "best_of": 5}});
        assert_subset(&expected, &actual, 0);
    }

    #[test]
    #[should_panic]
    fn subset_rejects_different_values() {
        assert_subset(&json!({"summary": "1/1"}), &json!({"summary": "0/1"}), 0);
    }

    #[test]
    fn placeholders_are_replaced() {
        let path = std::env::temp_dir().join(format!("rps_case_{}.json", uuid::Uuid::new_v4()));
        fs::write(
            &path,
            r#"{"sequence": [{"type": "Get", "endpoint": "/game/${session}/score", "response_code": 200, "response": null}]}"#,
        )
        .unwrap();
        let case = TestCase::load(
            path.to_str().unwrap().to_owned(),
            vec![("session", "abc")],
        );
        let Event::Get { endpoint, .. } = &case.sequence[0] else {
            panic!("Expected Get event");
        };
        assert_eq!(endpoint, "/game/abc/score");
        fs::remove_file(path).unwrap();
    }
}
