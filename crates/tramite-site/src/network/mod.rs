//! Network collaborator
//!
//! One POST per user-triggered submit. The page only cares whether the
//! response status is 2xx; bodies are opaque.

pub mod mock;

pub use mock::MockNetwork;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Form fields as ordered `name=value` pairs (multipart/form-data body)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormPayload(Vec<(String, String)>);

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// First value sent under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The single request issued by a submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub url: String,
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: FormPayload,
}

impl SubmissionRequest {
    /// POST `body` to `url`, asking for a JSON reply
    pub fn post(url: impl Into<String>, body: FormPayload) -> Self {
        Self {
            url: url.into(),
            method: "POST".to_string(),
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            body,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// What the page needs from a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkResponse {
    pub status: u16,
}

impl NetworkResponse {
    pub fn new(status: u16) -> Self {
        Self { status }
    }

    /// 2xx statuses count as success
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues form submissions.
///
/// `?Send`: the page runs on a single-threaded event loop and browser
/// futures are not `Send`.
#[async_trait(?Send)]
pub trait Network {
    /// Send the request; `Err` only for transport failures
    async fn send(&self, request: &SubmissionRequest) -> Result<NetworkResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(200, true)]
    #[case(201, true)]
    #[case(299, true)]
    #[case(199, false)]
    #[case(302, false)]
    #[case(422, false)]
    #[case(500, false)]
    fn test_success_classification(#[case] status: u16, #[case] success: bool) {
        assert_eq!(NetworkResponse::new(status).is_success(), success);
    }

    #[test]
    fn test_post_request_shape() {
        let mut body = FormPayload::new();
        body.append("name", "Al");
        let request = SubmissionRequest::post("/quote", body);
        assert_eq!(request.method, "POST");
        assert_eq!(request.header("accept"), Some("application/json"));
        assert_eq!(request.body.get("name"), Some("Al"));
        assert_eq!(request.body.get("email"), None);
    }
}
