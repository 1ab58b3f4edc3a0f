//! Test assertion helpers - fluent API for verifying responses
#![allow(dead_code)] // Test utilities may not all be used in every test

use axum::{
    body::Body,
    http::{Response, StatusCode},
};
use serde_json::Value;

pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct ResponseAssertion {
    status: StatusCode,
    body: Value,
}

impl ResponseAssertion {
    pub async fn from(response: Response<Body>) -> Self {
        let status = response.status();
        let body = body_json(response).await;
        Self { status, body }
    }

    pub fn has_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status, expected,
            "unexpected status, body was {}",
            self.body
        );
        self
    }

    pub fn has_detail(self, expected: &str) -> Self {
        assert_eq!(self.body["detail"], expected);
        self
    }

    pub fn body(self) -> Value {
        self.body
    }
}
