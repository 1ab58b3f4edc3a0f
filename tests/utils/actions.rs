use axum::{
    body::Body,
    http::{Request, Response},
};
use tower::ServiceExt; // for `oneshot`

use super::setup::TestApp;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestApp {
    /// Send a request through a fresh clone of the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// POST /login with form-encoded credentials
    pub async fn login(&self, username: &str, password: &str) -> Response<Body> {
        let body =
            serde_urlencoded::to_string([("username", username), ("password", password)]).unwrap();
        let request = Request::builder()
            .method("POST")
            .uri("/login")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Log in and return the access token, panicking if login fails
    pub async fn login_token(&self, username: &str, password: &str) -> String {
        let response = self.login(username, password).await;
        assert!(
            response.status().is_success(),
            "login for {} should succeed",
            username
        );
        let body = super::assertions::body_json(response).await;
        body["access_token"].as_str().unwrap().to_string()
    }

    /// GET /usuarios with the given bearer token
    pub async fn list_users(&self, token: &str) -> Response<Body> {
        let request = Request::builder()
            .method("GET")
            .uri("/usuarios")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// POST /usuarios with the given bearer token
    pub async fn create_user(
        &self,
        token: &str,
        nombre: &str,
        email: &str,
        password: &str,
    ) -> Response<Body> {
        let body = serde_json::json!({
            "nombre": nombre,
            "email": email,
            "password": password,
        });
        let request = Request::builder()
            .method("POST")
            .uri("/usuarios")
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }
}
