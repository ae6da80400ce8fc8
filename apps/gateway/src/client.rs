//! Pass-through client for the business logic server.
//!
//! Upstream status, body and content type come back unchanged so the
//! gateway stays transparent once validation has passed.

use axum::body::Body;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_helpers::extractors::SHARER_USER_HEADER;
use axum_helpers::ErrorResponse;
use serde::Serialize;
use tracing::warn;

#[derive(Clone)]
pub struct ServerClient {
    http: reqwest::Client,
    base_url: String,
}

impl ServerClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn get(&self, path: &str, user_id: Option<i64>, query: &[(&str, String)]) -> Response {
        self.send(Method::GET, path, user_id, query, None::<&()>)
            .await
    }

    pub async fn post<T: Serialize>(&self, path: &str, user_id: Option<i64>, body: &T) -> Response {
        self.send(Method::POST, path, user_id, &[], Some(body)).await
    }

    pub async fn patch<T: Serialize>(
        &self,
        path: &str,
        user_id: Option<i64>,
        query: &[(&str, String)],
        body: Option<&T>,
    ) -> Response {
        self.send(Method::PATCH, path, user_id, query, body).await
    }

    pub async fn delete(&self, path: &str, user_id: Option<i64>) -> Response {
        self.send(Method::DELETE, path, user_id, &[], None::<&()>)
            .await
    }

    async fn send<T: Serialize>(
        &self,
        method: Method,
        path: &str,
        user_id: Option<i64>,
        query: &[(&str, String)],
        body: Option<&T>,
    ) -> Response {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(id) = user_id {
            request = request.header(SHARER_USER_HEADER, id);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let upstream = match request.send().await {
            Ok(upstream) => upstream,
            Err(e) => return bad_gateway(&e),
        };

        let status = upstream.status();
        let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();

        match upstream.bytes().await {
            Ok(bytes) => {
                let mut response = (status, Body::from(bytes)).into_response();
                if let Some(content_type) = content_type {
                    response
                        .headers_mut()
                        .insert(header::CONTENT_TYPE, content_type);
                }
                response
            }
            Err(e) => bad_gateway(&e),
        }
    }
}

fn bad_gateway(err: &reqwest::Error) -> Response {
    warn!("upstream request failed: {err}");
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse {
            error: "upstream server is unavailable".to_string(),
        }),
    )
        .into_response()
}
