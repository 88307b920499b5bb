//! API Gateway adapter
//!
//! Turns a serverless invocation event (payload format 1.0 or 2.0) into an
//! HTTP request for the router, and the router's response back into the
//! envelope the platform expects.

use std::collections::HashMap;

use axum::{
    body::Body,
    http::{Method, Request},
    response::{IntoResponse, Response},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use indexmap::IndexMap;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use tower::ServiceExt;

use crate::error::{AppError, AppResult};

/// Characters a decoded path must not carry raw inside a URI
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'%')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Query keys and values are encoded as opaque components
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GatewayEvent {
    /// Format 1.0
    pub http_method: Option<String>,
    /// Format 1.0
    pub path: Option<String>,
    /// Format 2.0
    pub raw_path: Option<String>,
    pub request_context: Option<RequestContext>,
    pub headers: Option<HashMap<String, String>>,
    pub query_string_parameters: Option<IndexMap<String, String>>,
    pub body: Option<String>,
    pub is_base64_encoded: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RequestContext {
    /// Present only in format 2.0
    pub http: Option<HttpContext>,
}

#[derive(Debug, Deserialize)]
pub struct HttpContext {
    pub method: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl GatewayEvent {
    /// Method and path, whichever payload format the event uses
    fn method_and_path(&self) -> (&str, &str) {
        match self.request_context.as_ref().and_then(|c| c.http.as_ref()) {
            Some(http) => (http.method.as_str(), self.raw_path.as_deref().unwrap_or("/")),
            None => (
                self.http_method.as_deref().unwrap_or("GET"),
                self.path.as_deref().unwrap_or("/"),
            ),
        }
    }

    /// Request target for the router. The event path is percent-decoded
    /// first, then re-encoded so only characters a URI cannot hold stay
    /// escaped.
    fn uri(&self) -> String {
        let (_, path) = self.method_and_path();
        let decoded = percent_decode_str(path).decode_utf8_lossy();
        let mut uri = utf8_percent_encode(&decoded, PATH).to_string();

        if let Some(params) = self.query_string_parameters.as_ref().filter(|p| !p.is_empty()) {
            let query: Vec<String> = params
                .iter()
                .map(|(k, v)| {
                    format!(
                        "{}={}",
                        utf8_percent_encode(k, QUERY_COMPONENT),
                        utf8_percent_encode(v, QUERY_COMPONENT)
                    )
                })
                .collect();
            uri.push('?');
            uri.push_str(&query.join("&"));
        }

        uri
    }

    fn body_bytes(&self) -> AppResult<Vec<u8>> {
        match self.body.as_deref() {
            None | Some("") => Ok(Vec::new()),
            Some(body) if self.is_base64_encoded => STANDARD.decode(body).map_err(|e| {
                tracing::warn!("Undecodable base64 event body: {}", e);
                AppError::MalformedRequest
            }),
            Some(body) => Ok(body.as_bytes().to_vec()),
        }
    }

    /// Rebuild the HTTP request this event describes
    pub fn to_request(&self) -> AppResult<Request<Body>> {
        let (method, _) = self.method_and_path();
        let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
            .map_err(|_| AppError::MalformedRequest)?;

        let mut builder = Request::builder().method(method).uri(self.uri());
        if let Some(headers) = &self.headers {
            for (name, value) in headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
        }

        builder.body(Body::from(self.body_bytes()?)).map_err(|e| {
            tracing::warn!("Event does not form a valid request: {}", e);
            AppError::MalformedRequest
        })
    }
}

impl GatewayResponse {
    pub async fn from_response(response: Response) -> AppResult<Self> {
        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX)
            .await
            .map_err(|e| AppError::Internal(format!("failed to read response body: {}", e)))?;

        let headers = parts
            .headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let (body, is_base64_encoded) = match String::from_utf8(bytes.to_vec()) {
            Ok(text) => (text, false),
            Err(_) => (STANDARD.encode(&bytes), true),
        };

        Ok(Self {
            status_code: parts.status.as_u16(),
            headers,
            body,
            is_base64_encoded,
        })
    }
}

/// Run one event through the router
pub async fn dispatch(router: Router, event: &GatewayEvent) -> AppResult<GatewayResponse> {
    let response = match event.to_request() {
        Ok(request) => router
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {}),
        Err(e) => e.into_response(),
    };

    GatewayResponse::from_response(response).await
}
