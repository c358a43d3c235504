//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, path
//! decoding, dispatch to the static file layer, and access logging.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Percent-decoded request path, used for filesystem resolution
    pub path: &'a str,
    /// Path as received on the wire, used for redirects and access logging
    pub raw_path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let raw_path = req.uri().path().to_string();

    let response = dispatch(&req, &raw_path, &state).await;

    if state.config.logging.access_log {
        logger::log_access(
            &peer_addr,
            method.as_str(),
            &raw_path,
            response.status().as_u16(),
            content_length_of(&response),
        );
    }

    Ok(response)
}

async fn dispatch(
    req: &Request<hyper::body::Incoming>,
    raw_path: &str,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    if let Some(resp) = check_http_method(req.method()) {
        return resp;
    }

    let Some(decoded) = decode_path(raw_path) else {
        logger::log_warning(&format!("Rejected undecodable path: {raw_path}"));
        return http::build_404_response();
    };

    let ctx = RequestContext {
        path: &decoded,
        raw_path,
        is_head: *req.method() == Method::HEAD,
        if_none_match: req
            .headers()
            .get("if-none-match")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string),
    };

    static_files::serve(&ctx, state).await
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Percent-decode a request path, rejecting invalid UTF-8 and embedded NUL
fn decode_path(raw: &str) -> Option<String> {
    let decoded = urlencoding::decode(raw).ok()?;
    if decoded.contains('\0') {
        return None;
    }
    Some(decoded.into_owned())
}

/// Body size as declared by the builders, for the access line
fn content_length_of(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get(hyper::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
