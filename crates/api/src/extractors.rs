//! Request extractors.

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use std::net::SocketAddr;

/// Identifier used when a request carries no address at all.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Best-effort client identifier for rate limiting and logs.
///
/// First `X-Forwarded-For` entry, then `X-Real-IP`, then the socket peer.
/// Forwarding headers are trusted as sent; put the gateway behind a proxy
/// that overwrites them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(ClientIp(client_identifier(&parts.headers, peer)))
    }
}

pub fn client_identifier(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(xff) = header_value("X-Forwarded-For") {
        if let Some(ip) = xff.split(',').next().map(str::trim).filter(|ip| !ip.is_empty()) {
            return ip.to_string();
        }
    }

    if let Some(ip) = header_value("X-Real-IP") {
        return ip.to_string();
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}
