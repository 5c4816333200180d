//! Client IP extraction from the connection and proxy headers.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Resolves the client IP for click metadata.
///
/// When `behind_proxy` is set, the leftmost `X-Forwarded-For` entry (or
/// `X-Real-IP`) takes precedence over the peer socket address. Trust these
/// headers only when the service actually sits behind a proxy that strips
/// client-supplied values.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        if let Some(forwarded) = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            return forwarded.to_string();
        }

        if let Some(real_ip) = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            return real_ip.to_string();
        }
    }

    peer.ip().to_string()
}
