//! Visitor IP extraction.

use std::net::SocketAddr;

use axum::http::HeaderMap;

/// Determines the visitor IP for click accounting.
///
/// With `behind_proxy` set, the first entry of `X-Forwarded-For` (or, failing
/// that, `X-Real-IP`) is trusted; otherwise the peer socket address is used.
/// Only enable proxy mode behind a trusted reverse proxy, since these headers
/// are client-controlled and the IP is the uniqueness key for click caps.
pub fn client_ip(headers: &HeaderMap, addr: SocketAddr, behind_proxy: bool) -> String {
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

    addr.ip().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn addr() -> SocketAddr {
        "192.0.2.10:44312".parse().unwrap()
    }

    #[test]
    fn uses_peer_address_by_default() {
        let headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, addr(), false), "192.0.2.10");
    }

    #[test]
    fn ignores_forwarded_headers_when_not_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.1"));

        assert_eq!(client_ip(&headers, addr(), false), "192.0.2.10");
    }

    #[test]
    fn takes_first_forwarded_entry_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.1, 198.51.100.7"),
        );

        assert_eq!(client_ip(&headers, addr(), true), "203.0.113.1");
    }

    #[test]
    fn falls_back_to_real_ip_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("203.0.113.2"));

        assert_eq!(client_ip(&headers, addr(), true), "203.0.113.2");
    }

    #[test]
    fn falls_back_to_peer_address_when_headers_missing() {
        let headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, addr(), true), "192.0.2.10");
    }
}
