//! Named browser-emulation header bundles.
//!
//! The portal fingerprints requests on a fixed browser identity, so each
//! handshake step sends one of two bundles: the navigation variant used for
//! document loads and the reduced script-fetch variant for the
//! session-finalize call. The values live here rather than inline at the
//! call sites so a portal-side change only touches this module.
//!
//! Two headers are deliberately absent: `Referer` is supplied by the
//! transport from the previous request's URL, and `Accept-Encoding` is owned
//! by the HTTP client so response bodies decompress transparently.

/// Browser identity pinned for every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/88.0.4324.190 Safari/537.36";

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9";

/// One named set of request headers. Names are lowercase wire names.
pub type HeaderBundle = Vec<(&'static str, String)>;

/// Headers for top-level document navigation: the check steps of the login
/// chain and the session probe.
pub fn navigation(origin: &str) -> HeaderBundle {
    vec![
        ("origin", origin.to_string()),
        ("dnt", "1".to_string()),
        ("accept", ACCEPT_HTML.to_string()),
        ("accept-language", "ja-JP,ja;q=0.9".to_string()),
        ("cache-control", "max-age=0".to_string()),
        ("sec-ch-ua-mobile", "?0".to_string()),
        ("sec-fetch-dest", "document".to_string()),
        ("sec-fetch-mode", "navigate".to_string()),
        ("sec-fetch-site", "same-origin".to_string()),
        ("sec-fetch-user", "?1".to_string()),
        ("upgrade-insecure-requests", "1".to_string()),
    ]
}

/// Reduced bundle for the script-style session-finalize fetch.
pub fn script_fetch(origin: &str) -> HeaderBundle {
    vec![
        ("origin", origin.to_string()),
        ("dnt", "1".to_string()),
        ("accept", ACCEPT_HTML.to_string()),
        ("accept-language", "ja-JP,ja;q=0.9".to_string()),
        ("cache-control", "max-age=0".to_string()),
        ("sec-ch-ua-mobile", "?0".to_string()),
        ("sec-fetch-dest", "script".to_string()),
        ("sec-fetch-mode", "no-cors".to_string()),
        ("sec-fetch-site", "same-origin".to_string()),
    ]
}
