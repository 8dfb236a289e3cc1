//! Helpers for locating the backend from the page.

/// Base URL of the backend on the page's host.
///
/// Keeps the page's protocol and hostname and swaps in `port`, e.g.
/// "http://localhost:8000". Empty string if no window is available.
pub fn api_base(port: u16) -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    origin_with_port(&protocol, &hostname, port)
}

fn origin_with_port(protocol: &str, hostname: &str, port: u16) -> String {
    format!("{}//{}:{}", protocol, hostname, port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_with_port() {
        assert_eq!(origin_with_port("https:", "fleet.local", 8000), "https://fleet.local:8000");
    }
}
