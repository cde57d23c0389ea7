use std::sync::OnceLock;

use crate::common::constants::{HTTP_TIMEOUT_SECS, USER_AGENT};

static HTTP_CLIENT: OnceLock<reqwest::blocking::Client> = OnceLock::new();

pub fn get_http_client() -> &'static reqwest::blocking::Client {
    HTTP_CLIENT.get_or_init(|| {
        reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client")
    })
}

/// Accept either a bare blog host ("demo.tumblr.com") or a full URL, and
/// produce a base URL without a trailing slash.
pub fn base_url_for(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_for_bare_host() {
        assert_eq!(
            base_url_for("demo.tumblr.com"),
            "https://demo.tumblr.com"
        );
    }

    #[test]
    fn test_base_url_for_full_url() {
        assert_eq!(
            base_url_for("http://127.0.0.1:8080/"),
            "http://127.0.0.1:8080"
        );
    }
}
