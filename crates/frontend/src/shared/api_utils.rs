//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use super::config::ApiConfig;

/// Get the base URL for API requests
///
/// A configured `base_url` wins; otherwise the URL is built from the current
/// window location and the configured port.
///
/// # Returns
/// - API base URL like "http://localhost:8000" or "https://hr.example.com"
/// - Empty string if window is not available
pub fn api_base(config: &ApiConfig) -> String {
    if !config.base_url.trim().is_empty() {
        return config.base_url.trim_end_matches('/').to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    origin(&protocol, &hostname, config.port)
}

fn origin(protocol: &str, hostname: &str, port: u16) -> String {
    format!("{}//{}:{}", protocol, hostname, port)
}
