use reqwest::Url;

/// Truncate a string to a maximum number of characters, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Host part of a logo URI, for compact display. Returns the input when it
/// doesn't parse as a URL.
pub fn logo_host(logo: &str) -> String {
    match Url::parse(logo) {
        Ok(url) => url.host_str().unwrap_or(logo).to_string(),
        Err(_) => logo.to_string(),
    }
}
