//! Log sanitization utilities
//!
//! Response bodies can carry record payloads (TXT verification tokens, DKIM
//! keys) and token endpoints echo credentials back on failure, so bodies are
//! cut short before they reach a log line.

/// Maximum number of bytes of a body included in a log line.
const TRUNCATE_LIMIT: usize = 256;

/// Truncate a string for safe logging.
///
/// Strings within the limit are returned unchanged. Longer ones are cut at
/// the last character boundary before `TRUNCATE_LIMIT` bytes and suffixed
/// with the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= TRUNCATE_LIMIT)
        .last()
        .unwrap_or(0);
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_string_unchanged() {
        let s = "hello world";
        assert_eq!(truncate_for_log(s), s);
    }

    #[test]
    fn exactly_at_limit() {
        let s = "a".repeat(TRUNCATE_LIMIT);
        assert_eq!(truncate_for_log(&s), s);
    }

    #[test]
    fn over_limit_truncated() {
        let s = "a".repeat(TRUNCATE_LIMIT + 100);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
        assert!(result.contains(&format!("{} bytes]", TRUNCATE_LIMIT + 100)));
        assert!(result.len() < s.len());
    }

    #[test]
    fn multibyte_chars_safe() {
        // 'ü' is 2 bytes, so byte 256 can fall inside a character
        let s = format!("a{}", "ü".repeat(200));
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total 401 bytes]"));
    }

    #[test]
    fn record_payload_is_cut() {
        let body = format!(
            r#"[{{"name":"_dkim","type":"TXT","class":"IN","data":"v=DKIM1; p={}"}}]"#,
            "A".repeat(400)
        );
        let result = truncate_for_log(&body);
        assert!(result.starts_with(r#"[{"name":"_dkim""#));
        assert!(!result.ends_with(r#""}]"#));
    }
}
