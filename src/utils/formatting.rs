/// First `max_chars` characters of `text` followed by `...`. The marker is
/// appended even when nothing was cut.
pub fn preview_text(text: &str, max_chars: usize) -> String {
    let mut preview: String = text.chars().take(max_chars).collect();
    preview.push_str("...");
    preview
}

/// Render header pairs as a single-line mapping, e.g. `{"server": "nginx"}`.
pub fn format_headers(headers: &[(String, String)]) -> String {
    let pairs: Vec<String> = headers
        .iter()
        .map(|(name, value)| format!("{:?}: {:?}", name, value))
        .collect();
    format!("{{{}}}", pairs.join(", "))
}

/// Pretty-print `body` as JSON with 2-space indentation, or `None` if it is
/// not JSON.
pub fn pretty_json(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    serde_json::to_string_pretty(&value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_text() {
        assert_eq!(preview_text("hello", 10), "hello...");
        assert_eq!(preview_text("hello world", 5), "hello...");
        assert_eq!(preview_text("", 5), "...");
    }

    #[test]
    fn test_preview_text_counts_characters() {
        let text = "é".repeat(600);
        let preview = preview_text(&text, 500);
        assert_eq!(preview.chars().count(), 503);
        assert!(preview.ends_with("é..."));
    }

    #[test]
    fn test_format_headers() {
        let headers = vec![
            ("content-type".to_string(), "text/html".to_string()),
            ("server".to_string(), "nginx".to_string()),
        ];
        assert_eq!(
            format_headers(&headers),
            r#"{"content-type": "text/html", "server": "nginx"}"#
        );
        assert_eq!(format_headers(&[]), "{}");
    }

    #[test]
    fn test_pretty_json() {
        assert_eq!(pretty_json(r#"{"ok":true}"#).unwrap(), "{\n  \"ok\": true\n}");
        assert!(pretty_json("<html></html>").is_none());
        assert!(pretty_json("").is_none());
    }
}
