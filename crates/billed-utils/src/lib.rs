//! Utility functions and helpers

/// Escape text for safe inclusion in HTML content and attribute values
pub fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Format an amount the way the bills table shows it: `400 €`, `12.5 €`
pub fn format_amount(amount: f64, symbol: &str) -> String {
    format!("{} {}", amount, symbol)
}

/// Generate a unique ID
pub fn generate_id() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}{:04}", now, seq % 10_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>\"Hôtel\" & 'bar'</b>"), "&lt;b&gt;&quot;Hôtel&quot; &amp; &#39;bar&#39;&lt;/b&gt;");
        assert_eq!(escape_html("encore"), "encore");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(400.0, "€"), "400 €");
        assert_eq!(format_amount(12.5, "€"), "12.5 €");
    }

    #[test]
    fn test_generate_id_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
    }
}
