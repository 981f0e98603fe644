use chrono::Local;

/// Escapes special characters for Telegram MarkdownV2.
///
/// Every user-supplied value (chat titles, ids, first names) must pass through
/// this before being interpolated into a MarkdownV2 message.
///
/// # Example
///
/// ```
/// use chancore::core::utils::escape_markdown_v2;
///
/// let escaped = escape_markdown_v2("Hello. World!");
/// assert_eq!(escaped, "Hello\\. World\\!");
/// ```
pub fn escape_markdown_v2(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        match c {
            '\\' | '_' | '*' | '[' | ']' | '(' | ')' | '~' | '`' | '>' | '#' | '+' | '-' | '=' | '|' | '{'
            | '}' | '.' | '!' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }

    result
}

/// Local time formatted the way `added_date` is stored: `YYYY-MM-DD HH:MM:SS`.
pub fn now_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markdown_v2() {
        assert_eq!(escape_markdown_v2("Hello. World!"), "Hello\\. World\\!");
        assert_eq!(escape_markdown_v2("-1001234567890"), "\\-1001234567890");
        assert_eq!(escape_markdown_v2("News (daily)"), "News \\(daily\\)");
        assert_eq!(escape_markdown_v2("path\\file"), "path\\\\file");
        assert_eq!(escape_markdown_v2("قناة الأخبار"), "قناة الأخبار");
    }

    #[test]
    fn test_now_timestamp_shape() {
        let ts = now_timestamp();
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
        assert_eq!(&ts[13..14], ":");
    }
}
