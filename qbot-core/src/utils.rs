//! Text helpers for outbound messages.

/// Characters the platform's MarkdownV2 parse mode requires escaping.
const MARKDOWN_SPECIAL: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escapes MarkdownV2 special characters so arbitrary text can be sent with
/// `parse_mode: MarkdownV2` without breaking formatting.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if MARKDOWN_SPECIAL.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markdown_specials() {
        assert_eq!(escape_markdown("a_b*c"), "a\\_b\\*c");
        assert_eq!(escape_markdown("1.5 + 2!"), "1\\.5 \\+ 2\\!");
    }

    #[test]
    fn test_escape_markdown_plain_text_unchanged() {
        assert_eq!(escape_markdown("hello world"), "hello world");
        assert_eq!(escape_markdown(""), "");
    }
}
