//! Shared utility functions.

/// Truncate a string to at most `max_chars` characters.
///
/// Counts `char`s rather than bytes so previews never split a UTF-8 sequence.
/// If the string is shorter than `max_chars`, it is returned unchanged.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Short preview of `s` for log lines and notifications, suffixed with `...`
/// when anything was cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    let cut = truncate_chars(s, max_chars);
    if cut.len() < s.len() {
        format!("{}...", cut)
    } else {
        cut.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
    }

    #[test]
    fn truncate_no_op_when_short() {
        assert_eq!(truncate_chars("hi", 10), "hi");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        let s = "あのね"; // 9 bytes, 3 chars
        assert_eq!(truncate_chars(s, 1), "あ");
        assert_eq!(truncate_chars(s, 2), "あの");
        assert_eq!(truncate_chars(s, 3), "あのね");
    }

    #[test]
    fn truncate_empty() {
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn preview_marks_cut_text() {
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("abc", 3), "abc");
    }
}
