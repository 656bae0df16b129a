//! Head/tail truncation primitives. All character arithmetic is in chars,
//! not bytes, so multibyte notebook content never splits a UTF-8 boundary.

/// Byte offset of the nth character, clamped to the end of the string.
fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Line-based head/tail truncation. Keeps the first `max_lines / 2` lines
/// and the last `max_lines - head` lines with a marker line in between
/// stating the exact number of omitted lines. Returns the input unchanged
/// when it fits.
pub fn truncate_middle_lines(text: &str, max_lines: usize, label: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() <= max_lines {
        return text.to_string();
    }
    let head = max_lines / 2;
    let tail = max_lines - head;
    let omitted = lines.len() - max_lines;
    format!(
        "{}\n... [{} TRUNCATED - {} lines omitted] ...\n{}",
        lines[..head].join("\n"),
        label,
        omitted,
        lines[lines.len() - tail..].join("\n")
    )
}

/// Character-based head/tail truncation. Head gets `max_chars / 2` chars;
/// the tail gets whatever of the budget the marker leaves over (floored at
/// zero) taken from the end of the string. Returns the input unchanged when
/// it fits.
pub fn truncate_middle_chars(text: &str, max_chars: usize, marker: &str) -> String {
    let total = text.chars().count();
    if total <= max_chars {
        return text.to_string();
    }
    let head = max_chars / 2;
    let tail = max_chars.saturating_sub(head + marker.chars().count());
    format!(
        "{}{}{}",
        &text[..byte_index(text, head)],
        marker,
        &text[byte_index(text, total - tail)..]
    )
}

/// Character-based prefix-only truncation: first `max_chars` chars plus the
/// marker. The tail is discarded. Returns the input unchanged when it fits.
pub fn truncate_head_chars(text: &str, max_chars: usize, marker: &str) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    format!("{}{}", &text[..byte_index(text, max_chars)], marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_within_budget_unchanged() {
        let text = (1..=15).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n");
        assert_eq!(truncate_middle_lines(&text, 15, "CODE"), text);
    }

    #[test]
    fn twenty_lines_keep_seven_head_eight_tail() {
        let text = (1..=20).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n");
        let out = truncate_middle_lines(&text, 15, "CODE");
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines[..7], (1..=7).map(|n| format!("line {n}")).collect::<Vec<_>>()[..]);
        assert_eq!(lines[7], "... [CODE TRUNCATED - 5 lines omitted] ...");
        assert_eq!(
            lines[8..],
            (13..=20).map(|n| format!("line {n}")).collect::<Vec<_>>()[..]
        );
    }

    #[test]
    fn marker_states_exact_omitted_count() {
        let text = (1..=100).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
        let out = truncate_middle_lines(&text, 15, "CODE");
        assert!(out.contains("85 lines omitted"));
    }

    #[test]
    fn chars_within_budget_unchanged() {
        let text = "a".repeat(100);
        assert_eq!(truncate_middle_chars(&text, 100, "[X]"), text);
    }

    #[test]
    fn middle_chars_head_marker_tail() {
        let text: String = ('a'..='z').cycle().take(250).collect();
        let marker = "<cut>";
        let out = truncate_middle_chars(&text, 100, marker);
        let head: String = text.chars().take(50).collect();
        let tail_len = 100 - 50 - marker.len();
        let tail: String = text.chars().skip(250 - tail_len).collect();
        assert_eq!(out, format!("{head}{marker}{tail}"));
        assert_eq!(out.chars().count(), 100);
    }

    #[test]
    fn oversized_marker_floors_tail_at_zero() {
        let text = "x".repeat(50);
        let marker = "-".repeat(40);
        let out = truncate_middle_chars(&text, 20, &marker);
        // head 10 chars + marker, tail budget went negative
        assert_eq!(out, format!("{}{}", "x".repeat(10), marker));
    }

    #[test]
    fn middle_chars_respects_utf8_boundaries() {
        let text = "é".repeat(40);
        let out = truncate_middle_chars(&text, 10, "|");
        assert_eq!(out.chars().count(), 10);
        assert!(out.starts_with("ééééé"));
    }

    #[test]
    fn head_chars_keeps_prefix_only() {
        let text = "abcdefghij";
        assert_eq!(truncate_head_chars(text, 4, "..."), "abcd...");
        assert_eq!(truncate_head_chars(text, 10, "..."), text);
    }
}
