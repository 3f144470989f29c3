//! Text shaping for response previews: truncation, whitespace handling, wrapping.
//!
//! Lengths are counted in `char`s, not bytes or display columns. Responses in
//! the measurement set are mostly CJK text, so slicing on byte offsets would
//! split code points.

/// Indent applied to every wrapped line. Counts against the wrap width.
pub const INDENT: &str = "    ";

/// Number of `char`s in `s`.
#[must_use]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The first `limit` chars of `s`.
#[must_use]
pub fn truncate(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Notice describing how much of a `len`-char response is shown under `limit`.
#[must_use]
pub fn truncation_notice(len: usize, limit: usize) -> String {
    if len < limit {
        format!("(all {len} chars shown)")
    } else {
        format!("({limit} of {len} chars shown)")
    }
}

/// Truncated text followed by its notice.
///
/// A cut preview is marked with ` ...` before the notice.
#[must_use]
pub fn preview(s: &str, limit: usize) -> String {
    let len = char_len(s);
    let notice = truncation_notice(len, limit);
    if len < limit {
        format!("{s} {notice}")
    } else {
        format!("{} ... {notice}", truncate(s, limit))
    }
}

/// Whether a response looks like spaced prose or pretty-printed payload rather
/// than unspaced CJK text.
#[must_use]
pub fn is_spaced(s: &str) -> bool {
    s.contains(' ')
}

/// Collapse every whitespace run to one space and trim both ends.
#[must_use]
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove line feeds, leaving other whitespace untouched.
#[must_use]
pub fn strip_newlines(s: &str) -> String {
    s.replace('\n', "")
}

/// Greedy word wrap with [`INDENT`] on every line.
///
/// Whitespace characters become plain spaces, whitespace at line breaks is
/// dropped, and words longer than a line are split across lines.
#[must_use]
pub fn wrap_indented(text: &str, width: usize) -> Vec<String> {
    let avail = width.saturating_sub(INDENT.len()).max(1);

    // Chunks are alternating runs of whitespace and non-whitespace, kept on a
    // stack so a split long word can push its remainder back.
    let mut chunks: Vec<String> = split_chunks(text).into_iter().rev().collect();
    let mut lines = Vec::new();

    while !chunks.is_empty() {
        let mut line: Vec<String> = Vec::new();
        let mut line_len = 0;

        if !lines.is_empty() && chunks.last().is_some_and(|c| is_blank(c)) {
            chunks.pop();
        }

        while let Some(chunk) = chunks.last() {
            let len = char_len(chunk);
            if line_len + len > avail {
                break;
            }
            line_len += len;
            if let Some(chunk) = chunks.pop() {
                line.push(chunk);
            }
        }

        if let Some(chunk) = chunks.last_mut() {
            if char_len(chunk) > avail {
                let space_left = avail - line_len;
                if space_left > 0 {
                    let head = truncate(chunk, space_left).to_owned();
                    chunk.replace_range(..head.len(), "");
                    line.push(head);
                }
            }
        }

        if line.last().is_some_and(|c| is_blank(c)) {
            line.pop();
        }
        if !line.is_empty() {
            lines.push(format!("{INDENT}{}", line.concat()));
        }
    }

    lines
}

fn is_blank(chunk: &str) -> bool {
    chunk.chars().all(char::is_whitespace)
}

fn split_chunks(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_blank = false;
    for c in text.chars() {
        let blank = c.is_whitespace();
        if !current.is_empty() && blank != current_blank {
            chunks.push(std::mem::take(&mut current));
        }
        current_blank = blank;
        current.push(if blank { ' ' } else { c });
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Format strings as a bracketed, single-quoted list: `['a', 'b']`.
#[must_use]
pub fn quoted_list<S: AsRef<str>>(items: &[S]) -> String {
    let inner: Vec<String> = items.iter().map(|s| quote(s.as_ref())).collect();
    format!("[{}]", inner.join(", "))
}

/// Single-quote a string, switching to double quotes when it contains a single
/// quote and no double quote.
fn quote(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_all_shown() {
        assert_eq!(truncation_notice(5, 250), "(all 5 chars shown)");
        assert_eq!(truncation_notice(0, 1), "(all 0 chars shown)");
    }

    #[test]
    fn test_notice_partial() {
        assert_eq!(truncation_notice(300, 250), "(250 of 300 chars shown)");
        // A string exactly at the budget counts as truncated.
        assert_eq!(truncation_notice(250, 250), "(250 of 250 chars shown)");
    }

    #[test]
    fn test_truncate_length_is_min() {
        for (s, limit) in [("Paris", 250), ("abcdefgh", 3), ("", 4), ("abc", 3)] {
            let cut = truncate(s, limit);
            assert_eq!(char_len(cut), char_len(s).min(limit));
            assert!(s.starts_with(cut));
        }
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("北京是首都", 2), "北京");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("Paris", 250), "Paris (all 5 chars shown)");
        assert_eq!(preview("abcdef", 4), "abcd ... (4 of 6 chars shown)");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(
            collapse_whitespace("{\n  \"a\":  1,\n\t\"b\": 2\n}"),
            "{ \"a\": 1, \"b\": 2 }"
        );
    }

    #[test]
    fn test_strip_newlines_keeps_other_whitespace() {
        assert_eq!(strip_newlines("北京\n是\t首都"), "北京是\t首都");
    }

    #[test]
    fn test_spaced_detection() {
        assert!(is_spaced("Paris is the capital."));
        assert!(!is_spaced("北京是首都\n"));
        assert!(!is_spaced("a\tb"));
    }

    #[test]
    fn test_wrap_fits_width() {
        let lines = wrap_indented("the quick brown fox jumps over the lazy dog", 16);
        assert_eq!(
            lines,
            vec!["    the quick", "    brown fox", "    jumps over", "    the lazy dog"]
        );
        assert!(lines.iter().all(|l| char_len(l) <= 16));
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        let lines = wrap_indented("北京是中华人民共和国的首都", 10);
        assert_eq!(lines, vec!["    北京是中华人", "    民共和国的首", "    都"]);
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        assert_eq!(
            wrap_indented("Paris (all 5 chars shown)", 100),
            vec!["    Paris (all 5 chars shown)"]
        );
    }

    #[test]
    fn test_wrap_tiny_width_still_progresses() {
        let lines = wrap_indented("ab", 1);
        assert_eq!(lines, vec!["    a", "    b"]);
    }

    #[test]
    fn test_quoted_list() {
        let empty: [&str; 0] = [];
        assert_eq!(quoted_list(&empty), "[]");
        assert_eq!(quoted_list(&["none"]), "['none']");
        assert_eq!(quoted_list(&["none", "soft"]), "['none', 'soft']");
        assert_eq!(quoted_list(&["it's"]), "[\"it's\"]");
    }
}
