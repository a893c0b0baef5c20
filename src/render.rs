//! Console rendering for posts.
//!
//! Pure string formatting: table rows for `list`/`search`, full post
//! blocks for `print`, and the word wrapper used for long bodies.

use crate::post::PostRecord;
use crate::store::Posts;

// =============================================================================
// TigerStyle Constants
// =============================================================================

/// Width of a table row and of the separator rule
pub const LINE_WIDTH_MAX: usize = 80;

/// Title column width in the table
pub const TITLE_WIDTH_MAX: usize = 20;

/// Wrap width for bodies in the full post view
pub const BODY_WRAP_WIDTH: usize = 74;

/// Continuation indent for wrapped bodies (lines up under "Body: ")
pub const BODY_INDENT: &str = "      ";

// =============================================================================
// Ordering
// =============================================================================

/// Posts paired with their ids, newest modification first.
///
/// Posts with the same timestamp keep ascending id order.
pub fn by_date_desc(posts: &Posts) -> Vec<(u64, &PostRecord)> {
    let mut ordered: Vec<_> = posts.iter().map(|(id, record)| (*id, record)).collect();
    ordered.sort_by(|a, b| b.1.date.cmp(&a.1.date));
    ordered
}

/// Posts in id order, or newest first when `sort_by_date` is set
pub fn ordered(posts: &Posts, sort_by_date: bool) -> Vec<(u64, &PostRecord)> {
    if sort_by_date {
        by_date_desc(posts)
    } else {
        posts.iter().map(|(id, record)| (*id, record)).collect()
    }
}

// =============================================================================
// Table
// =============================================================================

/// Header line of the post table
pub fn table_header() -> String {
    format!(
        "{:<3} | {:<20} | {:<19} | {}",
        "ID", "Title", "Date modified", "Body"
    )
}

/// One table row, cut to [`LINE_WIDTH_MAX`] characters
pub fn table_row(id: u64, record: &PostRecord) -> String {
    let title = truncate_chars(&record.title, TITLE_WIDTH_MAX);
    let row = format!(
        "{:>3} | {:<20} | {:<19} | {}",
        id,
        title,
        record.date_string(),
        record.body
    );
    truncate_chars(&row, LINE_WIDTH_MAX).to_string()
}

/// Full table: header, rule, then one row per post
pub fn post_table(posts: &Posts, sort_by_date: bool) -> Vec<String> {
    let mut lines = vec![table_header(), rule()];
    lines.extend(
        ordered(posts, sort_by_date)
            .into_iter()
            .map(|(id, record)| table_row(id, record)),
    );
    lines
}

/// Horizontal separator
pub fn rule() -> String {
    "-".repeat(LINE_WIDTH_MAX)
}

// =============================================================================
// Full post view
// =============================================================================

/// A post rendered for `print`, followed by the separator rule
pub fn post_block(id: u64, record: &PostRecord) -> String {
    let body = if record.body.chars().count() > BODY_WRAP_WIDTH {
        let separator = format!("\n{BODY_INDENT}");
        wrap_words(&record.body, BODY_WRAP_WIDTH).join(separator.as_str())
    } else {
        record.body.clone()
    };

    format!(
        "Title: {}\nPost ID: {}, last modification date: {}\nBody: {}\n{}",
        record.title,
        id,
        record.date_string(),
        body,
        rule()
    )
}

/// Greedy word wrap. Whitespace runs collapse to single spaces; a word
/// longer than `width` gets a line of its own.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line.is_empty() {
            line.push_str(word);
            line_len = word_len;
        } else if line_len + 1 + word_len <= width {
            line.push(' ');
            line.push_str(word);
            line_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_len = word_len;
        }
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// Longest prefix of `text` with at most `max` characters
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn record(title: &str, date: &str, body: &str) -> PostRecord {
        PostRecord {
            title: title.to_string(),
            date: NaiveDateTime::parse_from_str(date, crate::post::DATE_FORMAT).unwrap(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_header_layout() {
        assert_eq!(
            table_header(),
            "ID  | Title                | Date modified       | Body"
        );
    }

    #[test]
    fn test_row_layout() {
        let row = table_row(7, &record("Short", "2016-01-02 03:04:05", "Hi"));
        assert_eq!(
            row,
            "  7 | Short                | 2016-01-02 03:04:05 | Hi"
        );
    }

    #[test]
    fn test_row_truncates_title_and_line() {
        let row = table_row(
            1,
            &record(
                "A title that is far too long",
                "2016-01-02 03:04:05",
                &"body ".repeat(30),
            ),
        );
        assert_eq!(row.chars().count(), LINE_WIDTH_MAX);
        assert!(row.contains("| A title that is far  |"));
    }

    #[test]
    fn test_row_truncation_counts_characters() {
        let row = table_row(1, &record("Ünïcödé", "2016-01-02 03:04:05", &"é".repeat(100)));
        assert_eq!(row.chars().count(), LINE_WIDTH_MAX);
    }

    #[test]
    fn test_sort_by_date_desc() {
        let mut posts = Posts::new();
        posts.insert(1, record("old", "2015-01-01 00:00:00", ""));
        posts.insert(2, record("new", "2017-01-01 00:00:00", ""));
        posts.insert(3, record("mid", "2016-01-01 00:00:00", ""));

        let ids: Vec<u64> = by_date_desc(&posts).into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        let ids: Vec<u64> = ordered(&posts, false).into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_post_table_has_header_and_rule() {
        let mut posts = Posts::new();
        posts.insert(1, record("T", "2015-01-01 00:00:00", "B"));

        let lines = post_table(&posts, false);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "-".repeat(80));
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "lorem ipsum dolor sit amet ".repeat(10);
        let lines = wrap_words(&text, 20);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 20, "too long: {line:?}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_wrap_long_word_gets_own_line() {
        let lines = wrap_words("a abcdefghij b", 5);
        assert_eq!(lines, vec!["a", "abcdefghij", "b"]);
    }

    #[test]
    fn test_post_block_short_body() {
        let block = post_block(4, &record("Title", "2016-01-02 03:04:05", "Short body"));
        assert_eq!(
            block,
            format!(
                "Title: Title\nPost ID: 4, last modification date: 2016-01-02 03:04:05\nBody: Short body\n{}",
                "-".repeat(80)
            )
        );
    }

    #[test]
    fn test_post_block_wraps_long_body() {
        let body = "word ".repeat(40);
        let block = post_block(1, &record("T", "2016-01-02 03:04:05", &body));
        let body_lines: Vec<&str> = block
            .lines()
            .skip(2)
            .take_while(|l| !l.starts_with("---"))
            .collect();

        assert!(body_lines.len() > 1);
        assert!(body_lines[0].starts_with("Body: word"));
        for line in &body_lines[1..] {
            assert!(line.starts_with(BODY_INDENT));
            assert!(line.trim_start().chars().count() <= BODY_WRAP_WIDTH);
        }
    }
}
