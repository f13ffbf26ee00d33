//! Markdown Stripping
//!
//! Model answers are rendered as plain text, so common markdown markers are
//! removed while the wrapped words are preserved. Line markers (headings,
//! bullets, numbered lists) are handled first, then paired inline markers.

/// Strip markdown markers from a model answer, returning plain text
pub fn strip(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&strip_line(line));
    }
    out
}

fn strip_line(line: &str) -> String {
    let indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();
    let body = line.trim_start();

    let body = if let Some(rest) = strip_bullet(body) {
        format!("\u{2022} {}", rest)
    } else if let Some(rest) = strip_numbered(body) {
        rest.to_string()
    } else {
        body.to_string()
    };

    let body = remove_paired(&body, "```");
    let body = remove_paired(&body, "`");
    let body = remove_paired(&body, "**");
    let body = remove_paired(&body, "*");
    let body = strip_hashes(&body);
    let body = strip_links(&body);

    format!("{}{}", indent, body)
}

/// Remove heading markers (`#` runs up to six, followed by whitespace)
/// anywhere in the line
fn strip_hashes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find('#') {
        let hashes = rest[pos..].chars().take_while(|&c| c == '#').count();
        let after = &rest[pos + hashes..];
        if (1..=6).contains(&hashes) && after.starts_with(' ') {
            out.push_str(&rest[..pos]);
            rest = &after[1..];
        } else {
            out.push_str(&rest[..pos + hashes]);
            rest = after;
        }
    }

    out.push_str(rest);
    out
}

/// `- item` / `* item` / `+ item` -> bullet-prefixed item
fn strip_bullet(s: &str) -> Option<&str> {
    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = s.strip_prefix(marker) {
            return Some(rest);
        }
    }
    None
}

/// `3. item` -> `item`
fn strip_numbered(s: &str) -> Option<&str> {
    let digits = s.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &s[digits..];
        if let Some(rest) = rest.strip_prefix(". ") {
            return Some(rest);
        }
    }
    None
}

/// Remove matched pairs of `delim`, keeping the inner text; unmatched
/// occurrences are left as-is
fn remove_paired(s: &str, delim: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(open) = rest.find(delim) {
        let after_open = &rest[open + delim.len()..];
        match after_open.find(delim) {
            Some(close) => {
                out.push_str(&rest[..open]);
                out.push_str(&after_open[..close]);
                rest = &after_open[close + delim.len()..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}

/// `[label](url)` -> `label`
fn strip_links(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(open) = rest.find('[') {
        let after_open = &rest[open + 1..];
        let link = after_open.find(']').and_then(|close| {
            let after_close = &after_open[close + 1..];
            after_close.strip_prefix('(').and_then(|in_paren| {
                in_paren
                    .find(')')
                    .map(|end| (&after_open[..close], &in_paren[end + 1..]))
            })
        });

        match link {
            Some((label, tail)) => {
                out.push_str(&rest[..open]);
                out.push_str(label);
                rest = tail;
            }
            None => {
                out.push_str(&rest[..=open]);
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_inline_markers() {
        let raw = "**Bold** and *italic* and # Heading and `code`";
        let plain = strip(raw);

        assert!(!plain.contains("**"));
        assert!(!plain.contains('*'));
        assert!(!plain.contains('#'));
        assert!(!plain.contains('`'));
        for word in ["Bold", "italic", "Heading", "code"] {
            assert!(plain.contains(word), "missing {:?} in {:?}", word, plain);
        }
    }

    #[test]
    fn test_strips_heading_lines() {
        assert_eq!(strip("## Getting Started"), "Getting Started");
        assert_eq!(strip("###### Deep"), "Deep");
        // Seven hashes is not a heading
        assert_eq!(strip("####### nope"), "####### nope");
    }

    #[test]
    fn test_bullets_become_dots() {
        assert_eq!(strip("- first\n* second\n+ third"), "\u{2022} first\n\u{2022} second\n\u{2022} third");
    }

    #[test]
    fn test_numbered_markers_removed() {
        assert_eq!(strip("1. stake\n2. lend"), "stake\nlend");
    }

    #[test]
    fn test_links_keep_label() {
        assert_eq!(
            strip("see [the docs](https://docs.avax.network) for more"),
            "see the docs for more"
        );
    }

    #[test]
    fn test_unmatched_markers_left_alone() {
        assert_eq!(strip("a * b"), "a * b");
        assert_eq!(strip("5 [brackets"), "5 [brackets");
    }

    #[test]
    fn test_fenced_code_block_markers_removed() {
        let raw = "before ```let x = 1;``` after";
        assert_eq!(strip(raw), "before let x = 1; after");
    }
}
