//! Width-limited line wrapping for control file text.

/// Split `input` into the fewest fragments of at most `max_width` chars
///
/// Breaks happen at whitespace. A token wider than `max_width` is cut at
/// the width boundary and its tail may share a fragment with the next token.
pub fn wrap_fragments(input: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for token in input.split_whitespace() {
        let token_width = token.chars().count();
        let needed = if current_width == 0 {
            token_width
        } else {
            current_width + 1 + token_width
        };

        if needed <= max_width {
            if current_width > 0 {
                current.push(' ');
            }
            current.push_str(token);
            current_width = needed;
            continue;
        }

        if current_width > 0 {
            fragments.push(std::mem::take(&mut current));
            current_width = 0;
        }

        let chars: Vec<char> = token.chars().collect();
        let mut chunks = chars.chunks(max_width).peekable();
        while let Some(chunk) = chunks.next() {
            if chunks.peek().is_some() {
                fragments.push(chunk.iter().collect());
            } else {
                current = chunk.iter().collect();
                current_width = chunk.len();
            }
        }
    }

    if current_width > 0 {
        fragments.push(current);
    }

    fragments
}

/// Wrap `input` and prefix every fragment, joined by `newline`
pub fn wrap_with_prefix(input: &str, prefix: &str, max_width: usize, newline: &str) -> String {
    wrap_fragments(input, max_width)
        .iter()
        .map(|fragment| format!("{prefix}{fragment}"))
        .collect::<Vec<_>>()
        .join(newline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_is_one_fragment() {
        assert_eq!(wrap_fragments("A B C", 80), vec!["A B C"]);
    }

    #[test]
    fn test_breaks_at_whitespace() {
        assert_eq!(
            wrap_fragments("alpha beta gamma delta", 11),
            vec!["alpha beta", "gamma delta"]
        );
    }

    #[test]
    fn test_fragment_may_fill_exact_width() {
        assert_eq!(wrap_fragments("abc def", 7), vec!["abc def"]);
        assert_eq!(wrap_fragments("abc def", 6), vec!["abc", "def"]);
    }

    #[test]
    fn test_unbroken_input_gives_ceil_fragments() {
        for (length, width) in [(10, 3), (9, 3), (1, 5), (81, 80), (160, 80)] {
            let input = "x".repeat(length);
            let fragments = wrap_fragments(&input, width);
            assert_eq!(fragments.len(), length.div_ceil(width), "L={length} W={width}");
            assert!(fragments.iter().all(|f| f.chars().count() <= width));
            assert_eq!(fragments.concat(), input);
        }
    }

    #[test]
    fn test_long_token_tail_joins_next_word() {
        assert_eq!(wrap_fragments("abcdefg hi", 5), vec!["abcde", "fg hi"]);
    }

    #[test]
    fn test_empty_fragments_are_dropped() {
        assert!(wrap_fragments("", 10).is_empty());
        assert!(wrap_fragments("   \t ", 10).is_empty());
        assert_eq!(wrap_fragments("  a   b  ", 10), vec!["a b"]);
    }

    #[test]
    fn test_width_counts_chars() {
        assert_eq!(wrap_fragments("\u{00e9}\u{00e9}\u{00e9} ab", 6), vec!["\u{00e9}\u{00e9}\u{00e9} ab"]);
    }

    #[test]
    fn test_prefix_and_newline() {
        let wrapped = wrap_with_prefix("one, two, three", "!\t\t", 9, "\r\n");
        assert_eq!(wrapped, "!\t\tone, two,\r\n!\t\tthree");
    }
}
