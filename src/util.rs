/// Turn the light HTML used in question files into plain terminal text.
///
/// Tags are dropped (`<br>` becomes a newline) and the handful of entities
/// question authors actually use are decoded. Unknown entities are kept verbatim.
pub fn strip_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '<' if !opens_tag(&input[i + 1..]) => out.push(c),
            '<' => match input[i..].find('>') {
                Some(end) => {
                    let tag = input[i + 1..i + end].trim().to_ascii_lowercase();
                    if tag.starts_with("br") {
                        out.push('\n');
                    }
                    while let Some(&(j, _)) = chars.peek() {
                        if j > i + end {
                            break;
                        }
                        chars.next();
                    }
                }
                None => out.push(c),
            },
            '&' => match input[i..].find(';').filter(|&end| end <= 8) {
                Some(end) => match decode_entity(&input[i + 1..i + end]) {
                    Some(decoded) => {
                        out.push(decoded);
                        while let Some(&(j, _)) = chars.peek() {
                            if j > i + end {
                                break;
                            }
                            chars.next();
                        }
                    }
                    None => out.push(c),
                },
                None => out.push(c),
            },
            _ => out.push(c),
        }
    }

    out
}

/// HTML tag-open rule: `<` must be followed by a letter, `/` or `!`
fn opens_tag(rest: &str) -> bool {
    rest.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!')
}

fn decode_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" | "#39" => '\'',
        "nbsp" => ' ',
        "times" => '×',
        "euml" => 'ë',
        "eacute" => 'é',
        "hellip" => '…',
        _ => return None,
    };
    Some(c)
}

/// Letter shown next to an option: A, B, C...
pub fn option_label(idx: usize) -> char {
    char::from_u32('A' as u32 + idx as u32).unwrap_or('?')
}

/// Options reachable by a direct key. Letters stop at `i` so `j`/`k`/`n`/`r`/`s`
/// stay commands; later options are picked with the cursor.
pub const SHORTCUT_OPTIONS: usize = 9;

/// Map a typed key back to an option index, accepting `a`/`A` or `1` for the first option
pub fn option_index_for_key(c: char, option_count: usize) -> Option<usize> {
    let idx = match c {
        'a'..='i' => c as usize - 'a' as usize,
        'A'..='I' => c as usize - 'A' as usize,
        '1'..='9' => c as usize - '1' as usize,
        _ => return None,
    };
    (idx < option_count).then_some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_simple_tags() {
        assert_eq!(
            strip_markup("What is the capital of <b>Australia</b>?"),
            "What is the capital of Australia?"
        );
        assert_eq!(strip_markup("<em>x</em> and <i>y</i>"), "x and y");
    }

    #[test]
    fn test_strip_br_becomes_newline() {
        assert_eq!(strip_markup("one<br>two<br/>three"), "one\ntwo\nthree");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(strip_markup("12 &times; 12"), "12 × 12");
        assert_eq!(strip_markup("Option&lt;T&gt;"), "Option<T>");
        assert_eq!(strip_markup("Bront&euml;"), "Brontë");
    }

    #[test]
    fn test_unknown_entity_kept() {
        assert_eq!(strip_markup("fish &chips; ok"), "fish &chips; ok");
        assert_eq!(strip_markup("A & B"), "A & B");
    }

    #[test]
    fn test_unclosed_tag_kept() {
        assert_eq!(strip_markup("1 < 2"), "1 < 2");
    }

    #[test]
    fn test_comparison_operators_survive() {
        assert_eq!(strip_markup("Is 3 < 5 and 7 > 4?"), "Is 3 < 5 and 7 > 4?");
        assert_eq!(strip_markup("x <= y <b>and</b> y >= z"), "x <= y and y >= z");
        assert_eq!(strip_markup("a<1 && b>2"), "a<1 && b>2");
    }

    #[test]
    fn test_closing_and_comment_tags_dropped() {
        assert_eq!(strip_markup("<p>hi</p><!-- note -->"), "hi");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(strip_markup("plain text"), "plain text");
        assert_eq!(strip_markup(""), "");
    }

    #[test]
    fn test_option_labels() {
        assert_eq!(option_label(0), 'A');
        assert_eq!(option_label(3), 'D');
    }

    #[test]
    fn test_option_index_for_key() {
        assert_eq!(option_index_for_key('a', 4), Some(0));
        assert_eq!(option_index_for_key('D', 4), Some(3));
        assert_eq!(option_index_for_key('2', 4), Some(1));
        assert_eq!(option_index_for_key('e', 4), None);
        assert_eq!(option_index_for_key('0', 4), None);
        assert_eq!(option_index_for_key('?', 4), None);
    }

    #[test]
    fn test_shortcuts_stop_before_command_letters() {
        assert_eq!(option_index_for_key('i', 12), Some(8));
        assert_eq!(option_index_for_key('9', 12), Some(8));
        for c in ['j', 'k', 'l', 'n', 'q', 'r', 's', 'J'] {
            assert_eq!(option_index_for_key(c, 26), None, "{c}");
        }
    }
}
