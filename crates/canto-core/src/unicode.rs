//! Character-level helpers shared by the romanizer and phrase substituter.

/// CJK Unified Ideographs plus Extension A and B. Covers every character the
/// bundled tables use.
pub fn is_han(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
}

pub fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Characters the romanizer copies through when the table has no entry:
/// ASCII letters, ASCII digits and any whitespace.
pub fn is_passthrough(c: char) -> bool {
    is_latin(c) || c.is_ascii_digit() || c.is_whitespace()
}

/// Characters accepted in a hand-typed romanization field.
pub fn is_romanization_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace()
}

/// Collapse every whitespace run into a single ASCII space and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Number of characters (not bytes) in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  m4   goi1 "), "m4 goi1");
        assert_eq!(collapse_whitespace("a\t\nb"), "a b");
        assert_eq!(collapse_whitespace("a\u{3000}b"), "a b");
        assert_eq!(collapse_whitespace("   "), "");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_char_classification() {
        assert!(is_han('粵'));
        assert!(!is_han('a'));
        assert!(!is_han('，'));
        assert!(is_passthrough('Z'));
        assert!(is_passthrough('7'));
        assert!(is_passthrough(' '));
        assert!(is_passthrough('\u{3000}'));
        assert!(!is_passthrough('?'));
        assert!(!is_passthrough('é'));
        assert!(!is_passthrough('７'));
    }

    #[test]
    fn test_romanization_char() {
        assert!("nei5 hou2".chars().all(is_romanization_char));
        assert!(!"nei5?".chars().all(is_romanization_char));
    }

    #[test]
    fn test_char_len() {
        assert_eq!(char_len("唔該"), 2);
        assert_eq!(char_len("ab"), 2);
        assert_eq!(char_len(""), 0);
    }
}
