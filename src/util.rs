//! Shared utility functions used across the codebase.

/// Parse a boolean-ish string.
///
/// Recognises `1`, `true`, `yes`, `y`, `on` (case-insensitive) as `true`;
/// everything else maps to `false`.
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// Whether an interactive yes/no answer is affirmative (`y` or `yes`).
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Shorten an identifier to `front....back` when it is longer than both parts.
pub fn shorten(value: &str, front: usize, back: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= front + back {
        return value.to_string();
    }
    let head: String = chars[..front].iter().collect();
    let tail: String = chars[chars.len() - back..].iter().collect();
    format!("{}....{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_accepts_common_truthy_values() {
        for v in ["1", "true", "YES", " y ", "On"] {
            assert!(parse_bool(v), "{v} should be true");
        }
        for v in ["0", "false", "no", "", "maybe"] {
            assert!(!parse_bool(v), "{v} should be false");
        }
    }

    #[test]
    fn only_y_or_yes_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative(" Y\n"));
        assert!(is_affirmative("yes"));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("yep"));
    }

    #[test]
    fn shorten_keeps_short_values() {
        assert_eq!(shorten("abc", 6, 4), "abc");
        assert_eq!(shorten("0123456789", 6, 4), "0123456789");
    }

    #[test]
    fn shorten_elides_middle() {
        assert_eq!(shorten("0123456789abcdef", 6, 4), "012345....cdef");
    }
}
