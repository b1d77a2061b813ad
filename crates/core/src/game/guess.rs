//! Code parsing and formatting

/// Extract the decimal digits of `input`, in order
///
/// Intentionally permissive: every non-digit character is ignored and the
/// length is not enforced. "1-2-3", "1 2 3" and "123" all parse to
/// `[1, 2, 3]`; a guess of the wrong length simply never matches a code.
pub fn digits_of(input: &str) -> Vec<u8> {
    input
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as u8)
        .collect()
}

/// Whether a parsed guess matches the code element for element
pub fn matches_code(guess: &[u8], code: &[u8]) -> bool {
    guess == code
}

/// Render a code as "1-2-3"
pub fn format_code(code: &[u8]) -> String {
    code.iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_ignore_separators() {
        assert_eq!(digits_of("123"), vec![1, 2, 3]);
        assert_eq!(digits_of("1-2-3"), vec![1, 2, 3]);
        assert_eq!(digits_of(" 4, 1 and 2 "), vec![4, 1, 2]);
    }

    #[test]
    fn test_digits_do_not_enforce_length() {
        assert_eq!(digits_of("no digits"), Vec::<u8>::new());
        assert_eq!(digits_of("12"), vec![1, 2]);
        assert_eq!(digits_of("98765"), vec![9, 8, 7, 6, 5]);
    }

    #[test]
    fn test_match_is_elementwise() {
        assert!(matches_code(&[1, 2, 3], &[1, 2, 3]));
        assert!(!matches_code(&[3, 2, 1], &[1, 2, 3]));
        assert!(!matches_code(&[1, 2], &[1, 2, 3]));
        assert!(!matches_code(&[1, 2, 3, 4], &[1, 2, 3]));
    }

    #[test]
    fn test_format_code() {
        assert_eq!(format_code(&[2, 4, 1]), "2-4-1");
        assert_eq!(format_code(&[]), "");
    }
}
