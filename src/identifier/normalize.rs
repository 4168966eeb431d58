/// Commercial prefix ("Bookland") prepended when converting an ISBN-10
const ISBN13_PREFIX: &str = "978";

/// Converts a 10-digit ISBN into its 13-digit form
///
/// # Conversion Steps
///
/// 1. Prefix with `978`
/// 2. Keep the first 9 digits of the input (the ISBN-10 check digit is dropped)
/// 3. Weight the resulting 12 digits 1,3,1,3,... starting at position 0
/// 4. Check digit = `(10 - (sum mod 10)) mod 10`
///
/// Input that is not exactly 10 characters long is returned unchanged.
/// Callers only hand over identifiers the catalog tagged as ISBN-10, so a
/// wrong length passes through rather than failing.
///
/// # Examples
///
/// ```
/// use isbn_harvest::identifier::normalize_isbn10;
///
/// assert_eq!(normalize_isbn10("0306406152"), "9780306406157");
/// assert_eq!(normalize_isbn10("9780306406157"), "9780306406157");
/// ```
pub fn normalize_isbn10(id: &str) -> String {
    if id.chars().count() != 10 {
        return id.to_string();
    }

    let mut isbn13: String = ISBN13_PREFIX.to_string();
    isbn13.extend(id.chars().take(9));

    let sum: u32 = isbn13
        .chars()
        .enumerate()
        .map(|(position, c)| {
            let digit = c.to_digit(10).unwrap_or(0);
            if position % 2 == 0 {
                digit
            } else {
                digit * 3
            }
        })
        .sum();

    let check = (10 - (sum % 10)) % 10;
    isbn13.push_str(&check.to_string());
    isbn13
}

/// Returns true if a 13-digit ISBN carries a valid check digit
pub fn is_isbn13_checksum_valid(isbn: &str) -> bool {
    let digits: Vec<u32> = match isbn.chars().map(|c| c.to_digit(10)).collect() {
        Some(digits) => digits,
        None => return false,
    };

    if digits.len() != 13 {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(position, d)| if position % 2 == 0 { *d } else { d * 3 })
        .sum();

    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_conversion() {
        assert_eq!(normalize_isbn10("0306406152"), "9780306406157");
    }

    #[test]
    fn test_drops_isbn10_check_digit() {
        // ISBN-10 check digits may be 'X'; they never reach the output
        assert_eq!(normalize_isbn10("080442957X"), "9780804429573");
    }

    #[test]
    fn test_output_checksum_is_valid() {
        for id in ["0306406152", "0140449132", "0262033844", "1593278284", "080442957X"] {
            let isbn13 = normalize_isbn10(id);
            assert_eq!(isbn13.len(), 13, "Wrong length for {}", id);
            assert!(isbn13.starts_with("978"));
            assert!(
                is_isbn13_checksum_valid(&isbn13),
                "Invalid checksum for {} -> {}",
                id,
                isbn13
            );
        }
    }

    #[test]
    fn test_zero_check_digit() {
        // 978000000020 weighs to 40, so the check digit wraps to 0 and not 10
        let isbn13 = normalize_isbn10("0000000200");
        assert_eq!(isbn13, "9780000000200");
        assert!(is_isbn13_checksum_valid(&isbn13));
    }

    #[test]
    fn test_wrong_length_passes_through() {
        assert_eq!(normalize_isbn10(""), "");
        assert_eq!(normalize_isbn10("12345"), "12345");
        assert_eq!(normalize_isbn10("9780306406157"), "9780306406157");
        assert_eq!(normalize_isbn10("03064061521"), "03064061521");
    }

    #[test]
    fn test_checksum_validation() {
        assert!(is_isbn13_checksum_valid("9780306406157"));
        assert!(!is_isbn13_checksum_valid("9780306406158"));
        assert!(!is_isbn13_checksum_valid("978030640615"));
        assert!(!is_isbn13_checksum_valid("97803064061X5"));
    }
}
