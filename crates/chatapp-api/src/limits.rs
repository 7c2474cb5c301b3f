use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaxMessagesError {
    #[error("Invalid number. Try again.")]
    NotANumber(String),

    #[error("Please enter a positive number.")]
    NotPositive(i32),
}

/// Parses the per-batch message limit. Surrounding whitespace is ignored;
/// the value must fit a signed 32-bit integer and be at least 1.
pub fn parse_max_messages(input: &str) -> Result<u32, MaxMessagesError> {
    let n: i32 = input
        .trim()
        .parse()
        .map_err(|_| MaxMessagesError::NotANumber(input.to_string()))?;
    if n <= 0 {
        return Err(MaxMessagesError::NotPositive(n));
    }
    Ok(n as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_numbers() {
        assert_eq!(parse_max_messages("3"), Ok(3));
        assert_eq!(parse_max_messages("  12 \n"), Ok(12));
        assert_eq!(parse_max_messages("+4"), Ok(4));
        assert_eq!(parse_max_messages("2147483647"), Ok(i32::MAX as u32));
    }

    #[test]
    fn rejects_zero_and_negatives() {
        assert_eq!(parse_max_messages("0"), Err(MaxMessagesError::NotPositive(0)));
        assert_eq!(parse_max_messages("-5"), Err(MaxMessagesError::NotPositive(-5)));
    }

    #[test]
    fn rejects_non_numbers() {
        for input in ["", "abc", "3.5", "2147483648", "1 2"] {
            assert_eq!(
                parse_max_messages(input),
                Err(MaxMessagesError::NotANumber(input.to_string())),
                "{input:?}"
            );
        }
    }
}
