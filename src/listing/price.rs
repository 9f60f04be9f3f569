use crate::ParseError;

/// Parses a scraped price such as `"12 500 грн"` into its integer amount
///
/// Whitespace (including non-breaking spaces) is removed first, then the
/// text is cut at the first occurrence of `currency`.
///
/// # Errors
///
/// * `ParseError::MissingCurrency` - `currency` does not occur in the text
/// * `ParseError::InvalidNumber` - the text before the marker is not a number
///
/// # Example
///
/// ```
/// use kvartal::listing::parse_price;
///
/// assert_eq!(parse_price("12 500грн", "грн").unwrap(), 12500);
/// ```
pub fn parse_price(raw: &str, currency: &str) -> Result<u64, ParseError> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    let end = compact
        .find(currency)
        .ok_or_else(|| ParseError::MissingCurrency {
            marker: currency.to_string(),
            raw: raw.to_string(),
        })?;

    compact[..end]
        .parse::<u64>()
        .map_err(|_| ParseError::InvalidNumber {
            raw: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_with_grouping_space() {
        assert_eq!(parse_price("12 500грн", "грн"), Ok(12500));
    }

    #[test]
    fn test_parse_price_with_surrounding_whitespace() {
        assert_eq!(parse_price("\n  8\u{a0}000 грн / міс.\n", "грн"), Ok(8000));
    }

    #[test]
    fn test_parse_price_missing_currency() {
        assert!(matches!(
            parse_price("12 500 $", "грн"),
            Err(ParseError::MissingCurrency { .. })
        ));
    }

    #[test]
    fn test_parse_price_not_numeric() {
        assert!(matches!(
            parse_price("Договірна грн", "грн"),
            Err(ParseError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_price("грн", "грн"),
            Err(ParseError::InvalidNumber { .. })
        ));
    }
}
