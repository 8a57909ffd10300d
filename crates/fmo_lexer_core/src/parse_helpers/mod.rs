//! Lenient integer parsing for the counts that size later CPF sections.

/// Parse a leading decimal integer, returning 0 when there is none.
///
/// This is intentionally lenient and never fails:
///
/// - leading ASCII whitespace is skipped;
/// - an optional `+` or `-` sign is accepted;
/// - digits are read up to the first non-digit, and anything after is
///   ignored (`"12abc"` is 12);
/// - no digits at all (`"abc"`, `""`, `"-"`) gives 0;
/// - values beyond the `i64` range saturate.
///
/// A malformed count therefore shrinks a section to zero lines instead of
/// aborting the scan.
pub fn parse_int_or_zero(bytes: &[u8]) -> i64 {
    let mut rest = bytes;
    while let [first, tail @ ..] = rest {
        if first.is_ascii_whitespace() {
            rest = tail;
        } else {
            break;
        }
    }

    let negative = match rest.first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    for &b in rest.iter().take_while(|b| b.is_ascii_digit()) {
        let digit = i64::from(b - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// Parse a count with [`parse_int_or_zero`], treating negatives as zero.
pub fn parse_count_or_zero(bytes: &[u8]) -> usize {
    usize::try_from(parse_int_or_zero(bytes)).unwrap_or(0)
}

#[cfg(test)]
mod tests;
