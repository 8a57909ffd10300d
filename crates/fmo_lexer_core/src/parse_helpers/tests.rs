use super::*;

#[test]
fn plain_digits() {
    assert_eq!(parse_int_or_zero(b"42"), 42);
}

#[test]
fn leading_whitespace_is_skipped() {
    assert_eq!(parse_int_or_zero(b"   96"), 96);
    assert_eq!(parse_int_or_zero(b"\t 7"), 7);
}

#[test]
fn trailing_garbage_is_ignored() {
    assert_eq!(parse_int_or_zero(b"12abc"), 12);
    assert_eq!(parse_int_or_zero(b"    3    2"), 3);
    assert_eq!(parse_int_or_zero(b"5\r\n"), 5);
}

#[test]
fn signs() {
    assert_eq!(parse_int_or_zero(b"-15"), -15);
    assert_eq!(parse_int_or_zero(b"+15"), 15);
    assert_eq!(parse_int_or_zero(b" -0"), 0);
}

#[test]
fn no_digits_is_zero() {
    assert_eq!(parse_int_or_zero(b"abc"), 0);
    assert_eq!(parse_int_or_zero(b""), 0);
    assert_eq!(parse_int_or_zero(b"-"), 0);
    assert_eq!(parse_int_or_zero(b"   "), 0);
    assert_eq!(parse_int_or_zero(b"- 5"), 0);
}

#[test]
fn overflow_saturates() {
    assert_eq!(parse_int_or_zero(b"99999999999999999999999"), i64::MAX);
    assert_eq!(parse_int_or_zero(b"-99999999999999999999999"), i64::MIN);
}

#[test]
fn count_treats_negative_as_zero() {
    assert_eq!(parse_count_or_zero(b"-4"), 0);
    assert_eq!(parse_count_or_zero(b"abc"), 0);
    assert_eq!(parse_count_or_zero(b"  12"), 12);
}
