//! Exact decimal string scaling.
//!
//! Amounts arrive as user supplied decimal strings. They are scaled to integers digit by digit,
//! never through floating point. Fractional digits past the scale are rounded half-up, which is
//! half-away-from-zero since only non-negative amounts are accepted.

// self
use crate::prelude::*;

/// Scale of the native currency, 1 CKB = `10^8` shannons.
pub const CKB_DECIMALS: u8 = 8;

/// Parse `amount` into an integer of `10^-decimals` units.
pub fn parse(amount: &str, decimals: u8) -> Result<u128> {
	let out_of_range =
		|reason| AmountError::OutOfRange { amount: amount.to_owned(), reason };
	let s = amount.trim();
	let (int, frac) = s.split_once('.').unwrap_or((s, ""));

	if int.is_empty() && frac.is_empty() {
		return Err(out_of_range("not a number").into());
	}
	if !int.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
		return Err(out_of_range("not a non-negative decimal number").into());
	}

	let decimals = decimals as usize;
	let (kept, dropped) = frac.split_at(frac.len().min(decimals));
	let padding = decimals - kept.len();
	let mut value = 0_u128;

	for d in int.bytes().chain(kept.bytes()).chain(std::iter::repeat(b'0').take(padding)) {
		value = value
			.checked_mul(10)
			.and_then(|v| v.checked_add((d - b'0') as u128))
			.ok_or_else(|| out_of_range("exceeds 128 bits"))?;
	}

	if dropped.bytes().any(|b| b != b'0') {
		if dropped.as_bytes()[0] >= b'5' {
			value = value.checked_add(1).ok_or_else(|| out_of_range("exceeds 128 bits"))?;
		}

		tracing::warn!("{amount:?} has more than {decimals} decimal places, rounded to {value}");
	}

	Ok(value)
}
#[test]
fn parse_should_work() {
	assert_eq!(parse("1.5", 8).unwrap(), 150_000_000);
	assert_eq!(parse("100", 8).unwrap(), 10_000_000_000);
	assert_eq!(parse(" 200 ", 8).unwrap(), 20_000_000_000);
	assert_eq!(parse(".5", 1).unwrap(), 5);
	assert_eq!(parse("5.", 0).unwrap(), 5);
	assert_eq!(parse("0", 18).unwrap(), 0);
	assert_eq!(parse("0.1", 18).unwrap(), 100_000_000_000_000_000);
	assert_eq!(parse("1.2300", 2).unwrap(), 123);
	assert_eq!(parse(&u128::MAX.to_string(), 0).unwrap(), u128::MAX);
}
#[test]
fn parse_should_round_half_up() {
	assert_eq!(parse("0.000000015", 8).unwrap(), 2);
	assert_eq!(parse("0.000000014", 8).unwrap(), 1);
	assert_eq!(parse("0.5", 0).unwrap(), 1);
	assert_eq!(parse("0.49999", 0).unwrap(), 0);
	assert_eq!(parse("1.0000000001", 8).unwrap(), 100_000_000);
	// Binary floating point turns this into 0.29 * 100 = 28.999999999999996.
	assert_eq!(parse("0.29", 2).unwrap(), 29);
}
#[test]
fn parse_should_reject_invalid_amounts() {
	["", " ", ".", "-1", "+1", "1e5", "abc", "1.2.3", "1,5", "0x10"].iter().for_each(|a| {
		assert!(
			matches!(parse(a, 8), Err(Error::Amount(AmountError::OutOfRange { .. }))),
			"{a:?} should be rejected"
		);
	});

	let too_large = "340282366920938463463374607431768211456";

	assert!(matches!(
		parse(too_large, 0),
		Err(Error::Amount(AmountError::OutOfRange { reason: "exceeds 128 bits", .. }))
	));
	assert!(parse(&u128::MAX.to_string(), 1).is_err());
	assert!(parse(&format!("{}.9", u128::MAX), 0).is_err());
}

/// Render `value` in `10^-decimals` units as a decimal string without trailing zeros.
pub fn format(value: u128, decimals: u8) -> String {
	let s = value.to_string();
	let decimals = decimals as usize;

	if decimals == 0 {
		return s;
	}

	let s = format!("{s:0>width$}", width = decimals + 1);
	let (int, frac) = s.split_at(s.len() - decimals);
	let frac = frac.trim_end_matches('0');

	if frac.is_empty() {
		int.to_owned()
	} else {
		format!("{int}.{frac}")
	}
}
#[test]
fn format_should_work() {
	assert_eq!(format(150_000_000, 8), "1.5");
	assert_eq!(format(10_000_000_000, 8), "100");
	assert_eq!(format(5, 8), "0.00000005");
	assert_eq!(format(0, 8), "0");
	assert_eq!(format(7, 0), "7");
	assert_eq!(format(123, 2), "1.23");
	assert_eq!(format(parse("12.345", 3).unwrap(), 3), "12.345");
}
