// Irap regular-surface codec
//
// Licensed under MIT license, or Apache 2 license,
// at your option. Please see the LICENSE file
// attached to this source distribution for details.

/*!
Numeric lexing layer

Fast, allocation-free-per-token parsing and formatting of the decimal
tokens that make up the ASCII Irap variant: whitespace skipping, integer
and float reads, and the two fixed/general float formatters used on the
encode side.

Everything here operates on a `Cursor`, a small struct holding a
position into a borrowed byte slice -- the text-token analogue of the
bit-level `BitpackCursor` a binary bitstream decoder would use, just
advanced by whole tokens instead of bit counts.
*/

use crate::error::IrapError;

/// A cursor over a borrowed byte slice, advanced one token at a time.
pub struct Cursor<'a> {
	buf: &'a [u8],
	pos: usize,
}

fn is_ws(b: u8) -> bool {
	matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

impl<'a> Cursor<'a> {
	pub fn new(buf: &'a [u8]) -> Cursor<'a> {
		Cursor { buf, pos: 0 }
	}

	pub fn offset(&self) -> usize {
		self.pos
	}

	pub fn remaining(&self) -> usize {
		self.buf.len() - self.pos
	}

	pub fn at_end(&self) -> bool {
		self.pos >= self.buf.len()
	}

	/// Advances past ASCII whitespace. Idempotent; leaves `pos` at the
	/// first non-whitespace byte or at the end of the buffer.
	pub fn skip_ws(&mut self) {
		while self.pos < self.buf.len() && is_ws(self.buf[self.pos]) {
			self.pos += 1;
		}
	}

	fn token_end(&self, start: usize) -> usize {
		let mut end = start;
		while end < self.buf.len() && !is_ws(self.buf[end]) {
			end += 1;
		}
		end
	}

	/// Reads an optional sign followed by one or more ASCII digits.
	pub fn read_int(&mut self) -> Result<i64, IrapError> {
		self.skip_ws();
		if self.at_end() {
			return Err(IrapError::UnexpectedEof { offset: self.pos });
		}
		let start = self.pos;
		let end = self.token_end(start);
		let tok = &self.buf[start..end];
		let text = std::str::from_utf8(tok).map_err(|_| IrapError::NotAnInteger { offset: start })?;
		let digits_from = if text.starts_with('+') || text.starts_with('-') { 1 } else { 0 };
		if text.len() <= digits_from || !text[digits_from..].bytes().all(|b| b.is_ascii_digit()) {
			return Err(IrapError::NotAnInteger { offset: start });
		}
		let val: i64 = text.parse().map_err(|_| IrapError::NotAnInteger { offset: start })?;
		self.pos = end;
		Ok(val)
	}

	/// Reads a decimal float token: optional sign, integer part, optional
	/// `.` and fractional part (a leading `.` is allowed, e.g. `.5`), and
	/// an optional `[eE][+-]?digits` exponent. Rejects tokens with no
	/// digits at all.
	pub fn read_f64(&mut self) -> Result<f64, IrapError> {
		self.skip_ws();
		if self.at_end() {
			return Err(IrapError::UnexpectedEof { offset: self.pos });
		}
		let start = self.pos;
		let end = self.token_end(start);
		let tok = &self.buf[start..end];
		let text = std::str::from_utf8(tok).map_err(|_| IrapError::NotAFloat { offset: start })?;
		if !looks_like_float(text) {
			return Err(IrapError::NotAFloat { offset: start });
		}
		let val: f64 = text.parse().map_err(|_| IrapError::NotAFloat { offset: start })?;
		self.pos = end;
		Ok(val)
	}

	/// As `read_f64`, but rounds the result to the nearest `f32`.
	pub fn read_f32(&mut self) -> Result<f32, IrapError> {
		Ok(self.read_f64()? as f32)
	}
}

/// Validates the grammar described on `Cursor::read_f64` without relying
/// on `str::parse`'s own error for reporting (so offsets line up, and so
/// we can reject inputs `f64::from_str` would otherwise happily accept,
/// like bare exponents with no mantissa digits).
fn looks_like_float(text: &str) -> bool {
	let bytes = text.as_bytes();
	let mut i = 0;
	if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
		i += 1;
	}
	let mut saw_digit = false;
	while i < bytes.len() && bytes[i].is_ascii_digit() {
		saw_digit = true;
		i += 1;
	}
	if i < bytes.len() && bytes[i] == b'.' {
		i += 1;
		while i < bytes.len() && bytes[i].is_ascii_digit() {
			saw_digit = true;
			i += 1;
		}
	}
	if !saw_digit {
		return false;
	}
	if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
		i += 1;
		if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
			i += 1;
		}
		let mut saw_exp_digit = false;
		while i < bytes.len() && bytes[i].is_ascii_digit() {
			saw_exp_digit = true;
			i += 1;
		}
		if !saw_exp_digit {
			return false;
		}
	}
	i == bytes.len()
}

/// Emits `x` using `"%.4f"` semantics: round-half-to-even, exactly four
/// fractional digits, no exponent, a leading sign only when negative.
/// `NaN` is rejected -- sentinel substitution is the caller's job.
pub fn format_f32_fixed(x: f32) -> String {
	assert!(!x.is_nan(), "format_f32_fixed does not accept NaN; substitute the sentinel first");
	format!("{:.4}", x as f64)
}

/// Emits a shortest round-trippable `f64` representation, used for
/// header fields (which may carry far more precision than a value
/// sample ever does, e.g. rotation centers down to `1e-73`).
pub fn format_f64_general(x: f64) -> String {
	let mut s = format!("{}", x);
	if !s.contains('.') && !s.contains('e') && !s.contains("inf") && !s.contains("NaN") {
		s.push_str(".0");
	}
	s
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn skip_ws_is_idempotent_and_handles_all_whitespace_bytes() {
		let mut c = Cursor::new(b" \t\n\r\x0b\x0cx");
		c.skip_ws();
		assert_eq!(c.offset(), 6);
		c.skip_ws();
		assert_eq!(c.offset(), 6);
	}

	#[test]
	fn read_int_parses_sign_and_digits() {
		let mut c = Cursor::new(b"  -42 7");
		assert_eq!(c.read_int().unwrap(), -42);
		assert_eq!(c.read_int().unwrap(), 7);
	}

	#[test]
	fn read_int_rejects_non_digit() {
		let mut c = Cursor::new(b"not_a_number");
		assert!(matches!(c.read_int(), Err(IrapError::NotAnInteger { .. })));
	}

	#[test]
	fn read_int_at_eof_is_unexpected_eof() {
		let mut c = Cursor::new(b"   ");
		assert!(matches!(c.read_int(), Err(IrapError::UnexpectedEof { .. })));
	}

	#[test]
	fn read_f64_accepts_leading_decimal_point() {
		let mut c = Cursor::new(b".5");
		assert_eq!(c.read_f64().unwrap(), 0.5);
	}

	#[test]
	fn read_f64_accepts_exponents() {
		let mut c = Cursor::new(b"2.610356564800451e-73");
		assert!((c.read_f64().unwrap() - 2.610356564800451e-73).abs() < 1e-88);
	}

	#[test]
	fn read_f64_rejects_no_digits_at_all() {
		let mut c = Cursor::new(b".");
		assert!(matches!(c.read_f64(), Err(IrapError::NotAFloat { .. })));
		let mut c = Cursor::new(b"e10");
		assert!(matches!(c.read_f64(), Err(IrapError::NotAFloat { .. })));
	}

	#[test]
	fn read_f64_rejects_bare_exponent_marker() {
		let mut c = Cursor::new(b"1.5e");
		assert!(matches!(c.read_f64(), Err(IrapError::NotAFloat { .. })));
	}

	#[test]
	fn read_f32_rounds_to_nearest_even() {
		let mut c = Cursor::new(b"9999900.0000");
		assert_eq!(c.read_f32().unwrap(), 9999900.0_f32);
	}

	#[test]
	fn format_f32_fixed_has_four_fractional_digits() {
		assert_eq!(format_f32_fixed(1.0), "1.0000");
		assert_eq!(format_f32_fixed(-0.125), "-0.1250");
	}

	#[test]
	#[should_panic]
	fn format_f32_fixed_rejects_nan() {
		format_f32_fixed(f32::NAN);
	}

	#[test]
	fn format_f64_general_round_trips_tiny_values() {
		let s = format_f64_general(2.610356564800451e-73);
		let back: f64 = s.parse().unwrap();
		assert_eq!(back, 2.610356564800451e-73);
	}

	#[test]
	fn format_f64_general_keeps_a_decimal_point_on_integers() {
		assert_eq!(format_f64_general(2.0), "2.0");
	}
}
