// Irap regular-surface codec
//
// Licensed under MIT license, or Apache 2 license,
// at your option. Please see the LICENSE file
// attached to this source distribution for details.

/*!
Header decoding

The geometric header shared by both Irap variants: a fixed set of
scalars describing the grid's extents, origin, spacing, and rotation.
This module only covers the in-memory representation and its
invariants; the byte-level grammar for reading/writing it lives in
`ascii` and `binary`.
*/

use crate::error::IrapError;

/// The geometric header of an Irap surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Header {
	pub ncol: i32,
	pub nrow: i32,
	pub xori: f64,
	pub yori: f64,
	pub xinc: f64,
	pub yinc: f64,
	pub xmax: f64,
	pub ymax: f64,
	pub rot: f64,
	pub xrot: f64,
	pub yrot: f64,
}

impl Header {
	/// Builds a header with `xmax`/`ymax` derived from origin/increment,
	/// and `xrot`/`yrot` defaulting to `(xori, yori)`.
	pub fn new(ncol: i32, nrow: i32, xori: f64, yori: f64, xinc: f64, yinc: f64, rot: f64) -> Header {
		let mut hdr = Header {
			ncol, nrow, xori, yori, xinc, yinc,
			xmax: 0.0, ymax: 0.0,
			rot, xrot: xori, yrot: yori,
		};
		hdr.derive_maxes();
		hdr
	}

	/// Sets `xmax`/`ymax` from the origin, increment and extents. Called
	/// by the encoders before emission; on decode, stored values are
	/// kept as-is (some producers write them non-canonically).
	pub fn derive_maxes(&mut self) {
		self.xmax = self.xori + (self.ncol as f64 - 1.0) * self.xinc;
		self.ymax = self.yori + (self.nrow as f64 - 1.0) * self.yinc;
	}

	/// Checks extent positivity. Called at the entry of every encode
	/// operation.
	pub fn validate(&self) -> Result<(), IrapError> {
		if self.ncol < 1 {
			return Err(IrapError::BadShape { reason: format!("ncol must be >= 1, got {}", self.ncol) });
		}
		if self.nrow < 1 {
			return Err(IrapError::BadShape { reason: format!("nrow must be >= 1, got {}", self.nrow) });
		}
		if !(self.xinc > 0.0) {
			return Err(IrapError::BadShape { reason: format!("xinc must be > 0, got {}", self.xinc) });
		}
		if !(self.yinc > 0.0) {
			return Err(IrapError::BadShape { reason: format!("yinc must be > 0, got {}", self.yinc) });
		}
		Ok(())
	}

	pub fn sample_count(&self) -> usize {
		self.ncol as usize * self.nrow as usize
	}
}

/// Compares two headers the way round-trip tests do: `ncol`/`nrow`
/// exactly, every float field within `1e-12` absolute.
pub fn headers_equal(a: &Header, b: &Header) -> bool {
	if a.ncol != b.ncol || a.nrow != b.nrow {
		return false;
	}
	const EPS: f64 = 1e-12;
	let close = |x: f64, y: f64| (x - y).abs() <= EPS;
	close(a.xori, b.xori) && close(a.yori, b.yori)
		&& close(a.xinc, b.xinc) && close(a.yinc, b.yinc)
		&& close(a.xmax, b.xmax) && close(a.ymax, b.ymax)
		&& close(a.rot, b.rot) && close(a.xrot, b.xrot) && close(a.yrot, b.yrot)
}
