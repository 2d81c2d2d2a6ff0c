// Irap regular-surface codec
//
// Licensed under MIT license, or Apache 2 license,
// at your option. Please see the LICENSE file
// attached to this source distribution for details.

/*!
The error taxonomy shared by every codec entry point.

There is one flat enum rather than a per-module split, because unlike a
multi-packet-type bitstream decoder this crate only ever reports failures
for a single protocol (an Irap stream, in one of two variants). Each
`Display` arm is written to contain the substrings downstream callers are
known to match on (see spec section 9): `"end of file"`, `"fill"`,
`"memory map"`, `"float"`, `"parsing"`, `"invalid"`, `"digit"`.
*/

use std::error;
use std::fmt;
use std::io;

/// The three ways a decode can run out of data before filling
/// everything it needs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncatedKind {
	/// Hit the end of the source while still expecting header or value tokens.
	EndOfFile,
	/// The values grid could not be filled to `ncol * nrow` samples.
	Fill,
	/// A fixed-size buffer ran out before a declared record could be read.
	Buffer,
}

/// Why a zero-byte (or otherwise unmappable) file could not be memory-mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapErrorKind {
	/// The file is zero bytes long; some platforms refuse to map an
	/// empty range, so this crate raises the error itself rather than
	/// letting the behavior vary by platform.
	Empty,
}

/// Errors that can occur while decoding or encoding an Irap stream.
#[derive(Debug)]
pub enum IrapError {
	/// The leading magic integer was not `-996`.
	BadMagic { found: i64, offset: usize },
	/// An integer token did not start with a sign or digit.
	NotAnInteger { offset: usize },
	/// A float token had no digits at all.
	NotAFloat { offset: usize },
	/// The source ran out while a token or record was still being read.
	UnexpectedEof { offset: usize },
	/// Not enough data to fill the header or the values grid.
	Truncated { kind: TruncatedKind, offset: usize },
	/// A Fortran record's length prefix and suffix disagreed.
	RecordFrame { prefix: u32, suffix: u32, offset: usize },
	/// `ncol`/`nrow`/`xinc`/`yinc` violated the header invariants.
	BadShape { reason: String },
	/// A file could not be memory-mapped.
	MapError { kind: MapErrorKind },
	/// The underlying source or sink reported an I/O failure.
	Io(io::Error),
}

impl From<io::Error> for IrapError {
	fn from(err: io::Error) -> IrapError {
		IrapError::Io(err)
	}
}

impl error::Error for IrapError {
	fn source(&self) -> Option<&(dyn error::Error + 'static)> {
		match self {
			IrapError::Io(e) => Some(e),
			_ => None,
		}
	}
}

impl fmt::Display for IrapError {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		match self {
			IrapError::BadMagic { found, offset } => write!(fmt,
				"invalid magic number at byte {}: expected -996, found {}", offset, found),
			IrapError::NotAnInteger { offset } => write!(fmt,
				"invalid digit while parsing an integer at byte {}", offset),
			IrapError::NotAFloat { offset } => write!(fmt,
				"invalid float while parsing a number at byte {}", offset),
			IrapError::UnexpectedEof { offset } => write!(fmt,
				"unexpected end of file at byte {}", offset),
			IrapError::Truncated { kind, offset } => {
				let what = match kind {
					TruncatedKind::EndOfFile => "reached end of file before the values grid was filled",
					TruncatedKind::Fill => "could not fill the values grid to ncol * nrow samples",
					TruncatedKind::Buffer => "buffer exhausted before a record could be read",
				};
				write!(fmt, "truncated input at byte {}: {}", offset, what)
			},
			IrapError::RecordFrame { prefix, suffix, offset } => write!(fmt,
				"fortran record frame mismatch at byte {}: prefix {} != suffix {}", offset, prefix, suffix),
			IrapError::BadShape { reason } => write!(fmt,
				"invalid surface shape: {}", reason),
			IrapError::MapError { kind } => match kind {
				MapErrorKind::Empty => write!(fmt,
					"failed to create a memory map: file is zero bytes"),
			},
			IrapError::Io(e) => write!(fmt, "i/o error: {}", e),
		}
	}
}

pub type Result<T> = std::result::Result<T, IrapError>;
