// Irap regular-surface codec
//
// Licensed under MIT license, or Apache 2 license,
// at your option. Please see the LICENSE file
// attached to this source distribution for details.

/*!
The ASCII ("classic") Irap variant.

A sequence of whitespace-separated decimal tokens: a 19-token header
followed by `ncol * nrow` value tokens in column-major order. See
`lex` for the token grammar and `header` for the geometric fields.
*/

use std::path::Path;

use crate::byteio::{Buffer, BufferSink, ByteSink, ByteSource, FileSink, MappedFile};
use crate::error::{IrapError, TruncatedKind};
use crate::header::Header;
use crate::lex::{format_f32_fixed, format_f64_general, Cursor};
use crate::surface::{Grid, Surface};

const MAGIC: i64 = -996;
const SENTINEL: f32 = 9999900.0;
const MAX_VALUES_PER_LINE: usize = 9;

/// Wraps an `UnexpectedEof` hit past the very first header token as a
/// `Truncated{EndOfFile}` -- only a source that has produced nothing at
/// all surfaces the bare `UnexpectedEof`.
fn header_token<T>(result: Result<T, IrapError>) -> Result<T, IrapError> {
	match result {
		Err(IrapError::UnexpectedEof { offset }) => Err(IrapError::Truncated { kind: TruncatedKind::EndOfFile, offset }),
		other => other,
	}
}

/// Decodes an ASCII Irap stream from any `ByteSource`.
pub fn decode_ascii(source: &dyn ByteSource) -> Result<Surface, IrapError> {
	let buf = source.as_slice();
	let mut cur = Cursor::new(buf);

	let magic = cur.read_int()?;
	if magic != MAGIC {
		return Err(IrapError::BadMagic { found: magic, offset: 0 });
	}
	let nrow = header_token(cur.read_int())?;
	let xinc = header_token(cur.read_f64())?;
	let yinc = header_token(cur.read_f64())?;
	let xori = header_token(cur.read_f64())?;
	let xmax = header_token(cur.read_f64())?;
	let yori = header_token(cur.read_f64())?;
	let ymax = header_token(cur.read_f64())?;
	let ncol = header_token(cur.read_int())?;
	let rot = header_token(cur.read_f64())?;
	let xrot = header_token(cur.read_f64())?;
	let yrot = header_token(cur.read_f64())?;
	for _ in 0..7 {
		header_token(cur.read_int())?;
	}

	if ncol < 1 || nrow < 1 {
		return Err(IrapError::BadShape { reason: format!("ncol and nrow must be >= 1, got {}x{}", ncol, nrow) });
	}

	let header = Header { ncol: ncol as i32, nrow: nrow as i32, xori, yori, xinc, yinc, xmax, ymax, rot, xrot, yrot };
	header.validate()?;

	let ncol = header.ncol as usize;
	let nrow = header.nrow as usize;
	let mut values = Grid::filled_with_nan(ncol, nrow);

	log::trace!("decode_ascii: header parsed, filling {}x{} values", ncol, nrow);

	for col in 0..ncol {
		for row in 0..nrow {
			let v = match cur.read_f32() {
				Ok(v) => v,
				Err(IrapError::UnexpectedEof { offset }) => {
					return Err(IrapError::Truncated { kind: TruncatedKind::EndOfFile, offset });
				},
				Err(e) => return Err(e),
			};
			let v = if v == SENTINEL { f32::NAN } else { v };
			values.set(col, row, v);
		}
	}

	Surface::new(header, values)
}

/// Encodes `surface` as ASCII into any `ByteSink`.
pub fn encode_ascii(surface: &Surface, sink: &mut dyn ByteSink) -> Result<(), IrapError> {
	let mut header = surface.header;
	header.validate()?;
	header.derive_maxes();

	log::trace!("encode_ascii: header validated, emitting {}x{} values", header.ncol, header.nrow);

	let mut out = String::new();
	out.push_str(&format!("{} {} {} {}\n", MAGIC, header.nrow, format_f64_general(header.xinc), format_f64_general(header.yinc)));
	out.push_str(&format!(
		"{} {} {} {}\n",
		format_f64_general(header.xori), format_f64_general(header.xmax),
		format_f64_general(header.yori), format_f64_general(header.ymax)
	));
	out.push_str(&format!(
		"{} {} {} {}\n",
		header.ncol, format_f64_general(header.rot),
		format_f64_general(header.xrot), format_f64_general(header.yrot)
	));
	out.push_str("0 0 0 0 0 0 0\n");

	let ncol = header.ncol as usize;
	let nrow = header.nrow as usize;
	let mut on_line = 0usize;
	for col in 0..ncol {
		for row in 0..nrow {
			let v = surface.values.get(col, row);
			let token = if v.is_nan() { format_f32_fixed(SENTINEL) } else { format_f32_fixed(v) };
			if on_line > 0 {
				out.push(if on_line == MAX_VALUES_PER_LINE { '\n' } else { ' ' });
				if on_line == MAX_VALUES_PER_LINE {
					on_line = 0;
				}
			}
			out.push_str(&token);
			on_line += 1;
		}
	}
	out.push('\n');

	sink.write_all(out.as_bytes())
}

/// Decodes an ASCII surface from a UTF-8/ASCII string.
pub fn decode_ascii_str(text: &str) -> Result<Surface, IrapError> {
	decode_ascii(&Buffer::new(text.as_bytes()))
}

/// Decodes an ASCII surface from an in-memory buffer.
pub fn decode_ascii_buffer(bytes: &[u8]) -> Result<Surface, IrapError> {
	decode_ascii(&Buffer::new(bytes))
}

/// Decodes an ASCII surface from a file path, memory-mapping it.
pub fn decode_ascii_file(path: impl AsRef<Path>) -> Result<Surface, IrapError> {
	let mapped = MappedFile::open(path)?;
	decode_ascii(&mapped)
}

/// Encodes an ASCII surface into a freshly allocated buffer.
pub fn encode_ascii_buffer(surface: &Surface) -> Result<Vec<u8>, IrapError> {
	let mut sink = BufferSink::new();
	encode_ascii(surface, &mut sink)?;
	Ok(sink.into_inner())
}

/// Encodes an ASCII surface to a file path, creating or truncating it.
pub fn encode_ascii_file(surface: &Surface, path: impl AsRef<Path>) -> Result<(), IrapError> {
	let mut sink = FileSink::create(path)?;
	encode_ascii(surface, &mut sink)?;
	sink.finish()
}
