// Irap regular-surface codec
//
// Licensed under MIT license, or Apache 2 license,
// at your option. Please see the LICENSE file
// attached to this source distribution for details.

/*!
The binary ("grd") Irap variant.

A Fortran unformatted sequential stream on a big-endian ABI: each
logical record is bracketed by a 4-byte length prefix and an identical
suffix. Three fixed header records (R1/R2/R3) are followed by a
variable number of value records carrying the column-major samples.
*/

use std::io::Cursor as IoCursor;
use std::path::Path;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::byteio::{Buffer, BufferSink, ByteSink, ByteSource, FileSink, MappedFile};
use crate::error::{IrapError, TruncatedKind};
use crate::header::Header;
use crate::surface::{Grid, Surface};

const MAGIC: i32 = -996;
const SENTINEL: f32 = 9999900.0;
const R1_LEN: u32 = 32;
const R2_LEN: u32 = 16;
const R3_LEN: u32 = 28;

fn is_sentinel(bits: u32) -> bool {
	bits == SENTINEL.to_bits()
}

/// Reads one Fortran record: a length-prefixed, length-suffixed payload.
/// Implements the decode side of the `ReadPrefix -> ReadPayload ->
/// ReadSuffix -> Validate` state machine.
fn read_record<'a>(source: &'a dyn ByteSource, pos: &mut usize) -> Result<&'a [u8], IrapError> {
	let prefix_bytes = source.read_exact(*pos, 4).map_err(|_| IrapError::Truncated { kind: TruncatedKind::Buffer, offset: *pos })?;
	let prefix = u32::from_be_bytes(prefix_bytes.try_into().unwrap());
	*pos += 4;

	let payload = source.read_exact(*pos, prefix as usize).map_err(|_| IrapError::Truncated { kind: TruncatedKind::Fill, offset: *pos })?;
	*pos += prefix as usize;

	let suffix_bytes = source.read_exact(*pos, 4).map_err(|_| IrapError::Truncated { kind: TruncatedKind::Buffer, offset: *pos })?;
	let suffix = u32::from_be_bytes(suffix_bytes.try_into().unwrap());
	*pos += 4;

	if prefix != suffix {
		return Err(IrapError::RecordFrame { prefix, suffix, offset: *pos });
	}
	Ok(payload)
}

fn write_record(sink: &mut dyn ByteSink, payload: &[u8]) -> Result<(), IrapError> {
	let len = payload.len() as u32;
	let mut framed = Vec::with_capacity(payload.len() + 8);
	framed.write_u32::<BigEndian>(len)?;
	framed.extend_from_slice(payload);
	framed.write_u32::<BigEndian>(len)?;
	sink.write_all(&framed)
}

/// Decodes a binary Irap stream from any `ByteSource`.
pub fn decode_binary(source: &dyn ByteSource) -> Result<Surface, IrapError> {
	let mut pos = 0usize;

	let r1 = read_record(source, &mut pos)?;
	if r1.len() as u32 != R1_LEN {
		return Err(IrapError::RecordFrame { prefix: r1.len() as u32, suffix: R1_LEN, offset: 0 });
	}
	let mut c = IoCursor::new(r1);
	let magic = c.read_i32::<BigEndian>()?;
	if magic != MAGIC {
		return Err(IrapError::BadMagic { found: magic as i64, offset: 4 });
	}
	let nrow = c.read_i32::<BigEndian>()?;
	let xori = c.read_f32::<BigEndian>()? as f64;
	let xmax = c.read_f32::<BigEndian>()? as f64;
	let yori = c.read_f32::<BigEndian>()? as f64;
	let ymax = c.read_f32::<BigEndian>()? as f64;
	let xinc = c.read_f32::<BigEndian>()? as f64;
	let yinc = c.read_f32::<BigEndian>()? as f64;

	let r2 = read_record(source, &mut pos)?;
	if r2.len() as u32 != R2_LEN {
		return Err(IrapError::RecordFrame { prefix: r2.len() as u32, suffix: R2_LEN, offset: pos });
	}
	let mut c = IoCursor::new(r2);
	let ncol = c.read_i32::<BigEndian>()?;
	let rot = c.read_f32::<BigEndian>()? as f64;
	let xrot = c.read_f32::<BigEndian>()? as f64;
	let yrot = c.read_f32::<BigEndian>()? as f64;

	let r3 = read_record(source, &mut pos)?;
	if r3.len() as u32 != R3_LEN {
		return Err(IrapError::RecordFrame { prefix: r3.len() as u32, suffix: R3_LEN, offset: pos });
	}

	if ncol < 1 || nrow < 1 {
		return Err(IrapError::BadShape { reason: format!("ncol and nrow must be >= 1, got {}x{}", ncol, nrow) });
	}
	let header = Header { ncol, nrow, xori, yori, xinc, yinc, xmax, ymax, rot, xrot, yrot };
	header.validate()?;

	let ncol = header.ncol as usize;
	let nrow = header.nrow as usize;
	let total = ncol * nrow;
	let mut flat = Vec::with_capacity(total);

	log::trace!("decode_binary: header parsed, filling {} samples", total);

	while flat.len() < total {
		let record = read_record(source, &mut pos)?;
		if record.len() % 4 != 0 {
			return Err(IrapError::Truncated { kind: TruncatedKind::Fill, offset: pos });
		}
		let mut c = IoCursor::new(record);
		let count = record.len() / 4;
		for _ in 0..count {
			if flat.len() >= total {
				return Err(IrapError::Truncated { kind: TruncatedKind::Fill, offset: pos });
			}
			let bits = c.read_u32::<BigEndian>()?;
			let v = if is_sentinel(bits) { f32::NAN } else { f32::from_bits(bits) };
			flat.push(v);
		}
	}

	if flat.len() != total {
		return Err(IrapError::Truncated { kind: TruncatedKind::Fill, offset: pos });
	}

	let values = Grid::from_column_major(flat, ncol, nrow);
	Surface::new(header, values)
}

/// Encodes `surface` as binary into any `ByteSink`. Values are chunked
/// at most `ncol` samples per record, one column per record.
pub fn encode_binary(surface: &Surface, sink: &mut dyn ByteSink) -> Result<(), IrapError> {
	let mut header = surface.header;
	header.validate()?;
	header.derive_maxes();

	log::trace!("encode_binary: header validated, emitting {}x{} values", header.ncol, header.nrow);

	let mut r1 = Vec::with_capacity(R1_LEN as usize);
	r1.write_i32::<BigEndian>(MAGIC)?;
	r1.write_i32::<BigEndian>(header.nrow)?;
	r1.write_f32::<BigEndian>(header.xori as f32)?;
	r1.write_f32::<BigEndian>(header.xmax as f32)?;
	r1.write_f32::<BigEndian>(header.yori as f32)?;
	r1.write_f32::<BigEndian>(header.ymax as f32)?;
	r1.write_f32::<BigEndian>(header.xinc as f32)?;
	r1.write_f32::<BigEndian>(header.yinc as f32)?;
	write_record(sink, &r1)?;

	let mut r2 = Vec::with_capacity(R2_LEN as usize);
	r2.write_i32::<BigEndian>(header.ncol)?;
	r2.write_f32::<BigEndian>(header.rot as f32)?;
	r2.write_f32::<BigEndian>(header.xrot as f32)?;
	r2.write_f32::<BigEndian>(header.yrot as f32)?;
	write_record(sink, &r2)?;

	let r3 = [0u8; R3_LEN as usize];
	write_record(sink, &r3)?;

	for col in 0..header.ncol as usize {
		let column = surface.values.column(col);
		let mut payload = Vec::with_capacity(column.len() * 4);
		for &v in column {
			let bits = if v.is_nan() { SENTINEL.to_bits() } else { v.to_bits() };
			payload.write_u32::<BigEndian>(bits)?;
		}
		write_record(sink, &payload)?;
	}

	Ok(())
}

/// Decodes a binary surface from an in-memory buffer.
pub fn decode_binary_buffer(bytes: &[u8]) -> Result<Surface, IrapError> {
	decode_binary(&Buffer::new(bytes))
}

/// Decodes a binary surface from a file path, memory-mapping it.
pub fn decode_binary_file(path: impl AsRef<Path>) -> Result<Surface, IrapError> {
	let mapped = MappedFile::open(path)?;
	decode_binary(&mapped)
}

/// Encodes a binary surface into a freshly allocated buffer.
pub fn encode_binary_buffer(surface: &Surface) -> Result<Vec<u8>, IrapError> {
	let mut sink = BufferSink::new();
	encode_binary(surface, &mut sink)?;
	Ok(sink.into_inner())
}

/// Encodes a binary surface to a file path, creating or truncating it.
pub fn encode_binary_file(surface: &Surface, path: impl AsRef<Path>) -> Result<(), IrapError> {
	let mut sink = FileSink::create(path)?;
	encode_binary(surface, &mut sink)?;
	sink.finish()
}
