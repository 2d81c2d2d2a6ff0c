// Irap regular-surface codec
//
// Licensed under MIT license, or Apache 2 license,
// at your option. Please see the LICENSE file
// attached to this source distribution for details.

/*!
Byte source / sink layer

A uniform interface over the places bytes can come from or go to: an
in-memory buffer, a memory-mapped file, or a streaming writer. Codecs
are written against the `ByteSource`/`ByteSink` traits so the same
decode/encode logic runs whether the caller handed over a `&[u8]` or a
path on disk.
*/

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use memmap2::Mmap;

use crate::error::{IrapError, MapErrorKind};

/// A readable byte source with a cursor and bounded reads.
pub trait ByteSource {
	/// The full contents, as a contiguous slice.
	fn as_slice(&self) -> &[u8];

	/// Bytes left to read after the current position.
	fn remaining(&self, pos: usize) -> usize {
		self.as_slice().len().saturating_sub(pos)
	}

	/// Reads exactly `n` bytes starting at `pos`, or fails with
	/// `UnexpectedEof`.
	fn read_exact(&self, pos: usize, n: usize) -> Result<&[u8], IrapError> {
		let buf = self.as_slice();
		if pos + n > buf.len() {
			return Err(IrapError::UnexpectedEof { offset: pos });
		}
		Ok(&buf[pos..pos + n])
	}
}

/// A byte source backed by a read-only memory map of a whole file.
pub struct MappedFile {
	mmap: Mmap,
}

impl MappedFile {
	/// Opens `path` and memory-maps it. Fails with `MapError { Empty }`
	/// if the file is zero bytes -- some platforms cannot map an empty
	/// range, so this crate raises the error itself rather than letting
	/// that vary by platform.
	pub fn open(path: impl AsRef<Path>) -> Result<MappedFile, IrapError> {
		let file = File::open(path)?;
		let len = file.metadata()?.len();
		if len == 0 {
			return Err(IrapError::MapError { kind: MapErrorKind::Empty });
		}
		// Safety: the file is not expected to be concurrently truncated
		// by another process during this call; if it is, later reads
		// will surface as a signal/short read rather than a data race
		// within this process.
		let mmap = unsafe { Mmap::map(&file)? };
		Ok(MappedFile { mmap })
	}
}

impl ByteSource for MappedFile {
	fn as_slice(&self) -> &[u8] {
		&self.mmap
	}
}

/// A byte source wrapping a caller-provided slice.
pub struct Buffer<'a> {
	data: &'a [u8],
}

impl<'a> Buffer<'a> {
	pub fn new(data: &'a [u8]) -> Buffer<'a> {
		Buffer { data }
	}
}

impl<'a> ByteSource for Buffer<'a> {
	fn as_slice(&self) -> &[u8] {
		self.data
	}
}

/// A writable byte sink.
pub trait ByteSink {
	fn write_all(&mut self, bytes: &[u8]) -> Result<(), IrapError>;
}

/// A sink that buffers writes to a file, flushing on `finish`.
pub struct FileSink {
	inner: BufWriter<File>,
}

impl FileSink {
	pub fn create(path: impl AsRef<Path>) -> Result<FileSink, IrapError> {
		let file = File::create(path)?;
		Ok(FileSink { inner: BufWriter::new(file) })
	}

	/// Flushes any buffered data. Called automatically on success by the
	/// encoders, but exposed so an I/O error on flush is never silently
	/// dropped on an early return.
	pub fn finish(mut self) -> Result<(), IrapError> {
		self.inner.flush()?;
		Ok(())
	}
}

impl ByteSink for FileSink {
	fn write_all(&mut self, bytes: &[u8]) -> Result<(), IrapError> {
		io::Write::write_all(&mut self.inner, bytes)?;
		Ok(())
	}
}

/// A sink that grows a heap buffer.
#[derive(Default)]
pub struct BufferSink {
	pub buf: Vec<u8>,
}

impl BufferSink {
	pub fn new() -> BufferSink {
		BufferSink { buf: Vec::new() }
	}

	pub fn into_inner(self) -> Vec<u8> {
		self.buf
	}
}

impl ByteSink for BufferSink {
	fn write_all(&mut self, bytes: &[u8]) -> Result<(), IrapError> {
		self.buf.extend_from_slice(bytes);
		Ok(())
	}
}
