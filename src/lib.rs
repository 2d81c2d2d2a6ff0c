// Irap regular-surface codec
//
// Licensed under MIT license, or Apache 2 license,
// at your option. Please see the LICENSE file
// attached to this source distribution for details.

#![cfg_attr(test, deny(warnings))]

/*!
A reader/writer for Irap regular-surface grids.

Irap surfaces are 2-D grids of single-precision elevation or attribute
samples, stored column-major, with a small affine geometric header
(origin, spacing, extents, rotation). Two on-disk variants exist: a
whitespace-token ASCII form (`ascii` module) and a Fortran unformatted
binary form (`binary` module), both described over the same in-memory
[`Surface`]/[`Header`]/[`Grid`] model.

```no_run
use irapio::{decode_ascii_file, encode_binary_file};

let surface = decode_ascii_file("surface.irap")?;
encode_binary_file(&surface, "surface.gri")?;
# Ok::<(), irapio::IrapError>(())
```
*/

pub mod ascii;
pub mod binary;
pub mod byteio;
pub mod error;
pub mod header;
pub mod lex;
pub mod surface;

pub use ascii::{decode_ascii, decode_ascii_buffer, decode_ascii_file, decode_ascii_str, encode_ascii, encode_ascii_buffer, encode_ascii_file};
pub use binary::{decode_binary, decode_binary_buffer, decode_binary_file, encode_binary, encode_binary_buffer, encode_binary_file};
pub use byteio::{Buffer, BufferSink, ByteSink, ByteSource, FileSink, MappedFile};
pub use error::{IrapError, MapErrorKind, Result, TruncatedKind};
pub use header::{headers_equal, Header};
pub use surface::{Grid, GridView, Surface};
