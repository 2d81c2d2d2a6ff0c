// Irap regular-surface codec
//
// Licensed under MIT license, or Apache 2 license,
// at your option. Please see the LICENSE file
// attached to this source distribution for details.

/*!
Surface and grid storage

`Grid` holds the values of an Irap surface as a single flat buffer in
column-major (Fortran) order, matching the order the file formats
store samples in -- a decode can fill it with one pass and no
per-sample allocation, and an encode can walk it back out column by
column without transposing first.

`GridView` is the non-owning counterpart used at the boundary with
callers that already have their data in row-major order, or as a
borrowed slice they don't want to hand ownership of.
*/

/// A 2D grid of `f32` samples, stored column-major: `data[col * nrow + row]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
	data: Vec<f32>,
	ncol: usize,
	nrow: usize,
}

impl Grid {
	/// Builds a grid from an already column-major flat buffer.
	///
	/// # Panics
	/// Panics if `data.len() != ncol * nrow`.
	pub fn from_column_major(data: Vec<f32>, ncol: usize, nrow: usize) -> Grid {
		assert_eq!(data.len(), ncol * nrow, "grid data length does not match ncol * nrow");
		Grid { data, ncol, nrow }
	}

	/// Builds a grid filled with `NaN`, ready to be filled in decode order.
	pub fn filled_with_nan(ncol: usize, nrow: usize) -> Grid {
		Grid { data: vec![f32::NAN; ncol * nrow], ncol, nrow }
	}

	pub fn ncol(&self) -> usize {
		self.ncol
	}

	pub fn nrow(&self) -> usize {
		self.nrow
	}

	pub fn get(&self, col: usize, row: usize) -> f32 {
		self.data[col * self.nrow + row]
	}

	pub fn set(&mut self, col: usize, row: usize, value: f32) {
		self.data[col * self.nrow + row] = value;
	}

	/// The full column-major backing buffer.
	pub fn as_column_major_slice(&self) -> &[f32] {
		&self.data
	}

	/// One column, as stored: `nrow` contiguous samples.
	pub fn column(&self, col: usize) -> &[f32] {
		&self.data[col * self.nrow..(col + 1) * self.nrow]
	}

	/// Rebuilds the grid as nested `Vec<Vec<f32>>`, one inner vec per
	/// column, matching the `[[col0...], [col1...], ...]` shape used in
	/// test fixtures and small examples. Not used on the hot decode/encode
	/// path.
	pub fn to_nested(&self) -> Vec<Vec<f32>> {
		(0..self.ncol).map(|c| self.column(c).to_vec()).collect()
	}

	/// Builds a grid from nested `Vec<Vec<f32>>`, one inner vec per column.
	///
	/// # Panics
	/// Panics if the columns are not all the same length.
	pub fn from_nested(columns: Vec<Vec<f32>>) -> Grid {
		let ncol = columns.len();
		let nrow = columns.first().map_or(0, |c| c.len());
		assert!(columns.iter().all(|c| c.len() == nrow), "all columns must have the same length");
		let mut data = Vec::with_capacity(ncol * nrow);
		for col in columns {
			data.extend(col);
		}
		Grid { data, ncol, nrow }
	}
}

/// A borrowed view over grid data, used at interop boundaries where the
/// caller already owns a buffer in either row-major or column-major order.
pub struct GridView<'a> {
	pub data: &'a [f32],
	pub ncol: usize,
	pub nrow: usize,
	/// `true` if `data` is laid out column-major (same as `Grid`), `false`
	/// if it is row-major (`data[row * ncol + col]`).
	pub column_major: bool,
}

impl<'a> GridView<'a> {
	/// Copies the view into an owned, column-major `Grid`, transposing if
	/// the view is row-major.
	pub fn to_grid(&self) -> Grid {
		assert_eq!(self.data.len(), self.ncol * self.nrow, "view data length does not match ncol * nrow");
		if self.column_major {
			Grid::from_column_major(self.data.to_vec(), self.ncol, self.nrow)
		} else {
			let mut data = vec![0.0f32; self.ncol * self.nrow];
			for row in 0..self.nrow {
				for col in 0..self.ncol {
					data[col * self.nrow + row] = self.data[row * self.ncol + col];
				}
			}
			Grid::from_column_major(data, self.ncol, self.nrow)
		}
	}
}

use crate::error::IrapError;
use crate::header::Header;

/// A complete Irap surface: geometry plus values.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
	pub header: Header,
	pub values: Grid,
}

impl Surface {
	/// Builds a surface, checking that the header's sample count matches
	/// the grid's.
	pub fn new(header: Header, values: Grid) -> Result<Surface, IrapError> {
		header.validate()?;
		if header.ncol as usize != values.ncol() || header.nrow as usize != values.nrow() {
			return Err(IrapError::BadShape {
				reason: format!(
					"header declares {}x{} but grid has {}x{}",
					header.ncol, header.nrow, values.ncol(), values.nrow()
				),
			});
		}
		Ok(Surface { header, values })
	}

	pub fn from_view(header: Header, view: GridView) -> Result<Surface, IrapError> {
		Surface::new(header, view.to_grid())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn grid_roundtrips_through_nested_representation() {
		let nested = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
		let grid = Grid::from_nested(nested.clone());
		assert_eq!(grid.ncol(), 2);
		assert_eq!(grid.nrow(), 3);
		assert_eq!(grid.get(0, 0), 1.0);
		assert_eq!(grid.get(1, 2), 6.0);
		assert_eq!(grid.to_nested(), nested);
	}

	#[test]
	fn grid_view_transposes_row_major_data() {
		// row-major 2x3 (2 rows, 3 cols): [[1,2,3],[4,5,6]]
		let view = GridView { data: &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], ncol: 3, nrow: 2, column_major: false };
		let grid = view.to_grid();
		assert_eq!(grid.get(0, 0), 1.0);
		assert_eq!(grid.get(1, 0), 2.0);
		assert_eq!(grid.get(2, 1), 6.0);
	}

	#[test]
	fn surface_new_rejects_shape_mismatch() {
		let header = Header::new(2, 2, 0.0, 0.0, 1.0, 1.0, 0.0);
		let values = Grid::filled_with_nan(3, 3);
		assert!(matches!(Surface::new(header, values), Err(IrapError::BadShape { .. })));
	}
}
