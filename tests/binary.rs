// Irap regular-surface codec
//
// Licensed under MIT license, or Apache 2 license,
// at your option. Please see the LICENSE file
// attached to this source distribution for details.

use irapio::{decode_binary_buffer, encode_binary_buffer, headers_equal, Grid, Header, IrapError, Surface};

#[test]
fn s6_nan_emits_large_magnitude_sentinel_bits() {
	let header = Header::new(1, 1, 0.0, 0.0, 1.0, 1.0, 0.0);
	let values = Grid::from_nested(vec![vec![f32::NAN]]);
	let surf = Surface::new(header, values).unwrap();
	let bytes = encode_binary_buffer(&surf).unwrap();
	// three fixed header records (40 + 24 + 36 bytes), then a 4-byte value prefix.
	let value_start = 40 + 24 + 36 + 4;
	let bits = u32::from_be_bytes(bytes[value_start..value_start + 4].try_into().unwrap());
	assert!(f32::from_bits(bits).abs() >= 1e30);
}

#[test]
fn round_trip_is_bit_exact_on_values() {
	let header = Header::new(3, 2, 10.0, 20.0, 1.5, 2.5, 0.0);
	let values = Grid::from_nested(vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]);
	let surf = Surface::new(header, values).unwrap();
	let bytes = encode_binary_buffer(&surf).unwrap();
	let back = decode_binary_buffer(&bytes).unwrap();
	assert!(headers_equal(&surf.header, &back.header));
	assert_eq!(back.values.to_nested(), surf.values.to_nested());
}

#[test]
fn nan_round_trips_through_binary() {
	let header = Header::new(2, 1, 0.0, 0.0, 1.0, 1.0, 0.0);
	let values = Grid::from_nested(vec![vec![f32::NAN], vec![7.0]]);
	let surf = Surface::new(header, values).unwrap();
	let bytes = encode_binary_buffer(&surf).unwrap();
	let back = decode_binary_buffer(&bytes).unwrap();
	assert!(back.values.get(0, 0).is_nan());
	assert_eq!(back.values.get(1, 0), 7.0);
}

#[test]
fn truncated_to_100_bytes_fails() {
	let header = Header::new(4, 4, 0.0, 0.0, 1.0, 1.0, 0.0);
	let values = Grid::filled_with_nan(4, 4);
	let surf = Surface::new(header, values).unwrap();
	let bytes = encode_binary_buffer(&surf).unwrap();
	let truncated = &bytes[..100];
	assert!(matches!(decode_binary_buffer(truncated), Err(IrapError::Truncated { .. })));
}

#[test]
fn corrupted_record_frame_is_rejected() {
	let header = Header::new(1, 1, 0.0, 0.0, 1.0, 1.0, 0.0);
	let values = Grid::from_nested(vec![vec![1.0]]);
	let surf = Surface::new(header, values).unwrap();
	let mut bytes = encode_binary_buffer(&surf).unwrap();
	let r1_suffix_at = 4 + 32;
	bytes[r1_suffix_at..r1_suffix_at + 4].copy_from_slice(&0xdeadbeefu32.to_be_bytes());
	assert!(matches!(decode_binary_buffer(&bytes), Err(IrapError::RecordFrame { .. })));
}

#[test]
fn bad_magic_is_rejected() {
	let header = Header::new(1, 1, 0.0, 0.0, 1.0, 1.0, 0.0);
	let values = Grid::from_nested(vec![vec![1.0]]);
	let surf = Surface::new(header, values).unwrap();
	let mut bytes = encode_binary_buffer(&surf).unwrap();
	bytes[4..8].copy_from_slice(&0i32.to_be_bytes());
	assert!(matches!(decode_binary_buffer(&bytes), Err(IrapError::BadMagic { .. })));
}

#[test]
fn encoder_chunks_one_record_per_column() {
	let header = Header::new(4, 3, 0.0, 0.0, 1.0, 1.0, 0.0);
	let values = Grid::filled_with_nan(4, 3);
	let surf = Surface::new(header, values).unwrap();
	let bytes = encode_binary_buffer(&surf).unwrap();
	let header_len = (4 + 32 + 4) + (4 + 16 + 4) + (4 + 28 + 4);
	let remaining = &bytes[header_len..];
	// 4 columns, each record: 4-byte prefix + 3*4-byte payload + 4-byte suffix
	assert_eq!(remaining.len(), 4 * (4 + 12 + 4));
}
