// Irap regular-surface codec
//
// Licensed under MIT license, or Apache 2 license,
// at your option. Please see the LICENSE file
// attached to this source distribution for details.

//! A tiny demo CLI over `irapio`: inspect a surface's header, or
//! convert between the ASCII and binary variants.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use irapio::{decode_ascii_file, decode_binary_file, encode_ascii_file, encode_binary_file};

#[derive(Parser)]
#[command(name = "irapcat", about = "Inspect and convert Irap regular-surface files")]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Print the header of an ASCII or binary surface.
	Inspect {
		path: PathBuf,
		/// Treat the input as the binary variant instead of ASCII.
		#[arg(long)]
		binary: bool,
	},
	/// Convert an ASCII surface to the binary variant.
	AsciiToBinary { input: PathBuf, output: PathBuf },
	/// Convert a binary surface to the ASCII variant.
	BinaryToAscii { input: PathBuf, output: PathBuf },
}

fn run() -> Result<(), irapio::IrapError> {
	let cli = Cli::parse();
	match cli.command {
		Command::Inspect { path, binary } => {
			let surface = if binary { decode_binary_file(path)? } else { decode_ascii_file(path)? };
			let h = surface.header;
			println!("ncol={} nrow={}", h.ncol, h.nrow);
			println!("xori={} yori={}", h.xori, h.yori);
			println!("xinc={} yinc={}", h.xinc, h.yinc);
			println!("xmax={} ymax={}", h.xmax, h.ymax);
			println!("rot={} xrot={} yrot={}", h.rot, h.xrot, h.yrot);
		},
		Command::AsciiToBinary { input, output } => {
			let surface = decode_ascii_file(input)?;
			encode_binary_file(&surface, output)?;
		},
		Command::BinaryToAscii { input, output } => {
			let surface = decode_binary_file(input)?;
			encode_ascii_file(&surface, output)?;
		},
	}
	Ok(())
}

fn main() -> ExitCode {
	env_logger::init();
	match run() {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("irapcat: {}", e);
			ExitCode::FAILURE
		},
	}
}
