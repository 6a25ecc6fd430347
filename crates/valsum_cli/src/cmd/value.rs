use std::path::PathBuf;

use valsum::summary::{Result, ValueBuffer};

use crate::cmd::json::value_to_json;
use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::{emit_json, load_shapes, parse_offset};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub shapes: Option<PathBuf>,
	#[arg(long)]
	pub offset: String,
	#[arg(long, default_value_t = 0)]
	pub depth: u32,
	#[arg(long)]
	pub json: bool,
	#[arg(long = "max-string")]
	pub max_string: Option<usize>,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
}

/// Decode and print one value summary at an absolute offset.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		shapes,
		offset,
		depth,
		json,
		max_string,
		max_depth,
	} = args;

	let offset = parse_offset(&offset)?;
	let shapes = load_shapes(shapes.as_deref())?;
	let buffer = ValueBuffer::open(&path)?;
	let value = buffer.value_at(&shapes, offset, depth)?;

	if json {
		emit_json(&ValueJson {
			path: path.display().to_string(),
			offset,
			depth,
			value: value_to_json(&value),
		});
		return Ok(());
	}

	let mut print = PrintOptions::default();
	if let Some(max_string) = max_string {
		print.max_string_len = max_string;
	}
	if let Some(max_depth) = max_depth {
		print.max_print_depth = max_depth;
	}
	print_value(&value, print);

	Ok(())
}

#[derive(serde::Serialize)]
struct ValueJson {
	path: String,
	offset: usize,
	depth: u32,
	value: serde_json::Value,
}
