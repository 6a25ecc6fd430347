use std::path::PathBuf;

use valsum::summary::{ArgumentDecodeResult, Result, ValueBuffer};

use crate::cmd::json::value_to_json;
use crate::cmd::print::{PrintOptions, render_value};
use crate::cmd::util::{emit_json, load_shapes, parse_values_index};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub shapes: Option<PathBuf>,
	#[arg(long, allow_hyphen_values = true)]
	pub index: String,
	#[arg(long)]
	pub json: bool,
	#[arg(long = "max-string")]
	pub max_string: Option<usize>,
}

/// Decode and print the argument list recorded at a values index.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		shapes,
		index,
		json,
		max_string,
	} = args;

	let values_index = parse_values_index(&index)?;
	let shapes = load_shapes(shapes.as_deref())?;
	let buffer = ValueBuffer::open(&path)?;
	let result = buffer.argument_summaries(&shapes, values_index)?;

	if json {
		let (status, values) = match &result {
			ArgumentDecodeResult::Empty => ("empty", Vec::new()),
			ArgumentDecodeResult::Unavailable => ("unavailable", Vec::new()),
			ArgumentDecodeResult::Values(values) => ("values", values.iter().map(value_to_json).collect()),
		};
		emit_json(&ArgsJson {
			path: path.display().to_string(),
			index: values_index,
			status,
			values,
		});
		return Ok(());
	}

	let mut print = PrintOptions::default();
	if let Some(max_string) = max_string {
		print.max_string_len = max_string;
	}

	match result {
		ArgumentDecodeResult::Empty => println!("<no arguments>"),
		ArgumentDecodeResult::Unavailable => println!("<missing>"),
		ArgumentDecodeResult::Values(values) => {
			for (position, value) in values.iter().enumerate() {
				print!("[{position}] {}", render_value(value, print));
			}
		}
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct ArgsJson {
	path: String,
	index: i32,
	status: &'static str,
	values: Vec<serde_json::Value>,
}
