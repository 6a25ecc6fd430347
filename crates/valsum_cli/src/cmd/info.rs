use std::path::PathBuf;

use valsum::summary::{Result, ValueBuffer};

use crate::cmd::util::emit_json;

/// Print buffer-level information.
pub fn run(path: PathBuf, json: bool) -> Result<()> {
	let buffer = ValueBuffer::open(&path)?;

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			compression: buffer.compression.as_str(),
			version: buffer.version(),
			bytes: buffer.len(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("compression: {}", buffer.compression.as_str());
	println!("version: {}", buffer.version());
	println!("bytes: {}", buffer.len());

	Ok(())
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	compression: &'static str,
	version: u32,
	bytes: usize,
}
