use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Reads a corpus file and returns its lines.
///
/// The whole file is read into memory; `\n` / `\r\n` both terminate a line.
pub(crate) fn read_lines<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
	let contents = fs::read_to_string(path)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Derives a sibling path with a different extension.
///
/// Example:
/// `corpora/en.txt` + `"bin"` → `corpora/en.bin`
pub(crate) fn sibling_with_extension<P: AsRef<Path>>(path: P, extension: &str) -> io::Result<PathBuf> {
	let path = path.as_ref();
	if path.file_stem().is_none() {
		return Err(io::Error::new(io::ErrorKind::InvalidInput, "path has no filename"));
	}
	Ok(path.with_extension(extension))
}

/// Extracts the base filename without extension.
///
/// Example: `"./corpora/en.txt"` → `"en"`
pub(crate) fn file_stem_name<P: AsRef<Path>>(path: P) -> io::Result<String> {
	let stem = path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder<P: AsRef<Path>>(input: P) -> PathBuf {
	let input = input.as_ref();
	if input == Path::new(".") || input == Path::new("./") {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		input.to_path_buf()
	}
}

/// Lists all files with a given extension in a directory, sorted by name.
///
/// Only files directly contained in the directory are returned; the sort
/// keeps downstream iteration order stable across platforms.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<PathBuf>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			files.push(path);
		}
	}

	files.sort();
	Ok(files)
}
