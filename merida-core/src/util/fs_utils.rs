use std::path::{Path, PathBuf};

/// joins `filename` onto `directory`, failing when the file already exists
/// and `overwrite` is false.
pub fn output_path(directory: &Path, filename: &str, overwrite: bool) -> Result<PathBuf, String> {
    let filepath = directory.join(filename);
    if filepath.exists() && !overwrite {
        return Err(format!(
            "output file {} already exists and overwrite is disabled",
            filepath.to_string_lossy()
        ));
    }
    Ok(filepath)
}
