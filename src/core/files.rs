//! Small file helpers that attach paths to I/O errors.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::error::{RecordsError, Result};

/// Copy `from` over `to`, creating `to`'s parent directory if needed.
pub fn copy_file(what: &'static str, from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(RecordsError::NotFound {
            what,
            path: from.to_path_buf(),
        });
    }
    if let Some(parent) = to.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| RecordsError::io(what, parent, e))?;
        }
    }
    fs::copy(from, to).map_err(|e| RecordsError::io(what, to, e))?;
    debug!(from = %from.display(), to = %to.display(), "copied {}", what);
    Ok(())
}

/// Read a text file. Bytes that are not UTF-8 become U+FFFD instead of
/// failing the read, so one bad byte never hides the rest of the file.
pub fn read_text(what: &'static str, path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| RecordsError::io(what, path, e))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            warn!(path = %path.display(), "{} is not valid UTF-8, decoding lossily", what);
            Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
        }
    }
}

pub fn write_text(what: &'static str, path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|e| RecordsError::io(what, path, e))
}
