//! Loading raw text from disk.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::debug;

use crate::error::{Result, WordFreqError};

const UTF8_BOM: char = '\u{feff}';

/// Read a UTF-8 text file.
///
/// A missing file is `NotFound`; bytes that are not valid UTF-8 are
/// `Encoding`. A leading byte-order mark is dropped.
pub fn load_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(WordFreqError::not_found(path.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut text = String::from_utf8(bytes).map_err(|e| {
        WordFreqError::encoding(format!(
            "{} is not valid UTF-8 (at byte {})",
            path.display(),
            e.utf8_error().valid_up_to()
        ))
    })?;

    if text.starts_with(UTF8_BOM) {
        text.drain(..UTF8_BOM.len_utf8());
    }

    debug!("loaded {} bytes from {}", text.len(), path.display());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_load_text() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Down the Rabbit-Hole").unwrap();

        assert_eq!(load_text(file.path()).unwrap(), "Down the Rabbit-Hole");
    }

    #[test]
    fn test_missing_file() {
        let err = load_text("/nonexistent/alice.txt").unwrap_err();
        assert!(matches!(err, WordFreqError::NotFound(_)));
    }

    #[test]
    fn test_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[b'o', b'k', 0xff, 0xfe]).unwrap();

        let err = load_text(file.path()).unwrap_err();
        assert!(matches!(err, WordFreqError::Encoding(_)));
        assert!(err.to_string().contains("at byte 2"));
    }

    #[test]
    fn test_bom_dropped() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all("\u{feff}Alice".as_bytes()).unwrap();

        assert_eq!(load_text(file.path()).unwrap(), "Alice");
    }

    #[test]
    fn test_empty_file() {
        let file = NamedTempFile::new().unwrap();
        assert_eq!(load_text(file.path()).unwrap(), "");
    }
}
