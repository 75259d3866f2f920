//! Gzip compression of rotated log files

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::error::LoggerError;

/// Compress `path` into `<path>.gz` and remove the original.
///
/// Returns the path of the compressed file.
pub fn gzip_file(path: &Path) -> Result<PathBuf, LoggerError> {
    let mut file_name = path
        .file_name()
        .ok_or_else(|| LoggerError::rotation(format!("'{}' is not a file", path.display())))?
        .to_os_string();
    file_name.push(".gz");
    let compressed_path = path.with_file_name(file_name);

    let mut input = BufReader::new(File::open(path)?);
    let output = BufWriter::new(File::create(&compressed_path)?);
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut input, &mut encoder)?;
    encoder.finish()?.into_inner().map_err(|e| e.into_error())?;

    fs::remove_file(path)?;
    Ok(compressed_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use proptest::prelude::*;
    use std::io::Read;
    use tempfile::tempdir;

    #[test]
    fn test_compressed_file_replaces_original() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.20260101_000000.log");
        fs::write(&path, "line one\nline two\n").unwrap();

        let compressed = gzip_file(&path).unwrap();
        assert_eq!(compressed, dir.path().join("app.20260101_000000.log.gz"));
        assert!(!path.exists());
        assert!(compressed.exists());
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempdir().unwrap();
        assert!(gzip_file(&dir.path().join("absent.log")).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn property_gzip_preserves_content(content in "[a-zA-Z0-9 \n]{0,2000}") {
            let dir = tempdir().unwrap();
            let path = dir.path().join("app.log");
            fs::write(&path, &content).unwrap();

            let compressed = gzip_file(&path).unwrap();
            let mut decoded = String::new();
            GzDecoder::new(File::open(compressed).unwrap())
                .read_to_string(&mut decoded)
                .unwrap();
            prop_assert_eq!(decoded, content);
        }
    }
}
