//! Reading raw configuration documents.

use std::io::Read;
use std::path::Path;

use super::ConfigError;

/// Reads the whole document from `reader`.
pub fn read_source(mut reader: impl Read) -> Result<Vec<u8>, ConfigError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(ConfigError::Read)?;
    Ok(buf)
}

/// Reads a configuration file into memory.
pub fn read_config_file(path: &Path) -> Result<Vec<u8>, ConfigError> {
    std::fs::read(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use tempfile::NamedTempFile;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream closed"))
        }
    }

    #[test]
    fn test_read_config_file_loads_contents() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"key\": \"value\"}} // comment").unwrap();

        let bytes = read_config_file(file.path()).unwrap();
        assert_eq!(bytes, b"{\"key\": \"value\"} // comment");
    }

    #[test]
    fn test_read_config_file_missing() {
        let result = read_config_file(Path::new("/nonexistent/path/config.jsonc"));

        match result {
            Err(ConfigError::ReadFile { path, source }) => {
                assert_eq!(path, Path::new("/nonexistent/path/config.jsonc"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_read_source_reports_io_failure() {
        let result = read_source(FailingReader);
        assert!(matches!(result, Err(ConfigError::Read(_))));
    }
}
