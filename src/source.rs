//! Reading dictionary source text in whatever encoding the scan was saved in.

use std::fs;
use std::path::Path;

use encoding_rs::Encoding;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("unknown text encoding '{0}'")]
    UnknownEncoding(String),

    #[error("cannot read dictionary source {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

pub fn encoding_for(label: &str) -> Result<&'static Encoding, SourceError> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| SourceError::UnknownEncoding(label.to_string()))
}

/// Decodes `bytes`; a BOM takes precedence over `encoding`.
/// Malformed sequences become U+FFFD.
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(encoding = used.name(), "replaced malformed byte sequences in dictionary source");
    }
    debug!(encoding = used.name(), bytes = bytes.len(), "decoded dictionary source");
    text.into_owned()
}

/// Reads a dictionary file and splits it into physical lines.
pub fn read_lines(path: &Path, encoding: &'static Encoding) -> Result<Vec<String>, SourceError> {
    let bytes = fs::read(path).map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(decode(&bytes, encoding).lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_common_labels() {
        assert_eq!(encoding_for("utf-8").unwrap(), encoding_rs::UTF_8);
        assert_eq!(encoding_for(" latin1 ").unwrap(), encoding_rs::WINDOWS_1252);
        assert!(matches!(
            encoding_for("klingon"),
            Err(SourceError::UnknownEncoding(_))
        ));
    }

    #[test]
    fn decodes_legacy_single_byte() {
        // "o’clock" with a windows-1252 right single quote
        let bytes = b"o\x92clock, adv. ngentsimbi";
        assert_eq!(
            decode(bytes, encoding_rs::WINDOWS_1252),
            "o’clock, adv. ngentsimbi"
        );
    }

    #[test]
    fn bom_overrides_label() {
        let bytes = b"\xEF\xBB\xBFplay, v. dlala";
        assert_eq!(decode(bytes, encoding_rs::WINDOWS_1252), "play, v. dlala");
    }

    #[test]
    fn malformed_utf8_is_replaced() {
        assert_eq!(decode(b"dla\xFFla", encoding_rs::UTF_8), "dla\u{FFFD}la");
    }

    #[test]
    fn reads_crlf_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict.txt");
        fs::write(&path, "play, v. i. dlala;\r\nplayed, v. i. dlalwe;\r\n").unwrap();
        let lines = read_lines(&path, encoding_rs::UTF_8).unwrap();
        assert_eq!(lines, vec!["play, v. i. dlala;", "played, v. i. dlalwe;"]);
    }
}
