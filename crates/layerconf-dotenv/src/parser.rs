//! Line-based `.env` parser.

use crate::types::DotEnvFile;

/// Parses `.env` text into an ordered key/value file.
///
/// For each line: trim; skip if empty, `#`-prefixed or lacking `=`; split on
/// the first `=`; trim both halves; strip one matching pair of `"` or `'`
/// from the value. Later assignments of a key overwrite earlier ones.
pub fn parse_dotenv(content: &str) -> DotEnvFile {
    let mut file = DotEnvFile::default();

    for (line_idx, line) in content.lines().enumerate() {
        let line_no = line_idx + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((raw_key, raw_value)) = trimmed.split_once('=') else {
            tracing::trace!("Skipping line {} without '=': {:?}", line_no, line);
            continue;
        };

        let key = raw_key.trim();
        if key.is_empty() {
            tracing::trace!("Skipping line {} with empty key", line_no);
            continue;
        }

        let value = strip_quotes(raw_value.trim());
        if let Some(previous) = file.entries_mut().insert(key, value, line_no) {
            tracing::trace!(
                "Line {} overrides {} (was {:?})",
                line_no,
                key,
                previous
            );
        }
    }

    tracing::debug!("Parsed .env: {} entries", file.len());
    file
}

/// Removes one layer of matching surrounding `"` or `'`.
fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
