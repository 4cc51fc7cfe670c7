//! Minimal `.env` reader for per-service configuration.
//!
//! Only the subset the control surface needs: `KEY=VALUE` lines, `#`
//! comments, optional surrounding quotes. No interpolation, no exports.

use std::path::Path;

use fleet_common::constants::PORT_KEY;

/// Looks up `key` in `KEY=VALUE` formatted content.
///
/// Returns the first matching value with surrounding single or double
/// quotes stripped. Comment lines and lines without `=` are skipped.
#[must_use]
pub fn lookup<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((k, v)) = line.split_once('=') else {
            continue;
        };
        if k.trim() != key {
            continue;
        }
        let v = v.trim();
        let v = v
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .or_else(|| v.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
            .unwrap_or(v);
        return Some(v);
    }
    None
}

/// Reads the declared listen port from a service's `.env` file.
///
/// A missing file, missing `PORT` key, or unparsable value all yield
/// `None`; the adapters report the absence as an Unknown outcome
/// instead of discovery failing.
#[must_use]
pub fn declared_port(env_path: &Path) -> Option<u16> {
    let content = std::fs::read_to_string(env_path).ok()?;
    let port = lookup(&content, PORT_KEY)?.parse().ok();
    if port.is_none() {
        tracing::warn!(path = %env_path.display(), "unparsable PORT value in .env");
    }
    port
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_plain_value() {
        assert_eq!(lookup("PORT=9001\nDEBUG=true", "PORT"), Some("9001"));
    }

    #[test]
    fn lookup_skips_comments_and_blanks() {
        let content = "# service config\n\n#PORT=1111\nPORT=9002\n";
        assert_eq!(lookup(content, "PORT"), Some("9002"));
    }

    #[test]
    fn lookup_strips_quotes() {
        assert_eq!(lookup("PORT=\"9003\"", "PORT"), Some("9003"));
        assert_eq!(lookup("PORT='9004'", "PORT"), Some("9004"));
    }

    #[test]
    fn lookup_first_match_wins() {
        assert_eq!(lookup("PORT=9001\nPORT=9999", "PORT"), Some("9001"));
    }

    #[test]
    fn lookup_ignores_partial_key_match() {
        assert_eq!(lookup("EXPORT=1\nPORT=9005", "PORT"), Some("9005"));
    }

    #[test]
    fn declared_port_missing_file_is_none() {
        assert_eq!(declared_port(std::path::Path::new("/nonexistent/.env")), None);
    }

    #[test]
    fn declared_port_reads_and_parses() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(".env");
        std::fs::write(&path, "PORT=9001\n").expect("write .env");
        assert_eq!(declared_port(&path), Some(9001));
    }

    #[test]
    fn declared_port_unparsable_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(".env");
        std::fs::write(&path, "PORT=nine-thousand\n").expect("write .env");
        assert_eq!(declared_port(&path), None);
    }
}
