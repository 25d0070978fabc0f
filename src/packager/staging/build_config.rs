//! Export of the trimmed build configuration.

use crate::packager::{
    error::{Error, Result},
    settings::Settings,
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Keeps the lines before the first line starting with `sentinel`.
///
/// The file is treated as bytes, so non-UTF-8 comments and line endings
/// are preserved exactly. Returns the kept bytes and whether the sentinel
/// was found; without a sentinel the whole input is kept.
pub fn trim_build_config<'a>(contents: &'a [u8], sentinel: &str) -> (&'a [u8], bool) {
    let mut offset = 0;
    for line in contents.split_inclusive(|b| *b == b'\n') {
        if line.starts_with(sentinel.as_bytes()) {
            return (&contents[..offset], true);
        }
        offset += line.len();
    }
    (contents, false)
}

/// Writes the trimmed build configuration into the staging tree under its
/// canonical name and returns the staged path.
pub async fn export_build_config(settings: &Settings, staging_root: &Path) -> Result<PathBuf> {
    let config = settings.build_config();
    let source = settings.source_root().join(&config.source);

    let contents = match tokio::fs::read(&source).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::MissingFile {
                path: config.source.clone(),
            });
        }
        Err(error) => {
            return Err(Error::Fs {
                context: "reading build configuration",
                path: source,
                error,
            });
        }
    };

    let (trimmed, found) = trim_build_config(&contents, &config.sentinel);
    if found {
        log::debug!(
            "Trimmed {} to {} of {} bytes at {:?}",
            config.source.display(),
            trimmed.len(),
            contents.len(),
            config.sentinel
        );
    } else {
        log::warn!(
            "{} has no {:?} line; exporting it whole",
            config.source.display(),
            config.sentinel
        );
    }

    let staged = staging_root.join(&config.staged_name);
    fs::write_if_changed(&staged, trimmed).await?;
    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENTINEL: &str = "# *** Other programs";

    #[test]
    fn cuts_at_first_sentinel_line() {
        let input = b"env = Environment()\nProgram('imfit')\n# *** Other programs\nProgram('timing')\n# *** Other programs\n";
        let (kept, found) = trim_build_config(input, SENTINEL);
        assert!(found);
        assert_eq!(kept, b"env = Environment()\nProgram('imfit')\n");
    }

    #[test]
    fn sentinel_must_start_the_line() {
        let input = b"x = 1  # *** Other programs\ny = 2\n";
        let (kept, found) = trim_build_config(input, SENTINEL);
        assert!(!found);
        assert_eq!(kept, input);
    }

    #[test]
    fn preserves_crlf_endings() {
        let input = b"a\r\nb\r\n# *** Other programs\r\nc\r\n";
        assert_eq!(trim_build_config(input, SENTINEL).0, b"a\r\nb\r\n");
    }

    #[test]
    fn sentinel_on_first_line_keeps_nothing() {
        let (kept, found) = trim_build_config(b"# *** Other programs\nrest\n", SENTINEL);
        assert!(found);
        assert!(kept.is_empty());
    }

    #[test]
    fn keeps_latin1_bytes_before_sentinel() {
        let input = b"# Autor: P\xe9ter\nenv = Environment()\n# *** Other programs\nrest\n";
        let (kept, found) = trim_build_config(input, SENTINEL);
        assert!(found);
        assert_eq!(kept, b"# Autor: P\xe9ter\nenv = Environment()\n");
    }
}
