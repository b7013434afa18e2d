//! Embedded font staging.
//!
//! The PDF exporter registers its typeface from a file path, so the
//! embedded font is written out to the OS temp directory the first time a
//! table export runs. Staging happens at most once per process behind an
//! initialization barrier; the file is removed by an explicit
//! [`remove_staged_font`] call at shutdown.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::error::ExportError;

#[derive(rust_embed::RustEmbed)]
#[folder = "assets/fonts"]
struct FontAssets;

const FONT_FILE: &str = "DejaVuSans.ttf";

static STAGED: OnceCell<PathBuf> = OnceCell::new();

/// Path of the staged font file, writing it out on first use.
///
/// The write completes before the path is ever returned, so concurrent
/// first callers cannot observe a partial file.
pub(crate) fn staged_font_path() -> Result<&'static Path, ExportError> {
    STAGED.get_or_try_init(stage).map(PathBuf::as_path)
}

fn stage() -> Result<PathBuf, ExportError> {
    let font = FontAssets::get(FONT_FILE)
        .ok_or_else(|| ExportError::FontLoad(format!("embedded asset {FONT_FILE} is missing")))?;
    let path = env::temp_dir().join(format!("tableout-{}.ttf", process::id()));
    fs::write(&path, font.data.as_ref())
        .map_err(|e| ExportError::FontLoad(format!("cannot stage {}: {e}", path.display())))?;
    debug!(path = %path.display(), "staged embedded font");
    Ok(path)
}

/// Remove the staged font file, if any.
///
/// Intended for process shutdown; safe to call when no table export ever
/// ran. Removal failures are ignored.
pub fn remove_staged_font() {
    if let Some(path) = STAGED.get() {
        let _ = fs::remove_file(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staging_is_idempotent() {
        let first = staged_font_path().unwrap();
        let second = staged_font_path().unwrap();
        assert_eq!(first, second);
        assert!(first.exists());

        let written = fs::read(first).unwrap();
        assert!(written.len() > 1000);
        // TrueType sfnt version tag.
        assert_eq!(&written[0..4], &[0x00, 0x01, 0x00, 0x00]);
    }
}
