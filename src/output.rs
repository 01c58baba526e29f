use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ScrapeError;
use crate::models::Listing;

/// Serializes the final collection as a pretty-printed JSON array. The
/// document is written to a temporary sibling first and renamed into
/// place, so a failed run never leaves a truncated file at the
/// destination.
pub fn write_listings(listings: &[Listing], path: &Path) -> Result<(), ScrapeError> {
    let json = serde_json::to_string_pretty(listings).map_err(|e| ScrapeError::Write {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let tmp_path = tmp_sibling(path);
    fs::write(&tmp_path, &json).map_err(|e| ScrapeError::Write {
        path: tmp_path.display().to_string(),
        reason: e.to_string(),
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        ScrapeError::Write {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok(())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
