use std::path::{Path, PathBuf};

use super::{LogoAsset, normalize_logo};

/// File names probed in the asset directory, in priority order.
pub const LOGO_CANDIDATES: [&str; 3] = [
    "finnova_logo.jpg",
    "finnova_logo.jpeg",
    "finnova_logo.png",
];

/// Returns the first candidate that exists as a regular file in `dir`.
pub fn find_logo(dir: &Path, candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Resolves, reads and normalizes the logo. Every failure collapses to
/// `None` so the caller falls back to a text header.
#[tracing::instrument(name = "load_logo", skip_all, fields(asset_dir = %dir.display()))]
pub fn load_logo(dir: &Path) -> Option<LogoAsset> {
    let Some(path) = find_logo(dir, &LOGO_CANDIDATES) else {
        tracing::warn!("Logo not found in asset directory, rendering without logo");
        return None;
    };

    tracing::info!(path = %path.display(), "Logo found");

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Logo could not be read");
            return None;
        }
    };

    normalize_logo(&bytes)
}
