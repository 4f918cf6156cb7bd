//! Loader for the line-delimited location-notes asset.

use std::path::Path;
use tokio::fs;

/// Shown when the notes asset cannot be read, for whatever reason.
pub const NOTES_UNAVAILABLE: &str = "Unable to load the location notes.";

/// Read the notes file, one display paragraph per line.
///
/// This is a one-shot load; callers substitute [`NOTES_UNAVAILABLE`] for
/// any failure.
pub async fn load_notes(path: impl AsRef<Path>) -> Result<Vec<String>, std::io::Error> {
    let content = fs::read_to_string(path).await?;
    Ok(content.lines().map(str::to_string).collect())
}
