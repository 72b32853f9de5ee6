//! Uploaded file storage under the media root.

use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use uuid::Uuid;

pub const MEDIA_URL_PREFIX: &str = "/media/";
const AIRPLANE_UPLOAD_DIR: &str = "uploads/airplanes";

#[allow(clippy::expect_used)]
static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"));

/// Lowercase, with runs of anything but `[a-z0-9]` collapsed to `-`.
pub fn slugify(value: &str) -> String {
    let lowered = value.to_lowercase();
    NON_SLUG_CHARS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Extension (with leading dot) taken from the client-supplied file name.
fn extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", slugify(ext)))
        .filter(|ext| ext.len() > 1)
        .unwrap_or_default()
}

/// Relative path an airplane image is stored under.
pub fn airplane_image_path(airplane_name: &str, file_name: &str) -> String {
    let slug = slugify(airplane_name);
    let stem = if slug.is_empty() {
        "airplane".to_string()
    } else {
        slug
    };
    format!(
        "{AIRPLANE_UPLOAD_DIR}/{stem}-{}{}",
        Uuid::new_v4(),
        extension(file_name)
    )
}

/// Write `bytes` to `media_root/relative`, creating directories as needed.
pub async fn save(media_root: &Path, relative: &str, bytes: &[u8]) -> Result<()> {
    let target = media_root.join(relative);
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&target, bytes).await?;
    Ok(())
}

pub fn media_url(relative: &str) -> String {
    format!("{MEDIA_URL_PREFIX}{relative}")
}
