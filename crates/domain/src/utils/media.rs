//! Media URL resolution
//!
//! Post images come back from the backend in several shapes: absolute URLs,
//! S3 links, `/media/...` paths served by the API host, or bare file names.
//! These helpers turn any of them into something a client can fetch.

const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg"];
const S3_HOST_MARKER: &str = "s3.eu-north-1.amazonaws.com";

/// Origin that serves uploaded media, derived from the API base URL by
/// dropping the `/api/` prefix.
#[must_use]
pub fn api_domain(base_url: &str) -> String {
    base_url.replacen("/api/", "", 1).trim_end_matches('/').to_string()
}

/// Resolve a stored image path to a fetchable URL.
///
/// Returns `None` for empty values and for anything that is not an image
/// file (the backend occasionally stores placeholder text files).
#[must_use]
pub fn image_url(domain: &str, image_path: Option<&str>) -> Option<String> {
    let path = image_path.map(str::trim).filter(|p| !p.is_empty())?;

    let lower = path.to_ascii_lowercase();
    if !IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return None;
    }

    if path.starts_with("http://") || path.starts_with("https://") || path.contains(S3_HOST_MARKER)
    {
        return Some(path.to_string());
    }

    if path.starts_with("/media/") {
        return Some(format!("{domain}{path}"));
    }

    Some(format!("{domain}/media/{}", path.trim_start_matches('/')))
}
