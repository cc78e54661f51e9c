//! Public image URL derivation.

/// Joins an uploads base URL and a storage key with exactly one slash.
///
/// Trailing slashes are stripped from `base` and leading slashes from `key`,
/// so `("https://cdn.example.com/", "/abc.jpg")` and
/// `("https://cdn.example.com", "abc.jpg")` both yield
/// `https://cdn.example.com/abc.jpg`.
pub fn derive_image_url(base: &str, key: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        key.trim_start_matches('/')
    )
}

/// Builds the uploads base URL for an S3 bucket served over its default endpoint.
pub fn bucket_base_url(bucket: &str) -> String {
    format!("https://{}.s3.amazonaws.com", bucket)
}
