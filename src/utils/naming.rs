//! Filename derivation for exported images.
//!
//! Export destinations are built from the entry title plus a short id
//! suffix so repeated titles cannot collide: `{safe_title}_{id6}.{ext}`.
//! The extension comes from the entry's MIME type, defaulting to `png`
//! when none is recorded.

/// Replace every non-ASCII-alphanumeric character with `_` and lowercase
/// the rest. The output alphabet is `[a-z0-9_]`.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

/// Extension from a MIME type's subtype, e.g. `image/jpeg` -> `jpeg`.
/// Falls back to `png` when the MIME type is absent or malformed.
pub fn extension_from_mime(mime: Option<&str>) -> &str {
    match mime.and_then(|m| m.split('/').nth(1)).filter(|s| !s.is_empty()) {
        Some(ext) => ext,
        None => "png",
    }
}

/// MIME type guessed from a file extension. Inverse of
/// [`extension_from_mime`] for the extensions the import filter accepts.
pub fn mime_from_extension(ext: &str) -> String {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        "svg" => "image/svg+xml".to_string(),
        other => format!("image/{}", other),
    }
}

/// Destination filename for an entry: sanitized title, first six characters
/// of the id, extension from the MIME type.
pub fn export_file_name(title: &str, id: &str, mime: Option<&str>) -> String {
    let short_id: String = id.chars().take(6).collect();
    format!(
        "{}_{}.{}",
        sanitize_title(title),
        short_id,
        extension_from_mime(mime)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_non_alphanumerics() {
        assert_eq!(sanitize_title("My Photo (1)!"), "my_photo__1__");
    }

    #[test]
    fn sanitize_lowercases() {
        assert_eq!(sanitize_title("SunSet"), "sunset");
    }

    #[test]
    fn sanitize_output_alphabet() {
        let s = sanitize_title("Grüße & Küsse: 100%");
        assert!(s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
    }

    #[test]
    fn extension_from_image_mime() {
        assert_eq!(extension_from_mime(Some("image/jpeg")), "jpeg");
        assert_eq!(extension_from_mime(Some("image/webp")), "webp");
    }

    #[test]
    fn extension_defaults_to_png() {
        assert_eq!(extension_from_mime(None), "png");
        assert_eq!(extension_from_mime(Some("image/")), "png");
        assert_eq!(extension_from_mime(Some("weird")), "png");
    }

    #[test]
    fn export_file_name_shape() {
        let name = export_file_name("Sun & Sea", "a1b2c3d4-e5", Some("image/png"));
        assert_eq!(name, "sun___sea_a1b2c3.png");
        // exactly one extension separator
        assert_eq!(name.matches('.').count(), 1);
    }

    #[test]
    fn export_file_name_short_id() {
        assert_eq!(export_file_name("x", "abc", None), "x_abc.png");
    }

    #[test]
    fn mime_guess_from_extension() {
        assert_eq!(mime_from_extension("JPG"), "image/jpeg");
        assert_eq!(mime_from_extension("svg"), "image/svg+xml");
        assert_eq!(mime_from_extension("webp"), "image/webp");
    }
}
