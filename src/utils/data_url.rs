//! Helpers for `data:` URIs.
//!
//! Uploaded and generated images keep their payload resident as base64;
//! their renderable `url` is a data URI composed from the MIME type and
//! that payload. Clients may also send full data URIs, which need the
//! prefix stripped before the payload is stored.

/// Compose a `data:{mime};base64,{payload}` URI.
pub fn to_data_url(mime: &str, base64: &str) -> String {
    format!("data:{};base64,{}", mime, base64)
}

/// Split a data URI into `(mime, payload)`. Returns `None` when the input
/// is not a base64 data URI.
pub fn split_data_url(url: &str) -> Option<(&str, &str)> {
    let rest = url.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    Some((mime, payload))
}

/// The raw base64 payload, whether the input is a bare payload or a full
/// data URI.
pub fn payload_of(data: &str) -> &str {
    match split_data_url(data) {
        Some((_, payload)) => payload,
        None => data,
    }
}
