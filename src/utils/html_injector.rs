//! Script injection into HTML documents.

use axum::http::{HeaderMap, header};

/// Closing tag the script is inserted in front of.
pub const BODY_CLOSE_TAG: &str = "</body>";

/// Media type token identifying HTML responses.
const HTML_MEDIA_TYPE: &str = "text/html";

/// Returns `true` if the `Content-Type` header declares HTML.
///
/// Matching is a case-insensitive substring check, so parameters such as
/// `; charset=utf-8` are accepted. A missing or non-ASCII header is not HTML.
pub fn is_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.to_ascii_lowercase().contains(HTML_MEDIA_TYPE))
}

/// Returns `true` if the body is encoded (gzip, br, ...) and therefore
/// cannot be scanned as text.
pub fn is_encoded(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|enc| !enc.trim().eq_ignore_ascii_case("identity"))
}

/// Inserts `script` immediately before the first `</body>`.
///
/// Matching is case-sensitive and only the first occurrence is touched, so
/// malformed documents with several closing tags get a single injection.
/// Returns `None` when the document has no closing body tag.
///
/// # Examples
///
/// ```ignore
/// let html = "<html><body><p>hi</p></body></html>";
/// assert_eq!(
///     inject_script(html, "<script></script>").unwrap(),
///     "<html><body><p>hi</p><script></script></body></html>"
/// );
/// ```
pub fn inject_script(html: &str, script: &str) -> Option<String> {
    let pos = html.find(BODY_CLOSE_TAG)?;

    let mut out = String::with_capacity(html.len() + script.len());
    out.push_str(&html[..pos]);
    out.push_str(script);
    out.push_str(&html[pos..]);

    Some(out)
}

/// Byte-level variant of [`inject_script`].
///
/// Bodies that are not valid UTF-8 are left alone and yield `None`.
pub fn inject_script_bytes(body: &[u8], script: &str) -> Option<String> {
    let html = std::str::from_utf8(body).ok()?;
    inject_script(html, script)
}
