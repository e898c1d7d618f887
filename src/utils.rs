use std::borrow::Cow;

static ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

fn contains_illegal_chars(name: &str) -> bool {
    name.contains(|c: char| ILLEGAL_CHARS.contains(&c) || c.is_control())
}

/// Strips characters that can't appear in a file name on common platforms.
///
/// Attachments are sent with whatever name the user's file had, so this keeps the
/// `filename` parameter of the multipart part sane.
///
/// # Example
/// ```
/// use perfume_form::utils::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("bleu.png"), "bleu.png");
/// assert_eq!(sanitize_file_name("a/b:c?.jpg"), "abc.jpg");
/// ```
#[must_use]
pub fn sanitize_file_name(name: &str) -> Cow<str> {
    if contains_illegal_chars(name) {
        let mut out = String::with_capacity(name.len());
        for ch in name.chars() {
            if !ILLEGAL_CHARS.contains(&ch) && !ch.is_control() {
                out.push(ch);
            }
        }
        Cow::Owned(out)
    } else {
        Cow::Borrowed(name)
    }
}

/// Tries to guess a MIME type from a file name's extension.
///
/// Only covers the image formats a catalog picture would realistically be in;
/// anything else is sent as `application/octet-stream`.
#[must_use]
pub fn guess_content_type(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
