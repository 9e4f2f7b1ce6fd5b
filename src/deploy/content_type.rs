//! Content type detection for uploaded objects
//!
//! Stylesheets and scripts cannot be recognised from their bytes, so a small
//! extension table wins for them. Everything else is sniffed from the leading
//! bytes; when the sniffer only manages a generic answer, a known extension
//! refines it through `mime_guess`.

use std::path::Path;

pub const TEXT_HTML: &str = "text/html; charset=utf-8";
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Bytes inspected by the sniffer
const SNIFF_LEN: usize = 3072;

const EXTENSION_TABLE: &[(&str, &str)] = &[
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("mjs", "application/javascript"),
];

const MAGIC_TABLE: &[(&[u8], &str)] = &[
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"\xFF\xD8\xFF", "image/jpeg"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"%PDF-", "application/pdf"),
    (b"PK\x03\x04", "application/zip"),
    (b"\x1F\x8B\x08", "application/gzip"),
    (b"\x00asm", "application/wasm"),
    (b"wOFF", "font/woff"),
    (b"wOF2", "font/woff2"),
    (b"\x00\x00\x01\x00", "image/x-icon"),
];

const HTML_TAGS: &[&str] = &[
    "<!doctype html",
    "<html",
    "<head",
    "<body",
    "<script",
    "<iframe",
    "<title",
    "<style",
    "<table",
    "<font",
    "<div",
    "<h1",
    "<br",
    "<a",
    "<b",
    "<p",
    "<!--",
];

/// Content type for the object stored under `key` with contents `data`
pub fn detect(key: &str, data: &[u8]) -> String {
    if let Some(content_type) = by_extension(key) {
        return content_type.to_string();
    }

    let sniffed = sniff(data);
    if is_generic(sniffed) {
        if let Some(refined) = refine(key, sniffed) {
            return refined;
        }
    }
    sniffed.to_string()
}

fn extension(key: &str) -> Option<String> {
    Path::new(key)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

fn by_extension(key: &str) -> Option<&'static str> {
    let ext = extension(key)?;
    EXTENSION_TABLE
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, content_type)| *content_type)
}

fn is_generic(content_type: &str) -> bool {
    content_type == TEXT_PLAIN || content_type == OCTET_STREAM
}

fn refine(key: &str, sniffed: &str) -> Option<String> {
    extension(key)?;
    let guess = mime_guess::from_path(key).first()?;
    // A binary payload must not be relabelled as text
    if sniffed == OCTET_STREAM && guess.type_() == mime_guess::mime::TEXT {
        return None;
    }
    if guess.type_() == mime_guess::mime::TEXT {
        Some(format!("{}; charset=utf-8", guess.essence_str()))
    } else {
        Some(guess.essence_str().to_string())
    }
}

/// Guess a content type from the leading bytes of `data`
pub fn sniff(data: &[u8]) -> &'static str {
    let head = &data[..data.len().min(SNIFF_LEN)];

    if let Some((_, content_type)) = MAGIC_TABLE.iter().find(|(magic, _)| head.starts_with(magic)) {
        return *content_type;
    }
    if head.len() >= 12 && head.starts_with(b"RIFF") && &head[8..12] == b"WEBP" {
        return "image/webp";
    }

    let text = head.trim_ascii_start();
    if is_html(text) {
        return TEXT_HTML;
    }
    if starts_with_ignore_case(text, b"<svg") || (text.starts_with(b"<?xml") && contains(text, b"<svg")) {
        return "image/svg+xml";
    }
    if text.starts_with(b"<?xml") {
        return "text/xml; charset=utf-8";
    }
    if is_json(data) {
        return "application/json";
    }
    if is_text(head) {
        return TEXT_PLAIN;
    }
    OCTET_STREAM
}

fn is_html(text: &[u8]) -> bool {
    HTML_TAGS.iter().any(|tag| {
        let tag = tag.as_bytes();
        starts_with_ignore_case(text, tag)
            && match text.get(tag.len()) {
                Some(b) => *b == b' ' || *b == b'>' || tag == b"<!--",
                None => false,
            }
    })
}

fn is_json(data: &[u8]) -> bool {
    let trimmed = data.trim_ascii();
    matches!(trimmed.first(), Some(b'{') | Some(b'['))
        && serde_json::from_slice::<serde_json::Value>(trimmed).is_ok()
}

fn is_text(head: &[u8]) -> bool {
    let valid_utf8 = match std::str::from_utf8(head) {
        Ok(_) => true,
        // A multi-byte sequence cut off by the sniff window is still text
        Err(e) => e.error_len().is_none(),
    };
    valid_utf8
        && !head
            .iter()
            .any(|b| b.is_ascii_control() && !matches!(b, b'\t' | b'\n' | b'\r' | b'\x0C'))
}

fn starts_with_ignore_case(text: &[u8], prefix: &[u8]) -> bool {
    text.len() >= prefix.len() && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_table_wins() {
        assert_eq!(detect("style.css", b"body { color: red; }"), "text/css");
        assert_eq!(detect("assets/STYLE.CSS", b"<html>"), "text/css");
        assert_eq!(detect("assets/app.js", b"console.log(1)"), "application/javascript");
        assert_eq!(detect("module.mjs", b"export {}"), "application/javascript");
    }

    #[test]
    fn test_css_is_never_sniffed() {
        for body in [&b"\x89PNG\r\n\x1a\n"[..], b"", b"<!DOCTYPE html>", b"{}"] {
            assert_eq!(detect("style.css", body), "text/css");
        }
    }

    #[test]
    fn test_sniff_html() {
        assert_eq!(sniff(b"<!DOCTYPE html><html></html>"), TEXT_HTML);
        assert_eq!(sniff(b"\n  <html lang=\"en\">"), TEXT_HTML);
        assert_eq!(sniff(b"<p>hi</p>"), TEXT_HTML);
        assert_eq!(sniff(b"<!-- comment -->"), TEXT_HTML);
        assert_eq!(sniff(b"<pre>"), TEXT_PLAIN);
    }

    #[test]
    fn test_sniff_binary_formats() {
        assert_eq!(sniff(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"), "image/png");
        assert_eq!(sniff(b"\xFF\xD8\xFF\xE0\0\x10JFIF"), "image/jpeg");
        assert_eq!(sniff(b"GIF89a\x01\0"), "image/gif");
        assert_eq!(sniff(b"RIFF\x24\0\0\0WEBPVP8 "), "image/webp");
        assert_eq!(sniff(b"%PDF-1.7"), "application/pdf");
        assert_eq!(sniff(b"\0asm\x01\0\0\0"), "application/wasm");
        assert_eq!(sniff(b"wOF2\0\x01\0\0"), "font/woff2");
        assert_eq!(sniff(&[0xFE, 0x00, 0x01, 0x02]), OCTET_STREAM);
    }

    #[test]
    fn test_sniff_text_formats() {
        assert_eq!(sniff(b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>"), "image/svg+xml");
        assert_eq!(
            sniff(b"<?xml version=\"1.0\"?><svg></svg>"),
            "image/svg+xml"
        );
        assert_eq!(sniff(b"<?xml version=\"1.0\"?><feed/>"), "text/xml; charset=utf-8");
        assert_eq!(sniff(b"{\"name\": \"spare\"}"), "application/json");
        assert_eq!(sniff(b"{not json"), TEXT_PLAIN);
        assert_eq!(sniff(b"plain words\n"), TEXT_PLAIN);
        assert_eq!(sniff(b""), TEXT_PLAIN);
    }

    #[test]
    fn test_unknown_extension_uses_sniffer() {
        assert_eq!(detect("blob.xyz123", b"\x89PNG\r\n\x1a\n"), "image/png");
        assert_eq!(detect("LICENSE", b"MIT License"), TEXT_PLAIN);
        assert_eq!(detect("data.xyz123", &[0xFE, 0x00]), OCTET_STREAM);
    }

    #[test]
    fn test_known_extension_refines_generic_sniff() {
        assert_eq!(detect("index.html", b"hello"), TEXT_HTML);
        assert_eq!(detect("robots.txt", b"User-agent: *"), TEXT_PLAIN);
        assert_eq!(detect("bundle.tar", &[0x00, 0x01, 0x00, 0x00, 0x00]), "application/x-tar");
    }

    #[test]
    fn test_specific_sniff_is_not_overridden() {
        assert_eq!(detect("logo.txt", b"\x89PNG\r\n\x1a\n"), "image/png");
        assert_eq!(detect("page.htm", b"<html>"), TEXT_HTML);
    }

    #[test]
    fn test_binary_not_relabelled_as_text() {
        assert_eq!(detect("notes.txt", &[0x00, 0xFE, 0x01]), OCTET_STREAM);
    }
}
