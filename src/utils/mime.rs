//! MIME type detection for media paths

use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const OCTET_STREAM: &str = "application/octet-stream";

/// Number of leading bytes inspected when the extension is unknown
const SNIFF_LEN: usize = 512;

const EXTENSION_TYPES: &[(&str, &str)] = &[
    ("3gp", "video/3gpp"),
    ("aac", "audio/aac"),
    ("avi", "video/avi"),
    ("flac", "audio/flac"),
    ("flv", "video/x-flv"),
    ("gif", "image/gif"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("m2ts", "video/mp2t"),
    ("m4a", "audio/mp4"),
    ("m4v", "video/x-m4v"),
    ("mkv", "video/x-matroska"),
    ("mov", "video/quicktime"),
    ("mp3", "audio/mpeg"),
    ("mp4", "video/mp4"),
    ("mpeg", "video/mpeg"),
    ("mpg", "video/mpeg"),
    ("mts", "video/mp2t"),
    ("oga", "audio/ogg"),
    ("ogg", "audio/ogg"),
    ("ogv", "video/ogg"),
    ("png", "image/png"),
    ("srt", "application/x-subrip"),
    ("ts", "video/mp2t"),
    ("vob", "video/mpeg"),
    ("wav", "audio/wav"),
    ("webm", "video/webm"),
    ("wma", "audio/x-ms-wma"),
    ("wmv", "video/x-ms-wmv"),
];

/// Guess the MIME type of a file from its extension, then its content
///
/// Falls back to `application/octet-stream` when neither gives an answer.
pub fn mime_type_by_path(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    let mime = mime_type_by_extension(path)
        .or_else(|| mime_type_by_content(path))
        .unwrap_or(OCTET_STREAM);
    normalize(mime).to_string()
}

/// Table lookup on the lowercased extension
pub fn mime_type_by_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    EXTENSION_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

/// Sniff the first bytes of the file; unreadable files yield `None`
pub fn mime_type_by_content(path: &Path) -> Option<&'static str> {
    let mut file = File::open(path).ok()?;
    let mut buf = Vec::with_capacity(SNIFF_LEN);
    file.by_ref()
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut buf)
        .ok()?;
    sniff(&buf)
}

/// Match well-known magic numbers
pub fn sniff(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]) {
        // EBML header; the doctype says which flavour
        return Some(if contains(data, b"webm") {
            "video/webm"
        } else {
            "video/x-matroska"
        });
    }
    if data.len() >= 12 && &data[4..8] == b"ftyp" {
        return Some(if &data[8..11] == b"qt " {
            "video/quicktime"
        } else {
            "video/mp4"
        });
    }
    if data.starts_with(b"RIFF") && data.len() >= 12 {
        return match &data[8..12] {
            b"AVI " => Some("video/x-msvideo"),
            b"WAVE" => Some("audio/wav"),
            _ => None,
        };
    }
    if data.starts_with(&[0x00, 0x00, 0x01, 0xBA]) {
        return Some("video/mpeg");
    }
    if data.len() > 188 && data[0] == 0x47 && data[188] == 0x47 {
        return Some("video/mp2t");
    }
    if data.starts_with(b"OggS") {
        return Some("audio/ogg");
    }
    if data.starts_with(b"fLaC") {
        return Some("audio/flac");
    }
    if data.starts_with(b"ID3") {
        return Some("audio/mpeg");
    }
    if data.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("image/png");
    }
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    None
}

fn normalize(mime: &'static str) -> &'static str {
    match mime {
        "video/x-msvideo" => "video/avi",
        other => other,
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
