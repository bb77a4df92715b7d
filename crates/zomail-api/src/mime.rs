//! MIME type resolution for attachment uploads

use std::path::Path;

use mime_guess::from_ext;

/// Fixed table for extensions the registry lookup does not cover.
fn fallback(ext: &str) -> &'static str {
    match ext {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "zip" => "application/zip",
        "doc" | "docx" => "application/msword",
        "txt" => "text/plain",
        "csv" => "text/csv",
        _ => "application/octet-stream",
    }
}

/// Resolve a MIME type from a file's extension.
///
/// Best-effort: registry lookup first, then the fixed table, defaulting to
/// `application/octet-stream` for anything unknown.
pub fn content_type_for(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match from_ext(&ext).first() {
        Some(mime) => mime.essence_str().to_string(),
        None => fallback(&ext).to_string(),
    }
}
