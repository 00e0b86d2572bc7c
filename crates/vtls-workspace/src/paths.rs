//! URI and path helpers.

use camino::Utf8Component;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use percent_encoding::percent_decode_str;

/// Convert a `file://` URI string to a filesystem path.
#[must_use]
pub fn uri_to_path(uri: &str) -> Option<Utf8PathBuf> {
    let rest = uri.strip_prefix("file://")?;
    let decoded = percent_decode_str(rest).decode_utf8().ok()?;
    Some(Utf8PathBuf::from(decoded.as_ref()))
}

/// Compute the relative path from `from_dir` to `to`.
#[must_use]
pub fn relative_path(from_dir: &Utf8Path, to: &Utf8Path) -> Utf8PathBuf {
    let from: Vec<Utf8Component> = from_dir.components().collect();
    let to_parts: Vec<Utf8Component> = to.components().collect();

    let mut common = 0;
    while common < from.len() && common < to_parts.len() && from[common] == to_parts[common] {
        common += 1;
    }

    let mut result = Utf8PathBuf::new();
    for _ in common..from.len() {
        result.push("..");
    }
    for part in &to_parts[common..] {
        result.push(part.as_str());
    }
    result
}

/// The base name a component takes from a file: the file stem, or the parent
/// directory's name for `index` files, with `.` rewritten to `-`.
#[must_use]
pub fn component_base_name(path: &Utf8Path) -> Option<String> {
    let mut base = path.file_stem()?.to_string();
    if base.eq_ignore_ascii_case("index") {
        if let Some(parent) = path.parent().and_then(Utf8Path::file_name) {
            base = parent.to_string();
        }
    }
    Some(base.replace('.', "-"))
}
