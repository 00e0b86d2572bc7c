//! Probe markers the upstream compiler plants in generated documents.
//!
//! Component prop/event discovery works by running the typed engine's
//! completion at a position that is structurally valid for the query. The
//! compiler inserts one marker comment per discovery site; the bridge finds
//! the marker text and probes immediately after it.

#[must_use]
pub fn props_completion(tag: &str) -> String {
    format!("/* vtls: props completion: {tag} */")
}

#[must_use]
pub fn emit_completion(tag: &str) -> String {
    format!("/* vtls: emit completion: {tag} */")
}

#[must_use]
pub fn global_attrs() -> &'static str {
    "/* vtls: global attrs completion */"
}
