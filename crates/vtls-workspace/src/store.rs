//! The set of open single-file components, keyed by URI.

use std::sync::Arc;

use dashmap::DashMap;
use lsp_types::Uri;

use crate::vue_document::VueDocument;

/// Maps document URIs to [`VueDocument`] snapshots.
///
/// Replacing a document replaces the whole snapshot; holders of the previous
/// `Arc` keep a consistent (if stale) view, and identity-keyed caches detect
/// the replacement through the template-data revision.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<String, Arc<VueDocument>>,
}

impl DocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, document: Arc<VueDocument>) {
        self.documents
            .insert(document.uri().as_str().to_string(), document);
    }

    #[must_use]
    pub fn get(&self, uri: &str) -> Option<Arc<VueDocument>> {
        self.documents.get(uri).map(|entry| Arc::clone(&entry))
    }

    /// Find the component that owns the given embedded template document.
    #[must_use]
    pub fn by_template_uri(&self, uri: &Uri) -> Option<Arc<VueDocument>> {
        self.documents.iter().find_map(|entry| {
            if entry.template_document().uri() == uri {
                Some(Arc::clone(&entry))
            } else {
                None
            }
        })
    }

    #[must_use]
    pub fn all(&self) -> Vec<Arc<VueDocument>> {
        self.documents
            .iter()
            .map(|entry| Arc::clone(&entry))
            .collect()
    }

    pub fn remove(&self, uri: &str) {
        self.documents.remove(uri);
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::document::LanguageId;
    use crate::document::TextDocument;
    use crate::sfc::TemplateData;

    use super::*;

    fn make_document(uri: &str, template_uri: &str) -> Arc<VueDocument> {
        let uri = Uri::from_str(uri).unwrap();
        let template_uri = Uri::from_str(template_uri).unwrap();
        Arc::new(VueDocument::new(
            uri.clone(),
            TextDocument::new(uri, String::new(), 1, LanguageId::Vue),
            TextDocument::new(template_uri, String::new(), 1, LanguageId::Html),
            TemplateData::default(),
        ))
    }

    #[test]
    fn test_lookup_by_template_uri() {
        let store = DocumentStore::new();
        store.insert(make_document(
            "file:///app/A.vue",
            "file:///app/A.vue.template",
        ));
        store.insert(make_document(
            "file:///app/B.vue",
            "file:///app/B.vue.template",
        ));

        let template_uri = Uri::from_str("file:///app/B.vue.template").unwrap();
        let found = store.by_template_uri(&template_uri).unwrap();
        assert_eq!(found.uri().as_str(), "file:///app/B.vue");

        let missing = Uri::from_str("file:///app/C.vue.template").unwrap();
        assert!(store.by_template_uri(&missing).is_none());
    }

    #[test]
    fn test_insert_replaces_snapshot() {
        let store = DocumentStore::new();
        store.insert(make_document(
            "file:///app/A.vue",
            "file:///app/A.vue.template",
        ));
        store.insert(make_document(
            "file:///app/A.vue",
            "file:///app/A.vue.template",
        ));
        assert_eq!(store.all().len(), 1);
    }
}
