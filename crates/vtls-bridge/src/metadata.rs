//! Per-tag prop/event completion data discovered through the typed engine.
//!
//! Discovery probes the generated document at the marker locations the
//! upstream compiler inserted (see [`vtls_workspace::markers`]). Results are
//! cached per document, keyed to the identity of the template-data snapshot:
//! any new snapshot invalidates the previous entry even when textually
//! identical, trading a cache miss for never serving stale data.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use lsp_types::CompletionItem;
use lsp_types::CompletionItemKind;
use vtls_workspace::markers;
use vtls_workspace::GeneratedDocument;
use vtls_workspace::VueDocument;

use crate::engines::TypedEngine;

/// The wildcard key holding global/fallback attributes not scoped to one
/// component.
pub(crate) const WILDCARD_TAG: &str = "*";

#[derive(Debug, Clone, Default)]
pub(crate) struct ComponentMetadata {
    pub tag_item: Option<CompletionItem>,
    pub bind: Vec<CompletionItem>,
    pub on: Vec<CompletionItem>,
}

/// Ordered tag-name → metadata map; insertion order is preserved because it
/// determines grammar synthesis order.
#[derive(Debug, Clone, Default)]
pub(crate) struct ComponentMetadataMap {
    entries: Vec<(String, ComponentMetadata)>,
}

impl ComponentMetadataMap {
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(entry_name, _)| entry_name == name)
    }

    pub fn push(&mut self, name: String, metadata: ComponentMetadata) {
        self.entries.push((name, metadata));
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, ComponentMetadata)> {
        self.entries.iter()
    }
}

#[derive(Debug)]
pub(crate) struct VersionedMetadata {
    pub revision: u64,
    pub map: ComponentMetadataMap,
}

/// Identity-keyed cache of discovery results, one entry per document URI.
#[derive(Debug, Default)]
pub(crate) struct ComponentMetadataCache {
    cache: DashMap<String, Arc<VersionedMetadata>>,
}

impl ComponentMetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(
        &self,
        vue_doc: &VueDocument,
        typed: &dyn TypedEngine,
    ) -> Arc<VersionedMetadata> {
        let key = vue_doc.uri().as_str().to_string();
        let revision = vue_doc.template_data().revision;

        if let Some(entry) = self.cache.get(&key) {
            if entry.revision == revision {
                return Arc::clone(&entry);
            }
        }

        let map = compute_metadata(vue_doc, typed).await;
        let computed = Arc::new(VersionedMetadata { revision, map });

        // The probes above suspend; a newer snapshot may have been cached in
        // the meantime. Re-check before writing and discard a stale write.
        match self.cache.entry(key) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().revision < revision {
                    occupied.insert(Arc::clone(&computed));
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Arc::clone(&computed));
            }
        }

        computed
    }
}

async fn compute_metadata(vue_doc: &VueDocument, typed: &dyn TypedEngine) -> ComponentMetadataMap {
    let mut map = ComponentMetadataMap::default();
    let Some(generated) = vue_doc.generated() else {
        return map;
    };

    let data = vue_doc.template_data();
    let named: Vec<(String, Option<CompletionItem>)> = data
        .component_items
        .iter()
        .map(|item| (item.label.clone(), Some(item.clone())))
        .chain(
            data.tag_names
                .iter()
                .filter(|tag| tag.contains('.'))
                .map(|tag| (tag.clone(), None)),
        )
        .collect();

    for (name, tag_item) in named {
        if map.contains(&name) {
            continue;
        }
        let bind = probe(typed, generated, &markers::props_completion(&name)).await;
        let on = probe(typed, generated, &markers::emit_completion(&name)).await;
        map.push(name, ComponentMetadata { tag_item, bind, on });
    }

    let global = probe(typed, generated, markers::global_attrs()).await;
    if !global.is_empty() {
        map.push(
            WILDCARD_TAG.to_string(),
            ComponentMetadata {
                tag_item: None,
                bind: global,
                on: Vec::new(),
            },
        );
    }

    map
}

/// Run the typed engine's completion just past `marker`. A missing marker or
/// a failing probe is "no data" for this probe only.
async fn probe(
    typed: &dyn TypedEngine,
    generated: &GeneratedDocument,
    marker: &str,
) -> Vec<CompletionItem> {
    let Some(index) = generated.content.find(marker) else {
        return Vec::new();
    };
    let offset = u32::try_from(index + marker.len()).unwrap_or(u32::MAX);

    match typed.complete(&generated.uri, offset).await {
        Ok(list) => list
            .items
            .into_iter()
            .map(|mut item| {
                item.label = item.label.trim_end_matches('?').to_string();
                item
            })
            .filter(|item| item.kind != Some(CompletionItemKind::TEXT))
            .collect(),
        Err(error) => {
            tracing::debug!(%error, marker, "typed completion probe failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::testing;

    #[tokio::test]
    async fn test_probe_strips_optionality_and_filters_text_items() {
        let (vue_doc, typed) = testing::fixture_with_component(
            "MyWidget",
            vec![
                testing::item("fooBar?"),
                testing::item_with_kind("noise", CompletionItemKind::TEXT),
            ],
            Vec::new(),
        );

        let cache = ComponentMetadataCache::new();
        let metadata = cache.get(&vue_doc, &typed).await;

        let (_, widget) = metadata
            .map
            .iter()
            .find(|(name, _)| name == "MyWidget")
            .unwrap();
        assert_eq!(widget.bind.len(), 1);
        assert_eq!(widget.bind[0].label, "fooBar");
    }

    #[tokio::test]
    async fn test_cache_hit_on_same_revision() {
        let (vue_doc, typed) =
            testing::fixture_with_component("MyWidget", vec![testing::item("fooBar")], Vec::new());

        let cache = ComponentMetadataCache::new();
        let first = cache.get(&vue_doc, &typed).await;
        let calls_after_first = typed.complete_calls.load(Ordering::SeqCst);

        let second = cache.get(&vue_doc, &typed).await;
        assert_eq!(typed.complete_calls.load(Ordering::SeqCst), calls_after_first);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_new_revision_invalidates() {
        let (vue_doc, typed) =
            testing::fixture_with_component("MyWidget", vec![testing::item("fooBar")], Vec::new());

        let cache = ComponentMetadataCache::new();
        cache.get(&vue_doc, &typed).await;
        let calls_after_first = typed.complete_calls.load(Ordering::SeqCst);

        let newer = testing::bump_revision(&vue_doc);
        cache.get(&newer, &typed).await;
        assert!(typed.complete_calls.load(Ordering::SeqCst) > calls_after_first);
    }

    #[tokio::test]
    async fn test_failing_probe_degrades_that_probe_only() {
        let (vue_doc, mut typed) =
            testing::fixture_with_component("MyWidget", vec![testing::item("fooBar")], vec![
                testing::item("update"),
            ]);
        let generated = vue_doc.generated().unwrap();
        let props_marker = markers::props_completion("MyWidget");
        let props_offset = u32::try_from(
            generated.content.find(&props_marker).unwrap() + props_marker.len(),
        )
        .unwrap();
        typed.failing_offsets.insert(props_offset);

        let cache = ComponentMetadataCache::new();
        let metadata = cache.get(&vue_doc, &typed).await;

        let (_, widget) = metadata
            .map
            .iter()
            .find(|(name, _)| name == "MyWidget")
            .unwrap();
        assert!(widget.bind.is_empty());
        assert_eq!(widget.on.len(), 1);
    }
}
