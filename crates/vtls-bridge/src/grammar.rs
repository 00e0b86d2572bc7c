//! Synthesis of the per-request markup grammar.
//!
//! For every discovered component the grammar carries the tag name in the
//! configured casing variants, prop attributes in bare/`:`/`v-bind:` forms,
//! and event attributes in `v-on:`/`@` forms. Tags and attributes are tagged
//! with encoded [`ItemId`] tokens in their description field so that the
//! post-processing pass can recognize which completion items came from here.

use lsp_types::CompletionItem;
use rustc_hash::FxHashMap;
use vtls_conf::AttrCasing;
use vtls_conf::NameCasing;
use vtls_conf::TagCasing;
use vtls_workspace::paths;
use vtls_workspace::DocumentStore;
use vtls_workspace::VueDocument;

use crate::casing::hyphenate;
use crate::casing::pascal_case;
use crate::engines::AttributeData;
use crate::engines::GrammarData;
use crate::engines::TagData;
use crate::item_id::ItemId;
use crate::item_id::ItemKind;
use crate::metadata::ComponentMetadataMap;
use crate::metadata::WILDCARD_TAG;

pub(crate) const STRUCTURAL_DIRECTIVES: &[&str] = &["v-if", "v-else-if", "v-else", "v-for"];

/// A synthesized grammar plus the side table mapping each encoded id token
/// back to the typed-engine completion item it came from.
pub(crate) struct SynthesizedGrammar {
    pub grammar: Vec<GrammarData>,
    pub side_table: FxHashMap<String, CompletionItem>,
}

pub(crate) fn synthesize_grammar(
    vue_doc: &VueDocument,
    documents: &DocumentStore,
    casing: NameCasing,
    metadata: &ComponentMetadataMap,
    auto_import: bool,
) -> SynthesizedGrammar {
    let mut tags = Vec::new();
    let mut global_attributes = Vec::new();
    let mut side_table = FxHashMap::default();

    for (component_name, meta) in metadata.iter() {
        for variant in tag_variants(component_name, casing.tag) {
            let is_wildcard = variant == WILDCARD_TAG;
            let mut attributes = Vec::new();
            {
                let target = if is_wildcard {
                    &mut global_attributes
                } else {
                    &mut attributes
                };

                for prop in &meta.bind {
                    let name = attr_name(&prop.label, casing.attr);
                    if hyphenate(&name).starts_with("on-") {
                        // Props named like event handlers surface as events.
                        let base = event_base_name(&name);
                        let key = ItemId::new(
                            ItemKind::ComponentEvent,
                            vec![variant.clone(), base.clone()],
                        )
                        .encode();
                        target.push(AttributeData::new(format!("v-on:{base}"), Some(key.clone())));
                        target.push(AttributeData::new(format!("@{base}"), Some(key.clone())));
                        side_table.insert(key, prop.clone());
                    } else {
                        let key = ItemId::new(
                            ItemKind::ComponentProp,
                            vec![variant.clone(), name.clone()],
                        )
                        .encode();
                        target.push(AttributeData::new(name.clone(), Some(key.clone())));
                        target.push(AttributeData::new(format!(":{name}"), Some(key.clone())));
                        target.push(AttributeData::new(
                            format!("v-bind:{name}"),
                            Some(key.clone()),
                        ));
                        side_table.insert(key, prop.clone());
                    }
                }

                for event in &meta.on {
                    let name = attr_name(&event.label, casing.attr);
                    let key = ItemId::new(
                        ItemKind::ComponentEvent,
                        vec![variant.clone(), name.clone()],
                    )
                    .encode();
                    target.push(AttributeData::new(format!("v-on:{name}"), Some(key.clone())));
                    target.push(AttributeData::new(format!("@{name}"), Some(key.clone())));
                    side_table.insert(key, event.clone());
                }
            }

            let component_key = ItemId::new(ItemKind::Component, vec![variant.clone()]).encode();
            if !is_wildcard {
                tags.push(TagData {
                    name: variant.clone(),
                    description: Some(component_key.clone()),
                    attributes,
                });
            }
            if let Some(item) = &meta.tag_item {
                side_table.insert(component_key, item.clone());
            }
        }
    }

    if auto_import
        && (vue_doc.descriptor().script.is_some() || vue_doc.descriptor().script_setup.is_some())
    {
        append_import_tags(vue_doc, documents, casing.tag, metadata, &mut tags);
    }

    SynthesizedGrammar {
        grammar: vec![
            global_directive_grammar(),
            GrammarData {
                tags,
                global_attributes,
            },
        ],
        side_table,
    }
}

/// Tags offering to import sibling documents that are not yet registered
/// as components. The current document never offers to import itself.
fn append_import_tags(
    vue_doc: &VueDocument,
    documents: &DocumentStore,
    casing: TagCasing,
    metadata: &ComponentMetadataMap,
    tags: &mut Vec<TagData>,
) {
    let mut others = documents.all();
    others.sort_by(|a, b| a.uri().as_str().cmp(b.uri().as_str()));

    for other in others {
        if other.uri() == vue_doc.uri() {
            continue;
        }
        let Some(path) = paths::uri_to_path(other.uri().as_str()) else {
            continue;
        };
        let Some(base) = paths::component_base_name(&path) else {
            continue;
        };
        let kebab = hyphenate(&base);
        let pascal = pascal_case(&base);

        // A registered component with the same name keeps its meaning; the
        // import tag gets an integer suffix instead.
        let mut suffix = String::new();
        if metadata.contains(&kebab) || metadata.contains(&pascal) {
            let mut n: u32 = 1;
            while metadata.contains(&format!("{kebab}{n}")) || metadata.contains(&format!("{pascal}{n}"))
            {
                n += 1;
            }
            suffix = n.to_string();
        }

        let name = match casing {
            TagCasing::Kebab => kebab,
            TagCasing::Pascal | TagCasing::Both => pascal,
        };
        tags.push(TagData {
            name: format!("{name}{suffix}"),
            description: Some(
                ItemId::new(
                    ItemKind::ImportFile,
                    vec![other.uri().as_str().to_string()],
                )
                .encode(),
            ),
            attributes: Vec::new(),
        });
    }
}

/// The structural directives, valid on any tag.
fn global_directive_grammar() -> GrammarData {
    let global_attributes = STRUCTURAL_DIRECTIVES
        .iter()
        .map(|name| {
            AttributeData::new(
                *name,
                Some(ItemId::new(ItemKind::Directive, vec![(*name).to_string()]).encode()),
            )
        })
        .collect();
    GrammarData {
        tags: Vec::new(),
        global_attributes,
    }
}

fn tag_variants(name: &str, casing: TagCasing) -> Vec<String> {
    match casing {
        TagCasing::Kebab => vec![hyphenate(name)],
        TagCasing::Pascal => vec![name.to_string()],
        TagCasing::Both => {
            let hyphenated = hyphenate(name);
            if hyphenated == name {
                vec![hyphenated]
            } else {
                vec![hyphenated, name.to_string()]
            }
        }
    }
}

fn attr_name(label: &str, casing: AttrCasing) -> String {
    match casing {
        AttrCasing::Kebab => hyphenate(label),
        AttrCasing::Camel => label.to_string(),
    }
}

/// Strip the `on` prefix from an event-handler prop name, in either casing.
fn event_base_name(name: &str) -> String {
    if let Some(rest) = name.strip_prefix("on-") {
        return rest.to_string();
    }
    let rest = name.get(2..).unwrap_or("");
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
