//! Post-processing of the markup engine's completion list.
//!
//! Three passes, in order: expand event modifiers, classify items by their
//! smuggled id token, then deduplicate by label. Classification moves the id
//! out of the user-visible documentation field and into the item's opaque
//! `data` payload for later resolution.

use lsp_types::CompletionItem;
use lsp_types::CompletionItemKind;
use lsp_types::CompletionItemLabelDetails;
use lsp_types::CompletionList;
use lsp_types::CompletionTextEdit;
use lsp_types::Documentation;
use lsp_types::Range;
use lsp_types::TextEdit;
use rustc_hash::FxHashMap;
use vtls_workspace::paths;
use vtls_workspace::TextDocument;
use vtls_workspace::VueDocument;

use camino::Utf8Path;

use crate::grammar::STRUCTURAL_DIRECTIVES;
use crate::item_id::ItemId;
use crate::item_id::ItemKind;
use crate::metadata::WILDCARD_TAG;
use crate::resolve::ResolveData;

/// Sort-text rank prefixes, lowest sorts first.
const RANK_COMPONENT_MEMBER: char = '\u{0000}';
const RANK_IDENTIFIED: char = '\u{0001}';
const RANK_DIRECTIVE: char = '\u{0002}';
const RANK_DEPRIORITIZED: char = '\u{0003}';

/// `v-on` modifiers offered when the text being completed is already an
/// event binding.
const EVENT_MODIFIERS: &[(&str, &str)] = &[
    ("stop", "call event.stopPropagation()."),
    ("prevent", "call event.preventDefault()."),
    ("capture", "add event listener in capture mode."),
    (
        "self",
        "only trigger handler if event was dispatched from this element.",
    ),
    ("once", "trigger handler at most once."),
    ("left", "only trigger handler for left button mouse events."),
    ("right", "only trigger handler for right button mouse events."),
    ("middle", "only trigger handler for middle button mouse events."),
    ("passive", "attaches a DOM event with { passive: true }."),
];

#[derive(Debug, Clone, Copy, Default)]
struct Classified {
    identified: bool,
    self_import: bool,
}

pub(crate) fn post_process(
    list: &mut CompletionList,
    document: &TextDocument,
    vue_doc: &VueDocument,
    side_table: &FxHashMap<String, CompletionItem>,
    workspace_root: &Utf8Path,
) {
    expand_event_modifiers(list, document);

    let mut flags = Vec::with_capacity(list.items.len());
    for item in &mut list.items {
        flags.push(classify_item(item, vue_doc, side_table, workspace_root));
    }

    dedup_by_label(list, &flags);
}

/// When the replaced text is an event binding with at least one `.modifier`,
/// offer the remaining modifiers as additional items.
fn expand_event_modifiers(list: &mut CompletionList, document: &TextDocument) {
    let Some((range, text)) = find_replacement(list, document) else {
        return;
    };
    if !(text.starts_with('@') || text.starts_with("v-on:")) || !text.contains('.') {
        return;
    }

    let mut parts = text.split('.');
    let base = parts.next().unwrap_or("").to_string();
    let present: Vec<&str> = parts.collect();

    for (modifier, description) in EVENT_MODIFIERS {
        if present.contains(modifier) {
            continue;
        }
        list.items.push(CompletionItem {
            label: (*modifier).to_string(),
            kind: Some(CompletionItemKind::ENUM_MEMBER),
            documentation: Some(Documentation::String((*description).to_string())),
            filter_text: Some(format!("{base}.{modifier}")),
            text_edit: Some(CompletionTextEdit::Edit(TextEdit {
                range,
                new_text: format!("{base}.{modifier}"),
            })),
            ..CompletionItem::default()
        });
    }
}

/// The source text the first edit-carrying item would replace.
fn find_replacement(list: &CompletionList, document: &TextDocument) -> Option<(Range, String)> {
    list.items.iter().find_map(|item| match &item.text_edit {
        Some(CompletionTextEdit::Edit(edit)) => document
            .get_text_range(edit.range)
            .map(|text| (edit.range, text)),
        _ => None,
    })
}

fn classify_item(
    item: &mut CompletionItem,
    vue_doc: &VueDocument,
    side_table: &FxHashMap<String, CompletionItem>,
    workspace_root: &Utf8Path,
) -> Classified {
    let token = match &item.documentation {
        Some(Documentation::String(text)) => Some(text.clone()),
        Some(Documentation::MarkupContent(markup)) => Some(markup.value.clone()),
        None => None,
    };
    let Some(id) = token.as_deref().and_then(ItemId::decode) else {
        return Classified::default();
    };
    item.documentation = None;

    let mut self_import = false;
    match id.kind {
        ItemKind::ImportFile => {
            let file_uri = id.args.first().cloned().unwrap_or_default();
            self_import = file_uri == vue_doc.uri().as_str();

            let r_path = paths::uri_to_path(&file_uri)
                .map_or_else(|| file_uri.clone(), |path| {
                    paths::relative_path(workspace_root, &path).to_string()
                });
            item.label_details = Some(CompletionItemLabelDetails {
                detail: None,
                description: Some(r_path.clone()),
            });
            item.filter_text = Some(format!("{} {r_path}", item.label));
            item.detail = Some(r_path);
            item.kind = Some(CompletionItemKind::FILE);
            set_sort_rank(item, RANK_DEPRIORITIZED);
            item.data = serde_json::to_value(ResolveData::AutoImport {
                source_document_uri: vue_doc.uri().as_str().to_string(),
                import_uri: file_uri,
            })
            .ok();
        }
        _ => {
            let ts_item = token
                .as_deref()
                .and_then(|key| side_table.get(key))
                .cloned();
            match id.kind {
                ItemKind::ComponentProp | ItemKind::ComponentEvent => {
                    if id.args.first().map(String::as_str) != Some(WILDCARD_TAG) {
                        set_sort_rank(item, RANK_COMPONENT_MEMBER);
                    }
                    if ts_item.is_some() {
                        item.kind = Some(if id.kind == ItemKind::ComponentProp {
                            CompletionItemKind::PROPERTY
                        } else {
                            CompletionItemKind::EVENT
                        });
                    }
                }
                _ if STRUCTURAL_DIRECTIVES.contains(&item.label.as_str()) => {
                    item.kind = Some(CompletionItemKind::METHOD);
                    set_sort_rank(item, RANK_DEPRIORITIZED);
                }
                _ if item.label.starts_with("v-") => {
                    item.kind = Some(CompletionItemKind::FUNCTION);
                    set_sort_rank(item, RANK_DIRECTIVE);
                }
                _ => set_sort_rank(item, RANK_IDENTIFIED),
            }
            item.data = serde_json::to_value(ResolveData::Grammar { ts_item }).ok();
        }
    }

    Classified {
        identified: true,
        self_import,
    }
}

fn set_sort_rank(item: &mut CompletionItem, rank: char) {
    let tail = item
        .sort_text
        .clone()
        .unwrap_or_else(|| item.label.clone());
    item.sort_text = Some(format!("{rank}{tail}"));
}

/// Collapse items sharing a label. The first identified item for a label
/// wins and locks the slot; until one is seen, later un-identified items
/// overwrite earlier ones. The winner keeps the first occurrence's position.
/// Items offering to import the current document are dropped outright.
fn dedup_by_label(list: &mut CompletionList, flags: &[Classified]) {
    let items = std::mem::take(&mut list.items);
    let mut order: Vec<CompletionItem> = Vec::with_capacity(items.len());
    let mut by_label: FxHashMap<String, (usize, bool)> = FxHashMap::default();

    for (item, class) in items.into_iter().zip(flags) {
        if class.self_import {
            continue;
        }
        match by_label.get(&item.label) {
            Some(&(_, true)) => {}
            Some(&(index, false)) => {
                by_label.insert(item.label.clone(), (index, class.identified));
                order[index] = item;
            }
            None => {
                by_label.insert(item.label.clone(), (order.len(), class.identified));
                order.push(item);
            }
        }
    }

    list.items = order;
}
