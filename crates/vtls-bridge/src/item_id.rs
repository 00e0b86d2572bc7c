//! Correlation identifiers smuggled through the markup engine.
//!
//! The markup grammar's attribute/tag description field is the only channel
//! that survives the round trip through the markup engine's completion, and
//! it only carries free text. Identifiers are therefore encoded into that
//! field as a prefixed string token; the string form exists only here, and
//! everything else operates on the decoded [`ItemId`].

const PREFIX: &str = "__vtls";
const SEPARATOR: &str = "::";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Component,
    ComponentProp,
    ComponentEvent,
    ImportFile,
    Directive,
}

impl ItemKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::ComponentProp => "componentProp",
            Self::ComponentEvent => "componentEvent",
            Self::ImportFile => "importFile",
            Self::Directive => "directive",
        }
    }

    fn from_str(value: &str) -> Option<Self> {
        match value {
            "component" => Some(Self::Component),
            "componentProp" => Some(Self::ComponentProp),
            "componentEvent" => Some(Self::ComponentEvent),
            "importFile" => Some(Self::ImportFile),
            "directive" => Some(Self::Directive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemId {
    pub kind: ItemKind,
    pub args: Vec<String>,
}

impl ItemId {
    #[must_use]
    pub fn new(kind: ItemKind, args: Vec<String>) -> Self {
        Self { kind, args }
    }

    /// Serialize to the string token form.
    ///
    /// Args must not contain `,` themselves; no escaping is performed and an
    /// arg containing the separator would decode ambiguously.
    #[must_use]
    pub fn encode(&self) -> String {
        format!(
            "{PREFIX}{SEPARATOR}{}{SEPARATOR}{}",
            self.kind.as_str(),
            self.args.join(",")
        )
    }

    /// Decode a string token. Anything not produced by [`Self::encode`]
    /// decodes to `None`.
    #[must_use]
    pub fn decode(token: &str) -> Option<Self> {
        let rest = token.strip_prefix(PREFIX)?.strip_prefix(SEPARATOR)?;
        let (kind, args) = rest.split_once(SEPARATOR)?;
        let kind = ItemKind::from_str(kind)?;
        let args = if args.is_empty() {
            vec![String::new()]
        } else {
            args.split(',').map(ToString::to_string).collect()
        };
        Some(Self { kind, args })
    }
}
