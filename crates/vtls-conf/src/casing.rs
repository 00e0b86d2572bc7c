use serde::Deserialize;

/// Per-document name-casing policy for synthesized tags and attributes.
///
/// Fetched once per completion/grammar-build cycle; when no configuration is
/// available the defaults apply (`both` tags, `kebab` attributes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct NameCasing {
    pub tag: TagCasing,
    pub attr: AttrCasing,
}

/// Which casing variants of a component name appear as tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagCasing {
    /// Offer both the hyphenated and the exact form.
    #[default]
    Both,
    Kebab,
    Pascal,
}

/// How bound property and event names are rendered as attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttrCasing {
    #[default]
    Kebab,
    Camel,
}
