//! Flattening and key resolution entry point

use super::keys::{
    FLATTEN_SEPARATOR,
    FlatMapping,
    flatten_keys,
};
use super::links::LinkTable;
use super::normalize::NormalizedKeyCache;
use crate::config::{
    ConfigError,
    FlattenSettings,
};
use crate::input::{
    TranslationTree,
    TranslationValue,
};

/// Switches for [`Flattener::flatten_translations_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenOptions {
    /// Escape literal separators inside key segments.
    pub escape: bool,
    /// Keep intermediate subtrees as entries.
    pub subtree: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self { escape: true, subtree: false }
    }
}

impl From<&FlattenSettings> for FlattenOptions {
    fn from(settings: &FlattenSettings) -> Self {
        Self { escape: settings.escape_keys, subtree: settings.subtree }
    }
}

/// Flattens translation trees and turns lookup requests into flat keys.
///
/// Owns the link table that both operations share. Not internally
/// synchronized: wrap it in a lock if several threads use one instance.
///
/// # Examples
/// ```
/// use i18n_flatten::flatten::Flattener;
/// use i18n_flatten::input::{TranslationTree, TranslationValue};
///
/// let tree = TranslationTree::new().with(
///     "errors",
///     TranslationTree::new()
///         .with("404", TranslationTree::new().with("title", "Not found"))
///         .with("not_found", TranslationValue::Alias("errors.404".into())),
/// );
///
/// let mut flattener = Flattener::default();
/// let flat = flattener.flatten_translations(&tree, "en", false);
///
/// let key = flattener.normalize_flat_keys("en", "not_found.title", &["errors"], None);
/// assert_eq!(key, "errors.404.title");
/// assert_eq!(flat.get(key.as_str()), Some(&&TranslationValue::Text("Not found".into())));
/// ```
#[derive(Debug, Clone)]
pub struct Flattener {
    /// Alias targets per locale.
    links: LinkTable,
    /// Memoized normalization results, one per distinct lookup request.
    normalized: NormalizedKeyCache,
    /// Separator used when a lookup does not specify one.
    default_separator: char,
}

impl Default for Flattener {
    fn default() -> Self {
        Self::new(FLATTEN_SEPARATOR)
    }
}

impl Flattener {
    #[must_use]
    pub fn new(default_separator: char) -> Self {
        Self { links: LinkTable::new(), normalized: NormalizedKeyCache::new(), default_separator }
    }

    /// Build a flattener from validated settings.
    ///
    /// # Errors
    /// Returns [`ConfigError::ValidationErrors`] when `settings` fail
    /// [`FlattenSettings::validate`].
    pub fn from_settings(settings: &FlattenSettings) -> Result<Self, ConfigError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;
        Ok(Self::new(settings.separator()))
    }

    #[must_use]
    pub const fn default_separator(&self) -> char {
        self.default_separator
    }

    /// Flatten `tree` for `locale`, escaping separators inside key segments.
    ///
    /// Every alias leaf is also stored in the link table under its flat key.
    pub fn flatten_translations<'a>(
        &mut self,
        tree: &'a TranslationTree,
        locale: &str,
        subtree: bool,
    ) -> FlatMapping<'a> {
        let options = FlattenOptions { subtree, ..FlattenOptions::default() };
        self.flatten_translations_with(tree, locale, options)
    }

    /// [`flatten_translations`](Self::flatten_translations) with explicit options.
    pub fn flatten_translations_with<'a>(
        &mut self,
        tree: &'a TranslationTree,
        locale: &str,
        options: FlattenOptions,
    ) -> FlatMapping<'a> {
        let mut flat = FlatMapping::new();
        let mut aliases = 0_usize;
        let links = &mut self.links;

        flatten_keys(tree, options.escape, |key, value| {
            if value.is_subtree() {
                if options.subtree {
                    flat.insert(key, value);
                }
                return;
            }
            if let Some(target) = value.as_alias() {
                links.store_link(locale, key.clone(), target);
                aliases += 1;
            }
            flat.insert(key, value);
        });

        tracing::debug!(locale, entries = flat.len(), aliases, "Flattened translations");
        flat
    }

    /// Turn a lookup request into the flat key used to index a [`FlatMapping`].
    ///
    /// `scope` segments are prepended to `key`; `separator` defaults to the
    /// configured one. The joined key is then resolved through the link table.
    pub fn normalize_flat_keys<S: AsRef<str>>(
        &mut self,
        locale: &str,
        key: &str,
        scope: &[S],
        separator: Option<char>,
    ) -> String {
        let separator = separator.unwrap_or(self.default_separator);
        let flat_key = self.normalized.normalize(key, scope, separator);
        self.resolve_link(locale, flat_key)
    }

    /// Store `key → target` for `locale`.
    pub fn store_link(&mut self, locale: &str, key: impl Into<String>, target: impl Into<String>) {
        self.links.store_link(locale, key, target);
    }

    /// Resolve `key` through the link table, returning it unchanged when no link applies.
    pub fn resolve_link(&mut self, locale: &str, key: String) -> String {
        self.links.resolve_link(locale, &key).unwrap_or(key)
    }

    #[must_use]
    pub const fn links(&self) -> &LinkTable {
        &self.links
    }

    /// Forget links for `locale`, or for every locale when `None`.
    pub fn reset_links(&mut self, locale: Option<&str>) {
        match locale {
            Some(locale) => self.links.clear_locale(locale),
            None => self.links.clear(),
        }
    }

    #[must_use]
    pub const fn normalized_keys(&self) -> &NormalizedKeyCache {
        &self.normalized
    }

    /// Drop memoized normalization results. Links are kept.
    pub fn clear_normalized_keys(&mut self) {
        self.normalized.clear();
    }

    /// Look up a lookup request directly in `flat`.
    pub fn lookup<'a, S: AsRef<str>>(
        &mut self,
        flat: &FlatMapping<'a>,
        locale: &str,
        key: &str,
        scope: &[S],
        separator: Option<char>,
    ) -> Option<&'a TranslationValue> {
        let flat_key = self.normalize_flat_keys(locale, key, scope, separator);
        flat.get(&flat_key).copied()
    }
}
