//! Per-locale alias (link) table

use std::collections::HashMap;

use indexmap::IndexMap;

/// Links stored for a single locale, in insertion order.
///
/// Overwriting an existing key keeps its position.
type LocaleLinks = IndexMap<String, String>;

/// First stored entry, in insertion order, whose key is a literal prefix of `key`.
fn find_prefix<'a>(links: &'a LocaleLinks, key: &str) -> Option<(&'a str, &'a str)> {
    links
        .iter()
        .find(|(from, _)| key.starts_with(from.as_str()))
        .map(|(from, to)| (from.as_str(), to.as_str()))
}

/// Locale → flat key → alias target.
///
/// Grows monotonically: resolved prefixes are memoized as exact entries.
/// Provides no internal synchronization; callers that share a table across
/// threads must serialize access themselves.
#[derive(Debug, Clone, Default)]
pub struct LinkTable {
    /// Links per locale, created on first write.
    locales: HashMap<String, LocaleLinks>,
    /// Number of prefix scans performed so far.
    prefix_scans: usize,
}

impl LinkTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `key → target` for `locale`, overwriting any previous target.
    pub fn store_link(&mut self, locale: &str, key: impl Into<String>, target: impl Into<String>) {
        let key = key.into();
        let target = target.into();
        tracing::trace!(locale, key = %key, target = %target, "Storing link");
        self.locales.entry(locale.to_string()).or_default().insert(key, target);
    }

    /// Resolve `key` through the links stored for `locale`.
    ///
    /// An exact entry wins immediately. Otherwise the first stored key (in
    /// insertion order) that is a literal prefix of `key` has its occurrence
    /// replaced by its target, and the result is memoized for `key`.
    /// Returns `None` when no link applies.
    ///
    /// Note that this is first-match, not longest-prefix-match: with both
    /// `a` and `a.b` stored, the one stored first decides.
    pub fn resolve_link(&mut self, locale: &str, key: &str) -> Option<String> {
        let links = self.locales.get(locale)?;

        if let Some(target) = links.get(key) {
            return Some(target.clone());
        }

        self.prefix_scans += 1;
        let (from, to) = find_prefix(links, key)?;
        let resolved = key.replacen(from, to, 1);
        tracing::debug!(locale, key, from, to, resolved = %resolved, "Resolved link by prefix");

        self.store_link(locale, key, resolved.clone());
        Some(resolved)
    }

    /// Exact stored target for `key`, without prefix resolution.
    #[must_use]
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.locales.get(locale).and_then(|links| links.get(key)).map(String::as_str)
    }

    /// Stored links for `locale` in insertion order.
    pub fn links_for(&self, locale: &str) -> impl Iterator<Item = (&str, &str)> {
        self.locales
            .get(locale)
            .into_iter()
            .flatten()
            .map(|(key, target)| (key.as_str(), target.as_str()))
    }

    /// Number of links stored for `locale`.
    #[must_use]
    pub fn len(&self, locale: &str) -> usize {
        self.locales.get(locale).map_or(0, IndexMap::len)
    }

    /// `true` when no locale has any link.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.values().all(IndexMap::is_empty)
    }

    /// Drop every link stored for `locale`.
    pub fn clear_locale(&mut self, locale: &str) {
        self.locales.remove(locale);
    }

    /// Drop every link for every locale.
    pub fn clear(&mut self) {
        self.locales.clear();
    }

    /// How many prefix scans `resolve_link` has performed.
    #[must_use]
    pub const fn prefix_scans(&self) -> usize {
        self.prefix_scans
    }
}
