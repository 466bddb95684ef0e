//! Lookup key normalization

use std::hash::{
    Hash,
    Hasher,
};

use indexmap::{
    Equivalent,
    IndexMap,
};

use super::keys::{
    FLATTEN_SEPARATOR,
    SEPARATOR_ESCAPE_CHAR,
};

/// Join `scope` and `key` into a single flat key.
///
/// Empty segments are dropped. When `separator` is not [`FLATTEN_SEPARATOR`],
/// literal flatten separators become [`SEPARATOR_ESCAPE_CHAR`] and `separator`
/// becomes [`FLATTEN_SEPARATOR`], so `a/b` with `/` lines up with the
/// escaped keys produced by flattening.
///
/// # Examples
/// ```
/// use i18n_flatten::flatten::normalize_keys;
///
/// assert_eq!(normalize_keys("a/b", &["x"], '/'), normalize_keys("a.b", &["x"], '.'));
/// assert_eq!(normalize_keys("", &[] as &[&str], '.'), "");
/// ```
#[must_use]
pub fn normalize_keys<S: AsRef<str>>(key: &str, scope: &[S], separator: char) -> String {
    let joiner = FLATTEN_SEPARATOR.to_string();
    scope
        .iter()
        .map(AsRef::as_ref)
        .chain(std::iter::once(key))
        .filter(|segment| !segment.is_empty())
        .map(|segment| swap_separator(segment, separator))
        .collect::<Vec<_>>()
        .join(joiner.as_str())
}

/// Reinterpret a segment written with `separator` as an escaped flat key.
fn swap_separator(segment: &str, separator: char) -> String {
    if separator == FLATTEN_SEPARATOR {
        return segment.to_string();
    }
    segment
        .chars()
        .map(|c| {
            if c == FLATTEN_SEPARATOR {
                SEPARATOR_ESCAPE_CHAR
            } else if c == separator {
                FLATTEN_SEPARATOR
            } else {
                c
            }
        })
        .collect()
}

/// Hash a request so owned and borrowed forms land in the same bucket.
fn hash_request<'a, H: Hasher>(
    key: &str,
    scope: impl ExactSizeIterator<Item = &'a str>,
    separator: char,
    state: &mut H,
) {
    key.hash(state);
    state.write_usize(scope.len());
    for segment in scope {
        segment.hash(state);
    }
    separator.hash(state);
}

/// Cache key for [`NormalizedKeyCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
struct NormalizeRequest {
    /// Lookup key as given.
    key: String,
    /// Scope segments as given.
    scope: Vec<String>,
    /// Effective separator.
    separator: char,
}

impl Hash for NormalizeRequest {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_request(&self.key, self.scope.iter().map(String::as_str), self.separator, state);
    }
}

/// Borrowed [`NormalizeRequest`], so a cache hit allocates no key.
struct NormalizeQuery<'a, S> {
    /// Lookup key as given.
    key: &'a str,
    /// Scope segments as given.
    scope: &'a [S],
    /// Effective separator.
    separator: char,
}

impl<S: AsRef<str>> Hash for NormalizeQuery<'_, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_request(self.key, self.scope.iter().map(AsRef::as_ref), self.separator, state);
    }
}

impl<S: AsRef<str>> Equivalent<NormalizeRequest> for NormalizeQuery<'_, S> {
    fn equivalent(&self, request: &NormalizeRequest) -> bool {
        self.separator == request.separator
            && self.key == request.key
            && self.scope.len() == request.scope.len()
            && self.scope.iter().zip(&request.scope).all(|(s, r)| s.as_ref() == r.as_str())
    }
}

/// Memoizes [`normalize_keys`] per `(key, scope, separator)`.
///
/// Entries are never evicted: the cache holds one entry per distinct request
/// until [`clear`](Self::clear) is called.
#[derive(Debug, Clone, Default)]
pub struct NormalizedKeyCache {
    /// Normalized keys by request.
    entries: IndexMap<NormalizeRequest, String>,
}

impl NormalizedKeyCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached [`normalize_keys`].
    pub fn normalize<S: AsRef<str>>(&mut self, key: &str, scope: &[S], separator: char) -> String {
        if let Some(normalized) = self.entries.get(&NormalizeQuery { key, scope, separator }) {
            return normalized.clone();
        }

        let normalized = normalize_keys(key, scope, separator);
        let request = NormalizeRequest {
            key: key.to_string(),
            scope: scope.iter().map(|s| s.as_ref().to_string()).collect(),
            separator,
        };
        self.entries.insert(request, normalized.clone());
        normalized
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    /// Scope-free shorthand.
    const NO_SCOPE: &[&str] = &[];

    #[rstest]
    #[case("hello", NO_SCOPE, '.', "hello")]
    #[case("b.c", &["a"], '.', "a.b.c")]
    #[case("c", &["a", "b"], '.', "a.b.c")]
    #[case("", &["a", "b"], '.', "a.b")]
    #[case("c", &["", "b"], '.', "b.c")]
    #[case("", NO_SCOPE, '.', "")]
    // Custom separators are swapped with the flatten separator
    #[case("a/b", &["x"], '/', "x.a.b")]
    #[case("a.b/c", NO_SCOPE, '/', "a\u{1}b.c")]
    #[case("v1.0", &["release"], ':', "release.v1\u{1}0")]
    fn normalize_keys_cases(
        #[case] key: &str,
        #[case] scope: &[&str],
        #[case] separator: char,
        #[case] expected: &str,
    ) {
        assert_that!(normalize_keys(key, scope, separator), eq(expected));
    }

    #[rstest]
    fn custom_separator_matches_default_separator() {
        assert_that!(normalize_keys("a/b", &["x"], '/'), eq(&normalize_keys("a.b", &["x"], '.')));
    }

    #[rstest]
    fn cache_returns_same_result_and_grows_once() {
        let mut cache = NormalizedKeyCache::new();

        let first = cache.normalize("b/c", &["a"], '/');
        let second = cache.normalize("b/c", &["a"], '/');

        assert_that!(first, eq("a.b.c"));
        assert_that!(second, eq(&first));
        assert_that!(cache.len(), eq(1));
    }

    #[rstest]
    fn cache_distinguishes_separator() {
        let mut cache = NormalizedKeyCache::new();

        let slash = cache.normalize("a/b", NO_SCOPE, '/');
        let dot = cache.normalize("a/b", NO_SCOPE, '.');

        assert_that!(slash, eq("a.b"));
        assert_that!(dot, eq("a/b"));
        assert_that!(cache.len(), eq(2));

        cache.clear();
        assert_that!(cache.is_empty(), eq(true));
    }

    #[rstest]
    fn cache_hit_is_independent_of_scope_type() {
        let mut cache = NormalizedKeyCache::new();
        let owned = vec!["a".to_string(), "b".to_string()];

        let first = cache.normalize("c", &["a", "b"], '.');
        let second = cache.normalize("c", owned.as_slice(), '.');

        assert_that!(second, eq(&first));
        assert_that!(cache.len(), eq(1));
    }

    #[rstest]
    #[case(&["ab"], &["a", "b"])]
    #[case(&["a", ""], &["a"])]
    #[case(NO_SCOPE, &[""])]
    fn cache_keeps_scope_boundaries_apart(#[case] left: &[&str], #[case] right: &[&str]) {
        let mut cache = NormalizedKeyCache::new();

        cache.normalize("k", left, '.');
        cache.normalize("k", right, '.');

        assert_that!(cache.len(), eq(2));
    }
}
