//! Key flattening primitives

use std::collections::HashMap;

use crate::input::{
    TranslationTree,
    TranslationValue,
};

/// Separator joining ancestor segments into a flat key.
pub const FLATTEN_SEPARATOR: char = '.';

/// Stand-in for a literal [`FLATTEN_SEPARATOR`] inside a single key segment.
pub const SEPARATOR_ESCAPE_CHAR: char = '\u{1}';

/// Flat key → value mapping borrowed from a [`TranslationTree`].
pub type FlatMapping<'a> = HashMap<String, &'a TranslationValue>;

/// Pending siblings of one tree level and the flat key of their parent.
type Frame<'a> = (Option<String>, indexmap::map::Iter<'a, String, TranslationValue>);

/// Replace every literal separator in `segment` with [`SEPARATOR_ESCAPE_CHAR`].
///
/// # Examples
/// ```
/// use i18n_flatten::flatten::{escape_default_separator, SEPARATOR_ESCAPE_CHAR};
///
/// assert_eq!(escape_default_separator("a.b"), format!("a{SEPARATOR_ESCAPE_CHAR}b"));
/// assert_eq!(escape_default_separator("plain"), "plain");
/// ```
#[must_use]
pub fn escape_default_separator(segment: &str) -> String {
    segment.replace(FLATTEN_SEPARATOR, &SEPARATOR_ESCAPE_CHAR.to_string())
}

/// Walk `tree` depth-first and call `visit` with the flat key of every node.
///
/// Subtrees are visited before their children, siblings in insertion order.
/// Uses an explicit stack, so nesting depth is bounded by heap rather than
/// call stack.
pub fn flatten_keys<'a, F>(tree: &'a TranslationTree, escape: bool, mut visit: F)
where
    F: FnMut(String, &'a TranslationValue),
{
    let mut stack: Vec<Frame<'a>> = vec![(None, tree.entries().iter())];

    while let Some((prefix, entries)) = stack.last_mut() {
        let Some((segment, value)) = entries.next() else {
            stack.pop();
            continue;
        };

        let segment = if escape { escape_default_separator(segment) } else { segment.clone() };
        let flat_key = match prefix.as_deref() {
            Some(p) => format!("{p}{FLATTEN_SEPARATOR}{segment}"),
            None => segment,
        };

        if let TranslationValue::Tree(subtree) = value {
            visit(flat_key.clone(), value);
            stack.push((Some(flat_key), subtree.entries().iter()));
        } else {
            visit(flat_key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn collect_keys(tree: &TranslationTree, escape: bool) -> Vec<String> {
        let mut keys = Vec::new();
        flatten_keys(tree, escape, |key, _| keys.push(key));
        keys
    }

    #[rstest]
    #[case("hello", "hello")]
    #[case("a.b", "a\u{1}b")]
    #[case("..", "\u{1}\u{1}")]
    #[case("", "")]
    #[case("a/b", "a/b")]
    fn test_escape_default_separator(#[case] segment: &str, #[case] expected: &str) {
        assert_that!(escape_default_separator(segment), eq(expected));
    }

    #[googletest::test]
    fn test_flatten_keys_visits_in_pre_order() {
        let nested = TranslationTree::new()
            .with("b", "1")
            .with("c", TranslationTree::new().with("d", "2"));
        let tree = TranslationTree::new().with("a", nested).with("e", "3");

        let keys = collect_keys(&tree, true);

        expect_that!(keys, elements_are![eq("a"), eq("a.b"), eq("a.c"), eq("a.c.d"), eq("e")]);
    }

    #[googletest::test]
    fn test_flatten_keys_escapes_segments() {
        let tree = TranslationTree::new().with("x", TranslationTree::new().with("a.b", "v"));

        let keys = collect_keys(&tree, true);

        expect_that!(keys, elements_are![eq("x"), eq("x.a\u{1}b")]);
    }

    #[googletest::test]
    fn test_flatten_keys_without_escape_keeps_dots() {
        let tree = TranslationTree::new().with("x", TranslationTree::new().with("a.b", "v"));

        let keys = collect_keys(&tree, false);

        expect_that!(keys, elements_are![eq("x"), eq("x.a.b")]);
    }

    #[googletest::test]
    fn test_flatten_keys_empty_subtree_is_still_visited() {
        let tree = TranslationTree::new().with("empty", TranslationTree::new()).with("after", "x");

        let keys = collect_keys(&tree, true);

        expect_that!(keys, elements_are![eq("empty"), eq("after")]);
    }

    #[googletest::test]
    fn test_flatten_keys_deep_nesting_does_not_overflow() {
        let mut tree = TranslationTree::new().with("leaf", "bottom");
        for _ in 0..1_000 {
            tree = TranslationTree::new().with("n", tree);
        }

        let mut leaf_key = None;
        flatten_keys(&tree, true, |key, value| {
            if !value.is_subtree() {
                leaf_key = Some(key);
            }
        });

        let expected = format!("{}leaf", "n.".repeat(1_000));
        expect_that!(leaf_key, some(eq(&expected)));
    }
}
