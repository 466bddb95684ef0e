//! Command-line front end
mod args;
mod error;

use std::io::Write;
use std::path::Path;

pub use args::{
    Arguments,
    Command,
    FlattenArgs,
    InputArgs,
    ResolveArgs,
};
pub use error::CliError;
use serde_json::{
    Map,
    Value,
};

use crate::config::{
    ConfigManager,
    FlattenSettings,
};
use crate::flatten::{
    FlattenOptions,
    Flattener,
};
use crate::input::{
    DEFAULT_ALIAS_PREFIX,
    TranslationTree,
};

/// Run a parsed command, writing its JSON result to `out`.
///
/// # Errors
/// Fails on unreadable or invalid settings, unreadable or non-object
/// translation files, and write errors.
pub fn run(args: Arguments, out: &mut impl Write) -> Result<(), CliError> {
    let mut config_manager = ConfigManager::new();
    let config_dir = args.config_dir.or_else(|| std::env::current_dir().ok());
    config_manager.load_settings(config_dir)?;
    let settings = config_manager.get_settings();

    let result = match args.command {
        Command::Flatten(flatten) => run_flatten(settings, &flatten)?,
        Command::Resolve(resolve) => run_resolve(settings, &resolve)?,
    };

    serde_json::to_writer_pretty(&mut *out, &result)?;
    writeln!(out)?;
    Ok(())
}

/// Flatten the input file; command-line switches override the settings.
fn run_flatten(settings: &FlattenSettings, args: &FlattenArgs) -> Result<Value, CliError> {
    let tree = read_tree(&args.input.file, settings)?;
    let mut options = FlattenOptions::from(settings);
    options.subtree |= args.subtree;
    options.escape &= !args.no_escape;

    let mut flattener = Flattener::from_settings(settings)?;
    let flat = flattener.flatten_translations_with(&tree, &args.input.locale, options);

    let alias_prefix = alias_prefix(settings);
    let mut entries: Vec<_> = flat.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    Ok(Value::Object(
        entries.into_iter().map(|(key, value)| (key, value.to_json(alias_prefix))).collect(),
    ))
}

/// Normalize and resolve one lookup request against the input file.
fn run_resolve(settings: &FlattenSettings, args: &ResolveArgs) -> Result<Value, CliError> {
    let tree = read_tree(&args.input.file, settings)?;
    let locale = args.input.locale.as_str();

    let mut flattener = Flattener::from_settings(settings)?;
    let flat = flattener.flatten_translations_with(&tree, locale, FlattenOptions::from(settings));
    let key =
        flattener.normalize_flat_keys(locale, &args.key, args.scope.as_slice(), args.separator);
    tracing::debug!(locale, request = %args.key, resolved = %key, "Resolved lookup key");

    let alias_prefix = alias_prefix(settings);
    let value = flat.get(&key).map_or(Value::Null, |value| value.to_json(alias_prefix));

    let mut result = Map::new();
    result.insert("key".to_string(), Value::String(key));
    result.insert("value".to_string(), value);
    Ok(Value::Object(result))
}

/// Read and parse a translation file into a tree.
fn read_tree(path: &Path, settings: &FlattenSettings) -> Result<TranslationTree, CliError> {
    tracing::debug!("Reading translation file: {:?}", path);
    let content = std::fs::read_to_string(path)
        .map_err(|source| CliError::Read { path: path.to_path_buf(), source })?;
    let json: Value = serde_json::from_str(&content)?;
    Ok(TranslationTree::from_json(&json, settings.alias_prefix.as_deref())?)
}

/// Prefix used to render aliases back to JSON.
fn alias_prefix(settings: &FlattenSettings) -> &str {
    settings.alias_prefix.as_deref().unwrap_or(DEFAULT_ALIAS_PREFIX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::config::CONFIG_FILE_NAME;

    #[fixture]
    fn workspace() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let translations = json!({
            "greetings": { "hello": "Hello", "v1.0": "Release" },
            "errors": {
                "404": { "title": "Not found" },
                "not_found": ":errors.404"
            }
        });
        fs::write(temp_dir.path().join("en.json"), translations.to_string()).unwrap();
        temp_dir
    }

    fn input(dir: &TempDir) -> InputArgs {
        InputArgs { file: dir.path().join("en.json"), locale: "en".to_string() }
    }

    fn run_to_json(dir: &TempDir, command: Command) -> Value {
        let args = Arguments { config_dir: Some(dir.path().to_path_buf()), command };
        let mut out = Vec::<u8>::new();
        run(args, &mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[rstest]
    fn flatten_prints_sorted_leaves(workspace: TempDir) {
        let args = FlattenArgs { input: input(&workspace), subtree: false, no_escape: false };

        let output = run_to_json(&workspace, Command::Flatten(args));

        assert_that!(
            output,
            eq(&json!({
                "errors.404.title": "Not found",
                "errors.not_found": ":errors.404",
                "greetings.hello": "Hello",
                "greetings.v1\u{1}0": "Release"
            }))
        );
    }

    #[rstest]
    fn flatten_subtree_flag_keeps_subtrees(workspace: TempDir) {
        let args = FlattenArgs { input: input(&workspace), subtree: true, no_escape: true };

        let output = run_to_json(&workspace, Command::Flatten(args));

        assert_that!(output.get("errors.404"), some(eq(&json!({ "title": "Not found" }))));
        assert_that!(output.get("greetings.v1.0"), some(eq(&json!("Release"))));
    }

    #[rstest]
    fn resolve_follows_alias(workspace: TempDir) {
        let args = ResolveArgs {
            input: input(&workspace),
            key: "not_found/title".to_string(),
            scope: vec!["errors".to_string()],
            separator: Some('/'),
        };

        let output = run_to_json(&workspace, Command::Resolve(args));

        assert_that!(output, eq(&json!({ "key": "errors.404.title", "value": "Not found" })));
    }

    #[rstest]
    fn resolve_uses_config_file_separator(workspace: TempDir) {
        fs::write(workspace.path().join(CONFIG_FILE_NAME), r#"{"defaultSeparator": "|"}"#)
            .unwrap();
        let args = ResolveArgs {
            input: input(&workspace),
            key: "greetings|v1.0".to_string(),
            scope: vec![],
            separator: None,
        };

        let output = run_to_json(&workspace, Command::Resolve(args));

        assert_that!(output.get("value"), some(eq(&json!("Release"))));
    }

    #[rstest]
    fn resolve_missing_key_yields_null(workspace: TempDir) {
        let args = ResolveArgs {
            input: input(&workspace),
            key: "greetings.bye".to_string(),
            scope: vec![],
            separator: None,
        };

        let output = run_to_json(&workspace, Command::Resolve(args));

        assert_that!(output, eq(&json!({ "key": "greetings.bye", "value": null })));
    }

    #[rstest]
    fn run_reports_missing_file(workspace: TempDir) {
        let args = FlattenArgs {
            input: InputArgs { file: PathBuf::from("/nonexistent/xx.json"), locale: "xx".into() },
            subtree: false,
            no_escape: false,
        };
        let args = Arguments {
            config_dir: Some(workspace.path().to_path_buf()),
            command: Command::Flatten(args),
        };

        let result = run(args, &mut Vec::<u8>::new());

        assert_that!(matches!(result, Err(CliError::Read { .. })), eq(true));
    }

    #[rstest]
    fn run_rejects_non_object_document(workspace: TempDir) {
        fs::write(workspace.path().join("en.json"), "[1, 2]").unwrap();
        let args = FlattenArgs { input: input(&workspace), subtree: false, no_escape: false };
        let args = Arguments {
            config_dir: Some(workspace.path().to_path_buf()),
            command: Command::Flatten(args),
        };

        let result = run(args, &mut Vec::<u8>::new());

        assert_that!(matches!(result, Err(CliError::Tree(_))), eq(true));
    }
}
