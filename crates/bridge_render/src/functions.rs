//! Helper functions exposed to every template.
//!
//! The helpers form a statically registered function table: each pure
//! function here is wrapped in a Handlebars helper and registered on the
//! shared registry at construction, so templates can call them regardless
//! of what else is bound in the render scope.

use std::sync::OnceLock;

use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use regex::Regex;
use serde::Deserialize;

/// A platform region: the human display name and the short resource name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Region {
    display_name: String,
    name: String,
}

static REGIONS: OnceLock<Vec<Region>> = OnceLock::new();

static ILLEGAL_PATH_CHARS: OnceLock<Regex> = OnceLock::new();

/// The embedded region table, parsed at most once per process.
fn regions() -> &'static [Region] {
    REGIONS
        .get_or_init(|| {
            serde_json::from_str(include_str!("../assets/regions.json")).unwrap_or_default()
        })
        .as_slice()
}

/// Looks up an environment variable, or `None` when unset.
pub fn environment_variable(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Normalizes a region display name (`West Europe`) into its short
/// resource name (`westeurope`), or `None` when the region is unknown.
pub fn format_region(display_name: &str) -> Option<&'static str> {
    regions()
        .iter()
        .find(|r| r.display_name == display_name)
        .map(|r| r.name.as_str())
}

/// Escapes a string so it can be embedded as a JSON property value.
pub fn json_string(value: &str) -> String {
    match serde_json::to_string(value) {
        // Drop the surrounding quotes added by the serializer.
        Ok(quoted) => quoted[1..quoted.len() - 1].to_string(),
        Err(_) => String::new(),
    }
}

/// Sanitizes a file path: collapses duplicate separators, normalizes to
/// forward slashes, strips characters illegal in file paths and drops
/// segments that end up empty.
pub fn safe_file_path(path: &str) -> String {
    let pattern =
        ILLEGAL_PATH_CHARS.get_or_init(|| Regex::new(r#"[\\/:*?"<>| ]"#).unwrap());

    let collapsed = path
        .replace("\\\\", "\\")
        .replace("//", "/")
        .replace('\\', "/");

    collapsed
        .split('/')
        .filter_map(|segment| {
            let cleaned = pattern.replace_all(segment, "");
            if cleaned.is_empty() {
                None
            } else {
                Some(cleaned.into_owned())
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Registers the helper table on a Handlebars registry.
pub fn register(registry: &mut Handlebars<'_>) {
    registry.register_helper("get_environment_variable", Box::new(environment_variable_helper));
    registry.register_helper("format_region", Box::new(format_region_helper));
    registry.register_helper("to_json_string", Box::new(json_string_helper));
    registry.register_helper("to_safe_file_path", Box::new(safe_file_path_helper));
}

fn string_param<'a>(h: &'a Helper) -> &'a str {
    h.param(0).and_then(|v| v.value().as_str()).unwrap_or("")
}

fn environment_variable_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    if let Some(value) = environment_variable(string_param(h)) {
        out.write(&value)?;
    }
    Ok(())
}

fn format_region_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    if let Some(name) = format_region(string_param(h)) {
        out.write(name)?;
    }
    Ok(())
}

fn json_string_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&json_string(string_param(h)))?;
    Ok(())
}

fn safe_file_path_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&safe_file_path(string_param(h)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_file_path() {
        assert_eq!(safe_file_path("this//is\\\\a\\\\t?e>st"), "this/is/a/test");
    }

    #[test]
    fn test_safe_file_path_drops_empty_segments() {
        assert_eq!(safe_file_path("a// //b"), "a/b");
        assert_eq!(safe_file_path("???"), "");
    }

    #[test]
    fn test_format_region() {
        assert_eq!(format_region("West Europe"), Some("westeurope"));
        assert_eq!(format_region("Atlantis"), None);
    }

    #[test]
    fn test_json_string_escapes_quotes() {
        assert_eq!(json_string("say \"hi\"\n"), "say \\\"hi\\\"\\n");
        assert_eq!(json_string("plain"), "plain");
    }

    #[test]
    fn test_environment_variable() {
        std::env::set_var("BRIDGE_RENDER_TEST_VAR", "42");
        assert_eq!(
            environment_variable("BRIDGE_RENDER_TEST_VAR").as_deref(),
            Some("42")
        );
        assert_eq!(environment_variable("BRIDGE_RENDER_UNSET_VAR"), None);
    }
}
