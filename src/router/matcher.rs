use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::spec::{ParameterLocation, ParameterMeta};

/// Grammar for path placeholders: lowercase letters and underscore only.
/// A deliberate restriction carried over from the original system, not a
/// general token grammar.
const PLACEHOLDER_PATTERN: &str = r"\{([a-z_]+)\}";

/// A path segment value: one or more word characters.
const SEGMENT_VALUE: &str = "[A-Za-z0-9_]+";

/// The placeholder pattern is fixed, so it is compiled once; only the
/// per-template pattern is built per call.
fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER
        .get_or_init(|| Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern compiles"))
}

/// Match a request path against a Swagger path template.
///
/// Pure function, no state. Returns the extracted path parameters on a
/// match, `None` otherwise. Never errors: a template whose placeholders do
/// not line up with the declared parameters is simply non-matchable, so the
/// resolver can try later candidates in declaration order.
///
/// Only `string`-typed path parameters are supported; a placeholder bound to
/// an `integer` or `boolean` parameter makes the whole template fall
/// through, even for plausible-looking values.
#[must_use]
pub fn match_path(
    request_path: &str,
    template: &str,
    parameters: &[ParameterMeta],
) -> Option<HashMap<String, String>> {
    // Fast path for zero-parameter routes
    if request_path == template {
        return Some(HashMap::new());
    }

    let placeholder = placeholder_regex();
    let names: Vec<&str> = placeholder
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();
    // A literal template that didn't compare equal cannot match
    if names.is_empty() {
        return None;
    }

    for name in &names {
        let declared = parameters
            .iter()
            .find(|p| p.name == *name && p.location == ParameterLocation::Path);
        match declared {
            Some(param) if param.ty == "string" => {}
            Some(param) => {
                debug!(
                    template,
                    name,
                    ty = %param.ty,
                    "path parameter is not string-typed, template cannot match"
                );
                return None;
            }
            None => {
                debug!(template, name, "placeholder has no declared path parameter");
                return None;
            }
        }
    }

    let pattern = build_pattern(placeholder, template);
    // A dynamically generated pattern that fails to compile (e.g. a
    // duplicated placeholder name) is treated as no-match, consistent with
    // the fall-through policy for unmatchable declarations.
    let regex = match Regex::new(&pattern) {
        Ok(regex) => regex,
        Err(err) => {
            debug!(template, %err, "generated path regex did not compile");
            return None;
        }
    };

    let captures = regex.captures(request_path)?;
    let params = names
        .iter()
        .filter_map(|name| {
            captures
                .name(name)
                .map(|m| ((*name).to_string(), m.as_str().to_string()))
        })
        .collect();
    Some(params)
}

/// Substitute each `{name}` with a named capture group and escape the
/// literal stretches in between; anchor to the full path.
fn build_pattern(placeholder: &Regex, template: &str) -> String {
    let mut pattern = String::with_capacity(template.len() + 16);
    pattern.push('^');
    let mut last = 0;
    for caps in placeholder.captures_iter(template) {
        let whole = caps.get(0).expect("capture 0 always present");
        let name = caps.get(1).expect("placeholder name group").as_str();
        pattern.push_str(&regex::escape(&template[last..whole.start()]));
        pattern.push_str("(?P<");
        pattern.push_str(name);
        pattern.push('>');
        pattern.push_str(SEGMENT_VALUE);
        pattern.push(')');
        last = whole.end();
    }
    pattern.push_str(&regex::escape(&template[last..]));
    pattern.push('$');
    pattern
}
