// SPDX-License-Identifier: MIT OR Apache-2.0
//! Path-variable resolution.
//!
//! File-name plugs reference session variables as `${NAME}` placeholders;
//! [`resolve_path`] substitutes them from the [`Context`] and
//! [`expand_env_vars`] handles whatever the process environment can still
//! fill in afterwards.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use sourcetrace_graph::Context;
use std::collections::HashSet;

/// `${NAME}` placeholder, non-greedy, matching across newlines
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\$\{(.*?)\}").expect("placeholder pattern is valid"));

/// `$VAR` or `${VAR}` environment reference
static ENV_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
        .expect("environment pattern is valid")
});

/// Cap on substitution rounds, in case variable values expand to
/// themselves (`ROOT` -> `${ROOT}/x` would otherwise never settle)
const MAX_SUBSTITUTIONS: usize = 64;

/// Substitute `${NAME}` placeholders from the session context
///
/// Each round substitutes every occurrence of the first placeholder not
/// yet known to be unresolvable; values may themselves contain
/// placeholders, which are picked up by later rounds. A name whose lookup
/// fails is left in the string verbatim and not retried.
pub fn resolve_path(text: &str, context: &Context) -> String {
    let mut resolved = text.to_string();
    let mut skipped: HashSet<String> = HashSet::new();

    for _ in 0..MAX_SUBSTITUTIONS {
        let next = PLACEHOLDER
            .captures_iter(&resolved)
            .map(|c| c[1].to_string())
            .find(|name| !skipped.contains(name));
        let Some(name) = next else {
            return resolved;
        };

        match context.get(&name) {
            Some(value) => {
                let token = format!("${{{name}}}");
                resolved = resolved.replace(&token, value);
            }
            None => {
                tracing::debug!(variable = %name, "variable not in context, leaving placeholder");
                skipped.insert(name);
            }
        }
    }

    tracing::warn!(path = %text, "variable expansion exceeded substitution limit");
    resolved
}

/// Expand `$VAR` / `${VAR}` references from the process environment
///
/// References to unset variables are left untouched.
pub fn expand_env_vars(text: &str) -> String {
    ENV_REFERENCE
        .replace_all(text, |caps: &Captures| {
            let name = caps.get(1).or_else(|| caps.get(2));
            match name.and_then(|m| std::env::var(m.as_str()).ok()) {
                Some(value) => value,
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
