//! Placeholder substitution in configuration strings.
//!
//! Three kinds of placeholders are recognized:
//!
//! - Environment references: `${VAR}`, `${VAR:-fallback}` and `{{ VAR }}`.
//!   Unset variables without a fallback are left verbatim.
//! - Inline expressions: `<% 4000 + 1 %>`, see [`expression`].
//! - Orphans: whatever placeholder syntax survives the first two passes,
//!   which [`Substitution::strip_unresolved`] removes.
//!
//! # Examples
//!
//! ```
//! use cfgtree::substitution::{PlaceholderSubstitution, Substitution};
//! use std::collections::HashMap;
//!
//! let vars = HashMap::from([("PORT".to_string(), "8080".to_string())]);
//! let subst = PlaceholderSubstitution::new(vars);
//!
//! let replaced = subst.replace_env("http://localhost:${PORT}/{{ PATH }}");
//! assert_eq!(replaced, "http://localhost:8080/{{ PATH }}");
//! assert_eq!(subst.strip_unresolved(&replaced), "http://localhost:8080/");
//! assert_eq!(subst.evaluate("<% ${PORT} + 1 %>"), "<% ${PORT} + 1 %>");
//! assert_eq!(subst.evaluate(&subst.replace_env("<% ${PORT} + 1 %>")), "8081");
//! ```

pub mod expression;

use std::collections::HashMap;
use std::env;
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Narrow interface the environment processor uses on every string leaf.
#[cfg_attr(test, mockall::automock)]
pub trait Substitution {
    /// Replace environment references with variable values.
    fn replace_env(&self, input: &str) -> String;

    /// Evaluate inline expressions and splice in their results.
    fn evaluate(&self, input: &str) -> String;

    /// Remove any placeholder syntax still present.
    fn strip_unresolved(&self, input: &str) -> String;
}

/// Lookup of variables by name.
pub trait VariableSource {
    /// The value of `name`, if set.
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads variables from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl VariableSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

impl VariableSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Default placeholder engine backed by a [`VariableSource`].
#[derive(Debug, Clone, Default)]
pub struct PlaceholderSubstitution<S = ProcessEnv> {
    source: S,
}

impl<S: VariableSource> PlaceholderSubstitution<S> {
    /// Create an engine that resolves variables from `source`.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    fn resolve(&self, caps: &Captures<'_>) -> String {
        let name = caps
            .get(1)
            .or_else(|| caps.get(3))
            .map_or("", |m| m.as_str());

        match (self.source.var(name), caps.get(2)) {
            // shell semantics: an empty value falls back too
            (Some(value), Some(fallback)) if value.is_empty() => fallback.as_str().to_string(),
            (Some(value), _) => value,
            (None, Some(fallback)) => fallback.as_str().to_string(),
            (None, None) => {
                log::trace!("placeholder {} left unresolved", &caps[0]);
                caps[0].to_string()
            }
        }
    }
}

impl<S: VariableSource> Substitution for PlaceholderSubstitution<S> {
    fn replace_env(&self, input: &str) -> String {
        env_regex()
            .replace_all(input, |caps: &Captures<'_>| self.resolve(caps))
            .into_owned()
    }

    fn evaluate(&self, input: &str) -> String {
        expression_regex()
            .replace_all(input, |caps: &Captures<'_>| {
                match expression::evaluate(&caps[1]) {
                    Ok(value) => value.to_string(),
                    Err(e) => {
                        log::debug!("{e} in '{}'", &caps[0]);
                        caps[0].to_string()
                    }
                }
            })
            .into_owned()
    }

    fn strip_unresolved(&self, input: &str) -> String {
        orphan_regex().replace_all(input, "").into_owned()
    }
}

/// Matches `${VAR}`, `${VAR:-fallback}` and `{{ VAR }}`.
fn env_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"\$\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*(?::-([^}]*))?\}|\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}",
        )
        .expect("Invalid regex")
    })
}

fn expression_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?s)<%(.*?)%>").expect("Invalid regex"))
}

fn orphan_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?s)\$\{[^}]*\}|\{\{.*?\}\}|<%.*?%>").expect("Invalid regex")
    })
}
