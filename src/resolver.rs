use log::debug;
use regex::{Captures, Regex};

use crate::fields::FieldDictionary;

/// Substitutes `@{field}` placeholders in element text against a field
/// dictionary.
pub struct PlaceholderResolver {
    token_re: Regex,
}

impl PlaceholderResolver {
    pub fn new() -> Self {
        let token_re =
            Regex::new(r"@\{([^}]+)\}").expect("Failed to compile placeholder token regex");
        Self { token_re }
    }

    /// All-or-nothing substitution. A template without tokens is returned
    /// unchanged. If every referenced field resolves to a non-empty value,
    /// all tokens are replaced in one pass; if any field is missing or
    /// empty, the whole text is suppressed and an empty string is returned,
    /// so a certificate never shows a broken token.
    pub fn resolve(&self, template: &str, fields: &FieldDictionary) -> String {
        if !self.token_re.is_match(template) {
            return template.to_string();
        }

        // Visibility gate runs before any substitution happens.
        for caps in self.token_re.captures_iter(template) {
            let key = &caps[1];
            if fields.lookup(key).is_none() {
                debug!("placeholder '{key}' missing or empty, suppressing element text");
                return String::new();
            }
        }

        // Single left-to-right pass; replacement text is never rescanned,
        // so values containing token syntax are inserted literally.
        self.token_re
            .replace_all(template, |caps: &Captures| {
                fields.lookup(&caps[1]).unwrap_or_default().to_string()
            })
            .into_owned()
    }
}

impl Default for PlaceholderResolver {
    fn default() -> Self {
        Self::new()
    }
}
