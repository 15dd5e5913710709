// crates/translator-core/src/runtime/render.rs
// ============================================================================
// Module: Rendering Helper
// Description: Locale-bound translate handle for template renderers.
// Purpose: Give renderers a `translate(key, args)` call over the fetch path.
// Dependencies: crate::runtime::fetch
// ============================================================================

//! ## Overview
//! A [`Translator`] is bound to one locale and resolves keys through the
//! [`FetchService`], so it gets the same default-locale fallback. `{name}`
//! placeholders are replaced in a single pass; a substituted value is never
//! scanned again. A key missing everywhere renders as the key itself.

use crate::core::LocaleCode;
use crate::core::TranslationKey;
use crate::runtime::error::TranslationError;
use crate::runtime::fetch::FetchService;

/// Locale-bound translation handle for renderers.
#[derive(Clone)]
pub struct Translator {
    /// Read path used for lookups.
    fetch: FetchService,
    /// Locale every lookup is made in.
    locale: LocaleCode,
}

impl Translator {
    /// Creates a translator bound to a locale.
    #[must_use]
    pub fn new(fetch: FetchService, locale: impl Into<LocaleCode>) -> Self {
        Self {
            fetch,
            locale: locale.into(),
        }
    }

    /// Returns the bound locale.
    #[must_use]
    pub const fn locale(&self) -> &LocaleCode {
        &self.locale
    }

    /// Translates a key and substitutes `{name}` placeholders.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError`] for an empty key or a store failure.
    pub fn translate(&self, key: &str, args: &[(&str, &str)]) -> Result<String, TranslationError> {
        let resolved = self.fetch.fetch_one(&TranslationKey::new(key), &self.locale)?;
        Ok(resolved.map_or_else(|| key.to_string(), |found| interpolate(&found.text, args)))
    }
}

/// Replaces `{name}` tokens with matching argument values.
///
/// Unknown names and unterminated braces are copied through unchanged.
#[must_use]
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        output.push_str(&rest[.. start]);
        let after = &rest[start + 1 ..];
        let Some(end) = after.find('}') else {
            output.push_str(&rest[start ..]);
            return output;
        };
        let name = &after[.. end];
        match args.iter().find(|(arg, _)| *arg == name) {
            Some((_, value)) => output.push_str(value),
            None => {
                output.push('{');
                output.push_str(name);
                output.push('}');
            }
        }
        rest = &after[end + 1 ..];
    }
    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::use_debug,
        clippy::dbg_macro,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        reason = "Test-only interpolation assertions."
    )]

    use super::interpolate;

    #[test]
    fn interpolate_replaces_known_placeholders() {
        let output = interpolate("Hello {name}, you have {count} items", &[
            ("name", "Ada"),
            ("count", "3"),
        ]);
        assert_eq!(output, "Hello Ada, you have 3 items");
    }

    #[test]
    fn interpolate_keeps_unknown_placeholders() {
        assert_eq!(interpolate("Hi {who}", &[("name", "Ada")]), "Hi {who}");
    }

    #[test]
    fn interpolate_does_not_rescan_substituted_values() {
        assert_eq!(interpolate("{a}", &[("a", "{b}"), ("b", "x")]), "{b}");
    }

    #[test]
    fn interpolate_copies_unterminated_brace() {
        assert_eq!(interpolate("50% {off", &[("off", "x")]), "50% {off");
    }

    #[test]
    fn interpolate_handles_multibyte_text() {
        assert_eq!(interpolate("Grüße, {name}!", &[("name", "Zoë")]), "Grüße, Zoë!");
    }
}
