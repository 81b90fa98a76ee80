//! Core traits defining the seams of ww-core.
//!
//! Kept deliberately small: one trait for checking option invariants and one
//! for turning pipeline elements into text.

use crate::foundation::error::Result;
use core::fmt::Display;

// ============================================================================
// Validation
// ============================================================================

/// Trait for values that can be validated.
///
/// Implemented by option structs and slice specifications, and checked before
/// anything is read from a pipeline.
pub trait Validate {
    /// Validates the value's state.
    fn validate(&self) -> Result<()>;
}

// ============================================================================
// Formatting
// ============================================================================

/// Trait for turning one element into text, given a template.
///
/// `join` calls the formatter once per element. Any closure taking the
/// element and the template implements it.
pub trait ElementFormatter<T> {
    /// Formats `item` according to `template`.
    fn format(&mut self, item: &T, template: &str) -> String;
}

impl<T, F> ElementFormatter<T> for F
where
    F: FnMut(&T, &str) -> String,
{
    fn format(&mut self, item: &T, template: &str) -> String {
        self(item, template)
    }
}

/// The default formatter: substitutes the element's `Display` output for
/// every `{}` in the template.
///
/// A template without a placeholder is returned as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateFormatter;

impl<T: Display> ElementFormatter<T> for TemplateFormatter {
    fn format(&mut self, item: &T, template: &str) -> String {
        if template == "{}" {
            return item.to_string();
        }
        template.replace("{}", &item.to_string())
    }
}
