//! Non-fatal diagnostics collected during a read or write pass.
//!
//! Spec §7 requires that format/structure warnings (mismatched braces, a
//! missing cross-reference target, an unknown tag) not abort a batch
//! conversion. Every such warning is emitted through [`tracing::warn!`]
//! *and* appended to a [`Diagnostics`] collector so a caller can inspect
//! what happened after the fact without configuring a subscriber.
//!
//! Grounded in the `tracing`/`tracing-subscriber` idiom `ykrist-tex-tools`
//! uses for its own bibliographic tooling; the teacher crate has no logging
//! dependency of its own.

/// One non-fatal warning raised during conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Index of the reference that triggered the warning, if applicable.
    pub reference_index: Option<usize>,
    /// The tag involved, if applicable.
    pub tag: Option<String>,
    /// Human-readable message.
    pub message: String,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.reference_index, &self.tag) {
            (Some(i), Some(tag)) => write!(f, "ref #{i} [{tag}]: {}", self.message),
            (Some(i), None) => write!(f, "ref #{i}: {}", self.message),
            (None, Some(tag)) => write!(f, "[{tag}]: {}", self.message),
            (None, None) => write!(f, "{}", self.message),
        }
    }
}

/// Collects warnings raised during a read or write pass.
///
/// Readers and the cleaner/converter accumulate warnings here instead of
/// failing the whole batch; callers can inspect [`Diagnostics::warnings`]
/// afterward, or ignore them entirely since every warning is also emitted
/// through `tracing`.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning tied to a specific reference and tag, emitting a
    /// structured `tracing::warn!` event alongside.
    pub fn warn_field(&mut self, reference_index: usize, tag: &str, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(reference_index, tag, "{message}");
        self.warnings.push(Warning {
            reference_index: Some(reference_index),
            tag: Some(tag.to_string()),
            message,
        });
    }

    /// Record a warning tied to a reference but no particular tag.
    pub fn warn_reference(&mut self, reference_index: usize, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(reference_index, "{message}");
        self.warnings.push(Warning {
            reference_index: Some(reference_index),
            tag: None,
            message,
        });
    }

    /// Record a warning with no reference/tag context.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{message}");
        self.warnings.push(Warning {
            reference_index: None,
            tag: None,
            message,
        });
    }

    /// All warnings collected so far, in emission order.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// True if no warnings have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Number of warnings recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Merge another collector's warnings into this one, in order.
    pub fn extend(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_in_order() {
        let mut d = Diagnostics::new();
        d.warn_field(0, "CROSSREF", "missing parent");
        d.warn_reference(1, "unknown reftype");
        d.warn("generic");
        assert_eq!(d.len(), 3);
        assert_eq!(d.warnings()[0].to_string(), "ref #0 [CROSSREF]: missing parent");
        assert_eq!(d.warnings()[1].to_string(), "ref #1: unknown reftype");
        assert_eq!(d.warnings()[2].to_string(), "generic");
    }

    #[test]
    fn extend_preserves_order() {
        let mut a = Diagnostics::new();
        a.warn("first");
        let mut b = Diagnostics::new();
        b.warn("second");
        a.extend(b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.warnings()[1].message, "second");
    }
}
