//! Form field schema shared by all create/edit dialogs.
//!
//! Every managed entity exposes its dialog fields through [`FormDraft`]. A draft
//! holds raw form text, one `String` per field, exactly as the user typed it.
//! Conversion into a typed request body happens at submit time so a half-typed
//! salary never leaves the dialog.

use super::error::{ConsoleError, Result};

/// Whether a dialog creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    /// Empty draft, submit issues a create request.
    #[default]
    Create,
    /// Draft seeded from a record, submit issues an update keyed by identity.
    Edit,
}

/// Static description of one dialog field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name of the field (camelCase, as the backend expects it).
    pub name: &'static str,
    /// Human label shown next to the input.
    pub label: &'static str,
    /// The business code identifying the record. Immutable once the record exists.
    pub identity: bool,
    /// Never read back from the server, never pre-filled.
    pub write_only: bool,
    /// Must be non-blank before a create is sent.
    pub required: bool,
}

impl FieldSpec {
    pub(crate) const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            identity: false,
            write_only: false,
            required: false,
        }
    }

    pub(crate) const fn identity(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            identity: true,
            write_only: false,
            required: true,
        }
    }

    pub(crate) const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub(crate) const fn write_only(mut self) -> Self {
        self.write_only = true;
        self
    }
}

/// In-progress, unsaved form state for one entity.
///
/// Implementors list their fields once in [`FormDraft::fields`] and expose a
/// mutable slot per field name. Everything else (blank checks, identity lookup,
/// generic setters used by the CLI) is derived from that.
pub trait FormDraft: Default + Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Field schema in display order.
    fn fields() -> &'static [FieldSpec];

    /// Current value of `field`, `None` for unknown names.
    fn get(&self, field: &str) -> Option<&str>;

    /// Mutable slot for `field`, `None` for unknown names.
    fn slot(&mut self, field: &str) -> Option<&mut String>;

    /// Sets a field by wire name.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Validation`] for a field name the entity does not have.
    fn set(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        let slot = self
            .slot(field)
            .ok_or_else(|| ConsoleError::Validation(format!("unknown field: {field}")))?;
        *slot = value.into();
        Ok(())
    }

    /// The identity field's schema entry.
    fn identity_field() -> Option<&'static FieldSpec> {
        Self::fields().iter().find(|f| f.identity)
    }

    /// Value of the identity field.
    fn identity(&self) -> &str {
        Self::identity_field()
            .and_then(|spec| self.get(spec.name))
            .unwrap_or_default()
    }

    /// Checks required fields for the given mode.
    ///
    /// Write-only fields are only required on create; leaving them blank on edit
    /// means "keep the stored value".
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Validation`] naming the first blank required field.
    fn check_required(&self, mode: FormMode) -> Result<()> {
        for spec in Self::fields() {
            if !spec.required || (spec.write_only && mode == FormMode::Edit) {
                continue;
            }
            if self.get(spec.name).map_or(true, |v| v.trim().is_empty()) {
                return Err(ConsoleError::Validation(format!("{} is required", spec.label)));
            }
        }
        Ok(())
    }
}

/// Parses `name=value` pairs, the form the CLI accepts for draft fields.
///
/// # Errors
///
/// Returns [`ConsoleError::Validation`] when an entry has no `=`.
pub fn parse_assignment(entry: &str) -> Result<(&str, &str)> {
    entry
        .split_once('=')
        .map(|(k, v)| (k.trim(), v))
        .ok_or_else(|| ConsoleError::Validation(format!("expected field=value, got `{entry}`")))
}
