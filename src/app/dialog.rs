//! Create/edit dialog state and the delete confirmation hook.

use crate::domain::error::{ConsoleError, Result};
use crate::domain::form::{FormDraft, FormMode};

/// State of a screen's form dialog.
///
/// Closing the dialog always resets the draft, so reopening in create mode
/// never shows leftovers from an earlier edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogState<D: FormDraft> {
    /// Whether the dialog is visible.
    pub open: bool,

    /// Create or edit.
    pub mode: FormMode,

    /// Unsaved form values.
    pub draft: D,
}

impl<D: FormDraft> DialogState<D> {
    /// Opens a blank dialog in create mode.
    pub fn open_create(&mut self) {
        *self = Self {
            open: true,
            mode: FormMode::Create,
            draft: D::default(),
        };
    }

    /// Opens the dialog in edit mode on a pre-filled draft.
    pub fn open_edit(&mut self, draft: D) {
        *self = Self {
            open: true,
            mode: FormMode::Edit,
            draft,
        };
    }

    /// Updates one field of the draft.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Validation`] when the dialog is closed, the field
    /// is unknown, or the field is the identity of a record being edited.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        if !self.open {
            return Err(ConsoleError::Validation("no dialog is open".to_string()));
        }

        let locked = self.mode == FormMode::Edit
            && D::identity_field().is_some_and(|spec| spec.name == field);
        if locked {
            return Err(ConsoleError::Validation(format!(
                "{field} identifies the record and cannot be changed"
            )));
        }

        self.draft.set(field, value)
    }

    /// Hides the dialog and discards the draft.
    pub fn close(&mut self) {
        *self = Self::default();
    }
}

/// Affirmative-answer gate in front of irreversible actions.
pub trait Confirmer {
    /// Asks `prompt`; `true` only for an explicit yes.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirmer for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::Tier;

    #[test]
    fn edit_mode_locks_identity() {
        let mut dialog = DialogState::<Tier>::default();
        dialog.open_edit(Tier {
            tier_code: "GOLD".into(),
            tier_name: "Gold".into(),
        });
        assert!(dialog.set_field("tierCode", "PLAT").is_err());
        dialog.set_field("tierName", "Golden").unwrap();
        assert_eq!(dialog.draft.tier_code, "GOLD");
        assert_eq!(dialog.draft.tier_name, "Golden");
    }

    #[test]
    fn create_mode_allows_identity() {
        let mut dialog = DialogState::<Tier>::default();
        dialog.open_create();
        dialog.set_field("tierCode", "GOLD").unwrap();
        dialog.close();
        assert!(!dialog.open);
        assert_eq!(dialog.draft, Tier::default());
    }

    #[test]
    fn closed_dialog_rejects_edits() {
        let mut dialog = DialogState::<Tier>::default();
        assert!(dialog.set_field("tierName", "x").is_err());
    }
}
