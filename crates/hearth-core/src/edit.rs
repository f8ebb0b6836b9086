//! Single-slot inline edit state for field-level mutations
//!
//! One (record, field) pair is editable at a time; beginning a new edit
//! replaces any unsaved prior edit wholesale. Committing validates the
//! pending value and yields the patch to send, or nothing when validation
//! fails (the stored value stays untouched and no request goes out).
//! The same validation backs the server's PATCH handlers.

use crate::models::Debt;

/// Editable fields of a debt record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebtField {
    Amount,
    Description,
    Note,
}

/// A validated single-field change ready to persist
#[derive(Debug, Clone, PartialEq)]
pub enum DebtPatch {
    Amount(f64),
    Description(String),
    /// None clears the note
    Note(Option<String>),
}

/// Validate a pending value for a debt field.
///
/// - amount: must parse to a number > 0
/// - description: must be non-empty after trim
/// - note: accepted as-is; an empty value clears it
pub fn validate_debt_field(field: DebtField, value: &str) -> Option<DebtPatch> {
    match field {
        DebtField::Amount => {
            let amount = crate::format::to_numeric_value(value);
            (amount > 0.0).then_some(DebtPatch::Amount(amount))
        }
        DebtField::Description => {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| DebtPatch::Description(trimmed.to_string()))
        }
        DebtField::Note => {
            let trimmed = value.trim();
            Some(DebtPatch::Note(
                (!trimmed.is_empty()).then(|| trimmed.to_string()),
            ))
        }
    }
}

/// Validate a pending task title (same commit rules as debt description)
pub fn validate_task_title(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// The single edit slot: exactly one field of one record at a time
#[derive(Debug, Clone)]
pub struct ActiveEdit {
    pub record_id: i64,
    pub field: DebtField,
    pub pending_value: String,
    pub original_value: String,
}

impl ActiveEdit {
    /// Start editing; callers replace any existing slot with the result
    pub fn begin(debt: &Debt, field: DebtField) -> Self {
        let original = match field {
            DebtField::Amount => debt.amount.to_string(),
            DebtField::Description => debt.description.clone(),
            DebtField::Note => debt.note.clone().unwrap_or_default(),
        };
        Self {
            record_id: debt.id,
            field,
            pending_value: original.clone(),
            original_value: original,
        }
    }

    /// Commit: the patch to send, or None when validation discards the edit
    pub fn commit(self) -> Option<DebtPatch> {
        validate_debt_field(self.field, &self.pending_value)
    }

    /// Escape: drop the edit, restoring the displayed original
    pub fn cancel(self) -> String {
        self.original_value
    }
}
