use serde::Serialize;

use crate::field::field_model::FieldDescriptor;

/// Input types that are never auto-filled, whatever else the field says.
pub const SENSITIVE_TYPES: &[&str] = &["password", "hidden"];

pub const SENSITIVE_KEYWORDS: &[&str] = &[
    // credentials
    "password", "passwd", "pwd",
    // payment
    "credit", "card", "cvv", "cvc",
    // identity
    "ssn", "social",
    // security
    "pin", "security",
    // financial
    "bank", "account",
];

/// Why a field was flagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", content = "matched", rename_all = "snake_case")]
pub enum SensitivityReason {
    InputType(String),
    Keyword(&'static str),
}

/// First rule that flags the field, checking the type before any keyword.
///
/// Each attribute is lowercased and searched on its own; attributes are never
/// joined, so a keyword cannot straddle two of them.
pub fn sensitivity_reason(field: &FieldDescriptor) -> Option<SensitivityReason> {
    let field_type = field.field_type.to_lowercase();
    if SENSITIVE_TYPES.contains(&field_type.as_str()) {
        return Some(SensitivityReason::InputType(field_type));
    }

    let fragments = [
        &field.name,
        &field.element_id,
        &field.label,
        &field.placeholder,
        &field.autocomplete,
    ]
    .map(|s| s.to_lowercase());

    SENSITIVE_KEYWORDS
        .iter()
        .find(|keyword| fragments.iter().any(|f| f.contains(**keyword)))
        .map(|keyword| SensitivityReason::Keyword(*keyword))
}

/// Whether a field must never be auto-filled.
pub fn is_sensitive(field: &FieldDescriptor) -> bool {
    sensitivity_reason(field).is_some()
}
