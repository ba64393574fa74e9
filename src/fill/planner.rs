use serde::Serialize;
use sha1::{Digest, Sha1};

use crate::field::field_model::{Categorization, FieldDescriptor, first_per_identifier};
use crate::field::sensitivity::is_sensitive;
use crate::fill::mapping::MappingTable;
use crate::fill::plan_model::{FillPlan, Locator, PlannedFill};

/// Build the fill plan for a scan.
///
/// A field is planned only when it has a category, the mapping holds a
/// non-empty value for that category, and the sensitivity guard clears it.
/// The guard is evaluated here on every call, never taken from the scan.
/// Only the first field carrying an identifier is considered, so a value is
/// never steered to a field through another field's category.
pub fn plan(
    fields: &[FieldDescriptor],
    categorization: &Categorization,
    mapping: &MappingTable,
) -> FillPlan {
    let mut fill_plan = FillPlan::new(fields_fingerprint(fields));

    for field in first_per_identifier(fields) {
        let Some(category) = categorization.get(&field.identifier) else {
            continue;
        };
        let Some(value) = mapping.get(*category) else {
            tracing::debug!(field = %field.identifier, %category, "no value configured");
            continue;
        };
        if is_sensitive(field) {
            tracing::debug!(field = %field.identifier, "skipping sensitive field");
            continue;
        }

        fill_plan.insert(PlannedFill {
            identifier: field.identifier.clone(),
            value: value.to_string(),
            locator: Locator::for_field(field),
        });
    }

    fill_plan
}

/// Counts shown after a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub total: usize,
    pub categorized: usize,
    /// Categorized fields whose category has a configured value.
    pub fillable: usize,
}

impl ScanStats {
    /// Derived from an existing categorization; neither the categorizer nor
    /// the sensitivity guard is run.
    pub fn compute(
        fields: &[FieldDescriptor],
        categorization: &Categorization,
        mapping: &MappingTable,
    ) -> Self {
        let categories: Vec<_> = first_per_identifier(fields)
            .filter_map(|f| categorization.get(&f.identifier).copied())
            .collect();

        Self {
            total: fields.len(),
            categorized: categories.len(),
            fillable: categories
                .iter()
                .filter(|c| mapping.get(**c).is_some())
                .count(),
        }
    }
}

/// SHA-1 over every attribute of every field, in order.
pub fn fields_fingerprint(fields: &[FieldDescriptor]) -> String {
    let mut hasher = Sha1::new();
    for field in fields {
        hasher.update(field.position.to_le_bytes());
        for attr in [
            &field.identifier,
            &field.element_id,
            &field.name,
            &field.field_type,
            &field.placeholder,
            &field.label,
            &field.autocomplete,
        ] {
            hasher.update(attr.as_bytes());
            hasher.update([0x1f_u8]);
        }
        hasher.update([0x1e_u8]);
    }
    format!("{:x}", hasher.finalize())
}
