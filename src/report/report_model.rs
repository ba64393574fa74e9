use serde::Serialize;

use crate::field::field_model::{Categorization, Category, FieldDescriptor};
use crate::field::sensitivity::{SensitivityReason, sensitivity_reason};
use crate::fill::mapping::MappingTable;
use crate::fill::planner::ScanStats;

/// What a scan found about one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub field: FieldDescriptor,
    pub category: Option<Category>,
    /// Value the field would receive if it were filled now.
    pub fill_value: Option<String>,
    /// Set when the field will never be auto-filled.
    pub sensitive: Option<SensitivityReason>,
}

impl FieldReport {
    pub fn is_sensitive(&self) -> bool {
        self.sensitive.is_some()
    }
}

/// Result of a scan: per-field findings, the categorization and the counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub fields: Vec<FieldReport>,
    pub categorization: Categorization,
    pub stats: ScanStats,
}

impl ScanReport {
    pub fn build(
        fields: &[FieldDescriptor],
        categorization: &Categorization,
        mapping: &MappingTable,
    ) -> Self {
        let reports = fields
            .iter()
            .map(|field| {
                let category = categorization.get(&field.identifier).copied();
                FieldReport {
                    field: field.clone(),
                    category,
                    fill_value: category.and_then(|c| mapping.get(c)).map(str::to_string),
                    sensitive: sensitivity_reason(field),
                }
            })
            .collect();

        Self {
            fields: reports,
            categorization: categorization.clone(),
            stats: ScanStats::compute(fields, categorization, mapping),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
