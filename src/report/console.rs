use crate::field::sensitivity::SensitivityReason;
use crate::fill::mapping::MappingTable;
use crate::fill::plan_model::{FillOutcome, FillPlan, Locator};
use crate::report::report_model::{FieldReport, ScanReport};

// ============================================================================
// Console reporter: formatted terminal output
// ============================================================================

/// Format a scan report for terminal output.
///
/// Produces output like:
/// ```text
/// #1 [email]
///     ID: user_email
///     Type: email
///     Fill Value: your_email@example.com
/// #2
///     Name: card_number
///     Type: text
///     ! Sensitive field (keyword "card") - will not be auto-filled
///
/// === Fields: 2 total, 1 categorized, 1 fillable ===
/// ```
pub fn format_scan_report(report: &ScanReport) -> String {
    let mut out = String::new();

    if report.is_empty() {
        out.push_str("No input fields found on this page\n");
    }

    for field_report in &report.fields {
        format_field(&mut out, field_report);
    }

    out.push_str(&format!(
        "\n=== Fields: {} total, {} categorized, {} fillable ===\n",
        report.stats.total, report.stats.categorized, report.stats.fillable
    ));

    out
}

fn format_field(out: &mut String, report: &FieldReport) {
    let field = &report.field;

    match report.category {
        Some(category) => out.push_str(&format!("#{} [{}]\n", field.position, category.label())),
        None => out.push_str(&format!("#{}\n", field.position)),
    }

    let rows = [
        ("ID", field.element_id.as_str()),
        ("Name", field.name.as_str()),
        ("Type", field.field_type.as_str()),
        ("Placeholder", field.placeholder.as_str()),
        ("Label", field.label.as_str()),
        ("Fill Value", report.fill_value.as_deref().unwrap_or("")),
    ];
    for (title, value) in rows {
        // Type is always shown, the rest only when set
        if !value.is_empty() || title == "Type" {
            out.push_str(&format!("    {}: {}\n", title, value));
        }
    }

    if let Some(reason) = &report.sensitive {
        let why = match reason {
            SensitivityReason::InputType(t) => format!("type \"{}\"", t),
            SensitivityReason::Keyword(k) => format!("keyword \"{}\"", k),
        };
        out.push_str(&format!(
            "    ! Sensitive field ({}) - will not be auto-filled\n",
            why
        ));
    }
}

/// One line per planned fill.
pub fn format_fill_plan(plan: &FillPlan) -> String {
    if plan.is_empty() {
        return "Nothing to fill\n".to_string();
    }

    let mut out = String::new();
    for entry in plan {
        let target = match &entry.locator {
            Locator::Position(n) => format!("input #{}", n),
            other => other.css_selector().unwrap_or_default(),
        };
        out.push_str(&format!(
            "{} -> {} ({})\n",
            entry.identifier, entry.value, target
        ));
    }
    out
}

pub fn format_fill_outcome(outcome: &FillOutcome) -> String {
    format!(
        "Filled {} of {} planned fields\n",
        outcome.filled, outcome.planned
    )
}

/// The mapping table as `category = value` lines.
pub fn format_mappings(mapping: &MappingTable) -> String {
    if mapping.is_empty() {
        return "No mappings configured\n".to_string();
    }

    let width = mapping
        .iter()
        .map(|(c, _)| c.as_str().len())
        .max()
        .unwrap_or(0);

    mapping
        .iter()
        .map(|(category, value)| format!("{:width$} = {}\n", category.as_str(), value, width = width))
        .collect()
}
