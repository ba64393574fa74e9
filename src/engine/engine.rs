use crate::browser::surface::FieldSurface;
use crate::error::{AutofillError, Result};
use crate::field::categorizer::categorize_all;
use crate::field::field_model::{Categorization, FieldDescriptor, normalize_fields};
use crate::fill::mapping::MappingTable;
use crate::fill::plan_model::{FillOutcome, FillPlan};
use crate::fill::planner::{fields_fingerprint, plan};
use crate::report::report_model::ScanReport;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::TraceEvent;

/// Fields and categories from the most recent successful scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSnapshot {
    pub fields: Vec<FieldDescriptor>,
    pub categorization: Categorization,
    pub fingerprint: String,
}

impl ScanSnapshot {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        let categorization = categorize_all(&fields);
        let fingerprint = fields_fingerprint(&fields);
        Self {
            fields,
            categorization,
            fingerprint,
        }
    }
}

/// Scan/fill driver over a page surface.
///
/// Holds only the last snapshot; each scan replaces it as a whole, and a
/// failed scan leaves the previous one in place. The mapping table is passed
/// in by the caller on every call.
pub struct Autofill<S: FieldSurface> {
    surface: S,
    snapshot: Option<ScanSnapshot>,
    tracer: TraceLogger,
}

impl<S: FieldSurface> Autofill<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            snapshot: None,
            tracer: TraceLogger::disabled(),
        }
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn snapshot(&self) -> Option<&ScanSnapshot> {
        self.snapshot.as_ref()
    }

    /// Extract the page's fields, categorize them and report what was found.
    pub fn scan(&mut self, mapping: &MappingTable) -> Result<ScanReport> {
        let raw = match self.surface.extract_fields() {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(error = %e, "scan failed");
                self.tracer.log(&TraceEvent::now("scan").with_error(&e));
                return Err(e);
            }
        };

        let snapshot = ScanSnapshot::new(normalize_fields(raw));
        let report = ScanReport::build(&snapshot.fields, &snapshot.categorization, mapping);

        tracing::info!(
            total = report.stats.total,
            categorized = report.stats.categorized,
            fillable = report.stats.fillable,
            "scan complete"
        );
        self.tracer
            .log(&TraceEvent::now("scan").with_stats(&report.stats));

        self.snapshot = Some(snapshot);
        Ok(report)
    }

    /// Plan a fill against the last scan. The sensitivity guard runs again
    /// here rather than trusting anything recorded at scan time.
    pub fn plan_fill(&self, mapping: &MappingTable) -> Result<FillPlan> {
        let snapshot = self.snapshot.as_ref().ok_or(AutofillError::NoScan)?;
        Ok(plan(&snapshot.fields, &snapshot.categorization, mapping))
    }

    /// Hand a plan to the page. Plans built from another scan are refused.
    pub fn apply(&mut self, fill_plan: &FillPlan) -> Result<FillOutcome> {
        let snapshot = self.snapshot.as_ref().ok_or(AutofillError::NoScan)?;
        if fill_plan.scan_fingerprint() != snapshot.fingerprint {
            tracing::warn!("refusing fill plan from a previous scan");
            return Err(AutofillError::StalePlan);
        }

        if fill_plan.is_empty() {
            let outcome = FillOutcome {
                planned: 0,
                filled: 0,
            };
            self.tracer.log(&TraceEvent::now("fill").with_outcome(&outcome));
            return Ok(outcome);
        }

        let filled = match self.surface.inject(fill_plan) {
            Ok(n) => n,
            Err(e) => {
                tracing::error!(error = %e, "fill failed");
                self.tracer.log(&TraceEvent::now("fill").with_error(&e));
                return Err(e);
            }
        };

        let outcome = FillOutcome {
            planned: fill_plan.len(),
            filled,
        };
        tracing::info!(planned = outcome.planned, filled = outcome.filled, "fill complete");
        self.tracer.log(&TraceEvent::now("fill").with_outcome(&outcome));
        Ok(outcome)
    }

    /// Plan against the last scan and apply the result.
    pub fn fill(&mut self, mapping: &MappingTable) -> Result<FillOutcome> {
        let fill_plan = self.plan_fill(mapping)?;
        self.apply(&fill_plan)
    }
}
