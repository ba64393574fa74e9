use crate::error::Result;
use crate::field::field_model::RawField;
use crate::fill::plan_model::FillPlan;

/// The page the engine reads fields from and writes values into.
///
/// Implementations cross a process or context boundary; either call may
/// fail independently of the caller, and a failure means nothing was
/// extracted or nothing is known to have been written.
pub trait FieldSurface {
    /// All input elements currently on the page, in document order.
    /// An empty page yields an empty vector, not an error.
    fn extract_fields(&mut self) -> Result<Vec<RawField>>;

    /// Apply a plan and return how many fields were actually updated.
    ///
    /// Targets that cannot be found, or that are disabled or read-only, are
    /// skipped without error. Each updated element gets input, change and
    /// blur notifications so page scripts observe the new value.
    fn inject(&mut self, plan: &FillPlan) -> Result<usize>;
}

impl<S: FieldSurface + ?Sized> FieldSurface for Box<S> {
    fn extract_fields(&mut self) -> Result<Vec<RawField>> {
        (**self).extract_fields()
    }

    fn inject(&mut self, plan: &FillPlan) -> Result<usize> {
        (**self).inject(plan)
    }
}
