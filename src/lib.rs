//! Form field categorization and safe auto-fill.
//!
//! A scan extracts the page's input fields, assigns each a [`Category`] with
//! an ordered set of regex rules and flags the ones that must never be
//! touched. A fill combines the last scan with the user's [`MappingTable`]
//! into a [`FillPlan`], re-checking sensitivity, and hands it to the page.
//!
//! The page itself sits behind [`FieldSurface`]: a live browser via
//! [`BrowserSession`], or an in-memory [`PageFixture`].

pub mod browser;
pub mod cli;
pub mod engine;
pub mod error;
pub mod field;
pub mod fill;
pub mod report;
pub mod store;
pub mod trace;

pub use browser::fixture::PageFixture;
pub use browser::session::BrowserSession;
pub use browser::surface::FieldSurface;
pub use engine::engine::{Autofill, ScanSnapshot};
pub use error::{AutofillError, Result};
pub use field::categorizer::categorize;
pub use field::field_model::{Categorization, Category, FieldDescriptor, RawField};
pub use field::sensitivity::is_sensitive;
pub use fill::mapping::MappingTable;
pub use fill::plan_model::{FillOutcome, FillPlan, Locator, PlannedFill};
pub use fill::planner::{ScanStats, plan};
pub use report::report_model::{FieldReport, ScanReport};
