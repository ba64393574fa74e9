use crate::browser::fixture::{FixtureElement, PageFixture};
use crate::browser::session::BrowserSession;
use crate::browser::surface::FieldSurface;
use crate::cli::config::{AppConfig, MappingAction, Target, parse_assignment};
use crate::engine::engine::Autofill;
use crate::error::{AutofillError, Result};
use crate::field::field_model::{Category, ParseCategoryError};
use crate::fill::mapping::MappingTable;
use crate::report::console::{
    format_fill_outcome, format_fill_plan, format_mappings, format_scan_report,
};
use crate::store::mapping_store::{MappingStore, update_mapping};
use crate::trace::logger::TraceLogger;

// ============================================================================
// scan subcommand
// ============================================================================

pub fn cmd_scan(
    target: &Target,
    format: &str,
    config: &AppConfig,
    store: &dyn MappingStore,
) -> Result<()> {
    let mapping = store.load()?;

    let report = match target {
        Target::Url(url) => {
            let session = open_session(url, config)?;
            build_engine(session, config).scan(&mapping)?
        }
        Target::Fixture(path) => {
            let fixture = PageFixture::load(path)?;
            build_engine(fixture, config).scan(&mapping)?
        }
    };

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&report).map_err(|e| {
                AutofillError::JsonSerialize {
                    context: "scan report".into(),
                    source: e,
                }
            })?;
            println!("{}", json);
        }
        _ => print!("{}", format_scan_report(&report)),
    }

    Ok(())
}

// ============================================================================
// fill subcommand
// ============================================================================

pub fn cmd_fill(
    target: &Target,
    dry_run: bool,
    config: &AppConfig,
    store: &dyn MappingStore,
) -> Result<()> {
    let mapping = store.load()?;

    match target {
        Target::Url(url) => {
            let session = open_session(url, config)?;
            let mut engine = build_engine(session, config);
            scan_and_fill(&mut engine, &mapping, dry_run)?;
            engine.surface_mut().quit()?;
        }
        Target::Fixture(path) => {
            let fixture = PageFixture::load(path)?;
            let mut engine = build_engine(fixture, config);
            if scan_and_fill(&mut engine, &mapping, dry_run)? {
                for (index, element) in engine.surface().elements.iter().enumerate() {
                    println!("  #{} {} = {:?}", index + 1, element_title(index, element), element.value);
                }
            }
        }
    }

    Ok(())
}

/// Scan, print the plan and apply it unless `dry_run`. Returns whether the
/// page was touched.
fn scan_and_fill<S: FieldSurface>(
    engine: &mut Autofill<S>,
    mapping: &MappingTable,
    dry_run: bool,
) -> Result<bool> {
    let report = engine.scan(mapping)?;
    let plan = engine.plan_fill(mapping)?;

    println!(
        "Scanned {} fields, {} categorized",
        report.stats.total, report.stats.categorized
    );
    print!("{}", format_fill_plan(&plan));

    if dry_run {
        return Ok(false);
    }

    let outcome = engine.apply(&plan)?;
    print!("{}", format_fill_outcome(&outcome));
    Ok(true)
}

fn element_title(index: usize, element: &FixtureElement) -> String {
    if !element.element_id.is_empty() {
        format!("#{}", element.element_id)
    } else if !element.name.is_empty() {
        format!("[name={}]", element.name)
    } else {
        format!("input {}", index + 1)
    }
}

// ============================================================================
// mappings subcommand
// ============================================================================

pub fn cmd_mappings(action: &MappingAction, store: &dyn MappingStore) -> Result<()> {
    match action {
        MappingAction::Show => {
            print!("{}", format_mappings(&store.load()?));
        }
        MappingAction::Set { entries } => {
            let assignments = entries
                .iter()
                .map(|entry| parse_assignment(entry))
                .collect::<Result<Vec<_>>>()?;

            // `category=` clears the category instead of being dropped
            let mut current = store.load()?;
            for (name, value) in &assignments {
                if value.is_empty() && !name.is_empty() {
                    current.remove(parse_category(name)?);
                }
            }

            let pairs: Vec<(String, String)> = current
                .iter()
                .map(|(c, v)| (c.as_str().to_string(), v.to_string()))
                .chain(assignments)
                .collect();
            let table = update_mapping(store, pairs)?;
            print!("{}", format_mappings(&table));
        }
        MappingAction::Unset { categories } => {
            let mut table = store.load()?;
            for name in categories {
                table.remove(parse_category(name)?);
            }
            store.save(&table)?;
            print!("{}", format_mappings(&table));
        }
        MappingAction::Reset => {
            let table = MappingTable::defaults();
            store.save(&table)?;
            print!("{}", format_mappings(&table));
        }
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_category(name: &str) -> Result<Category> {
    name.parse()
        .map_err(|e: ParseCategoryError| AutofillError::Validation(e.to_string()))
}

fn open_session(url: &str, config: &AppConfig) -> Result<BrowserSession> {
    let mut session = BrowserSession::launch(&config.browser)
        .map_err(|e| AutofillError::Extraction(e.to_string()))?;
    session
        .navigate(url)
        .map_err(|e| AutofillError::Extraction(e.to_string()))?;
    Ok(session)
}

fn build_engine<S: FieldSurface>(surface: S, config: &AppConfig) -> Autofill<S> {
    let tracer = match &config.trace.path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };
    Autofill::new(surface).with_tracer(tracer)
}
