use serde::{Deserialize, Serialize};

use crate::field::field_model::FieldDescriptor;

/// How the injector re-finds a field on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum Locator {
    ElementId(String),
    Name(String),
    /// 1-based position among the page's inputs, for fields with neither id nor name.
    Position(usize),
}

impl Locator {
    /// Prefer the element id, then the name attribute, then document position.
    /// An element whose id was already taken by an earlier element is
    /// located by position, since its id resolves to the other one.
    pub fn for_field(field: &FieldDescriptor) -> Self {
        if !field.element_id.is_empty() && field.identifier == field.element_id {
            Locator::ElementId(field.element_id.clone())
        } else if !field.element_id.is_empty() {
            Locator::Position(field.position)
        } else if !field.name.is_empty() {
            Locator::Name(field.name.clone())
        } else {
            Locator::Position(field.position)
        }
    }

    /// CSS selector for the locator. Positional locators have none.
    pub fn css_selector(&self) -> Option<String> {
        match self {
            Locator::ElementId(id) if is_plain_css_ident(id) => Some(format!("#{}", id)),
            Locator::ElementId(id) => Some(format!("[id=\"{}\"]", escape_css_string(id))),
            Locator::Name(name) => Some(format!("input[name=\"{}\"]", escape_css_string(name))),
            Locator::Position(_) => None,
        }
    }
}

fn is_plain_css_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn escape_css_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// One fill instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedFill {
    pub identifier: String,
    pub value: String,
    pub locator: Locator,
}

/// Fields to fill, in page order, keyed uniquely by identifier.
///
/// Tied to the scan it was planned from through `scan_fingerprint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillPlan {
    scan_fingerprint: String,
    entries: Vec<PlannedFill>,
}

impl FillPlan {
    pub fn new(scan_fingerprint: impl Into<String>) -> Self {
        Self {
            scan_fingerprint: scan_fingerprint.into(),
            entries: Vec::new(),
        }
    }

    /// Add an instruction. The first entry for an identifier wins; a later
    /// one is dropped and `false` returned.
    pub fn insert(&mut self, entry: PlannedFill) -> bool {
        if self.contains(&entry.identifier) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn get(&self, identifier: &str) -> Option<&PlannedFill> {
        self.entries.iter().find(|e| e.identifier == identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.get(identifier).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlannedFill> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[PlannedFill] {
        &self.entries
    }

    pub fn scan_fingerprint(&self) -> &str {
        &self.scan_fingerprint
    }
}

impl<'a> IntoIterator for &'a FillPlan {
    type Item = &'a PlannedFill;
    type IntoIter = std::slice::Iter<'a, PlannedFill>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Result of applying a plan to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FillOutcome {
    /// Entries handed to the injector.
    pub planned: usize,
    /// Fields the page actually updated.
    pub filled: usize,
}
