use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::browser::surface::FieldSurface;
use crate::error::{AutofillError, Result};
use crate::field::field_model::RawField;
use crate::fill::plan_model::{FillPlan, Locator};

/// Notification fired on an element after its value is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeEvent {
    Input,
    Change,
    Blur,
}

/// An input element of a fixture page, with its label already resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureElement {
    #[serde(default, rename = "id")]
    pub element_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub r#type: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub autocomplete: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<ChangeEvent>,
}

impl FixtureElement {
    pub fn input(element_id: &str, name: &str, r#type: &str) -> Self {
        Self {
            element_id: element_id.to_string(),
            name: name.to_string(),
            r#type: r#type.to_string(),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn with_autocomplete(mut self, autocomplete: &str) -> Self {
        self.autocomplete = autocomplete.to_string();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    fn accepts_input(&self) -> bool {
        !self.disabled && !self.read_only
    }
}

/// In-memory page implementing the extraction and injection contract.
///
/// Loaded from JSON for offline runs and used as the page double in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFixture {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub elements: Vec<FixtureElement>,
    /// Simulates a page the engine cannot reach.
    #[serde(skip)]
    unreachable: bool,
}

impl PageFixture {
    pub fn new(elements: Vec<FixtureElement>) -> Self {
        Self {
            url: None,
            elements,
            unreachable: false,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AutofillError::Extraction(format!("cannot read fixture {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| AutofillError::JsonParse {
            context: format!("fixture {}", path.display()),
            source: e,
        })
    }

    pub fn set_unreachable(&mut self, unreachable: bool) {
        self.unreachable = unreachable;
    }

    /// Find the element a locator points at, first match in document order.
    pub fn resolve(&self, locator: &Locator) -> Option<usize> {
        match locator {
            Locator::ElementId(id) => self.elements.iter().position(|el| &el.element_id == id),
            Locator::Name(name) => self.elements.iter().position(|el| &el.name == name),
            Locator::Position(n) => n.checked_sub(1).filter(|i| *i < self.elements.len()),
        }
    }

    pub fn value_of(&self, locator: &Locator) -> Option<&str> {
        self.resolve(locator)
            .map(|i| self.elements[i].value.as_str())
    }
}

impl FieldSurface for PageFixture {
    fn extract_fields(&mut self) -> Result<Vec<RawField>> {
        if self.unreachable {
            return Err(AutofillError::Extraction("page is unreachable".into()));
        }

        Ok(self
            .elements
            .iter()
            .enumerate()
            .map(|(index, el)| RawField {
                position: index + 1,
                element_id: el.element_id.clone(),
                name: el.name.clone(),
                r#type: if el.r#type.is_empty() {
                    "text".to_string()
                } else {
                    el.r#type.clone()
                },
                placeholder: el.placeholder.clone(),
                label: el.label.clone(),
                autocomplete: el.autocomplete.clone(),
            })
            .collect())
    }

    fn inject(&mut self, plan: &FillPlan) -> Result<usize> {
        if self.unreachable {
            return Err(AutofillError::Injection("page is unreachable".into()));
        }

        let mut filled = 0;
        for entry in plan {
            let Some(index) = self.resolve(&entry.locator) else {
                tracing::debug!(field = %entry.identifier, "target not found");
                continue;
            };
            let element = &mut self.elements[index];
            if !element.accepts_input() {
                tracing::debug!(field = %entry.identifier, "target disabled or read-only");
                continue;
            }
            element.value = entry.value.clone();
            element
                .events
                .extend([ChangeEvent::Input, ChangeEvent::Change, ChangeEvent::Blur]);
            filled += 1;
        }
        Ok(filled)
    }
}
