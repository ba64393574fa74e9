use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Field identifier → assigned category, rebuilt on every scan.
pub type Categorization = BTreeMap<String, Category>;

/// One input element as reported by the extraction interface.
///
/// Attributes the page did not set may arrive missing or as `null`; both
/// deserialize to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawField {
    #[serde(default)]
    pub position: usize,
    #[serde(rename = "elementId", default, deserialize_with = "null_as_empty")]
    pub element_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub r#type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub placeholder: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub autocomplete: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Normalized snapshot of one input element at scan time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Element id when present and not taken by an earlier element,
    /// otherwise a synthetic `field_<position>` key.
    pub identifier: String,
    /// 1-based position in document order.
    pub position: usize,
    pub element_id: String,
    pub name: String,
    /// Lowercased input type, `"text"` when the page left it empty.
    pub field_type: String,
    pub placeholder: String,
    pub label: String,
    pub autocomplete: String,
}

impl FieldDescriptor {
    /// Bare text field at `position` with no identifying attributes.
    pub fn new(position: usize) -> Self {
        Self {
            identifier: synthetic_identifier(position),
            position,
            element_id: String::new(),
            name: String::new(),
            field_type: "text".to_string(),
            placeholder: String::new(),
            label: String::new(),
            autocomplete: String::new(),
        }
    }

    pub fn from_raw(raw: RawField) -> Self {
        let identifier = if raw.element_id.is_empty() {
            synthetic_identifier(raw.position)
        } else {
            raw.element_id.clone()
        };

        Self {
            identifier,
            position: raw.position,
            element_id: raw.element_id,
            name: raw.name,
            field_type: normalize_type(&raw.r#type),
            placeholder: raw.placeholder,
            label: raw.label,
            autocomplete: raw.autocomplete,
        }
    }

    pub fn with_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = element_id.into();
        self.identifier = if self.element_id.is_empty() {
            synthetic_identifier(self.position)
        } else {
            self.element_id.clone()
        };
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_type(mut self, field_type: &str) -> Self {
        self.field_type = normalize_type(field_type);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_autocomplete(mut self, autocomplete: impl Into<String>) -> Self {
        self.autocomplete = autocomplete.into();
        self
    }
}

fn synthetic_identifier(position: usize) -> String {
    format!("field_{}", position)
}

fn normalize_type(raw: &str) -> String {
    let t = raw.trim().to_lowercase();
    if t.is_empty() { "text".to_string() } else { t }
}

/// Turn raw extraction records into descriptors, keeping document order.
///
/// Records that arrive without a position get their 1-based index.
/// Identifiers come out unique: the first element with a given id keeps it,
/// later duplicates and id-less elements get a synthetic key that no real
/// id on the page uses (`field_<n>`, then `field_<n>_2`, ...).
pub fn normalize_fields(raw: Vec<RawField>) -> Vec<FieldDescriptor> {
    let real_ids: HashSet<String> = raw
        .iter()
        .filter(|r| !r.element_id.is_empty())
        .map(|r| r.element_id.clone())
        .collect();
    let mut used: HashSet<String> = HashSet::new();
    let mut fields = Vec::with_capacity(raw.len());

    for (index, mut record) in raw.into_iter().enumerate() {
        if record.position == 0 {
            record.position = index + 1;
        }
        let mut field = FieldDescriptor::from_raw(record);

        if field.element_id.is_empty() || used.contains(&field.element_id) {
            let base = synthetic_identifier(field.position);
            field.identifier = std::iter::once(base.clone())
                .chain((2..).map(|n| format!("{}_{}", base, n)))
                .find(|candidate| !used.contains(candidate) && !real_ids.contains(candidate))
                .unwrap_or(base);
            if !field.element_id.is_empty() {
                tracing::debug!(id = %field.element_id, identifier = %field.identifier, "duplicate element id");
            }
        }

        used.insert(field.identifier.clone());
        fields.push(field);
    }

    fields
}

/// The first field carrying each identifier, in order. Later fields that
/// repeat an identifier are not looked at.
pub fn first_per_identifier<'a>(
    fields: &'a [FieldDescriptor],
) -> impl Iterator<Item = &'a FieldDescriptor> {
    let mut seen: HashSet<&'a str> = HashSet::new();
    fields.iter().filter(move |field| {
        let field: &'a FieldDescriptor = *field;
        seen.insert(field.identifier.as_str())
    })
}

// ============================================================================
// Category
// ============================================================================

/// Semantic kind of data a field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Email,
    Phone,
    FirstName,
    LastName,
    FullName,
    Address,
    City,
    State,
    ZipCode,
    Country,
    CompanyName,
    JobTitle,
    Website,
    LinkedinUrl,
    GithubUrl,
}

impl Category {
    pub const ALL: [Category; 15] = [
        Category::Email,
        Category::Phone,
        Category::FirstName,
        Category::LastName,
        Category::FullName,
        Category::Address,
        Category::City,
        Category::State,
        Category::ZipCode,
        Category::Country,
        Category::CompanyName,
        Category::JobTitle,
        Category::Website,
        Category::LinkedinUrl,
        Category::GithubUrl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Email => "email",
            Category::Phone => "phone",
            Category::FirstName => "first_name",
            Category::LastName => "last_name",
            Category::FullName => "full_name",
            Category::Address => "address",
            Category::City => "city",
            Category::State => "state",
            Category::ZipCode => "zip_code",
            Category::Country => "country",
            Category::CompanyName => "company_name",
            Category::JobTitle => "job_title",
            Category::Website => "website",
            Category::LinkedinUrl => "linkedin_url",
            Category::GithubUrl => "github_url",
        }
    }

    /// Human-readable badge text, e.g. "zip code".
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| ParseCategoryError(s.trim().to_string()))
    }
}
