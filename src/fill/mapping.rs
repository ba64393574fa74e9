use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AutofillError, Result};
use crate::field::field_model::Category;

/// User-configured value for each category.
///
/// Owned by the caller and passed into every scan/fill; there is no
/// process-wide copy. Serializes as a flat `{"category": "value"}` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingTable {
    values: BTreeMap<Category, String>,
}

impl MappingTable {
    pub fn empty() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Built-in seed table used when nothing has been stored yet.
    pub fn defaults() -> Self {
        let seed = [
            (Category::Email, "your_email@example.com"),
            (Category::FirstName, "John"),
            (Category::LastName, "Doe"),
            (Category::FullName, "John Doe"),
            (Category::Phone, "+1234567890"),
            (Category::Address, "123 Main Street"),
            (Category::City, "New York"),
            (Category::State, "NY"),
            (Category::ZipCode, "10001"),
            (Category::Country, "United States"),
            (Category::CompanyName, "Tech Corp"),
            (Category::JobTitle, "Software Engineer"),
            (Category::Website, "https://example.com"),
            (Category::LinkedinUrl, "https://linkedin.com/in/johndoe"),
            (Category::GithubUrl, "https://github.com/johndoe"),
        ];
        seed.into_iter().collect()
    }

    /// Build a table from user-entered `(category, value)` pairs.
    ///
    /// Both sides are trimmed. Pairs with an empty category or an empty value
    /// are dropped; an unrecognized category name is rejected. Later pairs
    /// override earlier ones.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut table = Self::empty();
        for (category, value) in entries {
            let category = category.as_ref().trim();
            let value = value.as_ref().trim();
            if category.is_empty() || value.is_empty() {
                continue;
            }
            let category: Category = category
                .parse()
                .map_err(|e| AutofillError::Validation(format!("{}", e)))?;
            table.set(category, value);
        }
        Ok(table)
    }

    /// Configured value, treating an empty string as unset.
    pub fn get(&self, category: Category) -> Option<&str> {
        self.values
            .get(&category)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, category: Category, value: impl Into<String>) {
        self.values.insert(category, value.into());
    }

    pub fn remove(&mut self, category: Category) -> Option<String> {
        self.values.remove(&category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &str)> {
        self.values.iter().map(|(c, v)| (*c, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<V: Into<String>> FromIterator<(Category, V)> for MappingTable {
    fn from_iter<T: IntoIterator<Item = (Category, V)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(c, v)| (c, v.into())).collect(),
        }
    }
}
