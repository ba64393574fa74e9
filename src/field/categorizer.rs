use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::field::field_model::{
    Categorization, Category, FieldDescriptor, first_per_identifier,
};

/// Ordered rule table. The first category whose patterns match wins, so the
/// order here is the tie-break policy and must not be re-sorted.
pub const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (Category::Email, &["email", "e-mail"]),
    (Category::Phone, &["phone", "mobile", "tel"]),
    (Category::FirstName, &["first.*name", "fname", "given.*name"]),
    (Category::LastName, &["last.*name", "lname", "surname", "family.*name"]),
    (Category::FullName, &["^name$", "full.*name"]),
    (Category::Address, &["address", "street"]),
    (Category::City, &["city", "town"]),
    (Category::State, &["state", "province", "region"]),
    (Category::ZipCode, &["zip", "postal"]),
    (Category::Country, &["country", "nation"]),
    (Category::CompanyName, &["company", "organization", "employer"]),
    (Category::JobTitle, &["title", "position", "role"]),
    (Category::Website, &["website", "url", "link"]),
    (Category::LinkedinUrl, &["linkedin"]),
    (Category::GithubUrl, &["github"]),
];

struct CompiledRule {
    category: Category,
    patterns: Vec<Regex>,
}

static COMPILED_RULES: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| {
    CATEGORY_RULES
        .iter()
        .map(|(category, patterns)| CompiledRule {
            category: *category,
            patterns: patterns
                .iter()
                .filter_map(|p| RegexBuilder::new(p).case_insensitive(true).build().ok())
                .collect(),
        })
        .collect()
});

/// The text the rules are matched against: name, id, label and placeholder
/// joined by single spaces.
pub fn search_text(field: &FieldDescriptor) -> String {
    format!(
        "{} {} {} {}",
        field.name, field.element_id, field.label, field.placeholder
    )
}

/// Infer the category of a field, or `None` when no rule matches.
///
/// `autocomplete` is deliberately not part of the search text.
pub fn categorize(field: &FieldDescriptor) -> Option<Category> {
    let text = search_text(field);
    if text.trim().is_empty() {
        return None;
    }

    COMPILED_RULES
        .iter()
        .find(|rule| rule.patterns.iter().any(|re| re.is_match(&text)))
        .map(|rule| rule.category)
}

/// Categorize every field of a scan. Uncategorized fields are left out, and
/// an identifier belongs to the first field that carries it.
pub fn categorize_all(fields: &[FieldDescriptor]) -> Categorization {
    let mut categorization = Categorization::new();
    for field in first_per_identifier(fields) {
        match categorize(field) {
            Some(category) => {
                categorization.insert(field.identifier.clone(), category);
            }
            None => tracing::debug!(field = %field.identifier, "no category matched"),
        }
    }
    categorization
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_compiles() {
        assert_eq!(COMPILED_RULES.len(), CATEGORY_RULES.len());
        for (rule, (_, sources)) in COMPILED_RULES.iter().zip(CATEGORY_RULES) {
            assert_eq!(rule.patterns.len(), sources.len(), "{:?}", rule.category);
        }
    }

    #[test]
    fn every_category_has_exactly_one_rule() {
        for category in Category::ALL {
            let count = CATEGORY_RULES.iter().filter(|(c, _)| *c == category).count();
            assert_eq!(count, 1, "{}", category);
        }
    }
}
