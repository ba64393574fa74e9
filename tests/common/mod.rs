#![allow(dead_code)]

use field_autofill::browser::fixture::{FixtureElement, PageFixture};
use field_autofill::field::field_model::FieldDescriptor;

pub fn fixture_path(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Text field with only a name attribute, at position 1.
pub fn named(name: &str) -> FieldDescriptor {
    FieldDescriptor::new(1).with_name(name)
}

/// Same page as `tests/fixtures/signup.json`.
///
/// 9 inputs: 6 categorized (first/last name, email, disabled phone,
/// read-only company, placeholder-only city), 3 sensitive (password, card
/// number, hidden csrf token).
pub fn signup_page() -> PageFixture {
    PageFixture::new(vec![
        FixtureElement::input("first_name", "", "text").with_label("First Name"),
        FixtureElement::input("", "last_name", "text").with_label("Last Name"),
        FixtureElement::input("email", "email", "email").with_label("Email"),
        FixtureElement::input("phone", "phone", "tel").disabled(),
        FixtureElement::input("company", "company", "text").read_only(),
        FixtureElement::input("password", "password", "password").with_label("Password"),
        FixtureElement::input("card_number", "card_number", "text").with_label("Card number"),
        FixtureElement::input("", "", "text").with_placeholder("City"),
        FixtureElement::input("csrf", "csrf_token", "hidden"),
    ])
}
