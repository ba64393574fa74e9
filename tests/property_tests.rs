use field_autofill::field::categorizer::{CATEGORY_RULES, categorize, categorize_all};
use field_autofill::field::field_model::{Category, FieldDescriptor, RawField, normalize_fields};
use field_autofill::field::sensitivity::is_sensitive;
use field_autofill::fill::mapping::MappingTable;
use field_autofill::fill::planner::{ScanStats, plan};
use proptest::prelude::*;

// One literal per rule, in rule order; each matches its own rule's patterns.
const RULE_SAMPLES: [&str; 15] = [
    "email", "phone", "fname", "lname", "full_name", "street", "city", "province", "zip",
    "country", "company", "title", "website", "linkedin", "github",
];

fn rule_index(category: Category) -> usize {
    CATEGORY_RULES
        .iter()
        .position(|(c, _)| *c == category)
        .unwrap_or(usize::MAX)
}

fn arb_attr() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z_]{1,10}",
        prop::sample::select(RULE_SAMPLES.to_vec()).prop_map(str::to_string),
        prop::sample::select(vec!["password", "card", "pin", "account"]).prop_map(str::to_string),
    ]
}

fn arb_type() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["text", "email", "tel", "password", "hidden", "PASSWORD"])
        .prop_map(str::to_string)
}

fn arb_field(position: usize) -> impl Strategy<Value = FieldDescriptor> {
    (arb_attr(), arb_attr(), arb_attr(), arb_attr(), arb_type()).prop_map(
        move |(id, name, label, placeholder, field_type)| {
            FieldDescriptor::new(position)
                .with_id(id)
                .with_name(name)
                .with_label(label)
                .with_placeholder(placeholder)
                .with_type(&field_type)
        },
    )
}

fn arb_fields() -> impl Strategy<Value = Vec<FieldDescriptor>> {
    (0usize..8).prop_flat_map(|n| (1..=n).map(arb_field).collect::<Vec<_>>())
}

// ── Sensitivity guard ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn protected_types_are_always_sensitive(
        field in arb_field(1),
        protected in prop::sample::select(vec!["password", "hidden", "Hidden"])
    ) {
        let field = field.with_type(protected);
        prop_assert!(is_sensitive(&field));
    }

    #[test]
    fn categorize_is_deterministic(field in arb_field(1)) {
        prop_assert_eq!(categorize(&field), categorize(&field));
    }
}

// ── Rule order ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn earliest_matching_rule_wins(i in 0usize..15, j in 0usize..15) {
        let field = FieldDescriptor::new(1)
            .with_name(RULE_SAMPLES[i])
            .with_label(RULE_SAMPLES[j]);

        let category = categorize(&field);
        prop_assert!(category.is_some());
        prop_assert!(
            rule_index(category.unwrap_or(Category::GithubUrl)) <= i.min(j),
            "{:?} for {} / {}",
            category,
            RULE_SAMPLES[i],
            RULE_SAMPLES[j]
        );
    }
}

// ── Planner ──────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn plan_never_targets_sensitive_or_unknown_fields(fields in arb_fields()) {
        let categorization = categorize_all(&fields);
        let mapping = MappingTable::defaults();

        let fill_plan = plan(&fields, &categorization, &mapping);

        prop_assert!(fill_plan.len() <= fields.len());
        for entry in &fill_plan {
            let category = categorization.get(&entry.identifier);
            prop_assert!(category.is_some());
            prop_assert_eq!(
                category.and_then(|c| mapping.get(*c)),
                Some(entry.value.as_str())
            );
            prop_assert!(
                fields
                    .iter()
                    .any(|f| f.identifier == entry.identifier && !is_sensitive(f)),
                "planned {} without a safe field behind it",
                entry.identifier
            );
        }
    }

    #[test]
    fn planning_twice_gives_the_same_plan(fields in arb_fields()) {
        let categorization = categorize_all(&fields);
        let mapping = MappingTable::defaults();
        prop_assert_eq!(
            plan(&fields, &categorization, &mapping),
            plan(&fields, &categorization, &mapping)
        );
    }

    #[test]
    fn stats_bound_the_plan(fields in arb_fields()) {
        let categorization = categorize_all(&fields);
        let mapping = MappingTable::defaults();

        let stats = ScanStats::compute(&fields, &categorization, &mapping);
        let fill_plan = plan(&fields, &categorization, &mapping);

        prop_assert_eq!(stats.total, fields.len());
        prop_assert!(stats.fillable <= stats.categorized);
        prop_assert!(stats.categorized <= stats.total);
        prop_assert!(fill_plan.len() <= stats.fillable);
    }
}

// ── Identifiers ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn normalized_identifiers_never_repeat(
        ids in prop::collection::vec(
            prop::sample::select(vec!["", "a", "field_1", "field_2", "field_3"]),
            0..8,
        )
    ) {
        let raw: Vec<RawField> = ids
            .iter()
            .map(|id| RawField { element_id: id.to_string(), ..RawField::default() })
            .collect();

        let fields = normalize_fields(raw);

        let mut seen = std::collections::HashSet::new();
        for field in &fields {
            prop_assert!(seen.insert(field.identifier.clone()), "{} repeated", field.identifier);
        }
    }
}
