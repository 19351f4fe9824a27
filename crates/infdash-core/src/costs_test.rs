use std::io::Write;
use std::path::Path;

use super::*;

#[test]
fn builtin_table_has_three_entries() {
    let table = CostTable::builtin();
    assert_eq!(table.len(), 3);
    assert!(!table.is_empty());
}

#[test]
fn builtin_lookup_is_case_insensitive() {
    let table = CostTable::builtin();
    assert_eq!(table.lookup("alice"), Some(2500.0));
    assert_eq!(table.lookup("Bob"), Some(1800.0));
    assert_eq!(table.lookup("  CAROL "), Some(4000.0));
}

#[test]
fn unknown_influencer_gets_fallback() {
    let table = CostTable::builtin();
    assert_eq!(table.lookup("dave"), None);
    assert!((table.cost_for("dave") - 3000.0).abs() < f64::EPSILON);
}

#[test]
fn empty_influencer_gets_fallback() {
    let table = CostTable::builtin();
    assert!((table.cost_for("") - DEFAULT_FALLBACK_COST).abs() < f64::EPSILON);
}

#[test]
fn with_fallback_overrides_only_the_fallback() {
    let table = CostTable::builtin().with_fallback(999.0);
    assert!((table.cost_for("zed") - 999.0).abs() < f64::EPSILON);
    assert_eq!(table.lookup("alice"), Some(2500.0));
}

#[test]
fn parse_cost_table_reads_entries_and_fallback() {
    let yaml = "fallback_cost: 1200\ninfluencers:\n  - name: Dana\n    cost: 700\n";
    let table = parse_cost_table(yaml).unwrap();
    assert_eq!(table.lookup("dana"), Some(700.0));
    assert!((table.fallback_cost() - 1200.0).abs() < f64::EPSILON);
}

#[test]
fn parse_cost_table_defaults_fallback() {
    let yaml = "influencers:\n  - name: dana\n    cost: 700\n";
    let table = parse_cost_table(yaml).unwrap();
    assert!((table.fallback_cost() - DEFAULT_FALLBACK_COST).abs() < f64::EPSILON);
}

#[test]
fn parse_cost_table_accepts_zero_cost() {
    let yaml = "influencers:\n  - name: freebie\n    cost: 0\n";
    let table = parse_cost_table(yaml).unwrap();
    assert_eq!(table.lookup("freebie"), Some(0.0));
}

#[test]
fn parse_cost_table_rejects_negative_cost() {
    let yaml = "influencers:\n  - name: dana\n    cost: -5\n";
    let err = parse_cost_table(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("dana")));
}

#[test]
fn parse_cost_table_rejects_duplicate_names_ignoring_case() {
    let yaml = "influencers:\n  - name: Dana\n    cost: 1\n  - name: dana\n    cost: 2\n";
    let err = parse_cost_table(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("duplicate")));
}

#[test]
fn parse_cost_table_rejects_blank_name() {
    let yaml = "influencers:\n  - name: '  '\n    cost: 1\n";
    let err = parse_cost_table(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn parse_cost_table_rejects_zero_fallback() {
    let yaml = "fallback_cost: 0\ninfluencers: []\n";
    let err = parse_cost_table(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("fallback_cost")));
}

#[test]
fn parse_cost_table_rejects_malformed_yaml() {
    let err = parse_cost_table("influencers: [name: ").unwrap_err();
    assert!(matches!(err, ConfigError::CostTableParse(_)));
}

#[test]
fn load_cost_table_missing_file_is_io_error() {
    let err = load_cost_table(Path::new("/nonexistent/costs.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::CostTableIo { .. }));
}

#[test]
fn load_cost_table_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "fallback_cost: 3000\ninfluencers:\n  - name: alice\n    cost: 2500\n  - name: erin\n    cost: 5200"
    )
    .unwrap();

    let table = load_cost_table(file.path()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.lookup("ERIN"), Some(5200.0));
}

#[test]
fn bundled_cost_table_matches_builtin() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/costs.yaml");
    let table = load_cost_table(&path).unwrap();
    let builtin = CostTable::builtin();
    assert_eq!(table.len(), builtin.len());
    for name in ["alice", "bob", "carol"] {
        assert_eq!(table.lookup(name), builtin.lookup(name));
    }
    assert!((table.fallback_cost() - builtin.fallback_cost()).abs() < f64::EPSILON);
}
