//! Renders reports for the scenario fixture shipped with itax-data.

use std::path::PathBuf;

use itax_cli::report::{ScenarioOutcome, SlabTableReport};
use itax_core::{Regime, RegimeSlabTable, RegimeTaxOrchestrator};
use itax_data::scenario;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn metro_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("itax-data")
        .join("tests")
        .join("fixtures")
        .join("metro.toml")
}

#[test]
fn text_report_for_metro_fixture() {
    let scenario = scenario::load_from_file(&metro_fixture()).unwrap();
    let comparison = RegimeTaxOrchestrator::fy2025_26().compare(
        scenario.gross_income,
        &scenario.deductions,
        &scenario.salary,
    );

    assert_eq!(comparison.new_regime.tax_payable, dec!(145000));
    assert_eq!(comparison.old_regime.tax_payable, dec!(129000));
    assert_eq!(comparison.recommended, Regime::Old);

    let report = ScenarioOutcome {
        scenario: &scenario,
        comparison: &comparison,
    }
    .to_string();

    assert!(report.starts_with("metro (FY 2025-26)"));
    assert!(report.contains("HRA exemption"));
    assert!(report.contains("1,80,000.00"));
    assert!(report.contains("1,29,000.00"));
    assert!(report.contains("Recommended: Old Regime (saves 16,000.00)"));
}

#[test]
fn json_report_carries_recommendation() {
    let scenario = scenario::load_from_file(&metro_fixture()).unwrap();
    let comparison = RegimeTaxOrchestrator::fy2025_26().compare(
        scenario.gross_income,
        &scenario.deductions,
        &scenario.salary,
    );
    let outcome = ScenarioOutcome {
        scenario: &scenario,
        comparison: &comparison,
    };

    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["scenario"]["name"], "metro");
    assert_eq!(json["comparison"]["recommended"], "old");
}

#[test]
fn slab_report_lists_every_old_regime_slab() {
    let table = RegimeSlabTable::old_regime_fy2025_26();

    let report = SlabTableReport(&table).to_string();

    assert_eq!(report.lines().count(), 5);
    assert!(report.contains("1 - 2,50,000"));
    assert!(report.contains("above 10,00,000"));
}
