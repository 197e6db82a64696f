use assert_cmd::Command;
use clap::Parser;
use predicates::prelude::*;
use stocklens::cli::{Cli, Commands, ReportArgs};
use stocklens::core::filter::CoverageBucket;
use stocklens::core::sort::{Direction, SortKey};

mod util;

#[test]
fn report_flag_parsing() {
    // Given
    let argv = vec![
        "stk",
        "report",
        "inventario.csv",
        "--search",
        "widget",
        "--class",
        "A",
        "--class",
        "B",
        "--coverage",
        "critical",
        "--no-movement",
        "--sort-by",
        "inventory",
        "--desc",
        "--json",
    ];

    // When
    let cmd = Cli::parse_from(argv);

    // Then
    match cmd.command {
        Commands::Report(ReportArgs { source, query, json, .. }) => {
            assert_eq!(source.path.unwrap().to_string_lossy(), "inventario.csv");
            assert_eq!(query.search.as_deref(), Some("widget"));
            assert_eq!(query.classes, vec!["A", "B"]);
            assert_eq!(query.coverage, CoverageBucket::Critical);
            assert!(query.no_movement);
            assert!(!query.critical_days);
            assert!(json);

            let sort = query.sort_state();
            assert_eq!(sort.key, Some(SortKey::Inventory));
            assert_eq!(sort.direction, Direction::Descending);
        }
        _ => panic!("expected Report command"),
    }
}

#[test]
fn coverage_accepts_spanish_aliases() {
    let cmd = Cli::parse_from(vec!["stk", "report", "data.csv", "--coverage", "critico"]);
    match cmd.command {
        Commands::Report(args) => assert_eq!(args.query.coverage, CoverageBucket::Critical),
        _ => panic!("expected Report command"),
    }
}

#[test]
fn desc_requires_sort_by() {
    let result = Cli::try_parse_from(vec!["stk", "report", "data.csv", "--desc"]);
    assert!(result.is_err());
}

#[test]
fn report_json_emits_kpis_for_the_two_row_fixture() {
    let (tmp, path) = util::csv_fixture("inventario.csv", &util::two_row_csv());

    let output = Command::cargo_bin("stk")
        .unwrap()
        .current_dir(tmp.path())
        .args(["report", path.to_str().unwrap(), "--json", "--quiet"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["kpis"]["visible_count"], 2);
    assert_eq!(snapshot["kpis"]["total_count"], 2);
    assert_eq!(snapshot["kpis"]["total_inventory"], 100.0);
    assert_eq!(snapshot["visible"][0]["code"], "A1");
}

#[test]
fn report_no_movement_filters_to_the_gadget_row() {
    let (tmp, path) = util::csv_fixture("inventario.csv", &util::two_row_csv());

    let output = Command::cargo_bin("stk")
        .unwrap()
        .current_dir(tmp.path())
        .args([
            "report",
            path.to_str().unwrap(),
            "--no-movement",
            "--json",
            "--quiet",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["kpis"]["visible_count"], 1);
    assert_eq!(snapshot["visible"][0]["description"], "Gadget");
}

#[test]
fn report_table_mentions_visible_rows() {
    let (tmp, path) = util::csv_fixture("inventario.csv", &util::two_row_csv());

    Command::cargo_bin("stk")
        .unwrap()
        .current_dir(tmp.path())
        .args(["report", path.to_str().unwrap(), "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Visible rows"))
        .stdout(predicate::str::contains("Widget"));
}

#[test]
fn export_writes_the_filtered_set() {
    let (tmp, path) = util::csv_fixture("inventario.csv", &util::two_row_csv());
    let out = tmp.path().join("filtrado.csv");

    Command::cargo_bin("stk")
        .unwrap()
        .current_dir(tmp.path())
        .args([
            "export",
            path.to_str().unwrap(),
            "--no-movement",
            "--output",
            out.to_str().unwrap(),
            "--quiet",
        ])
        .assert()
        .success();

    let written = std::fs::read_to_string(&out).unwrap();
    let mut lines = written.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Codigo,Clave,Descripcion,Inv,Clasificacion,Promedio Vta Mes,Cobertura (Mes),Cobertura Dias (30)"
    );
    assert_eq!(lines.next().unwrap(), "A2,K2,Gadget,0,B,0,0,10");
    assert_eq!(lines.next(), None);
}

#[test]
fn export_of_an_empty_visible_set_writes_nothing() {
    let (tmp, path) = util::csv_fixture("inventario.csv", &util::two_row_csv());
    let out = tmp.path().join("filtrado.csv");

    Command::cargo_bin("stk")
        .unwrap()
        .current_dir(tmp.path())
        .args([
            "export",
            path.to_str().unwrap(),
            "--search",
            "matches-nothing",
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("nothing to export"));

    assert!(!out.exists());
}

#[test]
fn missing_file_is_a_recoverable_status_message() {
    let tmp = assert_fs::TempDir::new().unwrap();

    Command::cargo_bin("stk")
        .unwrap()
        .current_dir(tmp.path())
        .args(["report", "no-such-file.csv", "--quiet"])
        .assert()
        .success()
        .stderr(predicate::str::contains("load failed"));
}

#[test]
fn init_scaffolds_a_config_file() {
    let tmp = assert_fs::TempDir::new().unwrap();

    Command::cargo_bin("stk")
        .unwrap()
        .current_dir(tmp.path())
        .args(["init"])
        .assert()
        .success();

    let config = std::fs::read_to_string(tmp.path().join("stocklens.toml")).unwrap();
    assert!(config.contains("row_cap"));
    assert!(config.contains("inventario_filtrado.csv"));
}
