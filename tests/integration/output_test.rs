//! Rendering of a model built from a temporary project

use std::fs;
use tempfile::{tempdir, TempDir};
use packtree::{
    cli::commands::build,
    core::{Analyzer, Model},
    models::{OutputFormat, Settings},
    output::create_formatter,
};

fn create_shop() -> TempDir {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src/main/java/com/shop");
    fs::create_dir_all(src.join("order")).unwrap();
    fs::create_dir_all(src.join("billing")).unwrap();
    fs::write(
        src.join("order/Order.java"),
        "package com.shop.order;\n\nimport com.shop.billing.Invoice;\n\
         import java.util.List;\n\npublic class Order {}\n",
    )
    .unwrap();
    fs::write(
        src.join("billing/Invoice.java"),
        "package com.shop.billing;\n\nimport com.shop.order.Order;\n\npublic class Invoice {}\n",
    )
    .unwrap();
    dir
}

fn build_model(dir: &TempDir) -> Model {
    Analyzer::new(Settings {
        project_path: dir.path().to_path_buf(),
        ..Default::default()
    })
    .analyze()
    .unwrap()
}

#[test]
fn test_csv_lists_every_edge() {
    let dir = create_shop();
    let csv = create_formatter(OutputFormat::Csv, false, false, false)
        .format(&build_model(&dir), "shop")
        .unwrap();

    assert_eq!(
        csv,
        "source,target\n\
         com.shop.billing.Invoice,com.shop.order.Order\n\
         com.shop.order.Order,com.shop.billing.Invoice\n\
         com.shop.order.Order,java.util.List\n"
    );
}

#[test]
fn test_text_reports_cycle() {
    let dir = create_shop();
    let text = create_formatter(OutputFormat::Text, false, false, false)
        .format(&build_model(&dir), "shop")
        .unwrap();

    assert!(text.contains("Dependency cycles: 1"));
    assert!(text.contains("com.shop.billing.Invoice <-> com.shop.order.Order"));
    assert!(text.contains("List (implicit)"));
}

#[test]
fn test_json_statistics() {
    let dir = create_shop();
    let json = create_formatter(OutputFormat::Json, false, false, false)
        .format(&build_model(&dir), "shop")
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["project"], "shop");
    assert_eq!(value["statistics"]["units"], 3);
    assert_eq!(value["statistics"]["declared_units"], 2);
    assert_eq!(value["statistics"]["roots"], 2);
    assert_eq!(value["statistics"]["cycles"].as_array().unwrap().len(), 1);
    assert_eq!(value["files_processed"], 2);
}

#[test]
fn test_build_command_writes_dot_file() {
    let dir = create_shop();
    let output = dir.path().join("model.dot");
    build(&Settings {
        project_path: dir.path().to_path_buf(),
        project_name: Some("Shop".to_string()),
        output_format: OutputFormat::Dot,
        output_file: Some(output.clone()),
        quiet: true,
        ..Default::default()
    })
    .unwrap();

    let dot = fs::read_to_string(output).unwrap();
    assert!(dot.starts_with("digraph \"Shop\" {"));
    // com, shop, order, billing, java, util
    assert_eq!(dot.matches("subgraph cluster_").count(), 6);
    assert_eq!(dot.matches(" -> ").count(), 3);
}
