//! End-to-end model builds over temporary project trees

use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};
use packtree::{
    core::{Analyzer, ModelBuilder},
    error::PacktreeError,
    models::{PackageTree, Settings},
};

/// Create a project with the given files under `src/main/java`
fn create_project(files: &[(&str, &str)]) -> TempDir {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src/main/java");
    fs::create_dir_all(&src).unwrap();
    for (relative, content) in files {
        let path = src.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    dir
}

fn settings_for(dir: &Path) -> Settings {
    Settings {
        project_path: dir.to_path_buf(),
        ..Default::default()
    }
}

#[test]
fn test_declaration_and_import_build_both_chains() {
    let project = create_project(&[(
        "a/b/Foo.java",
        "package a.b;\n\nimport c.d.E;\n\npublic class Foo {\n  E e;\n}\n",
    )]);

    let model = Analyzer::new(settings_for(project.path())).analyze().unwrap();
    let tree = model.tree();

    let a = tree.root("a").unwrap();
    let b = tree.package(a).child("b").unwrap();
    let foo = tree.package(b).unit("Foo").unwrap();

    let c = tree.root("c").unwrap();
    let d = tree.package(c).child("d").unwrap();
    let e = tree.package(d).unit("E").unwrap();

    assert!(tree.unit(foo).has_dependency(e));
    assert_eq!(tree.root_count(), 2);
    assert!(model.is_declared(foo));
    assert!(!model.is_declared(e));
}

#[test]
fn test_files_in_same_package_share_nodes() {
    let project = create_project(&[
        ("x/y/A.java", "package x.y;\nclass A {}\n"),
        ("x/y/B.java", "package x.y;\nclass B {}\n"),
    ]);

    let model = Analyzer::new(settings_for(project.path())).analyze().unwrap();
    let tree = model.tree();

    assert_eq!(tree.package_count(), 2);
    let y = tree.find_package("x.y").unwrap();
    let units: Vec<&str> = tree.package(y).units().map(|(name, _)| name).collect();
    assert_eq!(units, vec!["A", "B"]);
}

#[test]
fn test_import_before_package_is_reported_and_skipped() {
    let project = create_project(&[
        ("Broken.java", "import q.R;\npackage p;\n"),
        ("p/Fine.java", "package p;\nimport q.S;\n"),
    ]);

    let model = Analyzer::new(settings_for(project.path())).analyze().unwrap();
    let report = model.report();

    assert_eq!(report.files_seen, 2);
    assert_eq!(report.files_failed, 1);
    assert_eq!(report.diagnostics.len(), 1);
    assert!(report.diagnostics[0].path.ends_with("Broken.java"));
    assert_eq!(report.diagnostics[0].line, Some(1));

    // The broken file never reached its package line, nor created its target
    assert!(model.tree().find_unit("q", "R").is_none());
    assert!(model.tree().find_unit("p", "Fine").is_some());
}

#[test]
fn test_import_resolves_to_declared_unit() {
    let project = create_project(&[
        ("p/Z.java", "package p;\nclass Z {}\n"),
        ("r/User.java", "package r;\nimport p.Z;\n"),
    ]);

    let model = Analyzer::new(settings_for(project.path())).analyze().unwrap();
    let tree = model.tree();

    assert_eq!(tree.unit_count(), 2);
    let z = tree.find_unit("p", "Z").unwrap();
    let user = tree.find_unit("r", "User").unwrap();
    assert!(tree.unit(user).has_dependency(z));
    assert!(model.declaring_file(z).unwrap().ends_with("p/Z.java"));
}

#[test]
fn test_import_before_declaration_is_order_independent() {
    // r/User.java sorts before z/Z.java, so the import creates Z first
    let project = create_project(&[
        ("r/User.java", "package r;\nimport z.Z;\n"),
        ("z/Z.java", "package z;\n"),
    ]);

    let model = Analyzer::new(settings_for(project.path())).analyze().unwrap();
    let tree = model.tree();
    let z = tree.find_unit("z", "Z").unwrap();

    assert_eq!(tree.unit_count(), 2);
    assert!(model.is_declared(z));
    assert!(tree.unit(tree.find_unit("r", "User").unwrap()).has_dependency(z));
}

#[test]
fn test_packages_named_build_and_target_are_parsed() {
    let project = create_project(&[
        ("com/acme/App.java", "package com.acme;\nimport com.acme.build.Tool;\n"),
        ("com/acme/build/Tool.java", "package com.acme.build;\n"),
        ("com/acme/target/Aim.java", "package com.acme.target;\n"),
    ]);

    let model = Analyzer::new(settings_for(project.path())).analyze().unwrap();
    let tree = model.tree();

    assert_eq!(model.report().files_seen, 3);
    let tool = tree.find_unit("com.acme.build", "Tool").unwrap();
    assert!(model.is_declared(tool));
    let aim = tree.find_unit("com.acme.target", "Aim").unwrap();
    assert!(model.is_declared(aim));
}

#[test]
fn test_empty_path_is_invalid() {
    let mut tree = PackageTree::new();
    assert!(matches!(
        tree.resolve_package_path(""),
        Err(PacktreeError::InvalidPath { .. })
    ));
    assert!(tree.is_empty());
}

#[test]
fn test_two_files_declaring_the_same_unit() {
    let mut builder = ModelBuilder::new();
    assert!(builder.add_file(Path::new("one/Dup.java"), ["package p;"]));
    assert!(!builder.add_file(Path::new("two/Dup.java"), ["package p;"]));

    let model = builder.finish().unwrap();
    assert_eq!(model.report().files_failed, 1);
    assert!(model.report().diagnostics[0].message.contains("p.Dup"));
}

#[test]
fn test_project_without_sources_builds_empty_model() {
    let project = create_project(&[]);
    let model = Analyzer::new(settings_for(project.path())).analyze().unwrap();
    assert!(model.tree().is_empty());
    assert_eq!(model.report().files_seen, 0);
}

#[test]
fn test_all_files_failing_fails_the_build() {
    let project = create_project(&[("A.java", "import a.B;\n"), ("C.java", "import c.D;\n")]);
    assert!(matches!(
        Analyzer::new(settings_for(project.path())).analyze(),
        Err(PacktreeError::BuildFailed { failed: 2 })
    ));
}

#[test]
fn test_missing_source_root() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        Analyzer::new(settings_for(dir.path())).analyze(),
        Err(PacktreeError::NotASourceProject { .. })
    ));
}

#[test]
fn test_parallel_and_sequential_builds_agree() {
    let mut files = Vec::new();
    for i in 0..30 {
        files.push((
            format!("m{}/U{}.java", i % 5, i),
            format!("package m{};\nimport m{}.U{};\n", i % 5, (i + 1) % 5, (i + 1) % 30),
        ));
    }
    let borrowed: Vec<(&str, &str)> = files.iter().map(|(p, c)| (p.as_str(), c.as_str())).collect();
    let project = create_project(&borrowed);

    let parallel = Analyzer::new(Settings {
        threads: Some(4),
        ..settings_for(project.path())
    })
    .analyze()
    .unwrap();
    let sequential = Analyzer::new(Settings {
        parallel: false,
        ..settings_for(project.path())
    })
    .analyze()
    .unwrap();

    let edges = |tree: &PackageTree| -> Vec<(String, String)> {
        tree.unit_ids()
            .flat_map(|id| {
                tree.unit(id)
                    .dependencies()
                    .map(move |dep| (tree.unit_qualified_name(id), tree.unit_qualified_name(dep)))
                    .collect::<Vec<_>>()
            })
            .collect()
    };

    assert_eq!(edges(parallel.tree()), edges(sequential.tree()));
    assert_eq!(parallel.tree().edge_count(), 30);
}
