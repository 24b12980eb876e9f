//! Tests for end-to-end generation

use astgraph_core::{
    generate_file, generate_files_parallel, generate_source, ExportFormat, GenerateError,
    GenerateOptions, GrammarChoice, Output, ParseError, RenderError,
};
use std::path::PathBuf;
use tempfile::TempDir;

const SOURCE: &str = "<?php\nfunction greet($name) {\n    echo \"Hello\";\n}\n";

fn text(output: Output) -> String {
    match output {
        Output::Text(text) => text,
        Output::Image(_) => panic!("expected text output"),
    }
}

#[test]
fn test_generate_dot_by_default() {
    let dot = text(generate_source(SOURCE, &GenerateOptions::default()).unwrap());

    assert!(dot.starts_with("digraph ast {"));
    assert!(dot.contains("label=\"Definition of greet()\", shape=folder"));
    assert!(dot.contains("label=\"Parameter $name\""));
}

#[test]
fn test_generate_raw_tree() {
    let options = GenerateOptions {
        decorate: false,
        ..GenerateOptions::default()
    };
    let dot = text(generate_source(SOURCE, &options).unwrap());

    assert!(dot.contains("label=\"function\""));
    assert!(dot.contains("label=\"name\""));
    assert!(!dot.contains("shape="));
}

#[test]
fn test_generate_json() {
    let options = GenerateOptions {
        format: ExportFormat::Json,
        ..GenerateOptions::default()
    };
    let json = text(generate_source(SOURCE, &options).unwrap());

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["nodes"][0]["label"], "program");
    assert_eq!(value["nodes"][1]["label"], "Definition of greet()");
}

#[test]
fn test_generate_cst() {
    let options = GenerateOptions {
        grammar: GrammarChoice::Cst,
        ..GenerateOptions::default()
    };
    let dot = text(generate_source(SOURCE, &options).unwrap());

    assert!(dot.contains("label=\"function_definition\""));
    assert!(dot.contains("label=\"formal_parameters\""));
}

#[test]
fn test_generate_image_reports_render_errors() {
    let options = GenerateOptions {
        format: ExportFormat::Image,
        image_format: "tiff".to_string(),
        ..GenerateOptions::default()
    };
    let err = generate_source(SOURCE, &options).unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Render(RenderError::UnsupportedFormat(_))
    ));

    let options = GenerateOptions {
        format: ExportFormat::Image,
        renderer: PathBuf::from("/nonexistent/astgraph/dot"),
        ..GenerateOptions::default()
    };
    let err = generate_source(SOURCE, &options).unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Render(RenderError::RendererUnavailable { .. })
    ));
}

#[test]
fn test_generate_missing_file() {
    let err = generate_file(
        &PathBuf::from("/nonexistent/index.php"),
        &GenerateOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, GenerateError::Parse(ParseError::FileRead(_))));
}

#[test]
fn test_generate_files_parallel_keeps_order() {
    let tmp = TempDir::new().unwrap();
    let mut paths = Vec::new();
    for i in 0..8 {
        let path = tmp.path().join(format!("f{}.php", i));
        std::fs::write(&path, format!("<?php $v{} = {};", i, i)).unwrap();
        paths.push(path);
    }
    paths.push(tmp.path().join("missing.php"));

    let results = generate_files_parallel(&paths, &GenerateOptions::default());
    assert_eq!(results.len(), 9);

    for (i, (path, result)) in results.iter().enumerate().take(8) {
        assert_eq!(path, &paths[i]);
        let dot = text(result.as_ref().unwrap().clone());
        assert!(dot.contains(&format!("Assign to $v{}", i)));
        assert!(dot.contains(&format!("Integer {}", i)));
    }
    assert!(results[8].1.is_err());
}
