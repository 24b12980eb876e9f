//! Tests for PHP source discovery

use astgraph_core::discovery::PHP_EXTENSIONS;
use astgraph_core::{discover_files, discover_php_sources};
use tempfile::TempDir;

#[test]
fn test_discover_php_files() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("index.php"), "<?php echo 1;").unwrap();
    std::fs::write(tmp.path().join("view.phtml"), "<p></p>").unwrap();
    std::fs::write(tmp.path().join("readme.md"), "# hi").unwrap();

    let files = discover_files(tmp.path(), PHP_EXTENSIONS, &[]).unwrap();
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f.is_absolute()));
}

#[test]
fn test_discover_files_ignores() {
    let tmp = TempDir::new().unwrap();
    let vendor = tmp.path().join("vendor");
    std::fs::create_dir(&vendor).unwrap();
    std::fs::write(vendor.join("autoload.php"), "<?php").unwrap();
    std::fs::write(tmp.path().join("index.php"), "<?php").unwrap();

    let files = discover_files(tmp.path(), PHP_EXTENSIONS, &["vendor/".to_string()]).unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("index.php"));
}

#[test]
fn test_gitignore_respected() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir(tmp.path().join(".git")).unwrap();
    std::fs::write(tmp.path().join(".gitignore"), "cache/\n").unwrap();

    let cache = tmp.path().join("cache");
    std::fs::create_dir(&cache).unwrap();
    std::fs::write(cache.join("compiled.php"), "<?php").unwrap();
    std::fs::write(tmp.path().join("app.php"), "<?php").unwrap();

    let files = discover_files(tmp.path(), PHP_EXTENSIONS, &[]).unwrap();
    assert_eq!(files.len(), 1);
}

#[test]
fn test_mixed_inputs_sorted_and_deduplicated() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    std::fs::create_dir(&src).unwrap();
    std::fs::write(src.join("b.php"), "<?php").unwrap();
    std::fs::write(src.join("a.php"), "<?php").unwrap();
    let script = tmp.path().join("bin.inc");
    std::fs::write(&script, "<?php").unwrap();

    let inputs = vec![src.clone(), src.join("a.php"), script.clone()];
    let files = discover_php_sources(&inputs, &[]).unwrap();

    let names: Vec<String> = files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["bin.inc", "a.php", "b.php"]);
}
