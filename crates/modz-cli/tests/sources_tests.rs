use super::*;
use crate::config::compile_globset;
use std::fs;

fn touch(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, "const x = 1;\n").unwrap();
    path
}

fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|file| file.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect()
}

#[test]
fn walks_directories_for_default_extensions() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for file in ["a.js", "b.ts", "c.mjs", "d.cts", "e.tsx", "f.json", "nested/g.mts"] {
        touch(root, file);
    }
    let files = discover_files(&[root.to_path_buf()], &DiscoveryOptions::default()).unwrap();
    assert_eq!(relative(root, &files), ["a.js", "b.ts", "c.mjs", "d.cts", "nested/g.mts"]);
}

#[test]
fn skips_node_modules_and_hidden_directories() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "src/keep.ts");
    touch(root, "node_modules/pkg/index.js");
    touch(root, ".cache/built.js");
    touch(root, "src/node_modules/inner.js");
    let files = discover_files(&[root.to_path_buf()], &DiscoveryOptions::default()).unwrap();
    assert_eq!(relative(root, &files), ["src/keep.ts"]);
}

#[test]
fn explicit_files_are_always_kept() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let component = touch(root, "view.tsx");
    let exclude = compile_globset(&["**/*".to_string()]).unwrap();
    let options = DiscoveryOptions {
        include: None,
        exclude: Some(&exclude),
    };
    let files = discover_files(&[component.clone(), component.clone()], &options).unwrap();
    assert_eq!(files, [component]);
}

#[test]
fn include_and_exclude_globs_filter_walked_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "src/a.ts");
    touch(root, "src/a.test.ts");
    touch(root, "scripts/build.js");
    let include = compile_globset(&["src/**".to_string()]).unwrap();
    let exclude = compile_globset(&["**/*.test.ts".to_string()]).unwrap();
    let options = DiscoveryOptions {
        include: Some(&include),
        exclude: Some(&exclude),
    };
    let files = discover_files(&[root.to_path_buf()], &options).unwrap();
    assert_eq!(relative(root, &files), ["src/a.ts"]);
}

#[test]
fn missing_paths_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(discover_files(&[missing], &DiscoveryOptions::default()).is_err());
}
