//! Ecosystem detection from marker files and source extensions

use std::path::Path;

use ignore::WalkBuilder;
use indexmap::IndexSet;

/// A language toolchain whose scanners bruh knows how to run.
///
/// Variant order is detection order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Ecosystem {
    #[strum(to_string = "go", serialize = "golang")]
    Go,
    #[strum(to_string = "javascript", serialize = "js")]
    JavaScript,
    #[strum(to_string = "typescript", serialize = "ts")]
    TypeScript,
    #[strum(to_string = "python", serialize = "py")]
    Python,
    #[strum(to_string = "java")]
    Java,
    #[strum(to_string = "rust", serialize = "rs")]
    Rust,
}

/// Directories never descended into, besides hidden ones.
const SKIPPED_DIRS: [&str; 3] = ["node_modules", "vendor", "target"];

const GO_MARKERS: &[&str] = &["go.mod"];
const JS_MARKERS: &[&str] = &["package.json"];
const PYTHON_MARKERS: &[&str] = &["requirements.txt", "pyproject.toml", "setup.py"];
const JAVA_MARKERS: &[&str] = &["pom.xml", "build.gradle"];
const RUST_MARKERS: &[&str] = &["Cargo.toml"];

const GO_EXTENSIONS: &[&str] = &["go"];
const JS_EXTENSIONS: &[&str] = &["js", "ts", "jsx", "tsx"];
const TS_EXTENSIONS: &[&str] = &["ts", "tsx"];
const PYTHON_EXTENSIONS: &[&str] = &["py"];
const JAVA_EXTENSIONS: &[&str] = &["java"];
const RUST_EXTENSIONS: &[&str] = &["rs"];

/// Detect the ecosystems present under `root`.
///
/// Order is fixed: go, javascript/typescript, python, java, rust. A JS project
/// is reported as `typescript` when any `.ts`/`.tsx` file exists. An empty set
/// means nothing was recognized.
pub fn detect_ecosystems(root: &Path) -> IndexSet<Ecosystem> {
    let mut found = IndexSet::new();

    if has_marker(root, GO_MARKERS) || has_files_with_extension(root, GO_EXTENSIONS) {
        found.insert(Ecosystem::Go);
    }

    if has_marker(root, JS_MARKERS) || has_files_with_extension(root, JS_EXTENSIONS) {
        if has_files_with_extension(root, TS_EXTENSIONS) {
            found.insert(Ecosystem::TypeScript);
        } else {
            found.insert(Ecosystem::JavaScript);
        }
    }

    if has_marker(root, PYTHON_MARKERS) || has_files_with_extension(root, PYTHON_EXTENSIONS) {
        found.insert(Ecosystem::Python);
    }

    if has_marker(root, JAVA_MARKERS) || has_files_with_extension(root, JAVA_EXTENSIONS) {
        found.insert(Ecosystem::Java);
    }

    if has_marker(root, RUST_MARKERS) || has_files_with_extension(root, RUST_EXTENSIONS) {
        found.insert(Ecosystem::Rust);
    }

    log::debug!(
        "Detected ecosystems in {}: {:?}",
        root.display(),
        found.iter().map(|e| e.to_string()).collect::<Vec<_>>()
    );
    found
}

/// The forced set if one was given (order kept, duplicates dropped),
/// otherwise what [`detect_ecosystems`] finds.
pub fn resolve_ecosystems(root: &Path, forced: &[Ecosystem]) -> IndexSet<Ecosystem> {
    if forced.is_empty() {
        detect_ecosystems(root)
    } else {
        forced.iter().copied().collect()
    }
}

fn has_marker(root: &Path, markers: &[&str]) -> bool {
    markers.iter().any(|marker| root.join(marker).exists())
}

/// Whether any file under `root` ends in one of `extensions`.
///
/// Stops at the first match. Hidden directories and [`SKIPPED_DIRS`] are not
/// entered, but hidden files count; ignore files are not consulted.
fn has_files_with_extension(root: &Path, extensions: &[&str]) -> bool {
    WalkBuilder::new(root)
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .filter_entry(|entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            let name = entry.file_name();
            let skipped = name.to_string_lossy().starts_with('.')
                || SKIPPED_DIRS
                    .iter()
                    .any(|skip| name == std::ffi::OsStr::new(skip));
            entry.depth() == 0 || !(is_dir && skipped)
        })
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .any(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.contains(&ext))
        })
}
