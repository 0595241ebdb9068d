//! Scanning a site tree on disk

use breaks_extract::{ExtractConfig, ExtractError, Extractor};
use breaks_model::{BreakValidator, Wcag2Catalog};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn site() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "pages/index.astro",
        "---\n/** @breaklocation Home */\n---\n<main>\n{/** @break\n * description: Logo lacks alt text\n * wcag2: 1.1.1\n */}\n</main>\n",
    );
    write(
        root,
        "components/Nav.astro",
        "<nav>{/** @break\n * location: Navigation\n * description: Menu traps focus\n * wcag2: [2.1.2]\n * wcag3: Keyboard navigation\n */}</nav>\n",
    );
    write(
        root,
        "content/exhibits/pottery.md",
        "---\nbreaklocation: Exhibits\nbreaks:\n  - description: Vase photo has no alt text\n    wcag2: 1.1.1\n---\n\n# Pottery\n",
    );
    write(
        root,
        "content/exhibits/_draft.md",
        "---\nbreaks:\n  - description: Not published\n    wcag3: x\n---\n",
    );
    write(root, "styles/site.css", "/** @break wcag3: ignored */");
    dir
}

#[test]
fn discovers_parseable_files_in_sorted_order() {
    let dir = site();
    let found = Extractor::default().discover(dir.path()).unwrap();
    assert_eq!(
        found,
        vec![
            "components/Nav.astro".to_string(),
            "content/exhibits/pottery.md".to_string(),
            "pages/index.astro".to_string(),
        ]
    );
}

#[test]
fn scan_extracts_templates_and_narratives() {
    let dir = site();
    let records = Extractor::default().scan_dir(dir.path()).unwrap();

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "components/Nav.astro-6",
            "content/exhibits/pottery.md-0",
            "pages/index.astro-43",
        ]
    );

    let catalog = Wcag2Catalog::standard();
    let validated = BreakValidator::new(&catalog).validate_all(&records).unwrap();
    let locations: Vec<&str> = validated.iter().map(|b| b.location().as_str()).collect();
    assert_eq!(locations, vec!["Navigation", "Exhibits", "Home"]);
}

#[test]
fn scanning_twice_is_deterministic() {
    let dir = site();
    let extractor = Extractor::default();
    assert_eq!(
        extractor.scan_dir(dir.path()).unwrap(),
        extractor.scan_dir(dir.path()).unwrap()
    );
}

#[test]
fn configured_narrative_dir_is_respected() {
    let dir = site();
    write(
        dir.path(),
        "stories/tour.md",
        "---\nbreaks:\n  - description: Audio has no transcript\n    location: Tour\n    wcag2: 1.2.1\n---\n",
    );
    let extractor = Extractor::new(&ExtractConfig::new().with_narrative_dir("stories"));
    let found = extractor.discover(dir.path()).unwrap();
    assert!(found.contains(&"stories/tour.md".to_string()));
    assert!(!found.contains(&"content/exhibits/pottery.md".to_string()));
}

#[test]
fn malformed_annotation_aborts_scan() {
    let dir = site();
    write(dir.path(), "pages/broken.astro", "/** @break\n * wcag2: [1.1.1\n */");
    let err = Extractor::default().scan_dir(dir.path()).unwrap_err();
    assert!(matches!(err, ExtractError::Payload { ref path, offset: 0, .. } if path == "pages/broken.astro"));
}

#[test]
fn missing_root_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Extractor::default()
        .scan_dir(&dir.path().join("nope"))
        .unwrap_err();
    assert!(matches!(err, ExtractError::Io { .. }));
}

#[test]
fn list_shaped_front_matter_does_not_stop_the_scan() {
    let dir = site();
    write(
        dir.path(),
        "content/exhibits/index.md",
        "---\n- pottery\n- textiles\n---\n\n# Exhibits\n",
    );

    let records = Extractor::default().scan_dir(dir.path()).unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "components/Nav.astro-6",
            "content/exhibits/pottery.md-0",
            "pages/index.astro-43",
        ]
    );
}
