//! Commands over a small site on disk

use breaks_cli::{commands, SiteConfig};
use breaks_model::{ValidationErrors, Wcag2Catalog};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SECTIONS: &str = r#"[
  {"id": "Home", "path": ""},
  {"id": "Exhibits", "path": "exhibits/", "description": "Rotating collections."},
  {"id": "Gift Shop", "path": "gift-shop/"}
]"#;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn site() -> (TempDir, SiteConfig) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("src");
    write(
        &root,
        "pages/index.astro",
        "/** @breaklocation Home */\n<img src=\"logo.png\">{/** @break\n * description: Logo has no alt text\n * wcag2: 1.1.1\n */}\n",
    );
    write(
        &root,
        "pages/shop.astro",
        "/** @breaklocation Gift Shop */\n{/** @break\n * description: Prices are light grey\n * wcag2: 1.4.3\n * photosensitivity: false\n */}\n",
    );
    write(
        &root,
        "content/exhibits/vase.md",
        "---\nbreaklocation: Exhibits\nbreaks:\n  - description: Vase photo has no alt text\n    wcag2: [1.1.1]\n    wcag3: Image alternatives\n---\n",
    );
    write(&root, "content/sections.json", SECTIONS);

    let config = SiteConfig::new()
        .with_source_root(&root)
        .with_sections_file(root.join("content/sections.json"))
        .with_base_url("/museum/");
    (dir, config)
}

#[test]
fn scan_and_validate() {
    let (_dir, config) = site();
    let wcag2 = Wcag2Catalog::standard();
    assert_eq!(commands::scan(&config).unwrap().len(), 3);

    let breaks = commands::validate(&config, &wcag2).unwrap();
    let ids: Vec<_> = breaks.iter().map(|b| b.id()).collect();
    assert_eq!(
        ids,
        vec![
            "content/exhibits/vase.md-0",
            "pages/index.astro-48",
            "pages/shop.astro-33",
        ]
    );
}

#[test]
fn check_reports_counts() {
    let (_dir, config) = site();
    let report = commands::check(&config, &Wcag2Catalog::standard()).unwrap();
    assert_eq!(report.breaks, 3);
    assert_eq!(report.wcag2.get("1.1.1"), Some(&2));
    assert_eq!(report.areas.get("Gift Shop"), Some(&1));
}

#[test]
fn check_rejects_unknown_area() {
    let (dir, config) = site();
    write(
        &dir.path().join("src"),
        "pages/attic.astro",
        "/** @break\n * location: Attic\n * description: Stairs only\n * wcag3: Alternate route\n */",
    );
    let err = commands::check(&config, &Wcag2Catalog::standard()).unwrap_err();
    let errors = err.downcast_ref::<ValidationErrors>().unwrap();
    assert_eq!(errors.ids(), vec!["pages/attic.astro-0"]);
}

#[test]
fn validate_lists_every_failing_record() {
    let (dir, config) = site();
    let root = dir.path().join("src");
    write(&root, "pages/a.astro", "/** @break\n * location: Home\n * description: x\n */");
    write(&root, "pages/b.astro", "/** @break\n * location: Home\n * description: y\n * wcag2: 9.9.9\n */");
    let err = commands::validate(&config, &Wcag2Catalog::standard()).unwrap_err();
    let errors = err.downcast_ref::<ValidationErrors>().unwrap();
    assert_eq!(errors.ids(), vec!["pages/a.astro-0", "pages/b.astro-0"]);
    assert!(format!("{err:#}").contains("One or both of wcag2 and/or wcag3 must be set."));
}

#[test]
fn render_by_failure() {
    let (_dir, config) = site();
    let html = commands::render(&config, &Wcag2Catalog::standard(), "a=failure&v=2").unwrap();
    assert!(html.contains("<option value=\"failure\" selected>Failure</option>"));
    assert_eq!(html.matches("<section>").count(), 2);
    assert!(html.contains("<dt><a href=\"/museum/exhibits/\">Exhibits</a></dt>"));
    assert!(html.find("1.1.1: Non-text Content").unwrap() < html.find("1.4.3: Contrast").unwrap());
}

#[test]
fn render_with_invalid_query_uses_defaults() {
    let (_dir, config) = site();
    let html = commands::render(&config, &Wcag2Catalog::standard(), "v=9&a=upside-down").unwrap();
    assert!(html.contains("<option value=\"2\" selected>2</option>"));
    assert!(html.contains("<p>Rotating collections.</p>"));
}

#[test]
fn failing_command_reports_error_once() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("missing-root");
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_breaks"))
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .arg("scan")
        .arg("--root")
        .arg(&root)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let context = format!("scanning {}", root.display());
    assert_eq!(stderr.matches(context.as_str()).count(), 1, "{stderr}");
}
