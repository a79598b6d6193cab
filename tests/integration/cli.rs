use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;

use pagetools::test_utils::{Site, SiteBuilder};

fn site() -> Site {
    SiteBuilder::new()
        .unwrap()
        .page("index", "<main>{{ content | safe }}</main>")
        .page("blog/post", "Hello {{ user }}")
        .page("$nav", "nav")
        .page("404", "Missing")
        .partial("footer", "Footer")
        .build()
        .unwrap()
}

fn pagetools(site: &Site) -> Command {
    let config = site.write_config().unwrap();
    let mut cmd = Command::cargo_bin("pagetools").unwrap();
    cmd.current_dir(site.root()).env_remove("RUST_LOG").arg("--config").arg(config);
    cmd
}

#[test]
#[serial]
fn test_render_to_stdout_with_yaml_data() {
    let site = site();
    let data = site.root().join("data.yaml");
    std::fs::write(&data, "user: ada\n").unwrap();

    pagetools(&site)
        .args(["render", "blog/post", "--data"])
        .arg(&data)
        .assert()
        .success()
        .stdout("<main>Hello ada</main>");
}

#[test]
#[serial]
fn test_render_to_file() {
    let site = site();
    let data = site.root().join("data.json");
    std::fs::write(&data, r#"{"user": "grace"}"#).unwrap();
    let output = site.root().join("out.html");

    pagetools(&site)
        .args(["render", "blog/post", "--data"])
        .arg(&data)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout("");
    assert_eq!(std::fs::read_to_string(output).unwrap(), "<main>Hello grace</main>");
}

#[test]
#[serial]
fn test_render_fallback_reports_status() {
    let site = site();

    pagetools(&site)
        .args(["render", "nowhere"])
        .assert()
        .success()
        .stdout("<main>Missing</main>")
        .stderr(predicate::str::contains("404"));

    pagetools(&site)
        .args(["render", "nowhere", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fell back to an error page"));
}

#[test]
#[serial]
fn test_render_isolated_and_standalone() {
    let site = site();

    pagetools(&site).args(["render", "$nav", "--isolated"]).assert().success().stdout("nav");
    pagetools(&site)
        .args(["render", "footer", "--standalone"])
        .assert()
        .success()
        .stdout("Footer");
    pagetools(&site)
        .args(["render", "header", "--standalone"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("template not found"));
}

#[test]
#[serial]
fn test_not_found_suggests_names() {
    let site = site();

    pagetools(&site)
        .args(["render", "foter", "--standalone"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Did you mean: footer?"));
}

#[test]
#[serial]
fn test_hierarchy_marks_missing_layouts() {
    let site = site();

    pagetools(&site)
        .args(["hierarchy", "blog/post"])
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("index\n"))
        .stdout(predicate::str::contains("blog/index (missing)"))
        .stdout(predicate::str::contains("blog/post\n"));
}

#[test]
#[serial]
fn test_list_json() {
    let site = site();

    let output = pagetools(&site).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());
    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        listing,
        serde_json::json!({
            "pages": ["$nav", "404", "blog/post", "index"],
            "standalone": ["footer"],
        })
    );
}

#[test]
#[serial]
fn test_missing_config_fails() {
    let site = site();

    Command::cargo_bin("pagetools")
        .unwrap()
        .current_dir(site.root())
        .args(["--config", "absent.toml", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config"));
}
