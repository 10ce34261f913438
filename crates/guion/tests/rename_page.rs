//! End-to-end run of the page rename flow through the public API.
//!
//! The scenario and page fixture are both loaded from YAML, the way the CLI
//! consumes them: log in to the admin UI, create a page, rename it, and
//! verify the rename took everywhere it is displayed.

use guion::{
    PageFixture, RunState, RunnerConfig, Scenario, ScenarioError, ScenarioRunner, ScriptedDriver,
};

const RENAME_PAGE_SCENARIO: &str = r##"
version: "1.0"
name: rename_page
title: "Rename Page"
description: "Shows how a new page can be renamed."
expected_assertions: 6
steps:
  - type: move_pointer
    target:
      x: 600.0
      y: 400.0
  - type: type_text
    selector: "#usernameField"
    text: "admin"
    animated: true
  - type: type_text
    selector: "#passwordField"
    text: "admin"
    animated: true
  - type: move_pointer
    target:
      selector: "#loginButton"
  - type: click
    selector: "#loginButton"
  - type: wait_until_hidden
    selector: "#dialogBox"
    asserts:
      - type: text_equals
        selector: "#errorText"
        expected: ""
      - type: visible
        selector: "#pages"
  - type: move_pointer
    target:
      selector: "#add_page"
  - type: click
    selector: "#add_page"
  - type: wait
    ms: 40
  - type: assert
    predicate:
      type: visible
      selector: "#previewTabs li:nth-child(2)"
  - type: move_pointer
    target:
      selector: "#previewTabs li:nth-child(2)"
  - type: click
    selector: "#previewTabs li:nth-child(2)"
  - type: type_text
    selector: ".newName_"
    text: "renamed-page"
    animated: true
    clear_first: true
  - type: click
    selector: "#renameFormSubmit"
  - type: move_pointer
    target:
      selector: "#previews"
  - type: assert
    predicate:
      type: text_contains
      selector: "#pages"
      substring: "renamed-page"
  - type: assert
    predicate:
      type: text_contains
      selector: "#previews"
      substring: "renamed-page"
  - type: assert
    predicate:
      type: hidden
      selector: "#dialogBox"
"##;

const ADMIN_PAGE_FIXTURE: &str = r##"
elements:
  "#usernameField": {}
  "#passwordField": {}
  "#loginButton": { text: "Login" }
  "#dialogBox": {}
  "#errorText": {}
  "#pages": { visible: false }
  "#add_page": { text: "+", visible: false }
  "#previews": { visible: false }
on_click:
  "#loginButton":
    - hide: ["#dialogBox"]
      show: ["#pages", "#add_page"]
      delay_ms: 20
  "#add_page":
    - show: ["#previewTabs li:nth-child(2)", "#previews"]
      set_text:
        "#pages": "page-tree: untitled"
        "#previews": "untitled"
      delay_ms: 15
  "#previewTabs li:nth-child(2)":
    - show: [".newName_", "#renameFormSubmit"]
  "#renameFormSubmit":
    - set_text:
        "#pages": "page-tree: renamed-page"
        "#previews": "renamed-page"
"##;

fn rename_page_driver() -> ScriptedDriver {
    let fixture = PageFixture::from_yaml(ADMIN_PAGE_FIXTURE).expect("fixture should parse");
    ScriptedDriver::from_fixture(fixture)
}

fn fast_config() -> RunnerConfig {
    RunnerConfig::new()
        .with_base_url("http://localhost:8082/structr/")
        .with_checkpoint_timeout(1_000)
        .with_poll_interval(5)
}

#[tokio::test]
async fn rename_page_flow_passes_end_to_end() {
    let scenario = Scenario::from_yaml(RENAME_PAGE_SCENARIO).expect("scenario should parse");
    assert_eq!(scenario.expected_assertions, 6);

    let mut runner = ScenarioRunner::new(rename_page_driver(), fast_config());
    let report = runner.run(&scenario).await.expect("run should not error");

    assert_eq!(report.state, RunState::Completed);
    assert!(report.success());
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.summary.evaluated, 6);
    assert_eq!(report.summary.passed, 6);
    assert_eq!(report.summary.failed, 0);
    assert!(report.steps.iter().all(|s| s.error.is_none()));

    let driver = runner.into_driver();
    assert_eq!(
        driver.actions(),
        [
            "goto:http://localhost:8082/structr/",
            "move:600,400",
            "type:#usernameField:admin",
            "type:#passwordField:admin",
            "move:#loginButton",
            "click:#loginButton",
            "move:#add_page",
            "click:#add_page",
            "move:#previewTabs li:nth-child(2)",
            "click:#previewTabs li:nth-child(2)",
            "type:.newName_:renamed-page",
            "click:#renameFormSubmit",
            "move:#previews",
        ]
    );
}

#[cfg(feature = "media")]
#[tokio::test]
async fn rename_page_flow_records_gif_artifact() {
    use guion::{GifConfig, GifSink};

    let dir = tempfile::tempdir().unwrap();
    let scenario = Scenario::from_yaml(RENAME_PAGE_SCENARIO).expect("scenario should parse");

    let sink = GifSink::new(dir.path(), GifConfig::new(64, 48).with_fps(20));
    let mut runner =
        ScenarioRunner::new(rename_page_driver(), fast_config()).with_recorder(Box::new(sink));
    let report = runner.run(&scenario).await.expect("run should not error");

    assert!(report.success());
    let artifact = report.artifact.expect("recording should produce a GIF");
    assert!(artifact.ends_with("rename_page.gif"));
    let bytes = std::fs::read(&artifact).unwrap();
    assert_eq!(&bytes[..6], b"GIF89a");

    // Title and description land in the annotations sidecar.
    let sidecar = dir.path().join("rename_page.annotations.json");
    let json: serde_json::Value =
        serde_json::from_slice(&std::fs::read(sidecar).unwrap()).unwrap();
    assert_eq!(json[0]["title"], "Rename Page");
}

#[tokio::test]
async fn stale_assertion_count_is_rejected_before_execution() {
    let yaml = RENAME_PAGE_SCENARIO.replace("expected_assertions: 6", "expected_assertions: 3");
    let result = Scenario::from_yaml(&yaml);
    assert!(matches!(
        result,
        Err(ScenarioError::AssertionCountMismatch {
            declared: 3,
            actual: 6
        })
    ));
}

#[tokio::test]
async fn run_fails_when_rename_never_propagates() {
    // Same page, but submitting the rename form has no effect.
    let broken = ADMIN_PAGE_FIXTURE.replace("renamed-page", "untitled");
    let fixture = PageFixture::from_yaml(&broken).expect("fixture should parse");
    let scenario = Scenario::from_yaml(RENAME_PAGE_SCENARIO).expect("scenario should parse");

    let mut runner = ScenarioRunner::new(ScriptedDriver::from_fixture(fixture), fast_config());
    let report = runner.run(&scenario).await.expect("run should not error");

    assert_eq!(report.state, RunState::Failed);
    assert_eq!(report.exit_code(), 1);
    assert_eq!(report.summary.evaluated, 6);
    assert_eq!(report.summary.failed, 2);
    assert!(report
        .summary
        .failures()
        .iter()
        .all(|f| f.description.contains("renamed-page")));
}
