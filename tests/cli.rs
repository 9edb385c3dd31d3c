use assert_cmd::Command;
use image::Rgb;
use predicates::str::contains;
use slidebox::ir::{GridLayout, PlaceholderKind, ShapeKind};
use std::path::Path;

mod common;

use common::{blank_slide, fill, shape_px, write_deck, write_slide};

fn slidebox() -> Command {
    let mut cmd = Command::cargo_bin("slidebox").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("SLIDEBOX_SOFFICE")
        .env_remove("SLIDEBOX_PDFTOPPM")
        .env_remove("SLIDEBOX_DPI");
    cmd
}

/// One slide with a section banner and a single content block, pre-rendered
/// into `<root>/slides`.
fn single_block_deck(root: &Path, layout: Option<GridLayout>) {
    let mut img = blank_slide();
    fill(&mut img, 100, 200, 600, 400);
    write_slide(&root.join("slides"), 1, &img);

    let shapes = vec![
        shape_px(1, ShapeKind::TextBox, 50, 40, 400, 50).with_text("1. 질병"),
        shape_px(2, ShapeKind::TextBox, 100, 200, 500, 200).with_text("Revenue by region"),
        shape_px(
            3,
            ShapeKind::Placeholder(PlaceholderKind::PageNumber),
            1400,
            1080,
            50,
            30,
        ),
    ];
    write_deck(&root.join("deck.json"), vec![(layout, shapes)]);
}

#[test]
fn runs() {
    slidebox().assert().success().stdout(contains("slidebox"));
}

#[test]
fn outputs_tool_name() {
    slidebox()
        .arg("-V")
        .assert()
        .success()
        .stdout("slidebox 0.1.0\n");
}

// Visualize subcommand tests

#[test]
fn visualize_writes_annotated_image() {
    let temp = tempfile::tempdir().unwrap();
    single_block_deck(temp.path(), Some(GridLayout::ONE_BY_ONE));
    let output = temp.path().join("out.png");

    slidebox()
        .arg("visualize")
        .arg(temp.path().join("deck.json"))
        .args(["--page", "1", "--no-show", "--images"])
        .arg(temp.path().join("slides"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Layout 1x1: 1 box(es), 0 empty cell(s)"))
        .stdout(contains("cell 0: (85, 185, 615, 415)"))
        .stdout(contains("[EXCLUDED]"));

    let annotated = image::open(&output).unwrap().to_rgb8();
    assert_eq!(annotated.dimensions(), (1500, 1125));
    // The top border is centred on y = 185.
    assert_eq!(*annotated.get_pixel(350, 184), Rgb([255, 0, 0]));
    // Content is untouched.
    assert_eq!(*annotated.get_pixel(350, 300), common::INK);
}

#[test]
fn visualize_defaults_output_name() {
    let temp = tempfile::tempdir().unwrap();
    single_block_deck(temp.path(), None);

    slidebox()
        .current_dir(temp.path())
        .args(["visualize", "deck.json", "--images", "slides", "--no-show"])
        .assert()
        .success()
        .stdout(contains("page_01_layout.png"));

    assert!(temp.path().join("page_01_layout.png").is_file());
}

#[test]
fn visualize_json_report() {
    let temp = tempfile::tempdir().unwrap();
    single_block_deck(temp.path(), Some(GridLayout::ONE_BY_ONE));

    let assert = slidebox()
        .current_dir(temp.path())
        .args([
            "visualize",
            "deck.json",
            "--images",
            "slides",
            "--no-show",
            "--output",
            "out.png",
            "--report",
            "json",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(report["page"], 1);
    assert_eq!(report["layout"], "1x1");
    assert_eq!(report["boxes"][0]["rect"]["x1"], 85);
    assert_eq!(report["boxes"][0]["detected"]["y2"], 400);
    assert_eq!(report["boxes"][0]["color"], "red");
    assert_eq!(report["exclusions"]["excluded"][0]["category"], "section_banner");
}

#[test]
fn visualize_layout_and_color_overrides() {
    let temp = tempfile::tempdir().unwrap();
    single_block_deck(temp.path(), Some(GridLayout::ONE_BY_ONE));
    let output = temp.path().join("out.png");

    slidebox()
        .arg("visualize")
        .arg(temp.path().join("deck.json"))
        .args(["--layout", "1x2", "--color", "#0000ff", "--no-show", "--images"])
        .arg(temp.path().join("slides"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Layout 1x2: 1 box(es), 1 empty cell(s)"))
        .stdout(contains("cell 1: no content"));

    let annotated = image::open(&output).unwrap().to_rgb8();
    assert_eq!(*annotated.get_pixel(350, 184), Rgb([0, 0, 255]));
}

#[test]
fn visualize_single_box() {
    let temp = tempfile::tempdir().unwrap();
    single_block_deck(temp.path(), Some(GridLayout::ONE_BY_TWO));
    let output = temp.path().join("out.png");

    slidebox()
        .arg("visualize")
        .arg(temp.path().join("deck.json"))
        .args(["--single-box", "--no-show", "--images"])
        .arg(temp.path().join("slides"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Single box: 1 box(es), 0 empty cell(s)"))
        .stdout(contains("cell 0: (90, 190, 610, 410) (detected (100, 200, 600, 400))"));

    let annotated = image::open(&output).unwrap().to_rgb8();
    assert_eq!(*annotated.get_pixel(350, 189), Rgb([255, 0, 0]));
    assert_eq!(*annotated.get_pixel(350, 184), Rgb([255, 255, 255]));
}

#[test]
fn visualize_edge_detection() {
    let temp = tempfile::tempdir().unwrap();
    single_block_deck(temp.path(), Some(GridLayout::ONE_BY_ONE));

    slidebox()
        .current_dir(temp.path())
        .args([
            "visualize", "deck.json", "--edges", "--images", "slides", "--no-show", "-o",
            "out.png",
        ])
        .assert()
        .success()
        .stdout(contains("cell 0: (84, 184, 616, 416) (detected (99, 199, 601, 401))"));
}

#[test]
fn visualize_infers_two_columns() {
    let temp = tempfile::tempdir().unwrap();
    let mut img = blank_slide();
    fill(&mut img, 100, 200, 600, 400);
    fill(&mut img, 900, 250, 1300, 800);
    write_slide(&temp.path().join("slides"), 1, &img);
    write_deck(
        &temp.path().join("deck.json"),
        vec![(
            None,
            vec![
                shape_px(1, ShapeKind::TextBox, 100, 200, 500, 200).with_text("Revenue"),
                shape_px(2, ShapeKind::Picture, 900, 250, 400, 550),
            ],
        )],
    );

    slidebox()
        .current_dir(temp.path())
        .args(["visualize", "deck.json", "--images", "slides", "--no-show", "-o", "out.png"])
        .assert()
        .success()
        .stdout(contains("Layout 1x2 (inferred): 2 box(es)"));
}

#[test]
fn visualize_rule_and_empty_frame_do_not_split_columns() {
    let temp = tempfile::tempdir().unwrap();
    let mut img = blank_slide();
    fill(&mut img, 100, 200, 600, 400);
    fill(&mut img, 1000, 200, 1002, 800);
    write_slide(&temp.path().join("slides"), 1, &img);
    write_deck(
        &temp.path().join("deck.json"),
        vec![(
            None,
            vec![
                shape_px(1, ShapeKind::TextBox, 100, 200, 500, 200).with_text("Revenue"),
                shape_px(2, ShapeKind::Line, 1000, 200, 2, 600),
                shape_px(3, ShapeKind::TextBox, 900, 500, 400, 200),
            ],
        )],
    );

    slidebox()
        .current_dir(temp.path())
        .args(["visualize", "deck.json", "--images", "slides", "--no-show", "-o", "out.png"])
        .assert()
        .success()
        .stdout(contains("Layout 1x1 (inferred): 1 box(es)"));
}

#[test]
fn visualize_page_out_of_range_fails() {
    let temp = tempfile::tempdir().unwrap();
    single_block_deck(temp.path(), None);

    // No image source is given: the page check must come first.
    slidebox()
        .arg("visualize")
        .arg(temp.path().join("deck.json"))
        .args(["--page", "3", "--no-show"])
        .assert()
        .failure()
        .stderr(contains("Page 3 is out of range (deck has 1 slide(s))"));
}

#[test]
fn visualize_rejects_bad_color() {
    let temp = tempfile::tempdir().unwrap();
    single_block_deck(temp.path(), None);

    slidebox()
        .arg("visualize")
        .arg(temp.path().join("deck.json"))
        .args(["--color", "reddish", "--no-show"])
        .assert()
        .failure()
        .stderr(contains("expected a color name or #rrggbb"));
}

#[test]
fn visualize_reports_missing_renderer() {
    let temp = tempfile::tempdir().unwrap();
    let manifest = temp.path().join("deck.json");
    std::fs::write(
        &manifest,
        r#"{"slide_width": 9144000, "slide_height": 6858000, "source": "deck.pptx", "slides": [{}]}"#,
    )
    .unwrap();

    slidebox()
        .arg("visualize")
        .arg(&manifest)
        .args(["--no-show", "--output"])
        .arg(temp.path().join("out.png"))
        .env("SLIDEBOX_SOFFICE", temp.path().join("no-such-soffice"))
        .assert()
        .failure()
        .stderr(contains("Failed to render slide 1"))
        .stderr(contains("not found"));
}

#[test]
fn visualize_missing_manifest_fails() {
    slidebox()
        .args(["visualize", "does/not/exist.json", "--no-show"])
        .assert()
        .failure()
        .stderr(contains("Error:"));
}

// Batch subcommand tests

#[test]
fn batch_continues_past_failed_slides() {
    let temp = tempfile::tempdir().unwrap();
    single_block_deck(temp.path(), None);
    // Add a second slide to the manifest with no rendered image.
    write_deck(
        &temp.path().join("deck.json"),
        vec![(None, Vec::new()), (None, Vec::new())],
    );
    let out_dir = temp.path().join("out");

    slidebox()
        .arg("batch")
        .arg(temp.path().join("deck.json"))
        .arg("--images")
        .arg(temp.path().join("slides"))
        .arg("--output-dir")
        .arg(&out_dir)
        .assert()
        .failure()
        .stdout(contains("Processed 2 slide(s): 1 succeeded, 1 failed"))
        .stderr(contains("1 of 2 slide(s) failed"));

    assert!(out_dir.join("page_01_layout.png").is_file());
    assert!(!out_dir.join("page_02_layout.png").exists());
}

#[test]
fn batch_selected_pages() {
    let temp = tempfile::tempdir().unwrap();
    single_block_deck(temp.path(), None);
    let out_dir = temp.path().join("out");

    slidebox()
        .arg("batch")
        .arg(temp.path().join("deck.json"))
        .args(["--pages", "1", "--images"])
        .arg(temp.path().join("slides"))
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(contains("Slide 1: 1 box(es)"));

    assert!(out_dir.join("page_01_layout.png").is_file());
}

#[test]
fn batch_rejects_out_of_range_pages() {
    let temp = tempfile::tempdir().unwrap();
    single_block_deck(temp.path(), None);

    slidebox()
        .arg("batch")
        .arg(temp.path().join("deck.json"))
        .args(["--pages", "1,4", "-o"])
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(contains("Page 4 is out of range"));
}

// Classify subcommand tests

#[test]
fn classify_lists_template_elements() {
    let temp = tempfile::tempdir().unwrap();
    single_block_deck(temp.path(), None);

    slidebox()
        .arg("classify")
        .arg(temp.path().join("deck.json"))
        .assert()
        .success()
        .stdout(contains("1 content shape(s), 2 template element(s) excluded"))
        .stdout(contains("section banner"));
}

#[test]
fn classify_json_output() {
    let temp = tempfile::tempdir().unwrap();
    single_block_deck(temp.path(), None);

    let assert = slidebox()
        .arg("classify")
        .arg(temp.path().join("deck.json"))
        .args(["--report", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(report["page"], 1);
    assert_eq!(report["content"], serde_json::json!([2]));
    assert_eq!(report["excluded"][0]["category"], "section_banner");
    assert_eq!(report["excluded"][0]["shape_id"], 1);
}
