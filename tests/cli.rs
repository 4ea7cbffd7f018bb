use assert_cmd::Command;
use predicates::prelude::*;

use common::{write_cvat_scene, write_tagged_scene, Person};

mod common;

#[test]
fn runs() {
    let mut cmd = Command::cargo_bin("scenewalk").unwrap();
    cmd.assert().success();
}

#[test]
fn outputs_tool_name() {
    let mut cmd = Command::cargo_bin("scenewalk").unwrap();
    cmd.arg("-V");
    cmd.assert().success().stdout("scenewalk 0.1.0\n");
}

// Dataset traversal subcommands

#[test]
fn persons_lists_matching_frames() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_cvat_scene(
        temp.path(),
        "scene1",
        &[
            ("two.png", &[Person::Plain, Person::Plain, Person::Ignore("true")]),
            ("one.png", &[Person::Plain]),
        ],
    );

    let mut cmd = Command::cargo_bin("scenewalk").unwrap();
    cmd.arg("persons").arg(temp.path()).arg("2");
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("000000\t"))
        .stdout(predicates::str::contains("two.png\t2x2"))
        .stdout(predicates::str::contains("one.png").not());
}

#[test]
fn persons_limit_stops_early() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_cvat_scene(
        temp.path(),
        "scene1",
        &[("a.png", &[]), ("b.png", &[]), ("c.png", &[])],
    );

    let mut cmd = Command::cargo_bin("scenewalk").unwrap();
    cmd.arg("persons")
        .arg(temp.path())
        .arg("0")
        .args(["--limit", "2"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("a.png"))
        .stdout(predicates::str::contains("b.png"))
        .stdout(predicates::str::contains("c.png").not());
}

#[test]
fn persons_rejects_negative_count() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut cmd = Command::cargo_bin("scenewalk").unwrap();
    cmd.arg("persons").arg(temp.path()).arg("-1");
    cmd.assert().failure();
}

#[test]
fn persons_reports_missing_structure() {
    let temp = tempfile::tempdir().expect("tempdir");
    let scene = write_cvat_scene(temp.path(), "scene1", &[("a.png", &[])]);
    std::fs::remove_dir_all(scene.join("images")).expect("remove images");

    let mut cmd = Command::cargo_bin("scenewalk").unwrap();
    cmd.arg("persons").arg(temp.path()).arg("0");
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Invalid scene structure"));
}

#[test]
fn night_saves_frames_to_out_dir() {
    let temp = tempfile::tempdir().expect("tempdir");
    let dataset = temp.path().join("dataset");
    write_tagged_scene(
        &dataset,
        "scene1",
        &[("a.png", Some("night")), ("b.png", Some("day"))],
    );
    let out_dir = temp.path().join("out");

    let mut cmd = Command::cargo_bin("scenewalk").unwrap();
    cmd.arg("night").arg(&dataset).arg("--out-dir").arg(&out_dir);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("a.png\t3x1"))
        .stdout(predicates::str::contains("b.png").not());

    assert!(out_dir.join("000000.png").is_file());
    assert!(!out_dir.join("000001.png").exists());
}

#[test]
fn night_rejects_missing_dataset() {
    let mut cmd = Command::cargo_bin("scenewalk").unwrap();
    cmd.args(["night", "nonexistent_dataset_dir"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("not a directory"));
}

// Generator subcommands

#[test]
fn fibonacci_prints_requested_terms() {
    let mut cmd = Command::cargo_bin("scenewalk").unwrap();
    cmd.args(["fibonacci", "--count", "7"]);
    cmd.assert().success().stdout("0\n1\n1\n2\n3\n5\n8\n");
}

#[test]
fn noise_writes_frames_of_requested_size() {
    let temp = tempfile::tempdir().expect("tempdir");

    let mut cmd = Command::cargo_bin("scenewalk").unwrap();
    cmd.args(["noise", "--picture-size", "5x4", "--frames", "2", "--seed", "1"])
        .arg("--out-dir")
        .arg(temp.path());
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("000001\twhite-noise\t5x4"));

    let frame = image::open(temp.path().join("000001.png")).expect("decode noise frame");
    assert_eq!((frame.width(), frame.height()), (5, 4));
}

#[test]
fn noise_rejects_bad_picture_size() {
    let mut cmd = Command::cargo_bin("scenewalk").unwrap();
    cmd.args(["noise", "--picture-size", "100"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("WIDTHxHEIGHT"));
}
