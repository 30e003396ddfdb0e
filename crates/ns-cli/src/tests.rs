use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use super::cli_args::Cli;
use super::*;

fn temp_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ns-cli-{}-{}", label, std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir should be created");
    dir
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent dir should be created");
    }
    fs::write(path, content).expect("file should be written");
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).expect("args should parse")
}

#[test]
fn run_subcommand_prints_the_transcript() {
    let dir = temp_dir("run");
    let script = dir.join("hello.nyan");
    write_file(&script, "console.outputx(\"hi\")");

    let report = run(parse(&["nyan", "run", "--script", &script.to_string_lossy()]))
        .expect("run should pass");
    assert_eq!(report, "hi\n");
}

#[test]
fn run_subcommand_reports_missing_script() {
    let error = run(parse(&["nyan", "run", "--script", "/definitely/missing.nyan"]))
        .expect_err("missing script should fail");
    assert_eq!(error.code, "CLI_SOURCE_NOT_FOUND");
}

#[test]
fn doc_subcommand_renders_each_tag_outcome() {
    let dir = temp_dir("doc");
    write_file(&dir.join("lib.nyan"), "console.outputx(\"from lib\")");
    let document = dir.join("page.xml");
    write_file(
        &document,
        concat!(
            "<body>",
            "<nyscript>console.outputx(\"inline\")</nyscript>",
            "<nyscript src=\"lib.nyan\"></nyscript>",
            "<nyscript src=\"gone.nyan\"></nyscript>",
            "</body>"
        ),
    );

    let report = run(parse(&["nyan", "doc", "--document", &document.to_string_lossy()]))
        .expect("doc should pass");
    assert_eq!(
        report,
        "inline\nfrom lib\nERROR loading gone.nyan: Script source does not exist: "
            .to_string()
            + &dir.join("gone.nyan").display().to_string()
            + "\n"
    );
}

#[test]
fn doc_subcommand_emits_json_report() {
    let dir = temp_dir("doc-json");
    let document = dir.join("page.xml");
    write_file(
        &document,
        "<body><nyscript>console.outputx(\"j\")</nyscript></body>",
    );

    let report = run(parse(&[
        "nyan",
        "doc",
        "--document",
        &document.to_string_lossy(),
        "--json",
    ]))
    .expect("doc --json should pass");
    assert!(report.contains("\"kind\": \"transcript\""));
    assert!(report.contains("\"text\": \"j\""));
}

#[test]
fn batch_subcommand_runs_files_in_sorted_order() {
    let dir = temp_dir("batch");
    write_file(&dir.join("b.nyan"), "console.outputx(\"second\")");
    write_file(&dir.join("a.nyan"), "console.outputx(\"first\")");
    write_file(&dir.join("notes.txt"), "ignored");

    let report = run(parse(&["nyan", "batch", "--dir", &dir.to_string_lossy()]))
        .expect("batch should pass");
    let first = report.find("first").expect("first transcript present");
    let second = report.find("second").expect("second transcript present");
    assert!(first < second);
    assert!(!report.contains("ignored"));
}

#[test]
fn batch_subcommand_validates_the_directory() {
    let error = run(parse(&["nyan", "batch", "--dir", "/definitely/missing-dir"]))
        .expect_err("missing dir should fail");
    assert_eq!(error.code, "CLI_SOURCE_NOT_DIR");

    let empty = temp_dir("batch-empty");
    let error = run(parse(&["nyan", "batch", "--dir", &empty.to_string_lossy()]))
        .expect_err("empty dir should fail");
    assert_eq!(error.code, "CLI_SOURCE_EMPTY");
}

#[test]
fn unknown_arguments_exit_with_clap_code() {
    assert_eq!(run_cli_from_args(["nyan", "bogus"]), 2);
}
