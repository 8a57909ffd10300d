#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Tests use unwrap for brevity"
)]

use std::io;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

/// Write `contents` to `name` inside a fresh temp dir.
fn write_temp(name: &str, contents: &[u8]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

fn run_to_string(
    command: fn(&str, &ScanOptions, &mut Vec<u8>) -> Result<(), CliError>,
    path: &std::path::Path,
    options: &ScanOptions,
) -> String {
    let mut out = Vec::new();
    command(path.to_str().unwrap(), options, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

// === Argument Parsing ===

#[test]
fn parses_path_and_defaults() {
    let (path, options) = ScanOptions::parse(&args(&["water.cpf"])).unwrap();
    assert_eq!(path, "water.cpf");
    assert_eq!(options, ScanOptions::default());
}

#[test]
fn parses_every_option() {
    let (path, options) = ScanOptions::parse(&args(&[
        "--format=LOG",
        "run.out",
        "--na=NA,n/a",
        "--time-limit=250",
        "--poll-interval=8",
    ]))
    .unwrap();
    assert_eq!(path, "run.out");
    assert_eq!(options.format, Some(SourceFormat::Log));
    assert_eq!(options.na, Some(NaValues::new(["NA", "n/a"])));
    assert_eq!(options.time_limit, Some(Duration::from_millis(250)));
    assert_eq!(options.poll_interval, Some(8));
}

#[test]
fn empty_na_list_disables_sentinels() {
    let (_, options) = ScanOptions::parse(&args(&["x", "--na="])).unwrap();
    assert_eq!(options.na, Some(NaValues::none()));
    assert!(!options.config().na.matches(b"-"));
}

#[test]
fn missing_path_is_usage_error() {
    let err = ScanOptions::parse(&args(&["--format=cpf"])).unwrap_err();
    assert!(err.is_usage());
    assert_eq!(err.to_string(), "missing file path");
}

#[test]
fn unknown_option_is_usage_error() {
    let err = ScanOptions::parse(&args(&["x", "--verbose"])).unwrap_err();
    assert!(err.is_usage());
    assert_eq!(err.to_string(), "unknown option '--verbose'");
}

#[test]
fn second_path_is_usage_error() {
    let err = ScanOptions::parse(&args(&["a.cpf", "b.cpf"])).unwrap_err();
    assert_eq!(err.to_string(), "unexpected argument 'b.cpf'");
}

#[test]
fn bad_format_is_reported() {
    let err = ScanOptions::parse(&args(&["x", "--format=csv"])).unwrap_err();
    assert!(matches!(err, CliError::UnknownFormat(_)));
    assert!(err.is_usage());
}

#[test]
fn bad_number_is_usage_error() {
    let err = ScanOptions::parse(&args(&["x", "--time-limit=soon"])).unwrap_err();
    assert_eq!(
        err.to_string(),
        "--time-limit expects a number, got 'soon'"
    );
}

// === Format Resolution ===

#[test]
fn forced_format_wins() {
    let options = ScanOptions {
        format: Some(SourceFormat::Log),
        ..ScanOptions::default()
    };
    assert_eq!(
        options.resolve_format(Path::new("a.cpf"), b"CPF Ver.4"),
        SourceFormat::Log
    );
}

#[test]
fn extension_beats_content() {
    let options = ScanOptions::default();
    assert_eq!(
        options.resolve_format(Path::new("a.log"), b"CPF Ver.4"),
        SourceFormat::Log
    );
}

#[test]
fn content_decides_without_extension() {
    let options = ScanOptions::default();
    assert_eq!(
        options.resolve_format(Path::new("a.out"), b"CPF Ver.4"),
        SourceFormat::Cpf
    );
    assert_eq!(
        options.resolve_format(Path::new("a.out"), b" ---\n Title\n"),
        SourceFormat::Log
    );
}

#[test]
fn poll_interval_reaches_config() {
    let options = ScanOptions {
        poll_interval: Some(0),
        ..ScanOptions::default()
    };
    assert_eq!(options.config().interrupt_interval, 1);
}

// === Deadline ===

#[test]
fn deadline_without_limit_never_fires() {
    let mut deadline = Deadline::new(None);
    assert_eq!(deadline.check(), Ok(()));
}

#[test]
fn spent_deadline_fires() {
    let mut deadline = Deadline::new(Some(Duration::ZERO));
    assert_eq!(deadline.check(), Err(Interrupted));
}

#[test]
fn generous_deadline_does_not_fire() {
    let mut deadline = Deadline::new(Some(Duration::from_secs(3600)));
    assert_eq!(deadline.check(), Ok(()));
}

// === Reading ===

#[test]
fn missing_file_message() {
    let err = read_file("definitely/not/here.cpf").unwrap_err();
    assert_eq!(err.to_string(), "cannot find file 'definitely/not/here.cpf'");
    assert!(matches!(
        err,
        CliError::Read { ref source, .. } if source.kind() == io::ErrorKind::NotFound
    ));
}

// === Commands ===

#[test]
fn fields_of_log_file() {
    let (_dir, path) = write_temp("run.log", b"Title\n==#Section\nbody line\n-\n");
    let output = run_to_string(fields_file, &path, &ScanOptions::default());
    assert_eq!(
        output,
        "row\tcol\ttext\n\
         0\t0\tTitle\n\
         0\t1\t\n\
         1\t0\tSection\n\
         1\t1\tbody line\\n-\n"
    );
}

#[test]
fn fields_marks_na() {
    let (_dir, path) = write_temp("tiny.cpf", b"CPF\n    0    0\n-\n");
    let output = run_to_string(fields_file, &path, &ScanOptions::default());
    let basis = output.lines().find(|l| l.starts_with("0\t8\t")).unwrap();
    assert_eq!(basis, "0\t8\tNA");
}

#[test]
fn lex_lists_tokens_through_eof() {
    let (_dir, path) = write_temp("tiny.cpf", b"CPF\n");
    let output = run_to_string(lex_file, &path, &ScanOptions::default());
    let lines: Vec<_> = output.lines().collect();
    assert_eq!(lines[0], format!("Tokens for '{}' (cpf):", path.display()));
    assert_eq!(lines[1], "  Field 0..3 @ 0:0");
    assert_eq!(lines[2], "  Empty 4..4 @ 0:1");
    assert_eq!(lines[3], "  Eof 4..4 @ 0:2");
    assert_eq!(lines.len(), 4);
}

#[test]
fn lex_sniffs_unknown_extension() {
    let (_dir, path) = write_temp("run.out", b" ----\n Title\n");
    let output = run_to_string(lex_file, &path, &ScanOptions::default());
    assert!(output.starts_with(&format!("Tokens for '{}' (log):", path.display())));
}

#[test]
fn spent_time_limit_interrupts() {
    let (_dir, path) = write_temp("tiny.cpf", b"CPF\n    0    0\n");
    let options = ScanOptions {
        time_limit: Some(Duration::ZERO),
        ..ScanOptions::default()
    };
    let mut out = Vec::new();
    let err = lex_file(path.to_str().unwrap(), &options, &mut out).unwrap_err();
    assert!(matches!(err, CliError::Interrupted { .. }));
    assert!(err.to_string().contains("time limit exceeded"));
}

#[test]
fn unreadable_path_fails_before_output() {
    let mut out = Vec::new();
    let err = fields_file("no/such/file.log", &ScanOptions::default(), &mut out).unwrap_err();
    assert!(matches!(err, CliError::Read { .. }));
    assert!(out.is_empty());
}
