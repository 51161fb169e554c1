use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cargo_bin() -> Command { Command::cargo_bin("tape-bf").unwrap() }

fn program_file(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}

#[test]
fn test_hello_world() {
    let tf = program_file(
        "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.",
    );
    cargo_bin()
        .arg(tf.path())
        .assert()
        .success()
        .stdout("Hello World!\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_output_is_raw_bytes_without_trailing_newline() {
    // 200 is not ASCII; it must come out as the single byte 0xC8.
    let tf = program_file(&format!("{}.", "+".repeat(200)));
    cargo_bin()
        .arg(tf.path())
        .assert()
        .success()
        .stdout(predicate::eq(&[200u8][..]));
}

#[test]
fn test_cell_wraps_after_256_increments() {
    let tf = program_file(&format!("{}.", "+".repeat(256)));
    cargo_bin()
        .arg(tf.path())
        .assert()
        .success()
        .stdout(predicate::eq(&[0u8][..]));
}

#[test]
fn test_empty_program_exits_clean_and_quiet() {
    let tf = program_file("");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_comments_and_newlines_are_ignored() {
    let tf = program_file("print A:\n+++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++\n.\n");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .success()
        .stdout("A");
}

#[test]
fn test_nested_loop_skipped_on_zero_cell() {
    let tf = program_file("[.[.[.]].]+++.");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .success()
        .stdout(predicate::eq(&[3u8][..]));
}
