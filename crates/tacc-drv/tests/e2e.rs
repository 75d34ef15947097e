//! End-to-end scenario tests against the built `tacc-drv` binary, replaying
//! the scenarios from the spec's "End-to-end scenarios" list that exercise
//! the CLI/fixture layer rather than calling `tacc_par::Parser` directly.

use std::fs;

use assert_cmd::Command;

fn fixture_root(name_and_source: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let parser_dir = dir.path().join("parser");
    fs::create_dir_all(&parser_dir).unwrap();
    for (name, source) in name_and_source {
        fs::write(parser_dir.join(format!("{name}.in")), source).unwrap();
    }
    dir
}

fn write_config(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let config_path = dir.path().join("tacc.toml");
    fs::write(
        &config_path,
        format!("root = \"{}\"\n", dir.path().display()),
    )
    .unwrap();
    config_path
}

#[test]
fn scenario_four_a_declaration_produces_the_expected_three_line_listing() {
    let dir = fixture_root(&[("decl", "{ int32 x; }")]);
    let config_path = write_config(&dir);

    Command::cargo_bin("tacc-drv")
        .unwrap()
        .args(["--target", "parser", "--config"])
        .arg(&config_path)
        .assert()
        .success();

    let result = fs::read_to_string(dir.path().join("parser/result/decl.result")).unwrap();
    assert!(result.contains("jmp"));
    assert!(result.contains("L1"));
    assert!(result.contains("alloc"));
    assert!(result.contains("exit"));
}

#[test]
fn scenario_five_if_else_converges_without_leftover_placeholders() {
    let source = "{ int32 id; if ( true ) { id = 1; } else { id = 2; } }";
    let dir = fixture_root(&[("if_else", source)]);
    let config_path = write_config(&dir);

    Command::cargo_bin("tacc-drv")
        .unwrap()
        .args(["--target", "parser", "--config"])
        .arg(&config_path)
        .assert()
        .success();

    let result = fs::read_to_string(dir.path().join("parser/result/if_else.result")).unwrap();
    assert!(result.contains("jnz"));
    assert!(!result.contains("xxx"));
    assert!(!result.contains("yyy"));
}

#[test]
fn scenario_six_break_inside_do_while_is_retargeted_past_the_loop() {
    let source = "{ do { break; } while ( true ); }";
    let dir = fixture_root(&[("do_break", source)]);
    let config_path = write_config(&dir);

    Command::cargo_bin("tacc-drv")
        .unwrap()
        .args(["--target", "parser", "--config"])
        .arg(&config_path)
        .assert()
        .success();

    let result = fs::read_to_string(dir.path().join("parser/result/do_break.result")).unwrap();
    assert!(!result.contains("nop"));
}

#[test]
fn silent_flag_suppresses_result_files_but_still_succeeds() {
    let dir = fixture_root(&[("empty", "{ }")]);
    let config_path = write_config(&dir);

    Command::cargo_bin("tacc-drv")
        .unwrap()
        .args(["--target", "parser", "--silent", "--config"])
        .arg(&config_path)
        .assert()
        .success();

    assert!(!dir.path().join("parser/result").exists());
}

#[test]
fn files_flag_restricts_to_the_named_fixture_stems() {
    let dir = fixture_root(&[("keep", "{ }"), ("skip", "{ }")]);
    let config_path = write_config(&dir);

    Command::cargo_bin("tacc-drv")
        .unwrap()
        .args(["--target", "parser", "--files", "keep", "--config"])
        .arg(&config_path)
        .assert()
        .success();

    assert!(dir.path().join("parser/result/keep.result").exists());
    assert!(!dir.path().join("parser/result/skip.result").exists());
}
