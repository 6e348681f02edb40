use std::fs;
use std::process::{Command, Output};

fn demo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_clasp-demo"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("CLASP_DEMO_SETTINGS")
        .output()
        .expect("failed to run clasp-demo")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

#[test]
fn test_speak_repeats_words() {
    let output = demo(&["speak", "--loud", "-n", "2", "hello", "world"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "HELLO WORLD\nHELLO WORLD\n");
}

#[test]
fn test_speak_alias_and_parent_flag() {
    let output = demo(&["-v", "say", "hi"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "(saying it 1 times)\nhi\n");
}

#[test]
fn test_flip_and_flop() {
    assert_eq!(stdout(&demo(&["flip"])), "FLIPPED\n");
    assert_eq!(stdout(&demo(&["flop"])), "FLOPPED\n");
}

#[test]
fn test_version_reads_context() {
    let output = demo(&["version"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        format!("clasp-demo {}\n", env!("CARGO_PKG_VERSION"))
    );
}

// ---------------------------------------------------------------------------
// Help
// ---------------------------------------------------------------------------

#[test]
fn test_root_help() {
    let output = demo(&["--help"]);
    assert!(output.status.success());
    let help = stdout(&output);
    assert!(help.starts_with("Usage: clasp-demo [OPTIONS] SUBCOMMAND [ARGS] ...\n"));
    assert!(help.contains("\nSubcommands:\n"));
    assert!(help.contains("  speak, say"));
    assert!(help.contains("  -v, --verbose"));
}

#[test]
fn test_subcommand_help() {
    let output = demo(&["speak", "-h"]);
    assert!(output.status.success());
    let help = stdout(&output);
    assert!(help.starts_with("Usage: clasp-demo speak [OPTIONS] WORDS ...\n"));
    assert!(help.contains("say it N times (default: 1)"));
}

// ---------------------------------------------------------------------------
// Usage errors
// ---------------------------------------------------------------------------

#[test]
fn test_missing_subcommand() {
    let output = demo(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        "ERROR: no subcommand specified\nSee: 'clasp-demo --help'\n"
    );
}

#[test]
fn test_unknown_subcommand() {
    let output = demo(&["frob"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ERROR: No such sub-command 'frob'"));
}

#[test]
fn test_bad_iterations_names_option() {
    let output = demo(&["speak", "-n", "lots", "hi"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        "ERROR: option '--iterations': invalid value for Integer: \"lots\"\nSee: 'clasp-demo speak --help'\n"
    );
}

#[test]
fn test_negative_iterations_rejected_by_writer() {
    let output = demo(&["speak", "--iterations=-1", "hi"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ERROR: option '--iterations': must not be negative"));
}

#[test]
fn test_speak_without_words() {
    let output = demo(&["speak"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ERROR: parameter 'WORDS ...': no value provided"));
}

#[cfg(unix)]
#[test]
fn test_non_utf8_argument_is_a_usage_error() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let output = Command::new(env!("CARGO_BIN_EXE_clasp-demo"))
        .arg("speak")
        .arg(OsStr::from_bytes(b"\xff"))
        .env_remove("RUST_LOG")
        .env_remove("CLASP_DEMO_SETTINGS")
        .output()
        .expect("failed to run clasp-demo");
    assert_eq!(output.status.code(), Some(1));
    let message = stderr(&output);
    assert!(message.starts_with("ERROR: invalid UTF-8 in argument"), "stderr: {message}");
    assert!(message.ends_with("See: 'clasp-demo --help'\n"));
    assert!(!message.contains("panicked"));
}

// ---------------------------------------------------------------------------
// Schema and settings
// ---------------------------------------------------------------------------

#[test]
fn test_schema_lists_subcommands() {
    let output = demo(&["schema"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = json["subcommands"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["name"].as_str())
        .collect();
    assert_eq!(names, vec!["speak", "flip", "flop", "version", "schema"]);
}

#[test]
fn test_schema_for_one_subcommand() {
    let output = demo(&["schema", "say"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["parameters"][0]["attribute_name"], "words_list");
    assert_eq!(json["options"][1]["default"], 1);
}

#[test]
fn test_settings_file_changes_exit_code_and_help_switch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.yaml");
    fs::write(
        &path,
        "usage_error_exit_code: 64\nhelp_switches: [\"--usage\"]\n",
    )
    .unwrap();

    let run = |args: &[&str]| {
        Command::new(env!("CARGO_BIN_EXE_clasp-demo"))
            .args(args)
            .env_remove("RUST_LOG")
            .env("CLASP_DEMO_SETTINGS", &path)
            .output()
            .expect("failed to run clasp-demo")
    };

    let output = run(&["frob"]);
    assert_eq!(output.status.code(), Some(64));

    let output = run(&["--usage"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Usage:"));

    let output = run(&["--help"]);
    assert_eq!(output.status.code(), Some(64));
    assert!(stderr(&output).contains("No such option '--help'"));
}
