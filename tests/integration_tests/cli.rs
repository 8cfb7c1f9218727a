use rstest::rstest;

use crate::common::{TestRepo, repo, stderr, stdout};

#[rstest]
fn test_no_arguments_shows_help(repo: TestRepo) {
    let output = repo.bruh(&[]);

    // arg_required_else_help exits with clap's usage code
    assert_eq!(output.status.code(), Some(2));
    let help = stderr(&output);
    for command in ["branch", "commit", "pr", "scan", "addcheat"] {
        assert!(help.contains(command), "{command} missing from help:\n{help}");
    }
}

#[rstest]
fn test_version(repo: TestRepo) {
    let output = repo.bruh(&["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).starts_with("bruh "));
}

#[rstest]
#[case::commit("commit")]
#[case::scan("scan")]
#[case::branch("branch")]
#[case::pr("pr")]
#[case::addcheat("addcheat")]
fn test_subcommand_help(repo: TestRepo, #[case] command: &str) {
    let output = repo.bruh(&[command, "--help"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Global Options"));
}

#[rstest]
fn test_debug_logging_with_vv(repo: TestRepo) {
    let output = repo
        .bruh_command()
        .args(["-vv", "scan"])
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("Detected ecosystems in"));
}
