use rstest::rstest;

use crate::common::{TestRepo, repo, stderr, stdout};

#[rstest]
fn test_invalid_yaml_is_reported(repo: TestRepo) {
    repo.write_config("branch: [unclosed\n");

    let output = repo.bruh(&["scan"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to load config"));
}

#[rstest]
fn test_template_and_template_file_conflict(repo: TestRepo) {
    repo.write_config("commit:\n  template: a\n  template-file: b.j2\n");

    let output = repo.bruh(&["scan"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("mutually exclusive"));
}

#[rstest]
fn test_explicit_config_flag_wins(repo: TestRepo) {
    repo.write_config("commit:\n  template: from BRUH_CONFIG_PATH\n");
    let explicit = repo.temp_path().join("explicit.yaml");
    std::fs::write(&explicit, "commit:\n  template: from --config\n").unwrap();
    repo.write_file("staged.txt", "x\n");
    repo.run_git(&["add", "staged.txt"]);

    let output = repo.bruh(&[
        "--config",
        explicit.to_str().unwrap(),
        "commit",
        "--show-prompt",
    ]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "from --config");
}

#[rstest]
fn test_missing_explicit_config_warns(repo: TestRepo) {
    let output = repo.bruh(&["--config", "/nonexistent/bruh.yaml", "scan"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("Config file not found: /nonexistent/bruh.yaml"));
}

#[rstest]
fn test_env_overrides_file(repo: TestRepo) {
    repo.write_config("ai:\n  command: not-installed-ai\n");
    repo.mock_command("claude", "cat > /dev/null\necho 'feat: from env'");
    repo.write_file("staged.txt", "x\n");
    repo.run_git(&["add", "staged.txt"]);

    let output = repo
        .bruh_command()
        .arg("commit")
        .env("BRUH_AI__COMMAND", "claude")
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(repo.git_output(&["log", "-1", "--format=%s"]), "feat: from env");
}
