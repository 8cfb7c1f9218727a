use rstest::rstest;

use crate::common::{TestRepo, repo, stderr, stdout};

/// AI mock that prints a fixed commit message.
fn mock_ai_message(repo: &TestRepo, message: &str) {
    repo.mock_command("claude", &format!("cat > /dev/null\necho '{message}'"));
}

fn stage_change(repo: &TestRepo) {
    repo.write_file("src/lib.rs", "pub fn answer() -> u32 { 42 }\n");
    repo.run_git(&["add", "src/lib.rs"]);
}

#[rstest]
fn test_commit_without_staged_changes_skips_ai(repo: TestRepo) {
    mock_ai_message(&repo, "feat: should not happen");

    let output = repo.bruh(&["commit"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("No staged changes to commit"));
    assert!(repo.calls("claude").is_empty());
}

#[rstest]
fn test_commit_outside_repository(repo: TestRepo) {
    let outside = repo.scratch_dir("not-a-repo");

    let output = repo
        .bruh_command()
        .arg("commit")
        .current_dir(&outside)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Not in a git repository"));
}

#[rstest]
fn test_commit_with_message_args(repo: TestRepo) {
    stage_change(&repo);
    mock_ai_message(&repo, "feat: unused");

    let output = repo.bruh(&["commit", "feat:", "add", "answer"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(repo.git_output(&["log", "-1", "--format=%s"]), "feat: add answer");
    assert!(repo.calls("claude").is_empty());
}

#[rstest]
fn test_commit_with_generated_message(repo: TestRepo) {
    stage_change(&repo);
    mock_ai_message(&repo, "feat: add answer function");

    let output = repo.bruh(&["commit"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        repo.git_output(&["log", "-1", "--format=%s"]),
        "feat: add answer function"
    );
    assert_eq!(
        repo.calls("claude"),
        vec!["--print --allowedTools Bash(git:*)"]
    );
    assert!(stderr(&output).contains("Committed changes @"));
}

#[rstest]
fn test_commit_ai_args_from_config(repo: TestRepo) {
    stage_change(&repo);
    mock_ai_message(&repo, "chore: tidy");
    repo.write_config("ai:\n  args: [\"--model\", \"haiku\"]\n");

    let output = repo.bruh(&["commit"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        repo.calls("claude"),
        vec!["--print --allowedTools Bash(git:*) --model haiku"]
    );
}

#[rstest]
fn test_commit_empty_ai_response(repo: TestRepo) {
    stage_change(&repo);
    repo.mock_command("claude", "cat > /dev/null");

    let output = repo.bruh(&["commit"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("returned an empty response"));
    assert_eq!(repo.git_output(&["rev-list", "--count", "HEAD"]), "1");
}

#[rstest]
fn test_commit_ai_failure_reports_stderr(repo: TestRepo) {
    stage_change(&repo);
    repo.mock_command("claude", "echo 'quota exceeded' >&2\nexit 1");

    let output = repo.bruh(&["commit"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("AI command claude failed"), "{err}");
    assert!(err.contains("quota exceeded"), "{err}");
}

#[rstest]
fn test_commit_show_prompt(repo: TestRepo) {
    stage_change(&repo);
    mock_ai_message(&repo, "feat: unused");

    let output = repo.bruh(&["commit", "--show-prompt"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let prompt = stdout(&output);
    assert!(prompt.contains("Repository: repo"), "{prompt}");
    assert!(prompt.contains("Branch: main"), "{prompt}");
    assert!(prompt.contains("src/lib.rs"), "{prompt}");
    assert!(repo.calls("claude").is_empty());
}

#[rstest]
fn test_commit_custom_template(repo: TestRepo) {
    stage_change(&repo);
    repo.write_config("commit:\n  template: \"Changes on {{ branch }}: {{ changed_files }}\"\n");

    let output = repo.bruh(&["commit", "--show-prompt"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "Changes on main: A\tsrc/lib.rs");
}

#[rstest]
fn test_cleanup_gives_up_after_five_attempts(repo: TestRepo) {
    stage_change(&repo);
    repo.mock_command("pre-commit", "echo 'trailing-whitespace....Failed'\nexit 1");
    repo.mock_command("claude", "cat > /dev/null");

    let output = repo.bruh(&["commit", "--cleanup-pre-commit", "fix: things"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(repo.calls("pre-commit").len(), 5);
    assert!(repo.calls("pre-commit").iter().all(|c| c == "run --all-files"));
    // A fix turn after every failure but the last
    assert_eq!(repo.calls("claude").len(), 4);
    assert!(stderr(&output).contains("pre-commit still failing after 5 attempts"));
    assert_eq!(repo.git_output(&["rev-list", "--count", "HEAD"]), "1");
}

#[rstest]
fn test_cleanup_recovers_after_fix(repo: TestRepo) {
    stage_change(&repo);
    let marker = repo.root_path().join(".fixed");
    repo.mock_command(
        "pre-commit",
        &format!("test -f '{}' && exit 0\necho 'end-of-file-fixer....Failed'\nexit 1", marker.display()),
    );
    repo.mock_command(
        "claude",
        &format!("cat > /dev/null\ntouch '{}'", marker.display()),
    );

    let output = repo.bruh(&["commit", "--cleanup-pre-commit", "fix: things"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(repo.calls("pre-commit").len(), 2);
    let claude_calls = repo.calls("claude");
    assert_eq!(claude_calls.len(), 1);
    assert!(claude_calls[0].contains("--dangerously-skip-permissions"));
    // The fix was re-staged before committing
    let files = repo.git_output(&["show", "--name-only", "--format=", "HEAD"]);
    assert!(files.contains(".fixed"), "{files}");
}

#[rstest]
fn test_cleanup_enabled_from_config(repo: TestRepo) {
    stage_change(&repo);
    repo.mock_command("pre-commit", "exit 0");
    repo.write_config("cleanup-pre-commit: [repo]\n");

    let output = repo.bruh(&["commit", "chore: configured cleanup"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(repo.calls("pre-commit").len(), 1);
}

#[rstest]
fn test_no_cleanup_flag_overrides_config(repo: TestRepo) {
    stage_change(&repo);
    repo.mock_command("pre-commit", "exit 1");
    repo.write_config("cleanup-pre-commit: [repo]\n");

    let output = repo.bruh(&["commit", "--no-cleanup-pre-commit", "chore: skip"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(repo.calls("pre-commit").is_empty());
}
