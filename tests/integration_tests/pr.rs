use rstest::rstest;

use crate::common::{TestRepo, repo, repo_on_feature, stderr, stdout};

const PR_URL: &str = "https://github.com/acme/repo/pull/7";

/// `gh` that is installed, logged in and reports `default` as the default branch.
fn mock_gh(repo: &TestRepo, default: &str) {
    repo.mock_command(
        "gh",
        &format!(
            r#"case "$1" in
    auth) exit 0 ;;
    repo) echo '{default}' ;;
    *) exit 1 ;;
esac"#
        ),
    );
}

fn mock_ai_creating_pr(repo: &TestRepo) {
    repo.mock_command(
        "claude",
        &format!("cat > /dev/null\necho 'Opened the pull request:'\necho '{PR_URL}'"),
    );
}

#[rstest]
#[case::main("main")]
#[case::master("master")]
fn test_pr_refused_on_protected_branch(repo: TestRepo, #[case] branch: &str) {
    if branch != "main" {
        repo.run_git(&["switch", "-q", "-c", branch]);
    }
    mock_gh(&repo, "main");
    mock_ai_creating_pr(&repo);

    let output = repo.bruh(&["pr", "create"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains(&format!("Cannot create a PR from {branch}")),
        "{}",
        stderr(&output)
    );
    assert!(repo.calls("gh").is_empty());
    assert!(repo.calls("claude").is_empty());
}

#[rstest]
fn test_pr_creates_and_prints_url(repo_on_feature: TestRepo) {
    let repo = repo_on_feature;
    mock_gh(&repo, "main");
    mock_ai_creating_pr(&repo);

    let output = repo.bruh(&["pr", "create"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), PR_URL);
    assert!(stderr(&output).contains("Generated PR description:"));
    assert_eq!(
        repo.calls("claude"),
        vec!["--print --allowedTools Bash(gh:*)"]
    );
    assert_eq!(repo.calls("gh")[0], "auth status");
}

#[rstest]
fn test_pr_alias_without_subcommand(repo_on_feature: TestRepo) {
    let repo = repo_on_feature;
    mock_gh(&repo, "main");
    mock_ai_creating_pr(&repo);

    let output = repo.bruh(&["pr", "--title", "Add feature"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), PR_URL);
}

#[rstest]
fn test_pr_without_url_reports_response(repo_on_feature: TestRepo) {
    let repo = repo_on_feature;
    mock_gh(&repo, "main");
    repo.mock_command("claude", "cat > /dev/null\necho 'Created PR #7'");

    let output = repo.bruh(&["pr"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "Created PR #7");
}

#[rstest]
fn test_pr_gh_not_authenticated(repo_on_feature: TestRepo) {
    let repo = repo_on_feature;
    repo.mock_command(
        "gh",
        r#"echo 'You are not logged into any GitHub hosts.' >&2
exit 1"#,
    );
    mock_ai_creating_pr(&repo);

    let output = repo.bruh(&["pr", "create"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("gh is not authenticated"), "{err}");
    assert!(err.contains("not logged into any GitHub hosts"), "{err}");
    assert!(repo.calls("claude").is_empty());
}

#[rstest]
fn test_pr_unknown_prompt(repo_on_feature: TestRepo) {
    let repo = repo_on_feature;
    mock_gh(&repo, "main");
    repo.write_config("pr:\n  prompts:\n    short: Keep the description brief.\n");

    let output = repo.bruh(&["pr", "create", "--prompt", "long"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("No PR prompt named long"), "{err}");
    assert!(err.contains("default, short"), "{err}");
}

#[rstest]
fn test_pr_named_prompt_reaches_ai(repo_on_feature: TestRepo) {
    let repo = repo_on_feature;
    mock_gh(&repo, "main");
    let prompt_file = repo.temp_path().join("prompt.txt");
    repo.mock_command(
        "claude",
        &format!("cat > '{}'\necho '{PR_URL}'", prompt_file.display()),
    );
    repo.write_config("pr:\n  prompts:\n    short: Keep the description brief.\n");

    let output = repo.bruh(&["pr", "create", "--prompt", "short", "--base", "main"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let prompt = std::fs::read_to_string(prompt_file).unwrap();
    assert!(prompt.contains("Keep the description brief."), "{prompt}");
    assert!(prompt.contains("from feature into main"), "{prompt}");
    assert!(prompt.contains("feature.txt"), "{prompt}");
    assert!(prompt.contains("Add feature"), "{prompt}");
}
