use rstest::rstest;

use crate::common::{TestRepo, repo, stderr};

fn worktree(repo: &TestRepo, branch: &str) -> std::path::PathBuf {
    repo.root_path()
        .parent()
        .unwrap()
        .join(format!("repo-{branch}"))
}

#[rstest]
fn test_branch_creates_sibling_worktree(repo: TestRepo) {
    let output = repo.bruh(&[
        "branch",
        "--branch-name",
        "feature",
        "--editor",
        "touch opened",
        "--no-tmux",
    ]);

    assert!(output.status.success(), "{}", stderr(&output));
    let path = worktree(&repo, "feature");
    assert!(path.join("file.txt").exists());
    // The editor ran inside the new worktree
    assert!(path.join("opened").exists());
    assert_eq!(
        repo.git_output(&["-C", path.to_str().unwrap(), "branch", "--show-current"]),
        "feature"
    );
}

#[rstest]
fn test_branch_default_name(repo: TestRepo) {
    let output = repo.bruh(&["branch", "--editor", "true", "--no-tmux"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(worktree(&repo, "main-worktree").is_dir());
}

#[rstest]
fn test_branch_sanitizes_slashes(repo: TestRepo) {
    let output = repo.bruh(&[
        "branch",
        "--branch-name",
        "fix/login",
        "--editor",
        "true",
        "--no-tmux",
    ]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(worktree(&repo, "fix-login").is_dir());
    // Checked out elsewhere, so `git branch --list` would prefix it with `+`
    repo.run_git(&["rev-parse", "--verify", "-q", "refs/heads/fix/login"]);
}

#[rstest]
fn test_branch_from_other_branch(repo: TestRepo) {
    repo.run_git(&["branch", "release"]);
    repo.run_git(&["switch", "-q", "-c", "wip"]);

    let output = repo.bruh(&[
        "branch",
        "--from-branch",
        "release",
        "--editor",
        "true",
        "--no-tmux",
    ]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(worktree(&repo, "release-worktree").is_dir());
}

#[rstest]
fn test_branch_existing_path(repo: TestRepo) {
    std::fs::create_dir(worktree(&repo, "taken")).unwrap();

    let output = repo.bruh(&["branch", "--branch-name", "taken", "--editor", "true"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Directory already exists"));
}

#[rstest]
fn test_branch_unknown_base(repo: TestRepo) {
    let output = repo.bruh(&[
        "branch",
        "--from-branch",
        "nope",
        "--editor",
        "true",
        "--no-tmux",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to create worktree for nope-worktree from nope"));
}

#[rstest]
fn test_branch_editor_from_env(repo: TestRepo) {
    let output = repo
        .bruh_command()
        .args(["branch", "--branch-name", "env"])
        .env("BRUH_BRANCH__EDITOR", "touch from-env")
        .env("BRUH_BRANCH__USING_TMUX", "false")
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(worktree(&repo, "env").join("from-env").exists());
}

#[rstest]
fn test_branch_opens_tmux_window(repo: TestRepo) {
    repo.mock_command(
        "tmux",
        r#"if [ "$1" = new-window ]; then echo '%7'; fi"#,
    );

    let output = repo
        .bruh_command()
        .args(["branch", "--branch-name", "tmuxed", "--editor", "hx"])
        .env("TMUX", "/tmp/tmux-1000/default,1,0")
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    let path = worktree(&repo, "tmuxed");
    assert_eq!(
        repo.calls("tmux"),
        vec![
            format!("new-window -c {} -n tmuxed -P -F #{{pane_id}}", path.display()),
            "send-keys -t %7 hx Enter".to_string(),
        ]
    );
}

#[rstest]
fn test_branch_tmux_without_pane_id_fails(repo: TestRepo) {
    repo.mock_command("tmux", "exit 0");

    let output = repo
        .bruh_command()
        .args(["branch", "--branch-name", "nopane", "--editor", "hx"])
        .env("TMUX", "/tmp/tmux-1000/default,1,0")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(repo.calls("tmux").len(), 1);
}

#[rstest]
fn test_branch_editor_receives_worktree_path(repo: TestRepo) {
    repo.mock_command("myedit", "exit 0");

    let output = repo.bruh(&[
        "branch",
        "--branch-name",
        "edited",
        "--editor",
        "myedit",
        "--no-tmux",
    ]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        repo.calls("myedit"),
        vec![worktree(&repo, "edited").display().to_string()]
    );
}

#[rstest]
fn test_branch_without_tmux_session_runs_foreground(repo: TestRepo) {
    repo.mock_command("tmux", "exit 0");

    // using_tmux defaults to true, but TMUX is unset
    let output = repo.bruh(&["branch", "--branch-name", "fg", "--editor", "touch ran"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(repo.calls("tmux").is_empty());
    assert!(worktree(&repo, "fg").join("ran").exists());
}
