use rstest::rstest;

use crate::common::{TestRepo, repo, stderr};

/// Cheat dir and zsh history with `entry` followed by the addcheat call.
fn setup(repo: &TestRepo, entry: &str) -> std::path::PathBuf {
    let cheats = repo.scratch_dir("cheats");
    let history = repo.temp_path().join("zsh_history");
    std::fs::write(
        &history,
        format!(": 1700000000:0;ls\n{entry}\n: 1700000009:0;bruh addcheat\n"),
    )
    .unwrap();
    repo.write_config(&format!(
        "addcheat:\n  cheat-directory: {}\n  history-file: {}\n",
        cheats.display(),
        history.display()
    ));
    cheats
}

#[rstest]
fn test_addcheat_starts_session_in_cheat_dir(repo: TestRepo) {
    let cheats = setup(&repo, ": 1700000005:0;kubectl get pods -A");
    // Record the working directory and the prompt argument
    repo.mock_command(
        "claude",
        "pwd > session.txt\nfor last; do :; done\necho \"$last\" >> session.txt",
    );

    let output = repo.bruh(&["addcheat", "use", "the", "k8s", "sheet"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let session = std::fs::read_to_string(cheats.join("session.txt")).unwrap();
    assert!(session.starts_with(&cheats.display().to_string()), "{session}");
    assert!(session.contains("kubectl get pods -A"), "{session}");
    assert!(
        session.contains("Additional instructions from the user: use the k8s sheet"),
        "{session}"
    );
    let calls = repo.calls("claude");
    assert!(calls[0].starts_with("--dangerously-skip-permissions "), "{calls:?}");
}

#[rstest]
fn test_addcheat_plain_history(repo: TestRepo) {
    setup(&repo, "docker compose up -d");
    repo.mock_command("claude", "exit 0");

    let output = repo.bruh(&["addcheat"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("docker compose up -d"));
}

#[rstest]
fn test_addcheat_missing_cheat_directory(repo: TestRepo) {
    repo.mock_command("claude", "exit 0");
    repo.write_config("addcheat:\n  cheat-directory: /nonexistent/bruh/cheats\n");

    let output = repo.bruh(&["addcheat"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Cheat directory does not exist"));
    assert!(repo.calls("claude").is_empty());
}

#[rstest]
fn test_addcheat_cheat_directory_flag(repo: TestRepo) {
    setup(&repo, "make release");
    let other = repo.scratch_dir("other-cheats");
    repo.mock_command("claude", "pwd > session.txt");

    let output = repo.bruh(&[
        "addcheat",
        "--cheat-directory",
        other.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(other.join("session.txt").exists());
}

#[rstest]
fn test_addcheat_history_from_histfile(repo: TestRepo) {
    let cheats = repo.scratch_dir("cheats");
    let history = repo.temp_path().join("bash_history");
    std::fs::write(&history, "terraform plan\nbruh addcheat\n").unwrap();
    repo.write_config(&format!(
        "addcheat:\n  cheat-directory: {}\n",
        cheats.display()
    ));
    repo.mock_command("claude", "exit 0");

    let output = repo
        .bruh_command()
        .arg("addcheat")
        .env("HISTFILE", &history)
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("terraform plan"));
}

#[rstest]
fn test_addcheat_empty_history(repo: TestRepo) {
    setup(&repo, "overwritten below");
    let history = repo.temp_path().join("zsh_history");
    std::fs::write(&history, "bruh addcheat\n").unwrap();
    repo.mock_command("claude", "exit 0");

    let output = repo.bruh(&["addcheat"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("No command found in"));
    assert!(repo.calls("claude").is_empty());
}
