use predicates::prelude::*;
use serde_json::json;
use test_support;

fn daily_config(dir: &std::path::Path) -> std::path::PathBuf {
  let config: serde_json::Value = test_support::read_fixture_json("config/daily.json");
  test_support::write_config(dir, &config)
}

#[test]
fn daily_report_snapshot() {
  test_support::init_tracing();
  test_support::init_insta();
  let td = test_support::tempdir();
  let config = daily_config(td.path());

  let out = test_support::cmd_bin("trellomd")
    .envs(test_support::board_env())
    .args(["--config", config.to_str().unwrap(), "--now-override", "2025-08-15T12:00:00Z"])
    .output()
    .unwrap();

  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  let stdout = String::from_utf8(out.stdout).unwrap();
  assert!(stdout.ends_with('\n'));

  insta::assert_snapshot!(stdout.trim_end(), @r"
  Daily

  *In review*

  - Review docs - [Commit](https://github.com/org/repo/commit/abc123)

  *Doing*

  - Fix bug - [PR #42](https://github.com/org/repo/pull/42)
  ");
}

#[test]
fn single_all_list_renders_exact_document() {
  let td = test_support::tempdir();
  let config = test_support::write_config(
    td.path(),
    &json!({
      "apiKey": "k",
      "apiToken": "t",
      "board": "B1",
      "heading": "Daily",
      "lists": [{ "id": "L1", "name": "Doing", "mode": "all" }]
    }),
  );

  test_support::cmd_bin("trellomd")
    .env(
      "TRELLOMD_TEST_LIST_CARDS_JSON",
      json!({ "L1": [{ "id": "c1", "name": "Fix bug", "idList": "L1", "closed": false, "attachments": [] }] }).to_string(),
    )
    .args(["--config", config.to_str().unwrap()])
    .assert()
    .success()
    .stdout("Daily\n\n*Doing*\n\n- Fix bug\n");
}

#[test]
fn archived_cards_included_when_not_ignored() {
  let td = test_support::tempdir();
  let mut config: serde_json::Value = test_support::read_fixture_json("config/daily.json");
  config["ignoreArchived"] = json!(false);
  let path = test_support::write_config(td.path(), &config);

  test_support::cmd_bin("trellomd")
    .envs(test_support::board_env())
    .args(["--config", path.to_str().unwrap()])
    .assert()
    .success()
    .stdout(predicate::str::contains("- Fix bug - [PR #42](https://github.com/org/repo/pull/42)\n- Stale task\n"));
}

#[test]
fn out_flag_writes_file_and_keeps_stdout_empty() {
  let td = test_support::tempdir();
  let config = daily_config(td.path());
  let target = td.path().join("reports/daily.md");

  test_support::cmd_bin("trellomd")
    .envs(test_support::board_env())
    .args(["--config", config.to_str().unwrap(), "--out", target.to_str().unwrap()])
    .assert()
    .success()
    .stdout("");

  let written = std::fs::read_to_string(&target).unwrap();
  assert!(written.starts_with("Daily\n\n*In review*\n\n"));
  assert!(written.ends_with("[PR #42](https://github.com/org/repo/pull/42)\n"));
}

#[test]
fn failed_card_detail_emits_no_partial_report() {
  let td = test_support::tempdir();
  let config = daily_config(td.path());
  let target = td.path().join("daily.md");

  test_support::cmd_bin("trellomd")
    .envs(test_support::board_env())
    .env("TRELLOMD_TEST_CARDS_JSON", "{}")
    .args(["--config", config.to_str().unwrap(), "--out", target.to_str().unwrap()])
    .assert()
    .failure()
    .stdout("")
    .stderr(predicate::str::contains("returned HTTP 404"));

  assert!(!target.exists());
}

#[test]
fn verbose_logs_go_to_stderr_only() {
  let td = test_support::tempdir();
  let config = daily_config(td.path());

  test_support::cmd_bin("trellomd")
    .envs(test_support::board_env())
    .args(["--config", config.to_str().unwrap(), "--verbose"])
    .assert()
    .success()
    .stdout(predicate::str::starts_with("Daily\n"))
    .stderr(predicate::str::contains("fetched recent activity"));
}
