use predicates::prelude::*;
use serde_json::json;
use test_support;

#[test]
fn show_lists_prints_open_lists() {
  let td = test_support::tempdir();
  let config: serde_json::Value = test_support::read_fixture_json("config/daily.json");
  let path = test_support::write_config(td.path(), &config);

  test_support::cmd_bin("trellomd")
    .envs(test_support::board_env())
    .args(["--config", path.to_str().unwrap(), "--show-lists"])
    .assert()
    .success()
    .stdout("L1\tDoing\nL2\tReview\n");
}

#[test]
fn check_lists_fails_when_no_configured_list_exists() {
  let td = test_support::tempdir();
  let path = test_support::write_config(
    td.path(),
    &json!({
      "apiKey": "k",
      "apiToken": "t",
      "board": "B1",
      "lists": [{ "id": "L9", "name": "Gone" }]
    }),
  );

  test_support::cmd_bin("trellomd")
    .envs(test_support::board_env())
    .args(["--config", path.to_str().unwrap(), "--check-lists"])
    .assert()
    .failure()
    .stdout("")
    .stderr(predicate::str::contains("The board does not contain any of the specified lists."));
}

#[test]
fn check_lists_warns_and_continues_when_some_lists_exist() {
  let td = test_support::tempdir();
  let mut config: serde_json::Value = test_support::read_fixture_json("config/daily.json");
  config["lists"]
    .as_array_mut()
    .unwrap()
    .push(json!({ "id": "L9", "name": "Gone", "mode": "all" }));
  let path = test_support::write_config(td.path(), &config);

  test_support::cmd_bin("trellomd")
    .envs(test_support::board_env())
    .env("TRELLOMD_TEST_LIST_CARDS_JSON", json!({ "L1": [] }).to_string())
    .args(["--config", path.to_str().unwrap(), "--check-lists"])
    .assert()
    .success()
    .stdout(predicate::str::ends_with("*Doing*\n\nNone\n\n*Gone*\n\nNone\n"))
    .stderr(predicate::str::contains("configured list not found on board"));
}

#[test]
fn show_lists_works_before_any_list_is_configured() {
  let td = test_support::tempdir();
  let path = test_support::write_config(
    td.path(),
    &json!({ "apiKey": "k", "apiToken": "t", "board": "https://trello.com/b/B1/team-board", "lists": [] }),
  );

  test_support::cmd_bin("trellomd")
    .envs(test_support::board_env())
    .args(["--config", path.to_str().unwrap(), "--show-lists"])
    .assert()
    .success()
    .stdout("L1\tDoing\nL2\tReview\n");
}

#[test]
fn show_lists_still_requires_credentials() {
  let td = test_support::tempdir();
  let path = test_support::write_config(td.path(), &json!({ "apiKey": "k", "board": "B1" }));

  test_support::cmd_bin("trellomd")
    .envs(test_support::board_env())
    .args(["--config", path.to_str().unwrap(), "--show-lists"])
    .assert()
    .failure()
    .stdout("")
    .stderr(predicate::str::contains("API token is required").and(predicate::str::contains("lists").not()));
}

#[test]
fn check_lists_warns_about_archived_configured_list() {
  let td = test_support::tempdir();
  let path = test_support::write_config(
    td.path(),
    &json!({
      "apiKey": "k",
      "apiToken": "t",
      "board": "B1",
      "heading": "Daily",
      "lists": [{ "id": "L3", "name": "Graveyard", "mode": "all" }]
    }),
  );

  test_support::cmd_bin("trellomd")
    .envs(test_support::board_env())
    .args(["--config", path.to_str().unwrap(), "--check-lists"])
    .assert()
    .success()
    .stdout("Daily\n\n*Graveyard*\n\nNone\n")
    .stderr(predicate::str::contains("configured list is archived on the board"));
}
