//! test-support: helpers for robust, nextest-friendly tests.
//!
//! Add as a dev-dependency in your top-level `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test_support = { path = "tests/support", features = ["serde"] }
//! ```
//!
//! Then in tests:
//! ```rust,ignore
//! use test_support::{init_tracing, cmd_bin, board_env};
//!
//! #[test]
//! fn example() {
//!     init_tracing();
//!     let mut cmd = cmd_bin("trellomd");
//!     cmd.envs(board_env());
//! }
//! ```

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

use std::path::{Path, PathBuf};

/// Environment variables the binary reads for credentials and API selection.
/// Cleared on every command so the developer's shell cannot leak into tests.
const AMBIENT_VARS: [&str; 9] = [
    "TRELLO_API_KEY",
    "TRELLO_API_TOKEN",
    "TRELLO_BOARD_ID",
    "TRELLO_API_BASE",
    "TRELLOMD_TEST_LISTS_JSON",
    "TRELLOMD_TEST_LIST_CARDS_JSON",
    "TRELLOMD_TEST_ACTIONS_JSON",
    "TRELLOMD_TEST_CARDS_JSON",
    "RUST_LOG",
];

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn,test=info"))
            .unwrap();
        // with_test_writer() causes logs to appear alongside failing tests only (cargo/nextest)
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
    Lazy::force(&INIT);
}

/// Initialize insta snapshot settings once per test process.
///
/// - Centralizes snapshot files in `tests/snapshots` (relative to the test binary's CWD)
/// - Omits `Expression:` in snapshot headers for cleaner diffs
pub fn init_insta() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let mut settings = insta::Settings::clone_current();
        settings.set_snapshot_path("../snapshots");
        settings.set_omit_expression(true);
        // Bind settings to the thread for the remainder of the test process by leaking the guard
        let guard = settings.bind_to_scope();
        std::mem::forget(guard);
    });
    Lazy::force(&INIT);
}

/// Return the path to the repository's `tests/fixtures` directory.
///
/// Uses the package directory (where this crate's `Cargo.toml` lives), so it's stable
/// regardless of the runner's working directory (cargo vs nextest).
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests dir")
        .join("fixtures")
}

/// Read a UTF-8 text fixture into a string.
pub fn read_fixture_text<P: AsRef<Path>>(rel_path: P) -> String {
    let path = fixtures_dir().join(rel_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

/// Deserialize a JSON fixture into `T` (enable `serde` feature).
#[cfg(feature = "serde")]
pub fn read_fixture_json<T, P>(rel_path: P) -> T
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = fixtures_dir().join(rel_path);
    let file = std::fs::File::open(&path)
        .unwrap_or_else(|e| panic!("failed to open fixture {}: {e}", path.display()));
    serde_json::from_reader::<_, T>(file)
        .unwrap_or_else(|e| panic!("failed to parse JSON fixture {}: {e}", path.display()))
}

/// Create a temp directory that deletes on drop.
pub fn tempdir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create tempdir")
}

/// Write a config value as `trello-to-markdown.config.json` inside `dir`.
#[cfg(feature = "serde")]
pub fn write_config(dir: &Path, config: &serde_json::Value) -> PathBuf {
    let path = dir.join("trello-to-markdown.config.json");
    std::fs::write(&path, serde_json::to_vec_pretty(config).expect("serialize config"))
        .unwrap_or_else(|e| panic!("failed to write config {}: {e}", path.display()));
    path
}

/// The canned board under `tests/fixtures/board`, as `TRELLOMD_TEST_*` variables.
pub fn board_env() -> Vec<(String, String)> {
    [
        ("TRELLOMD_TEST_LISTS_JSON", "board/lists.json"),
        ("TRELLOMD_TEST_LIST_CARDS_JSON", "board/list_cards.json"),
        ("TRELLOMD_TEST_ACTIONS_JSON", "board/actions.json"),
        ("TRELLOMD_TEST_CARDS_JSON", "board/cards.json"),
    ]
    .iter()
    .map(|(k, file)| (k.to_string(), read_fixture_text(file)))
    .collect()
}

/// Run a binary target with `assert_cmd`, returning the ready-to-run `Command`
/// with credential and fixture variables cleared.
pub fn cmd_bin(bin: &str) -> assert_cmd::Command {
    init_tracing();
    let mut cmd = assert_cmd::Command::cargo_bin(bin).expect("binary target not found");
    for var in AMBIENT_VARS {
        cmd.env_remove(var);
    }
    cmd
}
