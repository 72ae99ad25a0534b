use assert_cmd::Command;
use std::path::Path;

/// `mixlist` with a clean environment rooted at `data_dir`.
pub fn mixlist_cmd(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mixlist").unwrap();
    for var in [
        "MIXLIST_DB_PATH",
        "MIXLIST_IMAGE_DIR",
        "MIXLIST_LOG_DIR",
        "MIXLIST_LOG_LEVEL",
        "MIXLIST_QUOTE_BASE_URL",
        "MIXLIST_HTTP_TIMEOUT_SECS",
        "MIXLIST_IMAGE_RETENTION",
        "MIXLIST_NUMERIC_POLICY",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("MIXLIST_DATA_DIR", data_dir);
    cmd
}
