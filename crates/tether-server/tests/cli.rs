use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;
use tether_store::Store;

#[test]
fn init_db_creates_migrated_database() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("nested").join("tether.sqlite3");
    let config_home = temp.path().join("config");

    let output = cargo_bin_cmd!("tether")
        .env("XDG_CONFIG_HOME", &config_home)
        .args(["--db-path", db_path.to_str().expect("db path"), "init-db"])
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("database ready"));

    let store = Store::open(&db_path).expect("open db");
    assert_eq!(store.schema_version().expect("version"), 1);
}

#[test]
fn explicit_config_must_exist() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("tether.sqlite3");
    let missing = temp.path().join("missing.toml");

    let output = cargo_bin_cmd!("tether")
        .args([
            "--db-path",
            db_path.to_str().expect("db path"),
            "--config",
            missing.to_str().expect("config path"),
            "init-db",
        ])
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("load config"));
}
