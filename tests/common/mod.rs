use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A scratch directory plus the collection file path inside it
#[allow(dead_code)]
pub fn temp_collection() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let data_file = temp_dir.path().join("contacts.txt");
    (temp_dir, data_file)
}

/// Write `contents` as the collection file and return its path
#[allow(dead_code)]
pub fn temp_collection_with(contents: &str) -> (TempDir, PathBuf) {
    let (temp_dir, data_file) = temp_collection();
    fs::write(&data_file, contents).expect("failed to write collection file");
    (temp_dir, data_file)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// The binary with every file it touches pointed into `dir`
#[allow(dead_code)]
pub fn contactbook(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("contactbook").unwrap();
    cmd.env_remove("RUST_LOG")
        .env("CONTACTBOOK_DATA_FILE", dir.path().join("contacts.txt"))
        .env("CONTACTBOOK_BACKUP_FILE", dir.path().join("contacts_backup.txt"))
        .env("CONTACTBOOK_UNDO_FILE", dir.path().join("last_deleted.txt"))
        .arg("--no-color");
    cmd
}
