mod util;

use std::path::Path;

use assert_cmd::Command;
use util::TEST_MNEMONIC;

fn wallet_cli(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("wallet-cli").unwrap();
    cmd.env("CONFIG_PATH", dir.join("wallet.toml"))
        .env("WALLET_STORE_PATH", dir.join("store.json"))
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_cli_generate_mnemonic() {
    let dir = tempfile::tempdir().unwrap();
    let out = stdout_of(wallet_cli(dir.path()).args(["generate-mnemonic", "--words", "24"]));
    assert_eq!(out.trim().split(' ').count(), 24);
    assert!(!dir.path().join("store.json").exists());
}

#[test]
fn test_cli_create_add_list_persist() {
    let dir = tempfile::tempdir().unwrap();

    let created = stdout_of(
        wallet_cli(dir.path())
            .args(["create", "--chain", "ethereum", "--mnemonic"])
            .args(TEST_MNEMONIC.split(' ')),
    );
    assert!(created.starts_with("m/44'/60'/0'/0'  0x"));
    assert!(!created.contains("Recovery phrase"));

    let added = stdout_of(wallet_cli(dir.path()).arg("add"));
    assert!(added.starts_with("m/44'/60'/0'/1'  0x"));

    let listed = stdout_of(wallet_cli(dir.path()).arg("list"));
    assert!(listed.contains("Chain: Ethereum (60)"));
    assert!(listed.contains("[0] m/44'/60'/0'/0'"));
    assert!(listed.contains("[1] m/44'/60'/0'/1'"));
    assert!(!listed.contains(TEST_MNEMONIC));
    assert!(dir.path().join("store.json").exists());
}

#[test]
fn test_cli_derivation_is_deterministic() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let run = |dir: &Path| {
        stdout_of(
            wallet_cli(dir)
                .args(["create", "--chain", "sol", "--mnemonic"])
                .args(TEST_MNEMONIC.split(' ')),
        )
    };
    assert_eq!(run(first.path()), run(second.path()));
}

#[test]
fn test_cli_errors_exit_nonzero() {
    let dir = tempfile::tempdir().unwrap();

    let output = wallet_cli(dir.path()).arg("add").output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("error"));

    let output = wallet_cli(dir.path())
        .args(["create", "--chain", "eth", "--mnemonic", "not", "a", "phrase"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let output = wallet_cli(dir.path()).args(["delete", "--index", "0"]).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_cli_generated_phrase_is_printed_once() {
    let dir = tempfile::tempdir().unwrap();
    let created = stdout_of(wallet_cli(dir.path()).args(["create", "--chain", "sol"]));
    let phrase = created
        .lines()
        .find_map(|l| l.strip_prefix("Recovery phrase: "))
        .unwrap();
    assert_eq!(phrase.split(' ').count(), 12);
}

#[test]
fn test_cli_shell_session() {
    let dir = tempfile::tempdir().unwrap();
    let script = format!(
        "create --chain eth --mnemonic {}\ntoggle --index 0\nadd\ndelete --index 0\nlist\nexit\n",
        TEST_MNEMONIC
    );
    let out = stdout_of(wallet_cli(dir.path()).arg("shell").write_stdin(script));
    assert!(out.contains("[0] m/44'/60'/0'/1'"));

    let listed = stdout_of(wallet_cli(dir.path()).arg("list"));
    assert!(listed.contains("[0] m/44'/60'/0'/1'"));
    assert!(!listed.contains("m/44'/60'/0'/0'"));
}

#[test]
fn test_cli_copy_without_terminal_fails() {
    let dir = tempfile::tempdir().unwrap();
    stdout_of(wallet_cli(dir.path()).args(["create", "--chain", "sol"]));
    let output = wallet_cli(dir.path()).args(["copy", "public", "--index", "0"]).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_cli_rejects_bad_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("wallet.toml"), "[mnemonic]\nword_count = 13\n").unwrap();
    let output = wallet_cli(dir.path()).arg("list").output().unwrap();
    assert!(!output.status.success());
}
