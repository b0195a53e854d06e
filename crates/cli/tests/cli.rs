use assert_cmd::Command;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("bookshelf-cli").unwrap();
    cmd.env("BOOKSHELF_ENV", "local")
        .env("BOOKSHELF_CONFIG_DIR", env!("CARGO_MANIFEST_DIR"));
    cmd
}

#[test]
fn routes_lists_book_operations() {
    let output = cli().arg("routes").assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();

    assert!(stdout.contains("POST    /books"));
    assert!(stdout.contains("GET     /books/{bookId}"));
    assert!(stdout.contains("DELETE  /books/{bookId}"));
    assert!(stdout.contains("GET     /healthz"));
}

#[test]
fn config_prints_effective_settings() {
    let output = cli()
        .env("BOOKSHELF_SERVER__PORT", "9099")
        .arg("config")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    assert!(stdout.contains("environment        = local"));
    assert!(stdout.contains("server.port        = 9099"));
}

#[test]
fn unknown_environment_fails() {
    cli().env("BOOKSHELF_ENV", "qa").arg("config").assert().failure();
}
