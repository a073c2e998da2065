use assert_cmd::Command;
use std::io::Write;

#[test]
fn list_decks_prints_builtins_without_a_tty() {
    let output = Command::cargo_bin("kelime")
        .unwrap()
        .arg("--list-decks")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    for name in ["starter", "animals", "food"] {
        assert!(stdout.contains(name), "missing deck {name} in {stdout}");
    }
}

#[test]
fn missing_deck_file_is_a_fatal_startup_error() {
    Command::cargo_bin("kelime")
        .unwrap()
        .args(["--deck", "/definitely/not/here.csv"])
        .assert()
        .failure();
}

#[test]
fn deck_with_no_valid_cards_is_a_fatal_startup_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "not a pair").unwrap();
    writeln!(file, "a,b,c").unwrap();

    Command::cargo_bin("kelime")
        .unwrap()
        .args(["--deck", path.to_str().unwrap()])
        .assert()
        .failure();
}

#[test]
fn without_a_tty_startup_stops_before_the_game_screen() {
    // Deck loads fine, but a piped stdin can never reach the game loop.
    Command::cargo_bin("kelime").unwrap().assert().failure();
}
