use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn temp_db_path() -> PathBuf {
    std::env::temp_dir().join(format!("mindkids-e2e-{}.db", uuid::Uuid::new_v4()))
}

fn mindkids(db: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_mindkids"))
        .arg("--db-path")
        .arg(db)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute mindkids");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for mindkids")
}

fn assert_success(output: &Output) -> String {
    assert!(
        output.status.success(),
        "mindkids failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_play_requires_login_then_premium() {
    let db = temp_db_path();
    assert_success(&mindkids(&db, &["create-profile", "Ana"], ""));

    let denied = mindkids(&db, &["play", "color", "--profile", "Ana", "--fast"], "q\n");
    assert!(!denied.status.success());
    assert!(String::from_utf8_lossy(&denied.stderr).contains("Faça login primeiro"));

    assert_success(&mindkids(&db, &["login", "--email", "pai@example.com"], ""));
    let free = mindkids(&db, &["play", "color", "--profile", "Ana", "--fast"], "q\n");
    assert!(!free.status.success());
    assert!(String::from_utf8_lossy(&free.stderr).contains("mindkids upgrade"));

    let stdout = assert_success(&mindkids(&db, &["upgrade"], ""));
    assert!(stdout.contains("R$ 19,90"));
    assert!(stdout.contains("Acesso Premium ativado!"));

    let stdout = assert_success(&mindkids(&db, &["play", "color", "--profile", "Ana", "--fast"], "q\n"));
    assert!(stdout.contains("Aviso Importante"));
    assert!(stdout.contains("Rodada 1/10"));
    assert!(stdout.contains("Jogo encerrado sem salvar."));

    let stdout = assert_success(&mindkids(&db, &["play", "color", "--profile", "Ana", "--fast"], "q\n"));
    assert!(!stdout.contains("Aviso Importante"));

    let _ = std::fs::remove_file(&db);
}

#[test]
fn test_account_commands() {
    let db = temp_db_path();
    let stdout = assert_success(&mindkids(&db, &["whoami"], ""));
    assert!(stdout.contains("Nenhum usuário conectado."));

    let stdout = assert_success(&mindkids(
        &db,
        &["register", "--name", "Carla", "--email", "carla@example.com"],
        "",
    ));
    assert!(stdout.contains("Bem-vindo(a), Carla!"));

    let stdout = assert_success(&mindkids(&db, &["whoami"], ""));
    assert!(stdout.contains("Carla <carla@example.com> - Gratuito"));

    assert_success(&mindkids(&db, &["logout"], ""));
    let stdout = assert_success(&mindkids(&db, &["whoami"], ""));
    assert!(stdout.contains("Nenhum usuário conectado."));

    let _ = std::fs::remove_file(&db);
}

#[test]
fn test_profiles_and_empty_report() {
    let db = temp_db_path();
    assert_success(&mindkids(&db, &["login", "--email", "mae@example.com"], ""));
    assert_success(&mindkids(&db, &["upgrade"], ""));

    let stdout = assert_success(&mindkids(&db, &["profiles"], ""));
    assert!(stdout.contains("Nenhum perfil criado ainda."));

    let blank = mindkids(&db, &["create-profile", "   "], "");
    assert!(!blank.status.success());
    assert!(String::from_utf8_lossy(&blank.stderr).contains("profile name must not be empty"));

    assert_success(&mindkids(&db, &["create-profile", "Davi"], ""));
    let stdout = assert_success(&mindkids(&db, &["profiles"], ""));
    assert!(stdout.contains("Davi"));
    assert!(stdout.contains("0 jogos realizados"));

    let html = db.with_extension("html");
    let stdout = assert_success(&mindkids(
        &db,
        &["report", "Davi", "--html", &html.to_string_lossy()],
        "",
    ));
    assert!(stdout.contains("Nenhum Jogo Realizado"));
    assert!(stdout.contains("nada para imprimir"));
    assert!(!html.exists());

    let _ = std::fs::remove_file(&db);
}

#[test]
fn test_games_and_chat() {
    let db = temp_db_path();
    let stdout = assert_success(&mindkids(&db, &["games"], ""));
    assert!(stdout.contains("Jogo de Sequências [Médio] (pattern)"));

    let stdout = assert_success(&mindkids(&db, &["chat"], "quanto tempo jogar?\nsair\n"));
    assert!(stdout.contains("Luna"));
    assert!(stdout.contains("⏰ Recomendamos sessões de 10-15 minutos"));

    let unknown = mindkids(&db, &["play", "chess", "--profile", "Ana"], "");
    assert!(!unknown.status.success());
    assert!(String::from_utf8_lossy(&unknown.stderr).contains("Jogo desconhecido: chess"));

    let _ = std::fs::remove_file(&db);
}

#[test]
fn test_invalid_override_date() {
    let db = temp_db_path();
    let output = mindkids(&db, &["--override-date", "2025/06/20", "games"], "");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid date format"));
}
