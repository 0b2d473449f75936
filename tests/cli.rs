use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;

#[test]
fn compile_prints_canonical_form() {
    let mut cmd = cargo_bin_cmd!("chainfold");
    cmd.arg("compile")
        .arg("filter{(element>10)}%>%filter{(element<20)}");

    cmd.assert()
        .success()
        .stdout("filter{((element>10)&(element<20))}%>%map{element}\n");
}

#[test]
fn compile_reports_errors_as_output() {
    let mut cmd = cargo_bin_cmd!("chainfold");
    cmd.arg("compile").arg("map{(element>10)}");

    cmd.assert().success().stdout("TYPE ERROR\n");
}

#[test]
fn compile_with_structured_format() {
    let mut cmd = cargo_bin_cmd!("chainfold");
    cmd.arg("compile")
        .arg("map{(element+1)}")
        .arg("--format")
        .arg("ast-json");

    let output_pred =
        predicate::str::contains("\"Map\"").and(predicate::str::contains("\"Constant\": 1"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn structured_format_fails_on_compile_error() {
    let mut cmd = cargo_bin_cmd!("chainfold");
    cmd.arg("compile")
        .arg("map{")
        .arg("--format")
        .arg("canonical-json");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("SYNTAX ERROR"));
}

#[test]
fn unknown_format_is_rejected() {
    let mut cmd = cargo_bin_cmd!("chainfold");
    cmd.arg("compile")
        .arg("map{element}")
        .arg("--format")
        .arg("canonical-xml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Format error"));
}

#[test]
fn no_simplify_only_folds() {
    let mut cmd = cargo_bin_cmd!("chainfold");
    cmd.arg("compile")
        .arg("map{(element+10)}%>%filter{(element>10)}")
        .arg("--no-simplify");

    cmd.assert()
        .success()
        .stdout("filter{((element+10)>10)}%>%map{(element+10)}\n");
}

#[test]
fn config_file_sets_the_format() {
    let mut config = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    writeln!(config, "[output]\nformat = \"ast-simple\"").unwrap();

    let mut cmd = cargo_bin_cmd!("chainfold");
    cmd.arg("compile")
        .arg("map{ (element + 1) }")
        .arg("--config")
        .arg(config.path());

    cmd.assert().success().stdout("map{(element+1)}\n");
}

#[test]
fn missing_config_file_fails() {
    let mut cmd = cargo_bin_cmd!("chainfold");
    cmd.arg("compile")
        .arg("map{element}")
        .arg("--config")
        .arg("/nonexistent/chainfold.toml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn execute_processes_each_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chains.txt");
    std::fs::write(
        &path,
        "map{(element*element)}\n\nfilter{(element>0)}%>%filter{(element<0)}\n(76 + 21)\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("chainfold");
    cmd.current_dir(dir.path()).arg("execute").arg(&path);

    cmd.assert().success().stdout(
        "filter{(element=element)}%>%map{(element*element)}\n\
         filter{(1=0)}%>%map{element}\n\
         SYNTAX ERROR\n",
    );
}

#[test]
fn compile_with_yaml_format() {
    let mut cmd = cargo_bin_cmd!("chainfold");
    cmd.arg("compile")
        .arg("map{(element+1)}%>%filter{(element>2)}")
        .arg("--format")
        .arg("ast-yaml");

    let output_pred = predicate::str::contains("Chain:")
        .and(predicate::str::contains("Constant: 2"))
        .and(predicate::str::contains("Logic: Gt"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn execute_reports_failing_lines_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chains.txt");
    std::fs::write(&path, "map{element}\nmap{\nfilter{(element>1)}\n").unwrap();

    let mut cmd = cargo_bin_cmd!("chainfold");
    cmd.current_dir(dir.path())
        .arg("execute")
        .arg(&path)
        .arg("--format")
        .arg("ast-simple");

    cmd.assert()
        .failure()
        .stdout("map{element}\nfilter{(element>1)}\n")
        .stderr(predicate::str::contains(":2: SYNTAX ERROR"));
}

#[test]
fn fatal_errors_are_reported_once() {
    let mut cmd = cargo_bin_cmd!("chainfold");
    cmd.arg("compile")
        .arg("map{element}")
        .arg("--format")
        .arg("canonical-xml");

    let once = predicate::function(|stderr: &str| stderr.matches("Format error").count() == 1);
    cmd.assert().failure().stderr(once);
}

#[test]
fn list_formats_shows_every_view() {
    let mut cmd = cargo_bin_cmd!("chainfold");
    cmd.arg("list-formats");

    let output_pred = predicate::str::contains("canonical-simple")
        .and(predicate::str::contains("ast-yaml"))
        .and(predicate::str::contains("token-json"));

    cmd.assert().success().stdout(output_pred);
}
