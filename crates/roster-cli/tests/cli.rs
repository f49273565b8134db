use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ENV_VARS: [&str; 9] = [
    "ROSTER_SMTP_HOST",
    "ROSTER_SMTP_PORT",
    "ROSTER_SMTP_USER",
    "ROSTER_SMTP_PASSWORD",
    "ROSTER_MAIL_FROM",
    "ROSTER_MAIL_TO",
    "ROSTER_LOGO_PATH",
    "ROSTER_OUTPUT_DIR",
    "RUST_LOG",
];

const VALID_FORM: &str = r#"
[team]
name = "Vòlei Test"
sex = "Masculí"
category = "2C"

[[players]]
number = "1"
jersey_number = "7"
first_name = "Pol"
last_name = "Puig"
position = "Central"

[[players]]
number = "2"
jersey_number = "10"
first_name = "Arnau"
last_name = "Soler"
position = "Opost"
"#;

const INCOMPLETE_FORM: &str = r#"
[team]
name = "Vòlei Test"
sex = "Masculí"
category = "2C"

[[players]]
first_name = "Pol"
position = "Central"

[[players]]
first_name = "Arnau"
position = "— Tria —"
"#;

struct Workspace {
    temp: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new(extra_config: &str) -> Self {
        let temp = TempDir::new().expect("temp dir");
        let exports = temp.path().join("exports");
        let config = temp.path().join("config.toml");
        let contents = format!(
            "[export]\noutput_dir = {}\n\n[email]\nto = [\"federacio@example.com\"]\nsmtp_host = \"smtp.example.com\"\n{extra_config}",
            toml_string(&exports)
        );
        fs::write(&config, contents).expect("write config");
        restrict(&config);
        Self { temp, config }
    }

    fn path(&self) -> &Path {
        self.temp.path()
    }

    fn exports(&self) -> PathBuf {
        self.path().join("exports")
    }

    fn write_form(&self, name: &str, body: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, body).expect("write form");
        path
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("roster");
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join("xdg"))
            .args(["--config", self.config.to_str().expect("config path")]);
        cmd
    }

    fn exported_files(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.exports()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|entry| {
                entry
                    .expect("dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}

fn toml_string(path: &Path) -> String {
    format!("{:?}", path.to_str().expect("utf8 path"))
}

#[cfg(unix)]
fn restrict(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).expect("chmod config");
}

#[cfg(not(unix))]
fn restrict(_path: &Path) {}

#[test]
fn submit_rejects_incomplete_rows_and_writes_nothing() {
    let ws = Workspace::new("");
    let form = ws.write_form("form.toml", INCOMPLETE_FORM);

    let output = ws
        .cmd()
        .args(["--json", "submit", form.to_str().expect("form path")])
        .output()
        .expect("run submit");

    assert_eq!(output.status.code(), Some(3), "{output:?}");
    let report: Value = serde_json::from_slice(&output.stdout).expect("parse json");
    assert_eq!(report["status"], "rejected");
    let issues = report["issues"].as_array().expect("issues");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["kind"], "missing_choice");
    assert_eq!(issues[0]["set"], "players");
    assert_eq!(issues[0]["row"], 2);
    assert!(ws.exported_files().is_empty());
}

#[test]
fn submit_without_credentials_saves_and_reports_email_skip() {
    let ws = Workspace::new("");
    let form = ws.write_form("form.toml", VALID_FORM);

    let output = ws
        .cmd()
        .args(["--json", "submit", form.to_str().expect("form path")])
        .output()
        .expect("run submit");

    assert!(output.status.success(), "{output:?}");
    let report: Value = serde_json::from_slice(&output.stdout).expect("parse json");
    assert_eq!(report["status"], "saved");
    assert_eq!(report["players"], 2);
    assert_eq!(report["staff"], 0);
    assert_eq!(report["team"]["name"], "Vòlei Test");
    assert_eq!(report["email"]["sent"], false);
    assert_eq!(report["email"]["message"], "no credentials configured");

    let files = ws.exported_files();
    assert_eq!(files.len(), 1, "{files:?}");
    assert!(files[0].starts_with("volei-test_"));
    assert!(files[0].ends_with(".xlsx"));
}

#[test]
fn submit_writes_requested_formats_and_legacy_log() {
    let ws = Workspace::new("");
    let form = ws.write_form("form.toml", VALID_FORM);
    let log = ws.path().join("shared").join("jugadors_i_staff.csv");

    ws.cmd()
        .args([
            "submit",
            form.to_str().expect("form path"),
            "--format",
            "combined",
            "--format",
            "csv",
            "--legacy-log",
            log.to_str().expect("log path"),
            "--no-notify",
        ])
        .assert()
        .success()
        .stdout(predicates::str::contains("saved: Vòlei Test (2 players, 0 staff)"))
        .stdout(predicates::str::contains("notification skipped"));

    let files = ws.exported_files();
    assert_eq!(files.len(), 3, "{files:?}");
    assert!(files.iter().any(|name| name.ends_with("_combined.xlsx")));
    assert!(files.iter().any(|name| name.ends_with("_team.csv")));
    assert!(files.iter().any(|name| name.ends_with("_players.csv")));
    assert!(!files.iter().any(|name| name.ends_with("_staff.csv")));

    let log_contents = fs::read_to_string(&log).expect("read legacy log");
    assert_eq!(log_contents.lines().count(), 3);
}

#[test]
fn submit_accepts_urlencoded_form_body() {
    let ws = Workspace::new("enabled = false\n");
    let body = "team_name=CV+Girona&team_sex=Femen%C3%AD&team_category=JUN\
        &jugador_nom=Laia&jugador_cognoms=Puig&jugador_posicio=L%C3%ADbero\
        &staff_nom=N%C3%BAria&staff_cognoms=Vila&staff_carrecs=Entrenador%2Fa";
    let form = ws.write_form("form.txt", body);

    let output = ws
        .cmd()
        .args(["--json", "submit", form.to_str().expect("form path")])
        .output()
        .expect("run submit");

    assert!(output.status.success(), "{output:?}");
    let report: Value = serde_json::from_slice(&output.stdout).expect("parse json");
    assert_eq!(report["players"], 1);
    assert_eq!(report["staff"], 1);
    assert_eq!(report["team"]["category"], "JUN");
    assert_eq!(report["email"]["message"], "email notifications disabled");
}

#[test]
fn submit_reads_json_null_cells_as_missing() {
    let ws = Workspace::new("enabled = false\n");
    let form = ws.write_form(
        "form.json",
        r#"{
  "team": {"name": "CV Manlleu", "sex": "Femení", "category": "1C"},
  "players": [{"first_name": "Anna", "last_name": null, "jersey_number": null, "position": "Opost"}],
  "staff": null
}"#,
    );

    let output = ws
        .cmd()
        .args(["--json", "submit", form.to_str().expect("form path")])
        .output()
        .expect("run submit");

    assert!(output.status.success(), "{output:?}");
    let report: Value = serde_json::from_slice(&output.stdout).expect("parse json");
    assert_eq!(report["status"], "saved");
    assert_eq!(report["players"], 1);
    assert_eq!(report["staff"], 0);
}

#[test]
fn check_rejects_non_utf8_file_as_invalid_input() {
    let ws = Workspace::new("");
    let form = ws.path().join("form.txt");
    fs::write(&form, b"team_name=V\xf2lei").expect("write latin-1 form");

    ws.cmd()
        .args(["check", form.to_str().expect("form path")])
        .assert()
        .code(3)
        .stderr(predicates::str::contains("not UTF-8"));
}

#[test]
fn submit_missing_file_is_not_found() {
    let ws = Workspace::new("");
    let missing = ws.path().join("nope.toml");

    ws.cmd()
        .args(["submit", missing.to_str().expect("path")])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("not found"));
}

#[test]
fn check_lists_every_error() {
    let ws = Workspace::new("");
    let form = ws.write_form(
        "form.toml",
        r#"
[team]
name = "  "
sex = "Mixt"

[[staff]]
first_name = "Núria"
"#,
    );

    ws.cmd()
        .args(["check", form.to_str().expect("form path")])
        .assert()
        .code(3)
        .stdout(predicates::str::contains("rejected (4 error(s))"))
        .stdout(predicates::str::contains("team name is required"))
        .stdout(predicates::str::contains("unknown team sex \"Mixt\""))
        .stdout(predicates::str::contains("team category is required"))
        .stdout(predicates::str::contains("Staff row 1: role is required"));
    assert!(ws.exported_files().is_empty());
}

#[test]
fn check_accepts_valid_form() {
    let ws = Workspace::new("");
    let form = ws.write_form("form.toml", VALID_FORM);

    ws.cmd()
        .args(["check", form.to_str().expect("form path")])
        .assert()
        .success()
        .stdout(predicates::str::contains("valid: Vòlei Test (2 players, 0 staff)"));
    assert!(ws.exported_files().is_empty());
}

#[test]
fn template_round_trips_through_check() {
    let ws = Workspace::new("");
    let output = ws
        .cmd()
        .args(["template", "--players", "2", "--staff", "1"])
        .output()
        .expect("run template");
    assert!(output.status.success(), "{output:?}");
    let draft = String::from_utf8(output.stdout).expect("utf8");
    assert!(draft.contains("[[players]]"));
    assert!(draft.contains("— Tria —"));

    let form = ws.write_form("draft.toml", &draft);
    ws.cmd()
        .args(["check", form.to_str().expect("form path")])
        .assert()
        .code(3)
        .stdout(predicates::str::contains("team name is required"));
}

#[test]
fn choices_lists_dropdown_values() {
    let ws = Workspace::new("");
    let output = ws
        .cmd()
        .args(["--json", "choices"])
        .output()
        .expect("run choices");
    assert!(output.status.success(), "{output:?}");
    let choices: Value = serde_json::from_slice(&output.stdout).expect("parse json");
    assert_eq!(choices["placeholder"], "— Tria —");
    assert_eq!(choices["sexes"].as_array().expect("sexes").len(), 2);
    assert!(choices["categories"]
        .as_array()
        .expect("categories")
        .iter()
        .any(|category| category["code"] == "SL" && category["name"] == "Superlliga"));
    assert!(choices["positions"]
        .as_array()
        .expect("positions")
        .iter()
        .any(|position| position == "Líbero"));
}

#[test]
fn config_with_unknown_key_is_invalid_input() {
    let ws = Workspace::new("colour = \"blue\"\n");
    ws.cmd().args(["choices"]).assert().code(3);
}

#[test]
fn completions_skip_config_loading() {
    cargo_bin_cmd!("roster")
        .args(["--config", "/nonexistent/roster.toml", "completions", "bash"])
        .assert()
        .success()
        .stdout(predicates::str::contains("roster"));
}
