use assert_cmd::Command;
use predicates::prelude::*;
use regex::Regex;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Command isolated from the user's global config and environment.
fn cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agent-catalog"));
    cmd.env("HOME", home.path())
        .env_remove("AGENT_CATALOG_ROOT")
        .env_remove("AGENT_CATALOG_LOG")
        .env_remove("AGENT_CATALOG_DENY_WARNINGS")
        .env_remove("AGENT_CATALOG_STRICT");
    cmd
}

fn corpus() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "research/market-research.md",
        "---\nname: market-research\ndescription: Analyzes markets\ntools: Read, WebSearch\n---\nBody\n",
    );
    write(
        temp.path(),
        "development/frontend-developer.md",
        "---\nname: frontend-developer\ndescription: Builds interfaces\n---\nBody\n",
    );
    write(temp.path(), "README.md", "# Agents\n");
    temp
}

#[test]
fn test_help_output() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Validate agent definition files and render their catalog",
        ))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_output() {
    let home = TempDir::new().unwrap();
    cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("agent-catalog "));
}

#[test]
fn test_validate_clean_corpus() {
    let home = TempDir::new().unwrap();
    let root = corpus();

    cmd(&home)
        .arg("validate")
        .arg(root.path())
        .assert()
        .success()
        .stdout("frontend-developer  Builds interfaces\nmarket-research     Analyzes markets\n")
        .stderr(predicate::str::contains("2 agent(s) valid"));
}

#[test]
fn test_validate_exits_non_zero_on_errors() {
    let home = TempDir::new().unwrap();
    let root = corpus();
    write(root.path(), "empty.md", "");
    write(
        root.path(),
        "zz-dup.md",
        "---\nname: market-research\ndescription: Copy\n---\n",
    );

    let output = cmd(&home)
        .arg("validate")
        .arg(root.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("market-research     Analyzes markets"))
        .get_output()
        .clone();

    let stderr = String::from_utf8_lossy(&output.stderr);
    let line = Regex::new(r"(?m)^error: .+\.md: ").unwrap();
    assert_eq!(line.find_iter(&stderr).count(), 2, "stderr: {}", stderr);
    assert!(stderr.contains("document is empty"));
    assert!(stderr.contains("duplicate identifier 'market-research'"));
    assert!(stderr.contains("Validation failed with 2 error(s)"));
}

#[test]
fn test_validate_warning_only_succeeds_unless_denied() {
    let home = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    write(
        root.path(),
        "a.md",
        "---\nname: a\ndescription: b\ntools: Read, FooBar\n---\n",
    );

    cmd(&home)
        .arg("validate")
        .arg(root.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: "))
        .stderr(predicate::str::contains("unknown tool 'FooBar'"));

    cmd(&home)
        .args(["validate", "--deny-warnings"])
        .arg(root.path())
        .assert()
        .code(1);
}

#[test]
fn test_validate_markdown_format() {
    let home = TempDir::new().unwrap();
    let root = corpus();

    cmd(&home)
        .args(["validate", "--format", "markdown"])
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("## Agents (2)"))
        .stdout(predicate::str::contains(
            "| `market-research` | Analyzes markets | Read, WebSearch |",
        ));
}

#[test]
fn test_validate_json_format() {
    let home = TempDir::new().unwrap();
    let root = corpus();

    let output = cmd(&home)
        .args(["validate", "--format", "json"])
        .arg(root.path())
        .assert()
        .success()
        .get_output()
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["agents"].as_array().unwrap().len(), 2);
    assert_eq!(value["agents"][1]["name"], "market-research");
}

#[test]
fn test_validate_is_idempotent() {
    let home = TempDir::new().unwrap();
    let root = corpus();

    let run = || {
        cmd(&home)
            .args(["validate", "--format", "json"])
            .arg(root.path())
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_list_ignores_errors_for_exit_code() {
    let home = TempDir::new().unwrap();
    let root = corpus();
    write(root.path(), "broken.md", "---\nname: broken\n");

    cmd(&home)
        .arg("list")
        .arg(root.path())
        .assert()
        .success()
        .stdout("frontend-developer  Builds interfaces\nmarket-research     Analyzes markets\n");
}

#[test]
fn test_root_from_environment() {
    let home = TempDir::new().unwrap();
    let root = corpus();

    cmd(&home)
        .arg("list")
        .env("AGENT_CATALOG_ROOT", root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("frontend-developer"));
}

#[test]
fn test_missing_root_fails() {
    let home = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();

    cmd(&home)
        .arg("list")
        .arg(root.path().join("absent"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Discovery root not found"));
}

#[test]
fn test_root_config_strict_fields() {
    let home = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    write(
        root.path(),
        "a.md",
        "---\nname: a\ndescription: b\ncolor: blue\n---\n",
    );

    cmd(&home).arg("validate").arg(root.path()).assert().success();

    write(
        root.path(),
        ".agent-catalog.toml",
        "[schema]\nstrict_fields = true\n",
    );
    cmd(&home)
        .arg("validate")
        .arg(root.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown field 'color'"));
}

#[test]
fn test_explicit_config_required_sections() {
    let home = TempDir::new().unwrap();
    let root = corpus();
    let config = home.path().join("lint.toml");
    fs::write(&config, "[lint]\nrequired_sections = [\"Methodology\"]\n").unwrap();

    cmd(&home)
        .args(["validate", "--deny-warnings", "--config"])
        .arg(&config)
        .arg(root.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing section heading 'Methodology'"));
}

#[test]
fn test_invalid_config_fails() {
    let home = TempDir::new().unwrap();
    let root = corpus();
    write(root.path(), ".agent-catalog.toml", "[schema\n");

    cmd(&home)
        .arg("list")
        .arg(root.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config parse error"));
}

#[test]
fn test_config_show() {
    let home = TempDir::new().unwrap();
    let root = corpus();

    cmd(&home)
        .args(["config", "show"])
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[discovery]"))
        .stdout(predicate::str::contains("README.md"));
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    let home = TempDir::new().unwrap();
    cmd(&home).arg("frobnicate").assert().code(2);
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let home = TempDir::new().unwrap();
    let root = corpus();

    cmd(&home)
        .args(["-v", "list"])
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("DEBUG").not())
        .stderr(predicate::str::contains("registry built"));
}

#[test]
fn test_description_text_is_kept_verbatim() {
    let home = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    write(
        root.path(),
        "a.md",
        "---\nname: issue-triager\ndescription: Use this agent when: issue #42 needs triage\n---\n",
    );

    cmd(&home)
        .arg("validate")
        .arg(root.path())
        .assert()
        .success()
        .stdout("issue-triager  Use this agent when: issue #42 needs triage\n");
}

#[cfg(unix)]
#[test]
fn test_dangling_link_does_not_abort_run() {
    let home = TempDir::new().unwrap();
    let root = corpus();
    std::os::unix::fs::symlink(root.path().join("missing.md"), root.path().join("dangling.md"))
        .unwrap();
    write(
        root.path(),
        ".agent-catalog.toml",
        "[discovery]\nfollow_links = true\n",
    );

    cmd(&home)
        .arg("validate")
        .arg(root.path())
        .assert()
        .code(1)
        .stdout("frontend-developer  Builds interfaces\nmarket-research     Analyzes markets\n")
        .stderr(predicate::str::contains("dangling.md: "))
        .stderr(predicate::str::contains("Validation failed with 1 error(s)"));
}

#[test]
fn test_root_config_replaces_global_extensions() {
    let home = TempDir::new().unwrap();
    let root = corpus();
    fs::write(
        home.path().join(".agent-catalog.toml"),
        "[discovery]\nextensions = [\"markdown\"]\n",
    )
    .unwrap();

    cmd(&home)
        .arg("list")
        .arg(root.path())
        .assert()
        .success()
        .stdout("");

    write(
        root.path(),
        ".agent-catalog.toml",
        "[discovery]\nextensions = [\"md\"]\n",
    );
    cmd(&home)
        .arg("list")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("market-research"));
}
