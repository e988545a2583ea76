use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::{TempDir, tempdir};

const INDEX: &str = r#"{
    "providers": [
        {
            "addr": { "namespace": "hashicorp", "name": "aws" },
            "description": "Lifecycle management of AWS resources",
            "popularity": 100,
            "versions": [
                { "id": "v5.0.0", "published": "2024-05-01T00:00:00Z" },
                { "id": "v4.0.0", "published": "2023-01-01T00:00:00Z" }
            ]
        },
        {
            "addr": { "namespace": "hashicorp", "name": "google" },
            "description": "Google Cloud",
            "versions": [{ "id": "v6.0.0" }]
        },
        {
            "addr": { "namespace": "nobody", "name": "empty" },
            "versions": []
        }
    ]
}"#;

/// Isolated home: cache and config directories under a temp dir
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self { dir: tempdir()? })
    }

    fn cache_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("cache").join("tofuref")
    }

    /// Seed a cache entry under its flat name
    fn cache(&self, endpoint: &str, body: &str) -> Result<(), Box<dyn std::error::Error>> {
        fs::create_dir_all(self.cache_dir())?;
        fs::write(self.cache_dir().join(endpoint.replace('/', "_")), body)?;
        Ok(())
    }

    fn write_config(&self, contents: &str) -> Result<std::path::PathBuf, Box<dyn std::error::Error>> {
        let path = self.dir.path().join("config.yaml");
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Command with no network: requests go to a closed local port
    fn command(&self) -> Command {
        self.command_with_host("http://127.0.0.1:1")
    }

    fn command_with_host(&self, api_host: &str) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tofuref"));
        cmd.env("XDG_CACHE_HOME", self.dir.path().join("cache"))
            .env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("TOFUREF_API_HOST", api_host)
            .env("TOFUREF_HTTP_REQUEST_TIMEOUT", "1")
            .env_remove("TOFUREF_CONFIG")
            .env_remove("TOFUREF_FORMAT")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[test]
fn version_prints_package_version() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("tofuref"))
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn completion_generates_script() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("tofuref"))
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tofuref"));
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn cache_path_follows_xdg_cache_home() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new()?;

    sandbox
        .command()
        .args(["cache", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(path_str(&sandbox.cache_dir())));
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn cache_status_and_clear() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new()?;
    sandbox.cache("index.json", INDEX)?;
    sandbox.cache("hashicorp/aws/v5.0.0/index.md", "# AWS")?;

    sandbox
        .command()
        .args(["cache", "status", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_entries\": 2"))
        .stdout(predicate::str::contains("\"index_fresh\": true"));

    let output = sandbox
        .command()
        .args(["cache", "status", "--format", "json"])
        .output()?;
    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["data"]["total_entries"], 2);
    assert_eq!(json["meta"]["version"], env!("CARGO_PKG_VERSION"));

    sandbox
        .command()
        .args(["cache", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 2 cache entries"));

    sandbox
        .command()
        .args(["cache", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache was already empty"));
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn providers_served_from_cache_offline() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new()?;
    sandbox.cache("index.json", INDEX)?;
    sandbox.cache("hashicorp/aws/v4.0.0/index.md", "# AWS 4")?;

    let assert = sandbox
        .command()
        .args(["providers", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout)?;
    let rows = json["data"].as_array().expect("data array");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "hashicorp/aws");
    assert_eq!(rows[0]["cached"], "C");
    assert_eq!(rows[1]["cached"], "");
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn providers_search_filters_by_name() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new()?;
    sandbox.cache("index.json", INDEX)?;

    sandbox
        .command()
        .args(["providers", "--search", "goo", "--format", "table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hashicorp/google"))
        .stdout(predicate::str::contains("hashicorp/aws").not());
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn config_file_sets_border_style() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new()?;
    sandbox.cache("index.json", INDEX)?;
    sandbox
        .command()
        .args(["providers", "--format", "table"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("+"));

    let config = sandbox.write_config("theme:\n  borders_style: rounded\nhttp_request_timeout: nope\n")?;

    sandbox
        .command()
        .args(["providers", "--format", "table", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("╭"));
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn use_prints_required_providers_snippet() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new()?;
    sandbox.cache("index.json", INDEX)?;

    sandbox
        .command()
        .args(["use", "hashicorp/aws", "--version", "v4.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("source  = \"hashicorp/aws\""))
        .stdout(predicate::str::contains("version = \"4.0.0\""));
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn unknown_provider_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new()?;
    sandbox.cache("index.json", INDEX)?;

    sandbox
        .command()
        .args(["versions", "nobody/nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown provider: nobody/nothing"));
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn offline_without_cache_fails_cleanly() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new()?;

    sandbox
        .command()
        .arg("providers")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn show_reads_cached_document_offline() -> Result<(), Box<dyn std::error::Error>> {
    let sandbox = Sandbox::new()?;
    sandbox.cache("index.json", INDEX)?;
    sandbox.cache(
        "hashicorp/aws/v5.0.0/index.json",
        r#"{"docs":{"resources":[{"name":"instance"}],"datasources":[{"name":"instance"}]}}"#,
    )?;
    sandbox.cache("hashicorp/aws/v5.0.0/index.md", "# AWS")?;
    sandbox.cache(
        "hashicorp/aws/v5.0.0/datasources/instance.md",
        "---\nsubcategory: EC2\n---\n# Data Source: aws_instance",
    )?;

    sandbox
        .command()
        .args(["show", "hashicorp/aws", "instance", "--kind", "datasource", "--format", "table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Data Source: aws_instance"))
        .stdout(predicate::str::contains("subcategory").not());
    Ok(())
}

#[cfg(target_os = "linux")]
#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn show_fetches_from_registry_and_caches() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let sandbox = Sandbox::new()?;

    let index = server
        .mock("GET", "/index.json")
        .match_header("user-agent", mockito::Matcher::Regex("^tofuref v".to_string()))
        .with_status(200)
        .with_body(INDEX)
        .expect(1)
        .create();
    let _resources = server
        .mock("GET", "/hashicorp/aws/v4.0.0/index.json")
        .with_status(200)
        .with_body(r#"{"docs":{"resources":[{"name":"vpc"}]}}"#)
        .create();
    let _overview = server
        .mock("GET", "/hashicorp/aws/v4.0.0/index.md")
        .with_status(200)
        .with_body("# AWS")
        .create();
    let vpc = server
        .mock("GET", "/hashicorp/aws/v4.0.0/resources/vpc.md")
        .with_status(200)
        .with_body("---\ntitle: vpc\n---\n# aws_vpc")
        .expect(1)
        .create();

    for _ in 0..2 {
        sandbox
            .command_with_host(&server.url())
            .args(["show", "hashicorp/aws", "vpc", "--version", "v4.0.0", "--format", "table"])
            .assert()
            .success()
            .stdout(predicate::str::contains("# aws_vpc"));
    }

    // Second run is served from the cache
    index.assert();
    vpc.assert();
    assert!(sandbox
        .cache_dir()
        .join("hashicorp_aws_v4.0.0_resources_vpc.md")
        .exists());
    Ok(())
}

#[cfg(target_os = "linux")]
#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn missing_document_prints_no_content() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let sandbox = Sandbox::new()?;
    sandbox.cache("index.json", INDEX)?;

    let _resources = server
        .mock("GET", "/hashicorp/google/v6.0.0/index.json")
        .with_status(200)
        .with_body(r#"{"docs":{"resources":[{"name":"bucket"}]}}"#)
        .create();
    let _overview = server
        .mock("GET", "/hashicorp/google/v6.0.0/index.md")
        .with_status(200)
        .with_body("# Google")
        .create();
    let _missing = server
        .mock("GET", "/hashicorp/google/v6.0.0/resources/bucket.md")
        .with_status(500)
        .create();

    sandbox
        .command_with_host(&server.url())
        .args(["show", "hashicorp/google", "bucket", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"content\": \"\""));

    assert!(!sandbox
        .cache_dir()
        .join("hashicorp_google_v6.0.0_resources_bucket.md")
        .exists());
    Ok(())
}
