//! Shared helpers: a wiremock server posing as the repository contents API.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use showcase_core::{CatalogLoader, ProjectDescriptor, ShowcaseConfig, SourceConfig};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const OWNER: &str = "acme";
pub const REPO: &str = "gallery";
pub const BRANCH: &str = "main";

/// Request path of the contents endpoint for a repository path.
pub fn contents_path(repo_path: &str) -> String {
    format!(
        "/repos/{OWNER}/{REPO}/contents/{}",
        repo_path.replace(' ', "%20")
    )
}

pub fn config(server: &MockServer) -> ShowcaseConfig {
    ShowcaseConfig {
        source: SourceConfig {
            api_base: server.uri(),
            owner: OWNER.to_string(),
            repo: REPO.to_string(),
            branch: BRANCH.to_string(),
            timeout_secs: 5,
            ..SourceConfig::default()
        },
        ..ShowcaseConfig::default()
    }
}

pub fn loader(server: &MockServer) -> CatalogLoader {
    CatalogLoader::from_config(&config(server)).expect("loader from config")
}

pub fn dir(name: &str, repo_path: &str) -> Value {
    json!({
        "name": name,
        "path": repo_path,
        "type": "dir",
        "sha": "0000000000000000000000000000000000000000",
        "size": 0,
    })
}

pub fn file(name: &str, repo_path: &str) -> Value {
    json!({
        "name": name,
        "path": repo_path,
        "type": "file",
        "size": 12,
    })
}

pub fn descriptor(name: &str, description: &str, url: &str) -> ProjectDescriptor {
    ProjectDescriptor {
        name: name.to_string(),
        description: description.to_string(),
        url: url.to_string(),
    }
}

pub async fn mount_dir(server: &MockServer, repo_path: &str, entries: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(contents_path(repo_path)))
        .and(query_param("ref", BRANCH))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(entries)))
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, repo_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(contents_path(repo_path)))
        .respond_with(
            ResponseTemplate::new(status).set_body_json(json!({"message": "Not Found"})),
        )
        .mount(server)
        .await;
}

/// Serve `content` as the base64 field of a file envelope.
pub async fn mount_file(server: &MockServer, repo_path: &str, content: &str) {
    let name = repo_path.rsplit('/').next().unwrap_or(repo_path);
    Mock::given(method("GET"))
        .and(path(contents_path(repo_path)))
        .and(query_param("ref", BRANCH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": name,
            "path": repo_path,
            "type": "file",
            "encoding": "base64",
            "content": content,
        })))
        .mount(server)
        .await;
}

/// Serve a descriptor the way the hosting API does: base64 wrapped at 60
/// columns.
pub async fn mount_descriptor(server: &MockServer, repo_path: &str, descriptor: &ProjectDescriptor) {
    let encoded = STANDARD.encode(serde_json::to_vec(descriptor).expect("descriptor json"));
    let wrapped = encoded
        .as_bytes()
        .chunks(60)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join("\n");
    mount_file(server, repo_path, &wrapped).await;
}
