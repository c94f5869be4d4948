use pretty_assertions::assert_eq;
use showcase_core::{
    Browser, CATEGORIES_ERROR_MESSAGE, PROJECTS_ERROR_MESSAGE, SelectOutcome, Selection,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::support::{
    contents_path, descriptor, dir, file, loader, mount_descriptor, mount_dir, mount_file,
    mount_status,
};

async fn mount_tools_category(server: &MockServer) {
    mount_dir(server, "categories", vec![dir("Tools", "categories/tools")]).await;
    mount_dir(
        server,
        "categories/tools",
        vec![dir("alpha", "categories/tools/alpha")],
    )
    .await;
}

#[tokio::test]
async fn single_project_renders_one_card() {
    let server = MockServer::start().await;
    mount_tools_category(&server).await;
    mount_descriptor(
        &server,
        "categories/tools/alpha/info.json",
        &descriptor("Alpha", "A tool", "https://x/alpha"),
    )
    .await;

    let browser = Browser::new(loader(&server));
    let outcome = browser.start().await;

    assert_eq!(outcome, Some(SelectOutcome::Loaded { cards: 1, failures: 0 }));
    let page = browser.page().await;
    assert_eq!(page.cards(), &[descriptor("Alpha", "A tool", "https://x/alpha")]);

    let html = page.to_html("acme/gallery");
    assert!(html.contains("<h3>Alpha</h3>"));
    assert!(html.contains("<p>A tool</p>"));
    assert!(html.contains("<a href=\"https://x/alpha\" target=\"_blank\""));
}

#[tokio::test]
async fn descriptor_404_renders_nothing_and_logs_once() {
    let server = MockServer::start().await;
    mount_tools_category(&server).await;
    mount_status(&server, "categories/tools/alpha/info.json", 404).await;

    let browser = Browser::new(loader(&server));
    browser.start().await;

    let page = browser.page().await;
    assert!(page.cards().is_empty());
    assert_eq!(page.diagnostics.len(), 1);
    assert_eq!(page.projects_message(), None);
    assert_eq!(page.categories_message(), None);
}

#[tokio::test]
async fn category_rows_exclude_files_and_keep_order() {
    let server = MockServer::start().await;
    mount_dir(
        &server,
        "categories",
        vec![
            file("README.md", "categories/README.md"),
            dir("Games", "categories/Games"),
            file("index.json", "categories/index.json"),
            dir("CLI", "categories/CLI"),
            dir("Web", "categories/Web"),
        ],
    )
    .await;
    mount_dir(&server, "categories/Games", vec![]).await;

    let browser = Browser::new(loader(&server));
    browser.start().await;

    let page = browser.page().await;
    let rows: Vec<(&str, &str)> = page
        .category_rows()
        .iter()
        .map(|row| (row.name.as_str(), row.path.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Games", "categories/Games"),
            ("CLI", "categories/CLI"),
            ("Web", "categories/Web"),
        ]
    );
    assert_eq!(
        browser.selection().await,
        Selection::CategorySelected("categories/Games".to_string())
    );
}

#[tokio::test]
async fn root_listing_failure_shows_exactly_one_message() {
    let server = MockServer::start().await;
    mount_status(&server, "categories", 404).await;

    let browser = Browser::new(loader(&server));
    assert_eq!(browser.start().await, None);

    let page = browser.page().await;
    assert_eq!(page.categories_message(), Some(CATEGORIES_ERROR_MESSAGE));
    assert!(page.category_rows().is_empty());

    let html = page.to_html("acme/gallery");
    assert_eq!(html.matches(CATEGORIES_ERROR_MESSAGE).count(), 1);
    assert!(!html.contains("<li"));
}

#[tokio::test]
async fn broken_descriptors_do_not_hide_siblings() {
    let server = MockServer::start().await;
    mount_dir(&server, "categories", vec![dir("Tools", "categories/tools")]).await;
    mount_dir(
        &server,
        "categories/tools",
        vec![
            dir("missing", "categories/tools/missing"),
            dir("garbled", "categories/tools/garbled"),
            dir("alpha", "categories/tools/alpha"),
            dir("yaml", "categories/tools/yaml"),
            dir("beta", "categories/tools/beta"),
        ],
    )
    .await;
    mount_status(&server, "categories/tools/missing/info.json", 404).await;
    mount_file(&server, "categories/tools/garbled/info.json", "@@not-base64@@").await;
    mount_file(&server, "categories/tools/yaml/info.json", "bmFtZTogWWFtbA==").await;
    mount_descriptor(
        &server,
        "categories/tools/alpha/info.json",
        &descriptor("Alpha", "A tool", "https://x/alpha"),
    )
    .await;
    mount_descriptor(
        &server,
        "categories/tools/beta/info.json",
        &descriptor("Beta", "Another tool", "https://x/beta"),
    )
    .await;

    let browser = Browser::new(loader(&server));
    let outcome = browser.start().await;

    assert_eq!(outcome, Some(SelectOutcome::Loaded { cards: 2, failures: 3 }));
    let page = browser.page().await;
    let names: Vec<&str> = page.cards().iter().map(|card| card.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
    assert_eq!(page.diagnostics.len(), 3);
}

#[tokio::test]
async fn category_listing_failure_degrades_project_area() {
    let server = MockServer::start().await;
    mount_dir(&server, "categories", vec![dir("Tools", "categories/tools")]).await;
    mount_status(&server, "categories/tools", 500).await;

    let browser = Browser::new(loader(&server));
    assert_eq!(browser.start().await, Some(SelectOutcome::Failed));

    let page = browser.page().await;
    assert_eq!(page.projects_message(), Some(PROJECTS_ERROR_MESSAGE));
    assert_eq!(page.category_rows().len(), 1);
    assert!(page.category_rows()[0].active);
}

#[tokio::test]
async fn reselecting_fetches_again_and_keeps_no_stale_cards() {
    let server = MockServer::start().await;
    mount_dir(&server, "categories", vec![dir("Tools", "categories/tools")]).await;
    Mock::given(method("GET"))
        .and(path(contents_path("categories/tools")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([dir("alpha", "categories/tools/alpha")])),
        )
        .expect(2)
        .mount(&server)
        .await;
    mount_descriptor(
        &server,
        "categories/tools/alpha/info.json",
        &descriptor("Alpha", "A tool", "https://x/alpha"),
    )
    .await;

    let browser = Browser::new(loader(&server));
    browser.start().await;
    let outcome = browser.select("categories/tools").await;

    assert_eq!(outcome, SelectOutcome::Loaded { cards: 1, failures: 0 });
    assert_eq!(browser.page().await.cards().len(), 1);
    server.verify().await;
}
