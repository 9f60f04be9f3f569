//! Integration tests for the catalog walk
//!
//! These tests use wiremock to serve a small catalog and its detail pages
//! and drive the full load-config, walk, write-JSON cycle end-to-end.

use kvartal::config::load_config;
use kvartal::crawler::scrape;
use kvartal::output::write_listings_json;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Writes a config for the mock server into `dir` and returns its path
fn write_config(dir: &TempDir, base_url: &str, max_pages: u32) -> std::path::PathBuf {
    let config_path = dir.path().join("kvartal.toml");
    let output_path = dir.path().join("listings.json");
    fs::write(
        &config_path,
        format!(
            r#"
name = "mock rentals"

[catalog]
seed-url = "{base_url}/uk/arenda-kvartir/lvov/?page=0"
base-url = "{base_url}"
max-pages = {max_pages}

[selectors]
catalog-entry = "ticket-clear line"
detail-link = "realtyPhoto"
location = "blue"
price = "green size22"
feature-label = "label grey"
feature-value = "indent"

[retry]
delay-secs = 0.1
max-retries = 2

[http]
timeout-secs = 5

[output]
path = "{}"
"#,
            output_path.display()
        ),
    )
    .expect("Failed to write config");
    config_path
}

fn catalog_entry(id: u32, district: &str, price: &str) -> String {
    format!(
        r#"<section class="ticket-clear line clearfix" id="ticket-{id}">
            <a class="realtyPhoto photo-clear" href="/ru/realty-{id}.html">
                <img data-src="https://cdn.example.com/{id}.jpg">
            </a>
            <h3><a class="blue" href="/ru/realty-{id}.html">р-н. {district} вул. Шевченка м. Львів</a></h3>
            <b class="green size22">{price}</b>
        </section>"#
    )
}

fn detail_page(rooms: &str, area: &str) -> String {
    format!(
        r#"<html><body><ul>
            <li><div class="label grey">Кімнат</div><div class="indent">{rooms}</div></li>
            <li><div class="label grey">Площа</div><div class="indent">{area}</div></li>
        </ul></body></html>"#
    )
}

async fn mount_catalog_page(server: &MockServer, page: &str, entries: &[String]) {
    Mock::given(method("GET"))
        .and(path("/uk/arenda-kvartir/lvov/"))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<html><body><div id=\"catalog\">{}</div></body></html>",
            entries.concat()
        )))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_detail(server: &MockServer, id: u32, body: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/uk/realty-{id}.html")))
        .respond_with(body)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_walk_writes_json() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_catalog_page(
        &server,
        "0",
        &[
            catalog_entry(1, "Франківський", "8 000 грн"),
            catalog_entry(2, "Сихівський", "9 500 грн"),
        ],
    )
    .await;
    mount_catalog_page(&server, "1", &[catalog_entry(3, "Личаківський", "12 000 грн")]).await;

    mount_detail(
        &server,
        1,
        ResponseTemplate::new(200).set_body_string(detail_page("1", "32 м²")),
    )
    .await;
    mount_detail(
        &server,
        2,
        ResponseTemplate::new(200).set_body_string(detail_page("2", "54 м²")),
    )
    .await;
    mount_detail(
        &server,
        3,
        ResponseTemplate::new(200).set_body_string(detail_page("3", "70 м²")),
    )
    .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = load_config(&write_config(&dir, &base_url, 2)).expect("Failed to load config");

    let report = scrape(&config).await.expect("Walk failed");

    assert_eq!(report.stats.pages_fetched, 2);
    assert_eq!(report.stats.listings_extracted, 3);
    assert_eq!(report.stats.listings_skipped, 0);

    write_listings_json(std::path::Path::new(&config.output.path), &report)
        .expect("Failed to write output");
    let written: Value = serde_json::from_str(
        &fs::read_to_string(&config.output.path).expect("Failed to read output"),
    )
    .expect("Output is not JSON");

    assert_eq!(written["source"], "mock rentals");
    let listings = written["listings"].as_array().expect("listings array");
    assert_eq!(listings.len(), 3);

    assert_eq!(listings[0]["price"], 8000);
    assert_eq!(listings[0]["img"], "https://cdn.example.com/1.jpg");
    assert_eq!(listings[0]["district"], "Франківський");
    assert_eq!(listings[0]["street"], "Шевченка");
    assert_eq!(listings[0]["Кімнат"], "1");
    assert_eq!(listings[1]["Площа"], "54 м²");
    assert_eq!(listings[2]["price"], 12000);
    assert_eq!(listings[2]["district"], "Личаківський");
}

#[tokio::test]
async fn test_walk_recovers_from_transient_failures() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    // First detail request fails once, then succeeds on retry
    Mock::given(method("GET"))
        .and(path("/uk/realty-1.html"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_detail(
        &server,
        1,
        ResponseTemplate::new(200).set_body_string(detail_page("1", "30 м²")),
    )
    .await;
    // Second listing's detail page never recovers within the retry budget
    mount_detail(&server, 2, ResponseTemplate::new(500)).await;

    mount_catalog_page(
        &server,
        "0",
        &[
            catalog_entry(1, "Галицький", "6 000 грн"),
            catalog_entry(2, "Залізничний", "7 000 грн"),
        ],
    )
    .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = load_config(&write_config(&dir, &base_url, 1)).expect("Failed to load config");

    let report = scrape(&config).await.expect("Walk failed");

    assert_eq!(report.listings.len(), 1);
    assert_eq!(report.listings[0].district, "Галицький");
    assert_eq!(report.stats.listings_skipped, 1);
}

#[tokio::test]
async fn test_walk_ends_when_catalog_page_missing() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_catalog_page(&server, "0", &[catalog_entry(1, "Шевченківський", "5 000 грн")]).await;
    Mock::given(method("GET"))
        .and(path("/uk/arenda-kvartir/lvov/"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/uk/arenda-kvartir/lvov/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_detail(
        &server,
        1,
        ResponseTemplate::new(200).set_body_string(detail_page("1", "25 м²")),
    )
    .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = load_config(&write_config(&dir, &base_url, 5)).expect("Failed to load config");

    let report = scrape(&config).await.expect("Walk failed");

    assert_eq!(report.stats.pages_fetched, 1);
    assert_eq!(report.listings.len(), 1);
}
