//! Configuration loading and the item picker wired to a mock backend.

use std::io::Write;

use serde_json::json;
use sitebook::config::{API_URL_ENV, ClientConfig, ConfigError};
use sitebook::events::{Key, KeyPressEvent};
use sitebook::form::PurchaseOrderLineForm;
use sitebook::geometry::Rect;
use sitebook::typeahead::{SharedLayout, TypeaheadOverlay};
use sitebook::{ApiError, AppContext, EntityId, Item};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.api.base_url = server.uri();
    config.api.max_retries = 0;
    config
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[api]
base_url = "https://sitebook.example.com/api"
timeout_secs = 5

[typeahead]
min_chars = 2
min_width = 300.0
"#
    )
    .unwrap();

    let config = ClientConfig::load(file.path()).unwrap();
    assert_eq!(config.api.base_url, "https://sitebook.example.com/api");
    assert_eq!(config.api.timeout_secs, 5);
    assert_eq!(config.api.max_retries, 3);
    assert_eq!(config.typeahead.min_chars, 2);
    assert_eq!(config.typeahead.options().placement.min_width, 300.0);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let err = ClientConfig::load(&missing).unwrap_err();
    match err {
        ConfigError::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_override_is_validated() {
    let err = ClientConfig::default()
        .with_overrides_from(|name| (name == API_URL_ENV).then(|| "not a url".to_string()))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "api.base_url", .. }));
}

#[tokio::test]
async fn test_built_api_sends_session_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "p1", "name": "Lakeside Villas"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = AppContext::new();
    ctx.session().sign_in("tok-1");
    let api = config_for(&server).build_api(&ctx).unwrap();

    let projects = api.list_projects().await.unwrap();
    assert_eq!(projects[0].id, EntityId::from("p1"));
}

#[tokio::test]
async fn test_project_scoped_call_without_project() {
    let server = MockServer::start().await;
    let ctx = AppContext::new();
    let api = config_for(&server).build_api(&ctx).unwrap();

    let result = api.list_current_purchase_orders().await;
    assert_eq!(result.unwrap_err(), ApiError::NoProjectSelected);
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_item_picker_fills_purchase_order_line() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("search", "ce"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"_id": "i1", "name": "Cement", "unit": "bag", "rate": 650},
                {"_id": "i3", "name": "Cement Board", "unit": "sheet", "rate": 980}
            ]
        })))
        .mount(&server)
        .await;

    let ctx = AppContext::new();
    let config = config_for(&server);
    let api = config.build_api(&ctx).unwrap();

    let layout = SharedLayout::new(Rect::new(0.0, 0.0, 300.0, 32.0));
    let mut picker: TypeaheadOverlay<Item> =
        TypeaheadOverlay::new(layout, config.typeahead.options().input_id("line-0-item"));

    picker.set_query("ce");
    let found = api.search_items(picker.query()).await.unwrap();
    picker.set_candidates(found);
    assert_eq!(picker.filtered().len(), 2);

    let chosen = std::sync::Arc::new(parking_lot::Mutex::new(None));
    let chosen_clone = chosen.clone();
    picker
        .selected
        .connect(move |item: &Item| *chosen_clone.lock() = Some(item.clone()));

    let mut down = KeyPressEvent::new(Key::ArrowDown);
    picker.key_press(&mut down);
    let mut enter = KeyPressEvent::new(Key::Enter);
    picker.key_press(&mut enter);

    let item = chosen.lock().take().unwrap();
    let mut line = PurchaseOrderLineForm::new();
    line.select_item(&item);
    line.quantity = "3".into();

    let validated = line.validate().unwrap();
    assert_eq!(validated.item, Some(EntityId::from("i3")));
    assert_eq!(validated.description, "Cement Board");
    assert_eq!(validated.amount, 2940.0);
    assert!(!picker.is_open());
}
