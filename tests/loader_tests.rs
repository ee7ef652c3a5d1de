//! Provider and profile loading against a mock backend

mod common;

use common::mocks::{provider_row, MockBackend};
use rstest::rstest;
use serde_json::json;
use swiftfyx_ui::api::{fetch_providers, load_profile, load_providers};
use swiftfyx_ui::backend::postgrest;
use swiftfyx_ui::error::BackendError;
use swiftfyx_ui::providers::{sample_providers, DEFAULT_LANGUAGE};
use swiftfyx_ui::types::ProfileRow;

#[rstest]
#[case(BackendError::Network("connection refused".to_string()))]
#[case(BackendError::Http { status: 500, message: "boom".to_string() })]
#[case(BackendError::Decode("expected array".to_string()))]
#[case(BackendError::NotFound)]
#[tokio::test]
async fn test_fetch_error_falls_back_to_samples(#[case] error: BackendError) {
    let backend = MockBackend::new().with_providers(Err(error));

    let providers = load_providers(&backend).await;

    assert_eq!(providers, sample_providers());
    let names: Vec<_> = providers.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Trevor T.", "Mark Y.", "Ryan B.", "Amanda N."]);
}

#[tokio::test]
async fn test_backend_order_is_preserved() {
    let backend = MockBackend::new().with_providers(Ok(vec![
        provider_row("a", "Lower First", 4.8),
        provider_row("b", "Higher Second", 5.0),
    ]));

    let providers = load_providers(&backend).await;

    let names: Vec<_> = providers.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Lower First", "Higher Second"]);
}

#[test]
fn test_provider_query_asks_for_best_rated_available() {
    let path = postgrest::available_providers().to_path();
    assert!(path.contains("is_available=eq.true"));
    assert!(path.contains("order=rating.desc"));
}

#[tokio::test]
async fn test_sparse_row_gets_defaults() {
    let backend = MockBackend::new().with_providers(Ok(vec![json!({
        "id": 42,
        "business_name": "Sparse Co.",
    })]));

    let providers = fetch_providers(&backend).await.unwrap();

    assert_eq!(providers.len(), 1);
    let provider = &providers[0];
    assert_eq!(provider.id, "42");
    assert_eq!(provider.rating, 0.0);
    assert_eq!(provider.languages, vec![DEFAULT_LANGUAGE.to_string()]);
    assert_eq!(provider.filled_stars(), 0);
}

#[tokio::test]
async fn test_malformed_rows_are_skipped() {
    let backend = MockBackend::new().with_providers(Ok(vec![
        json!("not a row"),
        json!({ "business_name": "Odd Co.", "languages": ["English", null], "specialties": 5 }),
        provider_row("ok", "Kept", 4.0),
    ]));

    let providers = load_providers(&backend).await;

    let names: Vec<_> = providers.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Odd Co.", "Kept"]);
    assert_eq!(providers[0].languages, vec![DEFAULT_LANGUAGE.to_string()]);
    assert!(providers[0].tags.is_empty());
}

#[tokio::test]
async fn test_empty_result_stays_empty() {
    let backend = MockBackend::new().with_providers(Ok(vec![]));
    assert!(load_providers(&backend).await.is_empty());
}

#[tokio::test]
async fn test_profile_found() {
    let backend = MockBackend::new().with_profile(Ok(ProfileRow {
        user_id: Some("user-1".to_string()),
        full_name: Some("Robbie Johnson".to_string()),
        address: Some("  ".to_string()),
        ..ProfileRow::default()
    }));

    let profile = load_profile(&backend, "user-1").await.unwrap();

    assert_eq!(profile.full_name.as_deref(), Some("Robbie Johnson"));
    assert_eq!(profile.address, None);
    assert_eq!(backend.calls().profile_owners, vec!["user-1".to_string()]);
}

#[rstest]
#[case(BackendError::NotFound)]
#[case(BackendError::Network("offline".to_string()))]
#[case(BackendError::Http { status: 401, message: "JWT expired".to_string() })]
#[tokio::test]
async fn test_profile_errors_yield_absence(#[case] error: BackendError) {
    let backend = MockBackend::new().with_profile(Err(error));
    assert_eq!(load_profile(&backend, "user-1").await, None);
}
