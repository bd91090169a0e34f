use anyhow::Result;
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;
use study_portal::domain::model::InterestForm;
use study_portal::{
    CacheKey, CachedCatalog, CatalogBackend, HttpBackend, PortalError, RefetchPolicy, Settings,
};

fn backend(server: &MockServer) -> Result<HttpBackend> {
    let settings = Settings::default().with_backend_url(Some(server.base_url()));
    Ok(HttpBackend::new(&settings)?)
}

#[tokio::test]
async fn test_countries_and_country_detail() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/countries");
            then.status(200).json_body(json!({
                "countries": [
                    { "id": "uk", "name": "United Kingdom", "flag_image": "https://cdn.example.com/uk.svg" },
                    { "id": "ca", "name": "Canada", "flag_image": null }
                ]
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/countries/uk");
            then.status(200).json_body(json!({
                "country": { "name": "United Kingdom", "body": "# Why the UK\\n\\nWorld-class universities." }
            }));
        })
        .await;

    let backend = backend(&server)?;

    let countries = backend.fetch_countries().await?;
    assert_eq!(countries.len(), 2);
    assert_eq!(countries[1].flag_image, "");

    let uk = backend.fetch_country("uk").await?;
    assert_eq!(uk.id, "uk");
    assert_eq!(
        uk.normalized_body(),
        "# Why the UK\n\nWorld-class universities."
    );
    Ok(())
}

#[tokio::test]
async fn test_blogs_and_published_date() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/blogs");
            then.status(200).json_body(json!({
                "blogs": [
                    {
                        "id": "b1",
                        "title": "Visa tips",
                        "author": "Team",
                        "image_url": "https://cdn.example.com/b1.jpg",
                        "created_at": "2024-03-05T10:00:00Z"
                    }
                ]
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/blogs/missing");
            then.status(404).json_body(json!({ "message": "Blog not found" }));
        })
        .await;

    let backend = backend(&server)?;

    let blogs = backend.fetch_blogs().await?;
    assert_eq!(blogs[0].title, "Visa tips");
    assert_eq!(
        blogs[0].published_on().map(|d| d.to_string()),
        Some("2024-03-05".to_string())
    );

    let missing = backend.fetch_blog("missing").await;
    assert!(matches!(missing, Err(PortalError::NotFound { .. })));
    Ok(())
}

#[tokio::test]
async fn test_interest_submission_failure_uses_fallback_message() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/customers");
            then.status(502).body("<html>Bad Gateway</html>");
        })
        .await;

    let form = InterestForm {
        name: "Asha".to_string(),
        phone_number: "+91 98765 43210".to_string(),
        email_address: "asha@example.com".to_string(),
        ..Default::default()
    };
    let err = backend(&server)?
        .submit_interest(&form)
        .await
        .expect_err("502 should fail");

    assert_eq!(err.user_friendly_message(), "Failed to submit interest form");
    assert!(err.is_retryable());
    Ok(())
}

#[tokio::test]
async fn test_ttl_cache_refetches_after_expiry() -> Result<()> {
    let server = MockServer::start_async().await;
    let blogs_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/blogs");
            then.status(200).json_body(json!({ "blogs": [] }));
        })
        .await;

    let catalog = CachedCatalog::new(
        backend(&server)?,
        RefetchPolicy::Ttl(Duration::from_millis(100)),
    );

    catalog.fetch_blogs().await?;
    catalog.fetch_blogs().await?;
    assert_eq!(blogs_mock.hits_async().await, 1);
    assert!(catalog.is_fresh(CacheKey::Blogs).await);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(!catalog.is_fresh(CacheKey::Blogs).await);

    catalog.fetch_blogs().await?;
    assert_eq!(blogs_mock.hits_async().await, 2);
    Ok(())
}

#[tokio::test]
async fn test_request_timeout_applies() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/countries");
            then.status(200)
                .delay(Duration::from_millis(1500))
                .json_body(json!({ "countries": [] }));
        })
        .await;

    let mut settings = Settings::default().with_backend_url(Some(server.base_url()));
    settings.timeout = Some(Duration::from_secs(1));
    let backend = HttpBackend::new(&settings)?;

    let err = backend
        .fetch_countries()
        .await
        .expect_err("request should time out");
    assert!(matches!(err, PortalError::ApiError(_)));
    assert!(err.is_retryable());
    Ok(())
}
