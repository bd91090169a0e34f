use anyhow::Result;
use httpmock::prelude::*;
use serde_json::json;
use study_portal::domain::model::BlogPayload;
use study_portal::{AdminConsole, HttpBackend, Navigator, PortalError, Route, Settings};

const USER: &str = r#"{"id":"1","username":"admin"}"#;

fn settings(server: &MockServer, token: Option<&str>) -> Settings {
    Settings::default()
        .with_backend_url(Some(server.base_url()))
        .with_admin_token(token.map(str::to_string))
        .with_admin_user(Some(USER.to_string()))
}

#[tokio::test]
async fn test_customers_listed_with_stored_session() -> Result<()> {
    let server = MockServer::start_async().await;
    let customers_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/admin/customers")
                .header("authorization", "Bearer stored-token");
            then.status(200).json_body(json!({
                "customers": [
                    {
                        "id": "c1",
                        "name": "Asha",
                        "phone_number": "9876543210",
                        "email_address": "asha@example.com",
                        "country": "India",
                        "state": "Delhi",
                        "college_of_interest": "du",
                        "created_at": "2024-05-01T09:00:00Z"
                    },
                    {
                        "id": "c2",
                        "name": "Ben",
                        "phone_number": "5551234567",
                        "country": "Canada"
                    }
                ]
            }));
        })
        .await;

    let settings = settings(&server, Some("stored-token"));
    let mut context = settings.session_context();
    let console = AdminConsole::new(HttpBackend::new(&settings)?);

    let mut navigator = Navigator::new();
    assert_eq!(
        navigator.visit(Route::AdminCustomers, &context),
        &Route::AdminCustomers
    );

    let delhi = console.customers(&mut context, "DELHI").await?;
    assert_eq!(delhi.len(), 1);
    assert_eq!(delhi[0].name, "Asha");

    customers_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_expired_token_logs_admin_out() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/admin/blogs");
            then.status(401).json_body(json!({ "message": "Invalid token" }));
        })
        .await;

    let settings = settings(&server, Some("expired-token"));
    let mut context = settings.session_context();
    let console = AdminConsole::new(HttpBackend::new(&settings)?);

    let payload = BlogPayload {
        title: "Scholarships 2025".to_string(),
        author: "Team".to_string(),
        content: "Deadlines and tips".to_string(),
        ..Default::default()
    };
    let result = console.create_blog(&mut context, &payload).await;

    assert!(matches!(result, Err(PortalError::Unauthorized { .. })));
    assert!(!context.is_authenticated());

    let mut navigator = Navigator::new();
    assert_eq!(
        navigator.visit(Route::AdminBlogs, &context),
        &Route::AdminLogin
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_session_never_reaches_backend() -> Result<()> {
    let server = MockServer::start_async().await;
    let delete_mock = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/admin/colleges/harvard");
            then.status(204);
        })
        .await;

    let settings = settings(&server, None);
    let mut context = settings.session_context();
    let console = AdminConsole::new(HttpBackend::new(&settings)?);

    let result = console.delete_college(&mut context, "harvard").await;

    assert!(matches!(result, Err(PortalError::Unauthorized { .. })));
    assert_eq!(delete_mock.hits_async().await, 0);
    Ok(())
}

#[tokio::test]
async fn test_blog_edit_round() -> Result<()> {
    let server = MockServer::start_async().await;
    let fetch_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/admin/blogs/b1")
                .header("authorization", "Bearer t");
            then.status(200).json_body(json!({
                "blog": {
                    "id": "b1",
                    "title": "Visa tips",
                    "author": "Team",
                    "image_url": null,
                    "content": "Apply early.",
                    "created_at": "2024-03-05T10:00:00Z"
                }
            }));
        })
        .await;
    let update_mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/admin/blogs/b1")
                .header("authorization", "Bearer t")
                .json_body(json!({
                    "title": "Visa tips",
                    "author": "Team",
                    "image_url": "",
                    "content": "Apply early. Bring transcripts."
                }));
            then.status(200).json_body(json!({ "message": "updated" }));
        })
        .await;

    let settings = settings(&server, Some("t"));
    let mut context = settings.session_context();
    let console = AdminConsole::new(HttpBackend::new(&settings)?);

    let blog = console.blog(&mut context, "b1").await?;
    let payload = BlogPayload {
        title: blog.summary.title.clone(),
        author: blog.summary.author.clone(),
        image_url: blog.summary.image_url.clone(),
        content: format!("{} Bring transcripts.", blog.content),
    };
    console.update_blog(&mut context, "b1", &payload).await?;

    fetch_mock.assert_async().await;
    update_mock.assert_async().await;
    assert!(context.is_authenticated());
    Ok(())
}
