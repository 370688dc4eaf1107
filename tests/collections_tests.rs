use pocketbase_provision::auth::AdminSession;
use pocketbase_provision::collections::{lookup_users_id, CollectionId};
use pocketbase_provision::prelude::*;
use pocketbase_provision::schema;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> PocketBase {
    PocketBase::new(Config::new(&server.uri()).unwrap()).unwrap()
}

async fn mount_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/collections"))
        .and(query_param("perPage", "500"))
        .and(header("Authorization", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "perPage": 500,
            "totalItems": 3,
            "items": [
                {"id": "_pb_users_auth_", "name": "users", "type": "auth", "schema": []},
                {"id": "second_users", "name": "users", "type": "base", "schema": []},
                {"id": "msg1", "name": "messages", "type": "base", "schema": []}
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_auth_with_password_returns_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admins/auth-with-password"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok",
            "admin": {"id": "a1", "email": "admin@test.io", "created": "2024-01-01 00:00:00.000Z"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pb = client(&server);
    let session = pb
        .admins()
        .auth_with_password(&Credentials::new("admin@test.io", "secret123"))
        .await
        .unwrap();

    assert_eq!(session.token(), "tok");
    assert_eq!(session.admin.unwrap().id, "a1");
}

#[tokio::test]
async fn test_auth_without_token_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admins/auth-with-password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"admin": null})))
        .mount(&server)
        .await;

    let pb = client(&server);
    let err = pb
        .admins()
        .auth_with_password(&Credentials::new("admin@test.io", "secret123"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MissingToken));
}

#[tokio::test]
async fn test_find_by_name_takes_first_match() {
    let server = MockServer::start().await;
    mount_listing(&server).await;

    let pb = client(&server);
    let collections = pb.collections(AdminSession::new("tok", None));

    let all = collections.list().await.unwrap();
    assert_eq!(all.len(), 3);

    let users = collections.find_by_name("users").await.unwrap().unwrap();
    assert_eq!(users.id, CollectionId::new("_pb_users_auth_"));
    assert_eq!(users.kind.as_deref(), Some("auth"));
    assert!(collections.find_by_name("slots").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_failure_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/collections"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let pb = client(&server);
    let err = pb
        .collections(AdminSession::new("tok", None))
        .list()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api { status: 401, ref body } if body == "unauthorized"));
}

#[tokio::test]
async fn test_delete_accepts_only_200_and_204() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/collections/ok200"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/collections/ok204"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/collections/accepted"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let pb = client(&server);
    let collections = pb.collections(AdminSession::new("tok", None));

    assert!(collections.delete(&CollectionId::new("ok200")).await.is_ok());
    assert!(collections.delete(&CollectionId::new("ok204")).await.is_ok());
    let err = collections.delete(&CollectionId::new("accepted")).await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 202, .. }));
}

#[tokio::test]
async fn test_create_returns_server_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/collections"))
        .and(header("Authorization", "tok"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "new_users",
            "name": "users",
            "type": "auth",
            "system": false,
            "schema": [],
            "listRule": "@request.auth.id != \"\""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pb = client(&server);
    let record = pb
        .collections(AdminSession::new("tok", None))
        .create(&schema::users())
        .await
        .unwrap();

    assert_eq!(record.id.as_str(), "new_users");
    assert_eq!(record.name, "users");
}

#[tokio::test]
async fn test_lookup_users_id_writes_file() {
    let server = MockServer::start().await;
    mount_listing(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("users_id.txt");

    let pb = client(&server);
    let collections = pb.collections(AdminSession::new("tok", None));
    let mut out = Vec::new();
    let id = lookup_users_id(&collections, &file, &mut out).await.unwrap();

    assert_eq!(id, Some(CollectionId::new("_pb_users_auth_")));
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "_pb_users_auth_");

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Users collection ID: _pb_users_auth_\n"));
    assert!(text.contains(&format!("Saved to {}", file.display())));
}

#[tokio::test]
async fn test_lookup_without_users_leaves_no_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/collections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("users_id.txt");

    let pb = client(&server);
    let collections = pb.collections(AdminSession::new("tok", None));

    let mut out = Vec::new();
    assert_eq!(lookup_users_id(&collections, &file, &mut out).await.unwrap(), None);
    assert!(!file.exists());
    assert!(String::from_utf8(out).unwrap().contains("No users collection found"));
}

#[tokio::test]
async fn test_unusable_token_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/collections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(0)
        .mount(&server)
        .await;

    let pb = client(&server);
    let collections = pb.collections(AdminSession::new("tok\nsplit", None));

    assert!(matches!(collections.list().await, Err(Error::InvalidToken)));
    assert!(matches!(
        collections.delete(&CollectionId::new("c1")).await,
        Err(Error::InvalidToken)
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}
