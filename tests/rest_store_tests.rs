use httpmock::prelude::*;

use institute_registry::domain::model::{
    DepartmentDraft, InstituteCategory, NewInstitute, RowMap,
};
use institute_registry::domain::ports::RecordStore;
use institute_registry::{RegistryError, RestDirectory};

fn new_institute() -> NewInstitute {
    NewInstitute {
        name: "Acme".to_string(),
        email: "a@b.com".to_string(),
        category: InstituteCategory::College,
    }
}

#[tokio::test]
async fn create_institute_posts_payload_and_returns_stored_record() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/institutes")
            .header("apikey", "secret")
            .header("authorization", "Bearer secret")
            .json_body(serde_json::json!({
                "name": "Acme",
                "email": "a@b.com",
                "category": "college"
            }));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "id": "7f2c",
                "name": "Acme",
                "email": "a@b.com",
                "category": "college",
                "created_at": "2026-08-20T12:00:00Z"
            }));
    });

    let store = RestDirectory::new(server.base_url(), Some("secret".to_string()));
    let institute = store.create_institute(&new_institute()).await.unwrap();

    mock.assert();
    assert_eq!(institute.id, "7f2c");
    assert_eq!(institute.category, InstituteCategory::College);
    assert!(institute.created_at.is_some());
}

#[tokio::test]
async fn store_rejection_on_create_is_a_validation_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/institutes");
        then.status(409).body("duplicate email");
    });

    let store = RestDirectory::new(server.base_url(), None);
    let err = store.create_institute(&new_institute()).await.unwrap_err();

    assert!(matches!(err, RegistryError::Validation { .. }));
    assert!(err.to_string().contains("duplicate email"));
}

#[tokio::test]
async fn store_outage_on_create_is_a_persistence_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/institutes");
        then.status(503);
    });

    let store = RestDirectory::new(server.base_url(), None);
    let err = store.create_institute(&new_institute()).await.unwrap_err();
    assert!(matches!(err, RegistryError::Persistence { .. }));
}

#[tokio::test]
async fn list_institutes_decodes_the_collection() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/institutes");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"id": "1", "name": "Acme", "email": "a@b.com", "category": "college"},
                {"id": "2", "name": "Umbra", "email": "u@b.com", "category": "university"}
            ]));
    });

    let store = RestDirectory::new(server.base_url(), None);
    let institutes = store.list_institutes().await.unwrap();

    mock.assert();
    assert_eq!(institutes.len(), 2);
    assert_eq!(institutes[1].category, InstituteCategory::University);
}

#[tokio::test]
async fn list_departments_filters_by_institute_id() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/departments")
            .query_param("institute_id", "inst-1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {
                    "id": "d1",
                    "institute_id": "inst-1",
                    "name": "Physics",
                    "metadata": {"Department": "Physics", "Head": "Dr. Wu"}
                }
            ]));
    });

    let store = RestDirectory::new(server.base_url(), None);
    let departments = store.list_departments("inst-1").await.unwrap();

    mock.assert();
    assert_eq!(departments.len(), 1);
    assert_eq!(departments[0].name, "Physics");
    assert_eq!(departments[0].metadata.get("Head"), Some("Dr. Wu"));
}

#[tokio::test]
async fn insert_departments_posts_the_batch_in_order() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/departments")
            .json_body(serde_json::json!([
                {
                    "institute_id": "inst-1",
                    "name": "Physics",
                    "metadata": {"Department": "Physics"}
                },
                {"institute_id": "inst-1", "name": "History"}
            ]));
        then.status(201);
    });

    let drafts = vec![
        DepartmentDraft {
            institute_id: "inst-1".to_string(),
            name: "Physics".to_string(),
            metadata: vec![("Department".to_string(), "Physics".to_string())]
                .into_iter()
                .collect(),
        },
        DepartmentDraft {
            institute_id: "inst-1".to_string(),
            name: "History".to_string(),
            metadata: RowMap::new(),
        },
    ];

    let store = RestDirectory::new(server.base_url(), None);
    store.insert_departments(&drafts).await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn insert_failure_is_a_persistence_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/departments");
        then.status(500).body("db down");
    });

    let store = RestDirectory::new(server.base_url(), None);
    let drafts = vec![DepartmentDraft {
        institute_id: "inst-1".to_string(),
        name: "Physics".to_string(),
        metadata: RowMap::new(),
    }];

    let err = store.insert_departments(&drafts).await.unwrap_err();
    assert!(matches!(err, RegistryError::Persistence { .. }));
    assert!(err.to_string().contains("db down"));
}
