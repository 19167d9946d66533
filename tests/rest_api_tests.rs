//! REST API tests for the record store
//!
//! These drive the full axum router in-process: validation, status codes,
//! server-side filtering and the option lists.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use training::prelude::*;

fn create_test_server() -> TestServer {
    let app = ServerBuilder::new()
        .with_record_service(InMemoryRecordService::new())
        .with_catalog(ProjectCatalog::default())
        .build()
        .expect("Failed to build app");

    TestServer::try_new(app).expect("Failed to create test server")
}

fn alice() -> Value {
    json!({
        "employeeId": "E-1",
        "employeeName": "Alice",
        "course": "Go",
        "startDate": "2024-01-01",
        "endDate": "2024-01-31",
        "status": "Not Started",
        "trainerName": "Bob",
        "trainingType": "Udemy",
        "percentCompleted": 0,
        "projectName": "ABC"
    })
}

async fn create(server: &TestServer, body: &Value) -> TrainingRecord {
    let response = server.post("/api/trainings").json(body).await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

// =============================================================================
// Health Check Tests
// =============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoints() {
        let server = create_test_server();

        for path in ["/health", "/healthz"] {
            let response = server.get(path).await;
            response.assert_status_ok();
            let body: Value = response.json();
            assert_eq!(body["status"], "ok");
        }
    }
}

// =============================================================================
// Record CRUD Tests
// =============================================================================

mod record_crud_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_empty() {
        let server = create_test_server();

        let response = server.get("/api/trainings").await;
        response.assert_status_ok();
        let body: Vec<Value> = response.json();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_create_then_list_contains_record() {
        let server = create_test_server();

        let created = create(&server, &alice()).await;
        assert_eq!(created.employee_name, "Alice");
        assert_eq!(created.course, "Go");
        assert_eq!(created.trainer_name, "Bob");
        assert_eq!(created.training_type, TrainingType::Udemy);
        assert_eq!(created.project_name, "ABC");

        let records: Vec<TrainingRecord> = server.get("/api/trainings").await.json();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, created.id);
        assert_eq!(records[0].start_date.date_string(), "2024-01-01");
        assert_eq!(records[0].end_date.date_string(), "2024-01-31");
    }

    #[tokio::test]
    async fn test_dates_are_served_as_utc_timestamps() {
        let server = create_test_server();
        create(&server, &alice()).await;

        let body: Vec<Value> = server.get("/api/trainings").await.json();
        assert_eq!(body[0]["startDate"], "2024-01-01T00:00:00.000Z");
        assert!(body[0]["id"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_legacy_emp_id_is_accepted() {
        let server = create_test_server();
        let mut body = alice();
        body.as_object_mut().unwrap().remove("employeeId");
        body["empId"] = json!("LEGACY-7");

        let created = create(&server, &body).await;
        assert_eq!(created.employee_id, "LEGACY-7");
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let server = create_test_server();
        let created = create(&server, &alice()).await;

        let response = server.get(&format!("/api/trainings/{}", created.id)).await;
        response.assert_status_ok();
        let fetched: TrainingRecord = response.json();
        assert_eq!(fetched, created);

        let missing = server
            .get(&format!("/api/trainings/{}", Uuid::new_v4()))
            .await;
        missing.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let server = create_test_server();
        let created = create(&server, &alice()).await;

        let mut body = alice();
        body["status"] = json!("In Progress");
        body["percentCompleted"] = json!(50);

        let response = server
            .put(&format!("/api/trainings/{}", created.id))
            .json(&body)
            .await;
        response.assert_status_ok();
        let updated: TrainingRecord = response.json();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.status, TrainingStatus::InProgress);
        assert_eq!(updated.percent_completed, 50);
    }

    #[tokio::test]
    async fn test_update_with_same_values_is_idempotent() {
        let server = create_test_server();
        let created = create(&server, &alice()).await;
        let before: Vec<TrainingRecord> = server.get("/api/trainings").await.json();

        let body = serde_json::to_value(&created.details).unwrap();
        server
            .put(&format!("/api/trainings/{}", created.id))
            .json(&body)
            .await
            .assert_status_ok();

        let after: Vec<TrainingRecord> = server.get("/api/trainings").await.json();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let server = create_test_server();

        let response = server
            .put(&format!("/api/trainings/{}", Uuid::new_v4()))
            .json(&alice())
            .await;
        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(body["code"], "RECORD_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_delete_existing_and_unknown() {
        let server = create_test_server();
        let keep = create(&server, &alice()).await;
        let mut other = alice();
        other["employeeName"] = json!("Dana");
        let gone = create(&server, &other).await;

        server
            .delete(&format!("/api/trainings/{}", gone.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let records: Vec<TrainingRecord> = server.get("/api/trainings").await.json();
        assert_eq!(records, vec![keep.clone()]);

        server
            .delete(&format!("/api/trainings/{}", Uuid::new_v4()))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let records: Vec<TrainingRecord> = server.get("/api/trainings").await.json();
        assert_eq!(records, vec![keep]);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let server = create_test_server();
        let mut ids = Vec::new();
        for name in ["Alice", "Bob", "Carol"] {
            let mut body = alice();
            body["employeeName"] = json!(name);
            ids.push(create(&server, &body).await.id);
        }

        let records: Vec<TrainingRecord> = server.get("/api/trainings").await.json();
        let listed: Vec<Uuid> = records.iter().map(|r| r.id).collect();
        assert_eq!(listed, ids);
    }
}

// =============================================================================
// Validation Tests
// =============================================================================

mod validation_tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_enum_value_is_rejected() {
        let server = create_test_server();
        let mut body = alice();
        body["trainingType"] = json!("udemy");

        let response = server.post("/api/trainings").json(&body).await;
        response.assert_status_bad_request();
        let error: Value = response.json();
        assert_eq!(error["code"], "INVALID_BODY");
    }

    #[tokio::test]
    async fn test_project_outside_catalog_is_rejected() {
        let server = create_test_server();
        let mut body = alice();
        body["projectName"] = json!("ZZZ");

        let response = server.post("/api/trainings").json(&body).await;
        response.assert_status_bad_request();
        let error: Value = response.json();
        assert_eq!(error["code"], "VALIDATION_ERROR");
        assert_eq!(error["details"]["fields"][0]["field"], "projectName");
    }

    #[tokio::test]
    async fn test_percentage_above_hundred_is_rejected() {
        let server = create_test_server();
        let mut body = alice();
        body["percentCompleted"] = json!(150);

        let response = server.post("/api/trainings").json(&body).await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_missing_trainer_is_rejected() {
        let server = create_test_server();
        let mut body = alice();
        body["trainerName"] = json!("");

        let response = server.post("/api/trainings").json(&body).await;
        response.assert_status_bad_request();

        let records: Vec<Value> = server.get("/api/trainings").await.json();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_id_is_bad_request() {
        let server = create_test_server();

        let response = server.get("/api/trainings/not-a-uuid").await;
        response.assert_status_bad_request();
        let error: Value = response.json();
        assert_eq!(error["code"], "INVALID_RECORD_ID");
    }
}

// =============================================================================
// Filter and Option Tests
// =============================================================================

mod filter_tests {
    use super::*;

    #[tokio::test]
    async fn test_query_parameters_filter_per_field() {
        let server = create_test_server();
        for (name, kind) in [("Alice", "Udemy"), ("Bob", "Coursera"), ("Alina", "Udemy")] {
            let mut body = alice();
            body["employeeName"] = json!(name);
            body["trainingType"] = json!(kind);
            create(&server, &body).await;
        }

        let response = server
            .get("/api/trainings")
            .add_query_param("trainingType", "Udemy")
            .add_query_param("employeeName", "ALI")
            .await;
        response.assert_status_ok();
        let records: Vec<TrainingRecord> = response.json();
        let names: Vec<&str> = records.iter().map(|r| r.employee_name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Alina"]);
    }

    #[tokio::test]
    async fn test_unknown_query_parameter_is_rejected() {
        let server = create_test_server();

        let response = server
            .get("/api/trainings")
            .add_query_param("salary", "1")
            .await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_options_publish_catalog() {
        let server = create_test_server();

        let response = server.get("/api/options").await;
        response.assert_status_ok();
        let options: RecordOptions = response.json();
        assert_eq!(options.project_names, vec!["ABC", "CDE", "EFG", "HIJ", "KLM"]);
        assert_eq!(options.statuses.len(), 3);
        assert_eq!(options.training_types[0], "Udemy");
    }
}

// =============================================================================
// API Documentation Tests
// =============================================================================

mod api_docs_tests {
    use super::*;

    #[tokio::test]
    async fn test_openapi_document_describes_records() {
        let server = create_test_server();

        let response = server.get("/api-docs/openapi.json").await;
        response.assert_status_ok();
        let doc: Value = response.json();

        assert!(doc["openapi"].as_str().unwrap().starts_with("3."));
        let paths = doc["paths"].as_object().unwrap();
        for path in ["/api/trainings", "/api/trainings/{id}", "/api/options"] {
            assert!(paths.contains_key(path), "missing path {}", path);
        }
        assert!(paths["/api/trainings/{id}"]["delete"].is_object());

        let schemas = &doc["components"]["schemas"];
        let statuses = schemas["TrainingStatus"]["enum"].as_array().unwrap();
        assert!(statuses.contains(&json!("In Progress")));
        assert!(statuses.contains(&json!("Not Started")));

        let percent = &schemas["TrainingDetails"]["properties"]["percentCompleted"];
        assert_eq!(percent["minimum"].as_f64(), Some(0.0));
        assert_eq!(percent["maximum"].as_f64(), Some(100.0));
    }

    #[tokio::test]
    async fn test_swagger_ui_is_served() {
        let server = create_test_server();

        let response = server.get("/api-docs/").await;
        response.assert_status_ok();
        assert!(response.text().to_lowercase().contains("swagger"));
    }
}
