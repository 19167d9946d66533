//! Macro-generated test suite for `RecordService` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use training::storage::InMemoryRecordService;
//!
//! record_service_tests!(InMemoryRecordService::new());
//! ```
//!
//! # Generated Tests
//!
//! - `test_create_assigns_id` - create then get, every field preserved
//! - `test_get_nonexistent` - unknown id returns None
//! - `test_list_empty` / `test_list_in_insertion_order`
//! - `test_update_replaces_all_fields` / `test_update_nonexistent`
//! - `test_update_is_idempotent`
//! - `test_delete_existing` / `test_delete_nonexistent`
//! - `test_concurrent_creates`

/// Generate a full `RecordService` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty service implementing
/// `RecordService + Clone + 'static`. It is re-evaluated for each test.
macro_rules! record_service_tests {
    ($factory:expr) => {
        mod record_service_contract_tests {
            use super::*;
            use training::core::error::{RecordError, TrainingError};
            use training::core::record::{TrainingStatus, TrainingType};
            use training::core::service::RecordService;
            use uuid::Uuid;

            #[tokio::test]
            async fn test_create_assigns_id() {
                let service = $factory;
                let details = test_details("Alice", TrainingType::Udemy);

                let created = service.create(details.clone()).await.unwrap();
                assert_ne!(created.id, Uuid::nil());
                assert_eq!(created.details, details);

                let fetched = service.get(&created.id).await.unwrap();
                assert!(fetched.is_some(), "Record should exist after create");
                assert_same_record(&fetched.unwrap(), &created);
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let service = $factory;
                assert!(service.get(&Uuid::new_v4()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_list_empty() {
                let service = $factory;
                assert_count(&service.list().await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_list_in_insertion_order() {
                let service = $factory;
                let mut ids = Vec::new();
                for name in ["Alice", "Bob", "Carol", "Dana"] {
                    let created = service
                        .create(test_details(name, TrainingType::Virtual))
                        .await
                        .unwrap();
                    ids.push(created.id);
                }

                let all = service.list().await.unwrap();
                assert_count(&all, 4);
                let listed: Vec<Uuid> = all.iter().map(|r| r.id).collect();
                assert_eq!(listed, ids);
            }

            #[tokio::test]
            async fn test_update_replaces_all_fields() {
                let service = $factory;
                let created = service
                    .create(test_details("Alice", TrainingType::Udemy))
                    .await
                    .unwrap();

                let mut changed = test_details("Alicia", TrainingType::Classroom);
                changed.status = TrainingStatus::Completed;
                changed.percent_completed = 100;

                let updated = service.update(&created.id, changed.clone()).await.unwrap();
                assert_eq!(updated.id, created.id);
                assert_eq!(updated.details, changed);

                let fetched = service.get(&created.id).await.unwrap().unwrap();
                assert_same_record(&fetched, &updated);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let service = $factory;
                let result = service
                    .update(&Uuid::new_v4(), test_details("Ghost", TrainingType::Udemy))
                    .await;
                assert!(matches!(
                    result,
                    Err(TrainingError::Record(RecordError::NotFound { .. }))
                ));
                assert_count(&service.list().await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_update_is_idempotent() {
                let service = $factory;
                let created = service
                    .create(test_details("Alice", TrainingType::Udemy))
                    .await
                    .unwrap();
                let before = service.list().await.unwrap();

                service
                    .update(&created.id, created.details.clone())
                    .await
                    .unwrap();

                assert_eq!(service.list().await.unwrap(), before);
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let service = $factory;
                let keep = service
                    .create(test_details("Alice", TrainingType::Udemy))
                    .await
                    .unwrap();
                let gone = service
                    .create(test_details("Bob", TrainingType::Udemy))
                    .await
                    .unwrap();

                assert!(service.delete(&gone.id).await.unwrap());
                assert!(service.get(&gone.id).await.unwrap().is_none());

                let all = service.list().await.unwrap();
                assert_count(&all, 1);
                assert_same_record(&all[0], &keep);
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let service = $factory;
                service
                    .create(test_details("Alice", TrainingType::Udemy))
                    .await
                    .unwrap();

                assert!(!service.delete(&Uuid::new_v4()).await.unwrap());
                assert_count(&service.list().await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_concurrent_creates() {
                let service = $factory;
                let s1 = service.clone();
                let s2 = service.clone();

                let h1 = tokio::spawn(async move {
                    s1.create(test_details("Concurrent_A", TrainingType::Udemy)).await
                });
                let h2 = tokio::spawn(async move {
                    s2.create(test_details("Concurrent_B", TrainingType::Coursera)).await
                });

                let (r1, r2) = tokio::time::timeout(std::time::Duration::from_secs(30), async {
                    tokio::try_join!(h1, h2).unwrap()
                })
                .await
                .expect("Concurrent creates timed out after 30s, possible deadlock");

                let id1 = r1.unwrap().id;
                let id2 = r2.unwrap().id;

                let all = service.list().await.unwrap();
                assert_count(&all, 2);
                let ids: Vec<Uuid> = all.iter().map(|r| r.id).collect();
                assert!(ids.contains(&id1), "Record A should be present");
                assert!(ids.contains(&id2), "Record B should be present");
            }
        }
    };
}
