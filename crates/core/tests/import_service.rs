//! End-to-end reconciliation coverage for the import service.
//!
//! These tests drive `ImportService::import_batch` against the in-memory
//! store to verify the insert/update/ignore classification, batch-scoped
//! parent resolution, lazy dimension creation, and wholesale rejection of
//! invalid batches.

mod support;

use std::sync::Arc;

use flowtrack_core::ImportService;
use flowtrack_domain::{FlowtrackError, ImportSummary, RawWorkItem};
use support::repositories::InMemoryStore;

fn service(store: &Arc<InMemoryStore>) -> ImportService {
    ImportService::new(store.clone(), store.clone())
}

/// The two-record payload from the external tracker's export shape.
fn sample_batch() -> Vec<RawWorkItem> {
    serde_json::from_value(serde_json::json!([
        {
            "id": "1916409",
            "work item type": "Feature",
            "assigned to": "Bruno",
            "state": "Closed",
            "created date": "26-03-2025 08:47",
            "activated date": "23-04-2025 11:33",
            "closed date": "05-06-2025 11:03",
            "description": "Fluxo",
            "title": "[Estoque] Raiz"
        },
        {
            "id": "1916421",
            "work item type": "User Story",
            "assigned to": "Bruno",
            "state": "Closed",
            "created date": "26-03-2025 08:50",
            "activated date": "22-04-2025 15:35",
            "closed date": "05-05-2025 14:28",
            "description": "Confirmação",
            "title": "[Estoque] Filho",
            "parent": "[Estoque] Raiz"
        }
    ]))
    .expect("sample payload should deserialize")
}

#[tokio::test]
async fn fresh_batch_inserts_everything() {
    let store = Arc::new(InMemoryStore::new());
    let summary = service(&store).import_batch(&sample_batch()).await.expect("import should succeed");

    assert_eq!(summary, ImportSummary { inserted: 2, updated: 0, ignored: 0 });

    let rows = store.rows();
    assert_eq!(rows.len(), 2);
    // Parent resolved from the batch's own titles.
    assert_eq!(rows[1].id, 1_916_421);
    assert_eq!(rows[1].parent_id, Some(1_916_409));
    assert_eq!(rows[0].parent_id, None);
}

#[tokio::test]
async fn reimporting_an_unchanged_batch_is_idempotent() {
    let store = Arc::new(InMemoryStore::new());
    let svc = service(&store);

    svc.import_batch(&sample_batch()).await.expect("first import should succeed");
    let second = svc.import_batch(&sample_batch()).await.expect("second import should succeed");

    assert_eq!(second, ImportSummary { inserted: 0, updated: 0, ignored: 2 });
}

#[tokio::test]
async fn changing_one_tracked_field_updates_only_that_record() {
    let store = Arc::new(InMemoryStore::new());
    let svc = service(&store);
    svc.import_batch(&sample_batch()).await.expect("first import should succeed");

    let mut batch = sample_batch();
    batch[1].description = Some("Nova desc".into());
    let summary = svc.import_batch(&batch).await.expect("second import should succeed");

    assert_eq!(summary, ImportSummary { inserted: 0, updated: 1, ignored: 1 });
    assert_eq!(store.rows()[1].description.as_deref(), Some("Nova desc"));
}

#[tokio::test]
async fn parent_missing_from_batch_resolves_to_none() {
    let store = Arc::new(InMemoryStore::new());
    let mut batch = sample_batch();
    // Drop the parent record; the child's parent title no longer resolves.
    batch.remove(0);

    let summary = service(&store).import_batch(&batch).await.expect("import should succeed");
    assert_eq!(summary.inserted, 1);
    assert_eq!(store.rows()[0].parent_id, None);
}

#[tokio::test]
async fn camel_case_payload_reconciles_identically() {
    let store = Arc::new(InMemoryStore::new());
    let svc = service(&store);
    svc.import_batch(&sample_batch()).await.expect("first import should succeed");

    let camel: Vec<RawWorkItem> = serde_json::from_value(serde_json::json!([
        {
            "id": "1916409",
            "workItemType": "Feature",
            "assignedTo": "Bruno",
            "state": "Closed",
            "createdDate": "26-03-2025 08:47",
            "activatedDate": "23-04-2025 11:33",
            "closedDate": "05-06-2025 11:03",
            "description": "Fluxo",
            "title": "[Estoque] Raiz"
        }
    ]))
    .expect("camelCase payload should deserialize");

    let summary = svc.import_batch(&camel).await.expect("import should succeed");
    assert_eq!(summary, ImportSummary { inserted: 0, updated: 0, ignored: 1 });
}

#[tokio::test]
async fn dimensions_are_created_lazily_and_never_renamed() {
    let store = Arc::new(InMemoryStore::new());
    let svc = service(&store);
    svc.import_batch(&sample_batch()).await.expect("first import should succeed");

    assert_eq!(store.people().len(), 1);
    assert_eq!(store.people()[0].name, "Bruno");
    let type_names: Vec<String> = store.types().iter().map(|t| t.name.clone()).collect();
    assert_eq!(type_names, vec!["Feature".to_string(), "User Story".to_string()]);

    // A differently-cased spelling maps to the same canonical row; the
    // first display name seen stays.
    let mut batch = sample_batch();
    batch[0].assigned_to = Some("BRUNO".into());
    svc.import_batch(&batch).await.expect("second import should succeed");

    assert_eq!(store.people().len(), 1);
    assert_eq!(store.people()[0].name, "Bruno");
}

#[tokio::test]
async fn invalid_record_rejects_the_whole_batch() {
    let store = Arc::new(InMemoryStore::new());
    let mut batch = sample_batch();
    batch[1].created_date = Some("2025-03-26 08:50".into());

    let err = service(&store).import_batch(&batch).await.expect_err("batch should be rejected");
    let FlowtrackError::Validation(issues) = err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert!(issues.iter().any(|issue| issue.path == "items[1].\"created date\""));
    assert!(issues.iter().all(|issue| issue.code == "invalid_date"));

    // No partial write: the valid record was not inserted either.
    assert!(store.rows().is_empty());
    assert_eq!(store.apply_calls(), 0);
}

#[tokio::test]
async fn empty_batch_is_a_validation_error() {
    let store = Arc::new(InMemoryStore::new());
    let err = service(&store).import_batch(&[]).await.expect_err("empty batch should be rejected");
    assert!(matches!(err, FlowtrackError::Validation(_)));
}

#[tokio::test]
async fn self_referential_parent_is_permitted() {
    let store = Arc::new(InMemoryStore::new());
    let batch: Vec<RawWorkItem> = serde_json::from_value(serde_json::json!([
        {
            "id": "7",
            "work item type": "Epic",
            "state": "Active",
            "created date": "01-01-2025 09:00",
            "title": "Ouroboros",
            "parent": "Ouroboros"
        }
    ]))
    .expect("payload should deserialize");

    let summary = service(&store).import_batch(&batch).await.expect("import should succeed");
    assert_eq!(summary.inserted, 1);
    assert_eq!(store.rows()[0].parent_id, Some(7));
}
