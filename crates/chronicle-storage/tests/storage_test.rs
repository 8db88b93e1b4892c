//! Integration tests for the SQLite graph store: transactional writes,
//! edge maintenance, full-text and vector queries, cascade delete.

use chrono::Utc;

use chronicle_core::cancel::CancelToken;
use chronicle_core::errors::{ChronicleError, StoreError};
use chronicle_core::model::NewSummary;
use chronicle_core::traits::GraphStore;
use chronicle_storage::StorageEngine;

fn summary(id: &str, project_id: &str, text: &str, embedding: Vec<f32>) -> NewSummary {
    NewSummary {
        id: id.to_string(),
        project_id: project_id.to_string(),
        text: text.to_string(),
        embedding,
        created_at: Utc::now(),
    }
}

/// Seed one project with one latest summary.
fn seed_project(engine: &StorageEngine, project_id: &str, summary_id: &str, text: &str) {
    let new_summary = summary(summary_id, project_id, text, vec![1.0, 0.0]);
    engine
        .with_write(&mut |tx| {
            tx.upsert_project(project_id, "a project", "a question", Utc::now())?;
            tx.create_summary(&new_summary)?;
            tx.link_latest(project_id, summary_id)?;
            Ok(())
        })
        .unwrap();
}

fn count(engine: &StorageEngine, sql: &str) -> i64 {
    engine
        .pool()
        .writer
        .with_conn(|conn| {
            conn.query_row(sql, [], |row| row.get::<_, i64>(0))
                .map_err(|e| {
                    StoreError::Sqlite {
                        message: e.to_string(),
                    }
                    .into()
                })
        })
        .unwrap()
}

#[test]
fn migrations_are_idempotent_across_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chronicle.db");

    let engine = StorageEngine::open(&path).unwrap();
    seed_project(&engine, "p1", "s1", "first summary");
    drop(engine);

    let reopened = StorageEngine::open(&path).unwrap();
    let latest = reopened.latest_summary("p1").unwrap().unwrap();
    assert_eq!(latest.summary_id, "s1");
}

#[test]
fn upsert_then_lookups() {
    let engine = StorageEngine::open_in_memory().unwrap();
    seed_project(&engine, "p1", "s1", "rotating signing keys");

    let latest = engine.latest_summary("p1").unwrap().unwrap();
    assert_eq!(latest.project_id, "p1");
    assert_eq!(latest.summary_id, "s1");
    assert_eq!(latest.text, "rotating signing keys");
    assert_eq!(latest.question, "a question");

    let project = engine.project_by_summary("s1").unwrap().unwrap();
    assert_eq!(project.id, "p1");
    assert_eq!(project.name, "a project");

    assert!(engine.latest_summary("missing").unwrap().is_none());
    assert!(engine.project_by_summary("missing").unwrap().is_none());
}

#[test]
fn unlink_latest_returns_previous_and_keeps_node() {
    let engine = StorageEngine::open_in_memory().unwrap();
    seed_project(&engine, "p1", "s1", "first");

    engine
        .with_write(&mut |tx| {
            assert_eq!(tx.unlink_latest("p1").unwrap(), Some("s1".to_string()));
            // Second unlink in the same transaction sees nothing.
            assert_eq!(tx.unlink_latest("p1").unwrap(), None);
            Ok(())
        })
        .unwrap();

    // The node and its historical edge survive; only the latest edge is gone.
    assert!(engine.latest_summary("p1").unwrap().is_none());
    assert!(engine.project_by_summary("s1").unwrap().is_some());
}

#[test]
fn predecessor_link_is_append_only() {
    let engine = StorageEngine::open_in_memory().unwrap();
    seed_project(&engine, "p1", "s1", "first");

    let s2 = summary("s2", "p1", "second", vec![1.0, 0.0]);
    let s3 = summary("s3", "p1", "third", vec![1.0, 0.0]);
    engine
        .with_write(&mut |tx| {
            tx.create_summary(&s2)?;
            tx.create_summary(&s3)?;
            tx.link_predecessor("s2", "s1")?;
            Ok(())
        })
        .unwrap();

    let err = engine
        .with_write(&mut |tx| tx.link_predecessor("s2", "s3"))
        .unwrap_err();
    assert!(matches!(
        err,
        ChronicleError::Store(StoreError::PredecessorAlreadySet { .. })
    ));
}

#[test]
fn predecessor_link_rejects_cross_project_splicing() {
    let engine = StorageEngine::open_in_memory().unwrap();
    seed_project(&engine, "p1", "s1", "first project summary");
    seed_project(&engine, "p2", "s2", "second project summary");

    let err = engine
        .with_write(&mut |tx| tx.link_predecessor("s2", "s1"))
        .unwrap_err();
    assert!(matches!(
        err,
        ChronicleError::Store(StoreError::Sqlite { .. })
    ));

    // Nothing was linked.
    let history = engine.summaries_for_project("p2").unwrap();
    assert_eq!(history[0].predecessor_id, None);
}

#[test]
fn failed_write_leaves_no_partial_state() {
    let engine = StorageEngine::open_in_memory().unwrap();

    let new_summary = summary("s1", "p1", "doomed", vec![1.0, 0.0]);
    let result = engine.with_write(&mut |tx| {
        tx.upsert_project("p1", "a project", "a question", Utc::now())?;
        tx.create_summary(&new_summary)?;
        tx.link_latest("p1", "s1")?;
        Err(ChronicleError::validation("injected failure"))
    });
    assert!(result.is_err());

    assert_eq!(count(&engine, "SELECT COUNT(*) FROM projects"), 0);
    assert_eq!(count(&engine, "SELECT COUNT(*) FROM summaries"), 0);
    assert_eq!(count(&engine, "SELECT COUNT(*) FROM latest_summaries"), 0);
}

#[test]
fn fulltext_query_matches_seeded_text() {
    let engine = StorageEngine::open_in_memory().unwrap();
    seed_project(&engine, "p1", "s1", "invoice drift reconciliation pass");

    let hits = engine
        .fulltext_query("reconciliation", 10, &CancelToken::none())
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].summary_id, "s1");

    let misses = engine
        .fulltext_query("submarine", 10, &CancelToken::none())
        .unwrap();
    assert!(misses.is_empty());
}

#[test]
fn fulltext_query_on_empty_corpus_is_empty_not_error() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let hits = engine
        .fulltext_query("anything", 10, &CancelToken::none())
        .unwrap();
    assert!(hits.is_empty());
}

#[test]
fn vector_query_orders_by_similarity_and_skips_dim_mismatch() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine
        .with_write(&mut |tx| {
            tx.upsert_project("p1", "a project", "q", Utc::now())?;
            tx.create_summary(&summary("exact", "p1", "exact", vec![1.0, 0.0]))?;
            tx.create_summary(&summary("close", "p1", "close", vec![0.9, 0.1]))?;
            tx.create_summary(&summary("far", "p1", "far", vec![0.1, 0.9]))?;
            tx.create_summary(&summary("odd_dims", "p1", "odd", vec![1.0, 0.0, 0.0]))?;
            Ok(())
        })
        .unwrap();

    let hits = engine
        .vector_query(&[1.0, 0.0], 10, &CancelToken::none())
        .unwrap();
    let ids: Vec<&str> = hits.iter().map(|h| h.summary_id.as_str()).collect();
    assert_eq!(ids, vec!["exact", "close", "far"]);
    assert!(hits[0].score > hits[1].score);
    assert!(hits[1].score > hits[2].score);
}

#[test]
fn vector_query_truncates_to_limit() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine
        .with_write(&mut |tx| {
            tx.upsert_project("p1", "a project", "q", Utc::now())?;
            for i in 0..5 {
                let id = format!("s{i}");
                tx.create_summary(&summary(&id, "p1", &id, vec![1.0, i as f32 / 10.0]))?;
            }
            Ok(())
        })
        .unwrap();

    let hits = engine
        .vector_query(&[1.0, 0.0], 2, &CancelToken::none())
        .unwrap();
    assert_eq!(hits.len(), 2);
}

#[test]
fn cancelled_token_aborts_vector_query() {
    let engine = StorageEngine::open_in_memory().unwrap();
    seed_project(&engine, "p1", "s1", "text");

    let token = CancelToken::none();
    token.cancel();
    let err = engine.vector_query(&[1.0, 0.0], 10, &token).unwrap_err();
    assert!(matches!(err, ChronicleError::Cancelled));
}

#[test]
fn cascade_delete_removes_everything_and_is_idempotent() {
    let engine = StorageEngine::open_in_memory().unwrap();
    seed_project(&engine, "p1", "s1", "searchable text");
    let s2 = summary("s2", "p1", "second searchable", vec![1.0, 0.0]);
    engine
        .with_write(&mut |tx| {
            assert_eq!(tx.unlink_latest("p1").unwrap(), Some("s1".to_string()));
            tx.create_summary(&s2)?;
            tx.link_latest("p1", "s2")?;
            tx.link_predecessor("s2", "s1")?;
            Ok(())
        })
        .unwrap();

    let mut existed = false;
    engine
        .with_write(&mut |tx| {
            existed = tx.delete_project_cascade("p1")?;
            Ok(())
        })
        .unwrap();
    assert!(existed);

    assert_eq!(count(&engine, "SELECT COUNT(*) FROM projects"), 0);
    assert_eq!(count(&engine, "SELECT COUNT(*) FROM summaries"), 0);
    assert_eq!(count(&engine, "SELECT COUNT(*) FROM latest_summaries"), 0);
    // FTS rows went with the summaries.
    let hits = engine
        .fulltext_query("searchable", 10, &CancelToken::none())
        .unwrap();
    assert!(hits.is_empty());

    // Deleting again is a no-op, not an error.
    engine
        .with_write(&mut |tx| {
            existed = tx.delete_project_cascade("p1")?;
            Ok(())
        })
        .unwrap();
    assert!(!existed);
}

#[test]
fn resolve_summaries_omits_unknown_ids() {
    let engine = StorageEngine::open_in_memory().unwrap();
    seed_project(&engine, "p1", "s1", "known");

    let rows = engine
        .resolve_summaries(&["s1".to_string(), "ghost".to_string()])
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].summary_id, "s1");
    assert_eq!(rows[0].project_id, "p1");
}
