//! Property tests: any sequence of upserts preserves the version-chain
//! invariants.

use proptest::prelude::*;

use chronicle_core::errors::StoreError;
use chronicle_core::traits::GraphStore;
use chronicle_storage::StorageEngine;
use chronicle_versioning::{UpsertRequest, VersionChainManager};

fn latest_edge_count(engine: &StorageEngine, project_id: &str) -> i64 {
    engine
        .pool()
        .writer
        .with_conn(|conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM latest_summaries WHERE project_id = ?1",
                [project_id],
                |row| row.get(0),
            )
            .map_err(|e| {
                StoreError::Sqlite {
                    message: e.to_string(),
                }
                .into()
            })
        })
        .unwrap()
}

fn chained_predecessor_count(engine: &StorageEngine, project_id: &str) -> i64 {
    engine
        .pool()
        .writer
        .with_conn(|conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM summaries
                 WHERE project_id = ?1 AND predecessor_id IS NOT NULL",
                [project_id],
                |row| row.get(0),
            )
            .map_err(|e| {
                StoreError::Sqlite {
                    message: e.to_string(),
                }
                .into()
            })
        })
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// After every upsert in a sequence there is exactly one latest edge,
    /// the summary count equals the number of upserts, and every summary
    /// but the first has a predecessor.
    #[test]
    fn upsert_sequences_preserve_invariants(
        summaries in prop::collection::vec("[a-zA-Z0-9 ]{1,40}", 1..8)
    ) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let manager = VersionChainManager::new(&engine);

        let mut project_id: Option<String> = None;
        for (i, text) in summaries.iter().enumerate() {
            let receipt = manager.upsert(UpsertRequest {
                project_id: project_id.as_deref(),
                name: "prop project",
                question: "prop question",
                summary_text: text,
                embedding: vec![1.0, 0.5],
            }).unwrap();
            project_id.get_or_insert(receipt.project_id.clone());
            let pid = project_id.as_deref().unwrap();

            prop_assert_eq!(latest_edge_count(&engine, pid), 1);
            prop_assert_eq!(chained_predecessor_count(&engine, pid), i as i64);

            let latest = engine.latest_summary(pid).unwrap().unwrap();
            prop_assert_eq!(&latest.summary_id, &receipt.summary_id);
            prop_assert_eq!(&latest.text, text);
        }
    }

    /// Deleting after any number of versions removes the whole chain and a
    /// repeat delete reports nothing to remove.
    #[test]
    fn delete_after_any_chain_length_is_clean(version_count in 1usize..6) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let manager = VersionChainManager::new(&engine);

        let mut project_id: Option<String> = None;
        for i in 0..version_count {
            let receipt = manager.upsert(UpsertRequest {
                project_id: project_id.as_deref(),
                name: "prop project",
                question: "prop question",
                summary_text: &format!("version {i}"),
                embedding: vec![1.0],
            }).unwrap();
            project_id.get_or_insert(receipt.project_id);
        }

        let pid = project_id.unwrap();
        prop_assert!(manager.delete(&pid).unwrap());
        prop_assert!(engine.latest_summary(&pid).unwrap().is_none());
        prop_assert!(!manager.delete(&pid).unwrap());
    }
}
