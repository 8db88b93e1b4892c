//! Property tests for RRF fusion.

use proptest::prelude::*;

use chronicle_core::model::SearchHit;
use chronicle_retrieval::search::rrf;

fn ranked_list(prefix: &str, len: usize, overlap_ids: &[usize]) -> Vec<SearchHit> {
    // Ranked by construction: scores strictly decreasing. Positions named in
    // `overlap_ids` use a shared id so the lists intersect.
    (0..len)
        .map(|i| {
            let id = if overlap_ids.contains(&i) {
                format!("shared{i}")
            } else {
                format!("{prefix}{i}")
            };
            SearchHit {
                summary_id: id,
                text: String::new(),
                score: (len - i) as f64,
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn output_is_bounded_sorted_and_drawn_from_inputs(
        lex_len in 0usize..40,
        vec_len in 0usize..40,
        top_k in 1usize..30,
        overlap in prop::collection::vec(0usize..40, 0..10),
    ) {
        let lexical = ranked_list("l", lex_len, &overlap);
        let vector = ranked_list("v", vec_len, &overlap);

        let fused = rrf::fuse(&[&lexical, &vector], 60, top_k);

        prop_assert!(fused.len() <= top_k);

        for pair in fused.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }

        let input_ids: std::collections::HashSet<&str> = lexical
            .iter()
            .chain(vector.iter())
            .map(|h| h.summary_id.as_str())
            .collect();
        for hit in &fused {
            prop_assert!(input_ids.contains(hit.summary_id.as_str()));
        }
    }

    #[test]
    fn fusion_is_deterministic(
        lex_len in 0usize..30,
        vec_len in 0usize..30,
        top_k in 1usize..20,
    ) {
        let lexical = ranked_list("l", lex_len, &[]);
        let vector = ranked_list("v", vec_len, &[]);

        let first = rrf::fuse(&[&lexical, &vector], 60, top_k);
        let second = rrf::fuse(&[&lexical, &vector], 60, top_k);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn double_listed_rank_one_beats_single_listed_rank_one(
        lex_len in 2usize..20,
        vec_len in 2usize..20,
        rrf_k in 1u32..200,
    ) {
        // "shared0" is rank 1 in both lists; every other item appears once.
        let lexical = ranked_list("l", lex_len, &[0]);
        let vector = ranked_list("v", vec_len, &[0]);

        let fused = rrf::fuse(&[&lexical, &vector], rrf_k, lex_len + vec_len);
        prop_assert_eq!(fused[0].summary_id.as_str(), "shared0");
        prop_assert!(fused[0].score > fused[1].score);
    }
}
