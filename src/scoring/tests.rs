use super::*;
use crate::embedding::{Embedding, MockEmbeddingProvider};
use crate::keywords::KeywordComparison;

const QUERY: &str = "Looking for a Python developer with experience in REST APIs and SQL databases.";
const ALICE: &str = "Experienced Python engineer, built REST APIs, worked with PostgreSQL.";
const BOB: &str = "Graphic designer skilled in Photoshop and Illustrator.";

fn evaluator() -> CandidateEvaluator<MockEmbeddingProvider> {
    CandidateEvaluator::new(MockEmbeddingProvider::new())
}

/// Deterministic pseudo-random text over a small vocabulary.
fn random_text(seed: u64, words: usize) -> String {
    const VOCAB: &[&str] = &[
        "python", "rust", "sql", "rest", "apis", "docker", "design", "team", "lead", "data",
        "cloud", "testing", "react", "go", "ml", "2019", "senior", "c++", "java", "kafka",
    ];
    let mut state = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    (0..words)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            VOCAB[((state >> 33) as usize) % VOCAB.len()]
        })
        .collect::<Vec<_>>()
        .join(" ")
}

mod score_tests {
    use super::*;

    #[test]
    fn test_score_new_bounds() {
        assert_eq!(Score::new(0), Some(Score::ZERO));
        assert_eq!(Score::new(100), Some(Score::MAX));
        assert_eq!(Score::new(101), None);
    }

    #[test]
    fn test_from_similarity_clamps_and_rounds() {
        assert_eq!(Score::from_similarity(-0.7).value(), 0);
        assert_eq!(Score::from_similarity(0.0).value(), 0);
        assert_eq!(Score::from_similarity(0.554).value(), 55);
        assert_eq!(Score::from_similarity(0.556).value(), 56);
        assert_eq!(Score::from_similarity(1.0).value(), 100);
        assert_eq!(Score::from_similarity(1.000_001).value(), 100);
        assert_eq!(Score::from_similarity(f32::NAN).value(), 0);
    }

    #[test]
    fn test_score_display_and_serialize() {
        let score = Score::new(42).unwrap();
        assert_eq!(score.to_string(), "42");
        assert_eq!(serde_json::to_string(&score).unwrap(), "42");
    }
}

mod similarity_tests {
    use super::*;

    #[test]
    fn test_cosine_identical_orthogonal_opposite() {
        assert!((cosine_similarity(&[1.0, 2.0], &[1.0, 2.0]) - 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_norm_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    #[should_panic(expected = "embedding dimension mismatch")]
    fn test_cosine_dimension_mismatch_panics() {
        cosine_similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0]);
    }

    #[test]
    fn test_similarity_score_opposite_clamped_to_zero() {
        let a = Embedding::new(vec![1.0, 0.0]);
        let b = Embedding::new(vec![-1.0, 0.0]);
        assert_eq!(similarity_score(&a, &b).unwrap(), Score::ZERO);
    }

    #[test]
    fn test_similarity_score_identical_is_max() {
        let a = Embedding::new(vec![0.3, 0.4, 0.5]);
        assert_eq!(similarity_score(&a, &a.clone()).unwrap(), Score::MAX);
    }

    #[test]
    fn test_similarity_score_nan_is_error() {
        let a = Embedding::new(vec![f32::NAN, 1.0]);
        let b = Embedding::new(vec![1.0, 1.0]);
        assert!(matches!(
            similarity_score(&a, &b),
            Err(ScoringError::ComputationFailed { .. })
        ));
    }
}

mod record_tests {
    use super::*;

    #[test]
    fn test_computed_record_summary_uses_full_counts() {
        let comparison = KeywordComparison {
            matched: vec!["python".to_string()],
            missing: vec!["sql".to_string()],
            matched_total: 11,
            missing_total: 23,
        };

        let record = ScoreRecord::computed(Score::new(64).unwrap(), comparison);

        assert_eq!(record.status, RecordStatus::Computed);
        assert!(record.summary.contains("64/100"));
        assert!(record.summary.contains("11 overlapping"));
        assert!(record.summary.contains("missing 23"));
        assert_eq!(record.matched.terms().unwrap(), ["python".to_string()]);
        assert!(!record.is_degenerate());
    }

    #[test]
    fn test_insufficient_record() {
        let record = ScoreRecord::insufficient_text();
        assert_eq!(record.score, Score::ZERO);
        assert_eq!(record.status, RecordStatus::InsufficientText);
        assert_eq!(record.matched.note(), Some(types::INSUFFICIENT_MATCHED_NOTE));
        assert_eq!(record.missing.note(), Some(types::INSUFFICIENT_MISSING_NOTE));
        assert!(record.is_degenerate());
        assert!(!record.is_failed());
    }

    #[test]
    fn test_failed_record_carries_reason() {
        let record = ScoreRecord::failed("backend exploded");
        assert!(record.is_failed());
        assert_eq!(record.missing.note(), Some("backend exploded"));
        assert!(record.summary.contains("backend exploded"));
        assert_eq!(
            record.status,
            RecordStatus::ComputationFailed {
                reason: "backend exploded".to_string()
            }
        );
    }

    #[test]
    fn test_empty_terms_distinct_from_not_computed() {
        let empty = KeywordEvidence::Terms(vec![]);
        let placeholder = KeywordEvidence::not_computed("n/a");
        assert!(empty.is_computed());
        assert_eq!(empty.terms(), Some(&[][..]));
        assert!(!placeholder.is_computed());
        assert_eq!(placeholder.terms(), None);
        assert_ne!(empty, placeholder);
    }

    #[test]
    fn test_record_serializes_plain_fields() {
        let json = serde_json::to_value(ScoreRecord::insufficient_text()).unwrap();
        assert_eq!(json["score"], 0);
        assert_eq!(json["status"]["kind"], "insufficient_text");
        assert_eq!(
            json["matched"]["not_computed"]["note"],
            types::INSUFFICIENT_MATCHED_NOTE
        );
    }
}

mod evaluator_tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace_inputs_short_circuit() {
        let evaluator = evaluator();
        for (query, candidate) in [("", ALICE), (QUERY, ""), ("  \n\t", ALICE), (QUERY, "   ")] {
            let record = evaluator.evaluate(query, candidate);
            assert_eq!(record.score, Score::ZERO);
            assert_eq!(record.status, RecordStatus::InsufficientText);
            assert_eq!(record.summary, types::INSUFFICIENT_SUMMARY);
        }
    }

    #[test]
    fn test_blank_query_is_never_embedded() {
        let evaluator = evaluator();
        let prepared = evaluator.prepare("   ");
        assert!(!prepared.is_usable());
        assert_eq!(evaluator.provider().calls(), 0);
    }

    #[test]
    fn test_identical_text_scores_max() {
        let record = evaluator().evaluate(ALICE, ALICE);
        assert_eq!(record.score, Score::MAX);
        assert_eq!(record.missing_total, 0);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let evaluator = evaluator();
        assert_eq!(evaluator.evaluate(QUERY, ALICE), evaluator.evaluate(QUERY, ALICE));
    }

    #[test]
    fn test_relevant_candidate_outscores_unrelated_one() {
        let evaluator = evaluator();
        let alice = evaluator.evaluate(QUERY, ALICE);
        let bob = evaluator.evaluate(QUERY, BOB);

        assert!(alice.score > bob.score);

        let alice_matched = alice.matched.terms().unwrap();
        assert!(alice_matched.contains(&"python".to_string()));
        assert!(alice_matched.contains(&"rest".to_string()));
        assert!(bob.matched_total <= 1);
    }

    #[test]
    fn test_matched_and_missing_partition_query_keywords() {
        let evaluator = evaluator();
        let prepared = evaluator.prepare(QUERY);
        let record = evaluator.evaluate_prepared(&prepared, ALICE);

        let matched = record.matched.terms().unwrap();
        let missing = record.missing.terms().unwrap();
        assert!(matched.iter().all(|t| !missing.contains(t)));
        assert_eq!(
            record.matched_total + record.missing_total,
            prepared.keywords().len()
        );
    }

    #[test]
    fn test_prepared_query_is_embedded_once() {
        let evaluator = evaluator();
        let prepared = evaluator.prepare(QUERY);

        evaluator.evaluate_prepared(&prepared, ALICE);
        evaluator.evaluate_prepared(&prepared, BOB);

        assert_eq!(evaluator.provider().calls(), 3);
    }

    #[test]
    fn test_candidate_failure_becomes_failed_record() {
        let evaluator =
            CandidateEvaluator::new(MockEmbeddingProvider::new().failing_on("Photoshop"));

        let record = evaluator.evaluate(QUERY, BOB);

        assert_eq!(record.score, Score::ZERO);
        assert!(record.is_failed());
        assert!(record.summary.contains("injected failure"));
        assert_eq!(record.matched.note(), Some(types::FAILED_MATCHED_NOTE));
    }

    #[test]
    fn test_query_failure_fails_every_candidate() {
        let evaluator = CandidateEvaluator::new(MockEmbeddingProvider::new().failing_on("Looking"));
        let prepared = evaluator.prepare(QUERY);
        assert!(!prepared.is_usable());

        for candidate in [ALICE, BOB] {
            let record = evaluator.evaluate_prepared(&prepared, candidate);
            assert!(record.is_failed());
            assert!(record.summary.contains("query embedding failed"));
        }
    }

    #[test]
    fn test_blank_candidate_is_insufficient_even_when_query_failed() {
        let evaluator = CandidateEvaluator::new(MockEmbeddingProvider::new().failing_on("python"));
        let prepared = evaluator.prepare("python developer");
        assert!(!prepared.is_usable());

        for candidate in ["", "   ", "\n\t"] {
            let record = evaluator.evaluate_prepared(&prepared, candidate);
            assert_eq!(record.status, RecordStatus::InsufficientText);
            assert_eq!(record.score, Score::ZERO);
            assert_eq!(record.summary, types::INSUFFICIENT_SUMMARY);
        }
    }

    #[test]
    fn test_wrong_dimension_from_provider_is_computation_error() {
        let evaluator = CandidateEvaluator::new(
            MockEmbeddingProvider::with_dim(8).with_vector(BOB, vec![1.0, 0.0, 0.0]),
        );

        let record = evaluator.evaluate(QUERY, BOB);

        assert!(record.is_failed());
        assert!(record.summary.contains("malformed embedding"));
    }

    #[test]
    fn test_non_finite_vector_is_computation_error() {
        let mut vector = vec![0.0f32; 8];
        vector[0] = f32::INFINITY;
        let evaluator =
            CandidateEvaluator::new(MockEmbeddingProvider::with_dim(8).with_vector(BOB, vector));

        assert!(evaluator.evaluate(QUERY, BOB).is_failed());
    }

    #[test]
    fn test_random_pairs_score_within_bounds() {
        let evaluator = evaluator();
        for seed in 0..200u64 {
            let query = random_text(seed, 1 + (seed % 17) as usize);
            let candidate = random_text(seed * 31 + 7, 1 + (seed % 23) as usize);

            let record = evaluator.evaluate(&query, &candidate);
            assert!(record.score <= Score::MAX);
            assert!(!record.is_failed());

            let self_record = evaluator.evaluate(&query, &query);
            assert!(self_record.score.value() >= 99, "seed {seed}: {self_record:?}");
        }
    }

    #[test]
    fn test_non_alphabetic_text_scores_without_error() {
        let record = evaluator().evaluate(QUERY, "!!! ### ???");
        assert_eq!(record.status, RecordStatus::Computed);
        assert_eq!(record.score, Score::ZERO);
        assert_eq!(record.matched.terms(), Some(&[][..]));
    }
}
