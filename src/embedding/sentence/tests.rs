use super::*;
use std::path::PathBuf;

mod config_tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_model_env() {
        // SAFETY: Test code only, we accept the thread-safety risk in tests.
        unsafe {
            env::remove_var(SentenceConfig::ENV_MODEL_PATH);
            env::remove_var(SentenceConfig::ENV_TOKENIZER_PATH);
        }
    }

    #[test]
    fn test_sentence_config_default() {
        let config = SentenceConfig::default();
        assert_eq!(config.embedding_dim, SENTENCE_EMBEDDING_DIM);
        assert_eq!(config.max_seq_len, SENTENCE_MAX_SEQ_LEN);
        assert!(!config.testing_stub);
        assert!(config.model_dir.as_os_str().is_empty());
    }

    #[test]
    fn test_sentence_config_new_infers_tokenizer() {
        let config = SentenceConfig::new("/models/all-MiniLM-L6-v2");
        assert_eq!(config.model_dir, PathBuf::from("/models/all-MiniLM-L6-v2"));
        assert_eq!(
            config.tokenizer_path,
            PathBuf::from("/models/all-MiniLM-L6-v2/tokenizer.json")
        );
        assert!(!config.testing_stub);
    }

    #[test]
    fn test_sentence_config_stub_validates() {
        let config = SentenceConfig::stub();
        assert!(config.testing_stub);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_path_no_stub() {
        let config = SentenceConfig::default();
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validation_missing_dir() {
        let config = SentenceConfig::new("/definitely/not/a/model/dir");
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::ModelNotFound { .. })
        ));
    }

    #[test]
    fn test_validation_zero_dim() {
        let config = SentenceConfig {
            embedding_dim: 0,
            ..SentenceConfig::stub()
        };
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_model_available_requires_weights_and_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = SentenceConfig::new(dir.path());
        assert!(!config.model_available());
        assert!(!config.tokenizer_available());

        std::fs::write(dir.path().join("config.json"), "{}").unwrap();
        assert!(!config.model_available());

        std::fs::write(dir.path().join("model.safetensors"), b"").unwrap();
        std::fs::write(dir.path().join("tokenizer.json"), "{}").unwrap();
        assert!(config.model_available());
        assert!(config.tokenizer_available());
    }

    #[test]
    #[serial]
    fn test_from_env_without_model_is_stub() {
        clear_model_env();
        let config = SentenceConfig::from_env();
        assert!(config.testing_stub);
    }

    #[test]
    #[serial]
    fn test_from_env_with_model_and_tokenizer() {
        clear_model_env();
        // SAFETY: Test code only, we accept the thread-safety risk in tests.
        unsafe {
            env::set_var(SentenceConfig::ENV_MODEL_PATH, " /models/minilm ");
            env::set_var(SentenceConfig::ENV_TOKENIZER_PATH, "/tok/tokenizer.json");
        }

        let config = SentenceConfig::from_env();
        clear_model_env();

        assert!(!config.testing_stub);
        assert_eq!(config.model_dir, PathBuf::from("/models/minilm"));
        assert_eq!(config.tokenizer_path, PathBuf::from("/tok/tokenizer.json"));
    }
}

mod embedder_tests {
    use super::*;

    #[test]
    fn test_stub_load() {
        let embedder = SentenceEmbedder::stub().unwrap();
        assert!(embedder.is_stub());
        assert!(!embedder.has_model());
        assert_eq!(embedder.embedding_dim(), SENTENCE_EMBEDDING_DIM);
        assert_eq!(embedder.model_id(), STUB_MODEL_ID);
    }

    #[test]
    fn test_stub_embedding_shape_and_norm() {
        let embedder = SentenceEmbedder::stub().unwrap();
        let embedding = embedder.embed("Experienced Python engineer").unwrap();

        assert_eq!(embedding.dim(), SENTENCE_EMBEDDING_DIM);
        assert!(embedding.is_finite());
        let norm: f32 = embedding.as_slice().iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_stub_embedding_is_deterministic() {
        let a = SentenceEmbedder::stub().unwrap();
        let b = SentenceEmbedder::stub().unwrap();
        let text = "Built REST APIs with PostgreSQL";
        assert_eq!(a.embed(text).unwrap(), b.embed(text).unwrap());
    }

    #[test]
    fn test_stub_embedding_is_case_insensitive() {
        let embedder = SentenceEmbedder::stub().unwrap();
        assert_eq!(
            embedder.embed("PYTHON Rest").unwrap(),
            embedder.embed("python rest").unwrap()
        );
    }

    #[test]
    fn test_load_without_model_files_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = SentenceEmbedder::load(SentenceConfig::new(dir.path()));
        assert!(matches!(result, Err(EmbeddingError::ModelNotFound { .. })));
    }

    #[test]
    fn test_shared_embedder_returns_same_instance() {
        let first = crate::embedding::shared_embedder(SentenceConfig::stub()).unwrap();
        let second = crate::embedding::shared_embedder(SentenceConfig::stub()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_debug_output() {
        let embedder = SentenceEmbedder::stub().unwrap();
        let debug = format!("{:?}", embedder);
        assert!(debug.contains("SentenceEmbedder"));
        assert!(debug.contains("Stub"));
    }

    #[test]
    fn test_output_of_wrong_length_is_malformed() {
        let result = check_output(vec![0.5; 3], 4);
        match result {
            Err(EmbeddingError::MalformedOutput { reason }) => {
                assert_eq!(reason, "3 values, expected 4");
            }
            other => panic!("expected MalformedOutput, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_output_is_malformed() {
        let err = check_output(vec![0.1, f32::NAN], 2).unwrap_err();
        assert!(matches!(err, EmbeddingError::MalformedOutput { .. }));
        assert_eq!(err.to_string(), "malformed embedding output: non-finite values");
    }

    #[test]
    fn test_valid_output_passes_through() {
        let embedding = check_output(vec![0.6, 0.8], 2).unwrap();
        assert_eq!(embedding.as_slice(), &[0.6, 0.8]);
    }
}
