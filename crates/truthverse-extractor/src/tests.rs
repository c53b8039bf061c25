//! Integration tests for the ClaimExtractor

#[cfg(test)]
mod tests {
    use crate::{canonical_hash, canonicalize, ClaimExtractor, ExtractorConfig, ExtractorError};
    use proptest::prelude::*;

    fn extractor() -> ClaimExtractor {
        ClaimExtractor::new(ExtractorConfig::default()).unwrap()
    }

    #[test]
    fn test_extracts_claim_sentences_in_order() {
        let text = "A new study shows that 95% of patients improved. \
                    The weather was pleasant in the afternoon. \
                    The FDA approved the treatment after review.";
        let claims = extractor().extract(text, 10).unwrap();

        assert_eq!(claims.len(), 2);
        assert_eq!(
            claims[0].raw_text,
            "A new study shows that 95% of patients improved"
        );
        assert_eq!(
            claims[1].canonical_text,
            "the fda approved the treatment after review"
        );
        assert_eq!(
            claims[0].id.as_str(),
            canonical_hash("A new study shows that 95% of patients improved")
        );
    }

    #[test]
    fn test_no_claims_in_plain_text() {
        let claims = extractor()
            .extract("Hello there, my friend. How was your weekend trip?", 10)
            .unwrap();
        assert!(claims.is_empty());
    }

    #[test]
    fn test_empty_text() {
        assert!(extractor().extract("", 10).unwrap().is_empty());
    }

    #[test]
    fn test_max_claims_respected() {
        let text = "Research shows coffee improves memory in adults. \
                    Data indicates sleep reduces stress significantly. \
                    According to the report, exercise prevents illness.";
        assert_eq!(extractor().extract(text, 2).unwrap().len(), 2);
        assert!(extractor().extract(text, 0).unwrap().is_empty());
    }

    #[test]
    fn test_repeated_sentence_extracted_once() {
        let text = "Research shows coffee improves memory in adults. \
                    research   shows coffee improves memory in ADULTS!";
        let claims = extractor().extract(text, 10).unwrap();
        assert_eq!(claims.len(), 1);
    }

    #[test]
    fn test_long_text_keeps_leading_claim() {
        let mut text =
            "According to the WHO, vaccines reduce hospitalization by 90 percent. ".to_string();
        for _ in 0..1100 {
            text.push_str("The afternoon was quiet and the garden was green. ");
        }
        assert!(text.chars().count() > ExtractorConfig::default().max_text_length);

        let claims = extractor().extract(&text, 10).unwrap();
        assert_eq!(claims.len(), 1);
        assert!(claims[0].raw_text.starts_with("According to the WHO"));
    }

    #[test]
    fn test_claims_past_scan_window_ignored() {
        let config = ExtractorConfig {
            max_text_length: 60,
            ..ExtractorConfig::default()
        };
        let extractor = ClaimExtractor::new(config).unwrap();
        let text = "Research shows coffee improves memory in adults. \
                    The FDA approved the treatment after review.";
        let claims = extractor.extract(text, 10).unwrap();
        assert_eq!(claims.len(), 1);
        assert!(claims[0].raw_text.starts_with("Research shows"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExtractorConfig {
            max_text_length: 0,
            ..ExtractorConfig::default()
        };
        assert!(matches!(
            ClaimExtractor::new(config),
            Err(ExtractorError::Config(_))
        ));
    }

    #[test]
    fn test_custom_entities() {
        let config = ExtractorConfig {
            salient_entities: vec!["NASA".to_string()],
            ..ExtractorConfig::default()
        };
        let extractor = ClaimExtractor::new(config).unwrap();
        let claims = extractor
            .extract("NASA launched the probe on Tuesday. The FDA met on Tuesday morning.", 10)
            .unwrap();
        assert_eq!(claims.len(), 1);
        assert!(claims[0].raw_text.starts_with("NASA"));
    }

    proptest! {
        #[test]
        fn prop_claim_count_bounded(text in "[a-zA-Z0-9%. ]{0,400}", max in 0usize..8) {
            let claims = extractor().extract(&text, max).unwrap();
            prop_assert!(claims.len() <= max);
        }

        #[test]
        fn prop_canonicalize_idempotent(text in "[a-zA-Z0-9 \\t\\n]{0,200}") {
            let once = canonicalize(&text);
            prop_assert_eq!(canonicalize(&once), once.clone());
        }

        #[test]
        fn prop_extraction_deterministic(text in "[a-zA-Z0-9%. ]{0,300}") {
            let first = extractor().extract(&text, 10).unwrap();
            let second = extractor().extract(&text, 10).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
