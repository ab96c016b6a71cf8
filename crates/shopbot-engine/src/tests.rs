//! Integration tests for the Resolver

#[cfg(test)]
mod tests {
    use crate::{BrowseParams, ConstraintSet, EngineError, Resolution, Resolver, ResolverConfig};
    use shopbot_domain::traits::{CatalogStore, TranscriptLog};
    use shopbot_domain::{NewProduct, ProductId, Sender, TranscriptEntry};
    use shopbot_llm::MockGenerator;
    use shopbot_store::SqliteStore;
    use std::sync::Arc;
    use std::thread;

    type TestResolver = Resolver<Arc<SqliteStore>, Arc<SqliteStore>, MockGenerator>;

    fn setup(products: &[(&str, &str, u64)]) -> (TestResolver, MockGenerator) {
        let store = Arc::new(SqliteStore::new(":memory:").unwrap());
        for (name, category, price) in products {
            store
                .insert_product(NewProduct::new(*name, *category, *price, ""))
                .unwrap();
        }
        let generator = MockGenerator::new("Generated reply");
        let resolver = Resolver::new(store.clone(), store, generator.clone());
        (resolver, generator)
    }

    fn electronics() -> Vec<(&'static str, &'static str, u64)> {
        vec![
            ("Laptop", "Electronics", 500),
            ("Television", "Electronics", 1500),
            ("Phone", "Electronics", 800),
        ]
    }

    #[test]
    fn test_electronics_under_1000() {
        let (resolver, generator) = setup(&electronics());

        let resolution = resolver.resolve("show me electronics under 1000").unwrap();

        let mut prices: Vec<u64> = resolution.products().iter().map(|p| p.price).collect();
        prices.sort_unstable();
        assert_eq!(prices, vec![500, 800]);

        let reply = resolution.reply_text();
        assert!(reply.starts_with("I found 2 products matching your request: "));
        assert!(reply.ends_with('.'));
        assert!(reply.contains("Laptop"));
        assert!(reply.contains("Phone"));
        assert!(!reply.contains("Television"));
        assert_eq!(generator.call_count(), 0);
    }

    #[test]
    fn test_no_match_delegates_with_lowercased_text() {
        let (resolver, generator) = setup(&electronics());

        let resolution = resolver.resolve("Anything UNDER 1").unwrap();

        assert_eq!(
            resolution,
            Resolution::Delegated {
                generated_text: "Generated reply".to_string()
            }
        );
        assert_eq!(generator.prompts(), vec!["anything under 1"]);
    }

    #[test]
    fn test_each_resolve_appends_one_exchange() {
        let (resolver, _) = setup(&electronics());

        resolver.resolve("electronics over 600").unwrap();
        resolver.resolve("garden gnomes under 5").unwrap();

        let history = resolver.history().unwrap();
        assert_eq!(history.len(), 4);

        let senders: Vec<Sender> = history.iter().map(|e| e.sender).collect();
        assert_eq!(senders, vec![Sender::User, Sender::Bot, Sender::User, Sender::Bot]);
        assert_eq!(history[0].text, "electronics over 600");
        assert!(history[1].text.starts_with("I found 2 products"));
        assert_eq!(history[2].text, "garden gnomes under 5");
        assert_eq!(history[3].text, "Generated reply");
    }

    #[test]
    fn test_matched_result_is_capped() {
        let books: Vec<(String, u64)> = (0..8).map(|i| (format!("Book {}", i), 10 + i)).collect();
        let store = Arc::new(SqliteStore::new(":memory:").unwrap());
        for (name, price) in &books {
            store
                .insert_product(NewProduct::new(name.as_str(), "Books", *price, ""))
                .unwrap();
        }
        let resolver = Resolver::new(store.clone(), store, MockGenerator::default());

        let resolution = resolver.resolve("books").unwrap();
        assert_eq!(resolution.products().len(), 5);
        assert!(resolution.reply_text().contains("5 products"));
        for product in resolution.products() {
            assert!(resolution.reply_text().contains(&product.name));
        }

        // Browsing has no cap
        let all = resolver
            .browse(&ConstraintSet::new(Some("books".to_string()), None, None))
            .unwrap();
        assert_eq!(all.len(), 8);
    }

    #[test]
    fn test_custom_result_limit() {
        let store = Arc::new(SqliteStore::new(":memory:").unwrap());
        for (name, category, price) in electronics() {
            store
                .insert_product(NewProduct::new(name, category, price, ""))
                .unwrap();
        }
        let config = ResolverConfig { result_limit: 1 };
        let resolver =
            Resolver::with_config(store.clone(), store, MockGenerator::default(), config).unwrap();

        let resolution = resolver.resolve("electronics").unwrap();
        assert_eq!(resolution.products().len(), 1);
        assert!(resolution.reply_text().starts_with("I found 1 products"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let store = Arc::new(SqliteStore::new(":memory:").unwrap());
        let result = Resolver::with_config(
            store.clone(),
            store,
            MockGenerator::default(),
            ResolverConfig { result_limit: 0 },
        );
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_unconstrained_query_matches_catalog() {
        let (resolver, generator) = setup(&electronics());

        let resolution = resolver.resolve("hello").unwrap();
        assert_eq!(resolution.products().len(), 3);
        assert_eq!(generator.call_count(), 0);
    }

    #[test]
    fn test_empty_catalog_always_delegates() {
        let (resolver, generator) = setup(&[]);

        let resolution = resolver.resolve("hello").unwrap();
        assert!(resolution.is_delegated());
        assert_eq!(generator.call_count(), 1);
    }

    #[test]
    fn test_inverted_bounds_match_nothing() {
        let (resolver, generator) = setup(&electronics());

        let resolution = resolver.resolve("electronics over 1000 under 100").unwrap();
        assert!(resolution.is_delegated());
        assert_eq!(generator.call_count(), 1);
    }

    #[test]
    fn test_oversized_lower_bound_matches_nothing() {
        let (resolver, generator) = setup(&electronics());

        let resolution = resolver
            .resolve("electronics over 99999999999999999999999")
            .unwrap();
        assert!(resolution.is_delegated());
        assert_eq!(generator.call_count(), 1);
    }

    #[test]
    fn test_oversized_upper_bound_keeps_category() {
        let (resolver, generator) = setup(&electronics());

        let resolution = resolver
            .resolve("electronics under 99999999999999999999999")
            .unwrap();
        assert_eq!(resolution.products().len(), 3);
        assert_eq!(generator.call_count(), 0);
    }

    #[test]
    fn test_generation_failure_records_nothing() {
        let store = Arc::new(SqliteStore::new(":memory:").unwrap());
        let resolver = Resolver::new(
            store.clone(),
            store,
            MockGenerator::failing("service unavailable"),
        );

        match resolver.resolve("anything under 1") {
            Err(EngineError::Generation(message)) => assert!(message.contains("service unavailable")),
            other => panic!("Expected Generation error, got {:?}", other),
        }
        assert!(resolver.history().unwrap().is_empty());
    }

    /// Transcript that refuses every write
    struct BrokenTranscript;

    impl TranscriptLog for BrokenTranscript {
        type Error = String;

        fn append(&self, _sender: Sender, _text: &str) -> Result<(), Self::Error> {
            Err("disk full".to_string())
        }

        fn append_exchange(&self, _user_text: &str, _bot_text: &str) -> Result<(), Self::Error> {
            Err("disk full".to_string())
        }

        fn list_all(&self) -> Result<Vec<TranscriptEntry>, Self::Error> {
            Ok(Vec::new())
        }

        fn reset_all(&self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_transcript_failure_is_reported() {
        let store = SqliteStore::new(":memory:").unwrap();
        store
            .insert_product(NewProduct::new("Laptop", "Electronics", 500, ""))
            .unwrap();
        let resolver = Resolver::new(store, BrokenTranscript, MockGenerator::default());

        match resolver.resolve("electronics") {
            Err(EngineError::Store(message)) => assert!(message.contains("disk full")),
            other => panic!("Expected Store error, got {:?}", other),
        }
    }

    #[test]
    fn test_reset_history() {
        let (resolver, _) = setup(&electronics());
        resolver.resolve("electronics").unwrap();
        resolver.resolve("books under 5").unwrap();
        assert_eq!(resolver.history().unwrap().len(), 4);

        resolver.reset_history().unwrap();
        assert!(resolver.history().unwrap().is_empty());
        assert_eq!(resolver.catalog_size().unwrap(), 3);
    }

    #[test]
    fn test_browse_and_record() {
        let (resolver, _) = setup(&electronics());

        let params = BrowseParams {
            category: Some("ELEC".to_string()),
            max_price: Some("800".to_string()),
            ..Default::default()
        };
        let products = resolver.browse_and_record(&params).unwrap();
        assert_eq!(products.len(), 2);

        let empty = BrowseParams {
            category: Some("books".to_string()),
            ..Default::default()
        };
        assert!(resolver.browse_and_record(&empty).unwrap().is_empty());

        let texts: Vec<String> = resolver
            .history()
            .unwrap()
            .into_iter()
            .map(|e| e.text)
            .collect();
        assert_eq!(
            texts,
            vec![
                "category=ELEC&max_price=800",
                "2 products matched.",
                "category=books",
                "No products found.",
            ]
        );
    }

    #[test]
    fn test_browse_rejects_bad_numbers_before_searching() {
        let (resolver, _) = setup(&electronics());

        let params = BrowseParams {
            min_price: Some("lots".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            resolver.browse_and_record(&params),
            Err(EngineError::InvalidNumericInput { field: "min_price", .. })
        ));
        assert!(resolver.history().unwrap().is_empty());
    }

    #[test]
    fn test_product_detail() {
        let (resolver, _) = setup(&electronics());

        let ids = resolver
            .import_products(vec![NewProduct::new("Reading Lamp", "Home", 35, "Warm light")])
            .unwrap();
        let product = resolver.product_detail(ids[0]).unwrap();
        assert_eq!(product.name, "Reading Lamp");
        assert_eq!(product.description, "Warm light");

        let missing = ProductId::from_value(9_999);
        assert!(matches!(
            resolver.product_detail(missing),
            Err(EngineError::ProductNotFound(id)) if id == missing
        ));
    }

    #[test]
    fn test_concurrent_resolves_keep_pairs_together() {
        let (resolver, _) = setup(&electronics());
        let resolver = Arc::new(resolver);

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let resolver = Arc::clone(&resolver);
                thread::spawn(move || {
                    for i in 0..5 {
                        resolver
                            .resolve(&format!("electronics over {} from {}", i, t))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let history = resolver.history().unwrap();
        assert_eq!(history.len(), 40);
        for pair in history.chunks(2) {
            assert_eq!(pair[0].sender, Sender::User);
            assert_eq!(pair[1].sender, Sender::Bot);
            assert!(pair[0].id < pair[1].id);
        }
    }
}
