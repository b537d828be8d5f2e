#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::errors::{ EngineError, GeneratorError };
    use crate::implementations::generators::{ FnGenerator, IntRangeGenerator, StringGenerator };
    use crate::implementations::registry::GeneratorRegistry;
    use crate::tests::setup;

    #[tokio::test]
    async fn test_register_and_draw() {
        setup();
        let mut registry = GeneratorRegistry::new();
        assert!(registry.is_empty());
        registry.register::<i64, _>(IntRangeGenerator::new("board_size", 3, 15));

        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let size: i64 = registry.generate("board_size", &mut rng).unwrap();
            assert!((3..15).contains(&size));
        }
        assert!(registry.contains("board_size"));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_same_seed_same_draw() {
        setup();
        let mut registry = GeneratorRegistry::new();
        registry.register::<String, _>(StringGenerator::alphanumeric("name", 1, 12));

        let first: String = registry.generate("name", &mut StdRng::seed_from_u64(77)).unwrap();
        let second: String = registry.generate("name", &mut StdRng::seed_from_u64(77)).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_last_registration_wins() {
        setup();
        let mut registry = GeneratorRegistry::new();
        registry.register::<i64, _>(FnGenerator::new("seats", "integer", |_: &mut StdRng| Ok(5)));
        registry.register::<i64, _>(IntRangeGenerator::new("other", 0, 3));
        registry.register::<i64, _>(FnGenerator::new("seats", "integer", |_: &mut StdRng| Ok(9)));

        let drawn: i64 = registry.generate("seats", &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(drawn, 9);
        assert_eq!(registry.len(), 2);
        // Listing keeps first-registration order
        let ids: Vec<String> = registry.infos().into_iter().map(|info| info.id).collect();
        assert_eq!(ids, vec!["seats".to_string(), "other".to_string()]);
    }

    #[tokio::test]
    async fn test_lookup_errors() {
        setup();
        let mut registry = GeneratorRegistry::new();
        registry.register::<i64, _>(IntRangeGenerator::new("seats", 0, 3));

        assert!(matches!(registry.get::<i64>("missing"), Err(EngineError::GeneratorNotFound(id)) if id == "missing"));
        match registry.get::<String>("seats") {
            Err(EngineError::GeneratorTypeMismatch { id, expected }) => {
                assert_eq!(id, "seats");
                assert!(expected.contains("String"));
            }
            _ => panic!("expected a type mismatch"),
        }
    }

    #[tokio::test]
    async fn test_direct_draw_fault() {
        setup();
        let mut registry = GeneratorRegistry::new();
        registry.register::<i64, _>(
            FnGenerator::new("flaky", "integer", |_: &mut StdRng| -> Result<i64, GeneratorError> {
                Err(GeneratorError::new("no seats"))
            })
        );

        match registry.generate::<i64>("flaky", &mut StdRng::seed_from_u64(0)) {
            Err(EngineError::GeneratorFault { generator, message, .. }) => {
                assert_eq!(generator, "flaky");
                assert_eq!(message, "no seats");
            }
            _ => panic!("expected a generator fault"),
        }
    }

    #[tokio::test]
    async fn test_infos_describe_constraints() {
        setup();
        let mut registry = GeneratorRegistry::new();
        registry.register::<i64, _>(IntRangeGenerator::new("quorum_percent", 50, 76));

        let info = &registry.infos()[0];
        assert_eq!(info.type_tag, "integer");
        assert_eq!(info.name, "quorum_percent");
        let constraints = info.constraints.as_ref().unwrap();
        assert_eq!(constraints.range, Some((50.0, 76.0)));
        assert_eq!(constraints.describe(), "range [50, 76)");
    }
}
