use std::collections::BTreeMap;

use super::directive::Directive;

/// Validate every directive of every configured preset at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_presets(presets: &BTreeMap<String, Vec<String>>) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (name, directives) in presets {
        if name.trim().is_empty() {
            errors.push("presets: preset name must be non-empty".to_string());
        }

        for (i, pair) in directives.iter().enumerate() {
            if let Err(e) = Directive::parse_pair(pair) {
                errors.push(format!("presets.{}[{}]: invalid '{}' - {}", name, i, pair, e));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presets(entries: Vec<(&str, Vec<&str>)>) -> BTreeMap<String, Vec<String>> {
        entries
            .into_iter()
            .map(|(name, pairs)| {
                (
                    name.to_string(),
                    pairs.iter().map(|p| p.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_valid_presets() {
        let config = presets(vec![
            ("speed", vec!["weight_ground_speed=1", "sort_score=-1"]),
            ("pareto", vec!["rank_ground_speed=1", "rank_acceleration=1", "limit=20"]),
        ]);
        assert!(validate_presets(&config).is_ok());
    }

    #[test]
    fn test_empty_presets() {
        assert!(validate_presets(&BTreeMap::new()).is_ok());
    }

    #[test]
    fn test_invalid_directive_names_preset_and_index() {
        let config = presets(vec![("speed", vec!["weight_ground_speed=1", "min_speed=3"])]);
        let errors = validate_presets(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("presets.speed[1]"));
        assert!(errors[0].contains("min_speed=3"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = presets(vec![
            ("a", vec!["weight_weight=-1"]),         // Error 1
            ("b", vec!["sort_score=2", "limit=x"]), // Errors 2 and 3
        ]);
        let errors = validate_presets(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
