use super::schema::Config;
use crate::scheme::SchemeId;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref name) = config.default_scheme {
        if let Err(e) = name.parse::<SchemeId>() {
            errors.push(format!("default_scheme: {}", e));
        }
    }

    if let Some(ref batches) = config.batches {
        if batches.is_empty() {
            errors.push("batches: must list at least one credit value".to_string());
        }
        for (i, credit) in batches.iter().enumerate() {
            if !credit.is_finite() || *credit < 0.0 {
                errors.push(format!(
                    "batches[{}]: invalid credit '{}' - must be a non-negative number",
                    i, credit
                ));
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

    #[test]
    fn test_valid_config() {
        let config = Config {
            default_scheme: Some("US".to_string()),
            batches: Some(vec![3.0, 1.5]),
            color: None,
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_unknown_scheme() {
        let config = Config {
            default_scheme: Some("Yale".to_string()),
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("default_scheme"));
        assert!(errors[0].contains("Yale"));
    }

    #[test]
    fn test_negative_batch_credit() {
        let config = Config {
            batches: Some(vec![3.0, -1.0]),
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("batches[1]"));
    }

    #[test]
    fn test_empty_batches() {
        let config = Config {
            batches: Some(vec![]),
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_collects_all_errors() {
        let config = Config {
            default_scheme: Some("nope".to_string()), // Error 1
            batches: Some(vec![-3.0]),                // Error 2
            color: None,
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
