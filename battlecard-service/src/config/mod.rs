use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_SUBMISSIONS_DIR: &str = "data";
const DEFAULT_SUBMISSIONS_FILE: &str = "submissions.csv";

#[derive(Debug, Clone, Deserialize)]
pub struct BattlecardConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub openai: OpenAiConfig,
    pub submissions: SubmissionLogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// `None` puts the service in degraded mode: every generation request fails.
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionLogConfig {
    pub dir: String,
    pub file_name: String,
}

impl BattlecardConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(BattlecardConfig {
            common: common_config,
            openai: OpenAiConfig {
                api_key: optional_secret("OPENAI_API_KEY"),
                model: get_env("BATTLECARD_MODEL", Some(DEFAULT_MODEL), is_prod)?,
                base_url: get_env("OPENAI_BASE_URL", Some(DEFAULT_OPENAI_BASE_URL), is_prod)?,
            },
            submissions: SubmissionLogConfig {
                dir: get_env("SUBMISSIONS_DIR", Some(DEFAULT_SUBMISSIONS_DIR), is_prod)?,
                file_name: get_env("SUBMISSIONS_FILE", Some(DEFAULT_SUBMISSIONS_FILE), is_prod)?,
            },
        })
    }
}

/// Missing and empty values are treated the same.
fn optional_secret(key: &str) -> Option<Secret<String>> {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(Secret::new)
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn get_env_falls_back_to_default_outside_prod() {
        let value = get_env("BATTLECARD_TEST_UNSET_WITH_DEFAULT", Some("fallback"), false)
            .expect("default should apply");
        assert_eq!(value, "fallback");
    }

    #[test]
    fn get_env_requires_value_in_prod() {
        let err = get_env("BATTLECARD_TEST_UNSET_IN_PROD", Some("fallback"), true).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn get_env_without_default_is_an_error() {
        let err = get_env("BATTLECARD_TEST_UNSET_NO_DEFAULT", None, false).unwrap_err();
        assert!(err.to_string().contains("BATTLECARD_TEST_UNSET_NO_DEFAULT"));
    }

    #[test]
    fn optional_secret_ignores_blank_values() {
        env::set_var("BATTLECARD_TEST_BLANK_KEY", "   ");
        assert!(optional_secret("BATTLECARD_TEST_BLANK_KEY").is_none());
        assert!(optional_secret("BATTLECARD_TEST_MISSING_KEY").is_none());

        env::set_var("BATTLECARD_TEST_SET_KEY", "sk-test");
        let secret = optional_secret("BATTLECARD_TEST_SET_KEY").expect("key should be read");
        assert_eq!(secret.expose_secret(), "sk-test");
    }

    #[test]
    fn api_key_is_redacted_in_debug_output() {
        let config = OpenAiConfig {
            api_key: Some(Secret::new("sk-very-secret".to_string())),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
        };
        assert!(!format!("{:?}", config).contains("sk-very-secret"));
    }
}
