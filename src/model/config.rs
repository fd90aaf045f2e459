use std::env;

const ENV_HOST: &str = "HOST";
const ENV_PORT: &str = "PORT";
const ENV_GROQ_API_KEY: &str = "GROQ_API_KEY";
const ENV_GROQ_BASE_URL: &str = "GROQ_BASE_URL";
const ENV_CLASSIFY_MODEL: &str = "CLASSIFY_MODEL";

const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_CLASSIFY_MODEL: &str = "llama-3.1-8b-instant";

/// Settings for the LLM-backed classification service
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// API credential; when absent the classifier runs in fallback-only mode
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible completion API
    pub base_url: String,
    /// Model used for classification
    pub model: String,
}

impl ClassifierConfig {
    pub fn from_env() -> Self {
        let api_key = env::var(ENV_GROQ_API_KEY)
            .ok()
            .filter(|k| !k.trim().is_empty());

        let base_url =
            env::var(ENV_GROQ_BASE_URL).unwrap_or_else(|_| DEFAULT_GROQ_BASE_URL.to_string());

        let model =
            env::var(ENV_CLASSIFY_MODEL).unwrap_or_else(|_| DEFAULT_CLASSIFY_MODEL.to_string());

        Self {
            api_key,
            base_url,
            model,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub classifier: ClassifierConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            classifier: ClassifierConfig {
                api_key: None,
                base_url: DEFAULT_GROQ_BASE_URL.to_string(),
                model: DEFAULT_CLASSIFY_MODEL.to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from the environment
    pub fn from_env() -> Self {
        let port = env::var(ENV_PORT)
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = env::var(ENV_HOST).unwrap_or_else(|_| "127.0.0.1".to_string());

        Self {
            host,
            port,
            classifier: ClassifierConfig::from_env(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert!(config.classifier.api_key.is_none());
        assert_eq!(config.classifier.model, DEFAULT_CLASSIFY_MODEL);
    }
}
