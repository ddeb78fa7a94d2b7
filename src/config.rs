use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub llm_config: LlmConfig,
    #[serde(default)]
    pub twilio_config: TwilioConfig,
    #[serde(default)]
    pub call_config: CallConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

/// Settings for the OpenAI-compatible chat completion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_system_prompt() -> String {
    "You are a helpful assistant.".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Twilio credentials. Only their presence is checked; inbound request
/// signatures are not validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwilioConfig {
    #[serde(default)]
    pub account_sid: Option<String>,
    #[serde(default)]
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallConfig {
    #[serde(default = "default_greeting")]
    pub greeting: String,
    #[serde(default = "default_max_length")]
    pub max_length: u32,
    #[serde(default = "default_process_path")]
    pub process_path: String,
}

fn default_greeting() -> String {
    "Hi there. Tell me what you're looking for after the beep.".to_string()
}

fn default_max_length() -> u32 {
    8
}

fn default_process_path() -> String {
    "/process".to_string()
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;

        // Determine file type by extension
        let path_lower = path.to_lowercase();
        if path_lower.ends_with(".json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }

    /// Load from `path` when it exists, otherwise start from defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config file at {}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Overlay environment variables onto the loaded configuration.
    ///
    /// `lookup` returns the value of a variable; empty values count as unset.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("HOST") {
            self.system_config.host = host;
        }
        if let Some(port) = get("PORT") {
            self.system_config.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT {:?}: {}", port, e))?;
        }
        if let Some(key) = get("OPENAI_API_KEY") {
            self.llm_config.api_key = Some(key);
        }
        if let Some(base_url) = get("OPENAI_BASE_URL") {
            self.llm_config.base_url = base_url;
        }
        if let Some(model) = get("OPENAI_MODEL") {
            self.llm_config.model = model;
        }
        if let Some(sid) = get("TWILIO_ACCOUNT_SID") {
            self.twilio_config.account_sid = Some(sid);
        }
        if let Some(token) = get("TWILIO_AUTH_TOKEN") {
            self.twilio_config.auth_token = Some(token);
        }
        Ok(())
    }
}

impl LlmConfig {
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

impl TwilioConfig {
    pub fn is_configured(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.account_sid) && present(&self.auth_token)
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            system_prompt: default_system_prompt(),
            temperature: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            max_length: default_max_length(),
            process_path: default_process_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_call_flow() {
        let config = Config::default();
        assert_eq!(config.system_config.port, 5000);
        assert_eq!(config.llm_config.model, "gpt-3.5-turbo");
        assert_eq!(config.llm_config.system_prompt, "You are a helpful assistant.");
        assert_eq!(config.call_config.max_length, 8);
        assert_eq!(config.call_config.process_path, "/process");
        assert!(config.llm_config.api_key().is_none());
        assert!(!config.twilio_config.is_configured());
    }

    #[test]
    fn env_overrides_credentials_and_port() {
        let mut config = Config::default();
        config
            .apply_env_overrides(env(&[
                ("OPENAI_API_KEY", "sk-test"),
                ("TWILIO_ACCOUNT_SID", "AC123"),
                ("TWILIO_AUTH_TOKEN", "secret"),
                ("PORT", "8080"),
            ]))
            .unwrap();

        assert_eq!(config.llm_config.api_key(), Some("sk-test"));
        assert!(config.twilio_config.is_configured());
        assert_eq!(config.system_config.port, 8080);
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut config = Config::default();
        config
            .apply_env_overrides(env(&[("OPENAI_API_KEY", ""), ("TWILIO_ACCOUNT_SID", "AC123")]))
            .unwrap();

        assert!(config.llm_config.api_key().is_none());
        assert!(!config.twilio_config.is_configured());
    }

    #[test]
    fn invalid_port_is_an_error() {
        let mut config = Config::default();
        let result = config.apply_env_overrides(env(&[("PORT", "eighty")]));
        assert!(result.is_err());
    }

    #[test]
    fn loads_partial_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "llm_config:\n  model: gpt-4o-mini\n  temperature: 0.2\ncall_config:\n  greeting: Hello"
        )
        .unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.llm_config.model, "gpt-4o-mini");
        assert_eq!(config.llm_config.temperature, Some(0.2));
        assert_eq!(config.call_config.greeting, "Hello");
        assert_eq!(config.call_config.max_length, 8);
        assert_eq!(config.system_config.port, 5000);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default("/nonexistent/conf.yaml").unwrap();
        assert_eq!(config.call_config.max_length, 8);
    }
}
