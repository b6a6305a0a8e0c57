use serde::Deserialize;
use url::Url;

use crate::error::NetError;

/// Model endpoint configuration: credentials, endpoint, model name and any
/// extra request-body arguments forwarded verbatim.
#[derive(Clone, Debug, Deserialize)]
pub struct ModelConfig {
    pub key: String,
    pub url: String,
    pub model: String,
    #[serde(default)]
    pub additional_arguments: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ModelConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, NetError> {
        let config: ModelConfig =
            toml::from_str(raw).map_err(|e| NetError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &std::path::Path) -> Result<Self, NetError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| NetError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), NetError> {
        if self.key.trim().is_empty() {
            return Err(NetError::Config("api key is empty".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(NetError::Config("model name is empty".to_string()));
        }
        Url::parse(&self.url).map_err(|e| NetError::Config(format!("bad endpoint url: {e}")))?;
        Ok(())
    }
}
