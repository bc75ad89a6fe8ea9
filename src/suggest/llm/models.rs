use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Gemini models the client knows how to call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Model {
    /// Fast default tier (gemini-2.0-flash)
    #[default]
    Flash,
    /// Cheapest tier (gemini-2.0-flash-lite)
    FlashLite,
    /// Slower, stronger reasoning (gemini-1.5-pro)
    Pro,
    /// Any other model id, passed through untouched
    Custom(String),
}

impl Model {
    pub fn id(&self) -> &str {
        match self {
            Model::Flash => "gemini-2.0-flash",
            Model::FlashLite => "gemini-2.0-flash-lite",
            Model::Pro => "gemini-1.5-pro",
            Model::Custom(id) => id,
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Model {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        let id = id.strip_prefix("models/").unwrap_or(id);
        match id.to_lowercase().as_str() {
            "" => Err("model id is empty".to_string()),
            "flash" | "gemini-2.0-flash" => Ok(Model::Flash),
            "flash-lite" | "gemini-2.0-flash-lite" => Ok(Model::FlashLite),
            "pro" | "gemini-1.5-pro" => Ok(Model::Pro),
            _ => Ok(Model::Custom(id.to_string())),
        }
    }
}

/// Token accounting from Gemini's `usageMetadata`
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_ids() {
        assert_eq!(Model::Flash.id(), "gemini-2.0-flash");
        assert!(Model::FlashLite.id().contains("lite"));
        assert!(Model::Pro.id().contains("pro"));
    }

    #[test]
    fn test_default_model_is_flash() {
        assert_eq!(Model::default(), Model::Flash);
    }

    #[test]
    fn test_parse_aliases_and_prefixes() {
        assert_eq!("flash".parse::<Model>().unwrap(), Model::Flash);
        assert_eq!("models/gemini-1.5-pro".parse::<Model>().unwrap(), Model::Pro);
        assert_eq!(" Flash-Lite ".parse::<Model>().unwrap(), Model::FlashLite);
        assert_eq!(
            "gemini-exp-1206".parse::<Model>().unwrap(),
            Model::Custom("gemini-exp-1206".to_string())
        );
        assert!("  ".parse::<Model>().is_err());
    }

    #[test]
    fn test_usage_deserialize() {
        let json = r#"{"promptTokenCount": 120, "candidatesTokenCount": 300, "totalTokenCount": 420}"#;
        let usage: Usage = serde_json::from_str(json).unwrap();
        assert_eq!(usage.prompt_token_count, 120);
        assert_eq!(usage.candidates_token_count, 300);
        assert_eq!(usage.total_token_count, 420);
    }
}
