use serde::Deserialize;
use serde_json::Value;

/// Replicate returns either one artifact URL or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ReplicateOutput {
    Single(String),
    Many(Vec<String>),
}

impl ReplicateOutput {
    /// Anything that is neither shape is treated as no output.
    pub fn from_value(value: Option<&Value>) -> Option<ReplicateOutput> {
        let value = value?;
        serde_json::from_value(value.clone()).ok()
    }

    pub fn into_urls(self) -> Vec<String> {
        match self {
            Self::Single(url) => vec![url],
            Self::Many(urls) => urls,
        }
    }
}
