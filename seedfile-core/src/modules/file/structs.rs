use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FileParams {
    /// Where the file will be created. Supports `~`; empty means the default path
    #[serde(default)]
    pub path: Option<String>,
    /// Body of the created file (empty when omitted)
    #[serde(default)]
    pub content: Option<String>,
}

impl FileParams {
    pub fn new<P: Into<String>>(path: P) -> Self {
        Self {
            path: Some(path.into()),
            content: None,
        }
    }

    pub fn with_content<C: Into<String>>(mut self, content: C) -> Self {
        self.content = Some(content.into());
        self
    }

    /// The requested path, or `default` when none was given.
    pub fn requested_path<'a>(&'a self, default: &'a str) -> &'a str {
        match self.path.as_deref() {
            Some(path) if !path.is_empty() => path,
            _ => default,
        }
    }

    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}
