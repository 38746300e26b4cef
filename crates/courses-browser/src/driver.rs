use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Text and selected attributes of one element, read in a single pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub text: String,
    pub attributes: HashMap<String, String>,
}

impl Node {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// What the shop session needs from a browser page.
///
/// Every element is addressed by CSS selector.
#[async_trait]
pub trait PageDriver: Send + Sync {
    async fn goto(&self, url: &str) -> Result<()>;

    async fn click(&self, selector: &str) -> Result<()>;

    /// Focus the element and type `text` into it
    async fn fill(&self, selector: &str, text: &str) -> Result<()>;

    async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>>;

    /// Every element matching `selector`, with the requested attributes
    async fn query_all(&self, selector: &str, attributes: &[&str]) -> Result<Vec<Node>>;

    /// Wait until an element matches `selector`
    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<()>;
}
