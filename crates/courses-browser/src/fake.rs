use crate::{Error, Node, PageDriver, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory page: serves canned nodes and records what the session does
#[derive(Default)]
pub struct FakePage {
    nodes: HashMap<String, Vec<Node>>,
    absent: HashSet<String>,
    visited: Mutex<Vec<String>>,
    clicks: Mutex<Vec<String>>,
    filled: Mutex<Vec<(String, String)>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nodes(mut self, selector: &str, nodes: Vec<Node>) -> Self {
        self.nodes.insert(selector.to_string(), nodes);
        self
    }

    /// Make `selector` match nothing: waits time out and clicks fail
    pub fn without(mut self, selector: &str) -> Self {
        self.absent.insert(selector.to_string());
        self
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.clicks.lock().unwrap().clone()
    }

    pub fn filled(&self) -> Vec<(String, String)> {
        self.filled.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageDriver for FakePage {
    async fn goto(&self, url: &str) -> Result<()> {
        self.visited.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        if self.absent.contains(selector) {
            return Err(Error::ElementNotFound(selector.to_string()));
        }
        self.clicks.lock().unwrap().push(selector.to_string());
        Ok(())
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<()> {
        self.filled
            .lock()
            .unwrap()
            .push((selector.to_string(), text.to_string()));
        Ok(())
    }

    async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        Ok(self
            .nodes
            .get(selector)
            .and_then(|nodes| nodes.first())
            .and_then(|node| node.attribute(name))
            .map(str::to_string))
    }

    async fn query_all(&self, selector: &str, _attributes: &[&str]) -> Result<Vec<Node>> {
        Ok(self.nodes.get(selector).cloned().unwrap_or_default())
    }

    async fn wait_for(&self, selector: &str, _timeout: Duration) -> Result<()> {
        if self.absent.contains(selector) {
            return Err(Error::Timeout(selector.to_string()));
        }
        Ok(())
    }
}
