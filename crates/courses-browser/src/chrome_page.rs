use crate::{Error, Node, PageDriver, Result};
use async_trait::async_trait;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// `PageDriver` backed by a live Chrome tab
#[derive(Clone)]
pub struct ChromePage {
    page: Page,
}

impl ChromePage {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    async fn element(&self, selector: &str) -> Result<Element> {
        self.page
            .find_element(selector)
            .await
            .map_err(|e| Error::ElementNotFound(format!("{} ({})", selector, e)))
    }
}

#[async_trait]
impl PageDriver for ChromePage {
    async fn goto(&self, url: &str) -> Result<()> {
        tracing::debug!("Navigating to {}", url);
        self.page.goto(url).await?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        tracing::debug!("Clicking {}", selector);
        self.element(selector).await?.click().await?;
        Ok(())
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<()> {
        let element = self.element(selector).await?;
        element.click().await?;
        element.type_str(text).await?;
        Ok(())
    }

    async fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        Ok(self.element(selector).await?.attribute(name).await?)
    }

    async fn query_all(&self, selector: &str, attributes: &[&str]) -> Result<Vec<Node>> {
        let elements = self.page.find_elements(selector).await?;
        tracing::debug!("{} element(s) match {}", elements.len(), selector);

        let mut nodes = Vec::with_capacity(elements.len());
        for element in elements {
            let mut node = Node::new(element.inner_text().await?.unwrap_or_default().trim());
            for name in attributes {
                if let Some(value) = element.attribute(*name).await? {
                    node = node.with_attribute(*name, value);
                }
            }
            nodes.push(node);
        }

        Ok(nodes)
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(Error::Timeout(selector.to_string()));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}
