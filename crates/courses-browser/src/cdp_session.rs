use crate::{ChromePage, Error, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// CDP connection to a running Chrome
pub struct CdpSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Page,
}

impl CdpSession {
    /// Connect to Chrome's debugging port and pick the page to drive
    pub async fn connect(debugging_port: u16) -> Result<Self> {
        let endpoint = format!("http://localhost:{}", debugging_port);
        tracing::info!("Connecting to Chrome on port {}", debugging_port);

        // Chrome takes a moment to open its debugging port after launch
        let (browser, mut handler) = {
            let mut attempts_left = CONNECT_ATTEMPTS;
            loop {
                tracing::debug!("Attempting CDP connection to {}...", endpoint);
                match Browser::connect(&endpoint).await {
                    Ok(connection) => break connection,
                    Err(e) => {
                        attempts_left -= 1;
                        if attempts_left == 0 {
                            return Err(Error::Cdp(format!(
                                "Failed to connect to Chrome after {} attempts: {}",
                                CONNECT_ATTEMPTS, e
                            )));
                        }
                        tracing::debug!(
                            "CDP connection attempt failed, retrying... ({} left)",
                            attempts_left
                        );
                        tokio::time::sleep(CONNECT_RETRY_DELAY).await;
                    }
                }
            }
        };

        // The handler must be polled for any browser command to complete
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        tokio::time::sleep(CONNECT_RETRY_DELAY).await;

        let page = match browser.pages().await?.into_iter().next() {
            Some(page) => page,
            None => {
                tracing::debug!("No open page, creating one");
                browser.new_page("about:blank").await?
            }
        };

        tracing::info!("CDP connection established");

        Ok(Self {
            browser,
            handler_task,
            page,
        })
    }

    /// Driver for the session's page
    pub fn page(&self) -> ChromePage {
        ChromePage::new(self.page.clone())
    }

    /// Close the browser and stop the handler task
    pub async fn close(mut self) -> Result<()> {
        let closed = self.browser.close().await;
        self.handler_task.abort();
        closed?;
        Ok(())
    }
}
