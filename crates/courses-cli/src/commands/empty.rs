use super::shop::{ShopBrowser, run};
use crate::{OutputFormat, SessionArgs};
use anyhow::Result;

pub fn execute(session: &SessionArgs, format: OutputFormat) -> Result<()> {
    let removed = run(async {
        let (browser, mut shop) = ShopBrowser::open(session).await?;
        let removed = shop.empty_basket().await;
        browser.close().await;
        Ok::<_, anyhow::Error>(removed?)
    })?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "removed": removed })),
        OutputFormat::Pretty => println!("🧹 Removed {} item(s) from the basket", removed),
    }

    Ok(())
}
