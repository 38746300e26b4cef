use super::shop::{ShopBrowser, run};
use crate::{OutputFormat, SessionArgs};
use anyhow::Result;
use console::style;
use courses_core::Basket;

/// Log in and print the basket
pub fn execute(session: &SessionArgs, format: OutputFormat) -> Result<()> {
    let basket = run(async {
        let (browser, shop) = ShopBrowser::open(session).await?;
        let basket = shop.basket().clone();
        browser.close().await;
        Ok::<_, anyhow::Error>(basket)
    })?;

    print_basket(&basket, format)
}

pub fn print_basket(basket: &Basket, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(basket)?),
        OutputFormat::Pretty => print!("{}", format_pretty(basket)),
    }
    Ok(())
}

fn format_pretty(basket: &Basket) -> String {
    if basket.is_empty() {
        return "🛒 The basket is empty\n".to_string();
    }

    let mut output = format!("🛒 {} item(s) in the basket\n", style(basket.len()).bold());
    for (id, description) in basket.iter() {
        output.push_str(&format!("   {:>10}  {}\n", style(id).dim(), description));
    }
    output
}
