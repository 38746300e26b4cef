use super::shop::{ShopBrowser, run};
use crate::{OutputFormat, SessionArgs};
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use console::style;
use courses_browser::{ChromePage, ShopSession};
use courses_core::{Basket, DeliverySlotValidator};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct OrderReport {
    previous: usize,
    removed: usize,
    added: Vec<String>,
    unavailable: Vec<String>,
    basket: Basket,
    delivery: Option<DeliveryReport>,
}

#[derive(Debug, Serialize)]
struct DeliveryReport {
    at: NaiveDateTime,
    #[serde(flatten)]
    outcome: DeliveryOutcome,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum DeliveryOutcome {
    Booked { slot: String },
    Failed { error: String },
}

pub fn execute(
    session: &SessionArgs,
    previous: usize,
    delivery: Option<NaiveDateTime>,
    keep_basket: bool,
    format: OutputFormat,
) -> Result<()> {
    // Catch impossible dates before starting Chrome
    if let Some(at) = delivery {
        DeliverySlotValidator::check_window(Local::now().naive_local(), at)?;
    }

    let (report, booking_error) = run(async {
        let (browser, mut shop) = ShopBrowser::open(session).await?;
        let replayed = replay(&mut shop, previous, delivery, keep_basket).await;
        browser.close().await;
        Ok::<_, anyhow::Error>(replayed?)
    })?;

    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Pretty => format_pretty(&report),
    };
    println!("{}", output);

    // The basket changes stand even when the slot could not be booked
    match booking_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

async fn replay(
    shop: &mut ShopSession<ChromePage>,
    previous: usize,
    delivery: Option<NaiveDateTime>,
    keep_basket: bool,
) -> courses_browser::Result<(OrderReport, Option<courses_browser::Error>)> {
    let removed = if keep_basket {
        0
    } else {
        shop.empty_basket().await?
    };

    let plan = shop.add_previous_order_to_basket(previous).await?;

    let mut booking_error = None;
    let delivery = match delivery {
        Some(at) => {
            let outcome = match shop.set_delivery_time(Local::now().naive_local(), at).await {
                Ok(cell) => DeliveryOutcome::Booked {
                    slot: cell.to_string(),
                },
                Err(e) => {
                    let outcome = DeliveryOutcome::Failed {
                        error: e.to_string(),
                    };
                    booking_error = Some(e);
                    outcome
                }
            };
            Some(DeliveryReport { at, outcome })
        }
        None => None,
    };

    let report = OrderReport {
        previous,
        removed,
        added: plan
            .additions
            .iter()
            .map(|item| item.description().to_string())
            .collect(),
        unavailable: shop.unavailable_items().iter().map(str::to_string).collect(),
        basket: shop.basket().clone(),
        delivery,
    };
    Ok((report, booking_error))
}

fn format_pretty(report: &OrderReport) -> String {
    let mut output = String::new();

    if report.removed > 0 {
        output.push_str(&format!(
            "🧹 Removed {} item(s) from the basket\n",
            report.removed
        ));
    }

    output.push_str(&format!(
        "🛒 Added {} item(s) from order #{}\n",
        style(report.added.len()).bold(),
        report.previous
    ));
    for description in &report.added {
        output.push_str(&format!("   + {}\n", description));
    }

    if !report.unavailable.is_empty() {
        output.push_str(&format!(
            "{}\n",
            style(format!(
                "⚠️  {} item(s) no longer available:",
                report.unavailable.len()
            ))
            .yellow()
        ));
        for description in &report.unavailable {
            output.push_str(&format!("   - {}\n", description));
        }
    }

    output.push_str(&format!("📦 Basket now holds {} item(s)\n", report.basket.len()));

    match &report.delivery {
        Some(DeliveryReport {
            at,
            outcome: DeliveryOutcome::Booked { slot },
        }) => output.push_str(&format!(
            "🚚 Delivery booked for {} (slot {})",
            at.format("%A %d %B %H:%M"),
            slot
        )),
        Some(DeliveryReport {
            at,
            outcome: DeliveryOutcome::Failed { error },
        }) => output.push_str(
            &style(format!(
                "❌ Delivery not booked for {}: {}",
                at.format("%A %d %B %H:%M"),
                error
            ))
            .red()
            .to_string(),
        ),
        None => output.push_str("🚚 No delivery slot booked (use --delivery)"),
    }

    output
}
