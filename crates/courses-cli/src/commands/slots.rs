use super::shop::{ShopBrowser, run};
use crate::{OutputFormat, SessionArgs};
use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use console::style;
use courses_core::{DeliverySlotTable, DeliverySlotValidator, SlotStatus};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
struct SlotView {
    date: NaiveDate,
    time: String,
    headers: String,
    available: bool,
}

pub fn execute(session: &SessionArgs, format: OutputFormat) -> Result<()> {
    let table = run(async {
        let (browser, shop) = ShopBrowser::open(session).await?;
        let table = shop.delivery_slots().await;
        browser.close().await;
        Ok::<_, anyhow::Error>(table?)
    })?;

    let slots = slot_views(&table, Local::now().date_naive());
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&slots)?),
        OutputFormat::Pretty => print!("{}", format_pretty(&slots)),
    }

    Ok(())
}

fn slot_views(table: &DeliverySlotTable, today: NaiveDate) -> Vec<SlotView> {
    table
        .iter()
        .filter_map(|(cell, status)| {
            let time = DeliverySlotValidator::column_label(cell.hour_column)?;
            Some(SlotView {
                date: today + Duration::days(i64::from(cell.day_offset)),
                time,
                headers: cell.headers(),
                available: matches!(status, SlotStatus::Available),
            })
        })
        .collect()
}

fn format_pretty(slots: &[SlotView]) -> String {
    let mut by_day: BTreeMap<NaiveDate, Vec<&SlotView>> = BTreeMap::new();
    for slot in slots {
        by_day.entry(slot.date).or_default().push(slot);
    }

    if by_day.is_empty() {
        return "No delivery slots shown by the shop\n".to_string();
    }

    let mut output = String::new();
    for (date, day_slots) in by_day {
        let open: Vec<&str> = day_slots
            .iter()
            .filter(|s| s.available)
            .map(|s| s.time.as_str())
            .collect();

        let line = if open.is_empty() {
            style("full".to_string()).dim().to_string()
        } else {
            style(open.join(", ")).green().to_string()
        };

        output.push_str(&format!("{}  {}\n", date.format("%a %d/%m"), line));
    }
    output
}
