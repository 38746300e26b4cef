use crate::OutputFormat;
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use courses_core::DeliverySlotValidator;

/// Check a delivery date against the booking window without opening the shop
pub fn execute(
    candidate: NaiveDateTime,
    now: Option<NaiveDateTime>,
    format: OutputFormat,
) -> Result<()> {
    let now = now.unwrap_or_else(|| Local::now().naive_local());
    tracing::debug!("Checking {} against now = {}", candidate, now);

    let cell = DeliverySlotValidator::check_window(now, candidate)?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "at": candidate,
                "slot": cell.headers(),
                "day_offset": cell.day_offset,
                "hour_column": cell.hour_column,
            })
        ),
        OutputFormat::Pretty => println!(
            "✅ {} is within the booking window (slot {})",
            candidate.format("%Y-%m-%d %H:%M"),
            cell
        ),
    }

    Ok(())
}
