use super::{DeliverySlotTable, SlotCell};
use crate::{Error, Rejection, Result};
use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};

const FIRST_HOUR: u32 = 7;
const LAST_HOUR: u32 = 21;
const BOOKING_HORIZON_DAYS: i64 = 6;
/// Tomorrow noon, counted from today's midnight
const EARLIEST_HOURS_FROM_MIDNIGHT: i64 = 36;

/// The grid renders an extra "12h30" column right after 12h, so every
/// column from 13h onwards sits one to the right of its hour.
const HALF_PAST_NOON_AFTER_HOUR: u32 = 12;

/// Decides whether a delivery date can be booked
pub struct DeliverySlotValidator;

impl DeliverySlotValidator {
    /// Check the booking window and delivery hours, returning the grid
    /// cell the candidate falls into. Slot availability is not checked.
    pub fn check_window(now: NaiveDateTime, candidate: NaiveDateTime) -> Result<SlotCell> {
        let earliest = Self::earliest(now);
        if candidate < earliest {
            return Err(Error::rejected(candidate, Rejection::TooSoon { earliest }));
        }

        let latest = now + Duration::days(BOOKING_HORIZON_DAYS);
        if candidate >= latest {
            return Err(Error::rejected(candidate, Rejection::TooLate { latest }));
        }

        let hour = candidate.hour();
        if !(FIRST_HOUR..=LAST_HOUR).contains(&hour) {
            return Err(Error::rejected(
                candidate,
                Rejection::OutsideServiceHours { hour },
            ));
        }

        let day_offset = candidate
            .date()
            .signed_duration_since(now.date())
            .num_days();

        // Rule 1 already guarantees a positive offset
        Ok(SlotCell::new(Self::hour_column(hour), day_offset as u32))
    }

    /// Full check: booking window, delivery hours, and the grid cell being open
    pub fn validate(
        now: NaiveDateTime,
        candidate: NaiveDateTime,
        table: &DeliverySlotTable,
    ) -> Result<SlotCell> {
        let cell = Self::check_window(now, candidate)?;

        let status = table.status(cell);
        if !status.is_available() {
            tracing::debug!("Slot {} for {} is {}", cell, candidate, status);
            return Err(Error::rejected(
                candidate,
                Rejection::SlotUnavailable { cell, status },
            ));
        }

        tracing::debug!("Slot {} accepted for {}", cell, candidate);
        Ok(cell)
    }

    /// Earliest bookable moment: tomorrow at noon
    pub fn earliest(now: NaiveDateTime) -> NaiveDateTime {
        now.date().and_time(NaiveTime::default()) + Duration::hours(EARLIEST_HOURS_FROM_MIDNIGHT)
    }

    /// Grid column of a delivery hour, counting from 1 at 7h
    pub fn hour_column(hour: u32) -> u32 {
        let column = hour.saturating_sub(FIRST_HOUR) + 1;
        if hour > HALF_PAST_NOON_AFTER_HOUR {
            column + 1
        } else {
            column
        }
    }

    /// Label of a grid column, inverse of `hour_column`
    pub fn column_label(column: u32) -> Option<String> {
        let noon_column = Self::hour_column(HALF_PAST_NOON_AFTER_HOUR);
        let last_column = Self::hour_column(LAST_HOUR);
        match column {
            0 => None,
            c if c <= noon_column => Some(format!("{}h", c + FIRST_HOUR - 1)),
            c if c == noon_column + 1 => Some(format!("{}h30", HALF_PAST_NOON_AFTER_HOUR)),
            c if c <= last_column => Some(format!("{}h", c + FIRST_HOUR - 2)),
            _ => None,
        }
    }
}
