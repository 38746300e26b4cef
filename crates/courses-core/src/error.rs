use crate::slot::{SlotCell, SlotStatus};
use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid delivery date {candidate}: {reason}")]
    InvalidDeliveryDate {
        candidate: NaiveDateTime,
        reason: Rejection,
    },

    #[error("Invalid slot cell: {0}")]
    InvalidSlotCell(String),
}

/// Why a delivery candidate was turned down
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("earliest possible delivery is {earliest}")]
    TooSoon { earliest: NaiveDateTime },

    #[error("deliveries must be booked before {latest}")]
    TooLate { latest: NaiveDateTime },

    #[error("{hour}h is outside delivery hours")]
    OutsideServiceHours { hour: u32 },

    #[error("slot {cell} is not available ({status})")]
    SlotUnavailable { cell: SlotCell, status: SlotStatus },
}

impl Error {
    pub(crate) fn rejected(candidate: NaiveDateTime, reason: Rejection) -> Self {
        Error::InvalidDeliveryDate { candidate, reason }
    }

    /// Rejection reason, if this is an invalid delivery date
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Error::InvalidDeliveryDate { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
