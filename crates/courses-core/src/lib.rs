pub mod error;
pub mod item;
pub mod matcher;
pub mod slot;

pub use error::{Error, Rejection, Result};
pub use item::{Basket, Item, UnavailableItems};
pub use matcher::{ReorderPlan, plan_empty, plan_reorder};
pub use slot::{DeliverySlotTable, DeliverySlotValidator, SlotCell, SlotStatus};
