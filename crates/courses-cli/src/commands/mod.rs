pub mod basket;
pub mod check_date;
pub mod completion;
pub mod empty;
pub mod order;
pub mod profile;
pub mod shop;
pub mod slots;
