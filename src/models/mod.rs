pub mod ledger;
pub mod partner;
pub mod stock;
pub mod transaction;
pub mod user;
