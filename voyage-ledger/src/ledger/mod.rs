//! The voyage ledger and its operations.
//!
//! The ledger owns every live voyage and is the only thing that mutates
//! them. Each public operation corresponds to one command and returns either
//! the data the renderer needs or a single [`DomainError`](crate::domain::DomainError).

mod book;
mod request;


pub use book::Ledger;
pub use request::{InitVoyage, Receipt, Tariff, VoyageSummary};
