//! Voyage ticketing ledger.
//!
//! A batch tool that answers: "given this file of ticketing commands, what
//! did each one do, and where does every voyage's revenue stand?"

pub mod command;
pub mod config;
pub mod domain;
pub mod ledger;
pub mod render;
pub mod session;
