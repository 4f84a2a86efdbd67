//! Request handlers for the gateway

pub mod backup;
pub mod bids;
pub mod clients;
pub mod dashboard;
pub mod documents;
pub mod events;
pub mod financial;
pub mod health;
pub mod history;
pub mod lookup;
pub mod profile;
pub mod reports;
