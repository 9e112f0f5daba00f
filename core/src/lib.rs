//! Commission rules engine.
//!
//! Pure calculators for the SDR and Closer roles, the checkpoint
//! classifier and MRR normalization they share, plus the versioned
//! configuration model and its SQLite repository.
//!
//! DEPENDENCY ORDER (leaves first):
//!   config -> checkpoint -> mrr -> sdr / closer -> commission
//!
//! RULES:
//!   - Calculators never fail and never touch the store.
//!   - Configuration is passed in explicitly on every call.
//!   - Every MRR figure goes through mrr::monthly_recurring_revenue.

pub mod checkpoint;
pub mod closer;
pub mod commission;
pub mod config;
pub mod error;
pub mod goal;
pub mod mrr;
pub mod sdr;
pub mod store;
pub mod types;
