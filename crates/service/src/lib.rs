//! Business layer for the customer service.
//! - `customer`: domain types, field validation, persistence abstraction, and
//!   the orchestrator that owns the write path.
//! - `accounts`: synchronous guard check against the external bank-accounts
//!   service.

pub mod accounts;
pub mod customer;
