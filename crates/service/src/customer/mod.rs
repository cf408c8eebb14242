//! Customer module: three-layer architecture (domain, repository, service).
//!
//! The orchestrator in `service` owns the write path; every mutation runs
//! through the validator, and deletion is guarded by the accounts gateway.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod validator;

pub mod repo {
    pub mod seaorm;
}

pub use service::CustomerService;
