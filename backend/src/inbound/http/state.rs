//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{Accounts, Catalog, EnrollmentLedger};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn Accounts>,
    pub catalog: Arc<dyn Catalog>,
    pub ledger: Arc<dyn EnrollmentLedger>,
}

impl HttpState {
    /// Construct state from port implementations.
    pub fn new(
        accounts: Arc<dyn Accounts>,
        catalog: Arc<dyn Catalog>,
        ledger: Arc<dyn EnrollmentLedger>,
    ) -> Self {
        Self {
            accounts,
            catalog,
            ledger,
        }
    }
}
