//! Application layer: the reconciliation engine and the session dispatcher.

mod dispatcher;
mod reconciliation;

pub use dispatcher::{Dispatcher, Reply};
pub use reconciliation::ReconciliationEngine;
