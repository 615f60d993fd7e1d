//! Domain layer - pure business logic, no I/O.

pub mod cart;
pub mod catalog;
pub mod foundation;
pub mod session;
