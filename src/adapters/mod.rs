//! Adapter implementations of the ports.

pub mod session;
pub mod strapi;
