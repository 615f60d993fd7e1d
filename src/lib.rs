//! Fishmonger - Conversational Storefront Engine
//!
//! Implements the session state machine and cart reconciliation logic for a
//! chat-driven shop backed by a remote CMS. The chat transport itself is an
//! external collaborator; it decodes user input into [`domain::session::UserAction`]
//! values and renders the [`domain::session::RenderInstruction`] values produced
//! by [`application::Dispatcher::handle_action`].

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
