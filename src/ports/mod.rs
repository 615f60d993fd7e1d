//! Port interfaces between the core engine and its external collaborators.

mod cart_store;
mod catalog_client;
mod session_store;

pub use cart_store::{CartStore, NewCartLine};
pub use catalog_client::CatalogClient;
pub use session_store::SessionStore;
