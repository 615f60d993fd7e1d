//! Strapi CMS adapters.
//!
//! The shop's catalog and carts live in a Strapi instance. These adapters
//! implement the `CatalogClient` and `CartStore` ports over its REST API
//! with bearer-token auth and bounded request timeouts.

mod cart;
mod catalog;
mod client;

pub use cart::StrapiCartStore;
pub use catalog::StrapiCatalogClient;
pub use client::StrapiClient;
