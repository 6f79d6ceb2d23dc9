//! Envelope-returning clients over the store actors.

mod product_client;

pub use product_client::*;
