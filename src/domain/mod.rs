//! Domain types shared by the store, the reducer and the view layer.

pub mod envelope;
pub mod product;

pub use envelope::*;
pub use product::*;
