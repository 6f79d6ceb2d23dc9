//! Product-specific store logic: how a [`Product`](crate::domain::Product) plugs
//! into the generic resource actor, and the filters it answers.

pub mod entity;
mod query;

pub use query::*;
