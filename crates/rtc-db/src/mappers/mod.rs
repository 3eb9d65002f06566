//! Model to entity mappers
//!
//! Conversions between database rows (this crate's models) and domain
//! entities (rtc-core). `From<Model> for Entity` covers reads; inserts bind
//! entity fields directly.

mod membership;
mod message;
mod room;
