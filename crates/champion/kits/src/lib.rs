//! Authored action kits for concrete champions.
//!
//! Kits are static content: action tables and their ledgers, declared
//! once and registered onto a [`champion_core::ActionDispatcher`]. They
//! never appear in core state; the core only ever sees the handler
//! tables a kit builds.

pub mod melee;

pub use melee::{SLOT_DASH, SLOT_SLASH, register_kit};
