//! Module for core business logic services.
//!
//! This module encapsulates the operations behind each API area and
//! orchestrates interactions between the handlers and the collections.

pub mod addresses;
pub mod cart;
pub mod catalog;
pub mod orders;
