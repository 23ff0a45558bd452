//! Typed request and response payloads for the SideShift API.

pub mod common;
pub mod shifts;

pub use common::*;
pub use shifts::*;
