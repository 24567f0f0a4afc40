//! STACKS application library
//!
//! Entity modules (authors, books, users) plus the payload validation and
//! pagination helpers they share.

pub mod modules;
pub mod pagination;
pub mod validation;
