//! # Repository Accessors
//!
//! Explicit database accessor functions, grouped per table. Handlers call
//! these instead of embedding SQL; relationships are walked by foreign id
//! rather than through ORM-style back-references, so every query a handler
//! triggers is visible at the call site.

pub mod requests;
pub mod services;
pub mod users;
