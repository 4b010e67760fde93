//! Driven adapters implementing the domain's repository and hashing ports.
//!
//! Adapters translate between domain types and infrastructure
//! representations and hold no business rules.

#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod persistence;
pub mod security;
