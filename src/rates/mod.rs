//! Exchange-rate resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Convert request (from, to, amount)
//!     → resolver.rs (existence check, then direct / reverse / via-base)
//!     → Conversion (rate, rounded amounts, method tag)
//! ```
//!
//! # Design Decisions
//! - Explicit sequential branches instead of one combined query; the first
//!   satisfied branch is authoritative
//! - Derived rates are never persisted

mod resolver;

pub use resolver::{Conversion, RateMethod, RateResolver};
