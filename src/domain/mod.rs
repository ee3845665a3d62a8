//! Domain layer containing the intake rules and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, timestamps, errors, state machines)
//! - `validation` - Pure field validators
//! - `intake` - Dialogue state, session aggregate and conversation engine
//! - `complaint` - The finished complaint record

pub mod complaint;
pub mod foundation;
pub mod intake;
pub mod validation;
