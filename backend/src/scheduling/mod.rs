//! The availability and booking-eligibility engine.
//!
//! Pure, synchronous functions over snapshots the caller supplies: slot
//! generation, schedule validity, per-chair availability projection, and the
//! booking/cancel/confirm predicates. Wall-clock time is always injected so
//! every predicate is deterministic and testable.

pub mod availability;
pub mod eligibility;
pub mod slots;
pub mod validity;
