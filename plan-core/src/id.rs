//! Typed integer identifiers for sub-goals and turns.
//!
//! spec.md models both as plain `int`. `original_source/` shows the Python
//! source kept both in a single untyped `int` space (`state.py`), which is
//! exactly the kind of "dict-typed state with unknown extra keys" confusion
//! spec.md §9 asks a systems reimplementation to design away. These newtypes
//! prevent a `TurnId` from being passed where a `SubGoalId` is expected —
//! the wire representation (a bare integer) is unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed integer ID wrappers. Plain `u64` underneath — the protocol doesn't
/// care how IDs are allocated, only that the two spaces aren't confused.
macro_rules! typed_int_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// The reserved value used for the normalizer's context slot table.
            pub const ZERO: $name = $name(0);

            /// Returns the next id in sequence.
            pub fn next(self) -> Self {
                $name(self.0 + 1)
            }

            /// The raw integer value.
            pub fn value(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(v: u64) -> Self {
                $name(v)
            }
        }
    };
}

typed_int_id!(SubGoalId, "Unique, strictly increasing id of a sub-goal within a turn. `0` is reserved for the normalizer's context slot table.");
typed_int_id!(TurnId, "Unique id of a completed conversational turn.");
