//! Message-level types: data unit identifiers, NID field layout, and the messages
//! emitted to the listener.

pub mod duid;
pub mod fields;
pub mod msg;
