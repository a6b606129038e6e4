//! Block coding used by P25 data units: bit interleaving and the half-rate trellis
//! convolutional code.

pub mod interleave;
pub mod trellis;
