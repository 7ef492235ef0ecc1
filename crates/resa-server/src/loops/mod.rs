//! Background loops for continuous processing.

pub mod hold_expiry;
