//! Client SDK for the resa booking API.
//!
//! [`ResaClient`] wraps the REST endpoints of the booking server: flight
//! search, seat availability, reservation booking/cancellation and
//! payment settlement.

mod client;
mod error;

pub use client::ResaClient;
pub use error::SdkError;
