//! Domain models for Callboard
//!
//! The call record delivered by the voice-agent platform and the closed
//! category sets derived from it.

pub mod call;
pub mod category;
mod lenient;

pub use call::{CallCost, CallRecord};
pub use category::{Badge, BadgeColor, BadgeIcon, CallOutcome, CallStatus, Sentiment};
