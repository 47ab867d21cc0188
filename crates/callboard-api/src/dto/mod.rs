//! Data Transfer Objects (DTOs) for API requests and responses

pub mod call;
pub mod common;
pub mod dashboard;
pub mod format;

pub use call::*;
pub use common::*;
pub use dashboard::*;
