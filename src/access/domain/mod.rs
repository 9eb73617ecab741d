//! Domain types for caller identity and access decisions.

mod caller;
mod error;

pub use caller::{AccessAction, AccessResource, CallerContext};
pub use error::AccessError;
