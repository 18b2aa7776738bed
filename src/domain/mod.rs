pub mod email;
pub mod types;

pub use email::{EmailEntry, OutboundRequest};
pub use types::{Classification, ProcessedEmail};
