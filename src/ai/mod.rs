pub mod client;
mod inference;

pub use client::ClassifierClient;
pub use inference::ProcessError;
