//! Admission rules for inbound requests.
//!
//! Decides whether a decoded packet is answered or silently dropped.
//! A drop is not an error of the server: the reason is logged and the
//! next packet is processed normally.

mod filter;

pub use filter::{should_discard, DiscardReason};
