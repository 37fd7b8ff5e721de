//! Shared API plumbing: the response envelope and error mapping used by
//! every handler.

pub mod common;
