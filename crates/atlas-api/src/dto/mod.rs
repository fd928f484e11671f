//! Response envelopes.

pub mod response;
