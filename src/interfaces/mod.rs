//! Caller-facing surfaces: wire DTOs and the JSON-RPC tool server.

pub mod dto;
pub mod rpc;
