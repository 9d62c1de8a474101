//! Line-oriented JSON-RPC tool server re-exposing the engine operations.

pub mod protocol;
pub mod server;
pub mod tools;

pub use server::RpcServer;
