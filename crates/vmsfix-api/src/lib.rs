// vmsfix-api: Async client for the VMS management RPC-over-HTTP API

pub mod auth;
pub mod error;
pub mod rest;
pub mod rpc;
pub mod transport;

pub use auth::RootCredentials;
pub use error::Error;
pub use rpc::RpcClient;
pub use rpc::models;
