// RPC API client modules
//
// Every management call is a POST of `{ method, data }` to `{origin}/grpc`.
// Each vendor service lives in its own file as inherent methods on
// `RpcClient`, keeping `client.rs` focused on transport mechanics.

pub mod client;
pub mod config;
pub mod domain;
pub mod groups;
pub mod layouts;
pub mod logic;
pub mod maps;
pub mod models;
pub mod security;

pub use client::RpcClient;
