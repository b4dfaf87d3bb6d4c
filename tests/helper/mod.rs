#![allow(dead_code)]

pub mod http;
pub mod sink;

pub use http::ScriptedClient;
pub use sink::spawn_entry_collector;
