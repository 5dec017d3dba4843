pub mod engine;
pub mod erlang;
