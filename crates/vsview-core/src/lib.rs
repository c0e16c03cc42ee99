pub mod config;
pub mod consts;
pub mod convert;
pub mod engine;
pub mod error;
pub mod frame;
pub mod io;
pub mod job;
pub mod script;
pub mod source;
pub mod store;
pub mod viewport;
