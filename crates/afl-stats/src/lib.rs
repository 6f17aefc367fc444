// Library root: declares the public modules used by the binary and the
// integration tests.

pub mod config;
pub mod processor;
pub mod stats;
