//! Configuration adapters

pub mod store;

pub use store::TomlConfigStore;
