//! Herberg DB - flat-file implementation of the storage trait.

pub mod file_store;

pub use file_store::FileStore;
