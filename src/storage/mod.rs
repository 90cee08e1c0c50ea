// src/storage/mod.rs
//!
//! Storage Module
//!
//! Steps for moving the content store to another folder.

#[cfg(test)]
mod tests;
pub mod transfer;

pub use transfer::{TransferContentContext, TransferError, ValidateDestinationFolder};
