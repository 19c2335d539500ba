//! tokenlist-sync library
//!
//! Builds the BNB Beacon Chain token list from Binance DEX data

pub mod amount;
pub mod bootstrap;
pub mod clients;
pub mod config;
pub mod error;
pub mod persistence;
pub mod tokenlist;
pub mod types;
pub mod updater;

pub use error::{Result, UpdateError};
