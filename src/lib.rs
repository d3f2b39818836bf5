//! Chainsight Gateway - Authentication gateway for the Chainsight platform
//!
//! Owns the post-authentication redirect flow (auth callback → session
//! exchange → role lookup → redirect) and the role directory that answers
//! administrator checks for the supply-chain analytics product.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
