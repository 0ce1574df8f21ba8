//! HTTP client for the Denea Easy FTT ERP API.
//!
//! The ERP exposes a polled product feed; [`DeneaClient::fetch_products`]
//! pulls it and normalizes the payload through the core parsers. The
//! webhook signing secret also lives in [`DeneaConfig`] since it is a
//! Denea-issued credential.

pub mod client;
pub mod config;

pub use client::{DeneaClient, DeneaError};
pub use config::DeneaConfig;
