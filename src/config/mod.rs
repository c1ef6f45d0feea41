//! # Configuration Module
//!
//! This module provides the foveation policy shared by encode and decode.

pub mod config;

pub use config::{FoveaConfig, PolePolicy};
