//! # Core Geometry Module
//!
//! Angle normalization and the angle-to-pixel mapping of an equirectangular
//! frame. Everything else in the crate talks in pixels; this is where
//! degrees turn into columns and rows.

pub mod angle;

pub use angle::{constrain_angle, constrain_angle_f64, AngleMapper};
