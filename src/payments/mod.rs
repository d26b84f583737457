//! # Payments Module
//!
//! This module handles payment functionality including:
//! - Transaction initialization against the payment gateway
//! - Verification of a transaction by its reference

pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;


pub use routes::payments_routes;
