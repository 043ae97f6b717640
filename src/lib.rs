//! Payroll computation engine.
//!
//! This crate computes monthly payroll for a jurisdiction with a capped
//! social insurance contribution base and a progressive income tax: employee
//! and employer insurance contributions, the housing fund, taxable income,
//! income tax and net pay, plus an HTTP API over those calculations.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
