//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for insurance, tax, salary
//! and monthly payroll calculations.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{InsuranceRequest, PayrollRunRequest, SalaryEstimateRequest, TaxRequest};
pub use response::{ApiError, ApiErrorResponse, PayrollRunResponse, TaxResponse};
pub use state::AppState;
