//! Step definitions for order lifecycle scenarios.

mod then;
mod when;
