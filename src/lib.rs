//! Computes payment due dates for a batch of invoices.
//!
//! Each invoice row carries an invoice date and a payment terms code. The
//! [`engine::Pipeline`] checks the file's columns, validates every date,
//! applies the matching [`terms::TermsRule`] and returns the rows sorted by due
//! date. Rows that cannot be processed carry an error message in place of the
//! due date.

pub mod args;
pub mod batch;
pub mod calendar;
pub mod config;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod ordering;
pub mod report;
pub mod run;
pub mod terms;
pub mod validator;
