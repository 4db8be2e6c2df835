//! hotelprep: Booking Cancellation Data Preparation
//!
//! A library for preparing hotel booking datasets for a cancellation
//! classifier: column cleanup, label encoding, skew correction and
//! SMOTE class balancing, plus the form-to-feature boundary of the
//! prediction service.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod serving;
pub mod utils;
