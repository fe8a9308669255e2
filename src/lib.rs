//! HMPI - heavy metal pollution indices for water samples
//!
//! Computes the Heavy Metal Pollution Index (HPI), Heavy Metal Evaluation
//! Index (HEI) and contamination degree (Cd) of a water sample from its
//! metal concentrations, classifies the health risk, and aggregates
//! evaluated samples into dashboard statistics.

pub mod analytics;
pub mod config;
pub mod engine;
pub mod models;
pub mod reporters;
