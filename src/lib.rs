//! Problem Analyzer - staged reasoning pipeline for business problem statements.
//!
//! A problem statement is sent through an ordered catalog of reasoning stages
//! (vocabulary, current system, twelve VUIA questions, hardness summary). The
//! free-text answers are scored on Volatility, Uncertainty, Interconnectedness
//! and Ambiguity and rolled up into an overall difficulty level.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
