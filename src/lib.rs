//! Finance Tracker - personal finance profile service
//!
//! Stores one financial profile per username (income, debt, needs and wants)
//! behind a pluggable store, and exposes upsert and read over HTTP.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
