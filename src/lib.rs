//! `census-config` library crate.
//!
//! Typed loading and validation of the census-income pipeline configuration.
//! The binary (`censuscfg`) is a thin wrapper around this library so that the
//! data-preparation and training stages can share one validated [`domain::Config`].

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
