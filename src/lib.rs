#![doc(test(attr(deny(warnings))))]

//! Tasting Core records structured wine-tasting evaluations (sight, nose,
//! palate, conclusion) for red, white and rosé wines, keeps them in one
//! document collection per category and drives the form and archive screens
//! a front-end renders.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use errors::{Result, TastingError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Tasting Core tracing initialized.");
    });
}
