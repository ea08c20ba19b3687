#![doc(test(attr(deny(warnings))))]

//! Walleto Core offers the reactive ledger state, derived aggregates, and
//! persistence primitives that power the Walleto finance tracker UI.

pub mod domain;
pub mod errors;
pub mod storage;
pub mod store;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Walleto Core tracing initialized.");
    });
}
