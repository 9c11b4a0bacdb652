//! nutriscreen-engine
//!
//! Turns a child's measurements into WHO growth-standard classifications.
//! Each indicator resolves through boundary tables first and median/SD
//! z-scores second; [`assess::Engine`] runs all five and rolls them up into a
//! nutritional risk level with recommendations.
//!
//! Everything here is synchronous and pure over an immutable
//! [`ReferenceStore`](nutriscreen_standards::store::ReferenceStore).

pub mod age;
pub mod assess;
pub mod classify;
pub mod config;
pub mod error;
pub mod index;
pub mod indicators;
pub mod risk;
pub mod strategy;

pub use assess::Engine;
pub use config::EngineConfig;
pub use error::EngineError;
