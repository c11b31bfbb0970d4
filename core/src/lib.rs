//! Trade desk compliance core.
//!
//! Denied-party screening against a static sanctions reference set, plus the
//! pure helpers that sit next to it on the desk: restricted-country lookup,
//! HS-code duty quotes, order route review, CSV export and the screening log.

pub mod compliance;
pub mod config;
pub mod error;
pub mod export;
pub mod reference;
pub mod screening;
pub mod store;
pub mod tariff;
pub mod types;

pub use config::DeskConfig;
pub use error::{DeskError, DeskResult};
pub use screening::{MatchType, ScreeningEngine, ScreeningMatch};
