//! Shared primitive types used across the desk.

/// Stable identifier of a sanctioned entity in the reference list.
pub type EntityId = u32;

/// Two-letter ISO 3166 country code, stored uppercase.
pub type CountryCode = String;

/// Match confidence, 0..=100.
pub type Confidence = u8;

/// Identifier of a recorded screening in the log.
pub type ScreeningId = String;
