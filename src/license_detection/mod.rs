//! License detection engine.
//!
//! Pipeline, leaves first: [`token`] → [`reference`] → [`index`] →
//! [`corpus`] → [`candidate`] → [`scorer`] → [`arbiter`], tied together by
//! [`detector::Detector`].

pub mod arbiter;
pub mod candidate;
pub mod corpus;
pub mod diff;
pub mod detector;
pub mod index;
pub mod license_match;
pub mod ngram;
pub mod reference;
pub mod scorer;
pub mod token;

pub use corpus::Corpus;
pub use detector::Detector;
pub use license_match::LicenseMatch;
pub use reference::License;
pub use token::Token;
