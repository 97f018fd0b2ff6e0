//! Pathways Core — persona classification and provider recommendation engine
//! for a family-building journey platform.

pub mod concierge;
pub mod config;
pub mod error;
pub mod persona;
pub mod recommend;
pub mod store;
