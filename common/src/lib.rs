//! Maven coordinate model and default-layout codec shared by the nexus-sync
//! tools.
//!
//! The crate is pure: it maps relative repository paths to [`Gav`]
//! coordinates and back without touching the filesystem or the network.

pub mod error;
pub mod gav;
pub mod layout;

pub use error::{GavError, LayoutError};
pub use gav::{Gav, GavField, QA_REPORT_CLASSIFIER};
pub use layout::{decode, decode_dotted};
