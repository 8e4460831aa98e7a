//! Pure wheel-layout rules shared by the wheelshift crates.
//!
//! Nothing in here touches the filesystem or the network: [`identity`] turns a
//! wheel filename into a [`WheelIdentity`], and [`layout`] decides where each
//! file inside the wheel should land once it is republished.

pub mod identity;
pub mod layout;

// Re-exports
pub use identity::WheelIdentity;
pub use layout::{PathCategory, Router, RoutingDecision, TOOLING_DIR, classify, route};

/// File extension every wheel archive carries.
pub const WHEEL_EXTENSION: &str = ".whl";
