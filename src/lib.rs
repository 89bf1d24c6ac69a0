//! Site/locale URL routing engine.
//!
//! Resolves which site and locale a storefront URL belongs to, and builds
//! URLs that encode a site and locale under a configurable policy.
//!
//! ```ignore
//! use siteroute::{config::RoutingConfig, routing::RoutingEngine};
//!
//! let engine = RoutingEngine::new(RoutingConfig::discover("routing.toml".as_ref())?)?;
//! let locale = engine.resolve_locale_from_url("/uk/fr/women")?;
//! ```

pub mod logger;

pub mod cli;
pub mod config;
pub mod core;
pub mod query;
pub mod routing;
