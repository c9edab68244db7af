//! Rust bindings for the EVE Online XML API.
//!
//! # Overview
//!
//! Requests go through a [`Transport`], normally an [`Api`] created from an [`ApiConfig`]. Endpoint
//! groups wrap a transport and turn each XML response into typed data; [`Corp`] covers the
//! `/corp/` endpoints.
//!
//! ```no_run
//! use evelink::{ApiConfig, Corp};
//!
//! let api = ApiConfig::from_key(1234, "verification-code").to_api()?;
//! let corp = Corp::new(api);
//! for (id, member) in corp.members(false)? {
//!     println!("{id}: {}", member.name);
//! }
//! # Ok::<(), evelink::Error>(())
//! ```
//!
//! Every call is a single blocking request. Nothing is cached or retried.
//!
//! # Error Handling
//!
//! Errors are represented by the [`Error`] enum. Errors reported by the API itself (invalid key,
//! corporation not enrolled in faction warfare, ...) are returned as [`Error::Api`]. A response
//! that lacks an expected element or attribute is an error as well; no partial results are
//! returned.
//!
//! # Logging
//!
//! The package uses the [`log`](https://docs.rs/log/latest/log/) crate for logging
//! messages under the `evelink` target. Consider integrating a `log`-compatible logger
//! implementation for better visibility into API calls.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod api;
mod config;
pub mod constants;
mod corp;
mod error;
pub mod parsing;
mod xml;

pub use api::{Api, Params, Transport};
pub use config::ApiConfig;
pub use corp::*;
pub use error::{Error, Result};
pub use xml::{parse_ts, Element, Rowsets};
