//! Data model for the CDNStack CloudFront control plane.
//!
//! This crate holds the plain data types exchanged with the
//! distribution management API:
//!
//! - the decoded response model for `ListDistributions`
//!   ([`DistributionList`] and its nested [`DistributionSummary`],
//!   [`Origin`], [`Alias`] records), and
//! - the encoder input model ([`ConfigValue`] / [`ConfigMap`]), a
//!   nested value tree whose mapping keys keep insertion order because
//!   XML tag order is significant on the wire.
//!
//! The XML wire format itself lives in `cdnstack-cloudfront-xml`.

// Wire-model structs mirror the remote schema field-for-field; the
// field names are the documentation.
#![allow(missing_docs)]

pub mod config;
pub mod types;

pub use config::{ConfigMap, ConfigValue};
pub use types::{Alias, DistributionList, DistributionSummary, Origin, OriginKind};
