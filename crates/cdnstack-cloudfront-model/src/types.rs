//! Decoded response types for the CloudFront distribution API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of backing content source behind an [`Origin`].
///
/// On the wire the kind is carried by the name of the origin config
/// element, not by an attribute or a dedicated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OriginKind {
    /// An object-storage bucket origin (`S3Origin`).
    S3,
    /// A custom HTTP(S) origin (`CustomOriginConfig`).
    Custom,
}

impl OriginKind {
    /// Returns the wire element name for this origin kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S3 => "S3Origin",
            Self::Custom => "CustomOriginConfig",
        }
    }

    /// Maps a wire element name to an origin kind, if it names one.
    #[must_use]
    pub fn from_element(name: &str) -> Option<Self> {
        match name {
            "S3Origin" => Some(Self::S3),
            "CustomOriginConfig" => Some(Self::Custom),
            _ => None,
        }
    }
}

impl std::fmt::Display for OriginKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A content source a distribution pulls from.
///
/// `kind` stays unset until the enclosing `S3Origin` or
/// `CustomOriginConfig` element is seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    pub kind: Option<OriginKind>,
    pub id: Option<String>,
    pub dns_name: String,
    pub origin_access_identity: Option<String>,
    pub http_port: Option<i32>,
    pub https_port: Option<i32>,
    pub origin_protocol_policy: Option<String>,
}

/// An alternate DNS name a distribution answers for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub id: String,
}

/// One distribution record from a `ListDistributions` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub id: String,
    pub status: String,
    pub domain_name: String,
    pub comment: Option<String>,
    pub enabled: bool,
    pub last_modified: Option<DateTime<Utc>>,
    pub cname: Vec<String>,
    pub aliases: Vec<Alias>,
    pub trusted_signers: Vec<String>,
    pub origins: Vec<Origin>,
}

/// A complete decoded `ListDistributions` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionList {
    pub distributions: Vec<DistributionSummary>,
    pub is_truncated: bool,
    pub marker: String,
    pub next_marker: Option<String>,
    pub max_items: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_map_origin_kind_to_element_name() {
        assert_eq!(OriginKind::S3.as_str(), "S3Origin");
        assert_eq!(OriginKind::Custom.as_str(), "CustomOriginConfig");
        assert_eq!(OriginKind::from_element("S3Origin"), Some(OriginKind::S3));
        assert_eq!(
            OriginKind::from_element("CustomOriginConfig"),
            Some(OriginKind::Custom)
        );
        assert_eq!(OriginKind::from_element("Origin"), None);
    }

    #[test]
    fn test_should_default_summary_with_empty_collections() {
        let summary = DistributionSummary::default();
        assert!(summary.cname.is_empty());
        assert!(summary.aliases.is_empty());
        assert!(summary.trusted_signers.is_empty());
        assert!(summary.origins.is_empty());
        assert!(!summary.enabled);
        assert!(summary.last_modified.is_none());
    }
}
