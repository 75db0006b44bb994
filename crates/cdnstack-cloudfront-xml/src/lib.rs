//! XML codec for the CDNStack CloudFront control plane.
//!
//! This crate converts between the model types in
//! `cdnstack-cloudfront-model` and the CloudFront XML wire format:
//!
//! - [`decode_distribution_list`] parses a `ListDistributions`-shaped
//!   response document into a [`DistributionList`], disambiguating
//!   reused element names (`Id` in particular) by nesting context.
//! - [`encode_distribution_config`] serializes a
//!   [`ConfigValue`] mapping into a `DistributionConfig` body;
//!   [`distribution_config_document`] additionally wraps it in the XML
//!   declaration and namespaced envelope.
//!
//! # CloudFront XML conventions
//!
//! - Namespace: `http://cloudfront.amazonaws.com/doc/2010-11-01/`
//! - Booleans: lowercase `true`/`false`; on decode, exactly the
//!   literal `true` is true and everything else is false
//! - Timestamps: ISO 8601 (`2012-02-03T16:45:09Z`)
//! - XML declaration: `<?xml version="1.0" encoding="UTF-8"?>`
//!
//! Both directions are single-pass, synchronous, and own all of their
//! accumulator state, so concurrent calls on independent inputs need
//! no coordination. Transport, retries, and signing live elsewhere;
//! this crate only turns bytes into values and values into bytes.

pub mod coerce;
pub mod decode;
pub mod encode;
pub mod error;

pub use cdnstack_cloudfront_model::{
    Alias, ConfigMap, ConfigValue, DistributionList, DistributionSummary, Origin, OriginKind,
};
pub use decode::decode_distribution_list;
pub use encode::{
    CLOUDFRONT_NAMESPACE, distribution_config_document, encode_distribution_config,
};
pub use error::XmlError;

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: Vec<(&str, ConfigValue)>) -> ConfigMap {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    /// A one-item list document built by the encoder decodes back to
    /// the summary it was built from.
    fn round_trip(summary_fields: ConfigMap) -> DistributionSummary {
        let config = ConfigValue::Map(map(vec![(
            "DistributionSummary",
            ConfigValue::Map(summary_fields),
        )]));
        let doc =
            encode::document_with_reference(&config, "1714567800").expect("encoding should succeed");
        let list = decode_distribution_list(doc.as_bytes()).expect("decoding should succeed");
        assert_eq!(list.distributions.len(), 1);
        list.distributions.into_iter().next().expect("one summary")
    }

    #[test]
    fn test_should_round_trip_s3_origin_summary() {
        let summary = round_trip(map(vec![
            ("Id", ConfigValue::from("D1")),
            ("Status", ConfigValue::from("Deployed")),
            ("DomainName", ConfigValue::from("d1.cloudfront.net")),
            ("Comment", ConfigValue::from("primary")),
            ("Enabled", ConfigValue::Bool(true)),
            (
                "LastModifiedTime",
                ConfigValue::from("2024-05-01T12:30:00Z"),
            ),
            (
                "CNAME",
                ConfigValue::List(vec![ConfigValue::from("cdn.example.com")]),
            ),
            (
                "Origins",
                ConfigValue::Map(map(vec![
                    ("Quantity", ConfigValue::Int(1)),
                    (
                        "Items",
                        ConfigValue::Map(map(vec![(
                            "Origin",
                            ConfigValue::List(vec![ConfigValue::Map(map(vec![
                                (
                                    "S3Origin",
                                    ConfigValue::Map(map(vec![
                                        (
                                            "DNSName",
                                            ConfigValue::from("bucket.s3.amazonaws.com"),
                                        ),
                                        (
                                            "OriginAccessIdentity",
                                            ConfigValue::from(
                                                "origin-access-identity/cloudfront/E1",
                                            ),
                                        ),
                                    ])),
                                ),
                                ("Id", ConfigValue::from("O1")),
                            ]))]),
                        )])),
                    ),
                ])),
            ),
        ]));

        assert_eq!(summary.id, "D1");
        assert_eq!(summary.status, "Deployed");
        assert_eq!(summary.domain_name, "d1.cloudfront.net");
        assert_eq!(summary.comment.as_deref(), Some("primary"));
        assert!(summary.enabled);
        assert_eq!(
            summary
                .last_modified
                .expect("timestamp should be set")
                .to_rfc3339(),
            "2024-05-01T12:30:00+00:00"
        );
        assert_eq!(summary.cname, vec!["cdn.example.com"]);
        assert_eq!(summary.origins.len(), 1);
        let origin = &summary.origins[0];
        assert_eq!(origin.kind, Some(OriginKind::S3));
        assert_eq!(origin.id.as_deref(), Some("O1"));
        assert_eq!(origin.dns_name, "bucket.s3.amazonaws.com");
        assert_eq!(
            origin.origin_access_identity.as_deref(),
            Some("origin-access-identity/cloudfront/E1")
        );
        assert!(origin.http_port.is_none());
        assert!(origin.https_port.is_none());
    }

    #[test]
    fn test_should_round_trip_custom_origin_summary() {
        let summary = round_trip(map(vec![
            ("Id", ConfigValue::from("D2")),
            ("Enabled", ConfigValue::Bool(false)),
            (
                "Origins",
                ConfigValue::Map(map(vec![(
                    "Items",
                    ConfigValue::Map(map(vec![(
                        "Origin",
                        ConfigValue::List(vec![ConfigValue::Map(map(vec![
                            (
                                "CustomOriginConfig",
                                ConfigValue::Map(map(vec![
                                    ("DNSName", ConfigValue::from("www.example.com")),
                                    ("HTTPPort", ConfigValue::Int(8080)),
                                    ("HTTPSPort", ConfigValue::Int(8443)),
                                    (
                                        "OriginProtocolPolicy",
                                        ConfigValue::from("match-viewer"),
                                    ),
                                ])),
                            ),
                            ("Id", ConfigValue::from("O2")),
                        ]))]),
                    )])),
                )])),
            ),
        ]));

        assert_eq!(summary.id, "D2");
        assert!(!summary.enabled);
        assert!(summary.comment.is_none());
        assert!(summary.last_modified.is_none());
        let origin = &summary.origins[0];
        assert_eq!(origin.kind, Some(OriginKind::Custom));
        assert_eq!(origin.id.as_deref(), Some("O2"));
        assert_eq!(origin.dns_name, "www.example.com");
        assert_eq!(origin.http_port, Some(8080));
        assert_eq!(origin.https_port, Some(8443));
        assert_eq!(origin.origin_protocol_policy.as_deref(), Some("match-viewer"));
        assert!(origin.origin_access_identity.is_none());
    }

    #[test]
    fn test_should_round_trip_aliases_block() {
        let summary = round_trip(map(vec![
            (
                "Aliases",
                ConfigValue::Map(map(vec![(
                    "Items",
                    ConfigValue::Map(map(vec![(
                        "Id",
                        ConfigValue::List(vec![
                            ConfigValue::from("A1"),
                            ConfigValue::from("A2"),
                        ]),
                    )])),
                )])),
            ),
            ("Id", ConfigValue::from("D3")),
        ]));

        assert_eq!(summary.aliases.len(), 2);
        assert_eq!(summary.aliases[0].id, "A1");
        assert_eq!(summary.aliases[1].id, "A2");
        assert_eq!(summary.id, "D3");
    }
}
