//! Encoding distribution configurations as `DistributionConfig` XML.
//!
//! The encoder walks a [`ConfigValue`] tree recursively. Most fields
//! follow one general rule keyed by value shape; a handful of
//! composite blocks (`DefaultCacheBehavior`, `Origins`, `Aliases`,
//! `ViewerCertificate`) have fixed orderings the remote service
//! requires and are handled by named sub-routines. Mapping keys are
//! emitted strictly in insertion order — callers supply pre-ordered
//! structures for the order-sensitive regions.

use std::io::{self, Write};

use chrono::Utc;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};

use cdnstack_cloudfront_model::{ConfigMap, ConfigValue};

use crate::error::XmlError;

/// The CloudFront document namespace for `DistributionConfig` bodies.
pub const CLOUDFRONT_NAMESPACE: &str = "http://cloudfront.amazonaws.com/doc/2010-11-01/";

/// Encode a distribution configuration as an XML document body,
/// without the `<DistributionConfig>` envelope.
///
/// A `CallerReference` element is always synthesized (current Unix
/// seconds) and emitted first; a caller-supplied `CallerReference`
/// field is discarded.
///
/// # Errors
///
/// Returns [`XmlError::UnsupportedShape`] if `config` is not a mapping
/// or one of the composite blocks has the wrong shape. Writing itself
/// targets an in-memory buffer and does not fail in practice.
pub fn encode_distribution_config(config: &ConfigValue) -> Result<String, XmlError> {
    encode_with_reference(config, &fresh_caller_reference())
}

/// Encode a distribution configuration as a complete XML document:
/// declaration, namespaced `<DistributionConfig>` envelope, body.
///
/// # Errors
///
/// Same failure modes as [`encode_distribution_config`].
pub fn distribution_config_document(config: &ConfigValue) -> Result<String, XmlError> {
    document_with_reference(config, &fresh_caller_reference())
}

/// A monotonically distinguishing string the remote service uses to
/// deduplicate retried create requests.
fn fresh_caller_reference() -> String {
    Utc::now().timestamp().to_string()
}

pub(crate) fn encode_with_reference(
    config: &ConfigValue,
    caller_reference: &str,
) -> Result<String, XmlError> {
    let parts = ConfigParts::split(config)?;
    let mut buf = Vec::with_capacity(512);
    let mut writer = Writer::new(&mut buf);
    parts.write(&mut writer, caller_reference)?;
    String::from_utf8(buf).map_err(|e| XmlError::Parse(e.to_string()))
}

pub(crate) fn document_with_reference(
    config: &ConfigValue,
    caller_reference: &str,
) -> Result<String, XmlError> {
    let parts = ConfigParts::split(config)?;
    let mut buf = Vec::with_capacity(512);
    let mut writer = Writer::new(&mut buf);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer
        .create_element("DistributionConfig")
        .with_attribute(("xmlns", CLOUDFRONT_NAMESPACE))
        .write_inner_content(|w| parts.write(w, caller_reference))?;

    String::from_utf8(buf).map_err(|e| XmlError::Parse(e.to_string()))
}

/// The configuration split into its general fields and the composite
/// blocks with fixed positions. Shape validation happens here, before
/// any writing starts, so the writer sub-routines cannot fail on
/// shape.
struct ConfigParts {
    general: ConfigMap,
    default_cache_behavior: Option<ConfigMap>,
    origins: Option<ConfigMap>,
    aliases: Option<ConfigMap>,
    viewer_certificate: Option<ConfigValue>,
}

impl ConfigParts {
    fn split(config: &ConfigValue) -> Result<Self, XmlError> {
        let ConfigValue::Map(map) = config else {
            return Err(XmlError::UnsupportedShape(
                "distribution config must be a mapping at top level".to_string(),
            ));
        };
        let mut general = map.clone();

        // Always synthesized; never taken from caller input.
        general.remove("CallerReference");

        let default_cache_behavior =
            take_map(&mut general, "DefaultCacheBehavior")?;
        let origins = take_map(&mut general, "Origins")?;
        if let Some(origins) = &origins {
            match origins.get("Origin") {
                None | Some(ConfigValue::List(_)) => {}
                Some(_) => {
                    return Err(XmlError::UnsupportedShape(
                        "Origins.Origin must be a sequence".to_string(),
                    ));
                }
            }
        }
        let aliases = take_map(&mut general, "Aliases")?;
        let viewer_certificate = general.remove("ViewerCertificate");

        Ok(Self {
            general,
            default_cache_behavior,
            origins,
            aliases,
            viewer_certificate,
        })
    }

    fn write<W: Write>(&self, w: &mut Writer<W>, caller_reference: &str) -> io::Result<()> {
        write_text_element(w, "CallerReference", caller_reference)?;
        write_pairs(w, &self.general)?;
        if let Some(behavior) = &self.default_cache_behavior {
            write_default_cache_behavior(w, behavior)?;
        }
        if let Some(origins) = &self.origins {
            write_origins(w, origins)?;
        }
        if let Some(aliases) = &self.aliases {
            write_aliases(w, aliases)?;
        }
        if let Some(certificate) = &self.viewer_certificate {
            write_field(w, "ViewerCertificate", certificate)?;
        }
        Ok(())
    }
}

/// Remove `key` from the map, requiring it to be a mapping if present.
fn take_map(map: &mut ConfigMap, key: &str) -> Result<Option<ConfigMap>, XmlError> {
    match map.remove(key) {
        Some(ConfigValue::Map(inner)) => Ok(Some(inner)),
        Some(_) => Err(XmlError::UnsupportedShape(format!(
            "{key} must be a mapping"
        ))),
        None => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// General recursive rule
// ---------------------------------------------------------------------------

/// Write a simple `<tag>text</tag>` element.
fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> io::Result<()> {
    writer
        .create_element(tag)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

/// The general rule: a sequence repeats `<key>` once per element, a
/// mapping nests its pairs inside one `<key>`, a scalar becomes
/// `<key>text</key>`.
fn write_field<W: Write>(w: &mut Writer<W>, key: &str, value: &ConfigValue) -> io::Result<()> {
    match value {
        ConfigValue::List(items) => {
            for item in items {
                write_field(w, key, item)?;
            }
        }
        ConfigValue::Map(map) => {
            w.create_element(key)
                .write_inner_content(|w| write_pairs(w, map))?;
        }
        ConfigValue::Bool(_) | ConfigValue::Int(_) | ConfigValue::String(_) => {
            if let Some(text) = value.scalar_text() {
                write_text_element(w, key, &text)?;
            }
        }
    }
    Ok(())
}

/// Apply the general rule to every pair of a mapping, in insertion
/// order.
fn write_pairs<W: Write>(w: &mut Writer<W>, map: &ConfigMap) -> io::Result<()> {
    for (key, value) in map.iter() {
        write_field(w, key, value)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Special-cased composite blocks
// ---------------------------------------------------------------------------

/// Emit `<tag>` with the mapping's `Items` list serialized before its
/// remaining fields. Used for `AllowedMethods` and
/// `ForwardedValues.Headers`, whose item lists must precede the
/// wrapper's scalar fields.
fn write_items_first<W: Write>(w: &mut Writer<W>, tag: &str, map: &ConfigMap) -> io::Result<()> {
    let mut rest = map.clone();
    let items = rest.remove("Items");
    w.create_element(tag).write_inner_content(|w| {
        if let Some(items) = &items {
            write_field(w, "Items", items)?;
        }
        write_pairs(w, &rest)
    })?;
    Ok(())
}

fn write_default_cache_behavior<W: Write>(
    w: &mut Writer<W>,
    behavior: &ConfigMap,
) -> io::Result<()> {
    let mut rest = behavior.clone();
    let allowed_methods = rest.remove("AllowedMethods");
    let trusted_signers = rest.remove("TrustedSigners");
    w.create_element("DefaultCacheBehavior")
        .write_inner_content(|w| {
            match &allowed_methods {
                Some(ConfigValue::Map(methods)) => {
                    write_items_first(w, "AllowedMethods", methods)?;
                }
                Some(other) => write_field(w, "AllowedMethods", other)?,
                None => {}
            }
            match &trusted_signers {
                Some(ConfigValue::Map(signers)) => {
                    w.create_element("TrustedSigners")
                        .write_inner_content(|w| write_pairs(w, signers))?;
                }
                Some(other) => write_field(w, "TrustedSigners", other)?,
                None => {}
            }
            for (key, value) in rest.iter() {
                match (key, value) {
                    ("ForwardedValues", ConfigValue::Map(forwarded)) => {
                        write_forwarded_values(w, forwarded)?;
                    }
                    _ => write_field(w, key, value)?,
                }
            }
            Ok(())
        })?;
    Ok(())
}

/// Fixed sub-order within `<ForwardedValues>`: the `Headers` block
/// (its items first), then `Cookies`, then the remaining fields.
fn write_forwarded_values<W: Write>(w: &mut Writer<W>, forwarded: &ConfigMap) -> io::Result<()> {
    let mut rest = forwarded.clone();
    let headers = rest.remove("Headers");
    let cookies = rest.remove("Cookies");
    w.create_element("ForwardedValues")
        .write_inner_content(|w| {
            match &headers {
                Some(ConfigValue::Map(headers)) => write_items_first(w, "Headers", headers)?,
                Some(other) => write_field(w, "Headers", other)?,
                None => {}
            }
            if let Some(cookies) = &cookies {
                write_field(w, "Cookies", cookies)?;
            }
            write_pairs(w, &rest)
        })?;
    Ok(())
}

/// `Quantity` text for a counted block: the supplied value if present,
/// else the item count.
fn quantity_text(map: &ConfigMap, item_count: usize) -> String {
    map.get("Quantity")
        .and_then(ConfigValue::scalar_text)
        .unwrap_or_else(|| item_count.to_string())
}

fn write_origins<W: Write>(w: &mut Writer<W>, origins: &ConfigMap) -> io::Result<()> {
    let items = origins
        .get("Origin")
        .and_then(ConfigValue::as_list)
        .unwrap_or(&[]);
    let quantity = quantity_text(origins, items.len());
    w.create_element("Origins").write_inner_content(|w| {
        write_text_element(w, "Quantity", &quantity)?;
        w.create_element("Items").write_inner_content(|w| {
            for origin in items {
                write_field(w, "Origin", origin)?;
            }
            Ok(())
        })?;
        Ok(())
    })?;
    Ok(())
}

fn write_aliases<W: Write>(w: &mut Writer<W>, aliases: &ConfigMap) -> io::Result<()> {
    let cnames = aliases
        .get("Items")
        .and_then(ConfigValue::as_map)
        .and_then(|items| items.get("CNAME"))
        .and_then(ConfigValue::as_list)
        .unwrap_or(&[]);
    let quantity = quantity_text(aliases, cnames.len());
    w.create_element("Aliases").write_inner_content(|w| {
        write_text_element(w, "Quantity", &quantity)?;
        w.create_element("Items").write_inner_content(|w| {
            for cname in cnames {
                write_field(w, "CNAME", cname)?;
            }
            Ok(())
        })?;
        Ok(())
    })?;
    Ok(())
}
