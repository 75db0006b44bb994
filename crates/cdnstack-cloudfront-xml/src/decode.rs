//! Decoding `ListDistributions` responses from an XML event stream.
//!
//! The response schema reuses element names at different nesting
//! levels with different meanings: `Id` is the distribution id at the
//! top of a `DistributionSummary`, an origin id inside `Origins`, and
//! an alias id inside `Aliases`. The decoder therefore tracks an
//! explicit context on a small stack and routes each end-element by
//! tag name plus current context, accumulating into owned builders
//! that are moved into the output (and replaced by fresh defaults)
//! when their enclosing element closes.

use std::mem;

use quick_xml::Reader;
use quick_xml::events::Event;

use cdnstack_cloudfront_model::{Alias, DistributionList, DistributionSummary, Origin, OriginKind};

use crate::coerce;
use crate::error::XmlError;

/// Which disambiguating block is currently open inside a summary.
///
/// An empty stack means root context. The schema never nests `Origins`
/// inside `Aliases` or vice versa, so the stack depth stays at most
/// two in practice, but a stack (rather than two booleans) makes that
/// impossible to get wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Origins,
    Aliases,
}

/// Decode a `ListDistributions`-shaped XML document.
///
/// Unrecognized elements are skipped for forward compatibility. On any
/// coercion failure the partial result is discarded and the error is
/// returned instead.
///
/// # Errors
///
/// Returns [`XmlError::Malformed`] if tokenization fails and
/// [`XmlError::Decode`] if a typed field (integer or timestamp) has
/// unparseable text.
pub fn decode_distribution_list(xml: &[u8]) -> Result<DistributionList, XmlError> {
    let mut reader = Reader::from_reader(xml);
    DistributionListDecoder::default().run(&mut reader)
}

/// Accumulator state for one decode pass. Owned by the call; nothing
/// is shared across invocations.
#[derive(Debug, Default)]
struct DistributionListDecoder {
    response: DistributionList,
    summary: DistributionSummary,
    origin: Origin,
    aliases: Vec<Alias>,
    context: Vec<Context>,
    text: String,
}

/// Decode an element name as UTF-8.
fn element_name<'a>(name: &'a quick_xml::name::QName<'_>) -> Result<&'a str, XmlError> {
    std::str::from_utf8(name.as_ref())
        .map_err(|e| XmlError::Parse(format!("non-UTF-8 element name: {e}")))
}

impl DistributionListDecoder {
    fn run(mut self, reader: &mut Reader<&[u8]>) -> Result<DistributionList, XmlError> {
        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    self.text.clear();
                    let name = e.name();
                    self.on_start(element_name(&name)?);
                }
                Event::Empty(e) => {
                    // A self-closing element is a start immediately
                    // followed by an end with empty text.
                    self.text.clear();
                    let name = e.name();
                    let tag_name = element_name(&name)?;
                    self.on_start(tag_name);
                    self.on_end(tag_name, String::new())?;
                }
                Event::Text(e) => {
                    let decoded = e
                        .decode()
                        .map_err(|err| XmlError::Parse(err.to_string()))?;
                    let unescaped = quick_xml::escape::unescape(&decoded)
                        .map_err(|err| XmlError::Parse(err.to_string()))?;
                    self.text.push_str(&unescaped);
                }
                Event::GeneralRef(e) => {
                    let name = e
                        .decode()
                        .map_err(|err| XmlError::Parse(err.to_string()))?;
                    let reference = format!("&{name};");
                    let unescaped = quick_xml::escape::unescape(&reference)
                        .map_err(|err| XmlError::Parse(err.to_string()))?;
                    self.text.push_str(&unescaped);
                }
                Event::End(e) => {
                    let text = mem::take(&mut self.text);
                    let name = e.name();
                    self.on_end(element_name(&name)?, text.trim().to_owned())?;
                }
                Event::Eof => break,
                _ => {}
            }
        }
        Ok(self.response)
    }

    fn on_start(&mut self, name: &str) {
        if let Some(kind) = OriginKind::from_element(name) {
            // A fresh accumulator tagged with the origin kind; any
            // fields decoded so far for this origin item were part of
            // the previous item and have already been moved out.
            self.origin = Origin {
                kind: Some(kind),
                ..Origin::default()
            };
        } else {
            match name {
                "Origins" => self.context.push(Context::Origins),
                "Aliases" => self.context.push(Context::Aliases),
                _ => {}
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn on_end(&mut self, name: &str, text: String) -> Result<(), XmlError> {
        match name {
            "DistributionSummary" => {
                let summary = mem::take(&mut self.summary);
                self.response.distributions.push(summary);
            }
            "Comment" => self.summary.comment = Some(text),
            "Status" => self.summary.status = text,
            "DomainName" => self.summary.domain_name = text,
            "Origin" => {
                let origin = mem::take(&mut self.origin);
                self.summary.origins.push(origin);
            }
            "Origins" => self.pop(Context::Origins),
            "Aliases" => {
                self.summary.aliases.append(&mut self.aliases);
                self.pop(Context::Aliases);
            }
            "Id" => match self.context.last() {
                Some(Context::Origins) => self.origin.id = Some(text),
                Some(Context::Aliases) => self.aliases.push(Alias { id: text }),
                None => self.summary.id = text,
            },
            "CNAME" => self.summary.cname.push(text),
            "DNSName" => self.origin.dns_name = text,
            "OriginAccessIdentity" => self.origin.origin_access_identity = Some(text),
            "OriginProtocolPolicy" => self.origin.origin_protocol_policy = Some(text),
            "Enabled" => self.summary.enabled = coerce::flag(&text),
            "HTTPPort" => self.origin.http_port = Some(coerce::int("HTTPPort", &text)?),
            "HTTPSPort" => self.origin.https_port = Some(coerce::int("HTTPSPort", &text)?),
            "LastModifiedTime" => {
                self.summary.last_modified = Some(coerce::timestamp("LastModifiedTime", &text)?);
            }
            "IsTruncated" => self.response.is_truncated = coerce::flag(&text),
            "Marker" => self.response.marker = text,
            "NextMarker" => self.response.next_marker = Some(text),
            "MaxItems" => self.response.max_items = coerce::int("MaxItems", &text)?,
            _ => {
                tracing::trace!(element = name, "skipping unrecognized element");
            }
        }
        Ok(())
    }

    fn pop(&mut self, context: Context) {
        if self.context.last() == Some(&context) {
            self.context.pop();
        }
    }
}
