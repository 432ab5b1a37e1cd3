//! Web archive container model and loader.
//!
//! A `.webarchive` container is a property list with one
//! `WebMainResource` dictionary (the entry page) and an optional
//! `WebSubresources` array. Each resource dictionary carries its original
//! locator (`WebResourceURL`), raw payload bytes (`WebResourceData`), and
//! usually a MIME type. Decoding the property list itself is delegated to
//! the `plist` crate; this module only interprets the decoded tree.

use crate::ExtractError;
use crate::Result;
use plist::Value;
use std::path::Path;

const KEY_MAIN_RESOURCE: &str = "WebMainResource";
const KEY_SUBRESOURCES: &str = "WebSubresources";
const KEY_RESOURCE_URL: &str = "WebResourceURL";
const KEY_RESOURCE_DATA: &str = "WebResourceData";
const KEY_RESOURCE_MIME: &str = "WebResourceMIMEType";

/// One resource held in the container.
///
/// Created once per container entry, immutable, and consumed exactly once
/// by the materializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    /// The resource's original reference: file-style (`file:///...`) or
    /// network-style (`http(s)://host/path[?query]`).
    pub locator: String,
    /// Raw content bytes, already decoded from the container encoding.
    pub payload: Vec<u8>,
    /// MIME type as recorded by the saving browser, if present. Informative
    /// only; rewrite dispatch goes by resolved extension.
    pub mime_type: Option<String>,
}

/// The decoded archive: one entry page plus its subresources in container
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveDocument {
    /// The entry page.
    pub main: ResourceRecord,
    /// Subresources, container order preserved.
    pub subresources: Vec<ResourceRecord>,
}

impl ArchiveDocument {
    /// Reads and decodes a container file, then loads the document model.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Decode`] when the file is not a readable
    /// property list (binary or XML), or [`ExtractError::MalformedArchive`]
    /// when the decoded tree does not match the web archive schema.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use unwebarchive_core::ArchiveDocument;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let doc = ArchiveDocument::open("page.webarchive")?;
    /// println!("{} subresources", doc.subresources.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let value = Value::from_file(path)?;
        Self::load(value)
    }

    /// Interprets a decoded property-list tree as an archive document.
    ///
    /// Pure transformation: no I/O, subresource order preserved. A missing
    /// `WebSubresources` key is an empty list; a missing or malshaped
    /// `WebMainResource` is an error.
    pub fn load(value: Value) -> Result<Self> {
        let mut dict = match value {
            Value::Dictionary(dict) => dict,
            _ => return Err(malformed("container root is not a dictionary")),
        };

        let main_value = dict
            .remove(KEY_MAIN_RESOURCE)
            .ok_or_else(|| malformed("missing WebMainResource"))?;
        let main = record_from(main_value, KEY_MAIN_RESOURCE)?;

        let subresources = match dict.remove(KEY_SUBRESOURCES) {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| record_from(item, &format!("{KEY_SUBRESOURCES}[{i}]")))
                .collect::<Result<Vec<_>>>()?,
            Some(_) => return Err(malformed("WebSubresources is not an array")),
        };

        Ok(Self { main, subresources })
    }

    /// Total number of resources, entry page included.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        1 + self.subresources.len()
    }

    /// Iterates the entry page first, then subresources in order.
    pub fn resources(&self) -> impl Iterator<Item = &ResourceRecord> {
        std::iter::once(&self.main).chain(self.subresources.iter())
    }
}

fn record_from(value: Value, context: &str) -> Result<ResourceRecord> {
    let mut dict = match value {
        Value::Dictionary(dict) => dict,
        _ => return Err(malformed(&format!("{context} is not a dictionary"))),
    };

    let locator = match dict.remove(KEY_RESOURCE_URL) {
        Some(Value::String(s)) => s,
        Some(_) => {
            return Err(malformed(&format!(
                "{context}: {KEY_RESOURCE_URL} is not a string"
            )));
        }
        None => {
            return Err(malformed(&format!(
                "{context}: missing {KEY_RESOURCE_URL}"
            )));
        }
    };

    let payload = match dict.remove(KEY_RESOURCE_DATA) {
        Some(Value::Data(bytes)) => bytes,
        Some(_) => {
            return Err(malformed(&format!(
                "{context}: {KEY_RESOURCE_DATA} is not a data blob"
            )));
        }
        None => {
            return Err(malformed(&format!(
                "{context}: missing {KEY_RESOURCE_DATA}"
            )));
        }
    };

    let mime_type = match dict.remove(KEY_RESOURCE_MIME) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    };

    Ok(ResourceRecord {
        locator,
        payload,
        mime_type,
    })
}

fn malformed(msg: &str) -> ExtractError {
    ExtractError::MalformedArchive(msg.to_owned())
}
