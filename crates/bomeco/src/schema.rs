//! Parsed XML Schema artifacts and the namespace map they define.
//!
//! Only the properties the binding layer consumes are extracted from the
//! XSD: the target namespace, the prefix declarations, the imported
//! namespaces, and the name of the root element declaration. Structural
//! conformance is checked against the binding metadata (see
//! [`crate::validate`]); the XSD files themselves are fixed, externally
//! supplied artifacts (see [`crate::schemas`]).

use crate::{BomError, Result};
use std::path::Path;

const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// An ordered prefix-to-namespace-URI mapping.
///
/// Built once from a [`Schema`] and passed to both the reader and the
/// writer, so decode and encode share no hidden mutable state. The empty
/// prefix denotes the default (unprefixed) namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceMap {
    entries: Vec<(String, String)>,
}

impl NamespaceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a prefix, replacing any previous mapping for it.
    pub fn register(&mut self, prefix: &str, uri: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(p, _)| p == prefix) {
            entry.1 = uri.to_string();
        } else {
            self.entries.push((prefix.to_string(), uri.to_string()));
        }
    }

    /// Makes `uri` the default (unprefixed) namespace. Any prefixed
    /// registration of the same URI is kept.
    pub fn set_default(&mut self, uri: &str) {
        self.entries.retain(|(p, _)| !p.is_empty());
        self.entries.insert(0, (String::new(), uri.to_string()));
    }

    pub fn uri_for(&self, prefix: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// Prefix to use when writing names in `uri`. The default namespace wins
    /// when several prefixes map to the same URI; otherwise the first
    /// registered prefix is used.
    pub fn prefix_for(&self, uri: &str) -> Option<&str> {
        let mut found = None;
        for (prefix, entry_uri) in &self.entries {
            if entry_uri == uri {
                if prefix.is_empty() {
                    return Some("");
                }
                if found.is_none() {
                    found = Some(prefix.as_str());
                }
            }
        }
        found
    }

    pub fn contains_uri(&self, uri: &str) -> bool {
        self.entries.iter().any(|(_, entry_uri)| entry_uri == uri)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A parsed XSD. Construction is the expensive step; a parsed instance is
/// read-only and amortized across many decode/encode operations.
#[derive(Debug, Clone)]
pub struct Schema {
    target_namespace: String,
    namespaces: NamespaceMap,
    imports: Vec<String>,
    root_element: String,
}

impl Schema {
    /// Parse an XSD document.
    pub fn parse(text: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(text)?;
        let root = doc.root_element();
        if root.tag_name().namespace() != Some(XSD_NAMESPACE) || root.tag_name().name() != "schema"
        {
            return Err(BomError::Schema(
                "document element is not an XML Schema".to_string(),
            ));
        }
        let target_namespace = root
            .attribute("targetNamespace")
            .ok_or_else(|| BomError::Schema("schema has no targetNamespace".to_string()))?
            .to_string();

        let mut namespaces = NamespaceMap::new();
        for ns in root.namespaces() {
            if ns.uri() == XSD_NAMESPACE || ns.uri() == XML_NAMESPACE {
                continue;
            }
            namespaces.register(ns.name().unwrap_or(""), ns.uri());
        }

        let mut imports = Vec::new();
        let mut root_element = None;
        for child in root.children().filter(|n| n.is_element()) {
            match child.tag_name().name() {
                "import" => {
                    if let Some(namespace) = child.attribute("namespace") {
                        imports.push(namespace.to_string());
                    }
                }
                "element" => {
                    if root_element.is_none() {
                        root_element = child.attribute("name").map(str::to_string);
                    }
                }
                _ => {}
            }
        }
        let root_element = root_element
            .ok_or_else(|| BomError::Schema("schema declares no root element".to_string()))?;

        Ok(Self {
            target_namespace,
            namespaces,
            imports,
            root_element,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn target_namespace(&self) -> &str {
        &self.target_namespace
    }

    /// Prefix declarations as written in the XSD.
    pub fn namespaces(&self) -> &NamespaceMap {
        &self.namespaces
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Local name of the schema's root element declaration.
    pub fn root_element(&self) -> &str {
        &self.root_element
    }

    /// Namespace map for documents of this schema, with the target namespace
    /// registered as the default (unprefixed) namespace.
    pub fn document_namespaces(&self) -> NamespaceMap {
        let mut map = self.namespaces.clone();
        map.set_default(&self.target_namespace);
        map
    }
}
