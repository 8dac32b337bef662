//! Generic namespace-qualified document model.
//!
//! The schema layer and the BoM reader/writer communicate through this
//! representation: an ordered tree of elements keyed by namespace URI and
//! local name. Prefixes are resolved against a [`NamespaceMap`] only at the
//! text boundary, so neither side depends on the prefixes a particular
//! document happens to use.

use crate::schema::NamespaceMap;
use crate::{BomError, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

/// Namespace-qualified name of an element or attribute.
///
/// Attributes in the Eco schemas are unqualified; they carry an empty
/// namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub namespace: String,
    pub local: String,
}

impl QName {
    pub fn new(namespace: &str, local: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            local: local.to_string(),
        }
    }

    pub fn matches(&self, namespace: &str, local: &str) -> bool {
        self.namespace == namespace && self.local == local
    }
}

/// One element of a generic document: ordered attributes, ordered child
/// elements, and trimmed text content for scalar leaves.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: QName,
    pub attributes: Vec<(QName, String)>,
    pub children: Vec<Element>,
    pub text: Option<String>,
}

impl Element {
    pub fn new(namespace: &str, local: &str) -> Self {
        Self {
            name: QName::new(namespace, local),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    pub fn with_text(namespace: &str, local: &str, text: impl Into<String>) -> Self {
        let mut element = Self::new(namespace, local);
        element.text = Some(text.into());
        element
    }

    /// Sets an unqualified attribute.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.push((QName::new("", name), value.into()));
    }

    /// Looks up an unqualified attribute by local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(qname, _)| qname.namespace.is_empty() && qname.local == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// First child element with the given namespace URI and local name.
    pub fn child(&self, namespace: &str, local: &str) -> Option<&Element> {
        self.children
            .iter()
            .find(|child| child.name.matches(namespace, local))
    }

    /// All child elements with the given namespace URI and local name, in
    /// document order.
    pub fn children_named<'a>(
        &'a self,
        namespace: &'a str,
        local: &'a str,
    ) -> impl Iterator<Item = &'a Element> {
        self.children
            .iter()
            .filter(move |child| child.name.matches(namespace, local))
    }

    pub fn text_content(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Parse XML text into a generic document rooted at its document element.
pub fn parse(text: &str) -> Result<Element> {
    let doc = roxmltree::Document::parse(text)?;
    Ok(convert(doc.root_element()))
}

fn convert(node: roxmltree::Node) -> Element {
    let mut element = Element::new(
        node.tag_name().namespace().unwrap_or(""),
        node.tag_name().name(),
    );
    for attr in node.attributes() {
        element.attributes.push((
            QName::new(attr.namespace().unwrap_or(""), attr.name()),
            attr.value().to_string(),
        ));
    }
    let mut text = String::new();
    for child in node.children() {
        if child.is_element() {
            element.children.push(convert(child));
        } else if child.is_text() {
            text.push_str(child.text().unwrap_or(""));
        }
    }
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        element.text = Some(trimmed.to_string());
    }
    element
}

/// Serialize a generic document to indented XML text.
///
/// The root element additionally receives the full `xmlns`/`xmlns:*`
/// declaration block derived from the namespace map, so the output is
/// self-describing. Resolving a name whose namespace has no registered
/// prefix is an error, never a silent fallback.
pub fn to_xml_string(root: &Element, namespaces: &NamespaceMap) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    write_element(&mut writer, root, namespaces, true)?;
    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| BomError::XmlWrite(e.to_string()))
}

fn qualified(name: &QName, namespaces: &NamespaceMap) -> Result<String> {
    if name.namespace.is_empty() {
        return Ok(name.local.clone());
    }
    let prefix =
        namespaces
            .prefix_for(&name.namespace)
            .ok_or_else(|| BomError::UnregisteredNamespace {
                namespace: name.namespace.clone(),
                context: "XML serialization",
            })?;
    if prefix.is_empty() {
        Ok(name.local.clone())
    } else {
        Ok(format!("{prefix}:{}", name.local))
    }
}

fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    element: &Element,
    namespaces: &NamespaceMap,
    is_root: bool,
) -> Result<()> {
    let tag = qualified(&element.name, namespaces)?;
    let mut start = BytesStart::new(tag.clone());
    if is_root {
        for (prefix, uri) in namespaces.iter() {
            if prefix.is_empty() {
                start.push_attribute(("xmlns", uri));
            } else {
                let declaration = format!("xmlns:{prefix}");
                start.push_attribute((declaration.as_str(), uri));
            }
        }
    }
    for (name, value) in &element.attributes {
        let attr_name = qualified(name, namespaces)?;
        start.push_attribute((attr_name.as_str(), value.as_str()));
    }
    if element.children.is_empty() && element.text.is_none() {
        return emit(writer, Event::Empty(start));
    }
    emit(writer, Event::Start(start))?;
    if let Some(text) = &element.text {
        emit(writer, Event::Text(BytesText::new(text)))?;
    }
    for child in &element.children {
        write_element(writer, child, namespaces, false)?;
    }
    emit(writer, Event::End(BytesEnd::new(tag)))
}

fn emit<W: std::io::Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| BomError::XmlWrite(e.to_string()))
}
