//! Structural validation of generic documents against the binding metadata.
//!
//! A full pass is made over the document and every violation found is
//! collected, so a caller sees the complete list of problems in one error
//! instead of the first one. Violations cover unexpected elements and
//! attributes, missing required fields, unparseable scalar values, and
//! invalid enumeration strings.

use crate::descriptor::{descriptor, FieldShape, NamedField, TypeName, ValueKind};
use crate::schema::Schema;
use crate::types::{DimensionType, PseudoAttribute};
use crate::xml::Element;
use std::fmt;

/// One conformance problem, located by a slash-separated element path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Which side of the binding is being checked.
///
/// On encode, an empty list field is omitted entirely, so a required list
/// container may legitimately be absent from writer output; decoding the
/// same document still fails. This asymmetry is deliberate and documented -
/// an empty BoM is constructible and encodable but not decodable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Decode,
    Encode,
}

/// Validate a document against the schema's root element declaration and the
/// binding metadata. Returns every violation found.
pub fn validate_document(root: &Element, schema: &Schema, mode: ValidationMode) -> Vec<Violation> {
    let mut violations = Vec::new();
    let root_name = schema.root_element();
    if !root.name.matches(schema.target_namespace(), root_name) {
        violations.push(Violation {
            path: root.name.local.clone(),
            message: format!(
                "expected root element '{}' in namespace '{}'",
                root_name,
                schema.target_namespace()
            ),
        });
        return violations;
    }
    validate_type(
        root,
        TypeName::BillOfMaterials,
        root_name,
        mode,
        &mut violations,
    );
    violations
}

fn validate_type(
    element: &Element,
    type_name: TypeName,
    path: &str,
    mode: ValidationMode,
    violations: &mut Vec<Violation>,
) {
    let desc = descriptor(type_name);
    validate_fields(element, desc.fields, desc.namespace, path, mode, violations);
}

fn validate_fields(
    element: &Element,
    fields: &[NamedField],
    namespace: &str,
    path: &str,
    mode: ValidationMode,
    violations: &mut Vec<Violation>,
) {
    for (name, value) in &element.attributes {
        if !name.namespace.is_empty() {
            violations.push(Violation {
                path: path.to_string(),
                message: format!("unexpected namespace-qualified attribute '{}'", name.local),
            });
            continue;
        }
        let marker = format!("@{}", name.local);
        match fields.iter().find(|f| f.name == marker) {
            Some(field) => validate_scalar(field, value, path, violations),
            None => violations.push(Violation {
                path: path.to_string(),
                message: format!("unexpected attribute '{}'", name.local),
            }),
        }
    }

    if let Some(text) = &element.text {
        match fields.iter().find(|f| f.name == "$") {
            Some(field) => validate_scalar(field, text, path, violations),
            None => violations.push(Violation {
                path: path.to_string(),
                message: format!("unexpected text content '{text}'"),
            }),
        }
    }

    for child in &element.children {
        let child_path = format!("{path}/{}", child.name.local);
        if child.name.namespace != namespace {
            violations.push(Violation {
                path: child_path,
                message: format!(
                    "unexpected element '{}' in namespace '{}'",
                    child.name.local, child.name.namespace
                ),
            });
            continue;
        }
        match fields.iter().find(|f| f.name == child.name.local) {
            Some(field) => validate_field_element(child, field, &child_path, namespace, mode, violations),
            None => violations.push(Violation {
                path: child_path,
                message: format!("unexpected element '{}'", child.name.local),
            }),
        }
    }

    for field in fields.iter().filter(|f| f.required) {
        if mode == ValidationMode::Encode && matches!(field.shape, FieldShape::List { .. }) {
            continue;
        }
        let present = if let Some(attr) = field.name.strip_prefix('@') {
            element.attribute(attr).is_some()
        } else if field.name == "$" {
            element.text.is_some()
        } else {
            element
                .children
                .iter()
                .any(|c| c.name.matches(namespace, field.name))
        };
        if !present {
            let what = match field.shape {
                FieldShape::Scalar(_) | FieldShape::ScalarList(_) if field.name == "$" => {
                    "text content".to_string()
                }
                _ if field.name.starts_with('@') => {
                    format!("attribute '{}'", &field.name[1..])
                }
                _ => format!("element '{}'", field.name),
            };
            violations.push(Violation {
                path: path.to_string(),
                message: format!("missing required {what}"),
            });
        }
    }
}

fn validate_field_element(
    child: &Element,
    field: &NamedField,
    path: &str,
    namespace: &str,
    mode: ValidationMode,
    violations: &mut Vec<Violation>,
) {
    match field.shape {
        FieldShape::Scalar(kind) | FieldShape::ScalarList(kind) => {
            if !child.children.is_empty() {
                violations.push(Violation {
                    path: path.to_string(),
                    message: "unexpected child elements in a scalar value".to_string(),
                });
            }
            validate_scalar_kind(kind, child.text_content(), path, violations);
        }
        FieldShape::Complex(type_name) => validate_type(child, type_name, path, mode, violations),
        FieldShape::Group(fields) => {
            validate_fields(child, fields, namespace, path, mode, violations)
        }
        FieldShape::List {
            item,
            item_namespace,
            item_name,
        } => {
            let mut index = 0;
            for item_element in &child.children {
                if item_element.name.matches(item_namespace, item_name) {
                    let item_path = format!("{path}/{item_name}[{index}]");
                    validate_type(item_element, item, &item_path, mode, violations);
                    index += 1;
                } else {
                    violations.push(Violation {
                        path: format!("{path}/{}", item_element.name.local),
                        message: format!(
                            "unexpected element '{}' (expected '{}')",
                            item_element.name.local, item_name
                        ),
                    });
                }
            }
            if let Some(text) = &child.text {
                violations.push(Violation {
                    path: path.to_string(),
                    message: format!("unexpected text content '{text}'"),
                });
            }
        }
    }
}

fn validate_scalar(field: &NamedField, value: &str, path: &str, violations: &mut Vec<Violation>) {
    match field.shape {
        FieldShape::Scalar(kind) | FieldShape::ScalarList(kind) => {
            validate_scalar_kind(kind, value, path, violations)
        }
        _ => violations.push(Violation {
            path: path.to_string(),
            message: format!("'{}' is not a scalar field", field.name),
        }),
    }
}

fn validate_scalar_kind(kind: ValueKind, value: &str, path: &str, violations: &mut Vec<Violation>) {
    let problem = match kind {
        ValueKind::Text => None,
        ValueKind::Float => value
            .parse::<f64>()
            .is_err()
            .then(|| format!("invalid value '{value}' (expected a floating-point number)")),
        ValueKind::Integer => value
            .parse::<u64>()
            .is_err()
            .then(|| format!("invalid value '{value}' (expected a non-negative integer)")),
        ValueKind::Boolean => (!matches!(value, "true" | "false" | "1" | "0"))
            .then(|| format!("invalid value '{value}' (expected a boolean)")),
        ValueKind::Dimension => DimensionType::from_xml(value)
            .is_none()
            .then(|| format!("invalid dimension type '{value}'")),
        ValueKind::Pseudo => PseudoAttribute::from_xml(value)
            .is_none()
            .then(|| format!("invalid pseudo-attribute '{value}'")),
    };
    if let Some(message) = problem {
        violations.push(Violation {
            path: path.to_string(),
            message,
        });
    }
}
