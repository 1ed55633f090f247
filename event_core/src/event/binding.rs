// event_core/src/event/binding.rs
//! Serializable descriptors of one discovered member. These survive a
//! save/load cycle as plain strings and are resolved back to live
//! schema entries only at invoke time.
use crate::event::error::{InvokeError, ParseError};
use crate::event::literal;
use crate::event::value::{Value, ValueKind};
use crate::scene::node::NodeId;
use crate::scene::schema::{FieldSchema, MethodSchema, ParamSchema, PropertySchema};
use serde::{Deserialize, Serialize};

/// One field, property, or method parameter: the member's name-based
/// type identity plus the user-entered literal. Fields and properties
/// share this shape; parameters reuse it keyed by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberBinding {
    pub name: String,
    pub declaring_type: String,
    /// Fully qualified Rust path of the member's type.
    pub type_path: String,
    pub kind: ValueKind,
    /// Cached name table when `kind` is `Enum`; empty otherwise.
    pub enum_names: Vec<String>,
    /// Canonical text form of the current value.
    pub literal: String,
    /// Live object reference, used only for `ObjectRef` members.
    pub object_ref: Option<NodeId>,
}

impl MemberBinding {
    pub fn from_field(declaring_type: &str, schema: &FieldSchema) -> Self {
        Self::from_parts(
            declaring_type,
            schema.name,
            schema.value.kind,
            schema.value.type_path,
            schema.value.enum_names,
            (schema.default_value)(),
        )
    }

    pub fn from_property(declaring_type: &str, schema: &PropertySchema) -> Self {
        Self::from_parts(
            declaring_type,
            schema.name,
            schema.value.kind,
            schema.value.type_path,
            schema.value.enum_names,
            (schema.default_value)(),
        )
    }

    pub fn from_param(declaring_type: &str, schema: &ParamSchema) -> Self {
        Self::from_parts(
            declaring_type,
            schema.name,
            schema.value.kind,
            schema.value.type_path,
            schema.value.enum_names,
            (schema.default_value)(),
        )
    }

    fn from_parts(
        declaring_type: &str,
        name: &str,
        kind: ValueKind,
        type_path: &str,
        enum_names: Option<&'static [&'static str]>,
        default: Option<Value>,
    ) -> Self {
        Self {
            name: name.to_string(),
            declaring_type: declaring_type.to_string(),
            type_path: type_path.to_string(),
            kind,
            enum_names: enum_names
                .map(|names| names.iter().map(|n| n.to_string()).collect())
                .unwrap_or_default(),
            // A member type without a canonical default leaves the
            // literal empty; that is not an error.
            literal: default.map(|v| literal::format(&v)).unwrap_or_default(),
            object_ref: None,
        }
    }

    /// Parses the stored literal into the member's native value.
    pub fn parse_value(&self) -> Result<Value, InvokeError> {
        match self.kind {
            ValueKind::Unsupported => Err(InvokeError::Unsupported(self.name.clone())),
            ValueKind::Enum => {
                Ok(literal::parse_enum(&self.enum_names, &self.type_path, &self.literal)?)
            }
            ValueKind::ObjectRef => match self.object_ref {
                Some(id) => Ok(Value::ObjectRef(id)),
                None => Ok(literal::parse(ValueKind::ObjectRef, &self.literal)?),
            },
            kind => Ok(literal::parse(kind, &self.literal)?),
        }
    }

    /// Stores a new literal after validating it against the member's
    /// grammar. On failure the previous literal is retained.
    pub fn set_literal(&mut self, text: &str) -> Result<(), ParseError> {
        match self.kind {
            ValueKind::Unsupported => Err(ParseError::UnsupportedKind),
            ValueKind::Enum => {
                // Normalize names to the stored index form.
                let value = literal::parse_enum(&self.enum_names, &self.type_path, text)?;
                self.literal = literal::format(&value);
                Ok(())
            }
            kind => {
                literal::parse(kind, text)?;
                self.literal = text.to_string();
                Ok(())
            }
        }
    }

    /// Display form used by the flattened selection list, e.g.
    /// `Mover/Fields/f32 speed`.
    pub fn label(&self, kind_word: &str) -> String {
        format!(
            "{}/{}/{} {}",
            self.declaring_type, kind_word, self.kind, self.name
        )
    }

    /// `f32 height` — parameter label with its name.
    pub fn to_string_long(&self) -> String {
        format!("{} {}", self.kind, self.name)
    }

    /// `f32` — parameter label without its name.
    pub fn to_string_short(&self) -> String {
        self.kind.to_string()
    }
}

/// One invokable method plus its per-parameter bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodBinding {
    pub name: String,
    pub declaring_type: String,
    pub params: Vec<MemberBinding>,
}

impl MethodBinding {
    pub fn from_method(declaring_type: &str, schema: &MethodSchema) -> Self {
        Self {
            name: schema.name.to_string(),
            declaring_type: declaring_type.to_string(),
            params: schema
                .params
                .iter()
                .map(|p| MemberBinding::from_param(declaring_type, p))
                .collect(),
        }
    }

    /// Parameter kinds in declaration order, for signature re-resolution.
    pub fn param_kinds(&self) -> Vec<ValueKind> {
        self.params.iter().map(|p| p.kind).collect()
    }

    /// Display form used by the flattened selection list, e.g.
    /// `Jumper/Methods/jump (f32)`.
    pub fn label(&self) -> String {
        let params: Vec<String> = self.params.iter().map(|p| p.to_string_short()).collect();
        format!(
            "{}/Methods/{} ({})",
            self.declaring_type,
            self.name,
            params.join(", ")
        )
    }
}
