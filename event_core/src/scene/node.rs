// event_core/src/scene/node.rs
use crate::event::error::InvokeError;
use crate::event::value::{Value, ValueTyped};
use crate::scene::component::Component;
use crate::scene::schema::{
    FieldSchema, MemberSet, MethodSchema, ParamSchema, PropertySchema, TypeSchema,
};
use glam::Vec2;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use uuid::Uuid;

/// Opaque, serializable handle to a scene node. Listeners hold one of
/// these instead of a live reference; the node may be destroyed at any
/// time, so every use goes through a scene lookup.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize, Default)]
pub struct NodeId(pub Uuid);

impl NodeId {
    pub fn new() -> Self {
        NodeId(Uuid::new_v4())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A scene entity that carries attached behaviour components.
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub active: bool,
    pub tag: String,
    pub position: Vec2,
    components: Vec<Box<dyn Component>>,
}

impl Node {
    pub const TYPE_NAME: &'static str = "Node";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            active: true,
            tag: String::new(),
            position: Vec2::ZERO,
            components: Vec::new(),
        }
    }

    pub fn set_active(&mut self, on: bool) {
        self.active = on;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Attaches a component; attachment order is preserved and drives
    /// discovery order.
    pub fn attach(&mut self, component: Box<dyn Component>) {
        self.components.push(component);
    }

    /// Removes the first attached component with the given type name.
    pub fn detach(&mut self, type_name: &str) -> Option<Box<dyn Component>> {
        let at = self
            .components
            .iter()
            .position(|c| c.type_name() == type_name)?;
        Some(self.components.remove(at))
    }

    pub fn components(&self) -> &[Box<dyn Component>] {
        &self.components
    }

    /// First attached component with the given type name, if present.
    pub fn component_mut(&mut self, type_name: &str) -> Option<&mut dyn Component> {
        self.components
            .iter_mut()
            .find(|c| c.type_name() == type_name)
            .map(|c| c.as_mut())
    }

    pub fn component<T: Component>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|c| c.as_any().downcast_ref::<T>())
    }

    pub fn has_component(&self, type_name: &str) -> bool {
        self.components.iter().any(|c| c.type_name() == type_name)
    }
}

static NODE_SCHEMA: Lazy<TypeSchema> = Lazy::new(|| TypeSchema {
    type_name: Node::TYPE_NAME,
    members: MemberSet {
        fields: vec![
            FieldSchema {
                name: "position",
                value: <Vec2 as ValueTyped>::type_info(),
                set: |any: &mut dyn Any, value: &Value| -> Result<(), InvokeError> {
                    let node = any.downcast_mut::<Node>().ok_or(InvokeError::TargetType)?;
                    node.position = Vec2::from_value(value)?;
                    Ok(())
                },
                default_value: || Some(Value::Vec2(Vec2::ZERO)),
            },
            FieldSchema {
                name: "tag",
                value: <String as ValueTyped>::type_info(),
                set: |any: &mut dyn Any, value: &Value| -> Result<(), InvokeError> {
                    let node = any.downcast_mut::<Node>().ok_or(InvokeError::TargetType)?;
                    node.tag = String::from_value(value)?;
                    Ok(())
                },
                default_value: || Some(Value::Str(String::new())),
            },
        ],
        properties: vec![PropertySchema {
            name: "active",
            value: <bool as ValueTyped>::type_info(),
            set: |any: &mut dyn Any, value: &Value| -> Result<(), InvokeError> {
                let node = any.downcast_mut::<Node>().ok_or(InvokeError::TargetType)?;
                node.set_active(bool::from_value(value)?);
                Ok(())
            },
            default_value: || Some(Value::Bool(true)),
        }],
        methods: vec![MethodSchema {
            name: "translate",
            params: vec![ParamSchema {
                name: "delta",
                value: <Vec2 as ValueTyped>::type_info(),
                default_value: || Some(Value::Vec2(Vec2::ZERO)),
            }],
            invoke: |any: &mut dyn Any, args: &[Value]| -> Result<(), InvokeError> {
                let node = any.downcast_mut::<Node>().ok_or(InvokeError::TargetType)?;
                if args.len() != 1 {
                    return Err(InvokeError::ArityMismatch {
                        expected: 1,
                        got: args.len(),
                    });
                }
                node.translate(Vec2::from_value(&args[0])?);
                Ok(())
            },
        }],
    },
    // The universal object base contributes the rename property.
    bases: vec![MemberSet {
        fields: Vec::new(),
        properties: vec![PropertySchema {
            name: "name",
            value: <String as ValueTyped>::type_info(),
            set: |any: &mut dyn Any, value: &Value| -> Result<(), InvokeError> {
                let node = any.downcast_mut::<Node>().ok_or(InvokeError::TargetType)?;
                node.set_name(String::from_value(value)?);
                Ok(())
            },
            default_value: || Some(Value::Str(String::new())),
        }],
        methods: Vec::new(),
    }],
});

/// The node's member schema, the hand-rolled equivalent of what
/// `#[scene_component]` generates for component types.
pub fn node_schema() -> &'static TypeSchema {
    &NODE_SCHEMA
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::schema_registry::spawn_component;

    #[test]
    fn attach_order_is_preserved() {
        let mut node = Node::new("n");
        node.attach(spawn_component("Jumper").unwrap());
        node.attach(spawn_component("Mover").unwrap());
        let names: Vec<&str> = node.components().iter().map(|c| c.type_name()).collect();
        assert_eq!(names, vec!["Jumper", "Mover"]);
    }

    #[test]
    fn detach_removes_by_type_name() {
        let mut node = Node::new("n");
        node.attach(spawn_component("Mover").unwrap());
        assert!(node.detach("Mover").is_some());
        assert!(!node.has_component("Mover"));
        assert!(node.detach("Mover").is_none());
    }

    #[test]
    fn node_schema_members_write_through() {
        let mut node = Node::new("n");
        let schema = node_schema();

        let field = schema.find_field("position").unwrap();
        (field.set)(&mut node, &Value::Vec2(Vec2::new(3.0, 4.0))).unwrap();
        assert_eq!(node.position, Vec2::new(3.0, 4.0));

        let prop = schema.find_property("name").unwrap();
        (prop.set)(&mut node, &Value::Str("renamed".into())).unwrap();
        assert_eq!(node.name, "renamed");

        let method = schema
            .find_method("translate", &[crate::event::value::ValueKind::Vec2])
            .unwrap();
        (method.invoke)(&mut node, &[Value::Vec2(Vec2::new(1.0, 1.0))]).unwrap();
        assert_eq!(node.position, Vec2::new(4.0, 5.0));
    }
}
