// event_core/src/event/listener.rs
//! One event listener: a weak node handle, the discovered member
//! bindings for that node, and the user's current selection in the
//! flattened list. Rebuild is replace-not-patch; invoke re-resolves
//! everything from stored names.
use crate::event::binding::{MemberBinding, MethodBinding};
use crate::event::error::{InvokeError, ParseError};
use crate::event::value::Value;
use crate::introspect::discover;
use crate::scene::node::{node_schema, Node, NodeId};
use crate::scene::scene::Scene;
use crate::scene::schema::MemberSet;
use crate::scene::schema_registry::schema_of;
use log::warn;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Which of the three member sequences a flattened entry points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberKind {
    Field,
    Property,
    Method,
}

/// Maps one flattened list position back to (kind, within-kind index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub kind: MemberKind,
    pub index: usize,
}

impl Slot {
    /// Placeholder rows backing the two fixed sentinel entries.
    const SENTINEL: Slot = Slot {
        kind: MemberKind::Field,
        index: 0,
    };
}

/// The currently selected descriptor, for the inspector to edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BindingRef<'a> {
    Member(&'a MemberBinding),
    Method(&'a MethodBinding),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listener {
    target: Option<NodeId>,
    fields: Vec<MemberBinding>,
    properties: Vec<MemberBinding>,
    methods: Vec<MethodBinding>,
    labels: Vec<String>,
    index_table: Vec<Slot>,
    selected: usize,
}

impl Default for Listener {
    fn default() -> Self {
        Self {
            target: None,
            fields: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            labels: vec!["Nothing Selected".to_string(), String::new()],
            index_table: vec![Slot::SENTINEL, Slot::SENTINEL],
            selected: 0,
        }
    }
}

impl Listener {
    pub fn new(target: NodeId, scene: &Scene) -> Self {
        let mut listener = Self::default();
        listener.set_target(Some(target), scene);
        listener
    }

    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Reassigns the target node and rebuilds every derived table.
    pub fn set_target(&mut self, target: Option<NodeId>, scene: &Scene) {
        self.target = target;
        self.rebuild(scene);
    }

    /// Re-discovers all members of the current target. The derived
    /// tables are fully replaced, never partially mutated, and the
    /// selection resets to "nothing selected".
    pub fn rebuild(&mut self, scene: &Scene) {
        self.fields.clear();
        self.properties.clear();
        self.methods.clear();
        self.labels = vec!["Nothing Selected".to_string(), String::new()];
        self.index_table = vec![Slot::SENTINEL, Slot::SENTINEL];
        self.selected = 0;

        let Some(id) = self.target else {
            return;
        };
        let Some(node) = scene.get(id) else {
            warn!("listener target {id} does not exist; leaving selection empty");
            return;
        };

        let schema = node_schema();
        self.push_members(
            Node::TYPE_NAME,
            discover(schema.members.clone(), &schema.bases),
        );

        for component in node.components() {
            let type_name = component.type_name();
            let Some(schema) = schema_of(type_name) else {
                warn!("component `{type_name}` has no registered schema");
                continue;
            };
            self.push_members(type_name, discover(schema.members.clone(), &schema.bases));
        }
    }

    fn push_members(&mut self, declaring_type: &str, set: MemberSet) {
        for schema in &set.fields {
            let binding = MemberBinding::from_field(declaring_type, schema);
            self.index_table.push(Slot {
                kind: MemberKind::Field,
                index: self.fields.len(),
            });
            self.labels.push(binding.label("Fields"));
            self.fields.push(binding);
        }
        for schema in &set.properties {
            let binding = MemberBinding::from_property(declaring_type, schema);
            self.index_table.push(Slot {
                kind: MemberKind::Property,
                index: self.properties.len(),
            });
            self.labels.push(binding.label("Properties"));
            self.properties.push(binding);
        }
        for schema in &set.methods {
            let binding = MethodBinding::from_method(declaring_type, schema);
            self.index_table.push(Slot {
                kind: MemberKind::Method,
                index: self.methods.len(),
            });
            self.labels.push(binding.label());
            self.methods.push(binding);
        }
    }

    /// The flattened selection list; the first two entries are the
    /// fixed sentinels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Stores the selection. No other side effect; member resolution
    /// happens lazily at invoke time.
    pub fn set_selected_index(&mut self, index: usize) {
        if index < self.labels.len() {
            self.selected = index;
        } else {
            warn!(
                "selection index {index} out of range ({} entries)",
                self.labels.len()
            );
        }
    }

    /// True when a real member (not a sentinel) is selected.
    pub fn has_selection(&self) -> bool {
        self.selected >= 2 && self.selected < self.index_table.len()
    }

    /// True when the current selection is a method.
    pub fn is_method(&self) -> bool {
        self.has_selection() && self.index_table[self.selected].kind == MemberKind::Method
    }

    /// Resolves the current selection to its descriptor.
    pub fn current_binding(&self) -> Option<BindingRef<'_>> {
        if !self.has_selection() {
            return None;
        }
        let slot = self.index_table[self.selected];
        match slot.kind {
            MemberKind::Field => self.fields.get(slot.index).map(BindingRef::Member),
            MemberKind::Property => self.properties.get(slot.index).map(BindingRef::Member),
            MemberKind::Method => self.methods.get(slot.index).map(BindingRef::Method),
        }
    }

    /// Current literal text for a selected field or property.
    pub fn literal(&self) -> Option<&str> {
        match self.current_binding()? {
            BindingRef::Member(m) => Some(m.literal.as_str()),
            BindingRef::Method(_) => None,
        }
    }

    /// Edits the literal of the selected field or property. A parse
    /// failure keeps the previous literal.
    pub fn set_literal(&mut self, text: &str) -> Result<(), ParseError> {
        if !self.has_selection() {
            return Ok(());
        }
        let slot = self.index_table[self.selected];
        let binding = match slot.kind {
            MemberKind::Field => self.fields.get_mut(slot.index),
            MemberKind::Property => self.properties.get_mut(slot.index),
            MemberKind::Method => None,
        };
        match binding {
            Some(b) => b.set_literal(text),
            None => Ok(()),
        }
    }

    /// Edits one parameter literal of the selected method.
    pub fn set_param_literal(&mut self, param: usize, text: &str) -> Result<(), ParseError> {
        if !self.is_method() {
            return Ok(());
        }
        let slot = self.index_table[self.selected];
        if let Some(binding) = self
            .methods
            .get_mut(slot.index)
            .and_then(|m| m.params.get_mut(param))
        {
            binding.set_literal(text)?;
        }
        Ok(())
    }

    /// Attaches a live object reference to the selected member.
    pub fn set_object_ref(&mut self, object_ref: Option<NodeId>) {
        if !self.has_selection() {
            return;
        }
        let slot = self.index_table[self.selected];
        let binding = match slot.kind {
            MemberKind::Field => self.fields.get_mut(slot.index),
            MemberKind::Property => self.properties.get_mut(slot.index),
            MemberKind::Method => None,
        };
        if let Some(b) = binding {
            b.object_ref = object_ref;
        }
    }

    /// Invokes the currently selected member against the live scene.
    /// With no real selection this is a no-op. All lookups go through
    /// stored name identities; any resolution failure is returned so
    /// the owning event can skip this listener and continue.
    pub fn invoke(&self, scene: &mut Scene) -> Result<(), InvokeError> {
        if self.selected < 2 {
            return Ok(());
        }
        let slot = self
            .index_table
            .get(self.selected)
            .copied()
            .ok_or(InvokeError::NothingSelected)?;
        let target = self.target.ok_or(InvokeError::TargetUnset)?;
        let node = scene
            .get_mut(target)
            .ok_or(InvokeError::TargetMissing(target))?;

        match slot.kind {
            MemberKind::Field => {
                let binding = self
                    .fields
                    .get(slot.index)
                    .ok_or(InvokeError::NothingSelected)?;
                let value = binding.parse_value()?;
                let schema = schema_of(&binding.declaring_type).ok_or_else(|| {
                    InvokeError::TypeNotRegistered(binding.declaring_type.clone())
                })?;
                let field = schema.find_field(&binding.name).ok_or_else(|| {
                    InvokeError::MemberNotFound {
                        type_name: binding.declaring_type.clone(),
                        name: binding.name.clone(),
                        kind: "field",
                    }
                })?;
                let set = field.set;
                set(resolve_target(node, &binding.declaring_type)?, &value)
            }
            MemberKind::Property => {
                let binding = self
                    .properties
                    .get(slot.index)
                    .ok_or(InvokeError::NothingSelected)?;
                let value = binding.parse_value()?;
                let schema = schema_of(&binding.declaring_type).ok_or_else(|| {
                    InvokeError::TypeNotRegistered(binding.declaring_type.clone())
                })?;
                let property = schema.find_property(&binding.name).ok_or_else(|| {
                    InvokeError::MemberNotFound {
                        type_name: binding.declaring_type.clone(),
                        name: binding.name.clone(),
                        kind: "property",
                    }
                })?;
                let set = property.set;
                set(resolve_target(node, &binding.declaring_type)?, &value)
            }
            MemberKind::Method => {
                let binding = self
                    .methods
                    .get(slot.index)
                    .ok_or(InvokeError::NothingSelected)?;
                let args: Vec<Value> = binding
                    .params
                    .iter()
                    .map(|p| p.parse_value())
                    .collect::<Result<_, _>>()?;
                let schema = schema_of(&binding.declaring_type).ok_or_else(|| {
                    InvokeError::TypeNotRegistered(binding.declaring_type.clone())
                })?;
                let method = schema
                    .find_method(&binding.name, &binding.param_kinds())
                    .ok_or_else(|| InvokeError::MemberNotFound {
                        type_name: binding.declaring_type.clone(),
                        name: binding.name.clone(),
                        kind: "method",
                    })?;
                let invoke = method.invoke;
                invoke(resolve_target(node, &binding.declaring_type)?, &args)
            }
        }
    }
}

/// The live call target: the node itself when the member was declared
/// on the node type, otherwise the matching attached component.
fn resolve_target<'a>(
    node: &'a mut Node,
    declaring_type: &str,
) -> Result<&'a mut dyn Any, InvokeError> {
    if declaring_type == Node::TYPE_NAME {
        Ok(node)
    } else {
        let component = node
            .component_mut(declaring_type)
            .ok_or_else(|| InvokeError::ComponentMissing(declaring_type.to_string()))?;
        Ok(component.as_any_mut())
    }
}
