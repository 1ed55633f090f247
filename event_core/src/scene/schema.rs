// event_core/src/scene/schema.rs
//! Static member tables that stand in for runtime reflection: every
//! scriptable type exposes its writable fields, setter properties, and
//! invokable methods as data, with function-pointer shims that perform
//! the actual late-bound write or call against `&mut dyn Any`.
use crate::event::error::InvokeError;
use crate::event::value::{Value, ValueKind, ValueTypeInfo, ValueTyped};
use crate::scene::component::Component;
use std::any::Any;

/// Writes one parsed value into the member on a live object.
pub type SetFn = fn(&mut dyn Any, &Value) -> Result<(), InvokeError>;
/// Produces the member type's canonical default, if it has one.
pub type DefaultFn = fn() -> Option<Value>;
/// Calls one method on a live object with parsed arguments.
pub type InvokeFn = fn(&mut dyn Any, &[Value]) -> Result<(), InvokeError>;

/// One writable public field.
#[derive(Clone)]
pub struct FieldSchema {
    pub name: &'static str,
    pub value: ValueTypeInfo,
    pub set: SetFn,
    pub default_value: DefaultFn,
}

/// One single-argument setter exposed as a property.
#[derive(Clone)]
pub struct PropertySchema {
    pub name: &'static str,
    pub value: ValueTypeInfo,
    pub set: SetFn,
    pub default_value: DefaultFn,
}

/// One method parameter, in declaration order.
#[derive(Clone)]
pub struct ParamSchema {
    pub name: &'static str,
    pub value: ValueTypeInfo,
    pub default_value: DefaultFn,
}

/// One invokable method.
#[derive(Clone)]
pub struct MethodSchema {
    pub name: &'static str,
    pub params: Vec<ParamSchema>,
    pub invoke: InvokeFn,
}

impl MethodSchema {
    /// True when `kinds` matches this method's parameter list, used to
    /// re-resolve a stored method identity by name plus signature.
    pub fn signature_matches(&self, kinds: &[ValueKind]) -> bool {
        self.params.len() == kinds.len()
            && self
                .params
                .iter()
                .zip(kinds)
                .all(|(p, k)| p.value.kind == *k)
    }
}

/// The three member collections one type (or base mix-in) contributes.
#[derive(Clone, Default)]
pub struct MemberSet {
    pub fields: Vec<FieldSchema>,
    pub properties: Vec<PropertySchema>,
    pub methods: Vec<MethodSchema>,
}

impl MemberSet {
    pub fn extend(&mut self, other: MemberSet) {
        self.fields.extend(other.fields);
        self.properties.extend(other.properties);
        self.methods.extend(other.methods);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.properties.is_empty() && self.methods.is_empty()
    }
}

/// Everything the registry knows about one scriptable type: its own
/// members plus the base member sets mixed in for its category.
#[derive(Clone)]
pub struct TypeSchema {
    pub type_name: &'static str,
    pub members: MemberSet,
    pub bases: Vec<MemberSet>,
}

impl TypeSchema {
    pub fn find_field(&self, name: &str) -> Option<&FieldSchema> {
        self.member_sets()
            .find_map(|set| set.fields.iter().find(|f| f.name == name))
    }

    pub fn find_property(&self, name: &str) -> Option<&PropertySchema> {
        self.member_sets()
            .find_map(|set| set.properties.iter().find(|p| p.name == name))
    }

    pub fn find_method(&self, name: &str, kinds: &[ValueKind]) -> Option<&MethodSchema> {
        self.member_sets().find_map(|set| {
            set.methods
                .iter()
                .find(|m| m.name == name && m.signature_matches(kinds))
        })
    }

    fn member_sets(&self) -> impl Iterator<Item = &MemberSet> {
        std::iter::once(&self.members).chain(self.bases.iter())
    }
}

/// Members every component inherits from its behaviour base: the
/// `enabled` toggle stored in [`ObjectCore`](crate::scene::component::ObjectCore).
pub fn behaviour_members<T: Component>() -> MemberSet {
    MemberSet {
        fields: Vec::new(),
        properties: vec![PropertySchema {
            name: "enabled",
            value: <bool as ValueTyped>::type_info(),
            set: |any: &mut dyn Any, value: &Value| -> Result<(), InvokeError> {
                let target = any.downcast_mut::<T>().ok_or(InvokeError::TargetType)?;
                target.core_mut().enabled = bool::from_value(value)?;
                Ok(())
            },
            default_value: || Some(Value::Bool(true)),
        }],
        methods: Vec::new(),
    }
}

/// Members every scene object inherits from the universal object base.
pub fn object_members<T: Component>() -> MemberSet {
    MemberSet {
        fields: Vec::new(),
        properties: vec![PropertySchema {
            name: "name",
            value: <String as ValueTyped>::type_info(),
            set: |any: &mut dyn Any, value: &Value| -> Result<(), InvokeError> {
                let target = any.downcast_mut::<T>().ok_or(InvokeError::TargetType)?;
                target.core_mut().name = String::from_value(value)?;
                Ok(())
            },
            default_value: || Some(Value::Str(String::new())),
        }],
        methods: Vec::new(),
    }
}
