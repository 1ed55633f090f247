// event_core/src/scene/schema_registry.rs
use crate::scene::component::Component;
use crate::scene::node::{node_schema, Node};
use crate::scene::schema::{MemberSet, TypeSchema};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// All component types registered with `#[scene_component]`.
pub static COMPONENTS: Lazy<Vec<&'static ComponentRegistry>> = Lazy::new(|| {
    inventory::iter::<ComponentRegistry>.into_iter().collect()
});

inventory::collect!(ComponentRegistry);
inventory::collect!(MemberSubmission);

/// One entry for a concrete component type.
pub struct ComponentRegistry {
    /// Human-readable identifier, also the serialized declaring-type name.
    pub type_name: &'static str,
    /// Creates a default instance, used when the editor attaches the component.
    pub spawn: fn() -> Box<dyn Component>,
    /// Base member sets mixed into this type's schema, in mix-in order.
    pub bases: fn() -> Vec<MemberSet>,
}

/// One batch of member schemas for a type. `#[scene_component]` submits
/// the field batch and `#[scene_methods]` submits the property/method
/// batch; the schema map merges all batches for the same type name.
pub struct MemberSubmission {
    pub type_name: &'static str,
    pub members: fn() -> MemberSet,
}

static SCHEMAS: Lazy<HashMap<&'static str, TypeSchema>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, TypeSchema> = HashMap::new();
    for reg in inventory::iter::<ComponentRegistry> {
        map.insert(
            reg.type_name,
            TypeSchema {
                type_name: reg.type_name,
                members: MemberSet::default(),
                bases: (reg.bases)(),
            },
        );
    }
    for sub in inventory::iter::<MemberSubmission> {
        map.entry(sub.type_name)
            .or_insert_with(|| TypeSchema {
                type_name: sub.type_name,
                members: MemberSet::default(),
                bases: Vec::new(),
            })
            .members
            .extend((sub.members)());
    }
    map
});

/// Resolves a declaring-type name back to its live schema. This is the
/// late-binding step: stored string identity in, callable tables out.
pub fn schema_of(type_name: &str) -> Option<&'static TypeSchema> {
    if type_name == Node::TYPE_NAME {
        return Some(node_schema());
    }
    SCHEMAS.get(type_name)
}

/// Creates a default instance of a registered component by name.
pub fn spawn_component(type_name: &str) -> Option<Box<dyn Component>> {
    COMPONENTS
        .iter()
        .find(|reg| reg.type_name == type_name)
        .map(|reg| (reg.spawn)())
}
