// event_core/src/scene/component.rs
use crate::math::{AnimationCurve, Color, Rect};
use crate::scene::node::NodeId;
use crate::event::value::ScriptEnum;
use glam::Vec2;
use scene_component::{scene_component, scene_methods};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Shared state every component carries for its base-type members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectCore {
    pub name: String,
    pub enabled: bool,
}

impl Default for ObjectCore {
    fn default() -> Self {
        Self {
            name: String::new(),
            enabled: true,
        }
    }
}

/// A behaviour module attached to a node. Implementations come from
/// `#[scene_component]`; the `core` accessors back the base members
/// (`enabled`, `name`) every component inherits.
pub trait Component: Any + Send + Sync {
    fn type_name(&self) -> &'static str;
    fn core(&self) -> &ObjectCore;
    fn core_mut(&mut self) -> &mut ObjectCore;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Playback style for [`Animator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayMode {
    #[default]
    Once,
    Loop,
    PingPong,
}

impl ScriptEnum for PlayMode {
    fn names() -> &'static [&'static str] {
        &["Once", "Loop", "PingPong"]
    }

    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayMode::Once),
            1 => Some(PlayMode::Loop),
            2 => Some(PlayMode::PingPong),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        match self {
            PlayMode::Once => 0,
            PlayMode::Loop => 1,
            PlayMode::PingPong => 2,
        }
    }
}

/// Moves its node around; the demo component used by the editor tests.
#[scene_component]
#[derive(Debug, Clone, Default)]
pub struct Mover {
    pub core: ObjectCore,
    pub speed: f32,
    pub direction: Vec2,
    speed_cap: f32,
}

#[scene_methods]
impl Mover {
    /// Exposed as the `speed_cap` property.
    pub fn set_speed_cap(&mut self, cap: f32) {
        self.speed_cap = cap;
        if self.speed > cap {
            self.speed = cap;
        }
    }

    pub fn dash(&mut self, strength: f32) {
        self.speed += strength;
    }

    pub fn stop(&mut self) {
        self.speed = 0.0;
        self.direction = Vec2::ZERO;
    }

    // Read-only accessor, not discoverable.
    pub fn speed_cap(&self) -> f32 {
        self.speed_cap
    }

    #[deprecated(note = "use dash")]
    pub fn boost(&mut self, strength: f32) {
        self.speed += strength * 2.0;
    }
}

#[scene_component]
#[derive(Debug, Clone, Default)]
pub struct Jumper {
    pub core: ObjectCore,
    pub height: f32,
    pub airborne: bool,
}

#[scene_methods]
impl Jumper {
    pub fn jump(&mut self, height: f32) {
        self.height = height;
        self.airborne = true;
    }

    pub fn land(&mut self) {
        self.airborne = false;
    }
}

/// Sprite playback settings; exercises enum, color, rect, curve, and
/// object-reference members plus the unsupported-type paths.
#[scene_component(enums = [PlayMode])]
#[derive(Debug, Clone, Default)]
pub struct Animator {
    pub core: ObjectCore,
    pub mode: PlayMode,
    pub tint: Color,
    pub frame_area: Rect,
    pub fade: AnimationCurve,
    /// Not representable as a flat literal; listed but inert.
    pub frames: Vec<Rect>,
    follow_target: NodeId,
    play_speed: f32,
}

#[scene_methods(enums = [PlayMode])]
impl Animator {
    pub fn set_follow_target(&mut self, target: NodeId) {
        self.follow_target = target;
    }

    pub fn play(&mut self, mode: PlayMode, speed: f32) {
        self.mode = mode;
        self.play_speed = speed;
    }

    // Unsupported parameter type: the whole method is dropped from the
    // discovered set.
    pub fn set_frames(&mut self, frames: Vec<Rect>) {
        self.frames = frames;
    }

    pub fn follow_target(&self) -> NodeId {
        self.follow_target
    }

    pub fn play_speed(&self) -> f32 {
        self.play_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::value::{Value, ValueKind};
    use crate::scene::schema_registry::schema_of;

    #[test]
    fn fields_are_discovered_with_their_kinds() {
        let schema = schema_of("Mover").unwrap();
        assert_eq!(
            schema.find_field("speed").unwrap().value.kind,
            ValueKind::F32
        );
        assert_eq!(
            schema.find_field("direction").unwrap().value.kind,
            ValueKind::Vec2
        );
        // Private backing field never shows up.
        assert!(schema.find_field("speed_cap").is_none());
        // Neither does the shared core state.
        assert!(schema.find_field("core").is_none());
    }

    #[test]
    fn setters_become_properties() {
        let schema = schema_of("Mover").unwrap();
        let prop = schema.find_property("speed_cap").unwrap();
        assert_eq!(prop.value.kind, ValueKind::F32);

        let mut mover = Mover::default();
        mover.speed = 9.0;
        (prop.set)(&mut mover, &Value::F32(4.0)).unwrap();
        assert_eq!(mover.speed, 4.0);
        assert_eq!(mover.speed_cap(), 4.0);
    }

    #[test]
    fn methods_invoke_with_parsed_arguments() {
        let schema = schema_of("Jumper").unwrap();
        let method = schema.find_method("jump", &[ValueKind::F32]).unwrap();
        let mut jumper = Jumper::default();
        (method.invoke)(&mut jumper, &[Value::F32(2.5)]).unwrap();
        assert_eq!(jumper.height, 2.5);
        assert!(jumper.airborne);

        let land = schema.find_method("land", &[]).unwrap();
        (land.invoke)(&mut jumper, &[]).unwrap();
        assert!(!jumper.airborne);
    }

    #[test]
    fn read_only_and_deprecated_members_are_filtered() {
        let schema = schema_of("Mover").unwrap();
        assert!(schema.find_method("speed_cap", &[]).is_none());
        assert!(schema.find_method("boost", &[ValueKind::F32]).is_none());
    }

    #[test]
    fn unsupported_field_is_listed_but_inert() {
        let schema = schema_of("Animator").unwrap();
        let field = schema.find_field("frames").unwrap();
        assert_eq!(field.value.kind, ValueKind::Unsupported);
        assert_eq!((field.default_value)(), None);

        let mut animator = Animator::default();
        let err = (field.set)(&mut animator, &Value::F32(1.0)).unwrap_err();
        assert!(matches!(
            err,
            crate::event::error::InvokeError::Unsupported(_)
        ));
    }

    #[test]
    fn method_with_unsupported_parameter_is_dropped_entirely() {
        let schema = schema_of("Animator").unwrap();
        assert!(schema.find_property("frames").is_none());
        let all_sets = std::iter::once(&schema.members).chain(schema.bases.iter());
        assert!(all_sets
            .flat_map(|set| set.methods.iter())
            .all(|m| m.name != "set_frames"));
    }

    #[test]
    fn enum_members_use_the_name_table() {
        let schema = schema_of("Animator").unwrap();
        let field = schema.find_field("mode").unwrap();
        assert_eq!(field.value.kind, ValueKind::Enum);
        assert_eq!(
            field.value.enum_names.unwrap(),
            &["Once", "Loop", "PingPong"]
        );

        let mut animator = Animator::default();
        (field.set)(&mut animator, &Value::Enum(2)).unwrap();
        assert_eq!(animator.mode, PlayMode::PingPong);

        let play = schema
            .find_method("play", &[ValueKind::Enum, ValueKind::F32])
            .unwrap();
        (play.invoke)(&mut animator, &[Value::Enum(1), Value::F32(1.5)]).unwrap();
        assert_eq!(animator.mode, PlayMode::Loop);
        assert_eq!(animator.play_speed(), 1.5);
    }

    #[test]
    fn object_reference_property_stores_a_handle() {
        let schema = schema_of("Animator").unwrap();
        let prop = schema.find_property("follow_target").unwrap();
        assert_eq!(prop.value.kind, ValueKind::ObjectRef);

        let id = NodeId::new();
        let mut animator = Animator::default();
        (prop.set)(&mut animator, &Value::ObjectRef(id)).unwrap();
        assert_eq!(animator.follow_target(), id);
    }

    #[test]
    fn base_members_write_into_the_core() {
        let schema = schema_of("Jumper").unwrap();
        let enabled = schema.find_property("enabled").unwrap();
        let mut jumper = Jumper::default();
        assert!(jumper.core().enabled);
        (enabled.set)(&mut jumper, &Value::Bool(false)).unwrap();
        assert!(!jumper.core().enabled);
    }
}
