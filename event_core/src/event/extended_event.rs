// event_core/src/event/extended_event.rs
//! The serializable event itself: an ordered list of listeners that
//! fire independently. One failing listener is logged and skipped, it
//! never aborts the rest of the batch.
use crate::event::listener::Listener;
use crate::scene::node::NodeId;
use crate::scene::scene::Scene;
use crate::storage::settings;
use log::{error, info};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtendedEvent {
    listeners: Vec<Listener>,
}

impl ExtendedEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    pub fn listener_mut(&mut self, index: usize) -> Option<&mut Listener> {
        self.listeners.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Appends an unassigned listener and returns its index.
    pub fn add_listener(&mut self) -> usize {
        self.listeners.push(Listener::default());
        self.listeners.len() - 1
    }

    /// Appends a listener pre-bound to `target`.
    pub fn add_listener_for(&mut self, target: NodeId, scene: &Scene) -> usize {
        self.listeners.push(Listener::new(target, scene));
        self.listeners.len() - 1
    }

    pub fn remove_listener(&mut self, index: usize) -> Option<Listener> {
        if index < self.listeners.len() {
            Some(self.listeners.remove(index))
        } else {
            None
        }
    }

    /// Re-discovers members for every listener, e.g. after a scene load.
    pub fn rebuild(&mut self, scene: &Scene) {
        for listener in &mut self.listeners {
            listener.rebuild(scene);
        }
    }

    /// Fires every listener in order. Returns the number that invoked
    /// without error; failures are logged at error level and skipped.
    /// With the `log_invocations` setting on, successes are logged too.
    pub fn invoke(&self, scene: &mut Scene) -> usize {
        let verbose = settings::log_invocations();
        let mut fired = 0;
        for (i, listener) in self.listeners.iter().enumerate() {
            match listener.invoke(scene) {
                Ok(()) => {
                    fired += 1;
                    if verbose {
                        info!("event listener {i} invoked");
                    }
                }
                Err(err) => {
                    error!("event listener {i} failed to invoke: {err}");
                }
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::error::InvokeError;
    use crate::scene::component::{Jumper, Mover};
    use crate::scene::schema_registry::spawn_component;

    fn demo_scene() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let id = scene.spawn("demo");
        let node = scene.get_mut(id).unwrap();
        node.attach(spawn_component("Mover").unwrap());
        node.attach(spawn_component("Jumper").unwrap());
        (scene, id)
    }

    fn select(listener: &mut Listener, label: &str) {
        let at = listener
            .labels()
            .iter()
            .position(|l| l == label)
            .unwrap_or_else(|| panic!("label `{label}` missing"));
        listener.set_selected_index(at);
    }

    #[test]
    fn listeners_fire_in_order() {
        let (mut scene, id) = demo_scene();
        let mut event = ExtendedEvent::new();

        let a = event.add_listener_for(id, &scene);
        let la = event.listener_mut(a).unwrap();
        select(la, "Mover/Fields/f32 speed");
        la.set_literal("3").unwrap();

        let b = event.add_listener_for(id, &scene);
        let lb = event.listener_mut(b).unwrap();
        select(lb, "Jumper/Methods/jump (f32)");
        lb.set_param_literal(0, "1.5").unwrap();

        assert_eq!(event.invoke(&mut scene), 2);
        let node = scene.get(id).unwrap();
        assert_eq!(node.component::<Mover>().unwrap().speed, 3.0);
        assert_eq!(node.component::<Jumper>().unwrap().height, 1.5);
    }

    #[test]
    fn one_broken_listener_does_not_stop_the_rest() {
        let (mut scene, id) = demo_scene();
        let doomed = scene.spawn("doomed");
        let mut event = ExtendedEvent::new();

        let a = event.add_listener_for(doomed, &scene);
        let la = event.listener_mut(a).unwrap();
        select(la, "Node/Properties/bool active");
        la.set_literal("false").unwrap();

        let b = event.add_listener_for(id, &scene);
        let lb = event.listener_mut(b).unwrap();
        select(lb, "Mover/Fields/f32 speed");
        lb.set_literal("9").unwrap();

        scene.despawn(doomed);
        assert_eq!(event.invoke(&mut scene), 1);
        let mover = scene.get(id).unwrap().component::<Mover>().unwrap();
        assert_eq!(mover.speed, 9.0);
    }

    #[test]
    fn unassigned_listeners_count_as_fired_no_ops() {
        let (mut scene, _) = demo_scene();
        let mut event = ExtendedEvent::new();
        event.add_listener();
        assert_eq!(event.invoke(&mut scene), 1);
    }

    #[test]
    fn remove_listener_preserves_order_of_the_rest() {
        let (scene, id) = demo_scene();
        let mut event = ExtendedEvent::new();
        event.add_listener();
        event.add_listener_for(id, &scene);
        assert!(event.remove_listener(0).is_some());
        assert_eq!(event.len(), 1);
        assert_eq!(event.listeners()[0].target(), Some(id));
        assert!(event.remove_listener(5).is_none());
    }

    #[test]
    fn event_survives_a_ron_round_trip() {
        let (mut scene, id) = demo_scene();
        let mut event = ExtendedEvent::new();
        let a = event.add_listener_for(id, &scene);
        let la = event.listener_mut(a).unwrap();
        select(la, "Mover/Fields/f32 speed");
        la.set_literal("4.25").unwrap();

        let text = ron::ser::to_string(&event).unwrap();
        let restored: ExtendedEvent = ron::de::from_str(&text).unwrap();
        assert_eq!(restored.invoke(&mut scene), 1);
        let mover = scene.get(id).unwrap().component::<Mover>().unwrap();
        assert_eq!(mover.speed, 4.25);
    }

    #[test]
    fn verbose_invocation_logging_can_be_toggled() {
        let (mut scene, id) = demo_scene();
        let mut event = ExtendedEvent::new();
        let a = event.add_listener_for(id, &scene);
        let la = event.listener_mut(a).unwrap();
        select(la, "Mover/Fields/f32 speed");
        la.set_literal("1").unwrap();

        settings::SETTINGS.write().unwrap().log_invocations = true;
        assert!(settings::log_invocations());
        assert_eq!(event.invoke(&mut scene), 1);
        settings::SETTINGS.write().unwrap().log_invocations = false;
        assert!(!settings::log_invocations());
        assert_eq!(event.invoke(&mut scene), 1);
    }

    #[test]
    fn invoke_error_display_names_the_failure() {
        let err = InvokeError::ComponentMissing("Mover".into());
        assert!(err.to_string().contains("Mover"));
    }
}
