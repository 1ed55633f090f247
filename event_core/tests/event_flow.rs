// event_core/tests/event_flow.rs
//! End-to-end flow: discover members on a live node, edit literals,
//! persist the event, and invoke it against a changed scene.
use event_core::event::extended_event::ExtendedEvent;
use event_core::event::listener::Listener;
use event_core::math::Color;
use event_core::scene::component::{Animator, Mover, PlayMode};
use event_core::scene::node::NodeId;
use event_core::scene::scene::Scene;
use event_core::scene::schema_registry::spawn_component;
use glam::Vec2;

fn scene_with(components: &[&str]) -> (Scene, NodeId) {
    let mut scene = Scene::new();
    let id = scene.spawn("subject");
    let node = scene.get_mut(id).unwrap();
    for name in components {
        node.attach(spawn_component(name).unwrap());
    }
    (scene, id)
}

fn select(listener: &mut Listener, label: &str) {
    let at = listener
        .labels()
        .iter()
        .position(|l| l == label)
        .unwrap_or_else(|| panic!("label `{label}` missing from {:?}", listener.labels()));
    listener.set_selected_index(at);
}

#[test]
fn discovered_list_starts_with_sentinels_and_groups_by_declaring_type() {
    let (scene, id) = scene_with(&["Mover", "Jumper"]);
    let listener = Listener::new(id, &scene);
    let labels = listener.labels();

    assert_eq!(labels[0], "Nothing Selected");
    assert_eq!(labels[1], "");
    assert!(labels.contains(&"Node/Fields/Vec2 position".to_string()));
    assert!(labels.contains(&"Mover/Properties/f32 speed_cap".to_string()));
    assert!(labels.contains(&"Jumper/Methods/jump (f32)".to_string()));
    assert!(labels.contains(&"Jumper/Methods/land ()".to_string()));
}

#[test]
fn editing_a_vector_literal_and_invoking_moves_the_node() {
    let (mut scene, id) = scene_with(&[]);
    let mut listener = Listener::new(id, &scene);

    select(&mut listener, "Node/Methods/translate (Vec2)");
    listener.set_param_literal(0, "(3, -1.5)").unwrap();
    listener.invoke(&mut scene).unwrap();
    listener.invoke(&mut scene).unwrap();

    assert_eq!(scene.get(id).unwrap().position, Vec2::new(6.0, -3.0));
}

#[test]
fn rejected_literal_edit_keeps_the_previous_value() {
    let (mut scene, id) = scene_with(&["Mover"]);
    let mut listener = Listener::new(id, &scene);

    select(&mut listener, "Mover/Fields/f32 speed");
    listener.set_literal("2.5").unwrap();
    assert!(listener.set_literal("not a number").is_err());
    assert_eq!(listener.literal(), Some("2.5"));

    listener.invoke(&mut scene).unwrap();
    let mover = scene.get(id).unwrap().component::<Mover>().unwrap();
    assert_eq!(mover.speed, 2.5);
}

#[test]
fn enum_and_color_members_round_trip_through_the_event() {
    let (mut scene, id) = scene_with(&["Animator"]);
    let mut event = ExtendedEvent::new();

    let a = event.add_listener_for(id, &scene);
    let la = event.listener_mut(a).unwrap();
    select(la, "Animator/Fields/enum mode");
    la.set_literal("PingPong").unwrap();

    let b = event.add_listener_for(id, &scene);
    let lb = event.listener_mut(b).unwrap();
    select(lb, "Animator/Fields/Color tint");
    lb.set_literal("(r:1, g:0.5, b:0, a:1)").unwrap();

    let text = ron::ser::to_string(&event).unwrap();
    let restored: ExtendedEvent = ron::de::from_str(&text).unwrap();
    assert_eq!(restored.invoke(&mut scene), 2);

    let animator = scene.get(id).unwrap().component::<Animator>().unwrap();
    assert_eq!(animator.mode, PlayMode::PingPong);
    assert_eq!(
        animator.tint,
        Color {
            r: 1.0,
            g: 0.5,
            b: 0.0,
            a: 1.0
        }
    );
}

#[test]
fn object_reference_member_targets_another_node() {
    let (mut scene, id) = scene_with(&["Animator"]);
    let other = scene.spawn("camera");
    let mut listener = Listener::new(id, &scene);

    select(&mut listener, "Animator/Properties/object follow_target");
    listener.set_object_ref(Some(other));
    listener.invoke(&mut scene).unwrap();

    let animator = scene.get(id).unwrap().component::<Animator>().unwrap();
    assert_eq!(animator.follow_target(), other);
}

#[test]
fn stale_listeners_are_skipped_without_stopping_the_batch() {
    let (mut scene, id) = scene_with(&["Mover"]);
    let doomed = scene.spawn("doomed");

    let mut event = ExtendedEvent::new();
    let a = event.add_listener_for(doomed, &scene);
    let la = event.listener_mut(a).unwrap();
    select(la, "Node/Properties/bool active");
    la.set_literal("false").unwrap();

    let b = event.add_listener_for(id, &scene);
    let lb = event.listener_mut(b).unwrap();
    select(lb, "Mover/Methods/dash (f32)");
    lb.set_param_literal(0, "4").unwrap();

    scene.despawn(doomed);

    assert_eq!(event.invoke(&mut scene), 1);
    let mover = scene.get(id).unwrap().component::<Mover>().unwrap();
    assert_eq!(mover.speed, 4.0);
}

#[test]
fn rebuild_after_component_changes_refreshes_the_list() {
    let (mut scene, id) = scene_with(&["Mover"]);
    let mut listener = Listener::new(id, &scene);
    assert!(listener
        .labels()
        .contains(&"Mover/Fields/f32 speed".to_string()));

    scene.get_mut(id).unwrap().detach("Mover");
    scene
        .get_mut(id)
        .unwrap()
        .attach(spawn_component("Jumper").unwrap());
    listener.rebuild(&scene);

    assert!(!listener
        .labels()
        .contains(&"Mover/Fields/f32 speed".to_string()));
    assert!(listener
        .labels()
        .contains(&"Jumper/Methods/jump (f32)".to_string()));
    assert_eq!(listener.selected_index(), 0);
}

#[test]
fn unsupported_members_are_listed_inert_or_dropped() {
    let (scene, id) = scene_with(&["Animator"]);
    let listener = Listener::new(id, &scene);
    let labels = listener.labels();

    // Unsupported field stays listed.
    assert!(labels.contains(&"Animator/Fields/unsupported frames".to_string()));
    // Method with an unsupported parameter disappears entirely.
    assert!(!labels.iter().any(|l| l.contains("set_frames")));
}
