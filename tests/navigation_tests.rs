//! End-to-end navigation scenarios over the public API
//!
//! Builds registries from definition fixtures and drives sessions through
//! branch and branch-back activations.

use std::path::{Path, PathBuf};

use osk::definition::{expand_sources, load_files, parse_palette, ParseMode};
use osk::geometry::{placement_of, resolve_shape, GridPlacement, GridShape};
use osk::models::{Key, KeyRect, Palette};
use osk::navigation::{wire_all, KeyAction, KeyBindings, NavigationStack, WiringIssue};
use osk::registry::PaletteRegistry;
use osk::render::RecordingRenderer;
use osk::session::{ActivationOutcome, Session};

fn fixtures(dir: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(dir)
}

fn load_registry(dir: &str) -> (PaletteRegistry, usize) {
    let paths = expand_sources(&["*.json".to_string()], &fixtures(dir)).unwrap();
    let loaded = load_files(&paths, ParseMode::Lenient).unwrap();
    assert!(loaded.warnings.is_empty(), "unexpected warnings: {:?}", loaded.warnings);
    let mut registry = PaletteRegistry::new();
    let rejected = registry.add_all(loaded.palettes).len();
    (registry, rejected)
}

#[test]
fn test_geometry_example() {
    let palette = Palette::new("row")
        .with_key(Key::new("A", KeyRect::new(0, 0, 2, 1)))
        .with_key(Key::new("B", KeyRect::new(2, 0, 4, 1)));

    assert_eq!(resolve_shape(&palette), GridShape { rows: 1, cols: 4 });
    assert_eq!(
        placement_of(palette.key("A").unwrap()).unwrap(),
        GridPlacement { col_start: 1, col_end: 3, row_start: 1, row_end: 2 }
    );
}

#[test]
fn test_fixture_shapes() {
    let (registry, rejected) = load_registry("keyboards");
    assert_eq!(rejected, 0);
    assert_eq!(registry.get("main").unwrap().shape(), GridShape { rows: 2, cols: 3 });
    assert_eq!(registry.get("mouse").unwrap().shape(), GridShape { rows: 3, cols: 3 });
}

#[test]
fn test_main_mouse_round_trip() {
    let (registry, _) = load_registry("keyboards");
    let container = "mainKbd-container".to_string();
    let mut session = Session::new(registry, RecordingRenderer::<String>::new());
    let report = session.wire(&container);
    assert!(report.is_clean());

    session.show("main", &container).unwrap();
    assert_eq!(session.stack().push_pop_difference(), 0);

    // Follow main's branch key
    let outcome = session.activate("main", "mouse");
    assert_eq!(outcome, ActivationOutcome::Navigated { from: "main".into(), to: "mouse".into() });
    assert_eq!(session.stack().iter().collect::<Vec<_>>(), vec!["main"]);
    assert_eq!(session.renderer().last(), Some(&("mouse".to_string(), container.clone())));

    // And come back
    let outcome = session.activate("mouse", "back");
    assert_eq!(outcome, ActivationOutcome::WentBack { to: "main".into() });
    assert!(session.stack().is_empty());
    assert_eq!(session.stack().push_pop_difference(), 0);
    assert_eq!(session.renderer().rendered(), vec!["main", "mouse", "main"]);

    // Nothing left to go back to: stay on the current palette
    session.activate("main", "mouse");
    session.activate("mouse", "back");
    assert_eq!(session.activate("mouse", "back"), ActivationOutcome::NothingToReturnTo);
    assert_eq!(session.current(), Some("main"));
}

#[test]
fn test_unresolved_target_does_not_stop_wiring() {
    let (mut registry, rejected) = load_registry("unresolved");
    // broken.json has a zero-height key and is rejected at registration
    assert_eq!(rejected, 1);
    assert!(!registry.contains("broken"));

    let mut bindings = KeyBindings::new();
    let report = wire_all(&mut registry, &mut bindings, &());

    assert_eq!(
        report.issues,
        vec![WiringIssue::UnresolvedTarget {
            palette: "main".into(),
            key: "numbers".into(),
            target: "numbers".into(),
        }]
    );
    assert!(bindings.get("main", "numbers").is_none());
    assert_eq!(
        bindings.get("main", "mouse").map(|b| &b.action),
        Some(&KeyAction::Forward { source: "main".into(), target: "mouse".into() })
    );
    assert!(bindings.is_bound("mouse", "back"));
}

#[test]
fn test_rewiring_is_a_noop() {
    let (registry, _) = load_registry("keyboards");
    let container = "kbd".to_string();
    let mut session = Session::new(registry, RecordingRenderer::<String>::new());
    session.wire(&container);
    let bound = session.bindings().len();

    let again = session.wire(&container);
    assert_eq!(again.forward_bound + again.back_bound, 0);
    assert_eq!(session.bindings().len(), bound);

    // One activation still pushes exactly once
    session.show("main", &container).unwrap();
    session.activate("main", "mouse");
    assert_eq!(session.stack().len(), 1);
}

#[test]
fn test_capacity_rejection_keeps_stack() {
    let source = r#"{"name": "loop", "keys": {"again": {"left": 0, "top": 0, "right": 1, "bottom": 1, "type": "branch", "target": "loop"}}}"#;
    let mut registry = PaletteRegistry::new();
    registry.add(parse_palette(source).unwrap()).unwrap();

    let mut session =
        Session::with_stack(registry, NavigationStack::with_capacity(3), RecordingRenderer::<String>::new());
    session.wire(&"kbd".to_string());
    session.show("loop", &"kbd".to_string()).unwrap();

    for _ in 0..3 {
        assert!(matches!(session.activate("loop", "again"), ActivationOutcome::Navigated { .. }));
    }
    let outcome = session.activate("loop", "again");
    assert!(matches!(outcome, ActivationOutcome::CapacityExceeded(_)));
    assert_eq!(session.stack().len(), 3);
    assert_eq!(session.stack().push_pop_difference(), 3);
}

#[test]
fn test_independent_sessions() {
    let (registry, _) = load_registry("keyboards");
    let container = "kbd".to_string();
    let mut first = Session::new(registry.clone(), RecordingRenderer::<String>::new());
    let mut second = Session::new(registry, RecordingRenderer::<String>::new());
    first.wire(&container);
    second.wire(&container);

    first.show("main", &container).unwrap();
    first.activate("main", "mouse");

    assert_eq!(first.stack().len(), 1);
    assert!(second.stack().is_empty());
    assert!(second.renderer().rendered().is_empty());
}
