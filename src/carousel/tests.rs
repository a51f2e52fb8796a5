use super::engine::{CarouselEngine, Effect};
use super::nav::NavState;
use crate::config::LoopviewConfig;
use crate::events::{CarouselInput, Direction, TransitionProperty};
use crate::item::Item;

fn items(n: usize) -> Vec<Item> {
    (0..n)
        .map(|i| {
            Item::new(
                format!("item-{}", i),
                format!("assets/{}.jpg", i),
                format!("Item {}", i),
                format!("Description {}", i),
                format!("https://example.com/{}", i),
            )
        })
        .collect()
}

/// Engine over 5 items at the medium breakpoint: visible_count 3,
/// clone_count 4, 13 slots, initial index 4, item width 300px.
fn medium_engine() -> CarouselEngine {
    CarouselEngine::new(items(5), LoopviewConfig::default(), 1000.0, 900.0).unwrap()
}

fn complete_translation(engine: &mut CarouselEngine) -> Vec<Effect> {
    engine.dispatch(CarouselInput::TransitionComplete {
        property: TransitionProperty::Translation,
    })
}

fn has_animated_track(effects: &[Effect]) -> bool {
    effects
        .iter()
        .any(|e| matches!(e, Effect::Track { animate: true, .. }))
}

#[test]
fn test_initial_state_centers_first_original() {
    let engine = medium_engine();
    assert_eq!(engine.current_index(), 4);
    assert_eq!(engine.sequence().source_of(4), Some(0));
    assert_eq!(engine.item_width(), 300.0);
}

#[test]
fn test_moves_are_serialized_through_the_guard() {
    let mut engine = medium_engine();

    let effects = engine.dispatch(CarouselInput::KeyPress {
        direction: Direction::Next,
    });
    assert!(has_animated_track(&effects));
    assert_eq!(engine.current_index(), 5);
    assert_eq!(engine.nav_state(), NavState::Moving);

    // Second request while in flight is held, not queued
    let rejected = engine.dispatch(CarouselInput::KeyPress {
        direction: Direction::Next,
    });
    assert!(rejected.is_empty());
    assert_eq!(engine.current_index(), 5);

    complete_translation(&mut engine);
    assert_eq!(engine.nav_state(), NavState::Idle);

    let accepted = engine.dispatch(CarouselInput::KeyPress {
        direction: Direction::Next,
    });
    assert!(has_animated_track(&accepted));
    assert_eq!(engine.current_index(), 6);
}

#[test]
fn test_wraparound_after_full_cycle() {
    let mut engine = medium_engine();
    let start_source = engine.sequence().source_of(engine.current_index());

    for _ in 0..5 {
        engine.dispatch(CarouselInput::KeyPress {
            direction: Direction::Next,
        });
        complete_translation(&mut engine);
    }

    // Five moves over five originals: index 4 + 5 = 9 normalizes back to 4
    assert_eq!(engine.current_index(), 4);
    assert_eq!(
        engine.sequence().source_of(engine.current_index()),
        start_source
    );
}

#[test]
fn test_wraparound_correction_renders_instantly() {
    let mut engine = medium_engine();

    for _ in 0..4 {
        engine.dispatch(CarouselInput::KeyPress {
            direction: Direction::Next,
        });
        complete_translation(&mut engine);
    }
    assert_eq!(engine.current_index(), 8);

    engine.dispatch(CarouselInput::KeyPress {
        direction: Direction::Next,
    });
    assert_eq!(engine.current_index(), 9); // in the head clone region

    let effects = complete_translation(&mut engine);
    assert_eq!(engine.current_index(), 4);
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::Track { animate: false, .. })));
}

#[test]
fn test_index_stays_in_band_after_every_completed_move() {
    let mut engine = medium_engine();
    let cc = engine.sequence().clone_count();
    let n = engine.sequence().original_count();

    for direction in [Direction::Prev, Direction::Next] {
        for _ in 0..12 {
            engine.dispatch(CarouselInput::KeyPress { direction });
            complete_translation(&mut engine);
            let index = engine.current_index();
            assert!(
                index >= cc && index < n + cc,
                "index {} escaped the canonical band",
                index
            );
        }
    }
}

#[test]
fn test_prev_wraparound_through_head_clones() {
    let mut engine = medium_engine();

    engine.dispatch(CarouselInput::KeyPress {
        direction: Direction::Prev,
    });
    assert_eq!(engine.current_index(), 3); // tail clone region
    complete_translation(&mut engine);
    assert_eq!(engine.current_index(), 8); // same content, original slot
    assert_eq!(engine.sequence().source_of(8), Some(4));
}

#[test]
fn test_spurious_transition_complete_is_ignored() {
    let mut engine = medium_engine();
    let effects = complete_translation(&mut engine);
    assert!(effects.is_empty());
    assert_eq!(engine.current_index(), 4);
}

#[test]
fn test_non_translation_transition_is_ignored() {
    let mut engine = medium_engine();
    engine.dispatch(CarouselInput::KeyPress {
        direction: Direction::Next,
    });

    let effects = engine.dispatch(CarouselInput::TransitionComplete {
        property: TransitionProperty::Opacity,
    });
    assert!(effects.is_empty());
    assert_eq!(engine.nav_state(), NavState::Moving);
}

#[test]
fn test_click_moves_by_offset_in_one_transition() {
    let mut engine = medium_engine();
    assert_eq!(engine.current_index(), 4);

    // Slot 6 is two positions right of center: one move of magnitude 2
    let effects = engine.dispatch(CarouselInput::Click { slot: 6 });
    assert_eq!(engine.current_index(), 6);
    let animated_tracks = effects
        .iter()
        .filter(|e| matches!(e, Effect::Track { animate: true, .. }))
        .count();
    assert_eq!(animated_tracks, 1);
}

#[test]
fn test_click_on_center_opens_link() {
    let mut engine = medium_engine();
    let effects = engine.dispatch(CarouselInput::Click { slot: 4 });
    assert_eq!(
        effects,
        vec![Effect::OpenLink {
            item_id: "item-0".to_string(),
            url: "https://example.com/0".to_string(),
        }]
    );
    assert_eq!(engine.current_index(), 4);
}

#[test]
fn test_activate_opens_center_link() {
    let mut engine = medium_engine();
    engine.dispatch(CarouselInput::Click { slot: 5 });
    complete_translation(&mut engine);

    let effects = engine.dispatch(CarouselInput::Activate);
    assert_eq!(
        effects,
        vec![Effect::OpenLink {
            item_id: "item-1".to_string(),
            url: "https://example.com/1".to_string(),
        }]
    );
}

#[test]
fn test_click_outside_sequence_is_ignored() {
    let mut engine = medium_engine();
    let effects = engine.dispatch(CarouselInput::Click { slot: 99 });
    assert!(effects.is_empty());
    assert_eq!(engine.current_index(), 4);
}

#[test]
fn test_drag_below_threshold_snaps_back() {
    let mut engine = medium_engine();

    engine.dispatch(CarouselInput::DragStart { x: 400.0 });
    let preview = engine.dispatch(CarouselInput::DragMove { x: 360.0 });
    assert!(preview
        .iter()
        .any(|e| matches!(e, Effect::Track { animate: false, .. })));
    assert_eq!(engine.current_index(), 4);

    // |delta| = 49: below the threshold, index unchanged
    let effects = engine.dispatch(CarouselInput::DragEnd { x: 351.0 });
    assert_eq!(engine.current_index(), 4);
    assert!(has_animated_track(&effects));
    assert_eq!(engine.nav_state(), NavState::Idle);
}

#[test]
fn test_drag_past_threshold_commits_one_move() {
    let mut engine = medium_engine();

    // Dragging left (delta +51) pulls the next item in
    engine.dispatch(CarouselInput::DragStart { x: 400.0 });
    engine.dispatch(CarouselInput::DragEnd { x: 349.0 });
    assert_eq!(engine.current_index(), 5);
    complete_translation(&mut engine);

    // Dragging right (delta -51) goes back
    engine.dispatch(CarouselInput::DragStart { x: 400.0 });
    engine.dispatch(CarouselInput::DragEnd { x: 451.0 });
    assert_eq!(engine.current_index(), 4);
}

#[test]
fn test_drag_preview_tracks_pointer_without_committing() {
    let mut engine = medium_engine();
    engine.dispatch(CarouselInput::DragStart { x: 500.0 });
    // centered offset for index 4: -(4 * 300) + (900 - 300) / 2
    let resting = -(4.0 * 300.0) + 300.0;

    let effects = engine.dispatch(CarouselInput::DragMove { x: 470.0 });
    match &effects[..] {
        [Effect::Track { offset_px, animate }] => {
            assert_eq!(*offset_px, resting - 30.0);
            assert!(!animate);
        }
        other => panic!("Unexpected effects: {:?}", other),
    }
    assert_eq!(engine.current_index(), 4);
}

#[test]
fn test_drag_rejected_while_moving() {
    let mut engine = medium_engine();
    engine.dispatch(CarouselInput::KeyPress {
        direction: Direction::Next,
    });
    assert_eq!(engine.nav_state(), NavState::Moving);

    let effects = engine.dispatch(CarouselInput::DragStart { x: 400.0 });
    assert!(effects.is_empty());
    assert!(!engine.drag_active());
}

#[test]
fn test_hold_moves_immediately_and_arms_timer() {
    let mut engine = medium_engine();

    let effects = engine.dispatch(CarouselInput::StartHold {
        direction: Direction::Next,
    });
    assert_eq!(engine.current_index(), 5);
    assert!(effects.contains(&Effect::ArmHold {
        direction: Direction::Next
    }));
    assert_eq!(engine.hold_direction(), Some(Direction::Next));

    // Tick advances once the prior move has completed
    complete_translation(&mut engine);
    engine.dispatch(CarouselInput::HoldTick);
    assert_eq!(engine.current_index(), 6);

    let effects = engine.dispatch(CarouselInput::StopHold);
    assert_eq!(effects, vec![Effect::CancelHold]);
    assert_eq!(engine.hold_direction(), None);
}

#[test]
fn test_hold_tick_without_hold_is_ignored() {
    let mut engine = medium_engine();
    let effects = engine.dispatch(CarouselInput::HoldTick);
    assert!(effects.is_empty());
    assert_eq!(engine.current_index(), 4);
}

#[test]
fn test_drag_start_cancels_hold() {
    let mut engine = medium_engine();
    engine.dispatch(CarouselInput::StartHold {
        direction: Direction::Next,
    });
    complete_translation(&mut engine);

    let effects = engine.dispatch(CarouselInput::DragStart { x: 400.0 });
    assert!(effects.contains(&Effect::CancelHold));
    assert_eq!(engine.hold_direction(), None);
    assert!(engine.drag_active());

    // A late tick after cancellation must not advance anything
    let effects = engine.dispatch(CarouselInput::HoldTick);
    assert!(effects.is_empty());
}

#[test]
fn test_drag_start_during_move_still_disengages_hold() {
    let mut engine = medium_engine();
    engine.dispatch(CarouselInput::StartHold {
        direction: Direction::Next,
    });
    // The immediate hold move is still in flight
    assert_eq!(engine.nav_state(), NavState::Moving);

    let effects = engine.dispatch(CarouselInput::DragStart { x: 400.0 });
    assert!(effects.contains(&Effect::CancelHold));
    assert_eq!(engine.hold_direction(), None);
    // The drag itself could not begin while the move was in flight
    assert!(!engine.drag_active());

    // A late tick must not advance anything either
    complete_translation(&mut engine);
    let effects = engine.dispatch(CarouselInput::HoldTick);
    assert!(effects.is_empty());
}

#[test]
fn test_hold_start_cancels_drag() {
    let mut engine = medium_engine();
    engine.dispatch(CarouselInput::DragStart { x: 400.0 });
    assert!(engine.drag_active());

    engine.dispatch(CarouselInput::StartHold {
        direction: Direction::Next,
    });
    assert!(!engine.drag_active());
    assert_eq!(engine.hold_direction(), Some(Direction::Next));
    // Exactly one advance from the hold, none from the abandoned drag
    assert_eq!(engine.current_index(), 5);
}

#[test]
fn test_resize_within_tier_remeasures_only() {
    let mut engine = medium_engine();
    engine.dispatch(CarouselInput::Click { slot: 6 });
    complete_translation(&mut engine);
    assert_eq!(engine.current_index(), 6);

    let effects = engine.dispatch(CarouselInput::Resize {
        viewport_width: 1100.0,
        container_width: 990.0,
    });
    assert_eq!(engine.item_width(), 330.0);
    assert_eq!(engine.current_index(), 6);
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::Sizing { item_width_px } if *item_width_px == 330.0)));
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::Rebuilt { .. })));
}

#[test]
fn test_resize_across_breakpoint_rebuilds_and_preserves_item() {
    let mut engine = medium_engine();
    engine.dispatch(CarouselInput::Click { slot: 6 });
    complete_translation(&mut engine);
    let source = engine.sequence().source_of(engine.current_index());
    assert_eq!(source, Some(2));

    let effects = engine.dispatch(CarouselInput::Resize {
        viewport_width: 1600.0,
        container_width: 1500.0,
    });

    // visible 5 -> clone_count 5, 15 slots, same content centered
    assert_eq!(engine.sequence().visible_count(), 5);
    assert_eq!(engine.sequence().len(), 15);
    assert_eq!(engine.current_index(), 7);
    assert_eq!(engine.sequence().source_of(7), Some(2));
    assert!(effects.iter().any(|e| matches!(
        e,
        Effect::Rebuilt {
            len: 15,
            visible_count: 5
        }
    )));
    assert_eq!(engine.nav_state(), NavState::Idle);
}

#[test]
fn test_resize_rebuild_cancels_hold_and_drag() {
    let mut engine = medium_engine();
    engine.dispatch(CarouselInput::StartHold {
        direction: Direction::Next,
    });
    complete_translation(&mut engine);

    let effects = engine.dispatch(CarouselInput::Resize {
        viewport_width: 500.0,
        container_width: 400.0,
    });
    assert!(effects.contains(&Effect::CancelHold));
    assert_eq!(engine.hold_direction(), None);
    assert!(!engine.drag_active());
    // visible 1 -> peek sizing: 400 - 2 * 32
    assert_eq!(engine.item_width(), 336.0);
}

#[test]
fn test_zero_width_moves_are_tolerated() {
    let mut engine =
        CarouselEngine::new(items(5), LoopviewConfig::default(), 1000.0, 0.0).unwrap();
    assert_eq!(engine.item_width(), 0.0);

    let effects = engine.dispatch(CarouselInput::KeyPress {
        direction: Direction::Next,
    });
    // The move happens; the transform is just a no-op until re-measured
    assert_eq!(engine.current_index(), 5);
    assert!(has_animated_track(&effects));

    engine.dispatch(CarouselInput::Resize {
        viewport_width: 1000.0,
        container_width: 900.0,
    });
    assert_eq!(engine.item_width(), 300.0);
}

#[test]
fn test_empty_item_list_renders_nothing() {
    let result = CarouselEngine::new(Vec::new(), LoopviewConfig::default(), 1000.0, 900.0);
    assert!(result.is_err());
}

#[test]
fn test_bootstrap_effects_describe_initial_render() {
    let engine = medium_engine();
    let effects = engine.bootstrap();
    assert!(effects.iter().any(|e| matches!(
        e,
        Effect::Rebuilt {
            len: 13,
            visible_count: 3
        }
    )));
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::Sizing { item_width_px } if *item_width_px == 300.0)));
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::Track { animate: false, .. })));
}
