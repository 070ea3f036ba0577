use truthguard_core::{update, AppState, Msg};

#[test]
fn noop_leaves_state_unchanged() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn consume_dirty_resets_the_flag() {
    let state = AppState::new();
    let (mut state, _effects) = update(state, Msg::InputChanged("climate".to_string()));

    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}
