use cppp::{
    GraphPrimitives, Matrix, PhylogenyError, State, build_initial_state, realize_character,
    safety::{check_state, run_strict_checks, validate_counts, validate_edges},
};

fn sample_state() -> State {
    let m = Matrix::from_rows(vec![vec![1, 0], vec![1, 1], vec![0, 1]]).expect("matrix");
    build_initial_state(&m).expect("state")
}

#[test]
fn report_for_clean_state_has_no_issues() {
    let report = check_state(&sample_state());
    assert_eq!(report.num_species, 3);
    assert_eq!(report.num_characters, 2);
    assert!(!report.has_issues());
}

#[test]
fn species_count_mismatch_detected() {
    let mut state = sample_state();
    state.num_species = 2;
    let report = validate_counts(&state);
    assert_eq!(report.species_count_mismatch, 1);
    assert!(report.has_issues());
}

#[test]
fn removed_character_left_active_detected() {
    let mut state = sample_state();
    state.character_state[1] = cppp::CharacterState::Removed;
    let report = validate_counts(&state);
    assert_eq!(report.removed_count_mismatch, 1);
    assert_eq!(report.activity_state_disagreements, 1);
}

#[test]
fn edge_on_inactive_species_detected() {
    let mut state = sample_state();
    state.species_active[2] = false;
    state.num_species = 2;
    let report = validate_edges(&state);
    assert_eq!(report.edges_on_inactive_vertices, 1);
    assert!(validate_counts(&state).species_count_mismatch == 0);
}

#[test]
fn universe_mismatch_detected_without_panicking() {
    let mut state = sample_state();
    state.character_active.pop();
    let report = check_state(&state);
    assert_eq!(report.universe_mismatches, 1);
}

#[test]
fn strict_check_reports_operation() {
    let mut state = sample_state();
    state.num_characters = 5;
    match run_strict_checks(&state, "unit") {
        Err(PhylogenyError::InvariantViolation { operation, report }) => {
            assert_eq!(operation, "unit");
            assert_eq!(report.character_count_mismatch, 1);
        }
        other => panic!("expected invariant violation, got {other:?}"),
    }
}

#[test]
fn realize_refuses_corrupted_source() {
    let mut state = sample_state();
    state.red_black_graph.delete_incident_edges(0).expect("delete");
    state.species_active[1] = false;
    let err = realize_character(&state, 0).unwrap_err();
    assert!(matches!(err, PhylogenyError::InvariantViolation { .. }));
    assert!(err.is_fatal());
}
