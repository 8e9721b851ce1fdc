//! Registry behaviour across move families: naming, fix-up sweeps, turn
//! passing, seating, dealing and collecting.

mod common;

use std::collections::HashSet;

use common::{init_logging, new_state, AwardPoint, EndMyTurn, TestState};
use rust_moves::components::{SlotPosition, StackRef};
use rust_moves::config::{
    with_amount, with_destination_stack, with_game_property, with_game_stack, with_legal_phases,
    with_move_name_suffix, with_num_rounds, with_phase_to_start, with_player_stack,
    with_source_stack, with_target_count,
};
use rust_moves::core::{ConfigurationError, IllegalMove, MoveError, PhaseId, PlayerIndex};
use rust_moves::moves::{
    ActivateInactivePlayer, CloseEmptySeat, CollectAllComponents, CollectCountComponents,
    DealAllComponents, DealComponentsUntilPlayerCountReached, DealCountComponents, FinishTurn,
    Increment, MoveAllComponents, MoveCountComponents, NoOp, RoundRobinProperties, SeatPlayer,
    Seater, ShuffleStack, StartPhase,
};
use rust_moves::rules::{AutoConfigurer, MoveConfig, MoveRegistry};

type Config = MoveConfig<common::TestGame, common::TestPlayer>;

fn hand_size(state: &TestState, player: i32) -> usize {
    state
        .stack(&StackRef::player(PlayerIndex::new(player), "Hand"))
        .unwrap()
        .num_components()
}

fn draw_size(state: &TestState) -> usize {
    state.stack(&StackRef::game("Draw")).unwrap().num_components()
}

fn full_game(state: &TestState) -> Vec<Config> {
    let configurer = AutoConfigurer::new(state);
    vec![
        configurer.must_config(ShuffleStack::default(), vec![with_source_stack("Draw")]),
        configurer.must_config(
            MoveCountComponents::default(),
            vec![
                with_source_stack("Draw"),
                with_destination_stack("Discard"),
                with_target_count(1),
            ],
        ),
        configurer.must_config(
            MoveAllComponents::default(),
            vec![with_source_stack("Discard"), with_destination_stack("Draw")],
        ),
        configurer.must_config(
            DealCountComponents::default(),
            vec![
                with_game_stack("Draw"),
                with_player_stack("Hand"),
                with_target_count(2),
            ],
        ),
        configurer.must_config(
            DealAllComponents::default(),
            vec![with_game_stack("Draw"), with_player_stack("Hand")],
        ),
        configurer.must_config(
            CollectAllComponents::default(),
            vec![with_game_stack("Discard"), with_player_stack("Hand")],
        ),
        configurer.must_config(FinishTurn::default(), vec![]),
        configurer.must_config(
            StartPhase::default(),
            vec![with_phase_to_start(PhaseId::new(1))],
        ),
        configurer.must_config(
            Increment::default(),
            vec![with_game_property("Round"), with_amount(2)],
        ),
        configurer.must_config(NoOp::default(), vec![]),
        configurer.must_config(SeatPlayer::default(), vec![]),
        configurer.must_config(CloseEmptySeat::default(), vec![]),
        configurer.must_config(ActivateInactivePlayer::default(), vec![]),
        configurer.must_config(EndMyTurn::default(), vec![]),
    ]
}

/// Every configured move gets a distinct, non-empty name.
#[test]
fn test_names_are_unique_and_non_empty() {
    let state = new_state(3, 10);
    let registry = MoveRegistry::from_configs(full_game(&state)).unwrap();

    let names: Vec<&str> = registry.names().collect();
    assert_eq!(names.len(), 14);
    assert!(names.iter().all(|name| !name.is_empty()));
    assert_eq!(names.iter().collect::<HashSet<_>>().len(), names.len());
    assert!(names.contains(&"Deal 2 Components From Draw To Each Hand"));
    assert!(names.contains(&"Start Phase 1"));
    assert!(names.contains(&"End My Turn"));
    assert_eq!(registry.catalogue().len(), 14);
}

/// Installing a move type twice fails unless a suffix tells them apart.
#[test]
fn test_duplicate_names_are_rejected() {
    let state = new_state(3, 10);
    let mut registry = MoveRegistry::from_configs(full_game(&state)).unwrap();
    let configurer = AutoConfigurer::new(&state);

    assert_eq!(
        registry.install(configurer.must_config(NoOp::default(), vec![])),
        Err(ConfigurationError::DuplicateName("No Op".to_string()))
    );
    registry
        .install(configurer.must_config(NoOp::default(), vec![with_move_name_suffix("Again")]))
        .unwrap();
    assert!(registry.get("No Op - Again").is_some());
}

/// Dealing two rounds to three players, then collecting everything back.
#[test]
fn test_deal_and_collect() {
    init_logging();
    let mut state = new_state(3, 10);
    let configurer = AutoConfigurer::new(&state);
    let registry = MoveRegistry::from_configs(vec![
        configurer.must_config(
            DealCountComponents::default(),
            vec![
                with_game_stack("Draw"),
                with_player_stack("Hand"),
                with_target_count(2),
                with_legal_phases([PhaseId::new(0)]),
            ],
        ),
        configurer.must_config(
            CollectCountComponents::default(),
            vec![
                with_game_stack("Discard"),
                with_player_stack("Hand"),
                with_target_count(1),
                with_legal_phases([PhaseId::new(1)]),
            ],
        ),
    ])
    .unwrap();

    assert_eq!(registry.apply_fix_ups(&mut state, 100), Ok(6));
    assert_eq!((0..3).map(|p| hand_size(&state, p)).collect::<Vec<_>>(), vec![2, 2, 2]);
    assert_eq!(draw_size(&state), 4);

    state.set_phase(PhaseId::new(1));
    assert_eq!(registry.apply_fix_ups(&mut state, 100), Ok(3));
    assert_eq!((0..3).map(|p| hand_size(&state, p)).collect::<Vec<_>>(), vec![1, 1, 1]);
    assert_eq!(
        state.stack(&StackRef::game("Discard")).unwrap().num_components(),
        3
    );
}

/// Dealing stops once every hand holds the target, skipping full hands.
#[test]
fn test_deal_until_player_count_reached() {
    let mut state = new_state(3, 10);
    state
        .stack_mut(&StackRef::player(PlayerIndex::new(1), "Hand"))
        .unwrap()
        .insert(common::cards(11)[10], SlotPosition::Last)
        .unwrap();
    let registry = MoveRegistry::from_configs(vec![AutoConfigurer::new(&state).must_config(
        DealComponentsUntilPlayerCountReached::default(),
        vec![
            with_game_stack("Draw"),
            with_player_stack("Hand"),
            with_target_count(2),
        ],
    )])
    .unwrap();

    assert_eq!(registry.apply_fix_ups(&mut state, 100), Ok(5));
    assert_eq!((0..3).map(|p| hand_size(&state, p)).collect::<Vec<_>>(), vec![2, 2, 2]);
    assert_eq!(draw_size(&state), 5);
}

/// A one-round deal started from player `s` ends on `s` after one round.
#[test]
fn test_round_robin_wraps_to_starter() {
    let mut state = new_state(4, 10).with_current_player(PlayerIndex::new(2));
    let registry = MoveRegistry::from_configs(vec![AutoConfigurer::new(&state).must_config(
        DealCountComponents::default(),
        vec![
            with_game_stack("Draw"),
            with_player_stack("Hand"),
            with_target_count(1),
        ],
    )])
    .unwrap();

    assert_eq!(registry.apply_fix_ups(&mut state, 100), Ok(4));

    let game = state.game();
    assert_eq!(game.round_robin_last_player(), PlayerIndex::new(2));
    assert_eq!(game.round_robin_starter_player(), PlayerIndex::new(2));
    assert_eq!(game.round_robin_round_count(), 1);
    // The player after the starter is dealt first.
    let first = state
        .stack(&StackRef::player(PlayerIndex::new(3), "Hand"))
        .unwrap()
        .first_component();
    assert_eq!(first.map(|id| id.index), Some(0));
}

fn scores(state: &TestState) -> Vec<i64> {
    state
        .players()
        .iter()
        .map(|(_, p)| p.properties.int("Score").unwrap())
        .collect()
}

/// A game-defined round robin runs for the configured number of rounds.
#[test]
fn test_round_robin_runs_num_rounds() {
    init_logging();
    let mut state = new_state(3, 0);
    let registry = MoveRegistry::from_configs(vec![AutoConfigurer::new(&state)
        .must_config(AwardPoint::default(), vec![with_num_rounds(2)])])
    .unwrap();

    assert_eq!(registry.apply_fix_ups(&mut state, 100), Ok(6));
    assert_eq!(scores(&state), vec![2, 2, 2]);
    assert_eq!(state.game().round_robin_round_count(), 2);
    assert_eq!(
        registry.propose(&mut state, "Award Point", PlayerIndex::ADMIN),
        Err(MoveError::Illegal(IllegalMove::ConditionAlreadyMet))
    );
}

/// Without `NumRounds` a round robin stops after one round.
#[test]
fn test_round_robin_defaults_to_one_round() {
    let mut state = new_state(4, 0).with_current_player(PlayerIndex::new(1));
    let registry = MoveRegistry::from_configs(vec![
        AutoConfigurer::new(&state).must_config(AwardPoint::default(), vec![])
    ])
    .unwrap();

    assert_eq!(registry.apply_fix_ups(&mut state, 100), Ok(4));
    assert_eq!(scores(&state), vec![1, 1, 1, 1]);
    assert_eq!(state.game().round_robin_round_count(), 1);
    assert_eq!(state.game().round_robin_last_player(), PlayerIndex::new(1));
}

/// A player ends their turn, and the fix-up sweep passes it on.
#[test]
fn test_turn_cycle() {
    init_logging();
    let mut state = new_state(3, 0);
    let configurer = AutoConfigurer::new(&state);
    let registry = MoveRegistry::from_configs(vec![
        configurer.must_config(EndMyTurn::default(), vec![]),
        configurer.must_config(FinishTurn::default(), vec![]),
    ])
    .unwrap();

    assert_eq!(
        registry.legal_moves(&state, PlayerIndex::new(0)),
        vec!["End My Turn"]
    );
    assert_eq!(
        registry.propose(&mut state, "End My Turn", PlayerIndex::new(1)),
        Err(MoveError::Illegal(IllegalMove::NotYourTurn(PlayerIndex::new(1))))
    );

    for turn in 0..4 {
        let current = state.current_player();
        registry.propose(&mut state, "End My Turn", current).unwrap();
        assert_eq!(registry.apply_fix_ups(&mut state, 10), Ok(1), "turn {}", turn);
    }

    assert_eq!(state.current_player(), PlayerIndex::new(1));
    assert_eq!(state.player(PlayerIndex::new(0)).unwrap().turn_ends, 2);
    assert_eq!(state.player(PlayerIndex::new(1)).unwrap().turn_starts, 2);
}

/// The admin seats a player; fix-ups activate them and close the rest.
#[test]
fn test_seating_flow() {
    init_logging();
    let mut state = new_state(3, 0);
    let configurer = AutoConfigurer::new(&state);
    let registry = MoveRegistry::from_configs(vec![
        configurer.must_config(SeatPlayer::default(), vec![]),
        configurer.must_config(ActivateInactivePlayer::default(), vec![]),
        configurer.must_config(CloseEmptySeat::default(), vec![]),
    ])
    .unwrap();

    for proposer in [PlayerIndex::new(0), PlayerIndex::new(2), PlayerIndex::OBSERVER] {
        assert_eq!(
            registry.propose(&mut state, "Seat Player", proposer),
            Err(MoveError::Illegal(IllegalMove::NotAdmin(proposer)))
        );
    }

    registry
        .propose(&mut state, "Seat Player", PlayerIndex::ADMIN)
        .unwrap();
    let seated = state.player(PlayerIndex::new(0)).unwrap();
    assert!(seated.seat_is_filled());
    assert!(!seated.active);

    assert_eq!(registry.apply_fix_ups(&mut state, 10), Ok(3));
    assert!(state.player(PlayerIndex::new(0)).unwrap().active);
    assert!(state.player(PlayerIndex::new(1)).unwrap().seat_is_closed());
    assert!(state.player(PlayerIndex::new(2)).unwrap().seat_is_closed());

    assert_eq!(
        registry.propose(&mut state, "Seat Player", PlayerIndex::ADMIN),
        Err(MoveError::Illegal(IllegalMove::NoEligiblePlayer))
    );
}
