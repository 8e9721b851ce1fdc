//! Property tests for the quantified guarantees of the move library.

mod common;

use common::{new_state, RollDice};
use proptest::prelude::*;
use rust_moves::config::{
    expected_next, progression_matches, with_game_stack, with_player_stack, with_target_count,
    ProgressionGroup,
};
use rust_moves::core::{IllegalMove, MoveError, PlayerIndex};
use rust_moves::moves::{
    name_from_type, ConditionMetter, Counter, DealCountComponents, Move, NoOp,
    RoundRobinProperties, SeatPlayer, Seater,
};
use rust_moves::rules::{AutoConfigurer, MoveRegistry};

fn word() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,6}"
}

fn step() -> impl Strategy<Value = ProgressionGroup> {
    let name = prop_oneof![Just("A"), Just("B"), Just("C"), Just("D")];
    let leaf = name.prop_map(ProgressionGroup::from);
    leaf.prop_recursive(2, 8, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|group| ProgressionGroup::optional(group)),
            prop::collection::vec(inner.clone(), 1..3)
                .prop_map(|groups| ProgressionGroup::parallel(groups)),
            prop::collection::vec(inner, 1..3).prop_map(|groups| ProgressionGroup::serial(groups)),
        ]
    })
}

fn history() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop_oneof![Just("A"), Just("B"), Just("C"), Just("D")], 0..6)
}

proptest! {
    #[test]
    fn prop_name_from_type_splits_words(words in prop::collection::vec(word(), 1..5)) {
        prop_assume!(words[0] != "Move");
        let type_name = words.concat();
        let expected = words.join(" ");

        prop_assert_eq!(name_from_type(&type_name), expected.clone());
        prop_assert_eq!(name_from_type(&format!("Move{}", type_name)), expected.clone());
        prop_assert_eq!(name_from_type(&format!("my_game::moves::{}", type_name)), expected);
    }

    #[test]
    fn prop_progression_match_is_pure(
        pattern in prop::collection::vec(step(), 1..4),
        tape in history(),
        repeating in prop::collection::vec(any::<bool>(), 4),
    ) {
        let repeats = |name: &str| match name {
            "A" => repeating[0],
            "B" => repeating[1],
            "C" => repeating[2],
            _ => repeating[3],
        };

        let first = progression_matches(&pattern, &tape, repeats);
        let second = progression_matches(&pattern, &tape, repeats);
        prop_assert_eq!(first, second);
        prop_assert_eq!(
            expected_next(&pattern, &tape, repeats),
            expected_next(&pattern, &tape, repeats)
        );
        // Every prefix of a matching tape matches too.
        if first && !tape.is_empty() {
            prop_assert!(progression_matches(&pattern, &tape[..tape.len() - 1], repeats));
        }
    }

    #[test]
    fn prop_count_times_counts_consecutive_applications(
        target in 0i64..6,
        interrupt in any::<bool>(),
    ) {
        let mut state = new_state(2, 0);
        let configurer = AutoConfigurer::new(&state);
        let registry = MoveRegistry::from_configs(vec![
            configurer.must_config(RollDice::default(), vec![with_target_count(target)]),
            configurer.must_config(NoOp::default(), vec![]),
        ])
        .unwrap();
        let name = format!("Apply {} Times", target);
        let mut roll = RollDice::default();
        roll.set_info(registry.get(&name).unwrap().info().clone());

        if interrupt && target > 0 {
            registry.propose(&mut state, &name, PlayerIndex::ADMIN).unwrap();
            registry.propose(&mut state, "No Op", PlayerIndex::ADMIN).unwrap();
            prop_assert_eq!(roll.count(&state), Ok(0));
        }

        for k in 0..=target {
            prop_assert_eq!(roll.count(&state), Ok(k));
            prop_assert_eq!(roll.condition_met(&state), Ok(k == target));
            if k < target {
                registry.propose(&mut state, &name, PlayerIndex::ADMIN).unwrap();
            }
        }
        prop_assert_eq!(
            registry.propose(&mut state, &name, PlayerIndex::ADMIN),
            Err(MoveError::Illegal(IllegalMove::ConditionAlreadyMet))
        );
    }

    #[test]
    fn prop_round_robin_wraps_to_starter(
        (player_count, starter) in (1usize..7).prop_flat_map(|n| (Just(n), 0..n as i32)),
    ) {
        let mut state = new_state(player_count, 20).with_current_player(PlayerIndex::new(starter));
        let registry = MoveRegistry::from_configs(vec![AutoConfigurer::new(&state).must_config(
            DealCountComponents::default(),
            vec![with_game_stack("Draw"), with_player_stack("Hand"), with_target_count(1)],
        )])
        .unwrap();

        prop_assert_eq!(registry.apply_fix_ups(&mut state, 100), Ok(player_count));
        prop_assert_eq!(state.game().round_robin_last_player(), PlayerIndex::new(starter));
        prop_assert_eq!(state.game().round_robin_round_count(), 1);
    }

    #[test]
    fn prop_seat_player_is_admin_only(
        proposer in any::<i32>().prop_filter("not the admin", |p| *p != PlayerIndex::ADMIN.0),
        seats in prop::collection::vec((any::<bool>(), any::<bool>()), 1..6),
    ) {
        let mut state = new_state(seats.len(), 0);
        for (i, &(filled, closed)) in seats.iter().enumerate() {
            let player = state.player_mut(PlayerIndex::new(i as i32)).unwrap();
            if filled {
                player.set_seat_filled();
            }
            if closed {
                player.set_seat_closed();
            }
        }
        let registry = MoveRegistry::from_configs(vec![
            AutoConfigurer::new(&state).must_config(SeatPlayer::default(), vec![])
        ])
        .unwrap();

        let proposer = PlayerIndex::new(proposer);
        let m: Box<dyn Move<_, _>> = registry.new_move(&state, "Seat Player").unwrap();
        prop_assert_eq!(
            m.legal(&state, proposer),
            Err(MoveError::Illegal(IllegalMove::NotAdmin(proposer)))
        );
        prop_assert_eq!(
            registry.propose(&mut state, "Seat Player", proposer),
            Err(MoveError::Illegal(IllegalMove::NotAdmin(proposer)))
        );
        prop_assert_eq!(state.version(), 0);
    }
}
