use crate::domain::progression::{submit_round, RoundOutcome};
use crate::domain::scoring::{Points, TiePolicy};
use crate::domain::state::{EntrySubmission, GameStatus, Round, RoundSubmission};
use crate::domain::test_prelude::{game, submission};
use crate::errors::domain::{DomainError, ValidationKind};

/// Feed rounds through the engine, returning the final state and history.
fn play(
    players: &[&str],
    total_rounds: u8,
    rounds: &[&[(u8, u8)]],
    policy: TiePolicy,
) -> (crate::domain::state::GameState, Vec<Round>) {
    let mut state = game(players, total_rounds);
    let mut history = Vec::new();
    for (i, pairs) in rounds.iter().enumerate() {
        let res = submit_round(&state, &history, &submission(i as u32 + 1, pairs), policy)
            .expect("round accepted");
        history.push(res.round);
        state = res.next;
    }
    (state, history)
}

#[test]
fn non_final_round_advances() {
    let state = game(&["A", "B", "C"], 3);
    let res = submit_round(&state, &[], &submission(1, &[(2, 2), (3, 1), (4, 5)]), TiePolicy::default())
        .unwrap();

    assert_eq!(res.next.current_round, 2);
    assert_eq!(res.next.status, GameStatus::Active);
    assert_eq!(res.winner(), None);
    assert_eq!(res.outcome, RoundOutcome::Advanced { next_round: 2 });
    let points: Vec<Points> = res.round.entries.iter().map(|e| e.points).collect();
    assert_eq!(
        points,
        vec![Points::whole(2), Points::whole(-3), Points::from_tenths(41)]
    );
}

#[test]
fn instant_win_beats_final_round_scoring() {
    let (state, history) = play(
        &["A", "B"],
        2,
        &[&[(5, 5), (3, 5)], &[(8, 9), (2, 2)]],
        TiePolicy::FirstSeat,
    );
    assert_eq!(history[0].entries[1].points, Points::from_tenths(32));
    assert_eq!(state.status, GameStatus::Completed);
    assert_eq!(state.winner.as_deref(), Some("A"));
    assert_eq!(state.current_round, 2);
}

#[test]
fn instant_win_reports_outcome_and_keeps_round_counter() {
    let state = game(&["A", "B", "C"], 5);
    let res = submit_round(
        &state,
        &[],
        &submission(1, &[(2, 0), (8, 8), (3, 3)]),
        TiePolicy::FirstSeat,
    )
    .unwrap();
    assert_eq!(res.outcome, RoundOutcome::InstantWin { seat: 1 });
    assert_eq!(res.winner(), Some("B"));
    assert_eq!(res.next.current_round, 1);
}

#[test]
fn first_seat_keeps_instant_win_when_several_qualify() {
    let state = game(&["A", "B", "C"], 5);
    let res = submit_round(
        &state,
        &[],
        &submission(1, &[(1, 0), (8, 8), (8, 10)]),
        TiePolicy::FirstSeat,
    )
    .unwrap();
    assert_eq!(res.winner(), Some("B"));
}

#[test]
fn final_round_picks_strict_max() {
    let (state, _) = play(
        &["A", "B"],
        2,
        &[&[(3, 3), (4, 2)], &[(2, 1), (5, 6)]],
        TiePolicy::FirstSeat,
    );
    assert_eq!(state.status, GameStatus::Completed);
    assert_eq!(state.winner.as_deref(), Some("B"));
}

#[test]
fn final_round_tie_goes_to_lower_seat() {
    let (state, _) = play(
        &["A", "B"],
        2,
        &[&[(3, 3), (2, 2)], &[(2, 2), (3, 3)]],
        TiePolicy::FirstSeat,
    );
    assert_eq!(state.winner.as_deref(), Some("A"));
}

#[test]
fn final_round_tie_under_draw_policy_has_no_winner() {
    let mut state = game(&["A", "B"], 2);
    let first = submit_round(&state, &[], &submission(1, &[(3, 3), (2, 2)]), TiePolicy::Draw)
        .unwrap();
    state = first.next;
    let last = submit_round(
        &state,
        &[first.round],
        &submission(2, &[(2, 2), (3, 3)]),
        TiePolicy::Draw,
    )
    .unwrap();

    assert_eq!(last.next.status, GameStatus::Completed);
    assert_eq!(last.winner(), None);
    assert_eq!(
        last.outcome,
        RoundOutcome::FinalRound {
            winner_seat: None,
            totals: vec![Points::whole(5), Points::whole(5)],
        }
    );
}

#[test]
fn completed_game_rejects_rounds() {
    let (state, history) = play(&["A", "B"], 2, &[&[(1, 1), (1, 0)], &[(1, 1), (1, 1)]], TiePolicy::FirstSeat);
    assert!(state.is_completed());

    let err = submit_round(&state, &history, &submission(2, &[(1, 1), (1, 1)]), TiePolicy::FirstSeat)
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidState, _)
    ));
}

#[test]
fn state_is_checked_before_sequence_and_count() {
    let mut state = game(&["A", "B"], 3);
    state.status = GameStatus::Completed;
    state.winner = Some("A".into());
    // Wrong round number and wrong entry count still report the state first.
    let err = submit_round(&state, &[], &submission(7, &[(1, 1)]), TiePolicy::FirstSeat)
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidState, _)
    ));
}

#[test]
fn out_of_sequence_round_rejected() {
    let state = game(&["A", "B"], 3);
    for n in [0, 2, 3] {
        let err = submit_round(&state, &[], &submission(n, &[(1, 1), (1, 1)]), TiePolicy::FirstSeat)
            .unwrap_err();
        match err {
            DomainError::Validation(ValidationKind::SequenceMismatch, detail) => {
                assert_eq!(detail, format!("Expected round 1, got {n}"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

#[test]
fn sequence_checked_before_player_count() {
    let state = game(&["A", "B"], 3);
    let err = submit_round(&state, &[], &submission(2, &[(1, 1)]), TiePolicy::FirstSeat)
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::SequenceMismatch, _)
    ));
}

#[test]
fn entry_count_must_match_players() {
    let state = game(&["A", "B", "C"], 3);
    let err = submit_round(&state, &[], &submission(1, &[(1, 1), (2, 2)]), TiePolicy::FirstSeat)
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::PlayerCountMismatch, _)
    ));
}

#[test]
fn claimed_points_are_recomputed_and_reported() {
    let state = game(&["A", "B"], 3);
    let sub = RoundSubmission {
        round_number: 1,
        entries: vec![
            EntrySubmission {
                bid: 4,
                actual: 4,
                claimed_points: Some(40.0),
            },
            EntrySubmission {
                bid: 3,
                actual: 5,
                claimed_points: Some(3.2),
            },
        ],
    };
    let res = submit_round(&state, &[], &sub, TiePolicy::FirstSeat).unwrap();
    assert_eq!(res.round.entries[0].points, Points::whole(4));
    assert_eq!(res.round.entries[1].points, Points::from_tenths(32));
    assert_eq!(res.overridden_claims, vec![0]);
}

#[test]
fn rejected_submission_leaves_state_untouched() {
    let state = game(&["A", "B"], 3);
    let before = state.clone();
    let _ = submit_round(&state, &[], &submission(2, &[(1, 1), (1, 1)]), TiePolicy::FirstSeat);
    assert_eq!(state, before);
}
