use callbreak_backend::domain::progression::RoundOutcome;
use callbreak_backend::domain::scoring::{Points, TiePolicy};
use callbreak_backend::domain::state::GameStatus;
use callbreak_backend::AppError;

use crate::support::build_test_state_with;
use crate::support::factory::{create_game, play};

#[tokio::test]
async fn first_seat_breaks_final_round_tie() -> Result<(), AppError> {
    let state = build_test_state_with(TiePolicy::FirstSeat).await?;
    let id = create_game(&state, &["A", "B", "C"], 2).await?.state.id;
    play(&state, id, 1, &[(2, 2), (3, 3), (1, 1)]).await?;

    let res = play(&state, id, 2, &[(3, 3), (2, 2), (1, 0)]).await?;

    assert_eq!(res.winner(), Some("A"));
    assert_eq!(
        res.outcome,
        RoundOutcome::FinalRound {
            winner_seat: Some(0),
            totals: vec![Points::whole(5), Points::whole(5), Points::whole(0)],
        }
    );
    Ok(())
}

#[tokio::test]
async fn draw_policy_completes_without_winner() -> Result<(), AppError> {
    let state = build_test_state_with(TiePolicy::Draw).await?;
    let id = create_game(&state, &["A", "B", "C"], 2).await?.state.id;
    play(&state, id, 1, &[(2, 2), (3, 3), (1, 1)]).await?;

    let res = play(&state, id, 2, &[(3, 3), (2, 2), (1, 0)]).await?;

    assert_eq!(res.game.state.status, GameStatus::Completed);
    assert_eq!(res.winner(), None);
    Ok(())
}

#[tokio::test]
async fn draw_policy_still_names_a_clear_leader() -> Result<(), AppError> {
    let state = build_test_state_with(TiePolicy::Draw).await?;
    let id = create_game(&state, &["A", "B"], 2).await?.state.id;
    play(&state, id, 1, &[(2, 2), (3, 3)]).await?;

    let res = play(&state, id, 2, &[(1, 1), (2, 3)]).await?;

    assert_eq!(res.winner(), Some("B"));
    Ok(())
}
