use shared::domain::{PlayerSnapshot, Scorecard, TurnData};

use super::*;

fn snapshot(current: PlayerId, first_scores: Scorecard) -> GameSnapshot {
    GameSnapshot {
        current_player: current,
        players: [
            PlayerSnapshot {
                name: "Player1".into(),
                scores: first_scores,
                turn_data: TurnData::default(),
            },
            PlayerSnapshot {
                name: "Player2".into(),
                scores: Scorecard::default(),
                turn_data: TurnData::default(),
            },
        ],
        round: 1,
        game_over: false,
    }
}

fn dice(faces: [u8; 5]) -> DiceSet {
    DiceSet::new(faces).expect("dice")
}

/// First player, game started, opening roll of `faces` with `rolls_left`.
fn rolled(faces: [u8; 5], rolls_left: u8) -> ClientState {
    let mut state = ClientState::new();
    state.apply_event(&ServerEvent::PlayerId {
        id: PlayerId::FIRST,
    });
    state.apply_event(&ServerEvent::GameStart(snapshot(
        PlayerId::FIRST,
        Scorecard::default(),
    )));
    state.apply_event(&ServerEvent::DiceResult {
        dice: dice(faces),
        player: PlayerId::FIRST,
        rolls_left,
    });
    state
}

#[test]
fn game_start_prompts_only_the_current_player() {
    let start = ServerEvent::GameStart(snapshot(PlayerId::FIRST, Scorecard::default()));

    let mut first = ClientState::new();
    first.apply_event(&ServerEvent::PlayerId {
        id: PlayerId::FIRST,
    });
    assert_eq!(first.apply_event(&start), InputState::Roll);

    let mut second = ClientState::new();
    second.apply_event(&ServerEvent::PlayerId {
        id: PlayerId::SECOND,
    });
    assert_eq!(second.apply_event(&start), InputState::Waiting);
    assert!(!second.is_my_turn());
}

#[test]
fn roll_prompt_accepts_r_in_any_case() {
    let mut state = ClientState::new();
    state.apply_event(&ServerEvent::PlayerId {
        id: PlayerId::FIRST,
    });
    state.apply_event(&ServerEvent::GameStart(snapshot(
        PlayerId::FIRST,
        Scorecard::default(),
    )));

    assert!(matches!(state.handle_input("x"), InputOutcome::Invalid(_)));
    assert_eq!(state.input(), InputState::Roll);
    assert_eq!(
        state.handle_input(" R "),
        InputOutcome::Send(ClientRequest::RollDice { reroll: None })
    );
    assert_eq!(state.input(), InputState::Waiting);
    assert_eq!(state.handle_input("r"), InputOutcome::Ignored);
}

#[test]
fn own_dice_result_moves_to_reroll_then_category() {
    let state = rolled([1, 2, 3, 4, 5], 2);
    assert_eq!(state.input(), InputState::Reroll);
    assert_eq!(state.dice(), Some(dice([1, 2, 3, 4, 5])));
    assert_eq!(state.rolls_left(), 2);

    let state = rolled([1, 2, 3, 4, 5], 0);
    assert_eq!(state.input(), InputState::Category);
}

#[test]
fn other_players_dice_do_not_change_input() {
    let mut state = ClientState::new();
    state.apply_event(&ServerEvent::PlayerId {
        id: PlayerId::SECOND,
    });
    state.apply_event(&ServerEvent::GameStart(snapshot(
        PlayerId::FIRST,
        Scorecard::default(),
    )));
    let input = state.apply_event(&ServerEvent::DiceResult {
        dice: dice([6; 5]),
        player: PlayerId::FIRST,
        rolls_left: 2,
    });
    assert_eq!(input, InputState::Waiting);
    assert_eq!(state.dice(), None);
}

#[test]
fn reroll_numbers_are_one_based_on_input() {
    let mut state = rolled([1, 1, 2, 2, 3], 2);
    assert_eq!(
        state.handle_input("1, 3,5"),
        InputOutcome::Send(ClientRequest::RollDice {
            reroll: Some(vec![0, 2, 4])
        })
    );
    assert_eq!(state.input(), InputState::Waiting);
}

#[test]
fn bad_reroll_input_reprompts() {
    for bad in ["0", "6", "1,,2", "two", "1;2"] {
        let mut state = rolled([1, 1, 2, 2, 3], 1);
        assert!(
            matches!(state.handle_input(bad), InputOutcome::Invalid(_)),
            "{bad:?} should be rejected"
        );
        assert_eq!(state.input(), InputState::Reroll);
    }
}

#[test]
fn empty_reroll_switches_to_category_choice() {
    let mut state = rolled([3, 3, 3, 2, 2], 2);
    assert_eq!(state.handle_input(""), InputOutcome::ChooseCategory);
    assert_eq!(state.input(), InputState::Category);
}

#[test]
fn category_options_preview_scores_for_open_categories() {
    let mut taken = Scorecard::default();
    taken.record(Category::Ones, 3).expect("record");
    let mut state = ClientState::new();
    state.apply_event(&ServerEvent::PlayerId {
        id: PlayerId::FIRST,
    });
    state.apply_event(&ServerEvent::GameStart(snapshot(PlayerId::FIRST, taken)));
    state.apply_event(&ServerEvent::DiceResult {
        dice: dice([3, 3, 3, 2, 2]),
        player: PlayerId::FIRST,
        rolls_left: 0,
    });

    let options = state.category_options();
    assert_eq!(options.len(), 12);
    assert_eq!(options[0], (Category::Twos, 4));
    assert!(options.contains(&(Category::FullHouse, 25)));
    assert!(options.contains(&(Category::ThreeOfAKind, 13)));
    assert!(!options.iter().any(|(c, _)| *c == Category::Ones));

    // Option 1 is twos because ones is already recorded.
    assert_eq!(
        state.handle_input("1"),
        InputOutcome::Send(ClientRequest::SelectCategory {
            category: Category::Twos
        })
    );
}

#[test]
fn category_index_out_of_range_reprompts() {
    let mut state = rolled([1, 2, 3, 4, 5], 0);
    for bad in ["0", "14", "chance", ""] {
        assert!(matches!(state.handle_input(bad), InputOutcome::Invalid(_)));
        assert_eq!(state.input(), InputState::Category);
    }
    assert_eq!(
        state.handle_input("13"),
        InputOutcome::Send(ClientRequest::SelectCategory {
            category: Category::ALL[12]
        })
    );
}

#[test]
fn turn_end_hands_the_prompt_to_the_next_player() {
    let mut state = rolled([2; 5], 0);
    let mut first_card = Scorecard::default();
    first_card.record(Category::Twos, 10).expect("record");

    let input = state.apply_event(&ServerEvent::TurnEnd {
        category: Category::Twos,
        score: 10,
        player: PlayerId::FIRST,
        game_state: snapshot(PlayerId::SECOND, first_card),
    });
    assert_eq!(input, InputState::Waiting);
    assert_eq!(state.dice(), None);
    assert_eq!(state.category_options().len(), 12);
}

#[test]
fn game_end_finishes_and_ignores_input() {
    let mut state = rolled([2; 5], 1);
    let input = state.apply_event(&ServerEvent::GameEnd {
        winner: PlayerId::SECOND,
        scores: [120, 120],
    });
    assert_eq!(input, InputState::Finished);
    assert_eq!(
        state.result(),
        Some(&GameResult {
            winner: PlayerId::SECOND,
            scores: [120, 120]
        })
    );
    assert_eq!(state.handle_input("1"), InputOutcome::Ignored);
}

#[test]
fn parse_die_numbers_handles_spacing() {
    assert_eq!(parse_die_numbers(" 5 ,4"), Some(vec![4, 3]));
    assert_eq!(parse_die_numbers("2"), Some(vec![1]));
    assert_eq!(parse_die_numbers("1,9"), None);
}
