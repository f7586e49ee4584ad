use shared::{
    domain::{Category, DiceSet, GameSnapshot, PlayerId, DICE_COUNT},
    protocol::{ClientRequest, ServerEvent},
    scoring::score,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Waiting,
    Roll,
    Reroll,
    Category,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    Send(ClientRequest),
    ChooseCategory,
    Invalid(String),
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub winner: PlayerId,
    pub scores: [u32; 2],
}

#[derive(Debug, Clone)]
pub struct ClientState {
    player_id: Option<PlayerId>,
    snapshot: Option<GameSnapshot>,
    dice: Option<DiceSet>,
    rolls_left: u8,
    input: InputState,
    result: Option<GameResult>,
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientState {
    pub fn new() -> Self {
        Self {
            player_id: None,
            snapshot: None,
            dice: None,
            rolls_left: 0,
            input: InputState::Waiting,
            result: None,
        }
    }

    pub fn player_id(&self) -> Option<PlayerId> {
        self.player_id
    }

    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn dice(&self) -> Option<DiceSet> {
        self.dice
    }

    pub fn rolls_left(&self) -> u8 {
        self.rolls_left
    }

    pub fn input(&self) -> InputState {
        self.input
    }

    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    pub fn is_my_turn(&self) -> bool {
        match (&self.snapshot, self.player_id) {
            (Some(snapshot), Some(me)) => snapshot.current_player == me && !snapshot.game_over,
            _ => false,
        }
    }

    pub fn apply_event(&mut self, event: &ServerEvent) -> InputState {
        match event {
            ServerEvent::PlayerId { id } => self.player_id = Some(*id),
            ServerEvent::GameStart(snapshot) | ServerEvent::TurnEnd { game_state: snapshot, .. } => {
                self.snapshot = Some(snapshot.clone());
                self.dice = None;
                self.rolls_left = 0;
                self.input = if self.is_my_turn() {
                    InputState::Roll
                } else {
                    InputState::Waiting
                };
            }
            ServerEvent::DiceResult {
                dice,
                player,
                rolls_left,
            } => {
                if Some(*player) == self.player_id {
                    self.dice = Some(*dice);
                    self.rolls_left = *rolls_left;
                    self.input = if *rolls_left > 0 {
                        InputState::Reroll
                    } else {
                        InputState::Category
                    };
                }
            }
            ServerEvent::GameEnd { winner, scores } => {
                self.result = Some(GameResult {
                    winner: *winner,
                    scores: *scores,
                });
                self.input = InputState::Finished;
            }
        }
        self.input
    }

    pub fn category_options(&self) -> Vec<(Category, u32)> {
        let (Some(snapshot), Some(me)) = (&self.snapshot, self.player_id) else {
            return Vec::new();
        };
        let open = snapshot.player(me).scores.available();
        match self.dice {
            Some(dice) => open.into_iter().map(|c| (c, score(&dice, c))).collect(),
            None => open.into_iter().map(|c| (c, 0)).collect(),
        }
    }

    pub fn handle_input(&mut self, line: &str) -> InputOutcome {
        let line = line.trim();
        match self.input {
            InputState::Waiting | InputState::Finished => InputOutcome::Ignored,
            InputState::Roll => {
                if line.eq_ignore_ascii_case("r") {
                    self.input = InputState::Waiting;
                    InputOutcome::Send(ClientRequest::RollDice { reroll: None })
                } else {
                    InputOutcome::Invalid("type 'r' to roll".into())
                }
            }
            InputState::Reroll => {
                if line.is_empty() {
                    self.input = InputState::Category;
                    return InputOutcome::ChooseCategory;
                }
                match parse_die_numbers(line) {
                    Some(positions) => {
                        self.input = InputState::Waiting;
                        InputOutcome::Send(ClientRequest::RollDice {
                            reroll: Some(positions),
                        })
                    }
                    None => InputOutcome::Invalid(format!(
                        "enter die numbers 1-{DICE_COUNT} separated by commas, or nothing to keep"
                    )),
                }
            }
            InputState::Category => {
                let options = self.category_options();
                let picked = line
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| options.get(i));
                match picked {
                    Some(&(category, _)) => {
                        self.input = InputState::Waiting;
                        InputOutcome::Send(ClientRequest::SelectCategory { category })
                    }
                    None => InputOutcome::Invalid(format!(
                        "enter a category number between 1 and {}",
                        options.len()
                    )),
                }
            }
        }
    }
}

/// `"1, 3,5"` to `[0, 2, 4]`. Any entry outside `1..=5` rejects the whole line.
pub fn parse_die_numbers(line: &str) -> Option<Vec<i64>> {
    line.split(',')
        .map(|part| {
            let n = part.trim().parse::<i64>().ok()?;
            (1..=DICE_COUNT as i64).contains(&n).then_some(n - 1)
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
