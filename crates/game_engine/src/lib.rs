use shared::{
    domain::{
        Category, DiceSet, GameSnapshot, PlayerId, PlayerSnapshot, Scorecard, TurnData, TurnRoll,
        PLAYER_COUNT,
    },
    protocol::{ClientRequest, ServerEvent},
    scoring::score,
};

pub mod chance;
pub mod error;

pub use chance::ChanceMode;
pub use error::{ActionRejected, ChanceError};

pub const REROLLS_PER_TURN: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingPlayers,
    InProgress,
    Finished { winner: PlayerId },
}

#[derive(Debug)]
pub struct GameEngine {
    phase: Phase,
    current: PlayerId,
    scorecards: [Scorecard; PLAYER_COUNT],
    turns: [Option<TurnRoll>; PLAYER_COUNT],
    chance: ChanceMode,
}

impl GameEngine {
    pub fn new(chance: ChanceMode) -> Self {
        Self {
            phase: Phase::AwaitingPlayers,
            current: PlayerId::FIRST,
            scorecards: Default::default(),
            turns: [None; PLAYER_COUNT],
            chance,
        }
    }

    pub fn start(&mut self) -> Result<ServerEvent, ActionRejected> {
        if self.phase != Phase::AwaitingPlayers {
            return Err(ActionRejected::AlreadyStarted);
        }
        self.phase = Phase::InProgress;
        self.current = PlayerId::FIRST;
        self.scorecards = Default::default();
        self.turns = [None; PLAYER_COUNT];
        Ok(ServerEvent::GameStart(self.snapshot()))
    }

    pub fn apply(
        &mut self,
        player: PlayerId,
        request: &ClientRequest,
    ) -> Result<ServerEvent, ActionRejected> {
        match request {
            ClientRequest::RollDice { reroll } => self.roll_dice(player, reroll.as_deref()),
            ClientRequest::SelectCategory { category } => self.select_category(player, *category),
        }
    }

    /// Opening roll of the turn, or a reroll of the listed positions.
    ///
    /// `reroll` is ignored on the opening roll. On a reroll, positions outside
    /// `0..5` are skipped and the roll budget is spent even if nothing was
    /// rerolled.
    pub fn roll_dice(
        &mut self,
        player: PlayerId,
        reroll: Option<&[i64]>,
    ) -> Result<ServerEvent, ActionRejected> {
        self.ensure_current_player(player)?;

        let roll = match self.turns[player.index()] {
            None => TurnRoll {
                dice: DiceSet::roll_with(|| self.chance.roll_die()),
                rolls_remaining: REROLLS_PER_TURN,
            },
            Some(mut roll) => {
                if roll.rolls_remaining == 0 {
                    return Err(ActionRejected::NoRollsRemaining);
                }
                let positions = reroll.unwrap_or_default().iter().copied();
                roll.dice.reroll_with(positions, || self.chance.roll_die());
                roll.rolls_remaining -= 1;
                roll
            }
        };
        self.turns[player.index()] = Some(roll);

        Ok(ServerEvent::DiceResult {
            dice: roll.dice,
            player,
            rolls_left: roll.rolls_remaining,
        })
    }

    pub fn select_category(
        &mut self,
        player: PlayerId,
        category: Category,
    ) -> Result<ServerEvent, ActionRejected> {
        self.ensure_current_player(player)?;
        let card = &self.scorecards[player.index()];
        if card.is_recorded(category) {
            return Err(ActionRejected::CategoryTaken(category));
        }
        let roll = self.turns[player.index()].ok_or(ActionRejected::NoActiveRoll)?;

        let points = score(&roll.dice, category);
        self.scorecards[player.index()]
            .record(category, points)
            .map_err(|_| ActionRejected::CategoryTaken(category))?;
        self.turns[player.index()] = None;
        self.current = player.other();

        if self.scorecards.iter().all(Scorecard::is_complete) {
            let scores = self.totals();
            let winner = decide_winner(scores);
            self.phase = Phase::Finished { winner };
            return Ok(ServerEvent::GameEnd { winner, scores });
        }

        Ok(ServerEvent::TurnEnd {
            category,
            score: points,
            player,
            game_state: self.snapshot(),
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    pub fn scorecard(&self, player: PlayerId) -> &Scorecard {
        &self.scorecards[player.index()]
    }

    pub fn turn_roll(&self, player: PlayerId) -> Option<&TurnRoll> {
        self.turns[player.index()].as_ref()
    }

    pub fn totals(&self) -> [u32; PLAYER_COUNT] {
        [self.scorecards[0].total(), self.scorecards[1].total()]
    }

    pub fn round(&self) -> u8 {
        let completed = self
            .scorecards
            .iter()
            .map(Scorecard::len)
            .min()
            .unwrap_or(0);
        (completed + 1).min(Category::COUNT) as u8
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            current_player: self.current,
            players: PlayerId::ALL.map(|id| PlayerSnapshot {
                name: id.label(),
                scores: self.scorecards[id.index()].clone(),
                turn_data: TurnData::from(self.turns[id.index()].as_ref()),
            }),
            round: self.round(),
            game_over: matches!(self.phase, Phase::Finished { .. }),
        }
    }

    fn ensure_current_player(&self, player: PlayerId) -> Result<(), ActionRejected> {
        match self.phase {
            Phase::AwaitingPlayers => Err(ActionRejected::NotStarted),
            Phase::Finished { .. } => Err(ActionRejected::GameOver),
            Phase::InProgress if player != self.current => Err(ActionRejected::NotYourTurn {
                player,
                current: self.current,
            }),
            Phase::InProgress => Ok(()),
        }
    }
}

/// The strictly higher total wins; a tie goes to the second player.
pub fn decide_winner(totals: [u32; PLAYER_COUNT]) -> PlayerId {
    if totals[0] > totals[1] {
        PlayerId::FIRST
    } else {
        PlayerId::SECOND
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
