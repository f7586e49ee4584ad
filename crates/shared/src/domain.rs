use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const DICE_COUNT: usize = 5;
pub const PLAYER_COUNT: usize = 2;

/// Seat index of a participant. Only `0` and `1` exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    pub const FIRST: PlayerId = PlayerId(0);
    pub const SECOND: PlayerId = PlayerId(1);
    pub const ALL: [PlayerId; PLAYER_COUNT] = [PlayerId::FIRST, PlayerId::SECOND];

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerId::FIRST),
            1 => Some(PlayerId::SECOND),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn other(self) -> PlayerId {
        if self == PlayerId::FIRST {
            PlayerId::SECOND
        } else {
            PlayerId::FIRST
        }
    }

    pub fn label(self) -> String {
        format!("Player{}", self.0 + 1)
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PlayerId::from_index(value as usize).ok_or(DomainError::InvalidPlayer(value))
    }
}

impl From<PlayerId> for u8 {
    fn from(value: PlayerId) -> Self {
        value.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    #[serde(alias = "three_of_kind")]
    ThreeOfAKind,
    #[serde(alias = "four_of_kind")]
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yacht,
    Chance,
}

impl Category {
    pub const COUNT: usize = 13;

    pub const ALL: [Category; Category::COUNT] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yacht,
        Category::Chance,
    ];

    pub fn face(self) -> Option<u8> {
        match self {
            Category::Ones => Some(1),
            Category::Twos => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Ones => "ones",
            Category::Twos => "twos",
            Category::Threes => "threes",
            Category::Fours => "fours",
            Category::Fives => "fives",
            Category::Sixes => "sixes",
            Category::ThreeOfAKind => "three_of_a_kind",
            Category::FourOfAKind => "four_of_a_kind",
            Category::FullHouse => "full_house",
            Category::SmallStraight => "small_straight",
            Category::LargeStraight => "large_straight",
            Category::Yacht => "yacht",
            Category::Chance => "chance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 5]", into = "[u8; 5]")]
pub struct DiceSet([u8; DICE_COUNT]);

impl DiceSet {
    pub fn new(faces: [u8; DICE_COUNT]) -> Result<Self, DomainError> {
        for (position, &face) in faces.iter().enumerate() {
            if !(1..=6).contains(&face) {
                return Err(DomainError::InvalidDie { position, face });
            }
        }
        Ok(Self(faces))
    }

    pub fn roll_with(mut draw: impl FnMut() -> u8) -> Self {
        let mut faces = [0u8; DICE_COUNT];
        for face in &mut faces {
            *face = draw();
            debug_assert!((1..=6).contains(&*face));
        }
        Self(faces)
    }

    /// Replace the dice at `positions` with freshly drawn faces.
    ///
    /// Positions outside `0..5` are ignored and a position listed twice is
    /// rerolled once. Returns how many dice were replaced.
    pub fn reroll_with(
        &mut self,
        positions: impl IntoIterator<Item = i64>,
        mut draw: impl FnMut() -> u8,
    ) -> usize {
        let mut selected = [false; DICE_COUNT];
        for position in positions {
            if let Some(slot) = usize::try_from(position)
                .ok()
                .and_then(|p| selected.get_mut(p))
            {
                *slot = true;
            }
        }

        let mut replaced = 0;
        for (face, _) in self.0.iter_mut().zip(selected).filter(|(_, s)| *s) {
            *face = draw();
            debug_assert!((1..=6).contains(&*face));
            replaced += 1;
        }
        replaced
    }

    pub fn faces(&self) -> [u8; DICE_COUNT] {
        self.0
    }

    pub fn sum(&self) -> u32 {
        self.0.iter().map(|&face| u32::from(face)).sum()
    }

    /// Occurrences per face; index 0 is unused.
    pub fn counts(&self) -> [u8; 7] {
        let mut counts = [0u8; 7];
        for &face in &self.0 {
            counts[face as usize] += 1;
        }
        counts
    }
}

impl TryFrom<[u8; DICE_COUNT]> for DiceSet {
    type Error = DomainError;

    fn try_from(value: [u8; DICE_COUNT]) -> Result<Self, Self::Error> {
        DiceSet::new(value)
    }
}

impl From<DiceSet> for [u8; DICE_COUNT] {
    fn from(value: DiceSet) -> Self {
        value.0
    }
}

impl fmt::Display for DiceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scorecard(BTreeMap<Category, u32>);

impl Scorecard {
    pub fn record(&mut self, category: Category, score: u32) -> Result<(), DomainError> {
        if self.0.contains_key(&category) {
            return Err(DomainError::CategoryTaken(category));
        }
        self.0.insert(category, score);
        Ok(())
    }

    pub fn get(&self, category: Category) -> Option<u32> {
        self.0.get(&category).copied()
    }

    pub fn is_recorded(&self, category: Category) -> bool {
        self.0.contains_key(&category)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.0.len() == Category::COUNT
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn available(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| !self.is_recorded(*category))
            .collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        self.0.iter().map(|(category, score)| (*category, *score))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnRoll {
    pub dice: DiceSet,
    pub rolls_remaining: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dice: Option<DiceSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolls_left: Option<u8>,
}

impl From<Option<&TurnRoll>> for TurnData {
    fn from(value: Option<&TurnRoll>) -> Self {
        match value {
            Some(roll) => Self {
                dice: Some(roll.dice),
                rolls_left: Some(roll.rolls_remaining),
            },
            None => Self::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub scores: Scorecard,
    #[serde(default)]
    pub turn_data: TurnData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub current_player: PlayerId,
    pub players: [PlayerSnapshot; PLAYER_COUNT],
    pub round: u8,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn player(&self, id: PlayerId) -> &PlayerSnapshot {
        &self.players[id.index()]
    }
}
