use serde::{
    de::{DeserializeOwned, Error as _},
    Deserialize, Deserializer, Serialize,
};
use serde_json::{Number, Value};

use crate::{
    domain::{Category, DiceSet, GameSnapshot, PlayerId},
    error::ProtocolError,
};

/// Upper bound on one newline-delimited message.
pub const MAX_LINE_LEN: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ClientRequest {
    RollDice {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reroll: Option<Vec<i64>>,
    },
    SelectCategory {
        category: Category,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    PlayerId {
        id: PlayerId,
    },
    GameStart(GameSnapshot),
    DiceResult {
        dice: DiceSet,
        player: PlayerId,
        rolls_left: u8,
    },
    TurnEnd {
        category: Category,
        score: u32,
        player: PlayerId,
        game_state: GameSnapshot,
    },
    GameEnd {
        winner: PlayerId,
        scores: [u32; 2],
    },
}

impl ServerEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            ServerEvent::PlayerId { .. } => "player_id",
            ServerEvent::GameStart(_) => "game_start",
            ServerEvent::DiceResult { .. } => "dice_result",
            ServerEvent::TurnEnd { .. } => "turn_end",
            ServerEvent::GameEnd { .. } => "game_end",
        }
    }
}

impl ClientRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            ClientRequest::RollDice { .. } => "roll_dice",
            ClientRequest::SelectCategory { .. } => "select_category",
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum RequestKind {
    RollDice,
    SelectCategory,
}

#[derive(Deserialize)]
struct WireRequest {
    #[serde(rename = "type")]
    kind: RequestKind,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Deserialize)]
struct RollDiceData {
    #[serde(default, deserialize_with = "reroll_positions")]
    reroll: Option<Vec<i64>>,
}

#[derive(Deserialize)]
struct SelectCategoryData {
    category: Category,
}

// `roll_dice` may omit `data` entirely; `select_category` may not.
impl<'de> Deserialize<'de> for ClientRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireRequest::deserialize(deserializer)?;
        match (wire.kind, wire.data) {
            (RequestKind::RollDice, None) => Ok(ClientRequest::RollDice { reroll: None }),
            (RequestKind::RollDice, Some(data)) => {
                let data: RollDiceData = serde_json::from_value(data).map_err(D::Error::custom)?;
                Ok(ClientRequest::RollDice {
                    reroll: data.reroll,
                })
            }
            (RequestKind::SelectCategory, data) => {
                let data = data.ok_or_else(|| D::Error::missing_field("data"))?;
                let data: SelectCategoryData =
                    serde_json::from_value(data).map_err(D::Error::custom)?;
                Ok(ClientRequest::SelectCategory {
                    category: data.category,
                })
            }
        }
    }
}

/// Integers too large for `i64` saturate, so they fall out of range and are
/// skipped like any other bad position. Fractions are rejected.
fn reroll_positions<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<i64>>, D::Error> {
    let Some(numbers) = Option::<Vec<Number>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    numbers
        .iter()
        .map(|n| position_from_number(n).ok_or_else(|| {
            D::Error::custom(format!("reroll position {n} is not an integer"))
        }))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn position_from_number(n: &Number) -> Option<i64> {
    if let Some(position) = n.as_i64() {
        return Some(position);
    }
    if n.is_u64() {
        return Some(i64::MAX);
    }
    // Integer literals beyond u64 arrive as floats.
    let wide = n.as_f64()?;
    if wide.is_finite() && wide.fract() == 0.0 && wide.abs() >= i64::MAX as f64 {
        Some(if wide > 0.0 { i64::MAX } else { i64::MIN })
    } else {
        None
    }
}

pub fn encode_line<T: Serialize>(message: &T) -> Result<String, ProtocolError> {
    serde_json::to_string(message).map_err(ProtocolError::Encode)
}

pub fn decode_line<T: DeserializeOwned>(line: &str) -> Result<T, ProtocolError> {
    Ok(serde_json::from_str(line.trim())?)
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
