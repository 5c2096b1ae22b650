//! JSON wire messages exchanged with the room relay server.
//!
//! Every frame is a JSON object tagged by its `type` field. Outbound board
//! snapshots always carry every field; inbound snapshots may omit any of them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ClientError;
use crate::model::{BoardState, Cell, PlayerId, PlayerSlots};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    CreateRoom,
    JoinRoom {
        room_code: String,
    },
    PlayerReady {
        room_code: String,
        player: PlayerId,
    },
    GameStateUpdate {
        room_code: String,
        #[serde(rename = "gameState")]
        game_state: BoardPayload,
    },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    ConnectionEstablished,
    RoomCreated {
        room_code: String,
    },
    RoomJoined {
        room_code: String,
    },
    GameStateUpdate {
        #[serde(rename = "gameState", default)]
        game_state: Option<InboundBoard>,
    },
    PlayerReady {
        #[serde(default)]
        player: Value,
    },
    PlayerJoined {
        #[serde(default)]
        player: Value,
    },
    Error {
        #[serde(default)]
        message: String,
    },
    #[serde(other)]
    Unknown,
}

/// Full board snapshot as broadcast to the peer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPayload {
    pub end_positions: PlayerSlots,
    pub walls: Vec<Cell>,
    pub player_positions: PlayerSlots,
}

impl From<&BoardState> for BoardPayload {
    fn from(board: &BoardState) -> Self {
        Self {
            end_positions: board.end_positions,
            walls: board.walls.clone(),
            player_positions: board.player_positions,
        }
    }
}

/// Partial board snapshot; absent fields leave local state untouched.
/// A field of the wrong shape counts as absent, and bad entries inside an
/// otherwise valid field are dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundBoard {
    #[serde(default, deserialize_with = "lenient_slots")]
    pub player_positions: Option<PlayerSlots>,
    #[serde(default, deserialize_with = "lenient_slots")]
    pub end_positions: Option<PlayerSlots>,
    #[serde(default, deserialize_with = "lenient_walls")]
    pub walls: Option<Vec<Cell>>,
}

fn lenient_slots<'de, D>(deserializer: D) -> Result<Option<PlayerSlots>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

fn lenient_walls<'de, D>(deserializer: D) -> Result<Option<Vec<Cell>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(entries) => Some(
            entries
                .into_iter()
                .filter_map(|entry| serde_json::from_value(entry).ok())
                .collect(),
        ),
        _ => None,
    })
}

impl InboundBoard {
    /// Merge into `board` field by field.
    pub fn merge_into(self, board: &mut BoardState) {
        if let Some(positions) = self.player_positions {
            board.player_positions = positions;
        }
        if let Some(ends) = self.end_positions {
            board.end_positions = ends;
        }
        if let Some(walls) = self.walls {
            board.replace_walls(walls);
        }
    }
}

/// Key under which a `player_ready` sender is tracked. Strings are used verbatim.
pub fn ready_key(player: &Value) -> String {
    match player {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn encode(msg: &ClientMsg) -> Result<String, ClientError> {
    Ok(serde_json::to_string(msg)?)
}

pub fn decode(raw: &str) -> Result<ServerMsg, ClientError> {
    Ok(serde_json::from_str(raw)?)
}
