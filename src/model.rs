//! Core data models for Grid Duel.
//! Board and session state shared by the session reducer, the scene builder and the UI.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: i32,
    pub height: i32,
}

impl GridSize {
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    /// Move one step, stopping at the border on the moved axis only.
    /// The other axis is left as-is, even when it is off the grid.
    pub fn step(&self, from: Cell, dx: i32, dy: i32) -> Cell {
        let next = from.offset(dx, dy);
        Cell {
            x: bound_axis(next.x, dx, self.width),
            y: bound_axis(next.y, dy, self.height),
        }
    }
}

fn bound_axis(value: i32, delta: i32, len: i32) -> i32 {
    match delta.signum() {
        -1 => value.max(0),
        1 => value.min((len - 1).max(0)),
        _ => value,
    }
}

/// Integer grid coordinate. Signed so inbound positions are taken verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerId {
    Player1,
    Player2,
}

impl PlayerId {
    pub fn number(self) -> u8 {
        match self {
            PlayerId::Player1 => 1,
            PlayerId::Player2 => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerId::Player1 => "player1",
            PlayerId::Player2 => "player2",
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any value that is not a `{x, y}` integer pair reads as an empty slot.
fn lenient_cell<'de, D>(deserializer: D) -> Result<Option<Cell>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// One optional cell per player, serialized as `{ "player1": .., "player2": .. }`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlots {
    #[serde(default, deserialize_with = "lenient_cell")]
    pub player1: Option<Cell>,
    #[serde(default, deserialize_with = "lenient_cell")]
    pub player2: Option<Cell>,
}

impl PlayerSlots {
    pub fn get(&self, player: PlayerId) -> Option<Cell> {
        match player {
            PlayerId::Player1 => self.player1,
            PlayerId::Player2 => self.player2,
        }
    }

    pub fn set(&mut self, player: PlayerId, cell: Option<Cell>) {
        match player {
            PlayerId::Player1 => self.player1 = cell,
            PlayerId::Player2 => self.player2 = cell,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.player1.is_some() && self.player2.is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, Cell)> + '_ {
        [
            (PlayerId::Player1, self.player1),
            (PlayerId::Player2, self.player2),
        ]
        .into_iter()
        .filter_map(|(player, cell)| cell.map(|c| (player, c)))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub player_positions: PlayerSlots,
    pub end_positions: PlayerSlots,
    /// Wall cells; insertion order kept, no duplicates.
    pub walls: Vec<Cell>,
}

impl BoardState {
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.walls.contains(&cell)
    }

    /// Returns false when the wall was already present.
    pub fn add_wall(&mut self, cell: Cell) -> bool {
        if self.is_wall(cell) {
            return false;
        }
        self.walls.push(cell);
        true
    }

    /// Replace the wall list, dropping repeated entries.
    pub fn replace_walls(&mut self, walls: impl IntoIterator<Item = Cell>) {
        self.walls.clear();
        for cell in walls {
            self.add_wall(cell);
        }
    }

    /// Both starts and both ends placed.
    pub fn is_ready_to_start(&self) -> bool {
        self.player_positions.is_complete() && self.end_positions.is_complete()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Waiting,
    Setup,
    Game,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Waiting => "waiting",
            Phase::Setup => "setup",
            Phase::Game => "game",
        }
    }
}

/// What the next setup click writes onto the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Player1,
    Player2,
    Wall,
    End1,
    End2,
}

impl Selection {
    pub fn label(self) -> &'static str {
        match self {
            Selection::Player1 => "Player 1 start",
            Selection::Player2 => "Player 2 start",
            Selection::Wall => "Wall",
            Selection::End1 => "Player 1 end",
            Selection::End2 => "Player 2 end",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelStatus {
    #[default]
    Connecting,
    Open,
    Closed,
}

/// Buttons that were pressed and are waiting on the server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PendingFlags {
    pub create: bool,
    pub join: bool,
    pub ready: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub grid: GridSize,
    pub phase: Phase,
    pub room_code: String,
    pub is_host: bool,
    pub current_player: Option<PlayerId>,
    pub selection: Selection,
    /// Ready identifiers exactly as the server reports them.
    pub ready_players: BTreeSet<String>,
    pub board: BoardState,
    pub channel: ChannelStatus,
    pub pending: PendingFlags,
    pub status: String,
}

impl SessionState {
    pub fn new(grid: GridSize) -> Self {
        Self {
            grid,
            phase: Phase::Waiting,
            room_code: String::new(),
            is_host: false,
            current_player: None,
            selection: Selection::default(),
            ready_players: BTreeSet::new(),
            board: BoardState::default(),
            channel: ChannelStatus::default(),
            pending: PendingFlags::default(),
            status: String::new(),
        }
    }
}
