//! Client session state machine.
//!
//! Every DOM, keyboard and channel event is turned into an [`Input`] and fed
//! through [`Session::update`]. The session mutates its [`SessionState`] in
//! place and hands back the side effects (frames to send, alerts to show) for
//! the browser layer to carry out. Nothing in here touches the DOM, so the
//! whole protocol can be driven from plain tests.

use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::model::{Cell, ChannelStatus, GridSize, Phase, PlayerId, Selection, SessionState};
use crate::protocol::{self, BoardPayload, ClientMsg, InboundBoard, ServerMsg};

/// Number of distinct ready notices that starts the game.
const PLAYERS_PER_ROOM: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    ChannelOpened,
    ChannelClosed,
    CreateRoom,
    JoinRoom(String),
    Ready,
    /// Raw text frame from the relay.
    Received(String),
    /// Grid cell under a canvas click; `None` when the click missed the grid.
    CanvasClick(Option<Cell>),
    /// `KeyboardEvent.key` of a key press.
    Key(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Send(ClientMsg),
    /// Blocking user-facing prompt.
    Alert(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "w" => Some(Direction::Up),
            "s" => Some(Direction::Down),
            "a" => Some(Direction::Left),
            "d" => Some(Direction::Right),
            _ => None,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new(grid: GridSize) -> Self {
        Self {
            state: SessionState::new(grid),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn update(&mut self, input: Input) -> Vec<Effect> {
        let mut effects = Vec::new();
        match input {
            Input::ChannelOpened => {
                info!("connected to relay");
                self.state.channel = ChannelStatus::Open;
                self.state.status = "Connected to server".to_string();
            }
            Input::ChannelClosed => {
                info!("relay connection closed");
                self.state.channel = ChannelStatus::Closed;
                self.state.status = "Disconnected from server".to_string();
            }
            Input::CreateRoom => self.create_room(&mut effects),
            Input::JoinRoom(code) => self.join_room(&code, &mut effects),
            Input::Ready => self.player_ready(&mut effects),
            Input::Received(raw) => self.on_receive(&raw),
            Input::CanvasClick(cell) => self.handle_canvas_click(cell, &mut effects),
            Input::Key(key) => self.handle_key(&key, &mut effects),
        }
        effects
    }

    fn create_room(&mut self, effects: &mut Vec<Effect>) {
        if self.state.phase != Phase::Waiting || self.state.pending.create {
            return;
        }
        debug!("creating room");
        if self.send(ClientMsg::CreateRoom, effects).is_ok() {
            self.state.pending.create = true;
        }
    }

    fn join_room(&mut self, code: &str, effects: &mut Vec<Effect>) {
        if self.state.phase != Phase::Waiting || self.state.pending.join {
            return;
        }
        let room_code = code.trim().to_uppercase();
        if room_code.chars().count() != 4 {
            debug!(%room_code, "ignoring join with a malformed room code");
            return;
        }
        debug!(%room_code, "joining room");
        if self.send(ClientMsg::JoinRoom { room_code }, effects).is_ok() {
            self.state.pending.join = true;
        }
    }

    fn player_ready(&mut self, effects: &mut Vec<Effect>) {
        if self.state.phase != Phase::Setup || self.state.pending.ready {
            return;
        }
        let Some(player) = self.state.current_player else {
            return;
        };
        if self.state.is_host && !self.state.board.is_ready_to_start() {
            effects.push(Effect::Alert(ClientError::IncompleteBoard.user_message()));
            return;
        }
        let msg = ClientMsg::PlayerReady {
            room_code: self.state.room_code.clone(),
            player,
        };
        if self.send(msg, effects).is_ok() {
            info!(%player, "declared ready");
            self.state.pending.ready = true;
        }
    }

    fn on_receive(&mut self, raw: &str) {
        let msg = match protocol::decode(raw) {
            Ok(msg) => msg,
            Err(err) => {
                warn!(%err, "dropping inbound frame");
                return;
            }
        };
        debug!(?msg, "received");
        match msg {
            ServerMsg::ConnectionEstablished => info!("relay acknowledged connection"),
            ServerMsg::RoomCreated { room_code } => {
                self.state.pending.create = false;
                self.adopt_room(room_code, true);
            }
            ServerMsg::RoomJoined { room_code } => {
                self.state.pending.join = false;
                self.adopt_room(room_code, false);
            }
            ServerMsg::GameStateUpdate { game_state } => self.merge_remote(game_state),
            ServerMsg::PlayerReady { player } => {
                self.state.ready_players.insert(protocol::ready_key(&player));
                if self.state.ready_players.len() == PLAYERS_PER_ROOM
                    && self.state.phase != Phase::Game
                {
                    self.enter_phase(Phase::Game);
                }
            }
            ServerMsg::PlayerJoined { player } => {
                info!(player = %protocol::ready_key(&player), "peer joined room");
                self.state.status = "Player 2 has joined the room".to_string();
            }
            ServerMsg::Error { message } => {
                warn!(%message, "server error");
                self.state.status = message;
            }
            ServerMsg::Unknown => warn!("ignoring message of unknown type"),
        }
    }

    fn adopt_room(&mut self, room_code: String, is_host: bool) {
        self.state.room_code = room_code;
        self.state.is_host = is_host;
        self.state.current_player = Some(if is_host {
            PlayerId::Player1
        } else {
            PlayerId::Player2
        });
        self.enter_phase(Phase::Setup);
    }

    fn merge_remote(&mut self, game_state: Option<InboundBoard>) {
        let Some(inbound) = game_state else {
            return;
        };
        inbound.merge_into(&mut self.state.board);
    }

    /// Switch phase and refresh the status line. Board state is left alone.
    fn enter_phase(&mut self, phase: Phase) {
        info!(from = self.state.phase.as_str(), to = phase.as_str(), "phase change");
        self.state.phase = phase;
        self.state.status = match phase {
            Phase::Waiting => String::new(),
            Phase::Setup if self.state.is_host => {
                "Set up the game board (Use 1, 2, E, and W keys)".to_string()
            }
            Phase::Setup => "Waiting for host to set up the game board".to_string(),
            Phase::Game => "Game started! Use WASD to move.".to_string(),
        };
    }

    fn handle_canvas_click(&mut self, cell: Option<Cell>, effects: &mut Vec<Effect>) {
        if self.state.phase != Phase::Setup {
            return;
        }
        if !self.state.is_host {
            self.state.status = "Only Player 1 (host) can set up the game".to_string();
            return;
        }
        if self.state.pending.ready {
            return;
        }
        let Some(cell) = cell.filter(|c| self.state.grid.contains(*c)) else {
            return;
        };
        let board = &mut self.state.board;
        let changed = match self.state.selection {
            Selection::Player1 => {
                board.player_positions.set(PlayerId::Player1, Some(cell));
                true
            }
            Selection::Player2 => {
                board.player_positions.set(PlayerId::Player2, Some(cell));
                true
            }
            Selection::Wall => board.add_wall(cell),
            Selection::End1 => {
                board.end_positions.set(PlayerId::Player1, Some(cell));
                true
            }
            Selection::End2 => {
                board.end_positions.set(PlayerId::Player2, Some(cell));
                true
            }
        };
        if changed {
            debug!(x = cell.x, y = cell.y, selection = ?self.state.selection, "board edited");
            self.broadcast(effects);
        }
    }

    fn handle_key(&mut self, key: &str, effects: &mut Vec<Effect>) {
        let key = key.to_lowercase();
        match self.state.phase {
            Phase::Setup => self.select(&key),
            Phase::Game => self.handle_movement(&key, effects),
            Phase::Waiting => {}
        }
    }

    fn select(&mut self, key: &str) {
        if !self.state.is_host {
            return;
        }
        let next = match key {
            "1" => Selection::Player1,
            "2" => Selection::Player2,
            "w" => Selection::Wall,
            "e" if self.state.selection == Selection::End1 => Selection::End2,
            "e" => Selection::End1,
            _ => return,
        };
        debug!(selection = next.label(), "selection changed");
        self.state.selection = next;
    }

    fn handle_movement(&mut self, key: &str, effects: &mut Vec<Effect>) {
        let Some(direction) = Direction::from_key(key) else {
            return;
        };
        let Some(player) = self.state.current_player else {
            return;
        };
        let Some(from) = self.state.board.player_positions.get(player) else {
            return;
        };
        let (dx, dy) = direction.delta();
        let to = self.state.grid.step(from, dx, dy);
        if to == from || self.state.board.is_wall(to) {
            return;
        }
        self.state.board.player_positions.set(player, Some(to));
        self.broadcast(effects);
        if self.state.board.end_positions.get(player) == Some(to) {
            info!(%player, "reached end position");
            self.state.status = format!("{} has reached their end point!", player);
        }
    }

    /// Send the full board to the peer.
    fn broadcast(&mut self, effects: &mut Vec<Effect>) {
        let msg = ClientMsg::GameStateUpdate {
            room_code: self.state.room_code.clone(),
            game_state: BoardPayload::from(&self.state.board),
        };
        // `send` already logs a failure and shows it in the status line.
        self.send(msg, effects).ok();
    }

    fn send(&mut self, msg: ClientMsg, effects: &mut Vec<Effect>) -> Result<(), ClientError> {
        if self.state.channel != ChannelStatus::Open {
            let err = ClientError::ChannelNotOpen;
            warn!(%err, ?msg, "send aborted");
            self.state.status = err.user_message();
            return Err(err);
        }
        effects.push(Effect::Send(msg));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoardState, PlayerSlots};
    use serde_json::json;

    const GRID: GridSize = GridSize { width: 20, height: 15 };

    fn connected() -> Session {
        let mut session = Session::new(GRID);
        session.update(Input::ChannelOpened);
        session
    }

    fn frame(value: serde_json::Value) -> Input {
        Input::Received(value.to_string())
    }

    fn host() -> Session {
        let mut session = connected();
        session.update(Input::CreateRoom);
        session.update(frame(json!({ "type": "room_created", "room_code": "ABCD" })));
        session
    }

    fn guest() -> Session {
        let mut session = connected();
        session.update(Input::JoinRoom("abcd".into()));
        session.update(frame(json!({ "type": "room_joined", "room_code": "ABCD" })));
        session
    }

    fn place(session: &mut Session, selection_key: &str, cell: Cell) -> Vec<Effect> {
        session.update(Input::Key(selection_key.into()));
        session.update(Input::CanvasClick(Some(cell)))
    }

    fn full_board(session: &mut Session) {
        place(session, "1", Cell::new(0, 0));
        place(session, "2", Cell::new(19, 14));
        place(session, "e", Cell::new(10, 0));
        place(session, "e", Cell::new(10, 14));
    }

    fn in_game(mut session: Session) -> Session {
        session.update(frame(json!({ "type": "player_ready", "player": "a" })));
        session.update(frame(json!({ "type": "player_ready", "player": "b" })));
        assert_eq!(session.state().phase, Phase::Game);
        session
    }

    fn with_player_at(mut session: Session, player: PlayerId, cell: Cell) -> Session {
        let mut slots = PlayerSlots::default();
        slots.set(player, Some(cell));
        let payload = json!({ "type": "game_state_update", "gameState": { "playerPositions": slots } });
        session.update(frame(payload));
        session
    }

    fn sent_states(effects: &[Effect]) -> Vec<&BoardPayload> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Send(ClientMsg::GameStateUpdate { game_state, .. }) => Some(game_state),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn host_and_guest_scenario() {
        let mut host_session = connected();
        let effects = host_session.update(Input::CreateRoom);
        assert_eq!(effects, vec![Effect::Send(ClientMsg::CreateRoom)]);
        assert!(host_session.state().pending.create);

        host_session.update(frame(json!({ "type": "room_created", "room_code": "ABCD" })));
        let state = host_session.state();
        assert_eq!(state.phase, Phase::Setup);
        assert!(state.is_host);
        assert_eq!(state.current_player, Some(PlayerId::Player1));
        assert_eq!(state.room_code, "ABCD");
        assert!(!state.pending.create);

        let mut guest_session = connected();
        let effects = guest_session.update(Input::JoinRoom("ABCD".into()));
        assert_eq!(
            effects,
            vec![Effect::Send(ClientMsg::JoinRoom { room_code: "ABCD".into() })]
        );
        guest_session.update(frame(json!({ "type": "room_joined", "room_code": "ABCD" })));
        let state = guest_session.state();
        assert_eq!(state.phase, Phase::Setup);
        assert!(!state.is_host);
        assert_eq!(state.current_player, Some(PlayerId::Player2));

        let effects = host_session.update(Input::CanvasClick(Some(Cell::new(2, 3))));
        assert_eq!(
            host_session.state().board.player_positions.player1,
            Some(Cell::new(2, 3))
        );
        let sent = sent_states(&effects);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].player_positions.player1, Some(Cell::new(2, 3)));
    }

    #[test]
    fn wall_clicks_insert_each_cell_once() {
        let mut session = host();
        session.update(Input::Key("w".into()));
        for y in 0..GRID.height {
            for x in 0..GRID.width {
                let cell = Cell::new(x, y);
                let first = session.update(Input::CanvasClick(Some(cell)));
                assert_eq!(sent_states(&first).len(), 1);
                let again = session.update(Input::CanvasClick(Some(cell)));
                assert!(again.is_empty());
            }
        }
        let walls = &session.state().board.walls;
        assert_eq!(walls.len(), (GRID.width * GRID.height) as usize);
    }

    #[test]
    fn clicks_outside_the_grid_are_ignored() {
        let mut session = host();
        assert!(session.update(Input::CanvasClick(None)).is_empty());
        assert!(session.update(Input::CanvasClick(Some(Cell::new(20, 3)))).is_empty());
        assert!(session.update(Input::CanvasClick(Some(Cell::new(3, -1)))).is_empty());
        assert_eq!(session.state().board, BoardState::default());
    }

    #[test]
    fn guest_clicks_only_report_status() {
        let mut session = guest();
        let effects = session.update(Input::CanvasClick(Some(Cell::new(1, 1))));
        assert!(effects.is_empty());
        assert_eq!(session.state().board, BoardState::default());
        assert_eq!(session.state().status, "Only Player 1 (host) can set up the game");
    }

    #[test]
    fn clicks_outside_setup_are_ignored() {
        let mut session = connected();
        assert!(session.update(Input::CanvasClick(Some(Cell::new(1, 1)))).is_empty());
        assert_eq!(session.state().board, BoardState::default());
    }

    #[test]
    fn selection_keys_cycle_modes() {
        let mut session = host();
        assert_eq!(session.state().selection, Selection::Player1);
        session.update(Input::Key("2".into()));
        assert_eq!(session.state().selection, Selection::Player2);
        session.update(Input::Key("W".into()));
        assert_eq!(session.state().selection, Selection::Wall);
        session.update(Input::Key("e".into()));
        assert_eq!(session.state().selection, Selection::End1);
        session.update(Input::Key("e".into()));
        assert_eq!(session.state().selection, Selection::End2);
        session.update(Input::Key("e".into()));
        assert_eq!(session.state().selection, Selection::End1);
        session.update(Input::Key("1".into()));
        assert_eq!(session.state().selection, Selection::Player1);
    }

    #[test]
    fn guests_cannot_change_selection() {
        let mut session = guest();
        session.update(Input::Key("w".into()));
        assert_eq!(session.state().selection, Selection::Player1);
    }

    #[test]
    fn host_ready_requires_complete_board() {
        let mut session = host();
        place(&mut session, "1", Cell::new(0, 0));
        let before = session.state().clone();
        let effects = session.update(Input::Ready);
        assert_eq!(
            effects,
            vec![Effect::Alert(
                "Please place both players and end positions before starting!".into()
            )]
        );
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn ready_sends_notice_and_locks_board() {
        let mut session = host();
        full_board(&mut session);
        let effects = session.update(Input::Ready);
        assert_eq!(
            effects,
            vec![Effect::Send(ClientMsg::PlayerReady {
                room_code: "ABCD".into(),
                player: PlayerId::Player1,
            })]
        );
        assert!(session.state().pending.ready);
        let board = session.state().board.clone();
        assert!(session.update(Input::CanvasClick(Some(Cell::new(5, 5)))).is_empty());
        assert_eq!(session.state().board, board);
        assert!(session.update(Input::Ready).is_empty());
    }

    #[test]
    fn guest_ready_needs_no_board() {
        let mut session = guest();
        let effects = session.update(Input::Ready);
        assert_eq!(
            effects,
            vec![Effect::Send(ClientMsg::PlayerReady {
                room_code: "ABCD".into(),
                player: PlayerId::Player2,
            })]
        );
    }

    #[test]
    fn game_starts_exactly_at_two_ready_players() {
        let mut session = host();
        full_board(&mut session);
        place(&mut session, "w", Cell::new(4, 4));
        let board_before = session.state().board.clone();

        session.update(frame(json!({ "type": "player_ready", "player": "specific.one" })));
        assert_eq!(session.state().phase, Phase::Setup);
        session.update(frame(json!({ "type": "player_ready", "player": "specific.one" })));
        assert_eq!(session.state().phase, Phase::Setup);
        session.update(frame(json!({ "type": "player_ready", "player": "specific.two" })));
        assert_eq!(session.state().phase, Phase::Game);
        assert_eq!(session.state().status, "Game started! Use WASD to move.");
        assert_eq!(session.state().board, board_before);
    }

    #[test]
    fn movement_clamps_at_every_border() {
        let corners = [
            (Cell::new(5, 0), "w"),
            (Cell::new(5, GRID.height - 1), "s"),
            (Cell::new(0, 5), "a"),
            (Cell::new(GRID.width - 1, 5), "d"),
        ];
        for (start, key) in corners {
            let mut session = with_player_at(in_game(host()), PlayerId::Player1, start);
            let effects = session.update(Input::Key(key.into()));
            assert!(effects.is_empty(), "key {key} at {start:?}");
            assert_eq!(session.state().board.player_positions.player1, Some(start));
        }
    }

    #[test]
    fn movement_never_enters_walls() {
        let mut session = host();
        place(&mut session, "w", Cell::new(5, 4));
        place(&mut session, "w", Cell::new(6, 5));
        let mut session = with_player_at(in_game(session), PlayerId::Player1, Cell::new(5, 5));
        for key in ["w", "d", "w", "d"] {
            assert!(session.update(Input::Key(key.into())).is_empty());
            assert_eq!(
                session.state().board.player_positions.player1,
                Some(Cell::new(5, 5))
            );
        }
    }

    #[test]
    fn movement_from_extreme_remote_coordinates_does_not_overflow() {
        let start = Cell::new(i32::MAX, 3);
        let mut session = with_player_at(in_game(host()), PlayerId::Player1, start);
        let effects = session.update(Input::Key("d".into()));
        assert_eq!(
            session.state().board.player_positions.player1,
            Some(Cell::new(GRID.width - 1, 3))
        );
        assert_eq!(sent_states(&effects).len(), 1);

        let start = Cell::new(i32::MIN, i32::MIN);
        let mut session = with_player_at(in_game(host()), PlayerId::Player1, start);
        session.update(Input::Key("a".into()));
        session.update(Input::Key("w".into()));
        assert_eq!(
            session.state().board.player_positions.player1,
            Some(Cell::new(0, 0))
        );
    }

    #[test]
    fn movement_keeps_the_unmoved_axis_off_grid() {
        let start = Cell::new(25, 5);
        let mut session = with_player_at(in_game(host()), PlayerId::Player1, start);
        session.update(Input::Key("w".into()));
        assert_eq!(
            session.state().board.player_positions.player1,
            Some(Cell::new(25, 4))
        );
    }

    #[test]
    fn movement_moves_local_token_and_broadcasts() {
        let session = in_game(guest());
        let mut session = with_player_at(session, PlayerId::Player2, Cell::new(3, 3));
        let effects = session.update(Input::Key("D".into()));
        assert_eq!(
            session.state().board.player_positions.player2,
            Some(Cell::new(4, 3))
        );
        let sent = sent_states(&effects);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].player_positions.player2, Some(Cell::new(4, 3)));
        assert!(session.update(Input::Key("q".into())).is_empty());
    }

    #[test]
    fn reaching_the_end_only_reports_status() {
        let mut session = host();
        full_board(&mut session);
        let mut session = with_player_at(in_game(session), PlayerId::Player1, Cell::new(10, 1));
        session.update(frame(json!({
            "type": "game_state_update",
            "gameState": { "endPositions": { "player1": { "x": 10, "y": 0 }, "player2": null } }
        })));
        let effects = session.update(Input::Key("w".into()));
        assert_eq!(sent_states(&effects).len(), 1);
        assert_eq!(session.state().phase, Phase::Game);
        assert_eq!(session.state().status, "player1 has reached their end point!");
    }

    #[test]
    fn keys_in_setup_do_not_move() {
        let mut session = with_player_at(host(), PlayerId::Player1, Cell::new(3, 3));
        session.update(Input::Key("d".into()));
        assert_eq!(
            session.state().board.player_positions.player1,
            Some(Cell::new(3, 3))
        );
    }

    #[test]
    fn board_round_trips_through_the_wire() {
        let mut source = host();
        full_board(&mut source);
        for cell in [Cell::new(7, 7), Cell::new(2, 9), Cell::new(13, 1)] {
            place(&mut source, "w", cell);
        }
        let payload = BoardPayload::from(&source.state().board);
        let raw = json!({ "type": "game_state_update", "gameState": payload }).to_string();

        let mut fresh = guest();
        fresh.update(Input::Received(raw));
        let mine = &source.state().board;
        let theirs = &fresh.state().board;
        assert_eq!(theirs.player_positions, mine.player_positions);
        assert_eq!(theirs.end_positions, mine.end_positions);
        let mut a = mine.walls.clone();
        let mut b = theirs.walls.clone();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_slots_merge_as_empty() {
        let mut session = host();
        full_board(&mut session);
        session.update(frame(json!({
            "type": "game_state_update",
            "gameState": { "playerPositions": { "player1": { "x": 1, "y": 1 } } }
        })));
        let board = &session.state().board;
        assert_eq!(board.player_positions.player1, Some(Cell::new(1, 1)));
        assert_eq!(board.player_positions.player2, None);
        assert_eq!(board.end_positions.player1, Some(Cell::new(10, 0)));
    }

    #[test]
    fn updates_with_bad_entries_keep_the_valid_ones() {
        let mut session = host();
        session.update(frame(json!({
            "type": "game_state_update",
            "gameState": {
                "playerPositions": { "player1": { "x": 1, "y": 1 } },
                "walls": [{ "x": 2, "y": 2 }, null]
            }
        })));
        assert_eq!(
            session.state().board.player_positions.player1,
            Some(Cell::new(1, 1))
        );
        assert_eq!(session.state().board.walls, vec![Cell::new(2, 2)]);

        session.update(frame(json!({
            "type": "game_state_update",
            "gameState": { "playerPositions": { "player1": { "x": 4, "y": 4 }, "player2": false } }
        })));
        let positions = session.state().board.player_positions;
        assert_eq!(positions.player1, Some(Cell::new(4, 4)));
        assert_eq!(positions.player2, None);
        assert_eq!(session.state().board.walls, vec![Cell::new(2, 2)]);
    }

    #[test]
    fn sends_without_channel_report_connection_error() {
        let mut session = Session::new(GRID);
        assert!(session.update(Input::CreateRoom).is_empty());
        assert_eq!(session.state().status, "Connection error. Please refresh the page.");
        assert!(!session.state().pending.create);

        let mut session = host();
        session.update(Input::ChannelClosed);
        assert_eq!(session.state().channel, ChannelStatus::Closed);
        let effects = session.update(Input::CanvasClick(Some(Cell::new(1, 1))));
        assert!(effects.is_empty());
        assert_eq!(session.state().board.player_positions.player1, Some(Cell::new(1, 1)));
        assert_eq!(session.state().status, "Connection error. Please refresh the page.");
    }

    #[test]
    fn join_ignores_codes_of_wrong_length() {
        let mut session = connected();
        assert!(session.update(Input::JoinRoom("ABC".into())).is_empty());
        assert!(session.update(Input::JoinRoom("ABCDE".into())).is_empty());
        assert!(!session.state().pending.join);
    }

    #[test]
    fn malformed_frames_change_nothing() {
        let mut session = host();
        let before = session.state().clone();
        session.update(Input::Received("{not json".into()));
        session.update(Input::Received(r#"{"type":"room_created"}"#.into()));
        session.update(Input::Received(r#"{"type":"mystery"}"#.into()));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn server_errors_surface_in_status() {
        let mut session = connected();
        session.update(frame(json!({ "type": "error", "message": "Room not found" })));
        assert_eq!(session.state().status, "Room not found");
        assert_eq!(session.state().phase, Phase::Waiting);
    }

    #[test]
    fn channel_lifecycle_updates_status() {
        let mut session = Session::new(GRID);
        assert_eq!(session.state().channel, ChannelStatus::Connecting);
        session.update(Input::ChannelOpened);
        assert_eq!(session.state().status, "Connected to server");
        session.update(Input::ChannelClosed);
        assert_eq!(session.state().status, "Disconnected from server");
    }

    #[test]
    fn peer_join_is_announced() {
        let mut session = host();
        session.update(frame(json!({ "type": "player_joined", "player": 2 })));
        assert_eq!(session.state().status, "Player 2 has joined the room");
    }
}
