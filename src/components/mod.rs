pub mod app;
pub mod board_canvas;
pub mod game_panel;
pub mod legend;
pub mod lobby_panel;
pub mod setup_panel;
pub mod status_bar;
