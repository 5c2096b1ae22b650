use yew::prelude::*;

use super::setup_panel::RoomCode;
use crate::model::PlayerId;

#[derive(Properties, PartialEq, Clone)]
pub struct GamePanelProps {
    pub room_code: String,
    pub player: Option<PlayerId>,
}

#[function_component]
pub fn GamePanel(props: &GamePanelProps) -> Html {
    let who = props
        .player
        .map(|p| format!("You are Player {}", p.number()))
        .unwrap_or_default();
    html! {<div style="display:flex; gap:16px; align-items:center;">
        <div>{"Room: "}<RoomCode code={props.room_code.clone()} /></div>
        <div id="current-player">{ who }</div>
        <div style="font-size:11px; opacity:0.7;">{"W/A/S/D to move"}</div>
    </div>}
}
