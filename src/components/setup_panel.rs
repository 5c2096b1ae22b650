use yew::prelude::*;

use super::legend::SelectionLegend;
use crate::model::Selection;

#[derive(Properties, PartialEq, Clone)]
pub struct RoomCodeProps {
    pub code: String,
}

#[function_component(RoomCode)]
pub fn room_code(props: &RoomCodeProps) -> Html {
    let text = if props.code.is_empty() { "----".to_string() } else { props.code.clone() };
    html! { <span class="room-code" style="font-family:monospace; font-size:20px; letter-spacing:4px;">{ text }</span> }
}

#[derive(Properties, PartialEq, Clone)]
pub struct SetupPanelProps {
    pub room_code: String,
    pub is_host: bool,
    pub selection: Selection,
    pub ready_pending: bool,
    pub on_ready: Callback<()>,
}

#[function_component]
pub fn SetupPanel(props: &SetupPanelProps) -> Html {
    let ready_cb = {
        let cb = props.on_ready.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let ready_label = if props.ready_pending { "Waiting for other player..." } else { "Ready" };
    html! {<div style="display:flex; flex-direction:column; gap:8px;">
        <div>{"Room: "}<RoomCode code={props.room_code.clone()} /></div>
        { if props.is_host { html!{ <SelectionLegend selection={props.selection} /> } } else { html!{} } }
        <button id="ready" onclick={ready_cb} disabled={props.ready_pending}>{ ready_label }</button>
    </div>}
}
