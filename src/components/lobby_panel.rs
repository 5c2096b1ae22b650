use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::model::PendingFlags;

#[derive(Properties, PartialEq, Clone)]
pub struct LobbyPanelProps {
    pub pending: PendingFlags,
    pub on_create: Callback<()>,
    /// Raw room code as typed; normalised by the session.
    pub on_join: Callback<String>,
}

#[function_component]
pub fn LobbyPanel(props: &LobbyPanelProps) -> Html {
    let input_ref = use_node_ref();
    let create_cb = {
        let cb = props.on_create.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let join_cb = {
        let cb = props.on_join.clone();
        let input_ref = input_ref.clone();
        Callback::from(move |_| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                cb.emit(input.value());
            }
        })
    };
    let create_label = if props.pending.create { "Creating..." } else { "Create Room" };
    let join_label = if props.pending.join { "Joining..." } else { "Join Room" };
    html! {<div style="display:flex; flex-direction:column; gap:10px; max-width:280px;">
        <button id="create-room" onclick={create_cb} disabled={props.pending.create}>{ create_label }</button>
        <div style="display:flex; gap:6px;">
            <input id="room-code-input" ref={input_ref} maxlength="4" placeholder="CODE" style="text-transform:uppercase; width:80px;" />
            <button id="join-room" onclick={join_cb} disabled={props.pending.join}>{ join_label }</button>
        </div>
    </div>}
}
