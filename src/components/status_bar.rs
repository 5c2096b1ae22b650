use yew::prelude::*;

use crate::model::ChannelStatus;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusBarProps {
    pub status: String,
    pub channel: ChannelStatus,
}

#[function_component]
pub fn StatusBar(props: &StatusBarProps) -> Html {
    let (dot, title) = match props.channel {
        ChannelStatus::Connecting => ("#d29922", "Connecting"),
        ChannelStatus::Open => ("#3fb950", "Connected"),
        ChannelStatus::Closed => ("#f85149", "Disconnected"),
    };
    html! {<div class="status-bar" style="display:flex; align-items:center; gap:8px; padding:6px 10px;">
        <span title={title} style={format!("display:inline-block; width:10px; height:10px; border-radius:50%; background:{};", dot)}></span>
        <span id="game-status">{ props.status.clone() }</span>
    </div>}
}
