use yew::prelude::*;

use crate::model::Selection;

#[derive(Properties, PartialEq, Clone)]
pub struct LegendRowProps {
    pub color: &'static str,
    pub label: &'static str,
    pub hotkey: &'static str,
    #[prop_or_default]
    pub active: bool,
}

#[function_component(LegendRow)]
pub fn legend_row(props: &LegendRowProps) -> Html {
    let weight = if props.active { "font-weight:700;" } else { "opacity:0.75;" };
    html! { <div style={format!("display:flex; align-items:center; gap:8px; margin:3px 0; {}", weight)}> <span style={format!("display:inline-block; width:12px; height:12px; background:{}; border:1px solid #30363d; border-radius:2px;", props.color)}></span> <span style="min-width:18px; font-family:monospace;">{ props.hotkey }</span> <span>{ props.label }</span> </div> }
}

/// Placement modes with their swatch colour and hotkey.
const ROWS: [(Selection, &str, &str); 5] = [
    (Selection::Player1, "#ff0000", "1"),
    (Selection::Player2, "#0000ff", "2"),
    (Selection::End1, "#ff9999", "E"),
    (Selection::End2, "#9999ff", "E"),
    (Selection::Wall, "#333", "W"),
];

#[derive(Properties, PartialEq, Clone)]
pub struct SelectionLegendProps {
    pub selection: Selection,
}

#[function_component(SelectionLegend)]
pub fn selection_legend(props: &SelectionLegendProps) -> Html {
    html! {
        <div class="legend">
            { for ROWS.iter().map(|(mode, color, key)| html! {
                <LegendRow color={*color} label={mode.label()} hotkey={*key} active={*mode == props.selection} />
            }) }
        </div>
    }
}
