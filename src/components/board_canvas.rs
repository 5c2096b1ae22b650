use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::model::{BoardState, Cell};
use crate::scene::{build_scene, paint};
use crate::viewport::{cell_at, fit_within, CanvasRect};

#[derive(Properties, PartialEq, Clone)]
pub struct BoardCanvasProps {
    pub config: ClientConfig,
    pub board: BoardState,
    /// Cell under a click, `None` when the click missed the grid.
    pub on_cell: Callback<Option<Cell>>,
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, ClientError> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
        .ok_or(ClientError::MissingElement("canvas 2d context"))
}

fn redraw(canvas_ref: &NodeRef, config: &ClientConfig, board: &BoardState) {
    let drawn = canvas_ref
        .cast::<HtmlCanvasElement>()
        .ok_or(ClientError::MissingElement("board canvas"))
        .and_then(|canvas| context_2d(&canvas))
        .map(|ctx| paint(&ctx, &build_scene(board, config)));
    if let Err(err) = drawn {
        tracing::warn!(%err, "cannot draw board");
    }
}

/// Size the canvas box to its container, keeping the logical aspect ratio.
fn fit_to_container(canvas_ref: &NodeRef, config: &ClientConfig) {
    let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
        return;
    };
    let Some(parent) = canvas.parent_element() else {
        return;
    };
    let container_w = parent.client_width() as f64;
    let container_h = match parent.client_height() {
        h if h > 0 => h as f64,
        _ => f64::INFINITY,
    };
    if container_w <= 0.0 {
        return;
    }
    let (w, h) = fit_within(container_w, container_h, config.aspect_ratio());
    let style = canvas.style();
    style.set_property("width", &format!("{}px", w)).ok();
    style.set_property("height", &format!("{}px", h)).ok();
}

#[function_component(BoardCanvas)]
pub fn board_canvas(props: &BoardCanvasProps) -> Html {
    let canvas_ref = use_node_ref();
    let latest_board = use_mut_ref(|| props.board.clone());

    // Repaint on every board change
    {
        let canvas_ref = canvas_ref.clone();
        let config = props.config.clone();
        let latest_board = latest_board.clone();
        use_effect_with(props.board.clone(), move |board| {
            *latest_board.borrow_mut() = board.clone();
            redraw(&canvas_ref, &config, board);
            || ()
        });
    }
    // Resize: refit and repaint
    {
        let canvas_ref = canvas_ref.clone();
        let config = props.config.clone();
        let latest_board = latest_board.clone();
        use_effect_with((), move |_| {
            fit_to_container(&canvas_ref, &config);
            let resize_cb = Closure::wrap(Box::new(move |_e: web_sys::Event| {
                fit_to_container(&canvas_ref, &config);
                redraw(&canvas_ref, &config, &latest_board.borrow());
            }) as Box<dyn FnMut(_)>);
            let window = web_sys::window();
            if let Some(win) = &window {
                win.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                    .ok();
            }
            move || {
                if let Some(win) = &window {
                    win.remove_event_listener_with_callback(
                        "resize",
                        resize_cb.as_ref().unchecked_ref(),
                    )
                    .ok();
                }
            }
        });
    }

    let onclick = {
        let canvas_ref = canvas_ref.clone();
        let config = props.config.clone();
        let on_cell = props.on_cell.clone();
        Callback::from(move |e: MouseEvent| {
            let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
                return;
            };
            let rect = CanvasRect::from(&canvas.get_bounding_client_rect());
            on_cell.emit(cell_at(&config, rect, e.client_x() as f64, e.client_y() as f64));
        })
    };

    html! {
        <canvas
            id="world-map-canvas"
            ref={canvas_ref}
            width={props.config.canvas_width.to_string()}
            height={props.config.canvas_height.to_string()}
            style="display:block;"
            {onclick}
        />
    }
}
