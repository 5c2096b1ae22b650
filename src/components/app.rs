use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use super::{
    board_canvas::BoardCanvas, game_panel::GamePanel, lobby_panel::LobbyPanel,
    setup_panel::SetupPanel, status_bar::StatusBar,
};
use crate::channel::{ChannelHooks, RelayChannel};
use crate::config::ClientConfig;
use crate::model::{Cell, Phase};
use crate::session::{Effect, Input, Session};

fn run_effect(channel: &RelayChannel, effect: Effect) {
    match effect {
        Effect::Send(msg) => {
            if let Err(err) = channel.send(&msg) {
                tracing::warn!(%err, "send failed");
            }
        }
        Effect::Alert(text) => {
            if let Some(win) = web_sys::window() {
                let _ = win.alert_with_message(&text);
            }
        }
    }
}

fn phase_class(current: Phase, shown: Phase) -> Classes {
    classes!("phase", (current == shown).then_some("active"))
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| ClientConfig::load());
    let session = {
        let grid = config.grid();
        use_mut_ref(move || Session::new(grid))
    };
    let channel = use_mut_ref(RelayChannel::new);
    let dispatch_ref = use_mut_ref(|| None::<Rc<dyn Fn(Input)>>);
    let refresh = use_force_update();

    // Mount: wire the socket and keyboard into the session.
    {
        let config = config.clone();
        let session = session.clone();
        let channel = channel.clone();
        let dispatch_ref = dispatch_ref.clone();
        use_effect_with((), move |_| {
            let dispatch: Rc<dyn Fn(Input)> = {
                let session = session.clone();
                let channel = channel.clone();
                Rc::new(move |input: Input| {
                    let effects = session.borrow_mut().update(input);
                    for effect in effects {
                        run_effect(&channel.borrow(), effect);
                    }
                    refresh.force_update();
                })
            };
            *dispatch_ref.borrow_mut() = Some(dispatch.clone());

            let hooks = ChannelHooks {
                on_open: {
                    let dispatch = dispatch.clone();
                    Rc::new(move || dispatch(Input::ChannelOpened))
                },
                on_text: {
                    let dispatch = dispatch.clone();
                    Rc::new(move |text: String| dispatch(Input::Received(text)))
                },
                on_close: {
                    let dispatch = dispatch.clone();
                    Rc::new(move || dispatch(Input::ChannelClosed))
                },
            };
            match config.page_socket_url() {
                Some(url) => {
                    let connected = channel.borrow_mut().connect(&url, hooks);
                    if let Err(err) = connected {
                        tracing::warn!(%err, "could not reach relay");
                        dispatch(Input::ChannelClosed);
                    }
                }
                None => {
                    tracing::warn!("page location unavailable; staying offline");
                    dispatch(Input::ChannelClosed);
                }
            }

            let keydown_cb = {
                let dispatch = dispatch.clone();
                Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
                    dispatch(Input::Key(e.key()));
                }) as Box<dyn FnMut(_)>)
            };
            let window = web_sys::window();
            if let Some(win) = &window {
                win.add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                    .ok();
            }

            move || {
                if let Some(win) = &window {
                    win.remove_event_listener_with_callback(
                        "keydown",
                        keydown_cb.as_ref().unchecked_ref(),
                    )
                    .ok();
                }
                channel.borrow_mut().disconnect();
                dispatch_ref.borrow_mut().take();
            }
        });
    }

    let emit = {
        let dispatch_ref = dispatch_ref.clone();
        Callback::from(move |input: Input| {
            let dispatch = dispatch_ref.borrow().clone();
            if let Some(dispatch) = dispatch {
                dispatch(input);
            }
        })
    };
    let on_create = emit.reform(|_: ()| Input::CreateRoom);
    let on_join = emit.reform(Input::JoinRoom);
    let on_ready = emit.reform(|_: ()| Input::Ready);
    let on_cell = emit.reform(|cell: Option<Cell>| Input::CanvasClick(cell));

    let state = session.borrow().state().clone();
    html! {
        <div class="game-shell">
            <StatusBar status={state.status.clone()} channel={state.channel} />
            <div id="waiting-room" class={phase_class(state.phase, Phase::Waiting)}>
                <LobbyPanel pending={state.pending} {on_create} {on_join} />
            </div>
            <div id="setup-phase" class={phase_class(state.phase, Phase::Setup)}>
                <SetupPanel
                    room_code={state.room_code.clone()}
                    is_host={state.is_host}
                    selection={state.selection}
                    ready_pending={state.pending.ready}
                    {on_ready}
                />
            </div>
            <div id="game-phase" class={phase_class(state.phase, Phase::Game)}>
                <GamePanel room_code={state.room_code.clone()} player={state.current_player} />
            </div>
            <div class="board-wrap">
                <BoardCanvas config={(*config).clone()} board={state.board.clone()} {on_cell} />
            </div>
        </div>
    }
}
