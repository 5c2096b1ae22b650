use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use crate::error::ClientError;
use crate::protocol::{self, ClientMsg};

#[allow(dead_code)]
struct WsHandlers {
    onopen: Closure<dyn FnMut(Event)>,
    onmessage: Closure<dyn FnMut(MessageEvent)>,
    onerror: Closure<dyn FnMut(Event)>,
    onclose: Closure<dyn FnMut(Event)>,
}

/// Callbacks fired from the socket's event handlers.
#[derive(Clone)]
pub struct ChannelHooks {
    pub on_open: Rc<dyn Fn()>,
    pub on_text: Rc<dyn Fn(String)>,
    pub on_close: Rc<dyn Fn()>,
}

/// Text-frame WebSocket to the room relay.
#[derive(Clone, Default)]
pub struct RelayChannel {
    ws: Rc<RefCell<Option<WebSocket>>>,
    handlers: Rc<RefCell<Option<WsHandlers>>>,
}

impl RelayChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, url: &str, hooks: ChannelHooks) -> Result<(), ClientError> {
        self.disconnect();
        tracing::info!(%url, "opening websocket");
        let ws = WebSocket::new(url).map_err(|_| ClientError::ChannelOpen(url.to_string()))?;
        *self.ws.borrow_mut() = Some(ws.clone());

        let onopen = {
            let on_open = hooks.on_open.clone();
            Closure::wrap(Box::new(move |_event: Event| {
                on_open();
            }) as Box<dyn FnMut(Event)>)
        };
        let onmessage = {
            let on_text = hooks.on_text.clone();
            Closure::wrap(Box::new(move |event: MessageEvent| {
                match event.data().dyn_into::<js_sys::JsString>() {
                    Ok(text) => on_text(String::from(text)),
                    Err(_) => tracing::warn!("ignoring non-text frame"),
                }
            }) as Box<dyn FnMut(MessageEvent)>)
        };
        let onerror = {
            let url = url.to_string();
            Closure::wrap(Box::new(move |_event: Event| {
                tracing::warn!(%url, "websocket error");
            }) as Box<dyn FnMut(Event)>)
        };
        let onclose = {
            let ws_ref = self.ws.clone();
            let on_close = hooks.on_close.clone();
            Closure::wrap(Box::new(move |event: Event| {
                ws_ref.borrow_mut().take();
                if let Some(close) = event.dyn_ref::<CloseEvent>() {
                    tracing::info!(code = close.code(), reason = %close.reason(), "websocket closed");
                }
                on_close();
            }) as Box<dyn FnMut(Event)>)
        };

        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

        *self.handlers.borrow_mut() = Some(WsHandlers {
            onopen,
            onmessage,
            onerror,
            onclose,
        });
        Ok(())
    }

    pub fn send(&self, msg: &ClientMsg) -> Result<(), ClientError> {
        let ws = self.ws.borrow().clone().ok_or(ClientError::ChannelNotOpen)?;
        if ws.ready_state() != WebSocket::OPEN {
            return Err(ClientError::ChannelNotOpen);
        }
        let frame = protocol::encode(msg)?;
        tracing::debug!(%frame, "sending");
        ws.send_with_str(&frame)
            .map_err(|err| ClientError::ChannelSend(format!("{:?}", err)))
    }

    pub fn disconnect(&mut self) {
        if let Some(ws) = self.ws.borrow_mut().take() {
            ws.set_onopen(None);
            ws.set_onmessage(None);
            ws.set_onerror(None);
            ws.set_onclose(None);
            let _ = ws.close();
        }
        self.handlers.borrow_mut().take();
    }
}
