//! Client configuration: canvas geometry and the relay socket location.

use serde::{Deserialize, Serialize};

use crate::model::GridSize;

/// `localStorage` key holding an optional JSON override of [`ClientConfig`].
pub const CONFIG_STORAGE_KEY: &str = "gridduel.config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Logical canvas size in pixels.
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Edge of one grid cell in logical pixels.
    pub cell_size: u32,
    /// Path of the relay endpoint on the page's host.
    pub socket_path: String,
    /// Full socket URL; overrides host + path when set.
    pub socket_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            cell_size: 40,
            socket_path: "/ws/game/".to_string(),
            socket_url: None,
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with a stored override; a bad override falls back to defaults.
    pub fn from_override(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Self::default();
        };
        match serde_json::from_str::<ClientConfig>(raw) {
            Ok(cfg) if cfg.cell_size > 0 => cfg,
            Ok(_) => {
                tracing::warn!("ignoring config override with zero cell size");
                Self::default()
            }
            Err(err) => {
                tracing::warn!(%err, "ignoring malformed config override");
                Self::default()
            }
        }
    }

    /// Read the override from `localStorage`, if the browser provides one.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|store| store.get_item(CONFIG_STORAGE_KEY).ok().flatten());
        Self::from_override(raw.as_deref())
    }

    pub fn grid(&self) -> GridSize {
        GridSize {
            width: (self.canvas_width / self.cell_size) as i32,
            height: (self.canvas_height / self.cell_size) as i32,
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.canvas_width as f64 / self.canvas_height as f64
    }

    /// `wss:` for pages served over `https:`, `ws:` otherwise.
    pub fn socket_url(&self, page_protocol: &str, host: &str) -> String {
        if let Some(url) = &self.socket_url {
            return url.clone();
        }
        let scheme = if page_protocol == "https:" { "wss:" } else { "ws:" };
        format!("{}//{}{}", scheme, host, self.socket_path)
    }

    /// Socket URL for the current page.
    pub fn page_socket_url(&self) -> Option<String> {
        let location = web_sys::window()?.location();
        let protocol = location.protocol().ok()?;
        let host = location.host().ok()?;
        Some(self.socket_url(&protocol, &host))
    }
}
