mod channel;
mod components;
mod config;
mod error;
mod model;
mod protocol;
mod scene;
mod session;
mod viewport;

use components::app::App;

fn main() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }

    tracing::info!("starting grid duel client");
    yew::Renderer::<App>::new().render();
}
