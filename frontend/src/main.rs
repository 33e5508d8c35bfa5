use log::{info, Level};
use yew::prelude::*;

mod config;
mod animation {
    pub mod animator;
    pub mod clones;
    pub mod driver;
    pub mod layout;
    pub mod phase;
    pub mod reveal;
    pub mod scrub;
    pub mod style;
    pub mod triggers;
    pub mod tween;
    #[cfg(test)]
    pub mod testing;
}
mod dom {
    pub mod binding;
    pub mod elements;
    pub mod sections;
    pub mod surface;
}
mod pages {
    pub mod hero;
    pub mod marquee;
}

use pages::hero::HeroPage;

#[function_component]
fn App() -> Html {
    html! {
        <main>
            <HeroPage />
        </main>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting hero page");
    yew::Renderer::<App>::new().render();
}
