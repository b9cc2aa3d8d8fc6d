use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod animation;
mod components;
mod pages {
    pub mod not_found;
    pub mod petal;
}

use pages::not_found::NotFound;
use pages::petal::PetalPage;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <PetalPage /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("Starting PETAL frontend");
    yew::Renderer::<App>::new().render();
}
