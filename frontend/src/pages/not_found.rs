use crate::Route;
use yew::prelude::*;
use yew_router::components::Link;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div style="min-height: 100vh; display: flex; flex-direction: column; align-items: center; justify-content: center; gap: 1rem; background: #1a1a2e; color: white;">
            <h1 style="font-size: 3rem; margin: 0;">{"404"}</h1>
            <p style="color: #9ca3af;">{"This page doesn't exist."}</p>
            <Link<Route> to={Route::Home} classes="back-home-button">
                {"Back to PETAL"}
            </Link<Route>>
        </div>
    }
}
