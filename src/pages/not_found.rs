use yew::prelude::*;
use yew_router::components::Link;

use crate::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="not-found" style="min-height: 100vh; display: flex; flex-direction: column; align-items: center; justify-content: center; background: #0d0c0b; color: #eee;">
            <h1>{"Nothing on this track"}</h1>
            <p>{"The page you were looking for doesn't exist."}</p>
            <Link<Route> to={Route::Home} classes="forward-link">
                {"Back to the mix"}
            </Link<Route>>
        </div>
    }
}
