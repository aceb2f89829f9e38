//! Navigation bar with the connection status indicator

use leptos::prelude::*;
use leptos_router::components::A;
use lib_core::display::status_indicator;

use crate::state::connection::use_web3_context;
use crate::utils::constants::APP_TITLE;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_web3_context();
    let status = move || ctx.state.with(|state| status_indicator(state.active, state.has_error()));

    view! {
        <nav>
            <div style="max-width: 1200px; margin: 0 auto; padding: 0 24px; display: flex; justify-content: space-between; align-items: center;">
                <A href="/" attr:class="nav-link-clean">
                    <span class="nav-title">{APP_TITLE}</span>
                </A>
                <span class="nav-status" title="Connection status">{status}</span>
            </div>
        </nav>
    }
}
