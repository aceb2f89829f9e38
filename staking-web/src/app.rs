//! Cranium Staking Web App - Leptos Frontend

use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes, A},
    path,
};
use lib_core::core_config;

use crate::components::{ChainInfo, ConnectorSelector, Navbar, SessionControls, StakingPanel};
use crate::services::connectors::build_registry;
use crate::state::connection::{provide_web3_context, use_web3_context};

#[component]
pub fn App() -> impl IntoView {
    let ctx = provide_web3_context(build_registry(core_config()));
    ctx.start_eager_connect();
    ctx.watch_provider_events();

    view! {
        <Router>
            <div class="app-container">
                <Navbar/>
                <Routes fallback=|| view! { <NotFound/> }>
                    <Route path=path!("/") view=HomePage/>
                </Routes>
            </div>
        </Router>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    let ctx = use_web3_context();
    let has_account = move || ctx.state.with(|state| state.active && state.account.is_some());

    view! {
        <main style="padding: 24px;">
            <ChainInfo/>
            <ConnectorSelector/>
            <SessionControls/>
            <Show when=has_account>
                <StakingPanel/>
            </Show>
        </main>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="app-container" style="display: flex; justify-content: center; align-items: center; min-height: calc(100vh - 60px);">
            <div class="card" style="max-width: 500px; text-align: center;">
                <h1 style="margin-bottom: 16px; font-size: 32px; font-weight: 700;">"404 - Page Not Found"</h1>
                <p style="margin-bottom: 24px;">"The page you're looking for doesn't exist."</p>
                <A href="/">
                    <span class="btn" style="margin-top: 20px; display: inline-block;">
                        "Go to Home"
                    </span>
                </A>
            </div>
        </div>
    }
}
