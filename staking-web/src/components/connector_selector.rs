//! One button per registered wallet connector.

use leptos::prelude::*;
use lib_core::selector::button_state;
use lib_core::ConnectorKind;

use crate::state::connection::use_web3_context;
use crate::utils::format::button_badge;

#[component]
pub fn ConnectorSelector() -> impl IntoView {
    let ctx = use_web3_context();

    let buttons = ctx
        .connectors()
        .into_iter()
        .map(|(kind, name)| view! { <ConnectorButton kind=kind name=name/> })
        .collect_view();

    let error_message = move || {
        ctx.state
            .with(|state| state.error.as_ref().map(|e| e.user_message()))
    };

    view! {
        <div class="connector-grid" style="display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 12px; max-width: 800px; margin: 24px auto;">
            {buttons}
        </div>
        {move || error_message().map(|message| view! {
            <p class="connection-error" style="text-align: center; color: var(--bg-error, #ff4d4d);">{message}</p>
        })}
    }
}

#[component]
fn ConnectorButton(kind: ConnectorKind, name: &'static str) -> impl IntoView {
    let ctx = use_web3_context();
    let state = move || {
        let eager = ctx.eager.get();
        let marker = ctx.activating.get();
        ctx.state.with(|connection| button_state(kind, eager, marker, connection))
    };

    let border = move || {
        let button = state();
        let color = if button.activating {
            "orange"
        } else if button.connected {
            "green"
        } else {
            "#333333"
        };
        format!("border: 1px solid {}; padding: 12px; position: relative;", color)
    };

    view! {
        <button
            class="btn connector-btn"
            style=border
            disabled=move || state().disabled
            on:click=move |_| ctx.connect(kind)
        >
            <span class="connector-badge" style="position: absolute; left: 12px;">
                {move || button_badge(state())}
            </span>
            {name}
        </button>
    }
}
