//! Deactivate, Sign Message and the connector-specific session actions.

use leptos::prelude::*;
use leptos::task::spawn_local;
use lib_core::notify::{report, Action};
use lib_core::session::{self, available_actions, SessionAction};
use lib_core::{core_config, StakingError};

use crate::services::notifier::AlertNotifier;
use crate::state::connection::{use_web3_context, Web3Context};

#[component]
pub fn SessionControls() -> impl IntoView {
    let ctx = use_web3_context();

    let actions = move || {
        let connector = ctx.current_connector();
        let has_provider = ctx.provider().is_some();
        ctx.state
            .with(|state| available_actions(connector.as_deref(), state, has_provider))
    };

    view! {
        <div class="session-controls" style="display: flex; flex-wrap: wrap; justify-content: center; gap: 12px; margin: 24px auto;">
            {move || actions()
                .into_iter()
                .map(|action| {
                    let label = action.label();
                    let destructive = matches!(action, SessionAction::Deactivate | SessionAction::Close { .. });
                    let style = if destructive { "border-color: red;" } else { "" };
                    view! {
                        <button class="btn" style=style on:click=move |_| run(ctx, action.clone())>
                            {label}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

fn run(ctx: Web3Context, action: SessionAction) {
    match action {
        SessionAction::Deactivate => ctx.deactivate(),
        SessionAction::SignMessage => {
            let Some(client) = ctx.client() else {
                return;
            };
            let account = ctx.state.with_untracked(|state| state.account);
            spawn_local(async move {
                let result = session::sign_message(&client, account).await;
                report(
                    &AlertNotifier,
                    Action::SignMessage,
                    &result,
                    |signature| Some(signature.clone()),
                    StakingError::raw_message,
                );
            });
        }
        SessionAction::SwitchNetwork { .. } => {
            let Some(connector) = ctx.current_connector_untracked() else {
                return;
            };
            spawn_local(async move {
                let state = ctx.state.get_untracked();
                let kind = connector.kind();
                match session::switch_network(connector.as_ref(), &state, core_config()).await {
                    Ok(activation) => ctx.apply_activation(kind, activation),
                    Err(e) => ctx.apply_failure(kind, e),
                }
            });
        }
        SessionAction::Close { .. } => {
            let Some(connector) = ctx.current_connector_untracked() else {
                return;
            };
            spawn_local(async move {
                match session::close_session(connector.as_ref()).await {
                    Ok(()) => ctx.deactivate(),
                    Err(e) => log::error!("Failed to close {} session: {}", connector.kind(), e),
                }
            });
        }
    }
}
