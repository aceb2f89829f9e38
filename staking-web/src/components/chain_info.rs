//! Chain-state header: chain id, latest block, account and balance.

use alloy_primitives::U256;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use lib_core::core_config;
use lib_core::display::{
    account_label, balance_label, block_label, chain_label, load_balance, load_block_number, network_label,
    Fetched, StaleGuard,
};

use crate::state::connection::use_web3_context;

#[component]
pub fn ChainInfo() -> impl IntoView {
    let ctx = use_web3_context();
    let block = RwSignal::new(Fetched::<u64>::Pending);
    let balance = RwSignal::new(Fetched::<U256>::Pending);

    // Poll the block number for as long as this chain stays connected.
    Effect::new(move |_| {
        let (chain_id, active) = ctx.state.with(|state| (state.chain_id, state.active));
        block.set(Fetched::Pending);
        let Some(client) = ctx.client().filter(|_| active && chain_id.is_some()) else {
            return;
        };

        let guard = StaleGuard::new();
        let teardown = guard.clone();
        on_cleanup(move || teardown.mark_stale());

        let interval = core_config().polling_interval_ms;
        spawn_local(async move {
            while let Some(fetched) = load_block_number(&client, &guard).await {
                block.set(fetched);
                TimeoutFuture::new(interval).await;
                if guard.is_stale() {
                    break;
                }
            }
        });
    });

    Effect::new(move |_| {
        let (account, chain_id) = ctx.state.with(|state| (state.account, state.chain_id));
        balance.set(Fetched::Pending);
        let (Some(account), Some(client), Some(_)) = (account, ctx.client(), chain_id) else {
            return;
        };

        let guard = StaleGuard::new();
        let teardown = guard.clone();
        on_cleanup(move || teardown.mark_stale());

        spawn_local(async move {
            if let Some(fetched) = load_balance(&client, account, &guard).await {
                balance.set(fetched);
            }
        });
    });

    view! {
        <div class="card chain-info" style="display: grid; grid-template-columns: auto auto; gap: 8px 24px; max-width: 420px; margin: 0 auto;">
            <span class="label">"Chain Id"</span>
            <span>{move || ctx.state.with(|state| chain_label(state.chain_id))}</span>

            <span class="label">"Network"</span>
            <span>{move || ctx.state.with(|state| network_label(state.chain_id))}</span>

            <span class="label">"Block Number"</span>
            <span>{move || block.with(block_label)}</span>

            <span class="label">"Account"</span>
            <span style="font-family: monospace;">
                {move || ctx.state.with(|state| account_label(state.active, state.account))}
            </span>

            <span class="label">"Balance"</span>
            <span>{move || balance.with(balance_label)}</span>
        </div>
    }
}
