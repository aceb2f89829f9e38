//! Staking Panel - approve both collections, pick token pairs, stake

use std::collections::BTreeMap;

use leptos::prelude::*;
use leptos::task::spawn_local;
use lib_core::notify::{report, Action};
use lib_core::staking::{OwnedTokens, StakeSelection};
use lib_core::{core_config, Collection, StakingError, StakingService};

use crate::services::notifier::AlertNotifier;
use crate::state::connection::use_web3_context;
use crate::utils::format::{approve_label, selected_label, stake_label, token_label};

#[component]
pub fn StakingPanel() -> impl IntoView {
    let ctx = use_web3_context();
    let selection = RwSignal::new(StakeSelection::new());
    let approved = RwSignal::new(BTreeMap::<Collection, bool>::new());
    // Actions whose request is still out; their buttons stay disabled.
    let pending = RwSignal::new(Vec::<Action>::new());

    let service = move || -> Result<StakingService, StakingError> {
        let provider = ctx.provider().ok_or(StakingError::NotConnected)?;
        let account = ctx.state.with_untracked(|state| state.account);
        StakingService::new(core_config(), provider, account)
    };
    let is_pending = move |action: Action| pending.with(|actions| actions.contains(&action));
    let begin = move |action: Action| pending.update(|actions| actions.push(action));
    let finish = move |action: Action| pending.update(|actions| actions.retain(|a| *a != action));

    // A new account or chain starts from a clean slate.
    let session = Memo::new(move |_| ctx.state.with(|state| (state.active, state.account, state.chain_id)));
    Effect::new(move |_| {
        let (active, account, _) = session.get();
        let connected = active && account.is_some();
        selection.set(StakeSelection::new());
        approved.set(BTreeMap::new());
        if !connected {
            return;
        }
        let Ok(service) = service() else {
            return;
        };
        spawn_local(async move {
            for collection in Collection::ALL {
                match service.is_approved(collection).await {
                    Ok(is_approved) => approved.update(|map| {
                        map.insert(collection, is_approved);
                    }),
                    Err(e) => log::warn!("Could not read {} approval: {}", collection, e),
                }
            }
        });
    });

    let on_approve = move |collection: Collection| {
        let action = Action::Approve(collection);
        if is_pending(action) {
            return;
        }
        begin(action);
        spawn_local(async move {
            let result = match service() {
                Ok(service) => service.approve(collection).await,
                Err(e) => Err(e),
            };
            report(
                &AlertNotifier,
                action,
                &result,
                |hash| Some(format!("Transaction {}", hash)),
                StakingError::raw_message,
            );
            if result.is_ok() {
                approved.update(|map| {
                    map.insert(collection, true);
                });
            }
            finish(action);
        });
    };

    let on_fetch = move |_| {
        let actions = Collection::ALL.map(Action::Fetch);
        if actions.iter().any(|action| is_pending(*action)) {
            return;
        }
        actions.iter().for_each(|action| begin(*action));
        spawn_local(async move {
            let owned = match service() {
                Ok(service) => service.fetch_all_owned().await,
                Err(e) => OwnedTokens {
                    craniums: Err(e.clone()),
                    stallions: Err(e),
                },
            };
            for collection in Collection::ALL {
                let result = owned.get(collection);
                report(
                    &AlertNotifier,
                    Action::Fetch(collection),
                    result,
                    |ids| Some(format!("{} owned", ids.len())),
                    StakingError::raw_message,
                );
                // A failed collection keeps whatever it showed before.
                if let Ok(ids) = result {
                    selection.update(|s| s.get_mut(collection).set_owned(ids.clone()));
                }
                finish(Action::Fetch(collection));
            }
        });
    };

    let on_stake = move |_| {
        if is_pending(Action::Stake) {
            return;
        }
        begin(Action::Stake);
        let current = selection.get_untracked();
        spawn_local(async move {
            let result = match service() {
                Ok(service) => service.stake(&current).await,
                Err(e) => Err(e),
            };
            report(
                &AlertNotifier,
                Action::Stake,
                &result,
                |hash| Some(format!("Transaction {}", hash)),
                StakingError::raw_message,
            );
            finish(Action::Stake);
        });
    };

    let approve_buttons = Collection::ALL
        .into_iter()
        .map(|collection| {
            view! {
                <button
                    class="btn"
                    disabled=move || is_pending(Action::Approve(collection))
                    on:click=move |_| on_approve(collection)
                >
                    {move || approve_label(collection, approved.with(|map| map.get(&collection).copied()))}
                </button>
            }
        })
        .collect_view();

    let fetching = move || Collection::ALL.iter().any(|c| is_pending(Action::Fetch(*c)));
    let stake_disabled = move || is_pending(Action::Stake) || !selection.with(StakeSelection::can_stake);

    view! {
        <div class="card staking-panel" style="max-width: 800px; margin: 24px auto;">
            <h2 class="card-title">"Stake"</h2>
            <div style="display: flex; gap: 12px; margin-bottom: 16px;">
                {approve_buttons}
                <button class="btn" disabled=fetching on:click=on_fetch>"Fetch NFTs"</button>
            </div>
            <div style="display: grid; grid-template-columns: 1fr 1fr; gap: 24px;">
                <TokenList collection=Collection::Cranium selection=selection/>
                <TokenList collection=Collection::Stallion selection=selection/>
            </div>
            <button class="btn" style="width: 100%; margin-top: 16px;" disabled=stake_disabled on:click=on_stake>
                {move || selection.with(stake_label)}
            </button>
        </div>
    }
}

#[component]
fn TokenList(collection: Collection, selection: RwSignal<StakeSelection>) -> impl IntoView {
    let owned = move || selection.with(|s| s.get(collection).owned().to_vec());

    view! {
        <div class="token-list">
            <h3>{collection.plural()}</h3>
            <p class="label">{move || selection.with(|s| selected_label(s.get(collection)))}</p>
            {move || {
                owned()
                    .into_iter()
                    .map(|id| {
                        view! {
                            <label class="token-item" style="display: block;">
                                <input
                                    type="checkbox"
                                    prop:checked=move || selection.with(|s| s.get(collection).is_checked(id))
                                    on:change=move |ev| {
                                        let checked = event_target_checked(&ev);
                                        selection.update(|s| s.get_mut(collection).toggle(id, checked));
                                    }
                                />
                                " "
                                {token_label(id)}
                            </label>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
