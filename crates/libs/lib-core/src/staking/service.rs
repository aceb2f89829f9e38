//! # Staking Service
//!
//! The three user-triggered steps of the staking panel:
//!
//! 1. **Approve** a collection, naming the staking contract as operator.
//! 2. **Fetch** the token ids the connected account owns in each collection.
//! 3. **Stake** the checked Cranium and Stallion ids together.
//!
//! Each step returns an explicit `Result`; presenting the outcome is left to
//! the caller (see [`crate::notify`]). Nothing is retried and nothing is
//! rolled back.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lib_core::staking::{Collection, StakingService};
//! # async fn example(config: &lib_core::Config, provider: std::rc::Rc<dyn lib_core::Eip1193>, account: alloy_primitives::Address) -> Result<(), lib_core::error::StakingError> {
//! let service = StakingService::new(config, provider, Some(account))?;
//! service.approve(Collection::Cranium).await?;
//! let owned = service.fetch_owned(Collection::Cranium).await?;
//! # Ok(())
//! # }
//! ```

use std::rc::Rc;

use alloy_primitives::{Address, B256, U256};
use futures::future::try_join_all;
use tracing::{info, instrument, warn};

use super::{Collection, StakeSelection, TokenId};
use crate::client::EthClient;
use crate::config::{Config, ContractAddresses};
use crate::contracts::{NftContract, StakingContract};
use crate::error::StakingError;
use crate::provider::Eip1193;

/// Upper bound on `balanceOf` before we refuse to enumerate one lookup per token.
pub const MAX_ENUMERATED_TOKENS: u64 = 1_000;

/// Result of fetching both collections; each side succeeds or fails on its own.
#[derive(Debug)]
pub struct OwnedTokens {
    pub craniums: Result<Vec<TokenId>, StakingError>,
    pub stallions: Result<Vec<TokenId>, StakingError>,
}

impl OwnedTokens {
    pub fn get(&self, collection: Collection) -> &Result<Vec<TokenId>, StakingError> {
        match collection {
            Collection::Cranium => &self.craniums,
            Collection::Stallion => &self.stallions,
        }
    }
}

/// Staking operations for one connected account.
pub struct StakingService {
    contracts: ContractAddresses,
    client: EthClient,
    account: Address,
}

impl StakingService {
    /// Bind the service to a provider and the connected account.
    ///
    /// # Errors
    ///
    /// [`StakingError::NotConnected`] when there is no account.
    pub fn new(config: &Config, provider: Rc<dyn Eip1193>, account: Option<Address>) -> Result<Self, StakingError> {
        let account = account.ok_or(StakingError::NotConnected)?;
        Ok(Self {
            contracts: config.contracts.clone(),
            client: EthClient::new(provider),
            account,
        })
    }

    pub fn account(&self) -> Address {
        self.account
    }

    fn collection(&self, collection: Collection) -> NftContract {
        NftContract::new(
            self.contracts.collection(collection),
            self.client.clone(),
            Some(self.account),
        )
    }

    fn staking(&self) -> StakingContract {
        StakingContract::new(self.contracts.staking, self.client.clone(), Some(self.account))
    }

    /// Approve the staking contract to transfer every token of `collection`.
    #[instrument(skip(self), fields(account = %self.account))]
    pub async fn approve(&self, collection: Collection) -> Result<B256, StakingError> {
        let hash = self
            .collection(collection)
            .set_approval_for_all(self.contracts.staking, true)
            .await
            .inspect_err(|e| warn!(%collection, error = %e, "approval failed"))?;
        info!(%collection, %hash, "approval submitted");
        Ok(hash)
    }

    /// Whether the staking contract is already an approved operator.
    pub async fn is_approved(&self, collection: Collection) -> Result<bool, StakingError> {
        self.collection(collection)
            .is_approved_for_all(self.account, self.contracts.staking)
            .await
    }

    /// Token ids the account owns in `collection`, in index order.
    ///
    /// `balanceOf` resolves first; then one `tokenOfOwnerByIndex` lookup per
    /// owned token is issued concurrently. Any failing lookup fails the whole
    /// collection.
    #[instrument(skip(self), fields(account = %self.account))]
    pub async fn fetch_owned(&self, collection: Collection) -> Result<Vec<TokenId>, StakingError> {
        let contract = self.collection(collection);
        let balance = contract.balance_of(self.account).await?;
        let count = u64::try_from(balance)
            .ok()
            .filter(|count| *count <= MAX_ENUMERATED_TOKENS)
            .ok_or(StakingError::TooManyTokens {
                collection,
                balance,
                limit: MAX_ENUMERATED_TOKENS,
            })?;

        let lookups = (0..count).map(|index| {
            let contract = contract.clone();
            let owner = self.account;
            async move { contract.token_of_owner_by_index(owner, U256::from(index)).await }
        });
        let ids: Vec<TokenId> = try_join_all(lookups)
            .await?
            .into_iter()
            .map(TokenId::from)
            .collect();

        info!(%collection, count = ids.len(), "owned tokens fetched");
        Ok(ids)
    }

    /// Fetch both collections independently.
    pub async fn fetch_all_owned(&self) -> OwnedTokens {
        let (craniums, stallions) = futures::join!(
            self.fetch_owned(Collection::Cranium),
            self.fetch_owned(Collection::Stallion)
        );
        OwnedTokens { craniums, stallions }
    }

    /// Stake the checked ids of both collections in one transaction.
    ///
    /// # Errors
    ///
    /// [`StakingError::InvalidSelection`] before anything is sent when the
    /// checked sets are empty or of different sizes.
    #[instrument(skip_all, fields(account = %self.account))]
    pub async fn stake(&self, selection: &StakeSelection) -> Result<B256, StakingError> {
        selection.validate()?;
        let craniums: Vec<U256> = selection.craniums.checked().iter().map(TokenId::as_u256).collect();
        let stallions: Vec<U256> = selection.stallions.checked().iter().map(TokenId::as_u256).collect();
        let pairs = craniums.len();

        let hash = self
            .staking()
            .stake(craniums, stallions)
            .await
            .inspect_err(|e| warn!(error = %e, "stake failed"))?;
        info!(pairs, %hash, "stake submitted");
        Ok(hash)
    }
}
