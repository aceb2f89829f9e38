//! # Contract Proxies
//!
//! A [`Contract`] is built from an (address, ABI, signer) triple: the address
//! of a deployed contract, the `sol!` call types of [`abi`], and the account
//! that signs state-changing calls. Reads go through `eth_call`, writes through
//! `eth_sendTransaction` so the wallet signs them.

pub mod abi;

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolCall;
use tracing::{debug, instrument};

use crate::client::EthClient;
use crate::error::StakingError;
use abi::{IERC721Enumerable, IStaking};

/// Generic contract-call proxy.
#[derive(Clone)]
pub struct Contract {
    address: Address,
    client: EthClient,
    signer: Option<Address>,
}

impl Contract {
    pub fn new(address: Address, client: EthClient, signer: Option<Address>) -> Self {
        Self {
            address,
            client,
            signer,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Encode `call`, run it read-only and decode the return value.
    pub async fn call<C: SolCall>(&self, call: &C) -> Result<C::Return, StakingError> {
        let data = Bytes::from(call.abi_encode());
        let output = self.client.call(self.address, data).await?;
        Ok(C::abi_decode_returns(&output)?)
    }

    /// Encode `call` and hand it to the wallet as a transaction from the signer.
    pub async fn send<C: SolCall>(&self, call: &C) -> Result<B256, StakingError> {
        let from = self.signer.ok_or(StakingError::NotConnected)?;
        debug!(function = C::SIGNATURE, contract = %self.address, "sending transaction");
        let data = Bytes::from(call.abi_encode());
        Ok(self.client.send_transaction(from, self.address, data).await?)
    }
}

/// Typed proxy for one of the ERC-721 collections.
#[derive(Clone)]
pub struct NftContract {
    inner: Contract,
}

impl NftContract {
    pub fn new(address: Address, client: EthClient, signer: Option<Address>) -> Self {
        Self {
            inner: Contract::new(address, client, signer),
        }
    }

    pub fn address(&self) -> Address {
        self.inner.address()
    }

    pub async fn balance_of(&self, owner: Address) -> Result<U256, StakingError> {
        self.inner
            .call(&IERC721Enumerable::balanceOfCall { owner })
            .await
    }

    pub async fn token_of_owner_by_index(&self, owner: Address, index: U256) -> Result<U256, StakingError> {
        self.inner
            .call(&IERC721Enumerable::tokenOfOwnerByIndexCall { owner, index })
            .await
    }

    pub async fn is_approved_for_all(&self, owner: Address, operator: Address) -> Result<bool, StakingError> {
        self.inner
            .call(&IERC721Enumerable::isApprovedForAllCall { owner, operator })
            .await
    }

    #[instrument(skip(self), fields(collection = %self.address()))]
    pub async fn set_approval_for_all(&self, operator: Address, approved: bool) -> Result<B256, StakingError> {
        self.inner
            .send(&IERC721Enumerable::setApprovalForAllCall { operator, approved })
            .await
    }
}

/// Typed proxy for the staking contract.
#[derive(Clone)]
pub struct StakingContract {
    inner: Contract,
}

impl StakingContract {
    pub fn new(address: Address, client: EthClient, signer: Option<Address>) -> Self {
        Self {
            inner: Contract::new(address, client, signer),
        }
    }

    pub fn address(&self) -> Address {
        self.inner.address()
    }

    pub async fn stake(&self, cranium_ids: Vec<U256>, stallion_ids: Vec<U256>) -> Result<B256, StakingError> {
        self.inner
            .send(&IStaking::stakeCall {
                craniumIds: cranium_ids,
                stallionIds: stallion_ids,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockProvider;
    use std::rc::Rc;

    #[tokio::test]
    async fn test_call_round_trips_through_provider() {
        let collection = Address::repeat_byte(0x11);
        let owner = Address::repeat_byte(0xaa);
        let provider = Rc::new(
            MockProvider::new()
                .with_accounts(vec![owner])
                .with_tokens(collection, &[7, 9]),
        );
        let nft = NftContract::new(collection, EthClient::new(provider.clone()), Some(owner));

        assert_eq!(nft.balance_of(owner).await.unwrap(), U256::from(2u64));
        assert_eq!(
            nft.token_of_owner_by_index(owner, U256::from(1u64)).await.unwrap(),
            U256::from(9u64)
        );
    }

    #[tokio::test]
    async fn test_send_without_signer_is_not_connected() {
        let provider = Rc::new(MockProvider::new());
        let nft = NftContract::new(Address::repeat_byte(0x11), EthClient::new(provider.clone()), None);
        let err = nft
            .set_approval_for_all(Address::repeat_byte(0x33), true)
            .await
            .unwrap_err();
        assert_eq!(err, StakingError::NotConnected);
        assert!(provider.calls_for("eth_sendTransaction").is_empty());
    }

    #[tokio::test]
    async fn test_stake_encodes_both_arrays() {
        let staking = Address::repeat_byte(0x33);
        let owner = Address::repeat_byte(0xaa);
        let provider = Rc::new(MockProvider::new().with_accounts(vec![owner]));
        let contract = StakingContract::new(staking, EthClient::new(provider.clone()), Some(owner));

        contract
            .stake(vec![U256::from(1u64), U256::from(2u64)], vec![U256::from(5u64), U256::from(6u64)])
            .await
            .unwrap();

        let sent = provider.decoded::<IStaking::stakeCall>();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].craniumIds, vec![U256::from(1u64), U256::from(2u64)]);
        assert_eq!(sent[0].stallionIds, vec![U256::from(5u64), U256::from(6u64)]);
    }
}
