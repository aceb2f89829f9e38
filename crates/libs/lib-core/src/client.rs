//! # Ethereum JSON-RPC Client
//!
//! Typed wrappers over the handful of JSON-RPC methods the dApp needs, built
//! on any [`Eip1193`] provider handle.

use std::rc::Rc;

use alloy_primitives::{hex, Address, Bytes, B256, U256};
use lib_utils::quantity::{parse_quantity, parse_quantity_u256};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::error::RpcError;
use crate::provider::Eip1193;

/// Thin typed client over a shared provider handle.
#[derive(Clone)]
pub struct EthClient {
    provider: Rc<dyn Eip1193>,
}

impl EthClient {
    pub fn new(provider: Rc<dyn Eip1193>) -> Self {
        Self { provider }
    }

    /// Accounts the site is already authorized for; never prompts.
    pub async fn accounts(&self) -> Result<Vec<Address>, RpcError> {
        let value = self.provider.request("eth_accounts", json!([])).await?;
        decode("eth_accounts", value)
    }

    /// Ask the wallet for account access, prompting the user if needed.
    pub async fn request_accounts(&self) -> Result<Vec<Address>, RpcError> {
        let value = self.provider.request("eth_requestAccounts", json!([])).await?;
        decode("eth_requestAccounts", value)
    }

    pub async fn chain_id(&self) -> Result<u64, RpcError> {
        let value = self.provider.request("eth_chainId", json!([])).await?;
        quantity("eth_chainId", &value)
    }

    pub async fn block_number(&self) -> Result<u64, RpcError> {
        let value = self.provider.request("eth_blockNumber", json!([])).await?;
        quantity("eth_blockNumber", &value)
    }

    /// Native balance in wei at the latest block.
    pub async fn balance(&self, address: Address) -> Result<U256, RpcError> {
        let value = self
            .provider
            .request("eth_getBalance", json!([address, "latest"]))
            .await?;
        let text = value
            .as_str()
            .ok_or_else(|| RpcError::internal("eth_getBalance returned a non-string value"))?;
        parse_quantity_u256(text).map_err(|e| RpcError::internal(e.to_string()))
    }

    /// Read-only contract call at the latest block.
    #[instrument(skip_all, fields(to = %to))]
    pub async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, RpcError> {
        let value = self
            .provider
            .request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await?;
        decode("eth_call", value)
    }

    /// Submit a transaction for the wallet to sign and broadcast. Returns the
    /// transaction hash once the wallet accepted it; mining is not awaited.
    #[instrument(skip_all, fields(from = %from, to = %to))]
    pub async fn send_transaction(&self, from: Address, to: Address, data: Bytes) -> Result<B256, RpcError> {
        let value = self
            .provider
            .request(
                "eth_sendTransaction",
                json!([{ "from": from, "to": to, "data": data }]),
            )
            .await?;
        let hash: B256 = decode("eth_sendTransaction", value)?;
        debug!(%hash, "transaction submitted");
        Ok(hash)
    }

    /// `personal_sign` of a UTF-8 message; returns the hex signature.
    pub async fn personal_sign(&self, account: Address, message: &str) -> Result<String, RpcError> {
        let payload = format!("0x{}", hex::encode(message.as_bytes()));
        let value = self
            .provider
            .request("personal_sign", json!([payload, account]))
            .await?;
        decode("personal_sign", value)
    }
}

fn decode<T: DeserializeOwned>(method: &str, value: Value) -> Result<T, RpcError> {
    serde_json::from_value(value)
        .map_err(|e| RpcError::internal(format!("unexpected {} response: {}", method, e)))
}

fn quantity(method: &str, value: &Value) -> Result<u64, RpcError> {
    match value {
        Value::String(s) => parse_quantity(s).map_err(|e| RpcError::internal(e.to_string())),
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| RpcError::internal(format!("{} returned a negative number", method))),
        other => Err(RpcError::internal(format!(
            "unexpected {} response: {}",
            method, other
        ))),
    }
}
