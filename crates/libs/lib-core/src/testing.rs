//! In-memory provider, connector and notifier used by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{SolCall, SolValue};
use async_trait::async_trait;
use lib_utils::quantity::{to_quantity, to_quantity_u256};
use serde_json::{json, Value};

use crate::config::Config;
use crate::connector::{
    Activation, Connector, ConnectorKind, SupportsExplicitClose, SupportsNetworkSwitch,
};
use crate::contracts::abi::IERC721Enumerable;
use crate::error::{ConnectionError, RpcError, UNSUPPORTED_METHOD_CODE};
use crate::notify::{Notice, Notifier};
use crate::provider::{Eip1193, EventSubscription, ProviderEvent};

const SAMPLE_CONFIG: &str = r#"{
    "contracts": {
        "cranium": "0x1111111111111111111111111111111111111111",
        "stallion": "0x2222222222222222222222222222222222222222",
        "staking": "0x3333333333333333333333333333333333333333"
    },
    "rpc_urls": { "1": "https://mainnet.example/rpc", "4": "https://rinkeby.example/rpc" }
}"#;

pub fn sample_config() -> Config {
    Config::from_json(SAMPLE_CONFIG).unwrap()
}

/// A wallet that answers from memory and records every request.
pub struct MockProvider {
    accounts: Vec<Address>,
    chain_id: u64,
    block_number: u64,
    balance: U256,
    tokens: HashMap<Address, Vec<u64>>,
    rejections: HashMap<String, RpcError>,
    failing: HashMap<Address, String>,
    approvals: RefCell<HashSet<(Address, Address, Address)>>,
    calls: RefCell<Vec<(String, Value)>>,
    listeners: Listeners,
    next_listener: Cell<usize>,
}

type Listeners = Rc<RefCell<Vec<(usize, Box<dyn FnMut(ProviderEvent)>)>>>;

/// Removes its listener from the provider when dropped.
struct MockListener {
    id: usize,
    listeners: Listeners,
}

impl Drop for MockListener {
    fn drop(&mut self) {
        self.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
    }
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
            chain_id: 1,
            block_number: 1,
            balance: U256::ZERO,
            tokens: HashMap::new(),
            rejections: HashMap::new(),
            failing: HashMap::new(),
            approvals: RefCell::new(HashSet::new()),
            calls: RefCell::new(Vec::new()),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_listener: Cell::new(0),
        }
    }

    pub fn with_accounts(mut self, accounts: Vec<Address>) -> Self {
        self.accounts = accounts;
        self
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn with_block_number(mut self, block_number: u64) -> Self {
        self.block_number = block_number;
        self
    }

    pub fn with_balance(mut self, balance: U256) -> Self {
        self.balance = balance;
        self
    }

    /// Token ids owned in `collection`, in index order.
    pub fn with_tokens(mut self, collection: Address, ids: &[u64]) -> Self {
        self.tokens.insert(collection, ids.to_vec());
        self
    }

    pub fn reject(mut self, method: &str, code: i64, message: &str) -> Self {
        self.rejections.insert(method.to_string(), RpcError::new(code, message));
        self
    }

    /// Revert every call and transaction sent to `contract`.
    pub fn fail_calls_to(mut self, contract: Address, message: &str) -> Self {
        self.failing.insert(contract, message.to_string());
        self
    }

    /// Params of every request for `method`.
    pub fn calls_for(&self, method: &str) -> Vec<Value> {
        self.calls
            .borrow()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, params)| params.clone())
            .collect()
    }

    /// Deliver `event` to every attached listener, as the wallet would.
    pub fn emit(&self, event: ProviderEvent) {
        for (_, listener) in self.listeners.borrow_mut().iter_mut() {
            listener(event.clone());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Every call or transaction whose calldata decodes as `C`.
    pub fn decoded<C: SolCall>(&self) -> Vec<C> {
        self.calls
            .borrow()
            .iter()
            .filter(|(m, _)| m == "eth_call" || m == "eth_sendTransaction")
            .filter_map(|(_, params)| serde_json::from_value::<Bytes>(params[0]["data"].clone()).ok())
            .filter(|data| data.starts_with(&C::SELECTOR))
            .filter_map(|data| C::abi_decode(&data).ok())
            .collect()
    }

    fn call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>, RpcError> {
        let owned = self.tokens.get(&to).map(Vec::as_slice).unwrap_or(&[]);
        if IERC721Enumerable::balanceOfCall::abi_decode(data).is_ok() {
            return Ok(U256::from(owned.len()).abi_encode());
        }
        if let Ok(call) = IERC721Enumerable::tokenOfOwnerByIndexCall::abi_decode(data) {
            let id = usize::try_from(call.index)
                .ok()
                .and_then(|index| owned.get(index))
                .ok_or_else(|| RpcError::new(-32000, "execution reverted: owner index out of bounds"))?;
            return Ok(U256::from(*id).abi_encode());
        }
        if let Ok(call) = IERC721Enumerable::isApprovedForAllCall::abi_decode(data) {
            let approved = self.approvals.borrow().contains(&(to, call.owner, call.operator));
            return Ok(approved.abi_encode());
        }
        Err(RpcError::new(-32000, "execution reverted"))
    }

    fn transact(&self, from: Address, to: Address, data: &[u8]) -> Result<B256, RpcError> {
        if let Ok(call) = IERC721Enumerable::setApprovalForAllCall::abi_decode(data) {
            let key = (to, from, call.operator);
            if call.approved {
                self.approvals.borrow_mut().insert(key);
            } else {
                self.approvals.borrow_mut().remove(&key);
            }
        }
        let count = self.calls.borrow().len();
        Ok(B256::with_last_byte(count as u8))
    }
}

fn field<T: serde::de::DeserializeOwned>(params: &Value, name: &str) -> Result<T, RpcError> {
    serde_json::from_value(params[0][name].clone())
        .map_err(|e| RpcError::new(-32602, format!("invalid {}: {}", name, e)))
}

#[async_trait(?Send)]
impl Eip1193 for MockProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        self.calls.borrow_mut().push((method.to_string(), params.clone()));
        if let Some(err) = self.rejections.get(method) {
            return Err(err.clone());
        }

        match method {
            "eth_accounts" | "eth_requestAccounts" => Ok(json!(self.accounts)),
            "eth_chainId" => Ok(json!(to_quantity(self.chain_id))),
            "eth_blockNumber" => Ok(json!(to_quantity(self.block_number))),
            "eth_getBalance" => Ok(json!(to_quantity_u256(self.balance))),
            "eth_call" | "eth_sendTransaction" => {
                let to: Address = field(&params, "to")?;
                let data: Bytes = field(&params, "data")?;
                if let Some(message) = self.failing.get(&to) {
                    return Err(RpcError::new(-32000, message.clone()));
                }
                if method == "eth_call" {
                    Ok(json!(Bytes::from(self.call(to, &data)?)))
                } else {
                    let from: Address = field(&params, "from")?;
                    Ok(json!(self.transact(from, to, &data)?))
                }
            }
            "personal_sign" => Ok(json!(format!("0x{}", "11".repeat(65)))),
            other => Err(RpcError::new(
                UNSUPPORTED_METHOD_CODE,
                format!("method {} not supported", other),
            )),
        }
    }

    fn subscribe(&self, on_event: Box<dyn FnMut(ProviderEvent)>) -> Option<EventSubscription> {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push((id, on_event));
        Some(EventSubscription::new(MockListener {
            id,
            listeners: self.listeners.clone(),
        }))
    }
}

/// A connector whose behaviour is fixed at construction.
pub struct MockConnector {
    kind: ConnectorKind,
    chain_id: Cell<u64>,
    account: Option<Address>,
    authorized: bool,
    rejects: bool,
    switch: Option<fn(u64) -> u64>,
    closable: bool,
    activations: Cell<usize>,
    closes: Cell<usize>,
    provider: Rc<MockProvider>,
}

impl MockConnector {
    pub fn new(kind: ConnectorKind) -> Self {
        let account = Address::repeat_byte(0xaa);
        Self {
            kind,
            chain_id: Cell::new(1),
            account: Some(account),
            authorized: false,
            rejects: false,
            switch: None,
            closable: false,
            activations: Cell::new(0),
            closes: Cell::new(0),
            provider: Rc::new(MockProvider::new().with_accounts(vec![account])),
        }
    }

    pub fn with_chain_id(self, chain_id: u64) -> Self {
        self.chain_id.set(chain_id);
        self
    }

    pub fn authorized(mut self) -> Self {
        self.authorized = true;
        self
    }

    /// Every activation fails the way a dismissed wallet prompt does.
    pub fn rejecting(mut self) -> Self {
        self.rejects = true;
        self
    }

    pub fn switching(mut self, target: fn(u64) -> u64) -> Self {
        self.switch = Some(target);
        self
    }

    pub fn closable(mut self) -> Self {
        self.closable = true;
        self
    }

    pub fn account(&self) -> Option<Address> {
        self.account
    }

    pub fn activations(&self) -> usize {
        self.activations.get()
    }

    pub fn closes(&self) -> usize {
        self.closes.get()
    }

    pub fn provider(&self) -> Rc<MockProvider> {
        self.provider.clone()
    }

    fn activation(&self) -> Activation {
        Activation {
            provider: self.provider.clone(),
            account: self.account,
            chain_id: self.chain_id.get(),
        }
    }
}

#[async_trait(?Send)]
impl Connector for MockConnector {
    fn kind(&self) -> ConnectorKind {
        self.kind
    }

    async fn activate(&self) -> Result<Activation, ConnectionError> {
        self.activations.set(self.activations.get() + 1);
        if self.rejects {
            return Err(RpcError::new(4001, "User rejected the request.").into());
        }
        Ok(self.activation())
    }

    async fn is_authorized(&self) -> bool {
        self.authorized
    }

    fn as_network_switch(&self) -> Option<&dyn SupportsNetworkSwitch> {
        self.switch.map(|_| self as &dyn SupportsNetworkSwitch)
    }

    fn as_explicit_close(&self) -> Option<&dyn SupportsExplicitClose> {
        self.closable.then_some(self as &dyn SupportsExplicitClose)
    }
}

#[async_trait(?Send)]
impl SupportsNetworkSwitch for MockConnector {
    fn switch_target(&self, current: u64) -> u64 {
        self.switch.map_or(current, |target| target(current))
    }

    async fn switch_network(&self, chain_id: u64) -> Result<Activation, ConnectionError> {
        self.chain_id.set(chain_id);
        Ok(self.activation())
    }
}

#[async_trait(?Send)]
impl SupportsExplicitClose for MockConnector {
    fn close_label(&self) -> String {
        format!("Kill {} Session", self.name())
    }

    async fn close(&self) -> Result<(), ConnectionError> {
        self.closes.set(self.closes.get() + 1);
        Ok(())
    }
}

/// Keeps every notice for later inspection.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}
