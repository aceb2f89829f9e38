//! Ethereum Provider Integration via wasm-bindgen
//!
//! JavaScript interop with EIP-1193 providers: the injected `window.ethereum`,
//! sessions built from the hosted / hardware wallet libraries loaded by the
//! page, and provider events.

use async_trait::async_trait;
use js_sys::{Array, Function, Reflect};
use lib_core::error::RpcError;
use lib_core::{Eip1193, EventSubscription, ProviderEvent};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

// ============================================================================
// PROVIDER BINDINGS (JavaScript Interop)
// ============================================================================

#[wasm_bindgen(inline_js = "
export function injectedProvider() {
    return window.ethereum || null;
}

export async function providerRequest(provider, method, params) {
    if (typeof provider.request === 'function') {
        return await provider.request({ method, params });
    }
    // Legacy providers only implement sendAsync.
    return await new Promise((resolve, reject) => {
        provider.sendAsync({ jsonrpc: '2.0', id: Date.now(), method, params }, (err, res) => {
            if (err) { reject(err); return; }
            if (res && res.error) { reject(res.error); return; }
            resolve(res ? res.result : null);
        });
    });
}

export function subscribe(provider, names, callback) {
    if (!provider || typeof provider.on !== 'function') {
        return null;
    }
    const handlers = names.map((name) => {
        const handler = (payload) => callback(name, payload === undefined ? null : payload);
        provider.on(name, handler);
        return [name, handler];
    });
    return () => {
        for (const [name, handler] of handlers) {
            if (typeof provider.removeListener === 'function') {
                provider.removeListener(name, handler);
            } else if (typeof provider.off === 'function') {
                provider.off(name, handler);
            }
        }
    };
}
")]
extern "C" {
    /// `window.ethereum`, if a browser extension injected one
    #[wasm_bindgen(js_name = injectedProvider)]
    fn injected_provider_js() -> JsValue;

    #[wasm_bindgen(js_name = providerRequest, catch)]
    async fn provider_request(provider: &JsValue, method: &str, params: JsValue) -> Result<JsValue, JsValue>;

    /// Attach `callback(name, payload)` for each event; returns the unsubscribe function or null
    #[wasm_bindgen(js_name = subscribe)]
    fn subscribe_js(provider: &JsValue, names: &Array, callback: &Closure<dyn FnMut(String, JsValue)>) -> JsValue;
}

// ============================================================================
// HOSTED AND HARDWARE WALLET SESSIONS
// ============================================================================

#[wasm_bindgen(inline_js = "
function requireGlobal(name) {
    const value = window[name];
    if (!value) {
        throw { code: -32601, message: 'NO_PROVIDER: ' + name + ' is not loaded' };
    }
    return value.default || value;
}

function rpcUrl(rpcUrls, chainId) {
    return rpcUrls[String(chainId)];
}

export async function createSession(kind, options, rpcUrls, chainId) {
    options = options || {};
    switch (kind) {
        case 'walletconnect': {
            const WalletConnectProvider = requireGlobal('WalletConnectProvider');
            const provider = new WalletConnectProvider({ rpc: rpcUrls, chainId, ...options });
            await provider.enable();
            return { provider, close: () => provider.disconnect ? provider.disconnect() : provider.close() };
        }
        case 'walletlink': {
            const WalletLink = requireGlobal('WalletLink');
            const walletLink = new WalletLink(options);
            const provider = walletLink.makeWeb3Provider(rpcUrl(rpcUrls, chainId), chainId);
            await provider.request({ method: 'eth_requestAccounts' });
            return { provider, close: () => walletLink.disconnect() };
        }
        case 'ledger':
        case 'trezor':
        case 'lattice': {
            const factoryName = options.global || ({ ledger: 'LedgerProvider', trezor: 'TrezorProvider', lattice: 'LatticeProvider' })[kind];
            const createProvider = requireGlobal(factoryName);
            const provider = await createProvider({ ...options, url: rpcUrl(rpcUrls, chainId), chainId });
            return { provider, close: null };
        }
        case 'frame': {
            const ethProvider = requireGlobal('ethProvider');
            const provider = ethProvider('frame');
            await provider.request({ method: 'eth_requestAccounts' });
            return { provider, close: null };
        }
        case 'authereum': {
            const Authereum = requireGlobal('Authereum');
            const authereum = new Authereum({ networkName: options.networkName || 'mainnet', ...options });
            const provider = authereum.getProvider();
            await provider.enable();
            return { provider, close: () => authereum.logout() };
        }
        case 'fortmatic': {
            const Fortmatic = requireGlobal('Fortmatic');
            const fortmatic = new Fortmatic(options.apiKey, options.network);
            const provider = fortmatic.getProvider();
            await provider.enable();
            return { provider, close: () => fortmatic.user.logout() };
        }
        case 'magic': {
            const Magic = requireGlobal('Magic');
            const magic = new Magic(options.apiKey, { network: { rpcUrl: rpcUrl(rpcUrls, chainId), chainId } });
            await magic.auth.loginWithMagicLink({ email: options.email });
            return { provider: magic.rpcProvider, close: () => magic.user.logout() };
        }
        case 'portis': {
            const Portis = requireGlobal('Portis');
            const portis = new Portis(options.dAppId, options.network || 'mainnet');
            const provider = portis.provider;
            await provider.enable();
            return {
                provider,
                close: () => portis.logout(),
                changeNetwork: (id) => portis.changeNetwork(id === 100 ? 'xdai' : 'mainnet'),
            };
        }
        case 'torus': {
            const Torus = requireGlobal('Torus');
            const torus = new Torus();
            await torus.init(options.initOptions || {});
            await torus.login(options.loginOptions || {});
            return { provider: torus.provider, close: () => torus.cleanUp() };
        }
        default:
            throw { code: -32601, message: 'NO_PROVIDER: unknown connector ' + kind };
    }
}

export async function callSession(session, name, arg) {
    const fn = session && session[name];
    if (typeof fn !== 'function') {
        throw { code: 4200, message: name + ' is not supported by this wallet' };
    }
    return await fn(arg);
}
")]
extern "C" {
    #[wasm_bindgen(js_name = createSession, catch)]
    async fn create_session_js(kind: &str, options: JsValue, rpc_urls: JsValue, chain_id: f64) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = callSession, catch)]
    async fn call_session_js(session: &JsValue, name: &str, arg: JsValue) -> Result<JsValue, JsValue>;
}

/// Marker the bridge puts in front of "library not loaded" messages.
const NO_PROVIDER_PREFIX: &str = "NO_PROVIDER";

// ============================================================================
// PROVIDER SERVICE
// ============================================================================

/// An EIP-1193 provider object living on the JavaScript side.
#[derive(Clone)]
pub struct JsProvider {
    inner: JsValue,
}

impl JsProvider {
    pub fn new(inner: JsValue) -> Self {
        Self { inner }
    }

    pub fn as_js(&self) -> &JsValue {
        &self.inner
    }
}

#[async_trait(?Send)]
impl Eip1193 for JsProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let params = to_js(&params)?;
        let result = provider_request(&self.inner, method, params)
            .await
            .map_err(rpc_error)?;
        if result.is_undefined() || result.is_null() {
            return Ok(Value::Null);
        }
        serde_wasm_bindgen::from_value(result)
            .map_err(|e| RpcError::internal(format!("unexpected {} response: {}", method, e)))
    }

    fn subscribe(&self, on_event: Box<dyn FnMut(ProviderEvent)>) -> Option<EventSubscription> {
        Some(EventSubscription::new(subscribe(self, on_event)))
    }
}

/// The injected provider, if any.
pub fn injected_provider() -> Option<JsProvider> {
    let provider = injected_provider_js();
    if provider.is_null() || provider.is_undefined() {
        None
    } else {
        Some(JsProvider::new(provider))
    }
}

/// A live session with one of the wallet libraries.
#[derive(Clone)]
pub struct WalletSession {
    inner: JsValue,
}

impl WalletSession {
    /// Open a session for the connector identified by `slug`.
    pub async fn open(slug: &str, options: &Value, rpc_urls: &Value, chain_id: u64) -> Result<Self, RpcError> {
        let inner = create_session_js(slug, to_js(options)?, to_js(rpc_urls)?, chain_id as f64)
            .await
            .map_err(rpc_error)?;
        Ok(Self { inner })
    }

    pub fn provider(&self) -> Result<JsProvider, RpcError> {
        let provider = Reflect::get(&self.inner, &JsValue::from_str("provider"))
            .map_err(|_| RpcError::internal("session has no provider"))?;
        Ok(JsProvider::new(provider))
    }

    pub async fn close(&self) -> Result<(), RpcError> {
        call_session_js(&self.inner, "close", JsValue::NULL)
            .await
            .map(|_| ())
            .map_err(rpc_error)
    }

    pub async fn change_network(&self, chain_id: u64) -> Result<(), RpcError> {
        call_session_js(&self.inner, "changeNetwork", JsValue::from_f64(chain_id as f64))
            .await
            .map(|_| ())
            .map_err(rpc_error)
    }
}

/// Whether `err` came from a missing wallet library rather than the wallet.
pub fn is_missing_provider(err: &RpcError) -> bool {
    err.message.starts_with(NO_PROVIDER_PREFIX)
}

/// Listener registration; dropping it detaches the listeners.
pub struct Subscription {
    unsubscribe: Option<Function>,
    _callback: Closure<dyn FnMut(String, JsValue)>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            if let Err(e) = unsubscribe.call0(&JsValue::NULL) {
                log::warn!("Failed to detach provider listeners: {:?}", e);
            }
        }
    }
}

/// Subscribe to every [`ProviderEvent`] the provider emits.
pub fn subscribe(provider: &JsProvider, mut on_event: impl FnMut(ProviderEvent) + 'static) -> Subscription {
    let names: Array = ProviderEvent::NAMES.iter().map(|name| JsValue::from_str(name)).collect();
    let callback = Closure::<dyn FnMut(String, JsValue)>::new(move |name: String, payload: JsValue| {
        let payload: Value = serde_wasm_bindgen::from_value(payload).unwrap_or(Value::Null);
        match ProviderEvent::parse(&name, &payload) {
            Some(event) => on_event(event),
            None => log::debug!("Ignoring provider event {}", name),
        }
    });
    let unsubscribe = subscribe_js(provider.as_js(), &names, &callback).dyn_into::<Function>().ok();
    Subscription {
        unsubscribe,
        _callback: callback,
    }
}

fn to_js(value: &Value) -> Result<JsValue, RpcError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| RpcError::internal(e.to_string()))
}

/// Provider errors are objects with `code` and `message`; anything else is internal.
fn rpc_error(err: JsValue) -> RpcError {
    let code = Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|code| code.as_f64())
        .map(|code| code as i64);
    let message = Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err));
    match code {
        Some(code) => RpcError::new(code, message),
        None => RpcError::internal(message),
    }
}
