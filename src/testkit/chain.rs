//! In-memory [`ChainClient`] for testing.
//!
//! [`ScriptedChain`] answers account queries from fixed tables and pops
//! broadcast and receipt results from queues, defaulting to success when a
//! queue is exhausted. Every broadcast is recorded so tests can assert on
//! nonces and gas prices exactly as they reached the "node".

use std::collections::{HashMap, VecDeque};

use alloy_primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{Receipt, SecretKey, TransferRequest};
use crate::error::DispatchError;
use crate::port::{ChainClient, ChainResult};

/// Scripted result of one `sign_and_send` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendScript {
    /// Broadcast accepted.
    Accept,
    /// Rejected as an underpriced replacement.
    Underpriced,
    /// Rejected with any other node error.
    Reject(String),
}

/// Scripted result of one `wait_for_receipt` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptScript {
    Success,
    /// Mined with a failed status.
    Reverted,
    /// Never mined; the call blocks forever.
    Pending,
}

#[derive(Default)]
struct State {
    balances: HashMap<Address, U256>,
    nonces: HashMap<Address, u64>,
    sends: VecDeque<SendScript>,
    sends_by_sender: HashMap<Address, VecDeque<SendScript>>,
    receipts: VecDeque<ReceiptScript>,
    estimates: VecDeque<Result<u64, String>>,
    broadcasts: Vec<TransferRequest>,
    estimate_calls: usize,
    hashes: u64,
}

/// A chain whose responses are fixed up front.
pub struct ScriptedChain {
    state: Mutex<State>,
    chain_id: u64,
    gas_price: u128,
    gas_limit: u64,
    connected: bool,
    gas_price_available: bool,
    advance_nonce: bool,
}

impl ScriptedChain {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            chain_id: 1,
            gas_price: 1_000_000_000,
            gas_limit: 21_000,
            connected: true,
            gas_price_available: true,
            advance_nonce: false,
        }
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn with_balance(mut self, address: Address, balance: U256) -> Self {
        self.state.get_mut().balances.insert(address, balance);
        self
    }

    pub fn with_nonce(mut self, address: Address, nonce: u64) -> Self {
        self.state.get_mut().nonces.insert(address, nonce);
        self
    }

    pub fn with_gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = gas_price;
        self
    }

    /// Gas limit returned by estimation once scripted estimates run out.
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Queue broadcast results shared by every sender.
    pub fn script_sends(mut self, sends: impl IntoIterator<Item = SendScript>) -> Self {
        self.state.get_mut().sends.extend(sends);
        self
    }

    /// Queue broadcast results for one sender only; checked before the shared queue.
    pub fn script_sends_for(
        mut self,
        sender: Address,
        sends: impl IntoIterator<Item = SendScript>,
    ) -> Self {
        self.state
            .get_mut()
            .sends_by_sender
            .entry(sender)
            .or_default()
            .extend(sends);
        self
    }

    pub fn script_receipts(mut self, receipts: impl IntoIterator<Item = ReceiptScript>) -> Self {
        self.state.get_mut().receipts.extend(receipts);
        self
    }

    /// Queue estimation results; `Err` carries the node's message.
    pub fn script_estimates(
        mut self,
        estimates: impl IntoIterator<Item = Result<u64, String>>,
    ) -> Self {
        self.state.get_mut().estimates.extend(estimates);
        self
    }

    /// Bump the sender's pending nonce on every accepted broadcast, as a node
    /// would once the transaction is in its pool.
    pub fn advance_nonce_on_broadcast(mut self) -> Self {
        self.advance_nonce = true;
        self
    }

    /// Fail every query with a connectivity error.
    pub fn disconnected(mut self) -> Self {
        self.connected = false;
        self
    }

    /// Fail gas price queries while account queries keep answering.
    pub fn fail_gas_price(mut self) -> Self {
        self.gas_price_available = false;
        self
    }

    /// Every request passed to `sign_and_send`, accepted or not.
    pub fn broadcasts(&self) -> Vec<TransferRequest> {
        self.state.lock().broadcasts.clone()
    }

    pub fn estimate_calls(&self) -> usize {
        self.state.lock().estimate_calls
    }

    fn online(&self) -> ChainResult<()> {
        if self.connected {
            Ok(())
        } else {
            Err(DispatchError::Connectivity("connection refused".into()))
        }
    }
}

impl Default for ScriptedChain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainClient for ScriptedChain {
    async fn is_connected(&self) -> bool {
        self.connected
    }

    async fn chain_id(&self) -> ChainResult<u64> {
        self.online()?;
        Ok(self.chain_id)
    }

    async fn balance(&self, address: Address) -> ChainResult<U256> {
        self.online()?;
        Ok(self
            .state
            .lock()
            .balances
            .get(&address)
            .copied()
            .unwrap_or_default())
    }

    async fn pending_nonce(&self, address: Address) -> ChainResult<u64> {
        self.online()?;
        Ok(self.state.lock().nonces.get(&address).copied().unwrap_or(0))
    }

    async fn gas_price(&self) -> ChainResult<u128> {
        self.online()?;
        if !self.gas_price_available {
            return Err(DispatchError::Connectivity("gas price unavailable".into()));
        }
        Ok(self.gas_price)
    }

    async fn estimate_gas(&self, _request: &TransferRequest) -> ChainResult<u64> {
        self.online()?;
        let mut state = self.state.lock();
        state.estimate_calls += 1;
        match state.estimates.pop_front() {
            Some(Ok(gas)) => Ok(gas),
            Some(Err(reason)) => Err(DispatchError::Estimation(reason)),
            None => Ok(self.gas_limit),
        }
    }

    async fn sign_and_send(
        &self,
        request: &TransferRequest,
        _key: &SecretKey,
    ) -> ChainResult<TxHash> {
        self.online()?;
        let mut guard = self.state.lock();
        let state = &mut *guard;
        state.broadcasts.push(request.clone());

        let script = state
            .sends_by_sender
            .get_mut(&request.from)
            .and_then(VecDeque::pop_front)
            .or_else(|| state.sends.pop_front())
            .unwrap_or(SendScript::Accept);

        match script {
            SendScript::Accept => {
                if self.advance_nonce {
                    let next = request.nonce + 1;
                    let nonce = state.nonces.entry(request.from).or_insert(0);
                    *nonce = (*nonce).max(next);
                }
                state.hashes += 1;
                Ok(TxHash::left_padding_from(&state.hashes.to_be_bytes()))
            }
            SendScript::Underpriced => Err(DispatchError::UnderpricedReplacement(
                "replacement transaction underpriced".into(),
            )),
            SendScript::Reject(reason) => Err(DispatchError::Submission(reason)),
        }
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> ChainResult<Receipt> {
        self.online()?;
        let script = self
            .state
            .lock()
            .receipts
            .pop_front()
            .unwrap_or(ReceiptScript::Success);

        match script {
            ReceiptScript::Success | ReceiptScript::Reverted => Ok(Receipt {
                tx_hash,
                success: script == ReceiptScript::Success,
                block_number: Some(1),
                gas_used: self.gas_limit,
            }),
            ReceiptScript::Pending => std::future::pending().await,
        }
    }
}
