//! In-memory chain for testing challenge steps.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Mutex, MutexGuard},
};

use alloy_sol_types::SolCall;
use headsmith_block_header::{BlockHeaderFields, Era, RemoteBlockHeader, encode_header};
use headsmith_block_variant::{HeaderVariantSpec, encode_variant};
use headsmith_create2::create2_address;
use headsmith_primitives::{Address, B256, Bytes, U256, address, keccak256};
use serde_json::Value;

use crate::{
    IFactory, IFactoryChild, IHeaderChallenge,
    chain::{
        BoxedError, CallOutcome, ChainReader, ChainWriter, ContractCall, RawRequestError,
        TransactionReceipt,
    },
};

/// Default sender of [`FakeChain`] transactions.
pub const TEST_ACCOUNT: Address = address!("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");

/// Runtime code of contracts deployed on a [`FakeChain`].
pub const TEST_RUNTIME_CODE: [u8; 2] = [0x60, 0x00];

/// How a [`FakeChain`] hashes headers for `BLOCKHASH`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CanonicalHeader {
    /// The canonical encoding of an era
    Era(Era),
    /// A header variant
    Variant(HeaderVariantSpec),
    /// No encoding that can be produced from the header fields
    Unmatchable,
}

/// A transaction received by a [`FakeChain`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentTransaction {
    /// The recipient, `None` for contract creations and raw transactions
    pub to: Option<Address>,
    /// The call data, creation code, or raw transaction
    pub data: Bytes,
}

#[derive(Debug)]
struct State {
    height: u64,
    poll_advances: VecDeque<u64>,
    code: HashMap<Address, Bytes>,
    storage: HashMap<(Address, U256), B256>,
    raw_responses: HashMap<String, Value>,
    raw_requests: Vec<String>,
    simulated_headers: Vec<Bytes>,
    sent: Vec<SentTransaction>,
    receipts: HashMap<B256, TransactionReceipt>,
    premints: Vec<u64>,
}

/// An in-memory chain whose blocks all share the fields of a template.
///
/// The chain height advances by one block per transaction and, unless
/// configured otherwise, by one block per `block_number` request. The header
/// challenge contract accepts a header if its hash equals the canonical hash
/// of the block two blocks after the sender's latest premint.
#[derive(Debug)]
pub struct FakeChain {
    chain_id: u64,
    account: Address,
    template: BlockHeaderFields,
    reported_era: Era,
    canonical: CanonicalHeader,
    state: Mutex<State>,
}

impl FakeChain {
    /// Constructs a chain at height 100 that reports the hash of headers
    /// encoded for `reported_era`, which is also the canonical encoding.
    pub fn new(chain_id: u64, template: BlockHeaderFields, reported_era: Era) -> Self {
        Self {
            chain_id,
            account: TEST_ACCOUNT,
            template,
            reported_era,
            canonical: CanonicalHeader::Era(reported_era),
            state: Mutex::new(State {
                height: 100,
                poll_advances: VecDeque::new(),
                code: HashMap::new(),
                storage: HashMap::new(),
                raw_responses: HashMap::new(),
                raw_requests: Vec::new(),
                simulated_headers: Vec::new(),
                sent: Vec::new(),
                receipts: HashMap::new(),
                premints: Vec::new(),
            }),
        }
    }

    /// Replaces the encoding that `BLOCKHASH` hashes.
    pub fn with_canonical_header(mut self, canonical: CanonicalHeader) -> Self {
        self.canonical = canonical;
        self
    }

    /// Sets how far the height advances on consecutive `block_number`
    /// requests. Afterwards, it advances by one.
    pub fn with_poll_advances(self, advances: impl IntoIterator<Item = u64>) -> Self {
        self.state().poll_advances.extend(advances);
        self
    }

    /// Sets the response of a debug method. Other debug methods are
    /// rejected.
    pub fn with_raw_response(self, method: &str, response: Value) -> Self {
        self.state()
            .raw_responses
            .insert(method.to_owned(), response);
        self
    }

    /// Deploys code at an address.
    pub fn with_code(self, address: Address, code: Bytes) -> Self {
        self.state().code.insert(address, code);
        self
    }

    /// Sets a storage slot.
    pub fn with_storage(self, address: Address, slot: U256, value: B256) -> Self {
        self.state().storage.insert((address, slot), value);
        self
    }

    /// The header of the block with the provided number.
    pub fn header_at(&self, number: u64) -> RemoteBlockHeader {
        let fields = BlockHeaderFields {
            number,
            ..self.template.clone()
        };

        RemoteBlockHeader {
            hash: Some(fields.hash_for_era(self.reported_era)),
            fields,
        }
    }

    /// The hash that `BLOCKHASH` returns for the block.
    pub fn canonical_hash(&self, number: u64) -> B256 {
        let fields = self.header_at(number).fields;
        match self.canonical {
            CanonicalHeader::Era(era) => keccak256(encode_header(&fields, era)),
            CanonicalHeader::Variant(spec) => keccak256(encode_variant(&fields, &spec)),
            CanonicalHeader::Unmatchable => B256::repeat_byte(0xee),
        }
    }

    /// The current height.
    pub fn height(&self) -> u64 {
        self.state().height
    }

    /// The blocks that included premints, in order.
    pub fn premint_blocks(&self) -> Vec<u64> {
        self.state().premints.clone()
    }

    /// The headers passed to simulated `mintFlag` calls, in order.
    pub fn simulated_headers(&self) -> Vec<Bytes> {
        self.state().simulated_headers.clone()
    }

    /// The requested debug methods, in order.
    pub fn raw_requests(&self) -> Vec<String> {
        self.state().raw_requests.clone()
    }

    /// The received transactions, in order.
    pub fn sent_transactions(&self) -> Vec<SentTransaction> {
        self.state().sent.clone()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("lock poisoned")
    }

    /// Whether `mintFlag(header)` succeeds on top of block `block_number`.
    fn accepts_header(&self, state: &State, header: &[u8], block_number: u64) -> bool {
        state.premints.last().is_some_and(|premint| {
            let target = premint + 2;
            block_number > target && keccak256(header) == self.canonical_hash(target)
        })
    }

    fn mine(&self, to: Option<Address>, data: Bytes) -> B256 {
        let mut state = self.state();
        state.height += 1;
        let block_number = state.height;

        let transaction_hash = keccak256([&block_number.to_be_bytes()[..], &data[..]].concat());
        let mut contract_address = None;

        let success = match to {
            None => {
                let address = Address::from_word(transaction_hash);
                state.code.insert(address, Bytes::from_static(&TEST_RUNTIME_CODE));
                contract_address = Some(address);
                true
            }
            Some(to) => {
                if let Ok(call) = IFactory::deployWithSaltCall::abi_decode(&data) {
                    let address = create2_address(&to, &call.salt, &keccak256(&call.bytecode));
                    state.code.insert(address, Bytes::from_static(&TEST_RUNTIME_CODE));
                    true
                } else if IHeaderChallenge::preMintFlagCall::abi_decode(&data).is_ok() {
                    state.premints.push(block_number);
                    true
                } else if let Ok(call) = IHeaderChallenge::mintFlagCall::abi_decode(&data) {
                    self.accepts_header(&state, &call.header, block_number)
                } else if IFactoryChild::callMintCall::abi_decode(&data).is_ok() {
                    state.code.contains_key(&to)
                } else {
                    true
                }
            }
        };

        state.sent.push(SentTransaction { to, data });
        state.receipts.insert(
            transaction_hash,
            TransactionReceipt {
                transaction_hash,
                block_number,
                contract_address,
                success,
            },
        );

        transaction_hash
    }
}

impl ChainReader for FakeChain {
    async fn chain_id(&self) -> Result<u64, BoxedError> {
        Ok(self.chain_id)
    }

    async fn block_number(&self) -> Result<u64, BoxedError> {
        let mut state = self.state();
        let advance = state.poll_advances.pop_front().unwrap_or(1);
        state.height += advance;
        Ok(state.height)
    }

    async fn block_by_number(&self, number: u64) -> Result<Option<RemoteBlockHeader>, BoxedError> {
        let height = self.state().height;
        Ok((number <= height).then(|| self.header_at(number)))
    }

    async fn storage_at(&self, address: Address, slot: U256) -> Result<B256, BoxedError> {
        Ok(self
            .state()
            .storage
            .get(&(address, slot))
            .copied()
            .unwrap_or_default())
    }

    async fn code_at(&self, address: Address) -> Result<Bytes, BoxedError> {
        Ok(self
            .state()
            .code
            .get(&address)
            .cloned()
            .unwrap_or_default())
    }

    async fn simulate_call(
        &self,
        call: &ContractCall,
        block_number: Option<u64>,
    ) -> Result<CallOutcome, BoxedError> {
        let mut state = self.state();
        let block_number = block_number.unwrap_or(state.height);

        let Ok(mint) = IHeaderChallenge::mintFlagCall::abi_decode(&call.data) else {
            return Ok(CallOutcome::Success(Bytes::new()));
        };

        state.simulated_headers.push(mint.header.clone());
        if self.accepts_header(&state, &mint.header, block_number) {
            Ok(CallOutcome::Success(Bytes::new()))
        } else {
            Ok(CallOutcome::Reverted("Invalid block header".to_owned()))
        }
    }

    async fn raw_request(&self, method: &str, _params: Vec<Value>) -> Result<Value, RawRequestError> {
        let mut state = self.state();
        state.raw_requests.push(method.to_owned());

        state
            .raw_responses
            .get(method)
            .cloned()
            .ok_or_else(|| RawRequestError::Rejected {
                method: method.to_owned(),
                code: -32601,
                message: format!("the method {method} does not exist/is not available"),
            })
    }
}

impl ChainWriter for FakeChain {
    fn account(&self) -> Address {
        self.account
    }

    async fn send_raw_transaction(&self, transaction: Bytes) -> Result<B256, BoxedError> {
        let mut state = self.state();
        state.height += 1;

        let transaction_hash = keccak256(&transaction);
        let block_number = state.height;
        state.sent.push(SentTransaction {
            to: None,
            data: transaction,
        });
        state.receipts.insert(
            transaction_hash,
            TransactionReceipt {
                transaction_hash,
                block_number,
                contract_address: None,
                success: true,
            },
        );

        Ok(transaction_hash)
    }

    async fn deploy_contract(&self, creation_code: Bytes) -> Result<B256, BoxedError> {
        Ok(self.mine(None, creation_code))
    }

    async fn invoke(&self, to: Address, data: Bytes) -> Result<B256, BoxedError> {
        Ok(self.mine(Some(to), data))
    }

    async fn wait_for_receipt(
        &self,
        transaction_hash: B256,
    ) -> Result<TransactionReceipt, BoxedError> {
        self.state()
            .receipts
            .get(&transaction_hash)
            .cloned()
            .ok_or_else(|| format!("unknown transaction {transaction_hash}").into())
    }
}
