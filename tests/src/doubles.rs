//! # Ledger Test Doubles
//!
//! An in-memory stand-in for the ledger and the overlay around the
//! discovery services:
//!
//! - [`TestLedger`]: transactions and spent outputs
//! - [`LedgerWallet`]: a [`Wallet`] that records its actions on a ledger and
//!   refuses to spend outputs it cannot unlock
//! - [`JsonBundleCodec`]: bundles as JSON arrays of [`TestTransaction`]s
//! - [`TestOverlay`]: SHIP and SLAP lookup services fed by submitted bundles
//! - [`LoopbackResolver`]: answers resolver queries from a [`TestOverlay`]

use async_trait::async_trait;
use ov_02_token_codec::{AdvertisementFields, LockingScriptCodec, PushDropCodec};
use ov_04_record_store::MemoryRecordStore;
use ov_05_lookup_service::{
    AdmissionEvent, AdmissionOutcome, AdvertisementLookupService, LookupAnswer, LookupQuestion,
    LookupService, LookupServiceError, SpendEvent,
};
use ov_06_advertiser::{
    BundleCodec, BundleError, LookupResolver, NetworkPreset, ResolverAnswer, ResolverError,
    ResolverOutput,
};
use overlay_crypto::{
    ActionRequest, ActionResult, CryptoWallet, DerivationContext, ProtoWallet, PublicKey, Wallet,
    WalletError,
};
use overlay_telemetry::{init_logging, TelemetryConfig};
use overlay_types::{LedgerTransaction, Outpoint, Protocol, TaggedBundle, TransactionOutput, Txid};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Once};

static LOGGING: Once = Once::new();

/// Install the subscriber once per test binary. `RUST_LOG` selects levels.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let config = TelemetryConfig {
            log_level: "warn".to_string(),
            ..TelemetryConfig::for_subsystem("tests", "ov-tests")
        };
        // Another harness may have installed one already.
        let _ = init_logging(&config);
    });
}

// =============================================================================
// LEDGER
// =============================================================================

/// A transaction as the test ledger serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestTransaction {
    pub txid: Txid,
    pub inputs: Vec<Outpoint>,
    pub outputs: Vec<TransactionOutput>,
}

impl From<TestTransaction> for LedgerTransaction {
    fn from(tx: TestTransaction) -> Self {
        LedgerTransaction {
            txid: tx.txid,
            outputs: tx.outputs,
        }
    }
}

#[derive(Default)]
struct LedgerState {
    transactions: HashMap<Txid, TestTransaction>,
    spent: HashSet<Outpoint>,
    sequence: u64,
}

/// Shared in-memory ledger.
#[derive(Default)]
pub struct TestLedger {
    state: RwLock<LedgerState>,
}

impl TestLedger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn transaction(&self, txid: &Txid) -> Option<TestTransaction> {
        self.state.read().transactions.get(txid).cloned()
    }

    /// Serialized form of a recorded transaction.
    pub fn raw_transaction(&self, txid: &Txid) -> Option<Vec<u8>> {
        self.transaction(txid)
            .and_then(|tx| serde_json::to_vec(&tx).ok())
    }

    pub fn is_spent(&self, outpoint: &Outpoint) -> bool {
        self.state.read().spent.contains(outpoint)
    }

    /// Locking script of an unspent output.
    fn unspent_script(&self, outpoint: &Outpoint) -> Result<Vec<u8>, WalletError> {
        let state = self.state.read();
        if state.spent.contains(outpoint) {
            return Err(WalletError::ActionFailed(format!("{outpoint} already spent")));
        }
        state
            .transactions
            .get(&outpoint.txid)
            .and_then(|tx| tx.outputs.get(outpoint.output_index as usize))
            .map(|output| output.locking_script.clone())
            .ok_or_else(|| WalletError::ActionFailed(format!("{outpoint} not found")))
    }

    fn commit(
        &self,
        inputs: Vec<Outpoint>,
        outputs: Vec<TransactionOutput>,
    ) -> Result<TestTransaction, WalletError> {
        let mut state = self.state.write();
        if let Some(spent) = inputs.iter().find(|i| state.spent.contains(*i)) {
            return Err(WalletError::ActionFailed(format!("{spent} already spent")));
        }

        state.sequence += 1;
        let preimage = serde_json::to_vec(&(&inputs, &outputs, state.sequence))
            .map_err(|e| WalletError::ActionFailed(e.to_string()))?;
        let mut txid = [0u8; 32];
        txid.copy_from_slice(&Sha256::digest(&preimage));
        let txid = Txid::new(txid);

        state.spent.extend(inputs.iter().copied());
        let tx = TestTransaction {
            txid,
            inputs,
            outputs,
        };
        state.transactions.insert(txid, tx.clone());
        Ok(tx)
    }
}

// =============================================================================
// WALLET
// =============================================================================

/// A host wallet whose actions land on a [`TestLedger`].
pub struct LedgerWallet {
    keys: ProtoWallet,
    ledger: Arc<TestLedger>,
}

impl LedgerWallet {
    pub fn new(ledger: Arc<TestLedger>) -> Self {
        Self {
            keys: ProtoWallet::random(),
            ledger,
        }
    }

    pub fn with_keys(keys: ProtoWallet, ledger: Arc<TestLedger>) -> Self {
        Self { keys, ledger }
    }

    pub fn keys(&self) -> &ProtoWallet {
        &self.keys
    }
}

#[async_trait]
impl CryptoWallet for LedgerWallet {
    async fn identity_key(&self) -> Result<PublicKey, WalletError> {
        self.keys.identity_key().await
    }

    async fn get_public_key(
        &self,
        ctx: &DerivationContext,
        for_self: bool,
    ) -> Result<PublicKey, WalletError> {
        self.keys.get_public_key(ctx, for_self).await
    }

    async fn create_signature(
        &self,
        data: &[u8],
        ctx: &DerivationContext,
    ) -> Result<Vec<u8>, WalletError> {
        self.keys.create_signature(data, ctx).await
    }

    async fn verify_signature(
        &self,
        data: &[u8],
        signature: &[u8],
        ctx: &DerivationContext,
    ) -> Result<bool, WalletError> {
        self.keys.verify_signature(data, signature, ctx).await
    }
}

#[async_trait]
impl Wallet for LedgerWallet {
    async fn create_action(&self, request: ActionRequest) -> Result<ActionResult, WalletError> {
        let mut inputs = Vec::with_capacity(request.inputs.len());
        for input in &request.inputs {
            let script = self.ledger.unspent_script(&input.outpoint)?;
            let token = PushDropCodec
                .decode(&script)
                .map_err(|e| WalletError::ActionFailed(e.to_string()))?;
            let key = self.keys.get_public_key(&input.unlocking, true).await?;
            if key != token.locking_public_key {
                return Err(WalletError::ActionFailed(format!(
                    "cannot unlock {}",
                    input.outpoint
                )));
            }
            inputs.push(input.outpoint);
        }

        let outputs = request
            .outputs
            .into_iter()
            .map(|o| TransactionOutput {
                satoshis: o.satoshis,
                locking_script: o.locking_script,
            })
            .collect();

        let tx = self.ledger.commit(inputs, outputs)?;
        let raw_tx = serde_json::to_vec(&tx).map_err(|e| WalletError::ActionFailed(e.to_string()))?;
        Ok(ActionResult {
            txid: tx.txid,
            raw_tx,
        })
    }
}

// =============================================================================
// BUNDLES
// =============================================================================

/// Bundles as JSON arrays of [`TestTransaction`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBundleCodec;

impl JsonBundleCodec {
    pub fn transactions(&self, beef: &[u8]) -> Result<Vec<TestTransaction>, BundleError> {
        serde_json::from_slice(beef).map_err(|e| BundleError::Malformed(e.to_string()))
    }
}

impl BundleCodec for JsonBundleCodec {
    fn from_transactions(&self, raw_transactions: &[Vec<u8>]) -> Result<Vec<u8>, BundleError> {
        let txs = raw_transactions
            .iter()
            .map(|raw| serde_json::from_slice::<TestTransaction>(raw))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| BundleError::Malformed(e.to_string()))?;
        serde_json::to_vec(&txs).map_err(|e| BundleError::Malformed(e.to_string()))
    }

    fn from_bytes(&self, beef: &[u8]) -> Result<Vec<LedgerTransaction>, BundleError> {
        Ok(self
            .transactions(beef)?
            .into_iter()
            .map(LedgerTransaction::from)
            .collect())
    }
}

// =============================================================================
// OVERLAY
// =============================================================================

pub type TestLookupService = AdvertisementLookupService<MemoryRecordStore>;

/// SHIP and SLAP lookup services behind a minimal topic manager.
pub struct TestOverlay {
    pub ledger: Arc<TestLedger>,
    pub ship: TestLookupService,
    pub slap: TestLookupService,
}

impl TestOverlay {
    pub async fn new(ledger: Arc<TestLedger>) -> Result<Arc<Self>, LookupServiceError> {
        init_test_logging();
        let overlay = Self {
            ledger,
            ship: AdvertisementLookupService::ship(MemoryRecordStore::new()),
            slap: AdvertisementLookupService::slap(MemoryRecordStore::new()),
        };
        overlay.ship.initialize().await?;
        overlay.slap.initialize().await?;
        Ok(Arc::new(overlay))
    }

    pub fn service(&self, protocol: Protocol) -> &TestLookupService {
        match protocol {
            Protocol::Ship => &self.ship,
            Protocol::Slap => &self.slap,
        }
    }

    fn service_for_topic(&self, topic: &str) -> Option<&TestLookupService> {
        Protocol::ALL
            .into_iter()
            .find(|p| p.topic() == topic)
            .map(|p| self.service(p))
    }

    /// Submit a tagged bundle: spend the inputs of every transaction, then
    /// admit every output whose protocol tag matches a submitted topic.
    pub async fn submit(
        &self,
        bundle: &TaggedBundle,
    ) -> Result<Vec<AdmissionOutcome>, LookupServiceError> {
        let mut outcomes = Vec::new();
        let transactions = JsonBundleCodec
            .transactions(&bundle.beef)
            .unwrap_or_default();

        for tx in transactions {
            for topic in &bundle.topics {
                let Some(service) = self.service_for_topic(topic) else {
                    continue;
                };
                for outpoint in &tx.inputs {
                    service
                        .output_spent(&SpendEvent {
                            outpoint: *outpoint,
                            topic: topic.clone(),
                        })
                        .await?;
                }
                for (index, output) in tx.outputs.iter().enumerate() {
                    if advertised_protocol(&output.locking_script).map(Protocol::topic)
                        != Some(topic.as_str())
                    {
                        continue;
                    }
                    let event = AdmissionEvent {
                        outpoint: Outpoint::new(tx.txid, index as u32),
                        topic: topic.clone(),
                        locking_script: output.locking_script.clone(),
                    };
                    outcomes.push(service.output_admitted_by_topic(&event).await);
                }
            }
        }
        Ok(outcomes)
    }
}

/// Protocol tag of an advertisement-shaped locking script.
fn advertised_protocol(script: &[u8]) -> Option<Protocol> {
    let token = PushDropCodec.decode_token(script).ok()?;
    AdvertisementFields::from_fields(&token.fields)
        .ok()
        .map(|fields| fields.protocol)
}

// =============================================================================
// RESOLVER
// =============================================================================

/// Resolver answering from a local [`TestOverlay`].
pub struct LoopbackResolver {
    overlay: Arc<TestOverlay>,
}

impl LoopbackResolver {
    pub fn new(overlay: Arc<TestOverlay>) -> Self {
        Self { overlay }
    }
}

#[async_trait]
impl LookupResolver for LoopbackResolver {
    async fn query(
        &self,
        service: &str,
        query: Value,
        _network: NetworkPreset,
    ) -> Result<ResolverAnswer, ResolverError> {
        let protocol = Protocol::ALL
            .into_iter()
            .find(|p| p.lookup_service() == service)
            .ok_or_else(|| ResolverError::NoHosts(service.to_string()))?;

        let answer = self
            .overlay
            .service(protocol)
            .lookup(&LookupQuestion::new(service, query))
            .await
            .map_err(|e| ResolverError::Transport(e.to_string()))?;
        let LookupAnswer::OutputList { outputs } = answer;

        let mut resolved = Vec::with_capacity(outputs.len());
        for outpoint in outputs {
            let raw = self
                .overlay
                .ledger
                .raw_transaction(&outpoint.txid)
                .ok_or_else(|| ResolverError::Transport(format!("unknown transaction {}", outpoint.txid)))?;
            let beef = JsonBundleCodec
                .from_transaction(&raw)
                .map_err(|e| ResolverError::Transport(e.to_string()))?;
            resolved.push(ResolverOutput {
                beef,
                output_index: outpoint.output_index,
            });
        }
        Ok(ResolverAnswer::OutputList { outputs: resolved })
    }
}
