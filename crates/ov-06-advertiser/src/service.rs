//! # Wallet Advertiser
//!
//! Implements [`Advertiser`] over three injected collaborators:
//!
//! - `W`: the host's [`Wallet`], which signs tokens and builds transactions
//! - `R`: a [`LookupResolver`] for discovering our own advertisements
//! - `B`: a [`BundleCodec`] for wrapping and unwrapping transactions
//!
//! The locking-script codec `C` defaults to [`PushDropCodec`].

use crate::domain::config::AdvertiserConfig;
use crate::domain::entities::{AdvertisementData, Operation};
use crate::domain::errors::AdvertiserError;
use crate::ports::inbound::Advertiser;
use crate::ports::outbound::{BundleCodec, LookupResolver, ResolverAnswer, ResolverOutput};
use async_trait::async_trait;
use ov_01_name_validation::{validate_advertisable_uri, validate_topic_or_service_name};
use ov_02_token_codec::{
    flatten_for_signing, unsigned_token_fields, AdvertisementFields, LockingScriptCodec,
    PushDropCodec,
};
use ov_03_signature_linkage::linkage_context;
use overlay_crypto::{ActionInput, ActionOutput, ActionRequest, Counterparty, PublicKey, Wallet};
use overlay_telemetry::log_event;
use overlay_types::{Advertisement, Outpoint, Protocol, TaggedBundle};
use serde_json::json;
use std::sync::OnceLock;
use tracing::{debug, info};

const CREATE_DESCRIPTION: &str = "SHIP/SLAP Advertisement Issuance";
const REVOKE_DESCRIPTION: &str = "Revoke SHIP/SLAP advertisement";

/// Advertiser backed by a wallet.
pub struct WalletAdvertiser<W, R, B, C = PushDropCodec>
where
    W: Wallet,
    R: LookupResolver,
    B: BundleCodec,
    C: LockingScriptCodec,
{
    wallet: W,
    resolver: R,
    bundles: B,
    codec: C,
    config: AdvertiserConfig,
    identity_key: OnceLock<PublicKey>,
}

impl<W, R, B> WalletAdvertiser<W, R, B>
where
    W: Wallet,
    R: LookupResolver,
    B: BundleCodec,
{
    pub fn new(wallet: W, resolver: R, bundles: B, config: AdvertiserConfig) -> Self {
        Self::with_codec(wallet, resolver, bundles, PushDropCodec, config)
    }
}

impl<W, R, B, C> WalletAdvertiser<W, R, B, C>
where
    W: Wallet,
    R: LookupResolver,
    B: BundleCodec,
    C: LockingScriptCodec,
{
    pub fn with_codec(wallet: W, resolver: R, bundles: B, codec: C, config: AdvertiserConfig) -> Self {
        Self {
            wallet,
            resolver,
            bundles,
            codec,
            config,
            identity_key: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &AdvertiserConfig {
        &self.config
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn is_initialized(&self) -> bool {
        self.identity_key.get().is_some()
    }

    fn identity(&self, operation: Operation) -> Result<&PublicKey, AdvertiserError> {
        self.identity_key
            .get()
            .ok_or(AdvertiserError::NotInitialized(operation))
    }

    /// Decode without the initialization check.
    fn decode_advertisement(&self, locking_script: &[u8]) -> Result<Advertisement, AdvertiserError> {
        let token = self.codec.decode_token(locking_script)?;
        let fields = AdvertisementFields::from_fields(&token.fields)?;
        let name = fields.full_name();
        validate_topic_or_service_name(&name)
            .map_err(|reason| AdvertiserError::InvalidName { name: name.clone(), reason })?;

        Ok(Advertisement {
            protocol: fields.protocol,
            identity_key: fields.identity_key,
            domain: fields.domain,
            topic_or_service: name,
            beef: None,
            output_index: None,
        })
    }

    /// Read one resolver output back into an advertisement.
    fn advertisement_from_output(
        &self,
        output: &ResolverOutput,
    ) -> Result<Advertisement, AdvertiserError> {
        let subject = self.bundles.subject_transaction(&output.beef)?;
        let tx_output =
            subject
                .output(output.output_index)
                .ok_or(AdvertiserError::MissingOutput {
                    txid: subject.txid,
                    output_index: output.output_index,
                })?;

        let mut advertisement = self.decode_advertisement(&tx_output.locking_script)?;
        advertisement.beef = Some(output.beef.clone());
        advertisement.output_index = Some(output.output_index);
        Ok(advertisement)
    }

    async fn signed_output(
        &self,
        identity: &PublicKey,
        protocol: Protocol,
        bare_name: &str,
    ) -> Result<ActionOutput, AdvertiserError> {
        let ctx = linkage_context(protocol, Counterparty::Anyone);
        let mut fields =
            unsigned_token_fields(protocol, identity, &self.config.advertisable_uri, bare_name);
        let signature = self
            .wallet
            .create_signature(&flatten_for_signing(&fields), &ctx)
            .await?;
        fields.push(signature);

        let locking_key = self.wallet.get_public_key(&ctx, true).await?;
        let locking_script = self.codec.encode(&fields, &locking_key)?;

        Ok(ActionOutput {
            locking_script,
            satoshis: self.config.output_satoshis,
            description: format!("{protocol} advertisement of {}", protocol.full_name(bare_name)),
        })
    }
}

/// Bare name to advertise for `ad`, after checking the full name.
///
/// Accepts the name with or without its own prefix. A name carrying the
/// other protocol's prefix is rejected.
fn bare_name_for(ad: &AdvertisementData) -> Result<&str, String> {
    let name = ad.topic_or_service_name.as_str();
    if let Some(other) = Protocol::ALL
        .into_iter()
        .find(|p| *p != ad.protocol && name.starts_with(p.name_prefix()))
    {
        return Err(format!(
            "{name:?} carries the {other} prefix but is advertised under {}",
            ad.protocol
        ));
    }

    let bare = ad.protocol.bare_name(name);
    validate_topic_or_service_name(&ad.protocol.full_name(bare)).map_err(|e| e.to_string())?;
    Ok(bare)
}

/// `tm_ship` / `tm_slap` for the protocols involved, in first-seen order.
fn bundle_topics(protocols: impl IntoIterator<Item = Protocol>) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();
    for protocol in protocols {
        if !topics.iter().any(|t| t == protocol.topic()) {
            topics.push(protocol.topic().to_string());
        }
    }
    topics
}

#[async_trait]
impl<W, R, B, C> Advertiser for WalletAdvertiser<W, R, B, C>
where
    W: Wallet,
    R: LookupResolver,
    B: BundleCodec,
    C: LockingScriptCodec,
{
    async fn init(&self) -> Result<(), AdvertiserError> {
        if self.is_initialized() {
            return Err(AdvertiserError::AlreadyInitialized);
        }

        let uri = &self.config.advertisable_uri;
        let scheme = validate_advertisable_uri(uri).map_err(|reason| {
            AdvertiserError::InvalidAdvertisableUri {
                uri: uri.clone(),
                reason,
            }
        })?;

        let identity = self.wallet.identity_key().await?;
        self.identity_key
            .set(identity)
            .map_err(|_| AdvertiserError::AlreadyInitialized)?;

        info!("[ov-06] Advertiser initialized for {uri} ({scheme:?})");
        Ok(())
    }

    async fn create_advertisements(
        &self,
        advertisements: &[AdvertisementData],
    ) -> Result<TaggedBundle, AdvertiserError> {
        let identity = self.identity(Operation::CreateAdvertisements)?;
        if advertisements.is_empty() {
            return Err(AdvertiserError::NoAdvertisements);
        }

        let bare_names = advertisements
            .iter()
            .enumerate()
            .map(|(index, ad)| {
                bare_name_for(ad).map_err(|reason| AdvertiserError::InvalidEntry { index, reason })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut outputs = Vec::with_capacity(advertisements.len());
        for (ad, bare_name) in advertisements.iter().zip(bare_names) {
            outputs.push(self.signed_output(identity, ad.protocol, bare_name).await?);
        }

        let result = self
            .wallet
            .create_action(ActionRequest {
                description: CREATE_DESCRIPTION.to_string(),
                inputs: Vec::new(),
                outputs,
            })
            .await?;
        let beef = self.bundles.from_transaction(&result.raw_tx)?;

        log_event!(
            info,
            "ov-06",
            "Advertisements created",
            txid = %result.txid,
            count = advertisements.len()
        );
        Ok(TaggedBundle {
            beef,
            topics: bundle_topics(advertisements.iter().map(|ad| ad.protocol)),
        })
    }

    fn parse_advertisement(&self, locking_script: &[u8]) -> Result<Advertisement, AdvertiserError> {
        self.identity(Operation::ParseAdvertisement)?;
        self.decode_advertisement(locking_script)
    }

    async fn find_all_advertisements(
        &self,
        protocol: Protocol,
    ) -> Result<Vec<Advertisement>, AdvertiserError> {
        let identity = self.identity(Operation::FindAllAdvertisements)?;
        let service = protocol.lookup_service();
        let query = json!({ "identityKey": identity.to_hex() });
        let timeout = self.config.resolver_timeout();

        let answer = match tokio::time::timeout(
            timeout,
            self.resolver.query(service, query, self.config.network),
        )
        .await
        {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => {
                log_event!(warn, "ov-06", "Resolver query failed", service = service, error = %e);
                return Ok(Vec::new());
            }
            Err(_) => {
                log_event!(
                    warn,
                    "ov-06",
                    "Resolver query timed out",
                    service = service,
                    timeout_secs = timeout.as_secs()
                );
                return Ok(Vec::new());
            }
        };

        let ResolverAnswer::OutputList { outputs } = answer else {
            log_event!(warn, "ov-06", "Unexpected resolver answer", service = service);
            return Ok(Vec::new());
        };

        let mut advertisements = Vec::new();
        for output in &outputs {
            match self.advertisement_from_output(output) {
                Ok(ad) if ad.protocol == protocol => advertisements.push(ad),
                Ok(ad) => debug!("[ov-06] Skipping {} output in {service} answer", ad.protocol),
                Err(e) => debug!("[ov-06] Skipping unreadable output: {e}"),
            }
        }

        debug!(
            "[ov-06] Found {} of {} {service} outputs for own identity",
            advertisements.len(),
            outputs.len()
        );
        Ok(advertisements)
    }

    async fn revoke_advertisements(
        &self,
        advertisements: &[Advertisement],
    ) -> Result<TaggedBundle, AdvertiserError> {
        self.identity(Operation::RevokeAdvertisements)?;
        if advertisements.is_empty() {
            return Err(AdvertiserError::NoAdvertisements);
        }

        let mut spends = Vec::with_capacity(advertisements.len());
        for (index, ad) in advertisements.iter().enumerate() {
            let beef = ad.beef.as_deref().filter(|b| !b.is_empty()).ok_or_else(|| {
                AdvertiserError::InvalidEntry {
                    index,
                    reason: "advertisement carries no bundle".to_string(),
                }
            })?;
            let output_index = ad.output_index.ok_or_else(|| AdvertiserError::InvalidEntry {
                index,
                reason: "advertisement carries no output index".to_string(),
            })?;
            spends.push((ad, beef, output_index));
        }

        let mut raw_transactions = Vec::with_capacity(spends.len());
        for (ad, beef, output_index) in spends {
            let subject = self.bundles.subject_transaction(beef)?;
            let outpoint = Outpoint::new(subject.txid, output_index);
            let result = self
                .wallet
                .create_action(ActionRequest {
                    description: REVOKE_DESCRIPTION.to_string(),
                    inputs: vec![ActionInput {
                        outpoint,
                        source_beef: beef.to_vec(),
                        unlocking: linkage_context(ad.protocol, Counterparty::Anyone),
                        description: format!("Revoke {} advertisement", ad.topic_or_service),
                    }],
                    outputs: Vec::new(),
                })
                .await?;

            log_event!(
                info,
                "ov-06",
                "Advertisement revoked",
                spent = %outpoint,
                txid = %result.txid
            );
            raw_transactions.push(result.raw_tx);
        }

        Ok(TaggedBundle {
            beef: self.bundles.from_transactions(&raw_transactions)?,
            topics: bundle_topics(advertisements.iter().map(|ad| ad.protocol)),
        })
    }
}
