//! # Advertisement Lookup Service
//!
//! One implementation serves both protocols; the [`Protocol`] it is built
//! with fixes its topic (`tm_ship`/`tm_slap`), its service name
//! (`ls_ship`/`ls_slap`) and the name prefix admitted records must carry.
//!
//! Collaborators are fixed at construction:
//!
//! - `S`: record store, one per protocol
//! - `W`: wallet capability for linkage checks, normally `ProtoWallet::anyone()`
//! - `C`: locking-script codec, normally [`PushDropCodec`]

use crate::domain::config::LookupServiceConfig;
use crate::domain::docs;
use crate::domain::entities::{
    AdmissionEvent, AdmissionOutcome, LookupAnswer, LookupQuestion, RejectionReason,
    ServiceMetaData, SpendEvent,
};
use crate::domain::errors::LookupServiceError;
use crate::domain::query::LookupQuery;
use crate::ports::inbound::LookupService;
use async_trait::async_trait;
use ov_01_name_validation::validate_topic_or_service_name;
use ov_02_token_codec::{AdvertisementFields, LockingScriptCodec, PushDropCodec, SIGNED_TOKEN_FIELDS};
use ov_03_signature_linkage::{LinkageVerifier, SignatureLinkageApi};
use ov_04_record_store::{Pagination, RecordEntry, RecordStore};
use overlay_crypto::{CryptoWallet, ProtoWallet};
use overlay_telemetry::{log_outpoint_event, subsystem_span};
use overlay_types::{Outpoint, Protocol};
use tracing::{debug, info, Instrument};

/// SHIP or SLAP lookup service.
pub struct AdvertisementLookupService<S, W = ProtoWallet, C = PushDropCodec>
where
    S: RecordStore,
    W: CryptoWallet,
    C: LockingScriptCodec,
{
    protocol: Protocol,
    store: S,
    linkage: LinkageVerifier<W>,
    codec: C,
    config: LookupServiceConfig,
}

impl<S: RecordStore> AdvertisementLookupService<S> {
    /// Service with the *anyone* verifier, PushDrop codec and default config.
    pub fn new(protocol: Protocol, store: S) -> Self {
        Self::with_parts(
            protocol,
            store,
            ProtoWallet::anyone(),
            PushDropCodec,
            LookupServiceConfig::default(),
        )
    }

    pub fn ship(store: S) -> Self {
        Self::new(Protocol::Ship, store)
    }

    pub fn slap(store: S) -> Self {
        Self::new(Protocol::Slap, store)
    }
}

impl<S, W, C> AdvertisementLookupService<S, W, C>
where
    S: RecordStore,
    W: CryptoWallet,
    C: LockingScriptCodec,
{
    pub fn with_parts(
        protocol: Protocol,
        store: S,
        verifier_wallet: W,
        codec: C,
        config: LookupServiceConfig,
    ) -> Self {
        Self {
            protocol,
            store,
            linkage: LinkageVerifier::new(verifier_wallet),
            codec,
            config,
        }
    }

    pub fn with_config(mut self, config: LookupServiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Probe the store within `storage_timeout`, then make sure its indexes
    /// exist.
    pub async fn initialize(&self) -> Result<(), LookupServiceError> {
        let timeout = self.config.storage_timeout();
        tokio::time::timeout(timeout, self.store.ping())
            .await
            .map_err(|_| LookupServiceError::StoreTimeout(timeout))??;
        self.store.ensure_indexes().await?;

        info!(
            "[ov-05] {} lookup service initialized ({})",
            self.protocol,
            self.protocol.lookup_service()
        );
        Ok(())
    }

    async fn admit(&self, event: &AdmissionEvent) -> Result<(), RejectionReason> {
        let token = self.codec.decode_token(&event.locking_script)?;
        let fields = AdvertisementFields::from_fields(&token.fields)?;
        if fields.protocol != self.protocol {
            return Err(RejectionReason::ProtocolMismatch {
                expected: self.protocol,
                found: fields.protocol,
            });
        }

        let full_name = fields.full_name();
        validate_topic_or_service_name(&full_name)
            .map_err(|e| RejectionReason::InvalidName(format!("{full_name}: {e}")))?;

        token.require_fields(SIGNED_TOKEN_FIELDS)?;
        let linked = self
            .linkage
            .verify_linkage(&token.locking_public_key.to_hex(), &token.fields)
            .await?;
        if !linked {
            return Err(RejectionReason::NotLinked);
        }

        self.store
            .store_record(RecordEntry::new(
                event.outpoint,
                fields.identity_key,
                fields.domain,
                full_name,
            ))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<S, W, C> LookupService for AdvertisementLookupService<S, W, C>
where
    S: RecordStore,
    W: CryptoWallet,
    C: LockingScriptCodec,
{
    async fn output_admitted_by_topic(&self, event: &AdmissionEvent) -> AdmissionOutcome {
        if event.topic != self.protocol.topic() {
            debug!(
                "[ov-05] Ignoring {} output admitted under {}",
                self.protocol, event.topic
            );
            return AdmissionOutcome::Ignored;
        }

        let span = subsystem_span!(
            "admit",
            subsystem = "ov-05",
            topic = %event.topic,
            outpoint = %event.outpoint
        );
        match self.admit(event).instrument(span).await {
            Ok(()) => {
                log_outpoint_event!(info, "ov-05", "Advertisement admitted", event.outpoint);
                AdmissionOutcome::Admitted
            }
            Err(reason) => {
                log_outpoint_event!(
                    warn,
                    "ov-05",
                    "Advertisement rejected",
                    event.outpoint,
                    reason = %reason
                );
                AdmissionOutcome::Rejected(reason)
            }
        }
    }

    async fn output_spent(&self, event: &SpendEvent) -> Result<(), LookupServiceError> {
        self.store.delete_record(&event.outpoint).await?;
        log_outpoint_event!(debug, "ov-05", "Spent output removed", event.outpoint);
        Ok(())
    }

    async fn output_evicted(&self, outpoint: &Outpoint) -> Result<(), LookupServiceError> {
        self.store.delete_record(outpoint).await?;
        log_outpoint_event!(debug, "ov-05", "Evicted output removed", outpoint);
        Ok(())
    }

    async fn lookup(&self, question: &LookupQuestion) -> Result<LookupAnswer, LookupServiceError> {
        if question.query.is_null() {
            return Err(LookupServiceError::MissingQuery);
        }
        if question.service != self.protocol.lookup_service() {
            return Err(LookupServiceError::UnsupportedService(
                question.service.clone(),
            ));
        }

        let outputs = match LookupQuery::parse(&question.query)? {
            LookupQuery::Legacy => self.store.find_all(&Pagination::default()).await?,
            LookupQuery::Structured(query) if query.find_all => {
                self.store.find_all(&query.pagination).await?
            }
            LookupQuery::Structured(query) => {
                self.store.find_record(&query.to_record_query()).await?
            }
        };

        debug!(
            "[ov-05] {} lookup returned {} outputs",
            question.service,
            outputs.len()
        );
        Ok(LookupAnswer::OutputList { outputs })
    }

    fn get_meta_data(&self) -> ServiceMetaData {
        docs::metadata(self.protocol)
    }

    fn get_documentation(&self) -> &'static str {
        docs::documentation(self.protocol)
    }
}
