//! # Advertisement Lifecycle Flows
//!
//! Hosts publish through [`WalletAdvertiser`], the overlay admits through the
//! SHIP/SLAP lookup services, and discovery goes back through a resolver.
//!
//! ```text
//! create_advertisements ──bundle──→ TestOverlay::submit ──→ ls_ship / ls_slap
//!          ↑                                                      │
//!   revoke_advertisements ←── find_all_advertisements ←─ resolver ┘
//! ```

#[cfg(test)]
mod tests {
    use crate::doubles::{JsonBundleCodec, LedgerWallet, LoopbackResolver, TestLedger, TestOverlay};
    use ov_02_token_codec::{flatten_for_signing, unsigned_token_fields, LockingScriptCodec, PushDropCodec};
    use ov_03_signature_linkage::linkage_context;
    use ov_05_lookup_service::{AdmissionOutcome, LookupQuestion, LookupService, RejectionReason};
    use ov_06_advertiser::{
        AdvertisementData, Advertiser, AdvertiserConfig, AdvertiserError, BundleCodec,
        WalletAdvertiser,
    };
    use overlay_crypto::{ActionOutput, ActionRequest, Counterparty, CryptoWallet, Wallet, WalletError};
    use overlay_types::{Outpoint, Protocol, TaggedBundle};
    use serde_json::{json, Value};
    use std::sync::Arc;

    type Host = WalletAdvertiser<LedgerWallet, LoopbackResolver, JsonBundleCodec>;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    async fn overlay() -> Arc<TestOverlay> {
        TestOverlay::new(TestLedger::new()).await.unwrap()
    }

    async fn host(overlay: &Arc<TestOverlay>, uri: &str) -> Host {
        let host = WalletAdvertiser::new(
            LedgerWallet::new(overlay.ledger.clone()),
            LoopbackResolver::new(overlay.clone()),
            JsonBundleCodec,
            AdvertiserConfig::new(uri),
        );
        host.init().await.unwrap();
        host
    }

    async fn identity_of(host: &Host) -> String {
        host.wallet().identity_key().await.unwrap().to_hex()
    }

    async fn lookup(overlay: &TestOverlay, protocol: Protocol, query: Value) -> Vec<Outpoint> {
        overlay
            .service(protocol)
            .lookup(&LookupQuestion::new(protocol.lookup_service(), query))
            .await
            .unwrap()
            .outputs()
            .to_vec()
    }

    async fn publish(overlay: &TestOverlay, host: &Host, ads: &[AdvertisementData]) -> Vec<Outpoint> {
        let bundle = host.create_advertisements(ads).await.unwrap();
        let outcomes = overlay.submit(&bundle).await.unwrap();
        assert_eq!(outcomes.len(), ads.len());
        assert!(outcomes.iter().all(AdmissionOutcome::is_admitted));

        let tx = JsonBundleCodec
            .transactions(&bundle.beef)
            .unwrap()
            .pop()
            .unwrap();
        (0..tx.outputs.len() as u32)
            .map(|index| Outpoint::new(tx.txid, index))
            .collect()
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    #[tokio::test]
    async fn test_full_advertisement_lifecycle() {
        let overlay = overlay().await;
        let host = host(&overlay, "https://host-a.example/").await;

        let created = publish(
            &overlay,
            &host,
            &[
                AdvertisementData::ship("payments"),
                AdvertisementData::slap("ls_identity"),
            ],
        )
        .await;

        assert_eq!(
            lookup(&overlay, Protocol::Ship, json!({ "topics": ["tm_payments"] })).await,
            vec![created[0]]
        );
        assert_eq!(
            lookup(&overlay, Protocol::Slap, json!({ "services": ["ls_identity"] })).await,
            vec![created[1]]
        );

        let mut found = host.find_all_advertisements(Protocol::Ship).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].topic_or_service, "tm_payments");
        assert_eq!(found[0].domain, "https://host-a.example/");
        assert_eq!(found[0].identity_key, identity_of(&host).await);
        assert_eq!(found[0].output_index, Some(0));

        let slap = host.find_all_advertisements(Protocol::Slap).await.unwrap();
        assert_eq!(slap.len(), 1);
        assert_eq!(slap[0].topic_or_service, "ls_identity");
        found.extend(slap);

        let revocation = host.revoke_advertisements(&found).await.unwrap();
        assert_eq!(revocation.topics, vec!["tm_ship", "tm_slap"]);
        let outcomes = overlay.submit(&revocation).await.unwrap();
        assert!(outcomes.is_empty());

        assert!(created.iter().all(|o| overlay.ledger.is_spent(o)));
        assert!(lookup(&overlay, Protocol::Ship, json!("findAll")).await.is_empty());
        assert!(lookup(&overlay, Protocol::Slap, json!("findAll")).await.is_empty());
        assert!(host
            .find_all_advertisements(Protocol::Ship)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_hosts_are_discovered_by_domain_and_topic() {
        let overlay = overlay().await;
        let alice = host(&overlay, "https://alice.example/").await;
        let bob = host(&overlay, "wss://bob.example").await;

        let alice_ads = publish(
            &overlay,
            &alice,
            &[
                AdvertisementData::ship("payments"),
                AdvertisementData::ship("identity"),
            ],
        )
        .await;
        let bob_ads = publish(&overlay, &bob, &[AdvertisementData::ship("tm_payments")]).await;

        let mut payments =
            lookup(&overlay, Protocol::Ship, json!({ "topics": ["tm_payments"] })).await;
        payments.sort();
        let mut expected = vec![alice_ads[0], bob_ads[0]];
        expected.sort();
        assert_eq!(payments, expected);

        assert_eq!(
            lookup(&overlay, Protocol::Ship, json!({ "domain": "wss://bob.example" })).await,
            bob_ads
        );
        assert_eq!(
            lookup(
                &overlay,
                Protocol::Ship,
                json!({ "identityKey": identity_of(&alice).await, "sortOrder": "asc" })
            )
            .await,
            alice_ads
        );

        let found = bob.find_all_advertisements(Protocol::Ship).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].domain, "wss://bob.example");
    }

    #[tokio::test]
    async fn test_legacy_and_paged_queries() {
        let overlay = overlay().await;
        let host = host(&overlay, "https://host.example/").await;

        let mut created = Vec::new();
        for topic in ["alpha", "beta", "gamma"] {
            created.extend(publish(&overlay, &host, &[AdvertisementData::ship(topic)]).await);
        }

        assert_eq!(lookup(&overlay, Protocol::Ship, json!("findAll")).await.len(), 3);
        assert_eq!(
            lookup(
                &overlay,
                Protocol::Ship,
                json!({ "findAll": true, "limit": 1, "skip": 1, "sortOrder": "asc" })
            )
            .await,
            vec![created[1]]
        );
        assert_eq!(
            lookup(&overlay, Protocol::Ship, json!({ "findAll": true, "limit": 2 })).await,
            vec![created[2], created[1]]
        );
    }

    // =========================================================================
    // ADVERSARIAL FLOWS
    // =========================================================================

    #[tokio::test]
    async fn test_spoofed_advertisement_is_not_admitted() {
        let overlay = overlay().await;
        let victim = host(&overlay, "https://victim.example/").await;
        let attacker = LedgerWallet::new(overlay.ledger.clone());

        let victim_key = victim.wallet().identity_key().await.unwrap();
        let ctx = linkage_context(Protocol::Ship, Counterparty::Anyone);
        let mut fields =
            unsigned_token_fields(Protocol::Ship, &victim_key, "https://evil.example/", "payments");
        let signature = attacker
            .create_signature(&flatten_for_signing(&fields), &ctx)
            .await
            .unwrap();
        fields.push(signature);
        let locking_key = attacker.get_public_key(&ctx, true).await.unwrap();

        let result = attacker
            .create_action(ActionRequest {
                description: "spoof".to_string(),
                inputs: Vec::new(),
                outputs: vec![ActionOutput {
                    locking_script: PushDropCodec.encode(&fields, &locking_key).unwrap(),
                    satoshis: 1,
                    description: "spoofed advertisement".to_string(),
                }],
            })
            .await
            .unwrap();
        let bundle = TaggedBundle {
            beef: JsonBundleCodec.from_transaction(&result.raw_tx).unwrap(),
            topics: vec!["tm_ship".to_string()],
        };

        let outcomes = overlay.submit(&bundle).await.unwrap();
        assert_eq!(
            outcomes,
            vec![AdmissionOutcome::Rejected(RejectionReason::NotLinked)]
        );
        assert!(victim
            .find_all_advertisements(Protocol::Ship)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_only_the_owner_can_revoke() {
        let overlay = overlay().await;
        let owner = host(&overlay, "https://owner.example/").await;
        let other = host(&overlay, "https://other.example/").await;
        publish(&overlay, &owner, &[AdvertisementData::slap("identity")]).await;

        let found = owner.find_all_advertisements(Protocol::Slap).await.unwrap();
        assert!(matches!(
            other.revoke_advertisements(&found).await,
            Err(AdvertiserError::Wallet(WalletError::ActionFailed(_)))
        ));

        let revocation = owner.revoke_advertisements(&found).await.unwrap();
        overlay.submit(&revocation).await.unwrap();
        assert!(matches!(
            owner.revoke_advertisements(&found).await,
            Err(AdvertiserError::Wallet(WalletError::ActionFailed(_)))
        ));
    }
}
