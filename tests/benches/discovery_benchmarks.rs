//! # Overlay Discovery Benchmarks
//!
//! | Subsystem | Hot path |
//! |-----------|----------|
//! | ov-01 Name Validation | name and URI checks on every admission |
//! | ov-02 Token Codec | PushDrop decode on every admission |
//! | ov-03 Signature Linkage | ECDSA verify plus two key derivations |
//! | ov-05 Lookup Service | structured query over a populated store |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ov_01_name_validation::{is_advertisable_uri, is_valid_topic_or_service_name};
use ov_02_token_codec::{flatten_for_signing, unsigned_token_fields, LockingScriptCodec, PushDropCodec};
use ov_03_signature_linkage::{linkage_context, LinkageVerifier, SignatureLinkageApi};
use ov_04_record_store::MemoryRecordStore;
use ov_05_lookup_service::{AdmissionEvent, AdvertisementLookupService, LookupQuestion, LookupService};
use overlay_crypto::{Counterparty, CryptoWallet, ProtoWallet};
use overlay_types::{Outpoint, Protocol, Txid};
use serde_json::json;
use std::time::Duration;
use tokio::runtime::Runtime;

fn advertisement_script(rt: &Runtime, signer: &ProtoWallet, bare_name: &str) -> Vec<u8> {
    rt.block_on(async {
        let identity = signer.identity_key().await.unwrap();
        let ctx = linkage_context(Protocol::Ship, Counterparty::Anyone);
        let mut fields =
            unsigned_token_fields(Protocol::Ship, &identity, "https://bench.example/", bare_name);
        let signature = signer
            .create_signature(&flatten_for_signing(&fields), &ctx)
            .await
            .unwrap();
        fields.push(signature);
        let locking_key = signer.get_public_key(&ctx, true).await.unwrap();
        PushDropCodec.encode(&fields, &locking_key).unwrap()
    })
}

// ============================================================================
// OV-01: Name Validation
// ============================================================================

fn bench_name_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("ov-01-name-validation");

    group.bench_function("topic_name", |b| {
        b.iter(|| black_box(is_valid_topic_or_service_name(black_box("tm_payments_and_more"))))
    });
    group.bench_function("https_uri", |b| {
        b.iter(|| black_box(is_advertisable_uri(black_box("https+bsvauth://overlay.example.com/"))))
    });
    group.bench_function("js8c_uri", |b| {
        b.iter(|| {
            black_box(is_advertisable_uri(black_box(
                "js8c+bsvauth+smf:?lat=40&long=-74&freq=7.078&radius=100",
            )))
        })
    });

    group.finish();
}

// ============================================================================
// OV-02 / OV-03: Token Decode and Linkage
// ============================================================================

fn bench_token_admission_path(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let signer = ProtoWallet::random();
    let script = advertisement_script(&rt, &signer, "payments");
    let token = PushDropCodec.decode_token(&script).unwrap();
    let locking_key = token.locking_public_key.to_hex();
    let verifier = LinkageVerifier::anyone();

    let mut group = c.benchmark_group("ov-02-ov-03-admission");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("pushdrop_decode", |b| {
        b.iter(|| black_box(PushDropCodec.decode_token(black_box(&script)).is_ok()))
    });
    group.bench_function("linkage_verify", |b| {
        b.iter(|| {
            rt.block_on(verifier.verify_linkage(black_box(&locking_key), black_box(&token.fields)))
                .unwrap()
        })
    });

    group.finish();
}

// ============================================================================
// OV-05: Lookup Queries
// ============================================================================

fn bench_lookup_queries(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let signer = ProtoWallet::random();
    let topics = ["payments", "identity", "messages", "files"];
    let scripts: Vec<_> = topics
        .iter()
        .map(|t| advertisement_script(&rt, &signer, t))
        .collect();

    let mut group = c.benchmark_group("ov-05-lookup-service");

    for size in [100u32, 1_000] {
        let service = AdvertisementLookupService::ship(MemoryRecordStore::new());
        rt.block_on(async {
            for i in 0..size {
                let mut txid = [0u8; 32];
                txid[..4].copy_from_slice(&i.to_be_bytes());
                service
                    .output_admitted_by_topic(&AdmissionEvent {
                        outpoint: Outpoint::new(Txid::new(txid), 0),
                        topic: "tm_ship".to_string(),
                        locking_script: scripts[i as usize % scripts.len()].clone(),
                    })
                    .await;
            }
        });

        let question = LookupQuestion::new(
            "ls_ship",
            json!({ "topics": ["tm_payments"], "limit": 20, "sortOrder": "asc" }),
        );
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("topic_query", size), &question, |b, q| {
            b.iter(|| rt.block_on(service.lookup(black_box(q))).unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_name_validation,
    bench_token_admission_path,
    bench_lookup_queries
);
criterion_main!(benches);
