//! submission_flow.rs
//!
//! End-to-end client behavior against the in-memory transport.

use std::time::Duration;

use econ_data_client::idl;
use econ_data_client::mock::MockTransport;
use econ_data_client::{
    default_program_id, ClientConfig, ClientError, FetchError, InvoiceRecord, InvoiceSubmissionClient, SubmitOptions,
    SubmissionFilter, SubmissionStats, TransportError, SEED_ECONOMIC_DATA,
};
use rand::Rng;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::signer::keypair::keypair_from_seed;

fn owner_a() -> Keypair {
    keypair_from_seed(&[11u8; 32]).unwrap()
}

fn invoice(id: u64) -> InvoiceRecord {
    InvoiceRecord::stamped_now(id, "INV12345", "HSN998877", 100_000, 50, "https://example.com/proof.jpg")
}

fn client(transport: MockTransport) -> InvoiceSubmissionClient<MockTransport> {
    InvoiceSubmissionClient::new(default_program_id(), transport)
}

#[test]
fn derivation_is_repeatable_for_fixed_owner() {
    let c = client(MockTransport::accepting());
    let owner = owner_a().pubkey();

    let x = c.derive_account_address(SEED_ECONOMIC_DATA, owner.as_ref(), 1).unwrap();
    let again = c.derive_account_address(SEED_ECONOMIC_DATA, owner.as_ref(), 1).unwrap();
    assert_eq!(x, again);
    assert_eq!(x.to_bytes().len(), 32);
}

#[test]
fn distinct_ids_give_distinct_addresses() {
    let c = client(MockTransport::accepting());
    let owner = owner_a().pubkey();
    let mut rng = rand::thread_rng();

    let mut seen = std::collections::HashSet::new();
    for id in (0..64u64).chain((0..64).map(|_| rng.gen::<u64>())) {
        let addr = c.derive_account_address(SEED_ECONOMIC_DATA, owner.as_ref(), id).unwrap();
        seen.insert((id, addr.address));
    }
    let ids: std::collections::HashSet<_> = seen.iter().map(|(id, _)| *id).collect();
    let addrs: std::collections::HashSet<_> = seen.iter().map(|(_, a)| *a).collect();
    assert_eq!(ids.len(), addrs.len());
}

#[tokio::test]
async fn accepted_submission_returns_signature() {
    let c = client(MockTransport::accepting());
    let signer = owner_a();
    let record = invoice(1);

    let sig = c.submit(&record, &signer).await.unwrap();
    assert!(!sig.is_empty());

    let sent = c.transport().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].data, idl::encode_submit(&record).unwrap());
    assert_eq!(sent[0].accounts[0].pubkey, c.account_for(&signer.pubkey(), &record).address);
    assert_eq!(sent[0].accounts[1].pubkey, signer.pubkey());
}

#[tokio::test]
async fn rejected_submission_surfaces_error() {
    let c = client(MockTransport::rejecting("Transaction simulation failed"));
    let signer = owner_a();

    let err = c.submit(&invoice(1), &signer).await.unwrap_err();
    match err {
        ClientError::Submission(TransportError::Rejected(reason)) => {
            assert!(reason.contains("simulation"));
        }
        other => panic!("expected submission error, got {other:?}"),
    }
    assert!(c.transport().sent().is_empty());
}

#[tokio::test]
async fn mismatched_account_is_rejected_before_sending() {
    let c = client(MockTransport::accepting());
    let signer = owner_a();
    let other_id_account = c.account_for(&signer.pubkey(), &invoice(2)).address;

    let err = c.submit_to_account(&invoice(1), &signer, &other_id_account).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidInput(_)));
    assert!(c.transport().sent().is_empty());

    let matching = c.account_for(&signer.pubkey(), &invoice(1)).address;
    c.submit_to_account(&invoice(1), &signer, &matching).await.unwrap();
    assert_eq!(c.transport().sent().len(), 1);
}

#[tokio::test]
async fn deadline_turns_slow_submission_into_timeout() {
    let c = client(MockTransport::accepting().with_latency(Duration::from_millis(200)));
    let signer = owner_a();
    let opts = SubmitOptions { deadline: Some(Duration::from_millis(10)) };

    let err = c.submit_with(&invoice(1), &signer, opts).await.unwrap_err();
    assert!(matches!(err, ClientError::Submission(TransportError::Timeout(_))));
}

#[tokio::test]
async fn configured_timeout_applies_to_plain_submit() {
    let cfg = ClientConfig { submit_timeout_ms: Some(10), ..ClientConfig::default() };
    let transport = MockTransport::accepting().with_latency(Duration::from_millis(200));
    let c = InvoiceSubmissionClient::from_config(&cfg, transport).unwrap();

    let err = c.submit(&invoice(1), &owner_a()).await.unwrap_err();
    assert!(matches!(err, ClientError::Submission(TransportError::Timeout(d)) if d == Duration::from_millis(10)));
}

#[tokio::test]
async fn default_deadline_yields_to_per_call_deadline() {
    let transport = MockTransport::accepting().with_latency(Duration::from_millis(50));
    let c = client(transport).with_deadline(Some(Duration::from_millis(5)));
    let signer = owner_a();

    let err = c.submit(&invoice(1), &signer).await.unwrap_err();
    assert!(matches!(err, ClientError::Submission(TransportError::Timeout(_))));

    let opts = SubmitOptions { deadline: Some(Duration::from_secs(5)) };
    c.submit_with(&invoice(1), &signer, opts).await.unwrap();
    assert_eq!(c.transport().sent().len(), 1);
}

#[tokio::test]
async fn zero_deadline_is_rejected_before_sending() {
    let c = client(MockTransport::accepting());
    let opts = SubmitOptions { deadline: Some(Duration::ZERO) };

    let err = c.submit_with(&invoice(1), &owner_a(), opts).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidInput(_)));
    assert!(c.transport().sent().is_empty());

    let c = client(MockTransport::accepting()).with_deadline(Some(Duration::ZERO));
    let err = c.submit(&invoice(1), &owner_a()).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidInput(_)));
}

#[tokio::test]
async fn balance_comes_from_transport() {
    let c = client(MockTransport::accepting().with_balance(2_500_000_000));
    assert_eq!(c.balance(&owner_a().pubkey()).await.unwrap(), 2_500_000_000);
}

#[tokio::test]
async fn listing_aborts_on_corrupted_account() {
    let authority = owner_a().pubkey();
    let mut corrupted = idl::encode_account(&authority, &invoice(2));
    corrupted.truncate(corrupted.len() - 5);

    let transport = MockTransport::accepting()
        .with_account(Pubkey::new_unique(), idl::encode_account(&authority, &invoice(1)))
        .with_account(Pubkey::new_unique(), corrupted)
        .with_account(Pubkey::new_unique(), idl::encode_account(&authority, &invoice(3)));
    let c = client(transport);

    let listing = c.list_submissions(&default_program_id()).await.unwrap();
    assert_eq!(listing.remaining(), 3);
    let err = listing.try_collect_all().unwrap_err();
    assert!(matches!(err, ClientError::Fetch(FetchError::Decode { .. })));
}

#[tokio::test]
async fn listing_reports_damaged_type_tag() {
    let authority = owner_a().pubkey();
    let damaged_at = Pubkey::new_unique();
    let mut corrupted = idl::encode_account(&authority, &invoice(2));
    corrupted[0] ^= 0xff;

    let transport = MockTransport::accepting()
        .with_account(Pubkey::new_unique(), idl::encode_account(&authority, &invoice(1)))
        .with_account(damaged_at, corrupted)
        .with_account(Pubkey::new_unique(), idl::encode_account(&authority, &invoice(3)));
    let c = client(transport);

    let err = c.list_submissions(&default_program_id()).await.unwrap().try_collect_all().unwrap_err();
    match err {
        ClientError::Fetch(FetchError::Decode { address, .. }) => assert_eq!(address, damaged_at),
        other => panic!("expected decode failure, got {other:?}"),
    }

    let typed = c.list_submissions_filtered(&default_program_id()).await.unwrap();
    assert_eq!(typed.remaining(), 2);
    typed.try_collect_all().unwrap();
}

#[tokio::test]
async fn listing_decodes_filters_and_counts() {
    let authority = owner_a().pubkey();
    let mut cheap = invoice(1);
    cheap.amount = 10;
    let transport = MockTransport::accepting()
        .with_account(Pubkey::new_unique(), idl::encode_account(&authority, &cheap))
        .with_account(Pubkey::new_unique(), idl::encode_account(&authority, &invoice(2)))
        .with_account(Pubkey::new_unique(), b"not an economic data account".to_vec());
    let c = client(transport);

    let err = c.list_submissions(&default_program_id()).await.unwrap().try_collect_all().unwrap_err();
    assert!(matches!(err, ClientError::Fetch(FetchError::Decode { .. })));

    let records = c.list_submissions_filtered(&default_program_id()).await.unwrap().try_collect_all().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.authority == authority));

    let filter = SubmissionFilter { min_amount: Some(1_000), ..Default::default() };
    let kept: Vec<_> = records.iter().map(|r| &r.record).filter(|r| filter.matches(r)).collect();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].invoice_data_hash_id, 2);

    let stats = SubmissionStats::from_records(records.iter().map(|r| &r.record));
    assert_eq!(stats.total_transactions, 2);
    assert_eq!(stats.total_amount, 100_010);
}

#[tokio::test]
async fn enumeration_failure_is_fetch_error() {
    let c = client(MockTransport::rejecting("node unavailable"));
    let err = c.list_submissions(&default_program_id()).await.err().unwrap();
    assert!(matches!(err, ClientError::Fetch(FetchError::Enumerate(_))));
}
