//! `RemoteClient` against an in-process server
//!
//! The blocking client cannot run inside a tokio runtime, so each server gets
//! its own runtime on a background thread.

use std::sync::Arc;

use tempfile::TempDir;

use barbacoa_cli::api::{serve, AppState, RemoteClient};
use barbacoa_cli::config::BarbacoaPaths;
use barbacoa_cli::models::{Barbacoa, Expense, Money, PartnerMap};
use barbacoa_cli::services::{record, LocalBackend, SettlementBackend};
use barbacoa_cli::storage::Storage;
use barbacoa_cli::BarbacoaError;

fn open_storage(dir: &TempDir) -> Storage {
    let paths = BarbacoaPaths::with_base_dir(dir.path().to_path_buf());
    let storage = Storage::new(paths).unwrap();
    storage.load_all().unwrap();
    storage
}

fn spawn_server() -> (TempDir, RemoteClient) {
    let temp_dir = TempDir::new().unwrap();
    let state = AppState::new(Arc::new(open_storage(&temp_dir)), true);

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            serve(listener, state).await.unwrap();
        });
    });

    let client = RemoteClient::new(&format!("http://{}", addr)).unwrap();
    (temp_dir, client)
}

fn expenses() -> Vec<Expense> {
    vec![
        Expense::new("Ana", "Carne", Money::from_cents(6000)),
        Expense::new("Bea", "Pan y bebida", Money::from_cents(6000)),
        Expense::new("Carlos", "", Money::zero()),
        Expense::new("Dani", "", Money::from_cents(1)),
    ]
}

fn event(name: &str) -> Barbacoa {
    record(name, expenses(), &PartnerMap::new()).unwrap()
}

#[test]
fn remote_settle_matches_local_engine() {
    let (_server_dir, client) = spawn_server();
    let local_dir = TempDir::new().unwrap();
    let storage = open_storage(&local_dir);
    let local = LocalBackend::new(&storage);

    let mut partners = PartnerMap::new();
    partners.insert("Carlos", "Bea");
    partners.insert("Bea", "Carlos");

    assert_eq!(
        client.settle(&expenses(), &partners).unwrap(),
        local.settle(&expenses(), &partners).unwrap()
    );
    assert_eq!(
        client.settle(&expenses(), &PartnerMap::new()).unwrap(),
        local.settle(&expenses(), &PartnerMap::new()).unwrap()
    );
}

#[test]
fn remote_settle_reports_rejected_input() {
    let (_dir, client) = spawn_server();
    let bad = vec![Expense::new("", "", Money::from_cents(100))];

    let err = client.settle(&bad, &PartnerMap::new()).unwrap_err();
    match err {
        BarbacoaError::Transport(message) => {
            assert!(message.starts_with("422"));
            assert!(message.contains("participant"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn remote_event_store_round_trip() {
    let (_dir, client) = spawn_server();

    client.save(&event("San Juan")).unwrap();
    client.save(&event("Nochevieja")).unwrap();

    let names: Vec<String> = client.list().unwrap().into_iter().map(|b| b.name).collect();
    assert_eq!(names, vec!["San Juan", "Nochevieja"]);

    let found = client.find("San Juan").unwrap().unwrap();
    assert_eq!(found.total_amount, Money::from_cents(12001));
    assert_eq!(found.participants.len(), 4);
    assert_eq!(found.transfers, event("San Juan").transfers);

    assert!(client.find("Verano").unwrap().is_none());
}

#[test]
fn remote_save_rejects_duplicate_name() {
    let (_dir, client) = spawn_server();
    client.save(&event("Playa")).unwrap();

    let err = client.save(&event("  PLAYA ")).unwrap_err();
    assert!(err.is_duplicate_event_name());
    assert_eq!(client.list().unwrap().len(), 1);
}

#[test]
fn remote_delete() {
    let (_dir, client) = spawn_server();
    client.save(&event("Playa")).unwrap();

    let deleted = client.delete("Playa").unwrap();
    assert_eq!(deleted.name, "Playa");
    assert!(client.list().unwrap().is_empty());

    let err = client.delete("Playa").unwrap_err();
    assert!(err.is_not_found());
}
