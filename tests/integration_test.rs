use order_pipeline::lifecycle::{OrderError, OrderSystem, SystemConfig};
use order_pipeline::menu_store::{MenuError, MenuStore};
use order_pipeline::intake::IntakeError;
use order_pipeline::console::parse_quantity;
use order_pipeline::model::{MenuItem, OrderId};
use order_pipeline::worker::{DetailRecord, WorkerState};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Duration;

fn config(delay_ms: u64) -> SystemConfig {
    SystemConfig {
        processing_delay: Duration::from_millis(delay_ms),
        ..SystemConfig::default()
    }
}

async fn stock_of(system: &OrderSystem, name: &str) -> u32 {
    system.find_item(name).await.expect("item on menu").stock
}

/// Full end-to-end run: reserve, process, drain.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_full_order_pipeline() {
    let (mut system, mut receipts) = OrderSystem::with_receipts(&config(20), MenuStore::default_menu());

    let ticket = system
        .place_order("Nasi Goreng", 3)
        .await
        .expect("Failed to place order");
    assert_eq!(ticket.id, OrderId(1));
    assert_eq!(ticket.total_price, dec!(45000));
    assert_eq!(stock_of(&system, "Nasi Goreng").await, 7);

    let report = system.shutdown().await.expect("Failed to shutdown system");
    assert_eq!(report.dispatched, 1);
    assert_eq!(report.done, 1);
    assert_eq!(report.failed, 0);
    assert_eq!(report.total, dec!(45000));

    let receipt = receipts.recv().await.expect("one receipt");
    assert_eq!(receipt.order_id, OrderId(1));
    assert_eq!(receipt.state, WorkerState::Done);
    assert_eq!(
        DetailRecord::decode(&receipt.encoded_detail).unwrap().as_str(),
        "ID:1,Item:Nasi Goreng,Quantity:3,TotalPrice:45000.00"
    );
    assert!(receipts.recv().await.is_none(), "channel closes after drain");
}

#[tokio::test]
async fn test_rejected_orders_change_nothing() {
    let mut system = OrderSystem::new(&config(5), MenuStore::default_menu());

    let too_many = system.place_order("Nasi Goreng", 11).await;
    assert!(matches!(
        too_many,
        Err(OrderError::Intake(IntakeError::Menu(MenuError::InsufficientStock {
            requested: 11,
            available: 10,
            ..
        })))
    ));

    let unknown = system.place_order("Rendang", 1).await;
    assert!(matches!(
        unknown,
        Err(OrderError::Intake(IntakeError::Menu(MenuError::ItemNotFound(_))))
    ));

    // "abc" never reaches the system: parsing rejects it first.
    assert!(matches!(parse_quantity("abc"), Err(IntakeError::InvalidQuantity(_))));

    assert_eq!(stock_of(&system, "Nasi Goreng").await, 10);
    assert_eq!(system.outstanding(), 0);

    let report = system.shutdown().await.unwrap();
    assert_eq!(report.dispatched, 0);
    assert_eq!(report.total, Decimal::ZERO);

    // Ids are only consumed by accepted orders.
    let mut system = OrderSystem::new(&config(5), MenuStore::default_menu());
    assert!(system.place_order("Sate Ayam", 6).await.is_err());
    let first = system.place_order("Sate Ayam", 5).await.unwrap();
    assert_eq!(first.id, OrderId(1));
    system.shutdown().await.unwrap();
}

/// Two concurrent orders: the total is exact whichever worker finishes first.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_total_is_independent_of_completion_order() {
    let mut system = OrderSystem::new(&config(30), MenuStore::default_menu());

    let a = system.place_order("Nasi Goreng", 3).await.unwrap();
    let b = system.place_order("Sate Ayam", 1).await.unwrap();
    assert_eq!(a.total_price + b.total_price, dec!(65000));

    let report = system.shutdown().await.unwrap();
    assert_eq!(report.total, dec!(65000));
    assert_eq!(report.done, 2);
}

/// Shutdown must not return while a worker is still processing.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shutdown_waits_for_in_flight_orders() {
    let mut system = OrderSystem::new(&config(200), MenuStore::default_menu());

    let mut expected = Decimal::ZERO;
    for _ in 0..5 {
        expected += system.place_order("Es Teh", 2).await.unwrap().total_price;
    }
    assert!(system.outstanding() > 0);
    assert_eq!(system.total().await, Decimal::ZERO, "nothing processed yet");

    let started = tokio::time::Instant::now();
    let report = system.shutdown().await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(150));
    assert_eq!(report.done, 5);
    assert_eq!(report.total, expected);
    assert_eq!(report.total, dec!(50000));
}

/// Ids are strictly increasing and the total after drain equals the sum of all
/// accepted orders, with more orders than the queue holds.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_orders_through_small_queue() {
    let config = SystemConfig {
        queue_capacity: 2,
        max_workers: 3,
        processing_delay: Duration::from_millis(10),
        menu_file: None,
    };
    let store = MenuStore::new(vec![
        MenuItem::new("Kopi", dec!(8000.50), 40),
        MenuItem::new("Roti", dec!(3500), 40),
    ])
    .unwrap();
    let mut system = OrderSystem::new(&config, store);

    let mut expected = Decimal::ZERO;
    let mut last_id = OrderId(0);
    for i in 0..30u32 {
        let item = if i % 2 == 0 { "Kopi" } else { "roti" };
        let ticket = system.place_order(item, 1 + i % 3).await.unwrap();
        assert!(ticket.id > last_id);
        last_id = ticket.id;
        expected += ticket.total_price;
    }
    assert_eq!(last_id, OrderId(30));

    let report = system.shutdown().await.unwrap();
    assert_eq!(report.dispatched, 30);
    assert_eq!(report.done, 30);
    assert_eq!(report.failed, 0);
    assert_eq!(report.total, expected);
}

#[tokio::test]
async fn test_menu_snapshot_reflects_reservations() {
    let mut system = OrderSystem::new(&config(5), MenuStore::default_menu());
    system.place_order("mie ayam", 8).await.unwrap();

    let menu = system.menu().await;
    let mie = menu.iter().find(|item| item.name == "Mie Ayam").unwrap();
    assert_eq!(mie.stock, 0);
    assert!(menu.iter().all(|item| item.name == "Mie Ayam" || item.stock > 0));

    system.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_dropped_receipt_listener_does_not_fail_orders() {
    let (mut system, receipts) = OrderSystem::with_receipts(&config(10), MenuStore::default_menu());
    drop(receipts);

    system.place_order("Es Teh", 1).await.unwrap();
    system.place_order("Mie Ayam", 2).await.unwrap();

    let report = system.shutdown().await.unwrap();
    assert_eq!(report.done, 2);
    assert_eq!(report.failed, 0);
    assert_eq!(report.total, dec!(29000));
}
