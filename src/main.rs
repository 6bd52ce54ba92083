//! # Order Pipeline
//!
//! Interactive restaurant order simulator.
//!
//! The console accepts orders on the main task while a dispatcher hands each one to
//! its own worker in the background. Choosing "Exit" (or closing stdin) waits for
//! every accepted order to finish before the process ends.

use dotenv::dotenv;
use order_pipeline::console::{announce_receipts, Console};
use order_pipeline::lifecycle::{setup_tracing, OrderSystem, SystemConfig};
use tokio::io::BufReader;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    dotenv().ok();
    setup_tracing();

    let result = run().await;
    if let Err(e) = &result {
        error!(error = %e, "Order pipeline stopped with an error");
    }
    println!("Program finished");
    result
}

async fn run() -> Result<(), String> {
    let config = SystemConfig::from_env().map_err(|e| e.to_string())?;
    let store = config.load_menu().map_err(|e| e.to_string())?;
    info!(?config, "Starting order pipeline");

    let (system, receipts) = OrderSystem::with_receipts(&config, store);
    let announcer = tokio::spawn(announce_receipts(receipts, std::io::stdout()));

    let console = Console::new(BufReader::new(tokio::io::stdin()), std::io::stdout());
    let report = console.run(system).await.map_err(|e| e.to_string())?;

    // Workers are gone once the system has drained, which ends the announcer.
    if let Err(e) = announcer.await {
        error!(error = %e, "Receipt announcer failed");
    }

    info!(
        dispatched = report.dispatched,
        done = report.done,
        failed = report.failed,
        total = %report.total,
        "Application completed successfully"
    );
    Ok(())
}
