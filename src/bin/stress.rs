//! Concurrent transfer stress tool
//!
//! Run with: cargo run --bin stress --release -- --transfers 100000 --tasks 16

use std::sync::Arc;
use std::time::Instant;

use atm_ledger::{AccountId, Ledger, LedgerError, Money};

fn arg_or(args: &[String], flag: &str, default: u64) -> u64 {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let transfers = arg_or(&args, "--transfers", 10_000);
    let tasks = arg_or(&args, "--tasks", 8).max(1);

    println!("Stress Test - {} transfers across {} tasks", transfers, tasks);

    let ledger = Arc::new(Ledger::with_default_accounts()?);
    let total_before = ledger.total().await;

    let a = AccountId::from("0001");
    let b = AccountId::from("0002");
    let amount = Money::from_major(1)?;

    let start = Instant::now();
    let mut handles = Vec::new();

    for task in 0..tasks {
        let ledger = Arc::clone(&ledger);
        let (a, b) = (a.clone(), b.clone());
        let count = transfers / tasks + u64::from(task < transfers % tasks);

        handles.push(tokio::spawn(async move {
            let mut applied = 0u64;
            let mut rejected = 0u64;
            for i in 0..count {
                let (from, to) = if (task + i) % 2 == 0 { (&a, &b) } else { (&b, &a) };
                match ledger.transfer(from, to, amount).await {
                    Ok(_) => applied += 1,
                    Err(LedgerError::InsufficientFunds { .. }) => rejected += 1,
                    Err(e) => return Err(e),
                }
            }
            Ok((applied, rejected))
        }));
    }

    let mut applied = 0u64;
    let mut rejected = 0u64;
    for handle in handles {
        let (ok, insufficient) = handle.await??;
        applied += ok;
        rejected += insufficient;
    }

    let elapsed = start.elapsed();
    let total_after = ledger.total().await;
    let rate = (applied + rejected) as f64 / elapsed.as_secs_f64();

    println!("\n=== Stress Test Results ===");
    println!("Applied: {}", applied);
    println!("Rejected (insufficient funds): {}", rejected);
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Rate: {:.0} transfers/sec", rate);
    for (account, balance) in ledger.snapshot().await {
        println!("  {}: {}", account, balance);
    }

    if total_before != total_after {
        anyhow::bail!(
            "total balance changed: {:?} -> {:?}",
            total_before,
            total_after
        );
    }
    println!("Total conserved: {:?}", total_after.map(|t| t.to_string()));

    Ok(())
}
