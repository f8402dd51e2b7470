// 📤 History Export - Ledger to CSV for spreadsheets
//
// One row per transaction, newest-first like the on-screen history list.
// Multi-transaction entries produce one row per transaction sharing the
// entry's time, round and dealer seat.

use crate::ledger::Ledger;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const HEADERS: [&str; 6] = ["time", "round", "dealer_seat", "from", "to", "amount"];

/// Write the history ledger as CSV to any writer.
pub fn export_history_csv<W: Write>(ledger: &Ledger, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS)
        .context("failed to write CSV header")?;

    for entry in ledger.history().entries() {
        for tx in &entry.transactions {
            wtr.write_record([
                entry.formatted_time(),
                entry.round.to_string(),
                entry.dealer_index.to_string(),
                tx.from.clone(),
                tx.to.clone(),
                tx.amount.to_string(),
            ])
            .context("failed to write CSV row")?;
        }
    }

    wtr.flush().context("failed to flush CSV output")?;
    Ok(())
}

/// Write the history ledger as CSV to a file path.
pub fn export_history_to_path<P: AsRef<Path>>(ledger: &Ledger, path: P) -> Result<()> {
    let file = File::create(path.as_ref())
        .with_context(|| format!("failed to create CSV file: {:?}", path.as_ref()))?;
    export_history_csv(ledger, file)
}

// ============================================================================
// TESTS
// ============================================================================
