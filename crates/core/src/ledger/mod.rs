//! Ledger module - snapshot indexing and balance replay.

mod balance_replay;
mod ledger_index;

pub use balance_replay::{
    native_total, AccountBalances, BalanceCursor, BalanceReplayEngine, NativeTotal,
};
pub use ledger_index::LedgerIndex;
