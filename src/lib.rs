pub mod consts;
pub mod cpu;
pub mod instr;
pub mod mem;
pub mod rupt;
pub mod utils;

use thiserror::Error;

/// Programmer errors raised synchronously by the external surfaces of the
/// simulator. Machine faults (parity, TC TRAP, RUPT LOCK) are latches on the
/// machine state instead and never abort execution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgcError {
    #[error("unknown mnemonic: {0}")]
    UnknownMnemonic(String),
    #[error("unknown DSKY mode: {0}")]
    UnknownDskyMode(String),
}
