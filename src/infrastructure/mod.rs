pub mod evm;
pub mod persistence;
pub mod queue;
