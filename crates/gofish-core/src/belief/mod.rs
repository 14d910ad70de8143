mod memory;

pub use memory::{FAILED_RANK_THRESHOLD, FAILURE_DELTA, OpponentMemory, SUCCESS_DELTA};
