// ============================================================
// Failure reasons surfaced to callers
// ============================================================

// ── Shared ──

pub const ERR_ARITHMETIC_OVERFLOW: &str = "Arithmetic overflow";
pub const ERR_ARITHMETIC_UNDERFLOW: &str = "Arithmetic underflow";
pub const ERR_INVALID_TOKEN: &str = "Invalid protocol token identifier";
pub const ERR_WRONG_PAYMENT_TOKEN: &str = "Payment must be in the protocol token";
pub const ERR_NOT_OWNER: &str = "Only the owner can withdraw protocol fees";
pub const ERR_NOTHING_TO_WITHDRAW: &str = "No protocol fees to withdraw";

// ── Governance ──

pub const ERR_INSUFFICIENT_POWER: &str = "Insufficient voting power to propose";
pub const ERR_PROPOSAL_NOT_FOUND: &str = "Proposal does not exist";
pub const ERR_INVALID_SUPPORT: &str = "Invalid vote support value";
pub const ERR_VOTING_NOT_STARTED: &str = "Voting not started";
pub const ERR_VOTING_ENDED: &str = "Voting ended";
pub const ERR_PROPOSAL_NOT_OPEN: &str = "Proposal is not open for voting";
pub const ERR_ALREADY_VOTED: &str = "Already voted";
pub const ERR_NO_VOTING_POWER: &str = "No voting power";
pub const ERR_VOTING_NOT_ENDED: &str = "Voting period not ended";
pub const ERR_ALREADY_FINALIZED: &str = "Proposal already finalized";
pub const ERR_NOT_SUCCEEDED: &str = "Proposal not in succeeded state";
pub const ERR_TIMELOCK_ACTIVE: &str = "Timelock not expired";
pub const ERR_NOT_PROPOSER: &str = "Only proposer can cancel";
pub const ERR_ALREADY_EXECUTED: &str = "Cannot cancel executed proposal";

// ── Market ──

pub const ERR_MARKET_NOT_FOUND: &str = "Market does not exist";
pub const ERR_END_TIME_IN_PAST: &str = "End time must be in the future";
pub const ERR_BAD_RESOLUTION_ORDER: &str = "Resolution time must be after end time";
pub const ERR_MARKET_NOT_ACTIVE: &str = "Market is not active";
pub const ERR_BETTING_CLOSED: &str = "Betting period has ended";
pub const ERR_BET_TOO_SMALL: &str = "Bet amount too low";
pub const ERR_BET_SIDE_MISMATCH: &str = "Cannot bet on both sides of a market";
pub const ERR_UNAUTHORIZED_RESOLVER: &str = "Unauthorized resolver";
pub const ERR_TOO_EARLY: &str = "Resolution time not reached";
pub const ERR_INVALID_OUTCOME: &str = "Invalid outcome";
pub const ERR_NOT_RESOLVED: &str = "Market not resolved";
pub const ERR_NO_BET: &str = "No bet found";
pub const ERR_ALREADY_CLAIMED: &str = "Already claimed";
pub const ERR_NOT_CREATOR: &str = "Only creator can cancel";
pub const ERR_AFTER_END_TIME: &str = "Cannot cancel after end time";
pub const ERR_MARKET_NOT_CANCELLED: &str = "Market is not cancelled";

// ── Staking ──

pub const ERR_BELOW_MINIMUM: &str = "Amount below minimum stake";
pub const ERR_LOCK_TOO_SHORT: &str = "Lock period too short";
pub const ERR_INSUFFICIENT_STAKE: &str = "Insufficient staked amount";
pub const ERR_REWARD_BLOCK_IN_FUTURE: &str = "Block precedes last reward block";
