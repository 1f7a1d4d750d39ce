#![no_std]

multiversx_sc::imports!();

pub mod custody;
pub mod errors;
pub mod fixed_width;
pub mod governance;
pub mod market;
pub mod staking;
pub mod storage_keys;
pub mod types;

use errors::ERR_INVALID_TOKEN;

// ============================================================
// Contract
// ============================================================

/// Prediction-market protocol: proposal governance, binary-outcome
/// betting markets and time-locked staking over one protocol token.
///
/// Entity fields live in the hashed key space of `storage_keys`; only the
/// global counters and custody balances use named storage.
#[multiversx_sc::contract]
pub trait PredictionProtocol:
    storage_keys::StorageKeySpaceModule
    + fixed_width::FixedWidthModule
    + custody::CustodyModule
    + staking::StakingModule
    + governance::GovernanceModule
    + market::MarketModule
{
    // ========================================================
    // Init / Upgrade
    // ========================================================

    /// The contract needs ESDTRoleLocalMint on `protocol_token` to pay
    /// staking rewards.
    #[init]
    fn init(&self, protocol_token: TokenIdentifier) {
        require!(protocol_token.is_valid_esdt_identifier(), ERR_INVALID_TOKEN);

        self.protocol_token().set(&protocol_token);
        self.proposal_count().set(0u64);
        self.market_count().set(0u64);
        self.total_staked().set(BigUint::zero());
    }

    #[upgrade]
    fn upgrade(&self) {}
}
