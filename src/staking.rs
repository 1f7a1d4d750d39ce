multiversx_sc::imports!();

use crate::custody;
use crate::errors::*;
use crate::fixed_width;
use crate::storage_keys::{self, STAKING_TAG};
use crate::types::StakePosition;

// ============================================================
// Staking parameters
// ============================================================

pub const MIN_STAKE_AMOUNT: u64 = 1_000;

/// Reward units emitted per block, shared pro rata by all stakers
pub const REWARD_RATE_PER_BLOCK: u64 = 100;

/// 10% of the withdrawn amount is kept when leaving before unlock
pub const EARLY_WITHDRAWAL_PENALTY_BPS: u64 = 1_000;

/// Lock tiers in blocks: ~1 day, ~1 week, ~1 month
pub const SHORT_LOCK_PERIOD: u64 = 144;
pub const MEDIUM_LOCK_PERIOD: u64 = 1_008;
pub const LONG_LOCK_PERIOD: u64 = 4_320;

/// Voting weight multipliers in basis points (10_000 = 1.0x)
pub const BASE_MULTIPLIER_BPS: u64 = 10_000;
pub const SHORT_LOCK_MULTIPLIER_BPS: u64 = 12_500;
pub const MEDIUM_LOCK_MULTIPLIER_BPS: u64 = 15_000;
pub const LONG_LOCK_MULTIPLIER_BPS: u64 = 20_000;

/// Multiplier for the lock time still remaining.
pub fn lock_multiplier_bps(remaining_lock_blocks: u64) -> u64 {
    if remaining_lock_blocks >= LONG_LOCK_PERIOD {
        LONG_LOCK_MULTIPLIER_BPS
    } else if remaining_lock_blocks >= MEDIUM_LOCK_PERIOD {
        MEDIUM_LOCK_MULTIPLIER_BPS
    } else if remaining_lock_blocks >= SHORT_LOCK_PERIOD {
        SHORT_LOCK_MULTIPLIER_BPS
    } else {
        BASE_MULTIPLIER_BPS
    }
}

#[multiversx_sc::module]
pub trait StakingModule:
    storage_keys::StorageKeySpaceModule
    + fixed_width::FixedWidthModule
    + custody::CustodyModule
{
    // ========================================================
    // ENDPOINT: stake
    // Attached protocol tokens are the stake. Every deposit
    // restarts the lock window and the reward clock from now.
    // ========================================================

    #[payable("*")]
    #[endpoint(stake)]
    fn stake(&self, lock_period: u64) {
        let amount = self.require_protocol_payment();
        let caller = self.blockchain().get_caller();
        let now = self.blockchain().get_block_nonce();

        require!(amount >= MIN_STAKE_AMOUNT, ERR_BELOW_MINIMUM);
        require!(lock_period >= SHORT_LOCK_PERIOD, ERR_LOCK_TOO_SHORT);

        let new_stake = self.add_u256(&self.staked_amount(&caller).get(), &amount);
        let new_total = self.add_u256(&self.total_staked().get(), &amount);
        let unlock_block = self.add_u64(now, lock_period);

        self.staked_amount(&caller).set(&new_stake);
        self.unlock_block(&caller).set(unlock_block);
        self.last_reward_block(&caller).set(now);
        self.total_staked().set(&new_total);

        self.staked_event(&caller, unlock_block, &amount);
    }

    // ========================================================
    // ENDPOINT: withdraw
    // Pending rewards are paid first. The full amount leaves the
    // position; before unlock only 90% of it is returned.
    // ========================================================

    #[endpoint(withdraw)]
    fn withdraw(&self, amount: BigUint) -> BigUint {
        let caller = self.blockchain().get_caller();
        let now = self.blockchain().get_block_nonce();

        let staked = self.staked_amount(&caller).get();
        require!(amount <= staked, ERR_INSUFFICIENT_STAKE);

        let penalty = if now < self.unlock_block(&caller).get() {
            self.apply_bps(&amount, EARLY_WITHDRAWAL_PENALTY_BPS)
        } else {
            BigUint::zero()
        };
        let withdraw_amount = &amount - &penalty;

        self.pay_rewards(&caller, now);

        let remaining = self.sub_u256(&staked, &amount);
        let new_total = self.sub_u256(&self.total_staked().get(), &amount);
        self.staked_amount(&caller).set(&remaining);
        self.total_staked().set(&new_total);

        self.accrue_protocol_fee(&penalty);
        self.send_protocol_tokens(&caller, &withdraw_amount);

        self.withdrawn_event(&caller, &amount, &withdraw_amount);

        withdraw_amount
    }

    // ========================================================
    // ENDPOINT: claimRewards
    // ========================================================

    #[endpoint(claimRewards)]
    fn claim_rewards(&self) -> BigUint {
        let caller = self.blockchain().get_caller();
        let now = self.blockchain().get_block_nonce();
        self.pay_rewards(&caller, now)
    }

    /// Mints what accrued over [lastRewardBlock, now]. The reward clock only
    /// moves when something is paid.
    fn pay_rewards(&self, staker: &ManagedAddress, now: u64) -> BigUint {
        let rewards = self.calculate_pending_rewards(staker, now);
        if rewards > 0u64 {
            self.last_reward_block(staker).set(now);
            self.mint_protocol_tokens(staker, &rewards);
            self.rewards_claimed_event(staker, now, &rewards);
        }
        rewards
    }

    // ========================================================
    // VIEWS
    // ========================================================

    /// floor(staked * blocksSince * REWARD_RATE_PER_BLOCK / totalStaked),
    /// against the current total.
    #[view(calculatePendingRewards)]
    fn calculate_pending_rewards(&self, staker: &ManagedAddress, now: u64) -> BigUint {
        let staked = self.staked_amount(staker).get();
        if staked == 0u64 {
            return BigUint::zero();
        }

        let total_staked = self.total_staked().get();
        if total_staked == 0u64 {
            return BigUint::zero();
        }

        let last_reward_block = self.last_reward_block(staker).get();
        let blocks_since = now
            .checked_sub(last_reward_block)
            .unwrap_or_else(|| sc_panic!(ERR_REWARD_BLOCK_IN_FUTURE));

        let emitted = BigUint::from(blocks_since) * BigUint::from(REWARD_RATE_PER_BLOCK);
        self.mul_div_floor(&staked, &emitted, &total_staked)
    }

    #[view(getVotingWeight)]
    fn get_voting_weight(&self, staker: &ManagedAddress) -> BigUint {
        let now = self.blockchain().get_block_nonce();
        self.voting_weight_at(staker, now)
    }

    fn voting_weight_at(&self, staker: &ManagedAddress, now: u64) -> BigUint {
        let staked = self.staked_amount(staker).get();
        let unlock_block = self.unlock_block(staker).get();
        if now >= unlock_block {
            return staked;
        }

        let multiplier = lock_multiplier_bps(unlock_block - now);
        self.apply_bps(&staked, multiplier)
    }

    #[view(getTotalStaked)]
    fn get_total_staked(&self) -> BigUint {
        self.total_staked().get()
    }

    #[view(getUserStakedAmount)]
    fn get_user_staked_amount(&self, staker: &ManagedAddress) -> BigUint {
        self.staked_amount(staker).get()
    }

    #[view(getUserUnlockBlock)]
    fn get_user_unlock_block(&self, staker: &ManagedAddress) -> u64 {
        self.unlock_block(staker).get()
    }

    #[view(getStakePosition)]
    fn get_stake_position(&self, staker: &ManagedAddress) -> StakePosition<Self::Api> {
        StakePosition {
            staked_amount: self.staked_amount(staker).get(),
            unlock_block: self.unlock_block(staker).get(),
            last_reward_block: self.last_reward_block(staker).get(),
        }
    }

    #[view(getStakingConfig)]
    fn get_staking_config(&self) -> MultiValue6<u64, u64, u64, u64, u64, u64> {
        (
            MIN_STAKE_AMOUNT,
            REWARD_RATE_PER_BLOCK,
            EARLY_WITHDRAWAL_PENALTY_BPS,
            SHORT_LOCK_PERIOD,
            MEDIUM_LOCK_PERIOD,
            LONG_LOCK_PERIOD,
        )
            .into()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("staked")]
    fn staked_event(
        &self,
        #[indexed] staker: &ManagedAddress,
        #[indexed] unlock_block: u64,
        amount: &BigUint,
    );

    #[event("withdrawn")]
    fn withdrawn_event(
        &self,
        #[indexed] staker: &ManagedAddress,
        #[indexed] debited: &BigUint,
        returned: &BigUint,
    );

    #[event("rewardsClaimed")]
    fn rewards_claimed_event(
        &self,
        #[indexed] staker: &ManagedAddress,
        #[indexed] block: u64,
        amount: &BigUint,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("totalStaked")]
    fn total_staked(&self) -> SingleValueMapper<BigUint>;

    // ── Stake position fields (keyed by staker under the "staking" tag) ──

    fn staked_amount(
        &self,
        staker: &ManagedAddress,
    ) -> SingleValueMapper<Self::Api, BigUint<Self::Api>> {
        SingleValueMapper::new(self.entity_key(STAKING_TAG, 0, Some(staker), b"stake"))
    }

    fn unlock_block(&self, staker: &ManagedAddress) -> SingleValueMapper<Self::Api, u64> {
        SingleValueMapper::new(self.entity_key(STAKING_TAG, 0, Some(staker), b"unlock"))
    }

    fn last_reward_block(&self, staker: &ManagedAddress) -> SingleValueMapper<Self::Api, u64> {
        SingleValueMapper::new(self.entity_key(STAKING_TAG, 0, Some(staker), b"lastReward"))
    }
}
