multiversx_sc::imports!();

use crate::custody;
use crate::errors::*;
use crate::fixed_width;
use crate::storage_keys::{self, BET_TAG, MARKET_TAG};
use crate::types::{BetRecord, Market, MarketOutcome, MarketStatus};

// ============================================================
// Market parameters
// ============================================================

/// 2% of every winning share goes to the protocol
pub const PROTOCOL_FEE_BPS: u64 = 200;

pub const MIN_BET: u64 = 10_000;

#[multiversx_sc::module]
pub trait MarketModule:
    storage_keys::StorageKeySpaceModule
    + fixed_width::FixedWidthModule
    + custody::CustodyModule
{
    // ========================================================
    // ENDPOINT: createMarket
    // Times are block timestamps.
    // ========================================================

    #[endpoint(createMarket)]
    fn create_market(
        &self,
        question: ManagedBuffer,
        description: ManagedBuffer,
        end_time: u64,
        resolution_time: u64,
        resolver: ManagedAddress,
    ) -> u64 {
        let caller = self.blockchain().get_caller();
        let now = self.blockchain().get_block_timestamp();

        require!(end_time > now, ERR_END_TIME_IN_PAST);
        require!(resolution_time > end_time, ERR_BAD_RESOLUTION_ORDER);

        let market_id = self.add_u64(self.market_count().get(), 1);

        self.market_creator(market_id).set(&caller);
        self.market_question(market_id).set(&question);
        self.market_description(market_id).set(&description);
        self.market_end_time(market_id).set(end_time);
        self.market_resolution_time(market_id).set(resolution_time);
        self.market_resolver(market_id).set(&resolver);
        self.market_status(market_id).set(MarketStatus::Active);
        self.market_outcome(market_id).set(MarketOutcome::None);
        self.market_count().set(market_id);

        self.market_created_event(market_id, &caller, &resolver, end_time);

        market_id
    }

    // ========================================================
    // ENDPOINT: placeBet
    // The attached protocol tokens are the bet. Repeated bets
    // grow the position on the side already taken.
    // ========================================================

    #[payable("*")]
    #[endpoint(placeBet)]
    fn place_bet(&self, market_id: u64, bet_on_yes: bool) {
        let amount = self.require_protocol_payment();
        self.require_market_exists(market_id);

        let caller = self.blockchain().get_caller();
        let now = self.blockchain().get_block_timestamp();

        self.require_market_active(market_id);
        require!(
            now < self.market_end_time(market_id).get(),
            ERR_BETTING_CLOSED
        );
        require!(amount >= MIN_BET, ERR_BET_TOO_SMALL);

        let previous_amount = self.bet_amount(market_id, &caller).get();
        if previous_amount > 0u64 {
            require!(
                self.bet_side(market_id, &caller).get() == bet_on_yes,
                ERR_BET_SIDE_MISMATCH
            );
        }

        let side_pool = self.side_pool(market_id, bet_on_yes);
        let new_side_pool = self.add_u256(&side_pool.get(), &amount);
        let new_total_pool = self.add_u256(&self.market_total_pool(market_id).get(), &amount);
        let new_bet_amount = self.add_u256(&previous_amount, &amount);

        side_pool.set(&new_side_pool);
        self.market_total_pool(market_id).set(&new_total_pool);
        self.bet_side(market_id, &caller).set(bet_on_yes);
        self.bet_amount(market_id, &caller).set(&new_bet_amount);

        self.bet_placed_event(market_id, &caller, bet_on_yes, &amount);
    }

    // ========================================================
    // ENDPOINT: resolveMarket
    // outcome: 1 = YES, 2 = NO
    // ========================================================

    #[endpoint(resolveMarket)]
    fn resolve_market(&self, market_id: u64, outcome: u8) {
        self.require_market_exists(market_id);
        let caller = self.blockchain().get_caller();
        let now = self.blockchain().get_block_timestamp();

        self.require_market_active(market_id);
        require!(
            self.market_resolver(market_id).get() == caller,
            ERR_UNAUTHORIZED_RESOLVER
        );
        require!(
            now >= self.market_resolution_time(market_id).get(),
            ERR_TOO_EARLY
        );

        let outcome = match MarketOutcome::from_u8(outcome) {
            Some(MarketOutcome::Yes) => MarketOutcome::Yes,
            Some(MarketOutcome::No) => MarketOutcome::No,
            Some(MarketOutcome::None) | None => sc_panic!(ERR_INVALID_OUTCOME),
        };

        self.market_status(market_id).set(MarketStatus::Resolved);
        self.market_outcome(market_id).set(outcome);

        self.market_resolved_event(market_id, &caller, outcome);
    }

    // ========================================================
    // ENDPOINT: claimWinnings
    // Winners get their share of the total pool minus the
    // protocol fee; losers are marked claimed with 0.
    // ========================================================

    #[endpoint(claimWinnings)]
    fn claim_winnings(&self, market_id: u64) -> BigUint {
        self.require_market_exists(market_id);
        let caller = self.blockchain().get_caller();

        match self.market_status(market_id).get() {
            MarketStatus::Resolved => {}
            MarketStatus::Pending | MarketStatus::Active | MarketStatus::Cancelled => {
                sc_panic!(ERR_NOT_RESOLVED)
            },
        }

        let bet_amount = self.bet_amount(market_id, &caller).get();
        require!(bet_amount > 0u64, ERR_NO_BET);
        require!(
            !self.bet_claimed(market_id, &caller).get(),
            ERR_ALREADY_CLAIMED
        );

        let bet_on_yes = self.bet_side(market_id, &caller).get();
        let outcome = self.market_outcome(market_id).get();

        let (payout, fee) = if MarketOutcome::from_side(bet_on_yes) == outcome {
            let winning_pool = self.side_pool(market_id, bet_on_yes).get();
            let total_pool = self.market_total_pool(market_id).get();
            self.winning_payout(&bet_amount, &winning_pool, &total_pool)
        } else {
            (BigUint::zero(), BigUint::zero())
        };

        self.bet_claimed(market_id, &caller).set(true);
        self.accrue_protocol_fee(&fee);
        self.send_protocol_tokens(&caller, &payout);

        self.winnings_claimed_event(market_id, &caller, &payout);

        payout
    }

    /// (share - fee, fee) with share = floor(bet * total / winningPool)
    /// and fee = floor(share * PROTOCOL_FEE_BPS / 10_000).
    fn winning_payout(
        &self,
        bet_amount: &BigUint,
        winning_pool: &BigUint,
        total_pool: &BigUint,
    ) -> (BigUint, BigUint) {
        let share = self.mul_div_floor(bet_amount, total_pool, winning_pool);
        let fee = self.apply_bps(&share, PROTOCOL_FEE_BPS);
        let payout = self.sub_u256(&share, &fee);
        (payout, fee)
    }

    // ========================================================
    // ENDPOINT: cancelMarket
    // Creator only, while betting is still open.
    // ========================================================

    #[endpoint(cancelMarket)]
    fn cancel_market(&self, market_id: u64) {
        self.require_market_exists(market_id);
        let caller = self.blockchain().get_caller();
        let now = self.blockchain().get_block_timestamp();

        require!(
            self.market_creator(market_id).get() == caller,
            ERR_NOT_CREATOR
        );
        self.require_market_active(market_id);
        require!(
            now < self.market_end_time(market_id).get(),
            ERR_AFTER_END_TIME
        );

        self.market_status(market_id).set(MarketStatus::Cancelled);
        self.market_cancelled_event(market_id, &caller);
    }

    // ========================================================
    // ENDPOINT: claimRefund
    // Bettors of a cancelled market recover their full bet once.
    // ========================================================

    #[endpoint(claimRefund)]
    fn claim_refund(&self, market_id: u64) -> BigUint {
        self.require_market_exists(market_id);
        let caller = self.blockchain().get_caller();

        match self.market_status(market_id).get() {
            MarketStatus::Cancelled => {}
            MarketStatus::Pending | MarketStatus::Active | MarketStatus::Resolved => {
                sc_panic!(ERR_MARKET_NOT_CANCELLED)
            },
        }

        let bet_amount = self.bet_amount(market_id, &caller).get();
        require!(bet_amount > 0u64, ERR_NO_BET);
        require!(
            !self.bet_claimed(market_id, &caller).get(),
            ERR_ALREADY_CLAIMED
        );

        self.bet_claimed(market_id, &caller).set(true);
        self.send_protocol_tokens(&caller, &bet_amount);

        self.refund_claimed_event(market_id, &caller, &bet_amount);

        bet_amount
    }

    fn require_market_exists(&self, market_id: u64) {
        require!(
            market_id > 0 && market_id <= self.market_count().get(),
            ERR_MARKET_NOT_FOUND
        );
    }

    fn require_market_active(&self, market_id: u64) {
        match self.market_status(market_id).get() {
            MarketStatus::Active => {}
            MarketStatus::Pending | MarketStatus::Resolved | MarketStatus::Cancelled => {
                sc_panic!(ERR_MARKET_NOT_ACTIVE)
            },
        }
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getMarket)]
    fn get_market(&self, market_id: u64) -> Market<Self::Api> {
        self.require_market_exists(market_id);
        Market {
            id: market_id,
            creator: self.market_creator(market_id).get(),
            question: self.market_question(market_id).get(),
            description: self.market_description(market_id).get(),
            end_time: self.market_end_time(market_id).get(),
            resolution_time: self.market_resolution_time(market_id).get(),
            resolver: self.market_resolver(market_id).get(),
            status: self.market_status(market_id).get(),
            outcome: self.market_outcome(market_id).get(),
            yes_pool: self.side_pool(market_id, true).get(),
            no_pool: self.side_pool(market_id, false).get(),
            total_pool: self.market_total_pool(market_id).get(),
        }
    }

    #[view(getBet)]
    fn get_bet(&self, market_id: u64, bettor: &ManagedAddress) -> BetRecord<Self::Api> {
        BetRecord {
            bet_on_yes: self.bet_side(market_id, bettor).get(),
            amount: self.bet_amount(market_id, bettor).get(),
            claimed: self.bet_claimed(market_id, bettor).get(),
        }
    }

    #[view(getMarketCount)]
    fn get_market_count(&self) -> u64 {
        self.market_count().get()
    }

    #[view(getMarketConfig)]
    fn get_market_config(&self) -> MultiValue2<u64, u64> {
        (PROTOCOL_FEE_BPS, MIN_BET).into()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("marketCreated")]
    fn market_created_event(
        &self,
        #[indexed] market_id: u64,
        #[indexed] creator: &ManagedAddress,
        #[indexed] resolver: &ManagedAddress,
        end_time: u64,
    );

    #[event("betPlaced")]
    fn bet_placed_event(
        &self,
        #[indexed] market_id: u64,
        #[indexed] bettor: &ManagedAddress,
        #[indexed] bet_on_yes: bool,
        amount: &BigUint,
    );

    #[event("marketResolved")]
    fn market_resolved_event(
        &self,
        #[indexed] market_id: u64,
        #[indexed] resolver: &ManagedAddress,
        outcome: MarketOutcome,
    );

    #[event("winningsClaimed")]
    fn winnings_claimed_event(
        &self,
        #[indexed] market_id: u64,
        #[indexed] bettor: &ManagedAddress,
        payout: &BigUint,
    );

    #[event("marketCancelled")]
    fn market_cancelled_event(
        &self,
        #[indexed] market_id: u64,
        #[indexed] creator: &ManagedAddress,
    );

    #[event("refundClaimed")]
    fn refund_claimed_event(
        &self,
        #[indexed] market_id: u64,
        #[indexed] bettor: &ManagedAddress,
        amount: &BigUint,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("marketCount")]
    fn market_count(&self) -> SingleValueMapper<u64>;

    // ── Market fields ──

    fn market_creator(&self, id: u64) -> SingleValueMapper<Self::Api, ManagedAddress<Self::Api>> {
        SingleValueMapper::new(self.entity_key(MARKET_TAG, id, None, b"creator"))
    }

    fn market_question(&self, id: u64) -> SingleValueMapper<Self::Api, ManagedBuffer<Self::Api>> {
        SingleValueMapper::new(self.entity_key(MARKET_TAG, id, None, b"question"))
    }

    fn market_description(
        &self,
        id: u64,
    ) -> SingleValueMapper<Self::Api, ManagedBuffer<Self::Api>> {
        SingleValueMapper::new(self.entity_key(MARKET_TAG, id, None, b"description"))
    }

    fn market_end_time(&self, id: u64) -> SingleValueMapper<Self::Api, u64> {
        SingleValueMapper::new(self.entity_key(MARKET_TAG, id, None, b"endTime"))
    }

    fn market_resolution_time(&self, id: u64) -> SingleValueMapper<Self::Api, u64> {
        SingleValueMapper::new(self.entity_key(MARKET_TAG, id, None, b"resolutionTime"))
    }

    fn market_resolver(&self, id: u64) -> SingleValueMapper<Self::Api, ManagedAddress<Self::Api>> {
        SingleValueMapper::new(self.entity_key(MARKET_TAG, id, None, b"resolver"))
    }

    fn market_status(&self, id: u64) -> SingleValueMapper<Self::Api, MarketStatus> {
        SingleValueMapper::new(self.entity_key(MARKET_TAG, id, None, b"status"))
    }

    fn market_outcome(&self, id: u64) -> SingleValueMapper<Self::Api, MarketOutcome> {
        SingleValueMapper::new(self.entity_key(MARKET_TAG, id, None, b"outcome"))
    }

    fn side_pool(&self, id: u64, yes: bool) -> SingleValueMapper<Self::Api, BigUint<Self::Api>> {
        let field: &[u8] = if yes { b"yesPool" } else { b"noPool" };
        SingleValueMapper::new(self.entity_key(MARKET_TAG, id, None, field))
    }

    fn market_total_pool(&self, id: u64) -> SingleValueMapper<Self::Api, BigUint<Self::Api>> {
        SingleValueMapper::new(self.entity_key(MARKET_TAG, id, None, b"totalPool"))
    }

    // ── Bet records (market × bettor) ──

    fn bet_side(&self, id: u64, bettor: &ManagedAddress) -> SingleValueMapper<Self::Api, bool> {
        SingleValueMapper::new(self.entity_key(BET_TAG, id, Some(bettor), b"side"))
    }

    fn bet_amount(
        &self,
        id: u64,
        bettor: &ManagedAddress,
    ) -> SingleValueMapper<Self::Api, BigUint<Self::Api>> {
        SingleValueMapper::new(self.entity_key(BET_TAG, id, Some(bettor), b"amount"))
    }

    fn bet_claimed(&self, id: u64, bettor: &ManagedAddress) -> SingleValueMapper<Self::Api, bool> {
        SingleValueMapper::new(self.entity_key(BET_TAG, id, Some(bettor), b"claimed"))
    }
}
