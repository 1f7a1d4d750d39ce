multiversx_sc::imports!();

use crate::custody;
use crate::errors::*;
use crate::fixed_width;
use crate::staking;
use crate::storage_keys::{self, PROPOSAL_TAG, VOTE_TAG};
use crate::types::{Proposal, ProposalStatus, VoteRecord, VoteSupport};

// ============================================================
// Governance parameters (all periods in blocks)
// ============================================================

/// Voting power needed to open a proposal
pub const PROPOSAL_THRESHOLD: u64 = 10_000;

/// ~1 day between creation and the start of voting
pub const VOTING_DELAY: u64 = 144;

/// ~5 days of voting
pub const VOTING_PERIOD: u64 = 17_280;

/// ~2 days timelock between success and execution
pub const EXECUTION_DELAY: u64 = 2_880;

/// Absolute for + against weight a binding outcome needs
pub const QUORUM_THRESHOLD: u64 = 100_000;

#[multiversx_sc::module]
pub trait GovernanceModule:
    storage_keys::StorageKeySpaceModule
    + fixed_width::FixedWidthModule
    + custody::CustodyModule
    + staking::StakingModule
{
    // ========================================================
    // ENDPOINT: createProposal
    // ========================================================

    #[endpoint(createProposal)]
    fn create_proposal(
        &self,
        title: ManagedBuffer,
        description: ManagedBuffer,
        target: ManagedAddress,
        calldata: ManagedBuffer,
    ) -> u64 {
        let caller = self.blockchain().get_caller();
        let now = self.blockchain().get_block_nonce();

        require!(
            self.get_voting_power(&caller) >= PROPOSAL_THRESHOLD,
            ERR_INSUFFICIENT_POWER
        );

        let proposal_id = self.add_u64(self.proposal_count().get(), 1);
        let voting_start = self.add_u64(now, VOTING_DELAY);
        let voting_end = self.add_u64(voting_start, VOTING_PERIOD);

        self.proposal_proposer(proposal_id).set(&caller);
        self.proposal_title(proposal_id).set(&title);
        self.proposal_description(proposal_id).set(&description);
        self.proposal_target(proposal_id).set(&target);
        self.proposal_calldata(proposal_id).set(&calldata);
        self.proposal_voting_start(proposal_id).set(voting_start);
        self.proposal_voting_end(proposal_id).set(voting_end);
        self.proposal_status(proposal_id).set(ProposalStatus::Pending);
        self.proposal_count().set(proposal_id);

        self.proposal_created_event(proposal_id, &caller, voting_start, voting_end);

        proposal_id
    }

    // ========================================================
    // ENDPOINT: castVote
    // support: 0 = against, 1 = for, 2 = abstain.
    // The first vote inside the window opens the proposal.
    // ========================================================

    #[endpoint(castVote)]
    fn cast_vote(&self, proposal_id: u64, support: u8) {
        let support =
            VoteSupport::from_u8(support).unwrap_or_else(|| sc_panic!(ERR_INVALID_SUPPORT));
        self.require_proposal_exists(proposal_id);

        let caller = self.blockchain().get_caller();
        let now = self.blockchain().get_block_nonce();

        require!(
            now >= self.proposal_voting_start(proposal_id).get(),
            ERR_VOTING_NOT_STARTED
        );
        require!(
            now < self.proposal_voting_end(proposal_id).get(),
            ERR_VOTING_ENDED
        );

        let status = self.proposal_status(proposal_id).get();
        match status {
            ProposalStatus::Pending | ProposalStatus::Active => {}
            ProposalStatus::Succeeded
            | ProposalStatus::Defeated
            | ProposalStatus::Executed
            | ProposalStatus::Cancelled => sc_panic!(ERR_PROPOSAL_NOT_OPEN),
        }

        require!(
            !self.vote_cast(proposal_id, &caller).get(),
            ERR_ALREADY_VOTED
        );

        let weight = self.get_voting_power(&caller);
        require!(weight > 0u64, ERR_NO_VOTING_POWER);

        let tally = self.proposal_tally(proposal_id, support);
        let new_tally = self.add_u256(&tally.get(), &weight);

        if status == ProposalStatus::Pending {
            self.proposal_status(proposal_id).set(ProposalStatus::Active);
        }
        self.vote_cast(proposal_id, &caller).set(true);
        self.vote_support(proposal_id, &caller).set(support);
        self.vote_weight(proposal_id, &caller).set(&weight);
        tally.set(&new_tally);

        self.vote_cast_event(proposal_id, &caller, support, &weight);
    }

    // ========================================================
    // ENDPOINT: finalizeProposal
    // PENDING/ACTIVE → SUCCEEDED or DEFEATED once voting ends.
    // ========================================================

    #[endpoint(finalizeProposal)]
    fn finalize_proposal(&self, proposal_id: u64) {
        self.require_proposal_exists(proposal_id);
        let now = self.blockchain().get_block_nonce();

        require!(
            now >= self.proposal_voting_end(proposal_id).get(),
            ERR_VOTING_NOT_ENDED
        );

        match self.proposal_status(proposal_id).get() {
            ProposalStatus::Pending | ProposalStatus::Active => {}
            ProposalStatus::Succeeded
            | ProposalStatus::Defeated
            | ProposalStatus::Executed
            | ProposalStatus::Cancelled => sc_panic!(ERR_ALREADY_FINALIZED),
        }

        let for_votes = self.proposal_tally(proposal_id, VoteSupport::For).get();
        let against_votes = self.proposal_tally(proposal_id, VoteSupport::Against).get();

        // Abstentions do not count towards quorum.
        let participation = self.add_u256(&for_votes, &against_votes);
        let quorum_reached = participation >= QUORUM_THRESHOLD;

        if quorum_reached && for_votes > against_votes {
            let execution_time = self.add_u64(now, EXECUTION_DELAY);
            self.proposal_execution_time(proposal_id).set(execution_time);
            self.proposal_status(proposal_id).set(ProposalStatus::Succeeded);
            self.proposal_succeeded_event(proposal_id, execution_time);
        } else {
            self.proposal_status(proposal_id).set(ProposalStatus::Defeated);
            self.proposal_defeated_event(proposal_id, &participation);
        }
    }

    // ========================================================
    // ENDPOINT: executeProposal
    // Only gates execution. The event carries target + calldata
    // for the dispatcher that performs the call.
    // ========================================================

    #[endpoint(executeProposal)]
    fn execute_proposal(&self, proposal_id: u64) {
        self.require_proposal_exists(proposal_id);
        let now = self.blockchain().get_block_nonce();

        match self.proposal_status(proposal_id).get() {
            ProposalStatus::Succeeded => {}
            ProposalStatus::Pending
            | ProposalStatus::Active
            | ProposalStatus::Defeated
            | ProposalStatus::Executed
            | ProposalStatus::Cancelled => sc_panic!(ERR_NOT_SUCCEEDED),
        }

        require!(
            now >= self.proposal_execution_time(proposal_id).get(),
            ERR_TIMELOCK_ACTIVE
        );

        self.proposal_status(proposal_id).set(ProposalStatus::Executed);

        let target = self.proposal_target(proposal_id).get();
        let calldata = self.proposal_calldata(proposal_id).get();
        self.proposal_executed_event(proposal_id, &target, &calldata);
    }

    // ========================================================
    // ENDPOINT: cancelProposal
    // Proposer only, from any state but EXECUTED.
    // ========================================================

    #[endpoint(cancelProposal)]
    fn cancel_proposal(&self, proposal_id: u64) {
        self.require_proposal_exists(proposal_id);
        let caller = self.blockchain().get_caller();

        require!(
            self.proposal_proposer(proposal_id).get() == caller,
            ERR_NOT_PROPOSER
        );

        match self.proposal_status(proposal_id).get() {
            ProposalStatus::Executed => sc_panic!(ERR_ALREADY_EXECUTED),
            ProposalStatus::Pending
            | ProposalStatus::Active
            | ProposalStatus::Succeeded
            | ProposalStatus::Defeated
            | ProposalStatus::Cancelled => {}
        }

        self.proposal_status(proposal_id).set(ProposalStatus::Cancelled);
        self.proposal_cancelled_event(proposal_id, &caller);
    }

    fn require_proposal_exists(&self, proposal_id: u64) {
        require!(
            proposal_id > 0 && proposal_id <= self.proposal_count().get(),
            ERR_PROPOSAL_NOT_FOUND
        );
    }

    // ========================================================
    // VIEWS
    // ========================================================

    /// Staking weight at the current block.
    #[view(getVotingPower)]
    fn get_voting_power(&self, account: &ManagedAddress) -> BigUint {
        self.get_voting_weight(account)
    }

    #[view(getProposalVotes)]
    fn get_proposal_votes(&self, proposal_id: u64) -> MultiValue3<BigUint, BigUint, BigUint> {
        self.require_proposal_exists(proposal_id);
        (
            self.proposal_tally(proposal_id, VoteSupport::For).get(),
            self.proposal_tally(proposal_id, VoteSupport::Against).get(),
            self.proposal_tally(proposal_id, VoteSupport::Abstain).get(),
        )
            .into()
    }

    #[view(getProposal)]
    fn get_proposal(&self, proposal_id: u64) -> Proposal<Self::Api> {
        self.require_proposal_exists(proposal_id);
        Proposal {
            id: proposal_id,
            proposer: self.proposal_proposer(proposal_id).get(),
            title: self.proposal_title(proposal_id).get(),
            description: self.proposal_description(proposal_id).get(),
            target: self.proposal_target(proposal_id).get(),
            calldata: self.proposal_calldata(proposal_id).get(),
            voting_start: self.proposal_voting_start(proposal_id).get(),
            voting_end: self.proposal_voting_end(proposal_id).get(),
            execution_time: self.proposal_execution_time(proposal_id).get(),
            status: self.proposal_status(proposal_id).get(),
            for_votes: self.proposal_tally(proposal_id, VoteSupport::For).get(),
            against_votes: self.proposal_tally(proposal_id, VoteSupport::Against).get(),
            abstain_votes: self.proposal_tally(proposal_id, VoteSupport::Abstain).get(),
        }
    }

    #[view(getProposalCount)]
    fn get_proposal_count(&self) -> u64 {
        self.proposal_count().get()
    }

    #[view(hasVoted)]
    fn has_voted(&self, proposal_id: u64, voter: &ManagedAddress) -> bool {
        self.vote_cast(proposal_id, voter).get()
    }

    #[view(getVoteRecord)]
    fn get_vote_record(
        &self,
        proposal_id: u64,
        voter: &ManagedAddress,
    ) -> OptionalValue<VoteRecord<Self::Api>> {
        if !self.vote_cast(proposal_id, voter).get() {
            return OptionalValue::None;
        }
        OptionalValue::Some(VoteRecord {
            support: self.vote_support(proposal_id, voter).get(),
            weight: self.vote_weight(proposal_id, voter).get(),
        })
    }

    #[view(getGovernanceConfig)]
    fn get_governance_config(&self) -> MultiValue5<u64, u64, u64, u64, u64> {
        (
            PROPOSAL_THRESHOLD,
            VOTING_DELAY,
            VOTING_PERIOD,
            EXECUTION_DELAY,
            QUORUM_THRESHOLD,
        )
            .into()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("proposalCreated")]
    fn proposal_created_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] proposer: &ManagedAddress,
        #[indexed] voting_start: u64,
        voting_end: u64,
    );

    #[event("voteCast")]
    fn vote_cast_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] voter: &ManagedAddress,
        #[indexed] support: VoteSupport,
        weight: &BigUint,
    );

    #[event("proposalSucceeded")]
    fn proposal_succeeded_event(&self, #[indexed] proposal_id: u64, execution_time: u64);

    #[event("proposalDefeated")]
    fn proposal_defeated_event(&self, #[indexed] proposal_id: u64, participation: &BigUint);

    #[event("proposalExecuted")]
    fn proposal_executed_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] target: &ManagedAddress,
        calldata: &ManagedBuffer,
    );

    #[event("proposalCancelled")]
    fn proposal_cancelled_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] proposer: &ManagedAddress,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("proposalCount")]
    fn proposal_count(&self) -> SingleValueMapper<u64>;

    // ── Proposal fields ──

    fn proposal_proposer(
        &self,
        id: u64,
    ) -> SingleValueMapper<Self::Api, ManagedAddress<Self::Api>> {
        SingleValueMapper::new(self.entity_key(PROPOSAL_TAG, id, None, b"proposer"))
    }

    fn proposal_title(&self, id: u64) -> SingleValueMapper<Self::Api, ManagedBuffer<Self::Api>> {
        SingleValueMapper::new(self.entity_key(PROPOSAL_TAG, id, None, b"title"))
    }

    fn proposal_description(
        &self,
        id: u64,
    ) -> SingleValueMapper<Self::Api, ManagedBuffer<Self::Api>> {
        SingleValueMapper::new(self.entity_key(PROPOSAL_TAG, id, None, b"description"))
    }

    fn proposal_target(&self, id: u64) -> SingleValueMapper<Self::Api, ManagedAddress<Self::Api>> {
        SingleValueMapper::new(self.entity_key(PROPOSAL_TAG, id, None, b"target"))
    }

    fn proposal_calldata(&self, id: u64) -> SingleValueMapper<Self::Api, ManagedBuffer<Self::Api>> {
        SingleValueMapper::new(self.entity_key(PROPOSAL_TAG, id, None, b"calldata"))
    }

    fn proposal_voting_start(&self, id: u64) -> SingleValueMapper<Self::Api, u64> {
        SingleValueMapper::new(self.entity_key(PROPOSAL_TAG, id, None, b"votingStart"))
    }

    fn proposal_voting_end(&self, id: u64) -> SingleValueMapper<Self::Api, u64> {
        SingleValueMapper::new(self.entity_key(PROPOSAL_TAG, id, None, b"votingEnd"))
    }

    fn proposal_execution_time(&self, id: u64) -> SingleValueMapper<Self::Api, u64> {
        SingleValueMapper::new(self.entity_key(PROPOSAL_TAG, id, None, b"executionTime"))
    }

    fn proposal_status(&self, id: u64) -> SingleValueMapper<Self::Api, ProposalStatus> {
        SingleValueMapper::new(self.entity_key(PROPOSAL_TAG, id, None, b"status"))
    }

    fn proposal_tally(
        &self,
        id: u64,
        support: VoteSupport,
    ) -> SingleValueMapper<Self::Api, BigUint<Self::Api>> {
        SingleValueMapper::new(self.entity_key(PROPOSAL_TAG, id, None, support.tally_field()))
    }

    // ── Vote records (proposal × voter) ──

    fn vote_cast(&self, id: u64, voter: &ManagedAddress) -> SingleValueMapper<Self::Api, bool> {
        SingleValueMapper::new(self.entity_key(VOTE_TAG, id, Some(voter), b"voted"))
    }

    fn vote_support(
        &self,
        id: u64,
        voter: &ManagedAddress,
    ) -> SingleValueMapper<Self::Api, VoteSupport> {
        SingleValueMapper::new(self.entity_key(VOTE_TAG, id, Some(voter), b"support"))
    }

    fn vote_weight(
        &self,
        id: u64,
        voter: &ManagedAddress,
    ) -> SingleValueMapper<Self::Api, BigUint<Self::Api>> {
        SingleValueMapper::new(self.entity_key(VOTE_TAG, id, Some(voter), b"weight"))
    }
}
