multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Proposal status
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum ProposalStatus {
    /// Created, voting window not yet opened by a first vote.
    Pending,
    /// At least one vote cast inside the window.
    Active,
    /// Quorum reached and for > against. Timelock running.
    Succeeded,
    /// Quorum missed, or against >= for.
    Defeated,
    /// Timelock elapsed and execution released. Terminal state.
    Executed,
    /// Withdrawn by the proposer. Terminal state.
    Cancelled,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum VoteSupport {
    Against,
    For,
    Abstain,
}

impl VoteSupport {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(VoteSupport::Against),
            1 => Some(VoteSupport::For),
            2 => Some(VoteSupport::Abstain),
            _ => None,
        }
    }

    /// Proposal field holding the running tally for this side.
    pub fn tally_field(&self) -> &'static [u8] {
        match self {
            VoteSupport::Against => b"againstVotes",
            VoteSupport::For => b"forVotes",
            VoteSupport::Abstain => b"abstainVotes",
        }
    }
}

// ============================================================
// Proposal (assembled from its per-field storage)
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Proposal<M: ManagedTypeApi> {
    pub id: u64,
    pub proposer: ManagedAddress<M>,
    pub title: ManagedBuffer<M>,
    pub description: ManagedBuffer<M>,
    pub target: ManagedAddress<M>,
    pub calldata: ManagedBuffer<M>,
    pub voting_start: u64,
    pub voting_end: u64,
    /// Block after which execution is released (0 unless Succeeded)
    pub execution_time: u64,
    pub status: ProposalStatus,
    pub for_votes: BigUint<M>,
    pub against_votes: BigUint<M>,
    pub abstain_votes: BigUint<M>,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct VoteRecord<M: ManagedTypeApi> {
    pub support: VoteSupport,
    /// Frozen at cast time.
    pub weight: BigUint<M>,
}

// ============================================================
// Market
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum MarketStatus {
    /// Never produced by createMarket.
    Pending,
    Active,
    Resolved,
    Cancelled,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum MarketOutcome {
    None,
    Yes,
    No,
}

impl MarketOutcome {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(MarketOutcome::None),
            1 => Some(MarketOutcome::Yes),
            2 => Some(MarketOutcome::No),
            _ => None,
        }
    }

    pub fn from_side(bet_on_yes: bool) -> Self {
        if bet_on_yes {
            MarketOutcome::Yes
        } else {
            MarketOutcome::No
        }
    }
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Market<M: ManagedTypeApi> {
    pub id: u64,
    pub creator: ManagedAddress<M>,
    pub question: ManagedBuffer<M>,
    pub description: ManagedBuffer<M>,
    pub end_time: u64,
    pub resolution_time: u64,
    pub resolver: ManagedAddress<M>,
    pub status: MarketStatus,
    pub outcome: MarketOutcome,
    pub yes_pool: BigUint<M>,
    pub no_pool: BigUint<M>,
    pub total_pool: BigUint<M>,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct BetRecord<M: ManagedTypeApi> {
    pub bet_on_yes: bool,
    pub amount: BigUint<M>,
    pub claimed: bool,
}

// ============================================================
// Stake position
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct StakePosition<M: ManagedTypeApi> {
    pub staked_amount: BigUint<M>,
    pub unlock_block: u64,
    pub last_reward_block: u64,
}
