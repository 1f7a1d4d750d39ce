#![allow(dead_code)]

use multiversx_sc::types::{Address, EsdtLocalRole};
use multiversx_sc_scenario::{
    managed_address, managed_buffer, managed_token_id, rust_biguint,
    whitebox_legacy::{BlockchainStateWrapper, ContractObjWrapper, TxResult},
    DebugApi,
};

use prediction_protocol::{
    governance::GovernanceModule, market::MarketModule, staking::StakingModule,
    PredictionProtocol,
};

pub const WASM_PATH: &str = "output/prediction-protocol.wasm";
pub const TOKEN_ID: &[u8] = b"PRED-123456";
pub const OTHER_TOKEN_ID: &[u8] = b"OTHER-123456";
pub const USER_BALANCE: u64 = 1_000_000_000;

pub type ProtocolContract = prediction_protocol::ContractObj<DebugApi>;

pub struct ProtocolSetup<Builder>
where
    Builder: 'static + Copy + Fn() -> ProtocolContract,
{
    pub b_mock: BlockchainStateWrapper,
    pub owner: Address,
    pub alice: Address,
    pub bob: Address,
    pub carol: Address,
    pub dave: Address,
    pub contract: ContractObjWrapper<ProtocolContract, Builder>,
}

impl<Builder> ProtocolSetup<Builder>
where
    Builder: 'static + Copy + Fn() -> ProtocolContract,
{
    pub fn new(builder: Builder) -> Self {
        let rust_zero = rust_biguint!(0u64);
        let mut b_mock = BlockchainStateWrapper::new();

        let owner = b_mock.create_user_account(&rust_zero);
        let alice = b_mock.create_user_account(&rust_zero);
        let bob = b_mock.create_user_account(&rust_zero);
        let carol = b_mock.create_user_account(&rust_zero);
        let dave = b_mock.create_user_account(&rust_zero);
        for user in [&alice, &bob, &carol, &dave] {
            b_mock.set_esdt_balance(user, TOKEN_ID, &rust_biguint!(USER_BALANCE));
        }

        let contract = b_mock.create_sc_account(&rust_zero, Some(&owner), builder, WASM_PATH);
        b_mock
            .execute_tx(&owner, &contract, &rust_zero, |sc| {
                sc.init(managed_token_id!(TOKEN_ID));
            })
            .assert_ok();
        b_mock.set_esdt_local_roles(contract.address_ref(), TOKEN_ID, &[EsdtLocalRole::Mint]);

        ProtocolSetup {
            b_mock,
            owner,
            alice,
            bob,
            carol,
            dave,
            contract,
        }
    }

    pub fn set_block(&mut self, nonce: u64) {
        self.b_mock.set_block_nonce(nonce);
    }

    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.b_mock.set_block_timestamp(timestamp);
    }

    pub fn check_balance(&self, user: &Address, expected: u64) {
        self.b_mock
            .check_esdt_balance(user, TOKEN_ID, &rust_biguint!(expected));
    }

    // ── Staking ──

    pub fn stake(&mut self, user: &Address, amount: u64, lock_period: u64) -> TxResult {
        self.b_mock.execute_esdt_transfer(
            user,
            &self.contract,
            TOKEN_ID,
            0,
            &rust_biguint!(amount),
            |sc| {
                sc.stake(lock_period);
            },
        )
    }

    // ── Governance ──

    pub fn create_proposal(&mut self, proposer: &Address) -> TxResult {
        let target = self.owner.clone();
        self.b_mock
            .execute_tx(proposer, &self.contract, &rust_biguint!(0u64), |sc| {
                sc.create_proposal(
                    managed_buffer!(b"Lower market fee"),
                    managed_buffer!(b"Cut the protocol fee to 1%"),
                    managed_address!(&target),
                    managed_buffer!(b"setProtocolFee@64"),
                );
            })
    }

    pub fn cast_vote(&mut self, voter: &Address, proposal_id: u64, support: u8) -> TxResult {
        self.b_mock
            .execute_tx(voter, &self.contract, &rust_biguint!(0u64), |sc| {
                sc.cast_vote(proposal_id, support);
            })
    }

    pub fn finalize(&mut self, proposal_id: u64) -> TxResult {
        let caller = self.dave.clone();
        self.b_mock
            .execute_tx(&caller, &self.contract, &rust_biguint!(0u64), |sc| {
                sc.finalize_proposal(proposal_id);
            })
    }

    pub fn execute(&mut self, proposal_id: u64) -> TxResult {
        let caller = self.dave.clone();
        self.b_mock
            .execute_tx(&caller, &self.contract, &rust_biguint!(0u64), |sc| {
                sc.execute_proposal(proposal_id);
            })
    }

    pub fn cancel_proposal(&mut self, caller: &Address, proposal_id: u64) -> TxResult {
        self.b_mock
            .execute_tx(caller, &self.contract, &rust_biguint!(0u64), |sc| {
                sc.cancel_proposal(proposal_id);
            })
    }

    // ── Markets ──

    pub fn create_market(
        &mut self,
        creator: &Address,
        end_time: u64,
        resolution_time: u64,
        resolver: &Address,
    ) -> TxResult {
        let resolver = resolver.clone();
        self.b_mock
            .execute_tx(creator, &self.contract, &rust_biguint!(0u64), |sc| {
                sc.create_market(
                    managed_buffer!(b"Will BTC close above 100k?"),
                    managed_buffer!(b"Daily close on the reference exchange"),
                    end_time,
                    resolution_time,
                    managed_address!(&resolver),
                );
            })
    }

    pub fn place_bet(
        &mut self,
        bettor: &Address,
        market_id: u64,
        bet_on_yes: bool,
        amount: u64,
    ) -> TxResult {
        self.b_mock.execute_esdt_transfer(
            bettor,
            &self.contract,
            TOKEN_ID,
            0,
            &rust_biguint!(amount),
            |sc| {
                sc.place_bet(market_id, bet_on_yes);
            },
        )
    }

    pub fn resolve(&mut self, resolver: &Address, market_id: u64, outcome: u8) -> TxResult {
        self.b_mock
            .execute_tx(resolver, &self.contract, &rust_biguint!(0u64), |sc| {
                sc.resolve_market(market_id, outcome);
            })
    }
}
