multiversx_sc::imports!();

use crate::errors::{ERR_NOTHING_TO_WITHDRAW, ERR_NOT_OWNER, ERR_WRONG_PAYMENT_TOKEN};
use crate::fixed_width;

/// Glue to the protocol token ledger: incoming payments, outgoing
/// transfers, reward minting, and the protocol fee balance.
#[multiversx_sc::module]
pub trait CustodyModule: fixed_width::FixedWidthModule {
    /// Amount of the single protocol-token payment attached to the call.
    fn require_protocol_payment(&self) -> BigUint {
        let payment = self.call_value().single_esdt();
        require!(
            payment.token_identifier == self.protocol_token().get() && payment.token_nonce == 0,
            ERR_WRONG_PAYMENT_TOKEN
        );
        payment.amount.clone()
    }

    fn send_protocol_tokens(&self, to: &ManagedAddress, amount: &BigUint) {
        if *amount == 0u64 {
            return;
        }
        let token = self.protocol_token().get();
        self.send().direct_esdt(to, &token, 0, amount);
    }

    /// Requires the contract to hold ESDTRoleLocalMint on the protocol token.
    fn mint_protocol_tokens(&self, to: &ManagedAddress, amount: &BigUint) {
        if *amount == 0u64 {
            return;
        }
        let token = self.protocol_token().get();
        self.send().esdt_local_mint(&token, 0, amount);
        self.send().direct_esdt(to, &token, 0, amount);
    }

    fn accrue_protocol_fee(&self, amount: &BigUint) {
        if *amount == 0u64 {
            return;
        }
        let accrued = self.add_u256(&self.protocol_fees().get(), amount);
        self.protocol_fees().set(&accrued);
    }

    // ========================================================
    // ENDPOINT: withdrawProtocolFees
    // ========================================================

    #[endpoint(withdrawProtocolFees)]
    fn withdraw_protocol_fees(&self, to: ManagedAddress) -> BigUint {
        require!(
            self.blockchain().get_caller() == self.blockchain().get_owner_address(),
            ERR_NOT_OWNER
        );
        let amount = self.protocol_fees().get();
        require!(amount > 0u64, ERR_NOTHING_TO_WITHDRAW);

        self.protocol_fees().clear();
        self.send_protocol_tokens(&to, &amount);
        self.protocol_fees_withdrawn_event(&to, &amount);

        amount
    }

    #[view(getProtocolToken)]
    fn get_protocol_token(&self) -> TokenIdentifier {
        self.protocol_token().get()
    }

    #[view(getProtocolFees)]
    fn get_protocol_fees(&self) -> BigUint {
        self.protocol_fees().get()
    }

    #[event("protocolFeesWithdrawn")]
    fn protocol_fees_withdrawn_event(&self, #[indexed] to: &ManagedAddress, amount: &BigUint);

    #[storage_mapper("protocolToken")]
    fn protocol_token(&self) -> SingleValueMapper<TokenIdentifier>;

    #[storage_mapper("protocolFees")]
    fn protocol_fees(&self) -> SingleValueMapper<BigUint>;
}
