multiversx_sc::imports!();

use crate::errors::{ERR_ARITHMETIC_OVERFLOW, ERR_ARITHMETIC_UNDERFLOW};

/// Basis points denominator (10_000 = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Widest quantity the ledger accepts, in bytes (u256)
const U256_BYTES: usize = 32;

/// Unsigned 256-bit arithmetic on top of `BigUint`.
///
/// `BigUint` never overflows on its own, so every result and every
/// intermediate product is checked against the 256-bit bound and the call
/// aborts instead of silently widening.
#[multiversx_sc::module]
pub trait FixedWidthModule {
    fn require_u256(&self, value: &BigUint) {
        require!(
            value.to_bytes_be_buffer().len() <= U256_BYTES,
            ERR_ARITHMETIC_OVERFLOW
        );
    }

    fn add_u256(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let sum = a + b;
        self.require_u256(&sum);
        sum
    }

    fn sub_u256(&self, a: &BigUint, b: &BigUint) -> BigUint {
        require!(a >= b, ERR_ARITHMETIC_UNDERFLOW);
        a - b
    }

    /// floor(a * b / denominator); the product itself must fit in 256 bits.
    fn mul_div_floor(&self, a: &BigUint, b: &BigUint, denominator: &BigUint) -> BigUint {
        let product = a * b;
        self.require_u256(&product);
        product / denominator
    }

    /// floor(amount * bps / 10_000)
    fn apply_bps(&self, amount: &BigUint, bps: u64) -> BigUint {
        self.mul_div_floor(
            amount,
            &BigUint::from(bps),
            &BigUint::from(BPS_DENOMINATOR),
        )
    }

    fn add_u64(&self, base: u64, delta: u64) -> u64 {
        base.checked_add(delta)
            .unwrap_or_else(|| sc_panic!(ERR_ARITHMETIC_OVERFLOW))
    }
}
