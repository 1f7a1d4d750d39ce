multiversx_sc::imports!();

use multiversx_sc::storage::StorageKey;

// ============================================================
// Entity namespaces
// ============================================================

pub const PROPOSAL_TAG: &[u8] = b"proposal";
pub const VOTE_TAG: &[u8] = b"vote";
pub const MARKET_TAG: &[u8] = b"market";
pub const BET_TAG: &[u8] = b"bet";
pub const STAKING_TAG: &[u8] = b"staking";

/// Width of an entity id once laid out in the key preimage.
const ID_WORD_LEN: usize = 32;

pub const KEY_LEN: usize = 32;

/// Content-addressed field storage shared by every engine.
///
/// A logical field `(tag, id, extra, field)` lives at
/// `keccak256(len(tag) ++ tag ++ id_be32 ++ extra ++ len(field) ++ field)`,
/// with lengths as u32 big-endian. Distinct tags keep proposal 1, market 1
/// and vote 1 in separate namespaces.
#[multiversx_sc::module]
pub trait StorageKeySpaceModule {
    fn address_of(
        &self,
        tag: &[u8],
        id: u64,
        extra: Option<&ManagedAddress>,
        field: &[u8],
    ) -> ManagedByteArray<Self::Api, KEY_LEN> {
        let mut preimage = ManagedBuffer::new();
        append_length_prefixed(&mut preimage, tag);
        preimage.append_bytes(&id_word(id)[..]);
        if let Some(address) = extra {
            preimage.append(address.as_managed_buffer());
        }
        append_length_prefixed(&mut preimage, field);

        self.crypto().keccak256(&preimage)
    }

    /// Storage key for one entity field, ready to back a storage mapper.
    fn entity_key(
        &self,
        tag: &[u8],
        id: u64,
        extra: Option<&ManagedAddress>,
        field: &[u8],
    ) -> StorageKey<Self::Api> {
        let address = self.address_of(tag, id, extra, field);
        let mut key = StorageKey::new(&[]);
        key.append_managed_buffer(address.as_managed_buffer());
        key
    }
}

fn append_length_prefixed<M: ManagedTypeApi>(buffer: &mut ManagedBuffer<M>, bytes: &[u8]) {
    buffer.append_bytes(&(bytes.len() as u32).to_be_bytes()[..]);
    buffer.append_bytes(bytes);
}

fn id_word(id: u64) -> [u8; ID_WORD_LEN] {
    let mut word = [0u8; ID_WORD_LEN];
    word[ID_WORD_LEN - 8..].copy_from_slice(&id.to_be_bytes());
    word
}
