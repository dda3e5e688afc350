//! Brute-force search for a CREATE2 salt whose predicted contract address
//! shares selected low bits with a reference address.

use alloy_sol_types::SolValue as _;
use headsmith_defaults::{ADDRESS_MASK, SALT_SEARCH_LIMIT};
use headsmith_primitives::{Address, B256, Bytes, U256, keccak256};

/// Computes the address of a contract deployed with `CREATE2`:
/// the low 20 bytes of `keccak256(0xff ++ factory ++ salt ++ init_code_hash)`.
pub fn create2_address(factory: &Address, salt: &B256, init_code_hash: &B256) -> Address {
    let mut preimage = Vec::with_capacity(1 + 20 + 32 + 32);
    preimage.push(0xff);
    preimage.extend_from_slice(factory.as_slice());
    preimage.extend_from_slice(salt.as_slice());
    preimage.extend_from_slice(init_code_hash.as_slice());

    Address::from_word(keccak256(preimage))
}

/// Converts a search index to a salt, as a 32-byte big-endian integer.
pub fn salt_from_index(index: u64) -> B256 {
    B256::from(U256::from(index).to_be_bytes::<32>())
}

/// Returns the bits of the address' last byte selected by `mask`.
pub fn trailing_bits(address: &Address, mask: u8) -> u8 {
    address.as_slice().last().copied().unwrap_or_default() & mask
}

/// Appends the ABI-encoded constructor argument to contract bytecode.
pub fn creation_code(bytecode: &[u8], constructor_argument: Address) -> Bytes {
    let mut code = bytecode.to_vec();
    code.extend(constructor_argument.abi_encode());
    code.into()
}

/// A salt and the address it produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaltSearchResult {
    /// The salt
    pub salt: B256,
    /// The address of the contract deployed with `salt`
    pub predicted_address: Address,
}

/// Error returned when no salt within the search limit satisfies the
/// constraint.
#[derive(Debug, thiserror::Error)]
pub enum SaltSearchError {
    /// All salts below the limit were tried.
    #[error(
        "No matching salt found within the first {limit} salts (mask: {mask:#04x}, target: {target:#04x})"
    )]
    Exhausted {
        /// Number of salts that were tried
        limit: u64,
        /// Bits of the last address byte that have to match
        mask: u8,
        /// Required value of the masked bits
        target: u8,
    },
}

/// Search parameters for a salt that makes a factory deploy a contract whose
/// address has specific trailing bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaltSearch {
    factory: Address,
    init_code_hash: B256,
    reference: Address,
    mask: u8,
    limit: u64,
}

impl SaltSearch {
    /// Constructs a search for contracts deployed by `factory` with
    /// `init_code`, whose address has the same masked trailing bits as
    /// `reference`.
    pub fn new(factory: Address, init_code: &[u8], reference: Address) -> Self {
        Self {
            factory,
            init_code_hash: keccak256(init_code),
            reference,
            mask: ADDRESS_MASK,
            limit: SALT_SEARCH_LIMIT,
        }
    }

    /// Replaces the bits of the last address byte that have to match.
    pub fn with_mask(mut self, mask: u8) -> Self {
        self.mask = mask;
        self
    }

    /// Replaces the number of salts to try.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Required value of the masked bits.
    pub fn target(&self) -> u8 {
        trailing_bits(&self.reference, self.mask)
    }

    /// Tries salts `0..limit` in order and returns the first match.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug"))]
    pub fn run(&self) -> Result<SaltSearchResult, SaltSearchError> {
        let target = self.target();
        let result = (0..self.limit)
            .map(salt_from_index)
            .map(|salt| SaltSearchResult {
                salt,
                predicted_address: create2_address(&self.factory, &salt, &self.init_code_hash),
            })
            .find(|result| trailing_bits(&result.predicted_address, self.mask) == target);

        match result {
            Some(result) => {
                log::debug!(
                    "Found salt {} for predicted address {}",
                    result.salt,
                    result.predicted_address
                );
                Ok(result)
            }
            None => Err(SaltSearchError::Exhausted {
                limit: self.limit,
                mask: self.mask,
                target,
            }),
        }
    }
}
