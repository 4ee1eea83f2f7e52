//! Safe CREATE2 address computation.
//!
//! Matches SafeProxyFactory.createProxyWithNonce:
//!   salt = keccak256(keccak256(initializer) || saltNonce)
//!   address = keccak256(0xff || factory || salt || initCodeHash)[12..32]

use crate::crypto::keccak256;

/// Computes the CREATE2 salt used by Safe: keccak256(initializer_hash || salt_nonce).
/// Both inputs 32 bytes; output 32 bytes.
#[inline]
pub fn safe_salt(initializer_hash: &[u8; 32], salt_nonce: &[u8; 32]) -> [u8; 32] {
    let mut preimage = [0u8; 64];
    preimage[0..32].copy_from_slice(initializer_hash);
    preimage[32..64].copy_from_slice(salt_nonce);
    keccak256(&preimage)
}

/// Computes the CREATE2 deployment address.
/// Preimage: 0xff (1) || factory (20) || salt (32) || init_code_hash (32) = 85 bytes.
/// Address = keccak256(preimage)[12..32]. The marker byte and field order are
/// fixed by the EVM; any deviation derives a different address.
#[inline]
pub fn safe_address(factory: &[u8; 20], init_code_hash: &[u8; 32], salt: &[u8; 32]) -> [u8; 20] {
    let mut preimage = [0u8; 85];
    preimage[0] = 0xff;
    preimage[1..21].copy_from_slice(factory);
    preimage[21..53].copy_from_slice(salt);
    preimage[53..85].copy_from_slice(init_code_hash);

    let hash = keccak256(&preimage);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash[12..32]);
    addr
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h20(s: &str) -> [u8; 20] {
        hex::decode(s).unwrap().try_into().unwrap()
    }

    fn h32(s: &str) -> [u8; 32] {
        hex::decode(s).unwrap().try_into().unwrap()
    }

    /// Known on-chain CREATE2 vector: the Uniswap V2 pool at
    /// 0x3e8468f66d30Fc99F745481d4B383f89861702C6 (same derivation formula).
    #[test]
    fn known_create2_vector() {
        let addr = safe_address(
            &h20("5c69bee701ef814a2b6a3edd4b1652cb9cc5aa6f"),
            &h32("96e8ac4277198ff8b6f785478aa9a39f403cb768dd02cbee326c3e7da348845f"),
            &h32("0815f4f41ecb52c539a2caa2ccf468f9bc76a0f2651129ff468ac2a33cf75983"),
        );
        assert_eq!(addr, h20("3e8468f66d30fc99f745481d4b383f89861702c6"));
    }

    #[test]
    fn salt_mixes_both_inputs() {
        let init = [1u8; 32];
        let a = safe_salt(&init, &[2u8; 32]);
        let b = safe_salt(&init, &[3u8; 32]);
        assert_ne!(a, b);
        assert_eq!(a, safe_salt(&init, &[2u8; 32]));
    }

    #[test]
    fn salt_matches_chunked_hash() {
        let init = [0xabu8; 32];
        let nonce = [0xcdu8; 32];
        assert_eq!(
            safe_salt(&init, &nonce),
            crate::crypto::keccak256_chunked(&[&init, &nonce]),
        );
    }
}
