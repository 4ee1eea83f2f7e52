//! ABI encoding for the Safe deployment calls.
//!
//! Hand-rolled encoders for the three fixed call shapes involved in a proxy
//! deployment: `Safe.setup`, `SafeToL2Setup.safeToL2Setup`, and
//! `SafeProxyFactory.createProxyWithNonce`. The head/tail offsets are
//! constant for these signatures, so no general-purpose ABI machinery is
//! needed.

use crate::crypto::keccak256_chunked;
use crate::matcher::Address;

/// `Safe.setup(address[],uint256,address,bytes,address,address,uint256,address)`
const SETUP_SELECTOR: [u8; 4] = [0xb6, 0x3e, 0x80, 0x0d];
/// `SafeToL2Setup.safeToL2Setup(address)`
const SAFE_TO_L2_SETUP_SELECTOR: [u8; 4] = [0xfe, 0x51, 0xf6, 0x43];
/// `SafeProxyFactory.createProxyWithNonce(address,bytes,uint256)`
const CREATE_PROXY_WITH_NONCE_SELECTOR: [u8; 4] = [0x16, 0x88, 0xf0, 0xb9];

/// Encodes the `safeToL2Setup` call that migrates the account to the L2
/// singleton during setup.
pub fn safe_to_l2_setup(singleton_l2: Address) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(4 + 32);
    buffer.extend_from_slice(&SAFE_TO_L2_SETUP_SELECTOR);
    buffer.extend_from_slice(&addr(singleton_l2));
    buffer
}

/// Encodes the `Safe.setup` initializer calldata.
///
/// `to`/`data` carry an optional delegatecall executed during setup (the
/// `SafeToL2Setup` hook); both are zero/empty when unused. Payment fields
/// are always zero.
pub fn safe_setup(
    owners: &[Address],
    threshold: usize,
    to: Address,
    data: &[u8],
    fallback_handler: Address,
) -> Vec<u8> {
    let mut buffer = Vec::new();
    buffer.extend_from_slice(&SETUP_SELECTOR);
    buffer.extend_from_slice(&num(0x100)); // owners.offset
    buffer.extend_from_slice(&num(threshold));
    buffer.extend_from_slice(&addr(to));
    buffer.extend_from_slice(&num(0x120 + 0x20 * owners.len())); // data.offset
    buffer.extend_from_slice(&addr(fallback_handler));
    buffer.extend_from_slice(&addr(Address::zero())); // paymentToken
    buffer.extend_from_slice(&num(0)); // payment
    buffer.extend_from_slice(&addr(Address::zero())); // paymentReceiver
    buffer.extend_from_slice(&num(owners.len())); // owners.length
    for owner in owners {
        buffer.extend_from_slice(&addr(*owner));
    }
    buffer.extend_from_slice(&num(data.len()));
    buffer.extend_from_slice(data);
    buffer.extend_from_slice(padding(data.len()));
    buffer
}

/// Returns keccak256(proxy creation code || uint256(singleton)), the init
/// code hash the factory uses for CREATE2.
pub fn proxy_init_code_hash(proxy_init_code: &[u8], singleton: Address) -> [u8; 32] {
    keccak256_chunked(&[proxy_init_code, &addr(singleton)])
}

/// Encodes the `createProxyWithNonce` calldata sent to the proxy factory.
pub fn create_proxy_with_nonce(
    singleton: Address,
    initializer: &[u8],
    salt_nonce: [u8; 32],
) -> Vec<u8> {
    let mut buffer = Vec::new();
    buffer.extend_from_slice(&CREATE_PROXY_WITH_NONCE_SELECTOR);
    buffer.extend_from_slice(&addr(singleton));
    buffer.extend_from_slice(&num(0x60)); // initializer.offset
    buffer.extend_from_slice(&salt_nonce);
    buffer.extend_from_slice(&num(initializer.len()));
    buffer.extend_from_slice(initializer);
    buffer.extend_from_slice(padding(initializer.len()));
    buffer
}

/// A usize as a 32-byte big-endian word.
fn num(a: usize) -> [u8; 32] {
    let mut b = [0u8; 32];
    b[(32 - std::mem::size_of::<usize>())..].copy_from_slice(&a.to_be_bytes());
    b
}

/// An address left-padded to a 32-byte word.
fn addr(a: Address) -> [u8; 32] {
    let mut b = [0u8; 32];
    b[12..].copy_from_slice(a.as_bytes());
    b
}

/// Zero padding to round `len` up to a 32-byte boundary.
fn padding(len: usize) -> &'static [u8] {
    static ZERO: [u8; 32] = [0; 32];
    &ZERO[..(32 - len % 32) % 32]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(s: &str) -> Address {
        s.parse().unwrap()
    }

    #[test]
    fn initializer_bytes() {
        assert_eq!(
            safe_setup(
                &[
                    address("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
                    address("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"),
                    address("cccccccccccccccccccccccccccccccccccccccc"),
                ],
                2,
                Address::zero(),
                &[],
                address("3333333333333333333333333333333333333333"),
            ),
            hex::decode(concat!(
                "b63e800d",
                "0000000000000000000000000000000000000000000000000000000000000100",
                "0000000000000000000000000000000000000000000000000000000000000002",
                "0000000000000000000000000000000000000000000000000000000000000000",
                "0000000000000000000000000000000000000000000000000000000000000180",
                "0000000000000000000000003333333333333333333333333333333333333333",
                "0000000000000000000000000000000000000000000000000000000000000000",
                "0000000000000000000000000000000000000000000000000000000000000000",
                "0000000000000000000000000000000000000000000000000000000000000000",
                "0000000000000000000000000000000000000000000000000000000000000003",
                "000000000000000000000000aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
                "000000000000000000000000bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
                "000000000000000000000000cccccccccccccccccccccccccccccccccccccccc",
                "0000000000000000000000000000000000000000000000000000000000000000",
            ))
            .unwrap(),
        );
    }

    #[test]
    fn initializer_with_l2_setup() {
        let data = safe_to_l2_setup(address("4444444444444444444444444444444444444444"));
        assert_eq!(
            safe_setup(
                &[
                    address("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
                    address("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"),
                    address("cccccccccccccccccccccccccccccccccccccccc"),
                ],
                2,
                address("3333333333333333333333333333333333333333"),
                &data,
                address("5555555555555555555555555555555555555555"),
            ),
            hex::decode(concat!(
                "b63e800d",
                "0000000000000000000000000000000000000000000000000000000000000100",
                "0000000000000000000000000000000000000000000000000000000000000002",
                "0000000000000000000000003333333333333333333333333333333333333333",
                "0000000000000000000000000000000000000000000000000000000000000180",
                "0000000000000000000000005555555555555555555555555555555555555555",
                "0000000000000000000000000000000000000000000000000000000000000000",
                "0000000000000000000000000000000000000000000000000000000000000000",
                "0000000000000000000000000000000000000000000000000000000000000000",
                "0000000000000000000000000000000000000000000000000000000000000003",
                "000000000000000000000000aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
                "000000000000000000000000bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
                "000000000000000000000000cccccccccccccccccccccccccccccccccccccccc",
                "0000000000000000000000000000000000000000000000000000000000000024",
                "fe51f643",
                "0000000000000000000000004444444444444444444444444444444444444444",
                "00000000000000000000000000000000000000000000000000000000",
            ))
            .unwrap(),
        );
    }

    #[test]
    fn create_proxy_calldata() {
        assert_eq!(
            create_proxy_with_nonce(
                address("2222222222222222222222222222222222222222"),
                &[0x01, 0x02, 0x03],
                [0xee; 32],
            ),
            hex::decode(concat!(
                "1688f0b9",
                "0000000000000000000000002222222222222222222222222222222222222222",
                "0000000000000000000000000000000000000000000000000000000000000060",
                "eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee",
                "0000000000000000000000000000000000000000000000000000000000000003",
                "0102030000000000000000000000000000000000000000000000000000000000",
            ))
            .unwrap(),
        );
    }

    #[test]
    fn padding_rounds_to_word() {
        assert_eq!(padding(0).len(), 0);
        assert_eq!(padding(32).len(), 0);
        assert_eq!(padding(4).len(), 28);
        assert_eq!(padding(33).len(), 31);
    }
}
