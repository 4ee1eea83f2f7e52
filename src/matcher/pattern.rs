//! Prefix matching for Safe (20-byte) addresses.

use std::str::FromStr;

use crate::crypto::keccak256;

/// A 20-byte Ethereum address (e.g. a Safe proxy address).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    #[inline]
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns the zero address.
    pub const fn zero() -> Self {
        Self([0; 20])
    }

    /// Lowercase hex (no 0x).
    #[inline]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// EIP-55 checksummed hex with 0x prefix.
    pub fn to_checksum(&self) -> String {
        let hex_addr = self.to_hex();
        let hash = keccak256(hex_addr.as_bytes());
        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in hex_addr.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_checksum())
    }
}

impl FromStr for Address {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut address = Self::default();
        let s = s.strip_prefix("0x").unwrap_or(s);
        hex::decode_to_slice(s, &mut address.0)?;
        Ok(address)
    }
}

/// An invalid prefix string.
#[derive(Debug, thiserror::Error)]
pub enum PrefixError {
    #[error("prefix must contain only hex characters (0-9, a-f): {0:?}")]
    NotHex(String),
    #[error("prefix cannot be longer than 40 characters (full address)")]
    TooLong,
}

/// A left-anchored hex-digit prefix to match candidate addresses against.
///
/// Matching is case-insensitive and nibble-level, so odd-length prefixes
/// work. An empty prefix matches every address.
#[derive(Clone, Debug)]
pub struct Prefix {
    text: String,
    nibbles: Vec<u8>,
}

impl Prefix {
    /// Parses a prefix string, with or without a leading `0x`.
    pub fn parse(s: &str) -> Result<Self, PrefixError> {
        let text = s.strip_prefix("0x").unwrap_or(s).to_lowercase();
        if !text.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PrefixError::NotHex(s.to_string()));
        }
        if text.len() > 40 {
            return Err(PrefixError::TooLong);
        }
        let nibbles = hex_to_nibbles(&text);
        Ok(Self { text, nibbles })
    }

    /// The normalized (lowercase, no 0x) prefix digits.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.nibbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nibbles.is_empty()
    }

    /// Zero-allocation match on raw address bytes: the address nibbles are
    /// expanded on the stack and compared left-anchored.
    #[inline]
    pub fn matches(&self, address: &Address) -> bool {
        let nibbles = addr_to_nibbles(address.as_bytes());
        nibbles[..self.nibbles.len()] == *self.nibbles
    }

    /// Expected number of attempts before a match (16^len).
    pub fn estimated_difficulty(&self) -> u64 {
        16u64.saturating_pow(self.nibbles.len() as u32)
    }

    pub fn difficulty_description(&self) -> String {
        match self.estimated_difficulty() {
            0..=1_000 => "Very Easy (< 1 second)".into(),
            1_001..=100_000 => "Easy (seconds)".into(),
            100_001..=10_000_000 => "Medium (minutes)".into(),
            10_000_001..=1_000_000_000 => "Hard (hours)".into(),
            _ => "Very Hard (days or more)".into(),
        }
    }
}

/// Convert a lowercase hex string to one nibble (0..15) per character.
fn hex_to_nibbles(hex: &str) -> Vec<u8> {
    hex.bytes()
        .map(|b| match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            _ => 0,
        })
        .collect()
}

/// Convert a 20-byte address to 40 nibbles on the stack (no heap allocation).
#[inline]
fn addr_to_nibbles(bytes: &[u8; 20]) -> [u8; 40] {
    let mut nibbles = [0u8; 40];
    for i in 0..20 {
        nibbles[i * 2] = bytes[i] >> 4;
        nibbles[i * 2 + 1] = bytes[i] & 0x0f;
    }
    nibbles
}
