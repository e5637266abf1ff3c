//! Canonical BN254 scalar field elements.
//!
//! Every value that crosses a component boundary in this system is a
//! [`FieldElement`]: a non-negative integer strictly below the BN254 scalar
//! field modulus. Out-of-range values are rejected at construction with a
//! [`FieldError`], never reduced silently.

use std::cmp::Ordering;
use std::fmt;
use std::io;
use std::ops::{Add, Mul, Sub};

use ark_bn254::Fr;
use ark_ff::{BigInteger, Field, PrimeField};
use borsh::{BorshDeserialize, BorshSerialize};
use num_bigint::BigUint;

use crate::error::FieldError;

/// A canonical element of the BN254 scalar field.
///
/// Wraps `ark_bn254::Fr` so that the rest of the workspace never handles a
/// raw field type directly. Arithmetic is field arithmetic modulo the BN254
/// scalar modulus; ordering compares the canonical integer representatives,
/// which is what the auction logic means when it compares prices.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FieldElement(Fr);

impl FieldElement {
    /// The additive identity.
    pub const ZERO: Self = Self(Fr::ZERO);

    /// The multiplicative identity.
    pub const ONE: Self = Self(Fr::ONE);

    /// The BN254 scalar field modulus as a big integer.
    pub fn modulus() -> BigUint {
        BigUint::from(Fr::MODULUS)
    }

    /// Build from a `u64`. Always in range.
    pub fn from_u64(value: u64) -> Self {
        Self(Fr::from(value))
    }

    /// Build from a `u128`. Always in range.
    pub fn from_u128(value: u128) -> Self {
        Self(Fr::from(value))
    }

    /// Build from a big integer, rejecting values at or above the modulus.
    pub fn from_biguint(value: &BigUint) -> Result<Self, FieldError> {
        if *value >= Self::modulus() {
            return Err(FieldError::OutOfRange {
                value: value.to_string(),
            });
        }
        Ok(Self(Fr::from(value.clone())))
    }

    /// Parse a base-10 literal, rejecting values at or above the modulus.
    pub fn from_decimal_str(s: &str) -> Result<Self, FieldError> {
        let value = s
            .parse::<BigUint>()
            .map_err(|_| FieldError::InvalidDecimal(s.to_string()))?;
        Self::from_biguint(&value)
    }

    /// Decode a 32-byte little-endian encoding, rejecting non-canonical
    /// values (encodings of integers at or above the modulus).
    pub fn from_bytes_le(bytes: &[u8; 32]) -> Result<Self, FieldError> {
        let value = BigUint::from_bytes_le(bytes);
        Self::from_biguint(&value).map_err(|_| FieldError::NonCanonicalBytes)
    }

    /// The canonical integer representative.
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from(self.0.into_bigint())
    }

    /// 32-byte little-endian encoding of the canonical representative.
    pub fn to_bytes_le(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        let repr = self.0.into_bigint().to_bytes_le();
        out[..repr.len()].copy_from_slice(&repr);
        out
    }

    /// Number of significant bits in the canonical representative.
    pub fn bit_len(&self) -> usize {
        self.0.into_bigint().num_bits() as usize
    }

    /// Whether the canonical representative fits in `bits` bits.
    pub fn fits_bits(&self, bits: usize) -> bool {
        self.bit_len() <= bits
    }

    pub fn is_zero(&self) -> bool {
        self.0 == Fr::ZERO
    }

    /// Unwrap into the backend field type (for circuit construction).
    pub fn into_fr(self) -> Fr {
        self.0
    }
}

impl From<Fr> for FieldElement {
    fn from(value: Fr) -> Self {
        Self(value)
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl Ord for FieldElement {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.into_bigint().cmp(&other.0.into_bigint())
    }
}

impl PartialOrd for FieldElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self.to_biguint())
    }
}

impl serde::Serialize for FieldElement {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for FieldElement {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_decimal_str(&s).map_err(serde::de::Error::custom)
    }
}

impl BorshSerialize for FieldElement {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes_le())
    }
}

impl BorshDeserialize for FieldElement {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let mut bytes = [0u8; 32];
        reader.read_exact(&mut bytes)?;
        Self::from_bytes_le(&bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
