//! Parsing and canonicalization of recipient addresses.

use crate::{AddressError, AddressResult};

/// Which external representation a recipient string used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// User-friendly base64 form with the bounceable tag (`EQ...`).
    Bounceable,
    /// User-friendly base64 form with the non-bounceable tag (`UQ...`).
    NonBounceable,
    /// Raw `workchain:hex` form.
    Raw,
    /// Input matched no representation or failed its checksum.
    Invalid,
}

/// A recipient identifier after syntactic validation.
///
/// `canonical` is the raw `workchain:hex` form, present exactly when
/// `kind != Invalid`. Two valid addresses refer to the same account iff
/// their canonical strings are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAddress {
    raw: String,
    canonical: Option<String>,
    kind: AddressKind,
    workchain: i32,
    hash: [u8; 32],
    testnet: bool,
}

/// Bounceable tag byte of the user-friendly form.
const TAG_BOUNCEABLE: u8 = 0x11;
/// Non-bounceable tag byte of the user-friendly form.
const TAG_NON_BOUNCEABLE: u8 = 0x51;
/// Testnet-only flag, OR-ed into the tag byte.
const TAG_TESTNET: u8 = 0x80;

/// Byte length of a decoded user-friendly address:
/// tag(1) + workchain(1) + hash(32) + crc16(2).
const FRIENDLY_BYTES: usize = 36;

/// Character length of the user-friendly base64 form.
const FRIENDLY_CHARS: usize = 48;

impl ValidatedAddress {
    /// Validate and canonicalize a recipient string.
    ///
    /// Accepts the raw `workchain:hex` form and the two 48-character
    /// user-friendly base64 forms (standard or URL-safe alphabet).
    /// Never fails: unparseable input is returned with
    /// `kind = AddressKind::Invalid` and no canonical form.
    pub fn validate(raw: &str) -> Self {
        match parse(raw.trim()) {
            Ok(parsed) => ValidatedAddress {
                raw: raw.to_string(),
                canonical: Some(format!(
                    "{}:{}",
                    parsed.workchain,
                    hex_encode(&parsed.hash)
                )),
                kind: parsed.kind,
                workchain: parsed.workchain,
                hash: parsed.hash,
                testnet: parsed.testnet,
            },
            Err(_) => ValidatedAddress {
                raw: raw.to_string(),
                canonical: None,
                kind: AddressKind::Invalid,
                workchain: 0,
                hash: [0u8; 32],
                testnet: false,
            },
        }
    }

    /// The input string, exactly as supplied.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Canonical `workchain:hex` form, if the address is valid.
    pub fn canonical(&self) -> Option<&str> {
        self.canonical.as_deref()
    }

    /// Which representation the input used.
    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    /// True when the input parsed as some address form.
    pub fn is_valid(&self) -> bool {
        self.kind != AddressKind::Invalid
    }

    /// True when the user-friendly form carried the testnet-only flag.
    pub fn is_testnet(&self) -> bool {
        self.testnet
    }

    /// Workchain ID, if valid (-1 masterchain, 0 basechain).
    pub fn workchain(&self) -> Option<i32> {
        if self.is_valid() {
            Some(self.workchain)
        } else {
            None
        }
    }

    /// Re-derive a user-friendly base64 form (URL-safe alphabet, no
    /// padding) from a valid address. Returns `None` for invalid input.
    pub fn to_friendly(&self, bounceable: bool, testnet: bool) -> Option<String> {
        if !self.is_valid() {
            return None;
        }

        let mut data = Vec::with_capacity(FRIENDLY_BYTES);
        let mut tag = if bounceable {
            TAG_BOUNCEABLE
        } else {
            TAG_NON_BOUNCEABLE
        };
        if testnet {
            tag |= TAG_TESTNET;
        }
        data.push(tag);
        data.push(self.workchain as i8 as u8);
        data.extend_from_slice(&self.hash);

        let crc = crc16_xmodem(&data);
        data.push((crc >> 8) as u8);
        data.push(crc as u8);

        Some(base64::Engine::encode(
            &base64::engine::general_purpose::URL_SAFE_NO_PAD,
            &data,
        ))
    }
}

/// Outcome of the internal parsers.
struct ParsedAddress {
    kind: AddressKind,
    workchain: i32,
    hash: [u8; 32],
    testnet: bool,
}

/// Parse any accepted representation.
fn parse(s: &str) -> AddressResult<ParsedAddress> {
    if s.is_empty() {
        return Err(AddressError::Empty);
    }

    if let Some(colon_pos) = s.find(':') {
        return parse_raw_form(s, colon_pos);
    }

    if s.len() == FRIENDLY_CHARS {
        return parse_user_friendly(s);
    }

    Err(AddressError::Unrecognized(s.to_string()))
}

/// Parse the raw `workchain:hex` form.
fn parse_raw_form(s: &str, colon_pos: usize) -> AddressResult<ParsedAddress> {
    let workchain_str = &s[..colon_pos];
    let hash_str = &s[colon_pos + 1..];

    let workchain: i32 = workchain_str
        .parse()
        .map_err(|_| AddressError::InvalidWorkchain(workchain_str.to_string()))?;

    if hash_str.len() != 64 {
        return Err(AddressError::InvalidHex(format!(
            "hash must be 64 hex chars, got {}",
            hash_str.len()
        )));
    }

    let bytes = hex_decode(hash_str)?;
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&bytes);

    Ok(ParsedAddress {
        kind: AddressKind::Raw,
        workchain,
        hash,
        testnet: false,
    })
}

/// Parse a user-friendly base64 address.
///
/// Layout: 1 byte tag + 1 byte workchain + 32 bytes hash + 2 bytes CRC16.
fn parse_user_friendly(s: &str) -> AddressResult<ParsedAddress> {
    // Accept both alphabets; convert URL-safe to standard before decoding.
    let standard_b64: String = s
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();

    let bytes = base64::Engine::decode(
        &base64::engine::general_purpose::STANDARD,
        &standard_b64,
    )
    .map_err(|e| AddressError::InvalidBase64(e.to_string()))?;

    if bytes.len() != FRIENDLY_BYTES {
        return Err(AddressError::WrongLength(bytes.len()));
    }

    let data = &bytes[0..34];
    let expected_crc = ((bytes[34] as u16) << 8) | (bytes[35] as u16);
    let actual_crc = crc16_xmodem(data);
    if expected_crc != actual_crc {
        return Err(AddressError::CrcMismatch {
            expected: expected_crc,
            actual: actual_crc,
        });
    }

    let tag = bytes[0];
    let testnet = tag & TAG_TESTNET != 0;
    let kind = match tag & !TAG_TESTNET {
        TAG_BOUNCEABLE => AddressKind::Bounceable,
        TAG_NON_BOUNCEABLE => AddressKind::NonBounceable,
        _ => return Err(AddressError::UnknownTag(tag)),
    };

    let workchain = bytes[1] as i8 as i32;
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&bytes[2..34]);

    Ok(ParsedAddress {
        kind,
        workchain,
        hash,
        testnet,
    })
}

/// Decode a hex string to bytes.
///
/// Works on raw bytes, never `str` slices: multibyte input must come back
/// as `InvalidHex`, not split a character.
fn hex_decode(s: &str) -> AddressResult<Vec<u8>> {
    let digits = s.as_bytes();
    if digits.len() % 2 != 0 {
        return Err(AddressError::InvalidHex(
            "hex string must have even length".to_string(),
        ));
    }

    let mut result = Vec::with_capacity(digits.len() / 2);
    for pair in digits.chunks_exact(2) {
        let hi = hex_digit(pair[0])?;
        let lo = hex_digit(pair[1])?;
        result.push(hi << 4 | lo);
    }
    Ok(result)
}

/// Value of one hex digit byte.
fn hex_digit(b: u8) -> AddressResult<u8> {
    match b {
        b'0'..=b'9' => Ok(b - b'0'),
        b'a'..=b'f' => Ok(b - b'a' + 10),
        b'A'..=b'F' => Ok(b - b'A' + 10),
        _ => Err(AddressError::InvalidHex(format!(
            "invalid hex digit {:#04x}",
            b
        ))),
    }
}

/// Encode bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// CRC16-XMODEM checksum, as used by user-friendly TON addresses.
fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    // One account in all three forms (CRC-valid vectors).
    const EQ: &str = "EQA9frIn5aPrALJIlBNHmbHzNOBrUHPzpOcmHvYGMdfjoEuC";
    const UQ: &str = "UQA9frIn5aPrALJIlBNHmbHzNOBrUHPzpOcmHvYGMdfjoBZH";
    const RAW: &str = "0:3d7eb227e5a3eb00b24894134799b1f334e06b5073f3a4e7261ef60631d7e3a0";

    // A second account, testnet-flagged bounceable form included.
    const EQ2: &str = "EQCVFC7j4_pCvJvxpRfwTcYAhlzdCe02zx5Ybdoiq0vEf_lT";
    const KQ2: &str = "kQCVFC7j4_pCvJvxpRfwTcYAhlzdCe02zx5Ybdoiq0vEf0LZ";
    const RAW2: &str = "0:95142ee3e3fa42bc9bf1a517f04dc600865cdd09ed36cf1e586dda22ab4bc47f";

    #[test]
    fn test_bounceable_form() {
        let addr = ValidatedAddress::validate(EQ);
        assert_eq!(addr.kind(), AddressKind::Bounceable);
        assert_eq!(addr.canonical(), Some(RAW));
        assert!(!addr.is_testnet());
    }

    #[test]
    fn test_non_bounceable_form() {
        let addr = ValidatedAddress::validate(UQ);
        assert_eq!(addr.kind(), AddressKind::NonBounceable);
        assert_eq!(addr.canonical(), Some(RAW));
    }

    #[test]
    fn test_raw_form() {
        let addr = ValidatedAddress::validate(RAW);
        assert_eq!(addr.kind(), AddressKind::Raw);
        assert_eq!(addr.canonical(), Some(RAW));
        assert_eq!(addr.workchain(), Some(0));
    }

    #[test]
    fn test_all_forms_share_canonical() {
        let a = ValidatedAddress::validate(EQ);
        let b = ValidatedAddress::validate(UQ);
        let c = ValidatedAddress::validate(RAW);
        assert_eq!(a.canonical(), b.canonical());
        assert_eq!(b.canonical(), c.canonical());
    }

    #[test]
    fn test_uppercase_hex_normalized() {
        let addr = ValidatedAddress::validate(&RAW.to_uppercase());
        assert_eq!(addr.canonical(), Some(RAW));
    }

    #[test]
    fn test_testnet_flag() {
        let addr = ValidatedAddress::validate(KQ2);
        assert_eq!(addr.kind(), AddressKind::Bounceable);
        assert!(addr.is_testnet());
        assert_eq!(addr.canonical(), Some(RAW2));
    }

    #[test]
    fn test_idempotent_canonicalization() {
        let first = ValidatedAddress::validate(EQ2);
        let canonical = first.canonical().unwrap().to_string();
        let second = ValidatedAddress::validate(&canonical);
        assert_eq!(second.canonical(), Some(canonical.as_str()));
        assert_eq!(second.kind(), AddressKind::Raw);
    }

    #[test]
    fn test_to_friendly_roundtrip() {
        let addr = ValidatedAddress::validate(RAW);
        assert_eq!(addr.to_friendly(true, false).as_deref(), Some(EQ));
        assert_eq!(addr.to_friendly(false, false).as_deref(), Some(UQ));

        let addr2 = ValidatedAddress::validate(RAW2);
        assert_eq!(addr2.to_friendly(true, true).as_deref(), Some(KQ2));
    }

    #[test]
    fn test_empty_is_invalid() {
        let addr = ValidatedAddress::validate("");
        assert_eq!(addr.kind(), AddressKind::Invalid);
        assert_eq!(addr.canonical(), None);
        assert!(!addr.is_valid());
        assert_eq!(addr.workchain(), None);
    }

    #[test]
    fn test_garbage_is_invalid() {
        for input in ["not-an-address", "EQshort", "0:1234", "hello world"] {
            let addr = ValidatedAddress::validate(input);
            assert_eq!(addr.kind(), AddressKind::Invalid, "input: {input}");
            assert_eq!(addr.canonical(), None);
        }
    }

    #[test]
    fn test_multibyte_raw_hash_is_invalid() {
        // 64 bytes after the colon, but not 64 hex digits: the multibyte
        // characters must yield Invalid, not panic mid-character.
        let raw = format!("0:a{}a", "é".repeat(31));
        assert_eq!(raw.len() - 2, 64);
        let addr = ValidatedAddress::validate(&raw);
        assert_eq!(addr.kind(), AddressKind::Invalid);
        assert_eq!(addr.canonical(), None);
    }

    #[test]
    fn test_corrupted_checksum_rejected() {
        // Flip the last character; CRC16 no longer matches.
        let mut corrupted = EQ.to_string();
        corrupted.pop();
        corrupted.push('A');
        let addr = ValidatedAddress::validate(&corrupted);
        assert_eq!(addr.kind(), AddressKind::Invalid);
    }

    #[test]
    fn test_masterchain_raw() {
        let raw = format!("-1:{}", "0".repeat(64));
        let addr = ValidatedAddress::validate(&raw);
        assert_eq!(addr.kind(), AddressKind::Raw);
        assert_eq!(addr.workchain(), Some(-1));
        assert_eq!(addr.canonical(), Some(raw.as_str()));
    }

    #[test]
    fn test_whitespace_trimmed() {
        let addr = ValidatedAddress::validate(&format!("  {}  ", RAW));
        assert_eq!(addr.canonical(), Some(RAW));
    }

    #[test]
    fn test_crc16_vector() {
        assert_eq!(crc16_xmodem(b"123456789"), 0x31C3);
    }
}
