//! Snapshot key and value decoding
//!
//! Remote snapshots carry encoded handles as keys and transport-encoded
//! nicknames as values. [`SnapshotCodec`] is the seam a host can replace when
//! its transport uses something other than plain base64.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

use crate::error::{Error, Result};
use crate::model::ContactId;

/// Standard alphabet, padded on encode, padding optional on decode.
const NICKNAME_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decodes snapshot keys and values.
pub trait SnapshotCodec: Send + Sync {
    /// Decode an encoded snapshot key into a contact id.
    fn decode_id(&self, encoded: &str) -> Result<ContactId> {
        ContactId::from_encoded(encoded)
    }

    /// Decode an encoded snapshot value into the plaintext nickname.
    fn decode_nickname(&self, encoded: &str) -> Result<String>;
}

/// Base64 over UTF-8, the account sync protocol's default value encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Codec;

impl Base64Codec {
    /// Encode a plaintext nickname the way remote snapshots carry it.
    #[must_use]
    pub fn encode_nickname(nickname: &str) -> String {
        NICKNAME_ENGINE.encode(nickname.as_bytes())
    }
}

impl SnapshotCodec for Base64Codec {
    /// Line breaks and other ASCII whitespace inside the value are ignored,
    /// so wrapped (MIME-style, 76 column) encodings decode too.
    fn decode_nickname(&self, encoded: &str) -> Result<String> {
        let compact: Vec<u8> = encoded
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        let bytes = NICKNAME_ENGINE
            .decode(&compact)
            .map_err(|e| Error::NicknameDecode {
                message: e.to_string(),
            })?;
        Ok(String::from_utf8(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_nickname() {
        let encoded = Base64Codec::encode_nickname("Robert");
        assert_eq!(encoded, "Um9iZXJ0");
        assert_eq!(Base64Codec.decode_nickname(&encoded).unwrap(), "Robert");
    }

    #[test]
    fn test_decode_unpadded_nickname() {
        // "Bob" is "Qm9i"; "Bo" is "Qm8=" padded
        assert_eq!(Base64Codec.decode_nickname("Qm8").unwrap(), "Bo");
        assert_eq!(Base64Codec.decode_nickname("Qm8=").unwrap(), "Bo");
    }

    #[test]
    fn test_decode_non_ascii_nickname() {
        let encoded = Base64Codec::encode_nickname("Zoë 🦀");
        assert_eq!(Base64Codec.decode_nickname(&encoded).unwrap(), "Zoë 🦀");
    }

    #[test]
    fn test_decode_wrapped_nickname() {
        let nickname = "A rather long nickname that needs more than one line of base64";
        let encoded = Base64Codec::encode_nickname(nickname);
        assert!(encoded.len() > 76);

        let wrapped = format!("{}\n{}", &encoded[..76], &encoded[76..]);
        assert_eq!(Base64Codec.decode_nickname(&wrapped).unwrap(), nickname);

        let crlf = format!(" {}\r\n{}\n", &encoded[..76], &encoded[76..]);
        assert_eq!(Base64Codec.decode_nickname(&crlf).unwrap(), nickname);
    }

    #[test]
    fn test_malformed_base64_is_decode_error() {
        let err = Base64Codec.decode_nickname("%%%").unwrap_err();
        assert!(matches!(err, Error::NicknameDecode { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_error() {
        // 0xFF 0xFE is not valid UTF-8
        let err = Base64Codec.decode_nickname("//4=").unwrap_err();
        assert!(matches!(err, Error::Utf8Error(_)));
    }

    #[test]
    fn test_default_id_decoding() {
        let id = ContactId(1234);
        assert_eq!(Base64Codec.decode_id(&id.encode()).unwrap(), id);
    }
}
