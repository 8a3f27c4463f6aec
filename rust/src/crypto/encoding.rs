//! Text encoding for salt and hash bytes. Storage convenience only, not a
//! security control.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine};

use crate::error::RecordError;

pub fn encode(bytes: &[u8]) -> String {
    STANDARD_NO_PAD.encode(bytes)
}

/// Decodes `text`, naming `field` in the error so corrupt records point at
/// the offending column.
pub fn decode(field: &'static str, text: &str) -> Result<Vec<u8>, RecordError> {
    STANDARD_NO_PAD
        .decode(text.as_bytes())
        .map_err(|e| RecordError::MalformedEncoding {
            field,
            reason: format!("{e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::{decode, encode};
    use crate::error::RecordError;
    use rand::{rngs::OsRng, Rng, RngCore};

    #[test]
    fn round_trips_random_buffers() {
        let mut rng = OsRng;
        for _ in 0..64 {
            let len = rng.gen_range(0..200);
            let mut bytes = vec![0u8; len];
            rng.fill_bytes(&mut bytes);
            assert_eq!(decode("salt", &encode(&bytes)).unwrap(), bytes);
        }
    }

    #[test]
    fn round_trips_edge_buffers() {
        for bytes in [vec![], vec![0u8; 33], vec![0xFFu8; 64], vec![0xFFu8; 1]] {
            assert_eq!(decode("hash", &encode(&bytes)).unwrap(), bytes);
        }
    }

    #[test]
    fn rejects_invalid_alphabet() {
        let err = decode("salt", "not*base64!").unwrap_err();
        assert!(matches!(err, RecordError::MalformedEncoding { field: "salt", .. }));
    }

    #[test]
    fn rejects_padded_input() {
        // Storage format carries no padding.
        assert!(decode("hash", "AAE=").is_err());
        assert_eq!(decode("hash", "AAE").unwrap(), vec![0, 1]);
    }
}
