//! lz-string UTF-16 codec (`compressToUTF16` / `decompressFromUTF16`)

use super::{StoreError, StoreResult};

/// Smallest code unit `compressToUTF16` emits; the decoder underflows below it
const MIN_UNIT: u16 = 32;

/// Decompress a stored payload into its JSON text
pub fn decompress(payload: &str) -> StoreResult<String> {
    if payload.encode_utf16().any(|unit| unit < MIN_UNIT) {
        return Err(StoreError::Decompress);
    }
    let wide = lz_str::decompress_from_utf16(payload).ok_or(StoreError::Decompress)?;
    Ok(String::from_utf16(&wide)?)
}

/// Compress JSON text for storage
pub fn compress(text: &str) -> String {
    lz_str::compress_to_utf16(text)
}

/// Compress a value serialized as JSON
pub fn compress_json<T: serde::Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    Ok(compress(&serde_json::to_string(value)?))
}

/// Decompress and parse a JSON payload
pub fn decompress_json<T: serde::de::DeserializeOwned>(payload: &str) -> Result<T, String> {
    let text = decompress(payload).map_err(|e| e.to_string())?;
    serde_json::from_str(&text).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_is_reversible() {
        let text = r#"{"gamekey":"g1","product":{"human_name":"Bündle ☃"}}"#;
        let packed = compress(text);
        assert_ne!(packed, text);
        assert_eq!(decompress(&packed).unwrap(), text);
    }

    #[test]
    fn test_json_helpers() {
        let packed = compress_json(&vec![440u64, 570]).unwrap();
        let ids: Vec<u64> = decompress_json(&packed).unwrap();
        assert_eq!(ids, vec![440, 570]);
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(decompress_json::<Vec<u64>>("not compressed at all").is_err());
    }

    #[test]
    fn test_control_characters_are_rejected() {
        for payload in ["\n", "\u{0}", "abc\tdef", "\u{1f}"] {
            assert!(matches!(decompress(payload), Err(StoreError::Decompress)));
        }
        let mut packed = compress("[1,2,3]");
        packed.push('\n');
        assert!(decompress_json::<Vec<u64>>(&packed).is_err());
    }
}
