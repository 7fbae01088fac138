//! gzenv — компактная сериализация в одну строку (для переменной окружения).
//!
//! Формат: serde_json -> zlib -> base64 (URL-safe алфавит, с паддингом).
//! При декодировании пробельные символы по краям отбрасываются.
//!
//! Кодек обобщённый: любой T: Serialize / DeserializeOwned.

use base64::Engine;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{Read, Write};

use crate::error::{FtError, FtResult};

/// zlib level used when no explicit level is configured.
pub const DEFAULT_LEVEL: u32 = 6;

pub fn marshal<T: Serialize + ?Sized>(value: &T) -> FtResult<String> {
    marshal_with_level(value, DEFAULT_LEVEL)
}

pub fn marshal_with_level<T: Serialize + ?Sized>(value: &T, level: u32) -> FtResult<String> {
    let json = serde_json::to_vec(value).map_err(|e| FtError::Encode(format!("json: {e}")))?;

    let mut enc = ZlibEncoder::new(Vec::new(), Compression::new(level.min(9)));
    enc.write_all(&json)
        .map_err(|e| FtError::Encode(format!("zlib: {e}")))?;
    let packed = enc
        .finish()
        .map_err(|e| FtError::Encode(format!("zlib: {e}")))?;

    Ok(base64::engine::general_purpose::URL_SAFE.encode(packed))
}

pub fn unmarshal<T: DeserializeOwned>(s: &str) -> FtResult<T> {
    let packed = base64::engine::general_purpose::URL_SAFE
        .decode(s.trim().as_bytes())
        .map_err(|e| FtError::Decode(format!("base64: {e}")))?;

    let mut json = Vec::new();
    ZlibDecoder::new(packed.as_slice())
        .read_to_end(&mut json)
        .map_err(|e| FtError::Decode(format!("zlib: {e}")))?;

    serde_json::from_slice(&json).map_err(|e| FtError::Decode(format!("json: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn roundtrip_map() {
        let mut m = BTreeMap::new();
        m.insert("PATH".to_string(), "/usr/bin:/bin".to_string());
        m.insert("EMPTY".to_string(), String::new());
        let s = marshal(&m).unwrap();
        let back: BTreeMap<String, String> = unmarshal(&s).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn output_is_env_safe() {
        let v = vec!["a/b+c?d"; 64];
        let s = marshal(&v).unwrap();
        assert!(!s.contains('\0'));
        assert!(!s.contains('+') && !s.contains('/'));
        assert!(!s.contains(char::is_whitespace));
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let s = marshal(&vec![1u32, 2, 3]).unwrap();
        let back: Vec<u32> = unmarshal(&format!("  {s}\n")).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn garbage_is_decode_error() {
        for bad in ["!!!not base64!!!", "aGVsbG8=", ""] {
            let err = unmarshal::<Vec<u32>>(bad).unwrap_err();
            assert!(matches!(err, FtError::Decode(_)), "{bad:?} -> {err:?}");
        }
    }

    #[test]
    fn level_zero_still_decodes() {
        let s = marshal_with_level(&vec!["x"; 10], 0).unwrap();
        let back: Vec<String> = unmarshal(&s).unwrap();
        assert_eq!(back.len(), 10);
    }
}
