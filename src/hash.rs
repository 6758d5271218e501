//! Digest provider: a name-keyed registry of cryptographic hash constructors
//! and streaming digest computation over files, bytes and strings.

use crate::error::Error;
use digest::DynDigest;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub const MD5: &str = "md5";
pub const SHA1: &str = "sha1";
pub const SHA224: &str = "sha224";
pub const SHA256: &str = "sha256";
pub const SHA384: &str = "sha384";
pub const SHA512: &str = "sha512";
pub const SHA512_224: &str = "sha512_224";
pub const SHA512_256: &str = "sha512_256";
pub const SHA3_224: &str = "sha3_224";
pub const SHA3_256: &str = "sha3_256";
pub const SHA3_384: &str = "sha3_384";
pub const SHA3_512: &str = "sha3_512";
pub const BLAKE3: &str = "blake3";

const READ_CHUNK: usize = 64 * 1024;

/// All algorithm names accepted by [`new_hasher`], in stable order.
pub fn available_algorithms() -> &'static [&'static str] {
    &[
        MD5, SHA1, SHA224, SHA256, SHA384, SHA512, SHA512_224, SHA512_256, SHA3_224, SHA3_256,
        SHA3_384, SHA3_512, BLAKE3,
    ]
}

/// Look up a hasher constructor by algorithm name. Names are matched exactly
/// (callers lowercase user input before reaching this point).
pub fn new_hasher(algo: &str) -> Option<Box<dyn DynDigest>> {
    match algo {
        MD5 => Some(Box::new(md5::Md5::default())),
        SHA1 => Some(Box::new(sha1::Sha1::default())),
        SHA224 => Some(Box::new(sha2::Sha224::default())),
        SHA256 => Some(Box::new(sha2::Sha256::default())),
        SHA384 => Some(Box::new(sha2::Sha384::default())),
        SHA512 => Some(Box::new(sha2::Sha512::default())),
        SHA512_224 => Some(Box::new(sha2::Sha512_224::default())),
        SHA512_256 => Some(Box::new(sha2::Sha512_256::default())),
        SHA3_224 => Some(Box::new(sha3::Sha3_224::default())),
        SHA3_256 => Some(Box::new(sha3::Sha3_256::default())),
        SHA3_384 => Some(Box::new(sha3::Sha3_384::default())),
        SHA3_512 => Some(Box::new(sha3::Sha3_512::default())),
        BLAKE3 => Some(Box::new(blake3::Hasher::new())),
        _ => None,
    }
}

/// Validate an algorithm name, turning an unknown name into a configuration
/// error before any traversal starts.
pub fn validate_algorithm(algo: &str) -> Result<(), Error> {
    if new_hasher(algo).is_some() {
        Ok(())
    } else {
        Err(Error::UnknownAlgorithm(algo.to_string()))
    }
}

/// Digest an arbitrary byte source, streamed in fixed-size chunks.
///
/// Returns the number of bytes consumed alongside the digest; callers rely on
/// the count matching the source length exactly.
pub fn hash_reader<R: Read>(mut reader: R, algo: &str) -> Result<(u64, Vec<u8>), Error> {
    let mut hasher = new_hasher(algo).ok_or_else(|| Error::UnknownAlgorithm(algo.to_string()))?;

    let mut buf = [0u8; READ_CHUNK];
    let mut written: u64 = 0;
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        written += n as u64;
    }

    let sum = hasher.finalize().to_vec();
    debug_assert!(!sum.is_empty());
    Ok((written, sum))
}

/// Digest a file's full content, streamed.
///
/// The byte count is checked against the stat size; device files report a
/// stat size of zero and are exempt.
pub fn hash_file(path: &Path, algo: &str) -> Result<(u64, Vec<u8>), Error> {
    let file = File::open(path)?;
    let stat_size = file.metadata()?.len();

    let (written, sum) = hash_reader(BufReader::with_capacity(READ_CHUNK, file), algo)?;
    debug_assert!(written == stat_size || stat_size == 0);

    Ok((written, sum))
}

/// Digest an in-memory byte slice.
pub fn hash_bytes(data: &[u8], algo: &str) -> Result<(u64, Vec<u8>), Error> {
    let (written, sum) = hash_reader(data, algo)?;
    debug_assert_eq!(written, data.len() as u64);
    Ok((written, sum))
}

/// Digest a string's UTF-8 bytes.
pub fn hash_string(s: &str, algo: &str) -> Result<(u64, Vec<u8>), Error> {
    hash_bytes(s.as_bytes(), algo)
}

/// Canonical lowercase hex encoding of a digest.
pub fn hex_sum(sum: &[u8]) -> String {
    hex::encode(sum)
}

/// Normalize a user-supplied verification digest: optional `0x` prefix
/// stripped, lowercase, at least 32 hex digits. Returns `None` when malformed.
pub fn normalize_hex_sum(s: &str) -> Option<String> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.len() < 32 {
        return None;
    }
    if !s.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(s.to_ascii_lowercase())
}
