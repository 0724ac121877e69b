//! Two-phase password validation.
//!
//! `fast_check` is the inner-loop filter: it runs the key schedule over the
//! candidate and the 12-byte encryption header and compares the final
//! keystream byte against the reference check byte. Wrong passwords survive
//! it with probability ≈ 1/256, so every survivor goes through
//! `full_check`, which decrypts and decompresses the whole entry and
//! verifies the stored CRC-32. Only `full_check` is authoritative.

use std::io::Read;

use flate2::read::DeflateDecoder;

use crate::archive::{CompressionMethod, EncryptedEntry};
use crate::crypto::ZipCipher;

/// Keystream pre-check. No allocations; the cipher state lives on the
/// caller's stack.
#[inline(always)]
pub fn fast_check(entry: &EncryptedEntry, candidate: &[u8]) -> bool {
    fast_check_seeded(entry, ZipCipher::with_password(candidate))
}

/// Pre-check for a cipher state already fed with the candidate. The brute
/// enumerator hands in incrementally maintained per-prefix states, so
/// adjacent candidates re-derive one byte of key schedule instead of the
/// whole password.
#[inline(always)]
pub fn fast_check_seeded(entry: &EncryptedEntry, mut cipher: ZipCipher) -> bool {
    for &c in &entry.header[..11] {
        cipher.decrypt_byte(c);
    }
    entry.header[11] ^ cipher.keystream_byte() == entry.check_byte
}

/// Authoritative check: continue the key schedule through the ciphertext,
/// decompress, and compare the CRC-32 of the plaintext against the stored
/// value. Every failure mode rejects the candidate; none is an error.
pub fn full_check(archive: &[u8], entry: &EncryptedEntry, candidate: &[u8]) -> bool {
    let mut cipher = ZipCipher::with_password(candidate);
    for &c in &entry.header {
        cipher.decrypt_byte(c);
    }

    let ciphertext = &archive[entry.data.clone()];
    let mut plaintext = Vec::with_capacity(ciphertext.len());
    for &c in ciphertext {
        plaintext.push(cipher.decrypt_byte(c));
    }

    let mut hasher = crc32fast::Hasher::new();
    match entry.method {
        CompressionMethod::Stored => hasher.update(&plaintext),
        CompressionMethod::Deflated => {
            let mut decoder = DeflateDecoder::new(plaintext.as_slice());
            let mut buf = [0u8; 8192];
            loop {
                match decoder.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => hasher.update(&buf[..n]),
                    // Garbage from a wrong password rarely inflates cleanly.
                    Err(_) => return false,
                }
            }
        }
    }
    hasher.finalize() == entry.crc32
}
