#![allow(dead_code)]
//! Shared fixture builder: assembles real ZipCrypto archives in memory
//! using the crate's own cipher for the encrypt direction.

use std::io::Write;

use flate2::write::DeflateEncoder;
use flate2::Compression;
use rand::RngCore;
use zipcrack::crypto::ZipCipher;

const LOCAL_HEADER_SIG: u32 = 0x0403_4B50;
const CENTRAL_HEADER_SIG: u32 = 0x0201_4B50;
const DESCRIPTOR_SIG: u32 = 0x0807_4B50;
const EOCD_SIG: u32 = 0x0605_4B50;

const MOD_TIME: u16 = 0x6B2A;
const MOD_DATE: u16 = 0x58E1;

pub struct ArchiveSpec<'a> {
    pub name: &'a str,
    pub plaintext: &'a [u8],
    pub password: &'a str,
    pub deflate: bool,
    /// Use the streaming-writer layout: general-purpose bit 3 set, CRC and
    /// sizes zeroed in the local header and published via a trailing data
    /// descriptor plus the central directory.
    pub data_descriptor: bool,
}

/// Encrypted single-entry archive, stored method, flags clear.
pub fn stored_archive(plaintext: &[u8], password: &str) -> Vec<u8> {
    build(&ArchiveSpec {
        name: "hello.txt",
        plaintext,
        password,
        deflate: false,
        data_descriptor: false,
    })
}

/// Encrypted single-entry archive, deflate method.
pub fn deflated_archive(plaintext: &[u8], password: &str) -> Vec<u8> {
    build(&ArchiveSpec {
        name: "hello.txt",
        plaintext,
        password,
        deflate: true,
        data_descriptor: false,
    })
}

/// Assemble the archive bytes for `spec`: local header, encrypted payload,
/// optional data descriptor, central directory, end-of-central-directory.
pub fn build(spec: &ArchiveSpec) -> Vec<u8> {
    let crc = crc32fast::hash(spec.plaintext);
    let body = if spec.deflate {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(spec.plaintext).unwrap();
        encoder.finish().unwrap()
    } else {
        spec.plaintext.to_vec()
    };
    let method: u16 = if spec.deflate { 8 } else { 0 };

    let mut flags: u16 = 1;
    if spec.data_descriptor {
        flags |= 1 << 3;
    }
    let check_byte = if spec.data_descriptor { (MOD_TIME >> 8) as u8 } else { (crc >> 24) as u8 };

    // 12-byte encryption preamble: 11 random bytes, then the check byte.
    let mut preamble = [0u8; 12];
    rand::thread_rng().fill_bytes(&mut preamble[..11]);
    preamble[11] = check_byte;

    let mut cipher = ZipCipher::with_password(spec.password.as_bytes());
    let mut payload = Vec::with_capacity(12 + body.len());
    for &b in &preamble {
        payload.push(cipher.encrypt_byte(b));
    }
    for &b in &body {
        payload.push(cipher.encrypt_byte(b));
    }

    let comp_size = payload.len() as u32;
    let uncomp_size = spec.plaintext.len() as u32;
    let (local_crc, local_comp, local_uncomp) =
        if spec.data_descriptor { (0, 0, 0) } else { (crc, comp_size, uncomp_size) };

    let mut out = Vec::new();
    out.extend_from_slice(&LOCAL_HEADER_SIG.to_le_bytes());
    out.extend_from_slice(&20u16.to_le_bytes());
    out.extend_from_slice(&flags.to_le_bytes());
    out.extend_from_slice(&method.to_le_bytes());
    out.extend_from_slice(&MOD_TIME.to_le_bytes());
    out.extend_from_slice(&MOD_DATE.to_le_bytes());
    out.extend_from_slice(&local_crc.to_le_bytes());
    out.extend_from_slice(&local_comp.to_le_bytes());
    out.extend_from_slice(&local_uncomp.to_le_bytes());
    out.extend_from_slice(&(spec.name.len() as u16).to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(spec.name.as_bytes());
    out.extend_from_slice(&payload);

    if spec.data_descriptor {
        out.extend_from_slice(&DESCRIPTOR_SIG.to_le_bytes());
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&comp_size.to_le_bytes());
        out.extend_from_slice(&uncomp_size.to_le_bytes());
    }

    let central_offset = out.len() as u32;
    out.extend_from_slice(&CENTRAL_HEADER_SIG.to_le_bytes());
    out.extend_from_slice(&20u16.to_le_bytes()); // version made by
    out.extend_from_slice(&20u16.to_le_bytes()); // version needed
    out.extend_from_slice(&flags.to_le_bytes());
    out.extend_from_slice(&method.to_le_bytes());
    out.extend_from_slice(&MOD_TIME.to_le_bytes());
    out.extend_from_slice(&MOD_DATE.to_le_bytes());
    out.extend_from_slice(&crc.to_le_bytes());
    out.extend_from_slice(&comp_size.to_le_bytes());
    out.extend_from_slice(&uncomp_size.to_le_bytes());
    out.extend_from_slice(&(spec.name.len() as u16).to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // extra len
    out.extend_from_slice(&0u16.to_le_bytes()); // comment len
    out.extend_from_slice(&0u16.to_le_bytes()); // disk number
    out.extend_from_slice(&0u16.to_le_bytes()); // internal attributes
    out.extend_from_slice(&0u32.to_le_bytes()); // external attributes
    out.extend_from_slice(&0u32.to_le_bytes()); // local header offset
    out.extend_from_slice(spec.name.as_bytes());
    let central_size = out.len() as u32 - central_offset;

    out.extend_from_slice(&EOCD_SIG.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&central_size.to_le_bytes());
    out.extend_from_slice(&central_offset.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());

    out
}

/// Archive whose first encrypted entry carries the WinZip AES extra field.
pub fn aes_archive() -> Vec<u8> {
    let name = b"secret.bin";
    let extra: &[u8] = &[0x01, 0x99, 0x07, 0x00, 0x02, 0x00, b'A', b'E', 0x03, 0x08, 0x00];
    let payload = [0u8; 32];

    let mut out = Vec::new();
    out.extend_from_slice(&LOCAL_HEADER_SIG.to_le_bytes());
    out.extend_from_slice(&51u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // encrypted
    out.extend_from_slice(&99u16.to_le_bytes()); // AES method marker
    out.extend_from_slice(&MOD_TIME.to_le_bytes());
    out.extend_from_slice(&MOD_DATE.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(&(name.len() as u16).to_le_bytes());
    out.extend_from_slice(&(extra.len() as u16).to_le_bytes());
    out.extend_from_slice(name);
    out.extend_from_slice(extra);
    out.extend_from_slice(&payload);
    out
}
