//! Embedded common-password corpus and candidate line handling.
//!
//! The corpus is a newline-separated byte blob compiled into the binary.
//! The scheduler fans it out as fixed-size slabs; slab boundaries are
//! aligned to line ends so no candidate is ever split across workers.

/// Slab granularity for parallel fan-out over the corpus.
pub const SLAB_SIZE: usize = 1024 * 1024;

static EMBEDDED: &[u8] = include_bytes!("../data/common_passwords.txt");

/// The embedded corpus blob.
pub fn embedded() -> &'static [u8] {
    EMBEDDED
}

/// Number of candidate lines in the embedded corpus (empty lines excluded).
pub fn embedded_len() -> usize {
    lines(EMBEDDED, usize::MAX).count()
}

/// Split `blob` into slabs of roughly [`SLAB_SIZE`], each ending on a line
/// boundary (except possibly the final slab when the blob has no trailing
/// newline).
pub fn slabs(blob: &[u8]) -> Vec<&[u8]> {
    let mut out = Vec::new();
    let mut rest = blob;
    while rest.len() > SLAB_SIZE {
        match rest[SLAB_SIZE..].iter().position(|&b| b == b'\n') {
            Some(i) => {
                let cut = SLAB_SIZE + i + 1;
                out.push(&rest[..cut]);
                rest = &rest[cut..];
            }
            None => break,
        }
    }
    if !rest.is_empty() {
        out.push(rest);
    }
    out
}

/// Iterate the candidate lines of one slab: LF-delimited, a CR immediately
/// before the LF is stripped, empty lines and lines longer than `max_len`
/// are skipped.
pub fn lines(slab: &[u8], max_len: usize) -> impl Iterator<Item = &[u8]> {
    slab.split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(move |line| !line.is_empty() && line.len() <= max_len)
}

/// Read a user words file: one candidate per line, same trimming rules as
/// the embedded corpus, order preserved.
pub fn load_words(path: &std::path::Path) -> std::io::Result<Vec<String>> {
    let blob = std::fs::read(path)?;
    Ok(lines(&blob, usize::MAX)
        .map(|line| String::from_utf8_lossy(line).into_owned())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_is_nonempty_and_contains_staples() {
        assert!(embedded_len() > 100);
        let mut found_password = false;
        let mut found_letmein = false;
        for line in lines(embedded(), usize::MAX) {
            found_password |= line == b"password";
            found_letmein |= line == b"letmein";
        }
        assert!(found_password);
        assert!(found_letmein);
    }

    #[test]
    fn lines_strip_cr_and_skip_empties() {
        let blob = b"alpha\r\n\nbeta\nverylongcandidate\ngamma";
        let collected: Vec<&[u8]> = lines(blob, 5).collect();
        assert_eq!(collected, vec![&b"alpha"[..], b"beta", b"gamma"]);
    }

    #[test]
    fn slabs_align_to_line_boundaries() {
        // Build a blob a bit over two slabs of 8-byte lines.
        let mut blob = Vec::new();
        while blob.len() < SLAB_SIZE * 2 + 512 {
            blob.extend_from_slice(b"candidat\n");
        }
        let slabs = slabs(&blob);
        assert!(slabs.len() >= 2);
        let mut total = 0usize;
        for slab in &slabs {
            assert_eq!(slab.last(), Some(&b'\n'));
            total += slab.len();
        }
        assert_eq!(total, blob.len());
    }

    #[test]
    fn small_blob_is_a_single_slab() {
        let slabs = slabs(b"one\ntwo\n");
        assert_eq!(slabs.len(), 1);
        assert_eq!(slabs[0], b"one\ntwo\n");
    }

    #[test]
    fn load_words_applies_corpus_line_rules() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, b"alpha\r\nbeta\n\ngamma").unwrap();
        let words = load_words(&path).unwrap();
        assert_eq!(words, vec!["alpha", "beta", "gamma"]);
    }
}
