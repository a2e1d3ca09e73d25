//! SHA-256 digests of archive files.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Read size for hashing; memory use stays flat for any archive size.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Hex-encoded SHA-256 of the file's bytes.
pub fn sha256_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_known_digest() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("abc.txt");
        fs::write(&path, "abc").unwrap();
        assert_eq!(
            sha256_file(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_deterministic() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.bin");
        fs::write(&path, vec![7u8; CHUNK_SIZE * 3 + 11]).unwrap();
        let first = sha256_file(&path).unwrap();
        let second = sha256_file(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn test_single_byte_change_changes_digest() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.bin");
        let mut bytes = vec![0u8; CHUNK_SIZE + 5];
        fs::write(&path, &bytes).unwrap();
        let before = sha256_file(&path).unwrap();

        bytes[CHUNK_SIZE + 2] = 1;
        fs::write(&path, &bytes).unwrap();
        assert_ne!(before, sha256_file(&path).unwrap());
    }

    #[test]
    fn test_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = sha256_file(&tmp.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
