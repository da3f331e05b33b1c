//! HDF5 superblock signature probe.
//!
//! The superblock starts with an 8-byte signature, either at offset 0 or,
//! when the file carries a user block, at 512 or a later power-of-two
//! multiple of 512.

use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use crate::util::Result;

/// Format signature at the start of the superblock.
pub const HDF5_SIGNATURE: &[u8; 8] = b"\x89HDF\r\n\x1a\n";

/// Smallest non-zero superblock offset.
pub const MIN_USERBLOCK_SIZE: u64 = 512;

/// Candidate superblock offsets for a file of `file_len` bytes.
pub fn superblock_offsets(file_len: u64) -> impl Iterator<Item = u64> {
    let sig_len = HDF5_SIGNATURE.len() as u64;
    std::iter::successors(Some(0u64), |&off| {
        if off == 0 {
            Some(MIN_USERBLOCK_SIZE)
        } else {
            off.checked_mul(2)
        }
    })
    .take_while(move |&off| off.saturating_add(sig_len) <= file_len)
}

/// Check a file on disk for the signature.
///
/// A missing path or anything other than a regular file probes as `false`;
/// other I/O failures are errors.
pub fn probe_file(path: &Path) -> Result<bool> {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e.into()),
    };
    let meta = file.metadata()?;
    if !meta.is_file() {
        tracing::trace!(path = %path.display(), "not a regular file");
        return Ok(false);
    }
    let len = meta.len();

    let mut buf = [0u8; 8];
    for off in superblock_offsets(len) {
        file.seek(SeekFrom::Start(off))?;
        file.read_exact(&mut buf)?;
        if &buf == HDF5_SIGNATURE {
            tracing::trace!(path = %path.display(), offset = off, "found superblock signature");
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_offsets() {
        let offs: Vec<u64> = superblock_offsets(4096).collect();
        assert_eq!(offs, vec![0, 512, 1024, 2048]);
        assert_eq!(superblock_offsets(7).count(), 0);
        assert_eq!(superblock_offsets(8).collect::<Vec<_>>(), vec![0]);
    }

    fn file_with_signature_at(offset: usize) -> tempfile::NamedTempFile {
        let mut data = vec![0u8; 1100];
        data[offset..offset + HDF5_SIGNATURE.len()].copy_from_slice(HDF5_SIGNATURE);
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&data).unwrap();
        f
    }

    #[test]
    fn test_user_block_offsets() {
        assert!(probe_file(file_with_signature_at(512).path()).unwrap());
        assert!(probe_file(file_with_signature_at(1024).path()).unwrap());
        // Signature at a non-candidate offset does not count
        assert!(!probe_file(file_with_signature_at(100).path()).unwrap());
    }

    #[test]
    fn test_directory_is_not_a_container() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!probe_file(dir.path()).unwrap());
    }

    #[test]
    fn test_probe_file() {
        let mut text = tempfile::NamedTempFile::new().unwrap();
        writeln!(text, "origin,destination,trips").unwrap();
        assert!(!probe_file(text.path()).unwrap());

        let mut h5 = tempfile::NamedTempFile::new().unwrap();
        h5.write_all(HDF5_SIGNATURE).unwrap();
        h5.write_all(&[0u8; 64]).unwrap();
        assert!(probe_file(h5.path()).unwrap());

        let dir = tempfile::tempdir().unwrap();
        assert!(!probe_file(&dir.path().join("missing.omx")).unwrap());
    }
}
