//! Compressed on-disk snapshot of an [`InvertedIndex`].
//!
//! Layout: 4 magic bytes, a little-endian `u32` format version, then a zstd
//! stream holding the counters and every word with its posting set as varints
//! and length-prefixed UTF-8. Words are written in sorted order. Only logical
//! membership survives a round trip; bucket layout is rebuilt on load.

use crate::error::SnapshotError;
use crate::index::inverted::InvertedIndex;
use crate::index::types::IndexStats;
use crate::set::HashSet;
use crate::utils::{ByteReader, encode_str, encode_varint, read_u32_le, write_u32_le};
use log::warn;
use rustc_hash::FxHashMap;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

pub const SNAPSHOT_MAGIC: &[u8; 4] = b"BSIX";
pub const SNAPSHOT_VERSION: u32 = 1;

const ZSTD_LEVEL: i32 = 3;

/// Write a snapshot to `path`, creating parent directories.
/// Returns the snapshot size in bytes.
pub fn save_snapshot(index: &InvertedIndex, path: &Path) -> Result<u64, SnapshotError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = BufWriter::new(File::create(path)?);
    write_snapshot(index, file)?;
    Ok(fs::metadata(path)?.len())
}

/// Restore an index from a snapshot file
pub fn load_snapshot(path: &Path) -> Result<InvertedIndex, SnapshotError> {
    let file = BufReader::new(File::open(path)?);
    read_snapshot(file)
}

/// Serialize an index into any writer
pub fn write_snapshot<W: Write>(index: &InvertedIndex, mut writer: W) -> Result<(), SnapshotError> {
    writer.write_all(SNAPSHOT_MAGIC)?;
    write_u32_le(&mut writer, SNAPSHOT_VERSION)?;

    let body = encode_body(index);
    let mut encoder = zstd::stream::write::Encoder::new(writer, ZSTD_LEVEL)?;
    encoder.write_all(&body)?;
    let mut writer = encoder.finish()?;
    writer.flush()?;
    Ok(())
}

/// Deserialize an index from any reader
pub fn read_snapshot<R: Read>(mut reader: R) -> Result<InvertedIndex, SnapshotError> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => SnapshotError::BadMagic,
        _ => SnapshotError::Io(err),
    })?;
    if &magic != SNAPSHOT_MAGIC {
        return Err(SnapshotError::BadMagic);
    }

    let version = read_u32_le(&mut reader).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => SnapshotError::Truncated("version"),
        _ => SnapshotError::Io(err),
    })?;
    if version == 0 || version > SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            expected: SNAPSHOT_VERSION,
            actual: version,
        });
    }

    let mut body = Vec::new();
    zstd::stream::read::Decoder::new(reader)?.read_to_end(&mut body)?;
    decode_body(&body)
}

fn encode_body(index: &InvertedIndex) -> Vec<u8> {
    let mut buf = Vec::new();
    let stats = index.stats();
    encode_varint(stats.words_indexed, &mut buf);
    encode_varint(stats.files_processed, &mut buf);
    encode_varint(stats.documents_processed, &mut buf);

    let mut words: Vec<(&str, &HashSet)> = index.iter().collect();
    words.sort_unstable_by(|a, b| a.0.cmp(b.0));

    encode_varint(words.len() as u64, &mut buf);
    for (word, postings) in words {
        encode_str(word, &mut buf);
        encode_varint(postings.len() as u64, &mut buf);
        for doc_id in postings.keys() {
            encode_str(doc_id, &mut buf);
        }
    }
    buf
}

fn decode_body(body: &[u8]) -> Result<InvertedIndex, SnapshotError> {
    let mut reader = ByteReader::new(body);
    let mut counter = || reader.read_varint().ok_or(SnapshotError::Truncated("counters"));
    let stats = IndexStats {
        words_indexed: counter()?,
        files_processed: counter()?,
        documents_processed: counter()?,
    };

    let word_count = reader
        .read_varint()
        .ok_or(SnapshotError::Truncated("word count"))?;

    // Never trust a stored count for preallocation beyond what the body can hold
    let capacity = (word_count as usize).min(body.len());
    let mut words = FxHashMap::with_capacity_and_hasher(capacity, Default::default());

    for _ in 0..word_count {
        let word = read_string(&mut reader, "word")?;
        let posting_count = reader
            .read_varint()
            .ok_or(SnapshotError::Truncated("posting count"))?;

        let mut postings = HashSet::new();
        for _ in 0..posting_count {
            let doc_id = read_string(&mut reader, "document id")?;
            postings.add(&doc_id);
        }
        words.insert(word, postings);
    }

    if !reader.is_at_end() {
        warn!("Ignoring trailing bytes after the last snapshot entry");
    }

    Ok(InvertedIndex::from_parts(words, stats))
}

fn read_string(reader: &mut ByteReader<'_>, what: &'static str) -> Result<String, SnapshotError> {
    let bytes = reader.read_bytes().ok_or(SnapshotError::Truncated(what))?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexWriter;

    fn sample_index() -> InvertedIndex {
        let mut writer = IndexWriter::new();
        writer.add_document("1", ["cat dog"]);
        writer.add_document("2", ["dog bird"]);
        writer.add_document("3", ["cat bird Straße"]);
        for i in 0..100 {
            writer.add_word("common", &format!("doc{}", i));
        }
        writer.record_file();
        writer.finish()
    }

    fn assert_same_membership(a: &InvertedIndex, b: &InvertedIndex) {
        assert_eq!(a.len(), b.len());
        for (word, postings) in a.iter() {
            assert_eq!(b.lookup(word), Some(postings), "word {}", word);
        }
    }

    #[test]
    fn test_snapshot_preserves_membership_and_counters() {
        let index = sample_index();
        let mut buf = Vec::new();
        write_snapshot(&index, &mut buf).unwrap();
        assert_eq!(&buf[..4], SNAPSHOT_MAGIC);

        let restored = read_snapshot(buf.as_slice()).unwrap();
        assert_same_membership(&index, &restored);
        assert_eq!(restored.stats(), index.stats());
        assert_eq!(restored.lookup("common").unwrap().len(), 100);
    }

    #[test]
    fn test_empty_index_snapshot() {
        let index = IndexWriter::new().finish();
        let mut buf = Vec::new();
        write_snapshot(&index, &mut buf).unwrap();
        let restored = read_snapshot(buf.as_slice()).unwrap();
        assert!(restored.is_empty());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("index.snap");
        let index = sample_index();

        let size = save_snapshot(&index, &path).unwrap();
        assert!(size > 8);

        let restored = load_snapshot(&path).unwrap();
        assert_same_membership(&index, &restored);
    }

    #[test]
    fn test_bad_magic() {
        let err = read_snapshot(&b"NOPE\x01\x00\x00\x00"[..]).unwrap_err();
        assert!(matches!(err, SnapshotError::BadMagic));

        let err = read_snapshot(&b"BS"[..]).unwrap_err();
        assert!(matches!(err, SnapshotError::BadMagic));
    }

    #[test]
    fn test_unsupported_version() {
        let mut buf = SNAPSHOT_MAGIC.to_vec();
        buf.extend_from_slice(&7u32.to_le_bytes());
        let err = read_snapshot(buf.as_slice()).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::UnsupportedVersion { expected: 1, actual: 7 }
        ));
    }

    #[test]
    fn test_truncated_body() {
        let mut buf = SNAPSHOT_MAGIC.to_vec();
        buf.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
        buf.extend(zstd::stream::encode_all(&[5u8][..], ZSTD_LEVEL).unwrap());
        let err = read_snapshot(buf.as_slice()).unwrap_err();
        assert!(matches!(err, SnapshotError::Truncated("counters")));
    }

    #[test]
    fn test_invalid_utf8_word() {
        let mut body = Vec::new();
        for _ in 0..3 {
            encode_varint(0, &mut body);
        }
        encode_varint(1, &mut body);
        encode_varint(2, &mut body);
        body.extend_from_slice(&[0xff, 0xfe]);

        let mut buf = SNAPSHOT_MAGIC.to_vec();
        buf.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
        buf.extend(zstd::stream::encode_all(body.as_slice(), ZSTD_LEVEL).unwrap());
        let err = read_snapshot(buf.as_slice()).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidUtf8(_)));
    }
}
