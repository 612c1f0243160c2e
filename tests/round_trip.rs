//! End-to-end scenarios over real local files.

use std::io::{Seek, SeekFrom, Write};

use rangeio::codec;

/// Write a null-terminated string, an i32 and an i64, then decode them back
/// through the locator's seekable reader.
#[test]
fn local_record_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.bin");

    let mut file = std::fs::File::create(&path).unwrap();
    codec::write_string(&mut file, "hello,world!").unwrap();
    codec::write_i32(&mut file, 321).unwrap();
    codec::write_i64(&mut file, 6464).unwrap();
    file.flush().unwrap();
    drop(file);

    let mut reader = rangeio::open(path.to_str().unwrap()).unwrap();
    reader.seek(SeekFrom::Start(0)).unwrap();
    assert_eq!(codec::read_string(&mut reader).unwrap(), "hello,world!");
    assert_eq!(codec::read_i32(&mut reader).unwrap(), 321);
    assert_eq!(codec::read_i64(&mut reader).unwrap(), 6464);
}

#[test]
fn size_of_local_resource() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hundred.bin");
    std::fs::write(&path, vec![7u8; 100]).unwrap();

    assert_eq!(rangeio::size_of(path.to_str().unwrap()).unwrap(), 100);
}

#[test]
fn reader_reports_size_and_checks_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bounds.bin");
    std::fs::write(&path, b"0123456789").unwrap();

    let mut reader = rangeio::open(path.to_str().unwrap()).unwrap();
    assert_eq!(reader.size(), 10);

    assert_eq!(reader.seek(SeekFrom::End(-3)).unwrap(), 7);
    assert!(reader.seek(SeekFrom::Start(11)).is_err());
    assert!(reader.seek(SeekFrom::Current(-100)).is_err());
}

#[test]
fn read_all_plain_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.bin");
    std::fs::write(&path, b"plain contents").unwrap();

    let all = rangeio::read_all(path.to_str().unwrap()).unwrap();
    assert_eq!(all, b"plain contents");
}

#[test]
fn read_all_decompresses_gz_extension() {
    use flate2::{Compression, write::GzEncoder};

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("payload.txt.gz");

    let file = std::fs::File::create(&path).unwrap();
    let mut enc = GzEncoder::new(file, Compression::default());
    enc.write_all(b"compressed payload").unwrap();
    enc.finish().unwrap();

    let all = rangeio::read_all(path.to_str().unwrap()).unwrap();
    assert_eq!(all, b"compressed payload");
}

#[test]
fn missing_local_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.bin");
    assert!(rangeio::open(path.to_str().unwrap()).is_err());
    assert!(rangeio::read_all(path.to_str().unwrap()).is_err());
}

#[test]
fn shared_wrapper_serializes_access() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.bin");
    std::fs::write(&path, b"abcdef").unwrap();

    let reader = rangeio::Shared::new(rangeio::open(path.to_str().unwrap()).unwrap());
    {
        let mut guard = reader.acquire();
        guard.seek(SeekFrom::Start(2)).unwrap();
        assert_eq!(codec::read_u8(&mut *guard).unwrap(), b'c');
    }
    let mut guard = reader.acquire();
    assert_eq!(codec::read_u8(&mut *guard).unwrap(), b'd');
}
