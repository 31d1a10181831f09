#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use rhdiff::{ChunkConfig, Chunker, split};

fuzz_target!(|input: (u8, Vec<u8>)| {
    let (size, data) = input;
    let chunk_size = usize::from(size) + 1;

    let chunks = split(&data[..], chunk_size).unwrap();

    // Verify: every chunk but the last is full, none is empty
    for (i, chunk) in chunks.iter().enumerate() {
        assert!(!chunk.is_empty());
        if i + 1 < chunks.len() {
            assert_eq!(chunk.len(), chunk_size);
        } else {
            assert!(chunk.len() <= chunk_size);
        }
    }

    // Verify: offsets are contiguous and cover the input
    let mut expected_offset = 0u64;
    for chunk in &chunks {
        assert_eq!(chunk.offset, expected_offset);
        let at = chunk.offset as usize;
        assert_eq!(&data[at..at + chunk.len()], chunk.data.as_ref());
        expected_offset += chunk.len() as u64;
    }
    assert_eq!(expected_offset, data.len() as u64);

    // Verify: zero-copy and push paths agree with the reader path
    let mut chunker = Chunker::new(ChunkConfig::new(chunk_size).unwrap()).unwrap();
    assert_eq!(chunker.chunk_bytes(data.clone()), chunks);

    let mut pushed = Vec::new();
    for piece in data.chunks(7) {
        pushed.extend(chunker.push(Bytes::copy_from_slice(piece)));
    }
    pushed.extend(chunker.finish());
    assert_eq!(pushed, chunks);
});
