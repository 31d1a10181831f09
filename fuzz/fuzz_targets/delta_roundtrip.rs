#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use rhdiff::{Change, ChunkConfig, CollisionPolicy, Differ, split};

fuzz_target!(|input: (u8, bool, Vec<u8>, Vec<u8>)| {
    let (size, candidates, source, destination) = input;
    let chunk_size = usize::from(size % 32) + 1;
    let policy = if candidates {
        CollisionPolicy::Candidates
    } else {
        CollisionPolicy::LastWriteWins
    };

    let config = ChunkConfig::new(chunk_size)
        .unwrap()
        .with_collision_policy(policy);
    let chunks = split(&source[..], chunk_size).unwrap();
    let changes = Differ::new(config)
        .unwrap()
        .diff(chunks, &mut Cursor::new(&destination))
        .unwrap();

    // Verify: destination-side changes tile the destination exactly
    let mut parts: Vec<&Change> = changes.iter().filter(|c| c.is_destination()).collect();
    parts.sort_by_key(|c| c.dst_offset());

    let mut rebuilt = Vec::with_capacity(destination.len());
    for change in parts {
        assert_eq!(change.dst_offset(), Some(rebuilt.len() as u64));
        rebuilt.extend_from_slice(change.data());
    }
    assert_eq!(rebuilt, destination);

    // Verify: deletes come last and carry source bytes
    let first_delete = changes
        .iter()
        .position(|c| matches!(c, Change::Delete { .. }))
        .unwrap_or(changes.len());
    for change in &changes[first_delete..] {
        let Change::Delete { src_offset, data } = change else {
            panic!("non-delete after a delete: {change}");
        };
        let at = *src_offset as usize;
        assert_eq!(&source[at..at + data.len()], data.as_ref());
    }
});
