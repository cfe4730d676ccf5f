/*!
 * Tests for splitting entries into translation chunks
 */

use std::path::PathBuf;
use zhsubs::subtitle_processor::{SubtitleCollection, split_into_chunks};
use crate::common;

#[test]
fn test_splitIntoChunks_with45Entries_shouldMakeThreeChunks() {
    let entries = common::numbered_entries(45);
    let chunks = split_into_chunks(&entries, 20);

    let sizes: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
    assert_eq!(sizes, vec![20, 20, 5]);
    assert_eq!(chunks.concat(), entries);
}

#[test]
fn test_splitIntoChunks_withExactMultiple_shouldHaveNoShortChunk() {
    let entries = common::numbered_entries(40);
    let chunks = split_into_chunks(&entries, 20);
    assert_eq!(chunks.len(), 2);
    assert!(chunks.iter().all(|c| c.len() == 20));
}

#[test]
fn test_splitIntoChunks_withFewerEntriesThanChunkSize_shouldMakeOneChunk() {
    let entries = common::numbered_entries(3);
    let chunks = split_into_chunks(&entries, 20);
    assert_eq!(chunks, vec![entries]);
}

#[test]
fn test_splitIntoChunks_withNoEntries_shouldMakeNoChunks() {
    assert!(split_into_chunks(&[], 20).is_empty());
}

#[test]
fn test_splitIntoChunks_withZeroSize_shouldTreatAsOne() {
    let entries = common::numbered_entries(3);
    assert_eq!(split_into_chunks(&entries, 0).len(), 3);
}

#[test]
fn test_collectionSplit_shouldMatchFreeFunction() {
    let entries = common::numbered_entries(21);
    let collection = SubtitleCollection::with_entries(PathBuf::from("a.srt"), entries.clone());
    assert_eq!(collection.split_into_chunks(20), split_into_chunks(&entries, 20));
}
