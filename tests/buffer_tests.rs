//! ByteBuffer Tests
//!
//! Tests verify:
//! - Appending across growth events
//! - Deterministic capacity growth sequence
//! - Index, search, split and slice operations
//! - Delete / truncate / clear semantics
//! - Direct fill bounds
//! - Equality, ordering and hashing

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use bytelines::buffer::{hash_bytes, next_capacity};
use bytelines::{ByteBuffer, ByteError, Config};

// =============================================================================
// Construction Tests
// =============================================================================

#[test]
fn test_new_buffer_is_empty() {
    let buf = ByteBuffer::new();
    assert!(buf.is_empty());
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.capacity(), 256);
    assert_eq!(buf.space(), 256);
    assert!(buf.has_remaining());
}

#[test]
fn test_with_config_uses_buffer_capacity() {
    let config = Config::builder().buffer_capacity(12).build();
    let mut buf = ByteBuffer::with_config(&config);
    assert_eq!(buf.capacity(), 12);
    assert!(buf.is_empty());

    buf.append_slice(&[0u8; 13]);
    assert_eq!(buf.capacity(), 24);
}

#[test]
fn test_from_slice_small_gets_default_capacity() {
    let buf = ByteBuffer::from_slice(b"hello");
    assert_eq!(buf.as_slice(), b"hello");
    assert_eq!(buf.len(), 5);
    assert_eq!(buf.capacity(), 256);
}

#[test]
fn test_from_slice_large_fits_exactly() {
    let data = vec![7u8; 1000];
    let buf = ByteBuffer::from_slice(&data);
    assert_eq!(buf.capacity(), 1000);
    assert!(!buf.has_remaining());
    assert_eq!(buf.space(), 0);
}

#[test]
fn test_clone_is_deep_and_trimmed() {
    let mut original = ByteBuffer::from_slice(b"abc");
    let copy = original.clone();
    original.set_byte_at(0, b'z').unwrap();

    assert_eq!(copy.as_slice(), b"abc");
    assert_eq!(copy.capacity(), 3);
    assert_eq!(original.as_slice(), b"zbc");
}

// =============================================================================
// Append & Growth Tests
// =============================================================================

#[test]
fn test_append_then_slice_returns_appended_bytes() {
    let mut buf = ByteBuffer::with_capacity(1);
    let data: Vec<u8> = (0..=255u8).cycle().take(5000).collect();

    for chunk in data.chunks(37) {
        buf.append_slice(chunk);
    }

    assert_eq!(buf.len(), data.len());
    assert_eq!(buf.sub_sequence(0, buf.len()).unwrap(), data);
}

#[test]
fn test_growth_sequence_one_byte_at_a_time() {
    let mut buf = ByteBuffer::with_capacity(4);
    let mut capacities = vec![buf.capacity()];

    for i in 0..600u32 {
        buf.append(i as u8);
        if *capacities.last().unwrap() != buf.capacity() {
            capacities.push(buf.capacity());
        }
    }

    assert_eq!(capacities, vec![4, 8, 16, 32, 64, 128, 256, 384, 576, 864]);
}

#[test]
fn test_growth_uses_minimum_when_larger() {
    let mut buf = ByteBuffer::with_capacity(4);
    buf.append_slice(&[0u8; 100]);
    assert_eq!(buf.capacity(), 100);
    assert_eq!(buf.len(), 100);
}

#[test]
fn test_exact_fit_does_not_grow() {
    let mut buf = ByteBuffer::with_capacity(4);
    buf.append_slice(b"abcd");
    assert_eq!(buf.capacity(), 4);
    assert!(!buf.has_remaining());
}

#[test]
fn test_next_capacity_thresholds() {
    assert_eq!(next_capacity(128), 256);
    assert_eq!(next_capacity(256), 384);
    assert_eq!(next_capacity(1000), 1500);
}

#[test]
fn test_append_prefix() {
    let mut buf = ByteBuffer::new();
    buf.append_prefix(b"hello world", 5).unwrap();
    assert_eq!(buf.as_slice(), b"hello");

    let err = buf.append_prefix(b"abc", 4).unwrap_err();
    assert!(matches!(err, ByteError::OutOfBounds { index: 4, length: 3 }));
    assert_eq!(buf.as_slice(), b"hello");
}

#[test]
fn test_reserve() {
    let mut buf = ByteBuffer::with_capacity(8);
    buf.append_slice(b"abc");
    buf.reserve(5);
    assert_eq!(buf.capacity(), 8);

    buf.reserve(6);
    assert_eq!(buf.capacity(), 16);
    assert!(buf.space() >= 6);
    assert_eq!(buf.as_slice(), b"abc");
}

// =============================================================================
// Index & Search Tests
// =============================================================================

#[test]
fn test_byte_at_within_content() {
    let buf = ByteBuffer::from_slice(b"abc");
    assert_eq!(buf.byte_at(0).unwrap(), b'a');
    assert_eq!(buf.byte_at(2).unwrap(), b'c');
}

#[test]
fn test_byte_at_tolerates_length_slot() {
    let mut buf = ByteBuffer::from_slice(b"abc");
    buf.set_byte_at(3, b'\n').unwrap();
    assert_eq!(buf.byte_at(3).unwrap(), b'\n');
    // The slot past the content is not content
    assert_eq!(buf.len(), 3);
}

#[test]
fn test_byte_at_beyond_length_fails() {
    let buf = ByteBuffer::from_slice(b"abc");
    let err = buf.byte_at(4).unwrap_err();
    assert!(matches!(err, ByteError::OutOfBounds { index: 4, length: 3 }));
}

#[test]
fn test_byte_at_length_slot_of_full_buffer_fails() {
    let buf = ByteBuffer::from_slice(&[1u8; 300]);
    assert_eq!(buf.capacity(), 300);
    assert!(buf.byte_at(300).is_err());
}

#[test]
fn test_set_byte_at_beyond_length_fails() {
    let mut buf = ByteBuffer::from_slice(b"abc");
    assert!(buf.set_byte_at(10, b'x').is_err());
    assert_eq!(buf.as_slice(), b"abc");
}

#[test]
fn test_index_of() {
    let buf = ByteBuffer::from_slice(b"a,b,,c");
    assert_eq!(buf.index_of(b','), Some(1));
    assert_eq!(buf.index_of(b'a'), Some(0));
    assert_eq!(buf.index_of(b'z'), None);
}

#[test]
fn test_index_of_from() {
    let buf = ByteBuffer::from_slice(b"a,b,,c");
    assert_eq!(buf.index_of_from(b',', 1), Some(1));
    assert_eq!(buf.index_of_from(b',', 2), Some(3));
    assert_eq!(buf.index_of_from(b',', 5), None);
    assert_eq!(buf.index_of_from(b',', 100), None);
}

#[test]
fn test_index_of_ignores_bytes_past_length() {
    let mut buf = ByteBuffer::from_slice(b"abc,");
    buf.truncate(3);
    assert_eq!(buf.index_of(b','), None);
}

#[test]
fn test_index_of_smallest_match() {
    let buf = ByteBuffer::from_slice(b"xxyxyy");
    for start in 0..6 {
        let expected = b"xxyxyy"[start..]
            .iter()
            .position(|&b| b == b'y')
            .map(|p| p + start);
        assert_eq!(buf.index_of_from(b'y', start), expected);
    }
}

// =============================================================================
// Split & Slice Tests
// =============================================================================

#[test]
fn test_split_fields() {
    let buf = ByteBuffer::from_slice(b"a,b,,c");
    let fields = buf.split(b',');
    assert_eq!(fields, vec![b"a".to_vec(), b"b".to_vec(), Vec::new(), b"c".to_vec()]);
}

#[test]
fn test_split_trailing_delimiter_adds_no_empty_field() {
    let buf = ByteBuffer::from_slice(b"a\tb\t");
    assert_eq!(buf.split(b'\t'), vec![b"a".to_vec(), b"b".to_vec()]);
}

#[test]
fn test_split_leading_delimiter_keeps_empty_field() {
    let buf = ByteBuffer::from_slice(b",a");
    assert_eq!(buf.split(b','), vec![Vec::new(), b"a".to_vec()]);
}

#[test]
fn test_split_without_delimiter() {
    let buf = ByteBuffer::from_slice(b"whole");
    assert_eq!(buf.split(b','), vec![b"whole".to_vec()]);
    assert!(ByteBuffer::new().split(b',').is_empty());
}

#[test]
fn test_sub_sequence() {
    let buf = ByteBuffer::from_slice(b"hello world");
    assert_eq!(buf.sub_sequence(6, 11).unwrap(), b"world");
    assert_eq!(buf.sub_sequence(3, 3).unwrap(), b"");
}

#[test]
fn test_sub_sequence_out_of_bounds() {
    let buf = ByteBuffer::from_slice(b"hello");
    assert!(matches!(
        buf.sub_sequence(0, 6),
        Err(ByteError::OutOfBounds { index: 6, length: 5 })
    ));
    assert!(matches!(
        buf.sub_sequence(6, 6),
        Err(ByteError::OutOfBounds { index: 6, length: 5 })
    ));
    assert!(buf.sub_sequence(4, 2).is_err());
}

// =============================================================================
// Delete / Truncate / Clear Tests
// =============================================================================

#[test]
fn test_delete_middle() {
    let mut buf = ByteBuffer::from_slice(b"0123456789");
    buf.delete(2, 3);
    assert_eq!(buf.as_slice(), b"0156789");
}

#[test]
fn test_delete_then_append_matches_prefix_and_suffix() {
    let original = b"the quick brown fox";
    let mut buf = ByteBuffer::from_slice(original);
    buf.delete(4, 6);
    buf.append_slice(b"!");

    let mut expected = original[..4].to_vec();
    expected.extend_from_slice(&original[10..]);
    expected.push(b'!');
    assert_eq!(buf.as_slice(), expected.as_slice());
}

#[test]
fn test_delete_past_end_truncates() {
    let mut buf = ByteBuffer::from_slice(b"abcdef");
    buf.delete(3, 100);
    assert_eq!(buf.as_slice(), b"abc");

    let mut buf = ByteBuffer::from_slice(b"abcdef");
    buf.delete(3, 3);
    assert_eq!(buf.as_slice(), b"abc");
}

#[test]
fn test_delete_at_or_beyond_length_is_noop() {
    let mut buf = ByteBuffer::from_slice(b"abc");
    buf.delete(3, 1);
    buf.delete(10, 1);
    assert_eq!(buf.as_slice(), b"abc");
}

#[test]
fn test_delete_huge_count_does_not_overflow() {
    let mut buf = ByteBuffer::from_slice(b"abc");
    buf.delete(1, usize::MAX);
    assert_eq!(buf.as_slice(), b"a");
}

#[test]
fn test_truncate() {
    let mut buf = ByteBuffer::from_slice(b"abcdef");
    buf.truncate(10);
    assert_eq!(buf.len(), 6);
    buf.truncate(2);
    assert_eq!(buf.as_slice(), b"ab");
}

#[test]
fn test_clear_keeps_capacity() {
    let mut buf = ByteBuffer::with_capacity(4);
    buf.append_slice(&[1u8; 50]);
    let capacity = buf.capacity();
    buf.clear();
    assert!(buf.is_empty());
    assert_eq!(buf.capacity(), capacity);
}

#[test]
fn test_reset_reuses_storage() {
    let mut buf = ByteBuffer::with_capacity(16);
    buf.append_slice(b"old content");
    buf.reset(b"new");
    assert_eq!(buf.as_slice(), b"new");
    assert_eq!(buf.capacity(), 16);
}

#[test]
fn test_reset_larger_than_storage() {
    let mut buf = ByteBuffer::with_capacity(2);
    buf.reset(b"much longer");
    assert_eq!(buf.as_slice(), b"much longer");
    assert_eq!(buf.capacity(), 11);
}

// =============================================================================
// Direct Fill Tests
// =============================================================================

#[test]
fn test_direct_fill_and_advance() {
    let mut buf = ByteBuffer::with_capacity(8);
    buf.append_slice(b"ab");

    let spare = buf.spare_capacity_mut();
    assert_eq!(spare.len(), 6);
    spare[..3].copy_from_slice(b"cde");
    buf.advance(3).unwrap();

    assert_eq!(buf.as_slice(), b"abcde");
    assert_eq!(buf.space(), 3);
}

#[test]
fn test_advance_past_capacity_fails() {
    let mut buf = ByteBuffer::with_capacity(8);
    buf.append_slice(b"abcdef");

    let err = buf.advance(3).unwrap_err();
    assert!(matches!(
        err,
        ByteError::CapacityExceeded { requested: 9, capacity: 8 }
    ));
    assert_eq!(buf.len(), 6);

    buf.advance(2).unwrap();
    assert_eq!(buf.len(), 8);
}

// =============================================================================
// Equality, Ordering & Hashing Tests
// =============================================================================

#[test]
fn test_equality_ignores_capacity() {
    let mut a = ByteBuffer::with_capacity(4);
    a.append_slice(b"same");
    let b = ByteBuffer::from_slice(b"same");
    assert_ne!(a.capacity(), b.capacity());
    assert_eq!(a, b);
    assert!(a.eq_bytes(b"same"));
    assert!(a == b"same"[..]);
}

#[test]
fn test_equality_ignores_bytes_past_length() {
    let mut a = ByteBuffer::from_slice(b"abcX");
    a.truncate(3);
    let b = ByteBuffer::from_slice(b"abcY");
    let mut b2 = b.clone();
    b2.truncate(3);
    assert_eq!(a, b2);
}

#[test]
fn test_ordering_is_length_first() {
    let short = ByteBuffer::from_slice(b"zz");
    let long = ByteBuffer::from_slice(b"aaa");
    assert!(short < long);
    assert_eq!(short.compare_bytes(b"aaa"), Ordering::Less);
    assert_eq!(long.compare_bytes(b"zz"), Ordering::Greater);
}

#[test]
fn test_ordering_uses_signed_bytes() {
    let high = ByteBuffer::from_slice(&[0x80]);
    let low = ByteBuffer::from_slice(&[0x01]);
    assert!(high < low);
}

#[test]
fn test_sorting_buffers() {
    let mut bufs = vec![
        ByteBuffer::from_slice(b"bb"),
        ByteBuffer::from_slice(b"a"),
        ByteBuffer::from_slice(b"ab"),
    ];
    bufs.sort();
    let sorted: Vec<&[u8]> = bufs.iter().map(|b| b.as_slice()).collect();
    assert_eq!(sorted, vec![&b"a"[..], &b"ab"[..], &b"bb"[..]]);
}

#[test]
fn test_hash_code_matches_free_function() {
    let buf = ByteBuffer::from_slice(b"hello");
    assert_eq!(buf.hash_code(), hash_bytes(b"hello"));
    assert_eq!(buf.hash_code(), 99162322);
}

#[test]
fn test_hash_code_recomputed_after_mutation() {
    let mut buf = ByteBuffer::from_slice(b"hell");
    let before = buf.hash_code();
    buf.append(b'o');
    assert_ne!(buf.hash_code(), before);
    assert_eq!(buf.hash_code(), 99162322);

    buf.delete(0, 1);
    assert_eq!(buf.hash_code(), hash_bytes(b"ello"));
}

#[test]
fn test_std_hash_consistent_with_eq() {
    let mut a = ByteBuffer::with_capacity(2);
    a.append_slice(b"key");
    let b = ByteBuffer::from_slice(b"key");

    let hash = |buf: &ByteBuffer| {
        let mut hasher = DefaultHasher::new();
        buf.hash(&mut hasher);
        hasher.finish()
    };
    assert_eq!(hash(&a), hash(&b));
}

#[test]
fn test_ascii_eq() {
    let buf = ByteBuffer::from_slice(b"HTTP");
    assert!(buf.ascii_eq("HTTP"));
    assert!(!buf.ascii_eq("HTTPS"));
    assert!(!buf.ascii_eq("http"));
}

#[test]
fn test_display_is_lossy() {
    let buf = ByteBuffer::from_slice(b"ok \xff");
    assert_eq!(buf.to_string(), "ok \u{fffd}");
}
