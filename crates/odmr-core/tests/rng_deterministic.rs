use odmr_core::rng::{derive_substream_seed, RngHandle};
use rand::RngCore;

#[test]
fn rng_emits_reproducible_sequence() {
    let mut rng_a = RngHandle::from_seed(1234);
    let mut rng_b = RngHandle::from_seed(1234);

    let seq_a: Vec<u64> = (0..100).map(|_| rng_a.next_u64()).collect();
    let seq_b: Vec<u64> = (0..100).map(|_| rng_b.next_u64()).collect();

    assert_eq!(seq_a, seq_b);
}

#[test]
fn substreams_are_stable_and_distinct() {
    assert_eq!(derive_substream_seed(7, 3), derive_substream_seed(7, 3));
    assert_ne!(derive_substream_seed(7, 3), derive_substream_seed(7, 4));
    assert_ne!(derive_substream_seed(7, 3), derive_substream_seed(8, 3));

    let handle = RngHandle::substream(7, 3);
    assert_eq!(handle.seed(), derive_substream_seed(7, 3));
}

#[test]
fn cloned_handle_replays_draws() {
    let mut original = RngHandle::from_seed(99);
    let _ = original.next_u32();
    let mut replay = original.clone();
    assert_eq!(original.next_u64(), replay.next_u64());
}
