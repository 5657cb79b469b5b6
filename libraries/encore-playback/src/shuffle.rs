//! Queue randomization

use encore_core::Track;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

/// Shuffle tracks in place using Fisher-Yates
///
/// Each track has equal probability of appearing at any position.
pub fn shuffle_tracks(tracks: &mut [Track]) {
    let mut rng = thread_rng();
    shuffle_with(tracks, &mut rng);
}

/// Shuffle with a caller-supplied RNG (seeded RNGs give reproducible orders)
pub fn shuffle_with<R: Rng + ?Sized>(tracks: &mut [Track], rng: &mut R) {
    tracks.shuffle(rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_core::{RequesterId, TrackInfo};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create_test_track(id: &str) -> Track {
        Track::new(
            TrackInfo::new(format!("Track {}", id), "Test Artist", 180_000, id),
            RequesterId::new(1),
        )
    }

    fn ids(tracks: &[Track]) -> Vec<String> {
        tracks.iter().map(|t| t.play_uri().to_string()).collect()
    }

    #[test]
    fn shuffle_preserves_all_tracks() {
        let mut tracks: Vec<Track> = (0..20).map(|i| create_test_track(&i.to_string())).collect();
        let mut before = ids(&tracks);

        shuffle_tracks(&mut tracks);

        let mut after = ids(&tracks);
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let original: Vec<Track> = (0..10).map(|i| create_test_track(&i.to_string())).collect();

        let mut a = original.clone();
        let mut b = original;
        shuffle_with(&mut a, &mut StdRng::seed_from_u64(7));
        shuffle_with(&mut b, &mut StdRng::seed_from_u64(7));

        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn shuffle_empty_and_single() {
        let mut empty: Vec<Track> = Vec::new();
        shuffle_tracks(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![create_test_track("only")];
        shuffle_tracks(&mut single);
        assert_eq!(single[0].play_uri(), "only");
    }
}
