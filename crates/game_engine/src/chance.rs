use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::ChanceError;

pub enum ChanceMode {
    /// Independent uniform faces from a seedable PRNG.
    Rng { rng: Box<ChaCha8Rng> },
    /// Faces taken from a fixed list, wrapping around when exhausted.
    Sequence { faces: Vec<u8>, next: usize },
}

impl ChanceMode {
    pub fn from_seed(seed: u64) -> Self {
        ChanceMode::Rng {
            rng: Box::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        ChanceMode::Rng {
            rng: Box::new(ChaCha8Rng::from_entropy()),
        }
    }

    pub fn sequence(faces: impl Into<Vec<u8>>) -> Result<Self, ChanceError> {
        let faces = faces.into();
        if faces.is_empty() {
            return Err(ChanceError::EmptySequence);
        }
        if let Some(&face) = faces.iter().find(|face| !(1..=6).contains(*face)) {
            return Err(ChanceError::InvalidFace(face));
        }
        Ok(ChanceMode::Sequence { faces, next: 0 })
    }

    pub fn roll_die(&mut self) -> u8 {
        match self {
            ChanceMode::Rng { rng } => rng.gen_range(1..=6),
            ChanceMode::Sequence { faces, next } => {
                let face = faces[*next % faces.len()];
                *next = next.wrapping_add(1);
                face
            }
        }
    }
}

impl std::fmt::Debug for ChanceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChanceMode::Rng { .. } => f.write_str("ChanceMode::Rng"),
            ChanceMode::Sequence { faces, next } => f
                .debug_struct("ChanceMode::Sequence")
                .field("faces", faces)
                .field("next", next)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_rolls_same_faces() {
        let mut a = ChanceMode::from_seed(42);
        let mut b = ChanceMode::from_seed(42);
        let left: Vec<u8> = (0..64).map(|_| a.roll_die()).collect();
        let right: Vec<u8> = (0..64).map(|_| b.roll_die()).collect();
        assert_eq!(left, right);
        assert!(left.iter().all(|face| (1..=6).contains(face)));
    }

    #[test]
    fn rng_covers_every_face() {
        let mut chance = ChanceMode::from_seed(7);
        let mut seen = [false; 7];
        for _ in 0..600 {
            seen[chance.roll_die() as usize] = true;
        }
        assert!(seen[1..].iter().all(|s| *s));
        assert!(!seen[0]);
    }

    #[test]
    fn sequence_wraps_around() {
        let mut chance = ChanceMode::sequence([2, 5]).expect("sequence");
        let faces: Vec<u8> = (0..5).map(|_| chance.roll_die()).collect();
        assert_eq!(faces, vec![2, 5, 2, 5, 2]);
    }

    #[test]
    fn sequence_rejects_bad_faces() {
        assert_eq!(
            ChanceMode::sequence(Vec::new()).unwrap_err(),
            ChanceError::EmptySequence
        );
        assert_eq!(
            ChanceMode::sequence([1, 7]).unwrap_err(),
            ChanceError::InvalidFace(7)
        );
    }
}
