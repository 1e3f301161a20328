use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::instance::Matrix;

#[derive(Clone, Copy, Debug)]
pub enum MatrixShape {
    /// Independent cells set with probability `density`.
    Random { density: f64 },
    /// Column `c` holds species `[0, n - c * n / m)`: nested sets, no conflicts.
    Nested,
    /// Each species carries a window of `width` consecutive characters.
    Staircase { width: usize },
}

pub fn generate_matrix(
    shape: MatrixShape,
    num_species: usize,
    num_characters: usize,
    seed: u64,
) -> Matrix {
    assert!(num_species > 0, "num_species must be positive");
    assert!(num_characters > 0, "num_characters must be positive");
    let rows = match shape {
        MatrixShape::Random { density } => {
            generate_random_rows(num_species, num_characters, density, seed)
        }
        MatrixShape::Nested => generate_nested_rows(num_species, num_characters),
        MatrixShape::Staircase { width } => {
            generate_staircase_rows(num_species, num_characters, width)
        }
    };
    Matrix::from_rows(rows).expect("generated rows are rectangular 0/1")
}

fn generate_random_rows(
    num_species: usize,
    num_characters: usize,
    density: f64,
    seed: u64,
) -> Vec<Vec<u8>> {
    assert!(
        (0.0..=1.0).contains(&density),
        "density must lie in [0, 1]"
    );
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_species)
        .map(|_| {
            (0..num_characters)
                .map(|_| u8::from(rng.gen_bool(density)))
                .collect()
        })
        .collect()
}

fn generate_nested_rows(num_species: usize, num_characters: usize) -> Vec<Vec<u8>> {
    (0..num_species)
        .map(|s| {
            (0..num_characters)
                .map(|c| {
                    let covered = num_species - c * num_species / num_characters;
                    u8::from(s < covered)
                })
                .collect()
        })
        .collect()
}

fn generate_staircase_rows(
    num_species: usize,
    num_characters: usize,
    width: usize,
) -> Vec<Vec<u8>> {
    assert!(width > 0, "width must be positive");
    (0..num_species)
        .map(|s| {
            let start = s % num_characters;
            (0..num_characters)
                .map(|c| u8::from(c >= start && c < start + width))
                .collect()
        })
        .collect()
}
