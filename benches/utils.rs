#![allow(dead_code)]
use id3_tree::{Dataset, Instance};
use rand::distributions::Uniform;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const LEVELS: [&str; 4] = ["low", "medium", "high", "extreme"];

// create_data
//
// Generates a dataset with `n_categorical` categorical attributes,
// one continuous attribute "Elevation" and a binary outcome "Y".
pub(crate) fn create_data(n_samples: usize, n_categorical: usize) -> Dataset {
    // reproducible seed
    let mut rng = StdRng::seed_from_u64(1903);

    let elevation_distribution = Uniform::new(0.0, 1000.0);
    let noise_distribution = Uniform::new(0.0, 1.0);

    let mut dataset = Dataset::new("Y").with_continuous_attributes(["Elevation"]);
    for _ in 0..n_samples {
        let mut pairs: Vec<(String, String)> = Vec::with_capacity(n_categorical + 2);
        let mut score = 0usize;
        for j in 0..n_categorical {
            let level = rng.gen_range(0..LEVELS.len());
            score += level;
            pairs.push((format!("X{}", j), LEVELS[level].to_string()));
        }
        let elevation: f64 = rng.sample(elevation_distribution);
        pairs.push(("Elevation".to_string(), elevation.to_string()));

        // label depends on the attributes, with a few flipped rows
        let mut positive = score * 2 > n_categorical * (LEVELS.len() - 1) || elevation > 800.0;
        if rng.sample(noise_distribution) < 0.05 {
            positive = !positive;
        }
        pairs.push(("Y".to_string(), if positive { "2" } else { "1" }.to_string()));
        dataset.push(Instance::from_pairs(&pairs).unwrap());
    }
    dataset
}
