use std::collections::HashMap;

use komodo_game::card::Rarity;
use komodo_game::{CardCatalog, select_cards};
use rand::SeedableRng;
use rand::rngs::SmallRng;

const SAMPLE_SIZE: usize = 5000;
const TOLERANCE: f64 = 0.025;

fn rate(count: usize) -> f64 {
    f64::from(u32::try_from(count).expect("count fits")) / f64::from(u32::try_from(SAMPLE_SIZE).expect("sample size fits"))
}

#[test]
fn every_card_is_drawn_at_the_uniform_rate() {
    let catalog = CardCatalog::default_catalog();
    let mut rng = SmallRng::seed_from_u64(0xACED);
    let mut appearances: HashMap<String, usize> = HashMap::new();

    for _ in 0..SAMPLE_SIZE {
        let batch = select_cards(catalog, 3, 0.1, &mut rng);
        for card in &batch.cards {
            *appearances.entry(card.id.clone()).or_insert(0) += 1;
        }
    }

    // A 3-of-15 shuffle-and-slice includes each card with probability 0.2.
    let expected = 3.0 / 15.0;
    for card in catalog.iter() {
        let observed = rate(appearances.get(&card.id).copied().unwrap_or(0));
        assert!(
            (observed - expected).abs() <= TOLERANCE,
            "draw rate for {} drifted: observed {observed:.4}",
            card.id
        );
    }
}

#[test]
fn rarity_bonus_does_not_bias_which_cards_are_drawn() {
    let catalog = CardCatalog::default_catalog();

    for seed in 0..200_u64 {
        let mut low_rng = SmallRng::seed_from_u64(seed);
        let mut high_rng = SmallRng::seed_from_u64(seed);
        let low = select_cards(catalog, 3, 0.0, &mut low_rng);
        let high = select_cards(catalog, 3, 0.45, &mut high_rng);

        let low_ids: Vec<&str> = low.cards.iter().map(|card| card.id.as_str()).collect();
        let high_ids: Vec<&str> = high.cards.iter().map(|card| card.id.as_str()).collect();
        assert_eq!(
            low_ids, high_ids,
            "bonus shifted the draw for seed {seed}"
        );
    }
}

#[test]
fn drawn_rarity_mix_tracks_catalog_composition() {
    let catalog = CardCatalog::default_catalog();
    let catalog_share: HashMap<Rarity, f64> = {
        let mut counts: HashMap<Rarity, usize> = HashMap::new();
        for card in catalog.iter() {
            *counts.entry(card.rarity).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .map(|(rarity, count)| {
                (
                    rarity,
                    f64::from(u32::try_from(count).expect("count fits"))
                        / f64::from(u32::try_from(catalog.len()).expect("len fits")),
                )
            })
            .collect()
    };

    // A maximal quiz bonus still leaves the mix at catalog proportions: the
    // roll classifies but never filters.
    let mut rng = SmallRng::seed_from_u64(0xFEED);
    let mut drawn: HashMap<Rarity, usize> = HashMap::new();
    let mut total = 0usize;
    for _ in 0..SAMPLE_SIZE {
        let batch = select_cards(catalog, 3, 0.45, &mut rng);
        for card in &batch.cards {
            *drawn.entry(card.rarity).or_insert(0) += 1;
            total += 1;
        }
    }

    for (rarity, share) in catalog_share {
        let observed = f64::from(u32::try_from(drawn.get(&rarity).copied().unwrap_or(0)).expect("count fits"))
            / f64::from(u32::try_from(total).expect("total fits"));
        assert!(
            (observed - share).abs() <= TOLERANCE,
            "{rarity} share drifted: observed {observed:.4}, catalog {share:.4}"
        );
    }
}

#[test]
fn oversized_requests_exhaust_the_catalog_exactly_once() {
    let catalog = CardCatalog::default_catalog();
    let mut rng = SmallRng::seed_from_u64(7);

    for _ in 0..100 {
        let batch = select_cards(catalog, 50, 0.2, &mut rng);
        assert_eq!(batch.len(), catalog.len());
        let mut ids: Vec<&str> = batch.cards.iter().map(|card| card.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len(), "a batch may never repeat a card");
    }
}
