use acsim_engine::{Catalog, Crop, CropId, Field, FieldId, GameConfig};
use acsim_training::{
    TrainingError,
    evolution::{EvolutionParams, Evolver},
    genetic::PopulationEvolver,
};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

fn crop(id: u32, name: &str, cost: i64, sale_price: i64, ideal_heat: f64) -> Crop {
    Crop {
        id: CropId(id),
        name: name.to_owned(),
        description: String::new(),
        cost,
        sale_price,
        ideal_heat,
        ideal_wetness: 1.0,
        heat_sensitivity: 0.8,
        wetness_sensitivity: 0.6,
    }
}

fn catalog() -> Catalog {
    Catalog::new(
        vec![
            crop(1, "Potato", 5, 9, 1.0),
            crop(2, "Wheat", 8, 14, 1.05),
            crop(3, "Maize", 12, 20, 0.95),
            crop(4, "Barley", 6, 10, 1.0),
        ],
        vec![
            Field::new(FieldId(1), "Home Paddock", "", 20, 1.0, 150),
            Field::new(FieldId(2), "River Flat", "", 40, 1.3, 400),
            Field::new(FieldId(3), "Stony Rise", "", 30, 0.8, 200),
        ],
    )
    .unwrap()
}

fn params(generations: usize) -> EvolutionParams {
    EvolutionParams {
        population_size: 50,
        generations,
        games_per_strategy: 3,
        report_interval: 1,
        top_count: 5,
        ..EvolutionParams::default()
    }
}

#[test]
fn test_one_generation() {
    let catalog = catalog();
    let evolver = Evolver::new(&catalog, GameConfig::default(), params(1));
    let mut rng = Pcg32::seed_from_u64(2024);

    let mut reports = vec![];
    let population = evolver
        .run(&mut rng, |summary| {
            reports.push((summary.generation, summary.is_final(), summary.top.len()));
        })
        .unwrap();

    assert_eq!(population.len(), 50);
    assert_eq!(reports, vec![(1, true, 5)]);
    for ind in population.individuals() {
        assert!(ind.fitness() >= 0.0, "{}", ind.fitness());
        for crop in catalog.crops() {
            assert!(ind.strategy().weighting(crop.id).is_some());
        }
    }
    assert!(
        population
            .individuals()
            .is_sorted_by(|a, b| a.fitness() >= b.fitness())
    );
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let catalog = catalog();
    let evolver = Evolver::new(&catalog, GameConfig::default(), params(3));

    let first = evolver
        .run(&mut Pcg32::seed_from_u64(9), |_| {})
        .unwrap();
    let second = evolver
        .run(&mut Pcg32::seed_from_u64(9), |_| {})
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_reports_follow_interval() {
    let catalog = catalog();
    let params = EvolutionParams {
        population_size: 10,
        generations: 7,
        games_per_strategy: 1,
        report_interval: 3,
        top_count: 20,
        evolver: PopulationEvolver {
            selection_pressure: 0.3,
            ..PopulationEvolver::default()
        },
        ..EvolutionParams::default()
    };
    let evolver = Evolver::new(&catalog, GameConfig::default(), params);

    let mut generations = vec![];
    evolver
        .run(&mut Pcg32::seed_from_u64(1), |summary| {
            assert_eq!(summary.top.len(), 10);
            assert!(summary.fitness.max >= summary.fitness.mean);
            generations.push(summary.generation);
        })
        .unwrap();
    assert_eq!(generations, vec![3, 6, 7]);
}

#[test]
fn test_empty_population_is_rejected() {
    let catalog = catalog();
    let params = EvolutionParams {
        population_size: 0,
        ..EvolutionParams::default()
    };
    let evolver = Evolver::new(&catalog, GameConfig::default(), params);
    assert!(evolver.run(&mut Pcg32::seed_from_u64(0), |_| {}).is_err());
}

#[test]
fn test_zero_generations_is_rejected() {
    let catalog = catalog();
    let params = EvolutionParams {
        generations: 0,
        ..EvolutionParams::default()
    };
    let evolver = Evolver::new(&catalog, GameConfig::default(), params);
    let mut reports = 0;
    let result = evolver.run(&mut Pcg32::seed_from_u64(0), |_| reports += 1);
    assert!(matches!(
        result,
        Err(TrainingError::InvalidParameters {
            reason: "generation count must be positive"
        })
    ));
    assert_eq!(reports, 0);
}
