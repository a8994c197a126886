use container_yard::{
    ChangeMinMax, Config, GreedySolver, Input, SimulationError, SingleCraneSolver, Solver,
};
use rand::{Rng as _, SeedableRng};
use rand_pcg::Pcg64Mcg;

fn main() -> Result<(), SimulationError> {
    let input = Input::read_input();
    let mut rng = Pcg64Mcg::from_entropy();

    let config = Config {
        seed: rng.gen(),
        ..Config::default()
    };

    let mut best_result = SingleCraneSolver::new(config).solve(&input)?;
    let mut best_score = best_result.score();

    match GreedySolver::new(config).solve(&input) {
        Ok(result) => {
            let score = result.score();

            if best_score.change_min(score) {
                best_result = result;
                eprintln!("score updated!: {}", score);
            }
        }
        Err(err) => {
            eprintln!("{}", err);
        }
    }

    print!("{}", best_result.schedule());
    eprintln!("Score: {}", best_result.score());

    Ok(())
}
