use gridfront_kernel::prelude::*;
use gridfront_kernel::test_harness::{check_invariants, fronts};
use gridfront_test_utils::{arb_budget, arb_grid};
use proptest::prelude::*;

fn adjacent(a: &Cell, b: &Cell) -> bool {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col) == 1
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_fixpoint_is_valid_and_dominance_free(
        grid in arb_grid(5),
        config in arb_budget(),
    ) {
        let mut grid = grid;
        let report = Solver::new(config).unwrap().solve(&mut grid);
        prop_assert!(report.converged);

        prop_assert!(check_invariants(&grid, 0).is_empty());
        for cell in grid.cells() {
            prop_assert!(grid.labels(cell.id).is_dominance_free());
        }
    }

    #[test]
    fn prop_histories_are_walks_from_start(
        grid in arb_grid(5),
        config in arb_budget(),
    ) {
        let mut grid = grid;
        let budget = config.budget();
        Solver::new(config).unwrap().solve(&mut grid);

        for cell in grid.cells() {
            for label in grid.labels(cell.id).iter() {
                let history = label.history();
                prop_assert_eq!(history.front().copied(), Some(grid.start()));
                prop_assert_eq!(history.back().copied(), Some(cell.id));
                prop_assert_eq!(label.cell(), cell.id);

                let mut total = budget;
                let mut prev = grid.cell(grid.start());
                for &id in history.iter().skip(1) {
                    let next = grid.cell(id);
                    prop_assert!(adjacent(prev, next), "{} -> {}", prev, next);
                    total = total.apply(next.effect());
                    prev = next;
                }
                prop_assert_eq!(total, label.resources());
            }
        }
    }

    #[test]
    fn prop_front_is_independent_of_pop_order(
        grid in arb_grid(5),
        config in arb_budget(),
        seed in any::<u64>(),
    ) {
        let solve_with = |order: FrontierOrder| {
            let mut grid = grid.clone();
            Solver::new(config.clone().with_order(order)).unwrap().solve(&mut grid);
            fronts(&grid)
        };

        let baseline = solve_with(FrontierOrder::Fifo);
        prop_assert_eq!(&baseline, &solve_with(FrontierOrder::Lifo));
        prop_assert_eq!(&baseline, &solve_with(FrontierOrder::Shuffled { seed }));
    }

    #[test]
    fn prop_start_keeps_seed_label(grid in arb_grid(5), config in arb_budget()) {
        let mut grid = grid;
        let budget = config.budget();
        Solver::new(config).unwrap().solve(&mut grid);

        let start = grid.labels(grid.start());
        prop_assert_eq!(start.front(), vec![budget]);
        prop_assert_eq!(start.iter().next().map(Label::len), Some(1));
    }

    #[test]
    fn prop_lower_budget_never_widens_reach(grid in arb_grid(4), health in 1..200i32) {
        let reached = |config: SolverConfig| {
            let mut grid = grid.clone();
            Solver::new(config).unwrap().solve(&mut grid);
            grid.cells().map(|c| !grid.labels(c.id).is_empty()).collect::<Vec<_>>()
        };

        let low = reached(SolverConfig::new().with_starting_health(health));
        let high = reached(SolverConfig::new().with_starting_health(health + 50));
        for (l, h) in low.iter().zip(&high) {
            prop_assert!(!l || *h);
        }
    }
}
