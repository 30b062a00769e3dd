//! Loading grids and configuration from disk.

use gridfront_kernel::prelude::*;
use gridfront_test_utils::{end_front, CANONICAL, CANONICAL_FRONT};
use std::fs;

#[test]
fn test_grid_file_with_trailing_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.txt");
    fs::write(&path, format!("{CANONICAL}\n\n\n")).unwrap();

    let mut grid = Grid::from_file(&path).unwrap();
    solve(&mut grid);
    assert_eq!(end_front(&grid), CANONICAL_FRONT.to_vec());
}

#[test]
fn test_rendered_grid_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.txt");
    let original = Grid::parse(CANONICAL).unwrap();
    fs::write(&path, original.to_string()).unwrap();

    let loaded = Grid::from_file(&path).unwrap();
    assert_eq!(loaded.to_string(), original.to_string());
}

#[test]
fn test_missing_grid_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Grid::from_file(dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, GridError::Io { .. }));
    assert!(!Error::from(err).is_input_error());
}

#[test]
fn test_bad_grid_file_is_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.txt");
    fs::write(&path, "AEE\nEE\n").unwrap();

    let err = Grid::from_file(&path).unwrap_err();
    assert!(matches!(
        err,
        GridError::Ragged {
            row: 1,
            expected: 3,
            found: 2
        }
    ));
    assert!(Error::from(err).is_input_error());
}

#[test]
fn test_config_file_drives_solver() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("solver.toml");
    fs::write(
        &config_path,
        "starting_health = 50\n\n[order]\nkind = \"lifo\"\n",
    )
    .unwrap();

    let config = SolverConfig::from_file(&config_path).unwrap();
    assert_eq!(config.starting_health, 50);
    assert_eq!(config.max_moves, 450);
    assert_eq!(config.order, FrontierOrder::Lifo);

    let mut grid = Grid::parse("AEE\nELL\nELB").unwrap();
    Solver::new(config).unwrap().solve(&mut grid);
    assert!(end_front(&grid).is_empty());
}

#[test]
fn test_config_file_rejects_unknown_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("solver.toml");
    fs::write(&path, "health = 10\n").unwrap();

    let err = SolverConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_config_file_rejects_non_positive_budget() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("solver.toml");
    fs::write(&path, "max_moves = 0\n").unwrap();

    let err = SolverConfig::from_file(&path).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::NonPositive {
            field: "max_moves",
            value: 0
        }
    ));
}
