use rmt_figures::economy::Economy;
use rmt_figures::fixed_point::FixedPointSolver;
use rmt_figures::output::write_figure;
use rmt_figures::{Figure, FigureConfig, FigureError};
use tempfile::TempDir;

fn quick_config() -> FigureConfig {
    FigureConfig::from_toml_str(
        r#"
[consumption_paths]
npaths = 12
periods = 40
seed = 11

[participation]
nw = 25
"#,
    )
    .unwrap()
}

#[test]
fn test_render_all_figures_to_chapter_dirs() {
    let dir = TempDir::new().unwrap();
    let config = quick_config();

    for figure in Figure::all() {
        let rendered = figure.render(&config).unwrap();
        let written = write_figure(dir.path(), &rendered, true).unwrap();

        let expected = dir
            .path()
            .join(figure.id().relative_path())
            .with_extension("html");
        assert_eq!(written.html, expected);
        assert!(std::fs::metadata(&written.html).unwrap().len() > 0);

        let csv_path = written.data.unwrap();
        let rows = csv::Reader::from_path(&csv_path).unwrap().records().count();
        assert_eq!(rows, rendered.data.points());
    }

    assert!(dir.path().join("Chapter20/Fig_20_2_1a.html").exists());
    assert!(dir.path().join("Chapter20/Fig_20_3_1.html").exists());
}

#[test]
fn test_consumption_paths_row_count() {
    let rendered = Figure::ConsumptionPaths.render(&quick_config()).unwrap();
    // 12 paths x 40 periods plus the two-point benchmark line
    assert_eq!(rendered.data.points(), 12 * 40 + 2);
}

#[test]
fn test_rendering_is_deterministic() {
    let config = quick_config();
    for figure in Figure::all() {
        let a = figure.render(&config).unwrap();
        let b = figure.render(&config).unwrap();
        assert_eq!(a.data, b.data);
    }
}

#[test]
fn test_solver_cap_surfaces_from_render() {
    let mut config = quick_config();
    config.solver.max_iter = 2;

    let err = Figure::ConsumptionPaths.render(&config).err().unwrap();
    assert!(matches!(err, FigureError::NoConvergence { iterations: 2, .. }));

    // The frontier figure does not need the lender's value.
    assert!(Figure::ParticipationFrontier.render(&config).is_ok());
}

#[test]
fn test_textbook_contract_reference_points() {
    let economy = Economy::new(Default::default()).unwrap();
    let contract = economy.solve(&FixedPointSolver::default()).unwrap();

    // Consumption ratchets from ymin up to a level above the
    // complete-markets benchmark but below mean income.
    assert!((contract.consumption[0] - 6.0).abs() < 1e-9);
    assert!(contract.long_run_consumption() > economy.c_complete_markets);
    assert!(contract.long_run_consumption() < economy.expected_income());
}
