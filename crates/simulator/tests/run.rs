use hilbert::{many_body::many_body_vector, spin::SpinOperator};
use quantum::{
    diag::{diagonalize, EigenSolver},
    evolution::Propagator,
    hamiltonian::hamiltonian,
    observables::Observable,
};
use simulator::{
    config::{Config, SimulationKind},
    couplings::decay_time_of,
    error::SimError,
    output::RunResult,
    run,
    run_and_write,
};
use std::path::Path;

fn config(yaml: &str, out: &Path) -> Config {
    let mut config = Config::from_yaml(yaml).unwrap();
    config.files.outputs_dir = out.to_path_buf();
    config
}

const EVOLUTION: &str = "
simulation: spin-evolution
physics:
  bath_dipole_moment: 1.1e-10
  atom_dipole_moment: 1.0
  spin: 0.5
  constant_distance: 1.0
  geometry: ring
  tilt_angle: 0.5
  central_magnetic_field: 0.0
  bath_magnetic_field: 0.0
  time_range: 8
  dt: 0.25
  initial_ket: ud
  observables:
    - { operator: Sz, slot: 0 }
    - { operator: Sz, slot: 1 }
    - { operator: Sp, slot: 9 }
";

#[test]
fn spin_evolution_writes_series_and_cache() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(EVOLUTION, dir.path());
    let result = run(&config).unwrap();

    assert_eq!(result.metadata.simulation_id, "spin-evolution");
    // out-of-range observable skipped
    assert_eq!(result.series.len(), 2);
    for s in &result.series {
        assert_eq!(s.points.len(), 8);
    }
    let first = result.series[0].points[0];
    assert_eq!(first.x, 0.0);
    assert!((first.y - 0.5).abs() < 1e-10, "⟨Sz_0⟩(0) = {}", first.y);
    // total Sz is conserved
    for (a, b) in result.series[0].points.iter().zip(&result.series[1].points) {
        assert!((a.y + b.y).abs() < 1e-10, "Sz_0 + Sz_1 = {}", a.y + b.y);
    }

    let diag = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .any(|e| e.file_name().to_string_lossy().starts_with("diag-"));
    assert!(diag, "eigen-solution cache was not written");

    let yaml = result.write(dir.path()).unwrap();
    let back = RunResult::read(&yaml).unwrap();
    assert_eq!(back.series, result.series);
    let csv = dir.path().join(format!("{}-0-Sz_0.csv", result.filename));
    let text = std::fs::read_to_string(csv).unwrap();
    assert!(text.starts_with("x,y\n"), "csv = {}", text);
    assert_eq!(text.lines().count(), 9);
}

#[test]
fn cached_eigen_solution_reproduces_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let first = run(&config(EVOLUTION, dir.path())).unwrap();
    let cache = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.path())
        .find(|p| p.file_name().is_some_and(|n| n.to_string_lossy().starts_with("diag-")))
        .unwrap();

    let mut again = config(EVOLUTION, dir.path());
    again.files.diagonalization_path = Some(cache);
    let second = run(&again).unwrap();
    for (a, b) in first.series[0].points.iter().zip(&second.series[0].points) {
        assert!((a.y - b.y).abs() < 1e-12);
    }
}

#[test]
fn superposition_ket_matches_full_space_evolution() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = EVOLUTION.replace("initial_ket: ud", "initial_ket: dp");
    let result = run(&config(&yaml, dir.path())).unwrap();
    let series = &result.series[0];
    assert_eq!(series.name, "Sz_0");
    assert!((series.points[0].y + 0.5).abs() < 1e-10, "⟨Sz_0⟩(0) = {}", series.points[0].y);

    let system = result.system.unwrap();
    let h = hamiltonian(&system, 0.0, 0.0).unwrap();
    let eigen = diagonalize(h.as_ref(), EigenSolver::Symmetric).unwrap();
    let prop = Propagator::new(&eigen, many_body_vector("dp", 2).unwrap()).unwrap();
    let sz0 = Observable::from_operator(SpinOperator::Sz, 0.5, 0, 2, None).unwrap();
    for (k, point) in series.points.iter().enumerate() {
        let want = sz0.expectation_value(&prop.state_at(0.25 * k as f64).unwrap()).unwrap();
        assert!((point.y - want).abs() < 1e-10, "t = {}: {} != {}", k, point.y, want);
    }
}

#[test]
fn selected_coefficients_drive_the_evolution() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = "
simulation: spin-evolution-selected-coeffs
physics:
  spin: 0.5
  interaction_coefficients: [0.0, 1.0, 0.5]
  time_range: 4
  dt: 0.5
  initial_ket: udu
  observables:
    - { operator: Sz, slot: 0 }
";
    let result = run(&config(yaml, dir.path())).unwrap();
    let system = result.system.unwrap();
    assert_eq!(system.bath.len(), 2);
    assert_eq!(system.bath[1].interaction_strength, 0.5);
    assert_eq!(result.series[0].points.len(), 4);
}

#[test]
fn spectrum_lists_every_level_per_field() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = "
simulation: spectrum
physics:
  bath_dipole_moment: 1.1e-10
  atom_dipole_moment: 1.0
  bath_count: 2
  spin: 0.5
  magnetic_field_range: 3
";
    let result = run(&config(yaml, dir.path())).unwrap();
    let points = &result.series[0].points;
    assert_eq!(points.len(), 3 * 8);
    assert!(points[..8].iter().all(|p| p.x == 0.0));
    assert!(points[16..].iter().all(|p| p.x == 2e3));
}

#[test]
fn interactions_are_sorted_descending() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = "
simulation: interactions
physics:
  bath_dipole_moment: 1.1e-10
  atom_dipole_moment: 1.0
  bath_count: 8
  constant_distance: 1.0
  spin: 0.5
  geometry: cube
  tilt_angle: 0.1
";
    let result = run(&config(yaml, dir.path())).unwrap();
    let ys: Vec<f64> = result.series[0].points.iter().map(|p| p.y).collect();
    assert_eq!(ys.len(), 8);
    assert!(ys.windows(2).all(|w| w[0] >= w[1]), "{:?}", ys);
}

#[test]
fn decay_time_follows_spread() {
    let dir = tempfile::tempdir().unwrap();
    let base = "
physics:
  bath_dipole_moment: 1.1e-10
  atom_dipole_moment: 1.0
  bath_count: 6
  spin: 0.5
  tilt_angle_range: [0.0, 0.5]
  constant_distance: 1.0
  geometry: ring
  dt: 0.125
";
    let yaml = format!("simulation: spread-of-couplings\n{base}");
    let spread = run(&config(&yaml, dir.path())).unwrap();
    let decay = run(&config(&format!("simulation: decay-time\n{base}"), dir.path())).unwrap();
    let s = &spread.series[0].points;
    let d = &decay.series[0].points;
    assert_eq!(s.len(), 4);
    assert_eq!(d.len(), 4);
    // tilt axis and step are both in units of π
    let tilts: Vec<f64> = s.iter().map(|p| p.x).collect();
    assert_eq!(tilts, vec![0.0, 0.125, 0.25, 0.375]);
    // untilted ring: every site equatorial, no spread
    assert_eq!(s[0].y, 0.0);
    for (a, b) in s.iter().zip(d) {
        assert_eq!(a.x, b.x);
        assert!((b.y - decay_time_of(a.y / 1e-3)).abs() <= 1e-6 * b.y, "{} vs {}", b.y, a.y);
    }
}

#[test]
fn find_geometry_inverts_couplings() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = "
simulation: find-geometry-given-interactions
physics:
  bath_dipole_moment: 1.1e-10
  atom_dipole_moment: 1.0
  spin: 0.5
  interaction_coefficients: [0.0, 0.98865, 0.12358]
";
    let result = run(&config(yaml, dir.path())).unwrap();
    let d: Vec<f64> = result.series[0].points.iter().map(|p| p.y).collect();
    assert!((d[0] - 1.0).abs() < 1e-4, "r_1 = {}", d[0]);
    assert!((d[1] - 2.0).abs() < 1e-3, "r_2 = {}", d[1]);
    assert_eq!(result.metadata.simulation_id, SimulationKind::FindGeometryGivenInteractions.id());
}

#[test]
fn bad_geometry_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = "
simulation: interactions
physics:
  bath_dipole_moment: 1.0
  atom_dipole_moment: 1.0
  bath_count: 2
  constant_distance: 1.0
  spin: 0.5
  geometry: torus
";
    assert!(matches!(run(&config(yaml, dir.path())), Err(SimError::Quantum(_))));
}

#[test]
fn run_and_write_returns_the_yaml_path() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested");
    let path = run_and_write(&config(EVOLUTION, &out)).unwrap();
    assert!(path.starts_with(&out));
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("yaml"));
}
