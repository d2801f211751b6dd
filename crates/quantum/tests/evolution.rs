use hilbert::{
    many_body::{many_body_operator, many_body_vector},
    matrix::from_row_major,
    spin::{sp, sz},
};
use quantum::{
    diag::{diagonalize, EigenSolver},
    evolution::{evolve, grammian, Propagator},
    hamiltonian::hamiltonian,
    observables::Observable,
    system::{BathSite, DipoleMoments, System},
    units::Units,
    C64,
};
use std::f64::consts::PI;

#[test]
fn phase_follows_negative_energy() {
    // H = diag(E, -E), ψ(0) = |+⟩
    let e = 0.7;
    let h = from_row_major(2, 2, &[e, 0.0, 0.0, -e]);
    let eigen = diagonalize(h.as_ref(), EigenSolver::Symmetric).unwrap();
    let psi0 = vec![1.0 / 2.0_f64.sqrt(); 2];
    let g = grammian(&psi0, eigen.vectors.as_ref()).unwrap();

    let t = 0.3;
    let psi = evolve(&psi0, t, &eigen.values, eigen.vectors.as_ref(), &g).unwrap();
    // ⟨0|ψ(t)⟩ = exp(-i E t) / √2
    let want = C64::from_polar(1.0 / 2.0_f64.sqrt(), -e * t);
    assert!((psi[0] - want).norm() < 1e-12, "ψ[0] = {}", psi[0]);

    // ⟨σx⟩ = cos(2 E t)
    let sx = Observable::new("X", from_row_major(2, 2, &[0.0, 1.0, 1.0, 0.0]));
    for k in 0..20 {
        let t = 0.1 * k as f64;
        let psi = evolve(&psi0, t, &eigen.values, eigen.vectors.as_ref(), &g).unwrap();
        let x = sx.expectation_value(&psi).unwrap();
        assert!((x - (2.0 * e * t).cos()).abs() < 1e-12, "⟨X⟩({}) = {}", t, x);
    }

    // ⟨σy⟩ = sin(2 E t) picks out the sign of the phase
    let sy_real = from_row_major(2, 2, &[0.0, 1.0, -1.0, 0.0]);
    let psi = evolve(&psi0, t, &eigen.values, eigen.vectors.as_ref(), &g).unwrap();
    let y: C64 = (0..2)
        .map(|a| psi[a].conj() * (0..2).map(|b| psi[b] * sy_real.read(a, b)).sum::<C64>())
        .sum::<C64>() * C64::new(0.0, -1.0);
    assert!((y.re - (2.0 * e * t).sin()).abs() < 1e-12, "⟨Y⟩ = {}", y.re);
}

#[test]
fn evolution_at_zero_reproduces_initial_state() {
    let s = System::new(
        vec![BathSite::new(0.0, 1.0), BathSite::new(0.3, 1.5)],
        0.5,
        DipoleMoments { bath: 1.1e-10, atom: 1.0 },
        Units::Si,
    );
    let h = hamiltonian(&s, 1.0, 3.0).unwrap();
    let eigen = diagonalize(h.as_ref(), EigenSolver::Symmetric).unwrap();
    let psi0 = many_body_vector("dpu", 2).unwrap();
    let prop = Propagator::new(&eigen, psi0.clone()).unwrap();
    for (k, a) in prop.state_at(0.0).unwrap().iter().enumerate() {
        assert!((a.re - psi0[k]).abs() < 1e-10 && a.im.abs() < 1e-10, "ψ[{}] = {}", k, a);
    }
}

#[test]
fn norm_is_conserved() {
    let s = System::new(
        vec![BathSite::new(0.0, 1.0), BathSite::new(0.2, 1.2)],
        0.5,
        DipoleMoments { bath: 1.1e-10, atom: 1.0 },
        Units::Si,
    );
    let h = hamiltonian(&s, 1.0, 3.0).unwrap();
    let eigen = diagonalize(h.as_ref(), EigenSolver::Symmetric).unwrap();
    let prop = Propagator::new(&eigen, many_body_vector("udu", 2).unwrap()).unwrap();
    for k in 0..10 {
        let psi = prop.state_at(0.5 * k as f64).unwrap();
        let norm: f64 = psi.iter().map(|a| a.norm_sqr()).sum();
        assert!((norm - 1.0).abs() < 1e-10, "|ψ|² = {}", norm);
    }
}

#[test]
fn flip_flop_swaps_excitation() {
    // equal fields: |ud⟩ ↔ |du⟩ with period π / J
    let s = System::new(
        vec![BathSite::new(0.0, 1.0)],
        0.5,
        DipoleMoments { bath: 1.1e-10, atom: 1.0 },
        Units::Si,
    );
    let j = s.interaction_at(1).unwrap();
    let h = hamiltonian(&s, 0.0, 0.0).unwrap();
    let eigen = diagonalize(h.as_ref(), EigenSolver::Symmetric).unwrap();
    let prop = Propagator::new(&eigen, many_body_vector("ud", 2).unwrap()).unwrap();
    let z0 = Observable::new("Sz_0", many_body_operator(&sz(0.5).unwrap(), 0, 2));
    let half_period = PI / (2.0 * j);
    let start = z0.expectation_value(&prop.state_at(0.0).unwrap()).unwrap();
    let swapped = z0.expectation_value(&prop.state_at(half_period).unwrap()).unwrap();
    assert!((start - 0.5).abs() < 1e-10, "⟨Sz_0⟩(0) = {}", start);
    assert!((swapped + 0.5).abs() < 1e-10, "⟨Sz_0⟩(T/2) = {}", swapped);

    // S+ observables are not symmetric but still give a real part
    let p0 = Observable::new("Sp_0", many_body_operator(&sp(0.5).unwrap(), 0, 2));
    assert!(p0.expectation_value(&prop.state_at(0.3).unwrap()).unwrap().abs() < 1e-10);
}
