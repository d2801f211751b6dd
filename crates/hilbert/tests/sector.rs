use hilbert::{matrix::{approx_eq, from_row_major}, sector::{basis_indices, restrict_to_subspace}};

#[test]
fn basis_indices_of_four_particles() {
    assert_eq!(basis_indices(4, 0).unwrap(), vec![0]);
    assert_eq!(basis_indices(4, 1).unwrap(), vec![1, 2, 4, 8]);
    assert_eq!(basis_indices(4, 2).unwrap(), vec![3, 5, 6, 9, 10, 12]);
}

#[test]
fn sector_sizes_are_binomial() {
    let sizes: Vec<usize> = (0..=6).map(|k| basis_indices(6, k).unwrap().len()).collect();
    assert_eq!(sizes, vec![1, 6, 15, 20, 15, 6, 1]);
}

#[test]
fn restrict_three_to_two() {
    let m = from_row_major(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    let got = restrict_to_subspace(m.as_ref(), &[0, 2]).unwrap();
    let want = from_row_major(2, 2, &[1.0, 3.0, 7.0, 9.0]);
    assert!(approx_eq(got.as_ref(), want.as_ref(), 0.0));
}

#[test]
fn restrict_five_to_three() {
    let data: Vec<f64> = (1..=25).map(|k| k as f64).collect();
    let m = from_row_major(5, 5, &data);
    let got = restrict_to_subspace(m.as_ref(), &[1, 2, 4]).unwrap();
    let want = from_row_major(3, 3, &[
        7.0, 8.0, 10.0,
        12.0, 13.0, 15.0,
        22.0, 23.0, 25.0,
    ]);
    assert!(approx_eq(got.as_ref(), want.as_ref(), 0.0));
}
