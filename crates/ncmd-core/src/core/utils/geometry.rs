use itertools::Itertools;
use nalgebra::{DMatrix, Point3, Quaternion, Rotation3, Unit, UnitQuaternion, Vector3};
use rand::Rng;
use std::f64::consts::TAU;

/// The closest pair of atoms between two point sets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPair {
    /// Index into the first set.
    pub first: usize,
    /// Index into the second set.
    pub second: usize,
    /// Vector pointing from `first` to `second`.
    pub separation: Vector3<f64>,
}

impl NearestPair {
    pub fn distance(&self) -> f64 {
        self.separation.norm()
    }
}

/// Builds the full symmetric distance matrix of a point set.
///
/// The diagonal is zero and both triangles are filled, so the matrix holds `n * n`
/// entries including the trivial self-distances.
pub fn distance_matrix(positions: &[Point3<f64>]) -> DMatrix<f64> {
    let n = positions.len();
    let mut matrix = DMatrix::zeros(n, n);
    for (i, j) in (0..n).tuple_combinations() {
        let d = nalgebra::distance(&positions[i], &positions[j]);
        matrix[(i, j)] = d;
        matrix[(j, i)] = d;
    }
    matrix
}

/// Finds the closest pair of points between two sets.
///
/// Returns `None` if either set is empty.
pub fn nearest_pair(first: &[Point3<f64>], second: &[Point3<f64>]) -> Option<NearestPair> {
    first
        .iter()
        .enumerate()
        .cartesian_product(second.iter().enumerate())
        .map(|((i, p1), (j, p2))| NearestPair {
            first: i,
            second: j,
            separation: p2 - p1,
        })
        .min_by(|a, b| {
            a.separation
                .norm_squared()
                .partial_cmp(&b.separation.norm_squared())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Draws a direction uniformly distributed on the unit sphere.
pub fn random_unit_vector(rng: &mut impl Rng) -> Unit<Vector3<f64>> {
    let z: f64 = rng.gen_range(-1.0..=1.0);
    let phi: f64 = rng.gen_range(0.0..TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Unit::new_unchecked(Vector3::new(r * phi.cos(), r * phi.sin(), z))
}

/// Draws a rotation uniformly distributed over SO(3).
///
/// Uses the subgroup algorithm on unit quaternions, which avoids the clustering
/// near the poles that naive Euler-angle sampling produces.
pub fn random_rotation(rng: &mut impl Rng) -> Rotation3<f64> {
    let u1: f64 = rng.r#gen();
    let u2: f64 = rng.gen_range(0.0..TAU);
    let u3: f64 = rng.gen_range(0.0..TAU);
    let a = (1.0 - u1).sqrt();
    let b = u1.sqrt();
    let q = Quaternion::new(a * u2.sin(), a * u2.cos(), b * u3.sin(), b * u3.cos());
    UnitQuaternion::from_quaternion(q).to_rotation_matrix()
}
