use nalgebra::{Point3, Vector3};

pub fn distance(p1: &Point3<f64>, p2: &Point3<f64>) -> f64 {
    nalgebra::distance(p1, p2)
}

/// Bend angle `p1-p2-p3` at vertex `p2`, in degrees within `[0, 180]`.
///
/// Degenerate inputs (a zero-length arm) yield `0.0`.
pub fn bend_angle(p1: &Point3<f64>, p2: &Point3<f64>, p3: &Point3<f64>) -> f64 {
    let v1 = p1 - p2;
    let v2 = p3 - p2;
    let norms = v1.norm() * v2.norm();
    if norms == 0.0 {
        return 0.0;
    }
    (v1.dot(&v2) / norms).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Torsion angle `p1-p2-p3-p4` about the `p2-p3` axis, in degrees within `(-180, 180]`.
///
/// Uses the IUPAC sign convention: looking down `p2 -> p3`, a clockwise rotation of
/// `p1` onto `p4` is positive.
pub fn dihedral_angle(
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
    p4: &Point3<f64>,
) -> f64 {
    let b1: Vector3<f64> = p2 - p1;
    let b2: Vector3<f64> = p3 - p2;
    let b3: Vector3<f64> = p4 - p3;

    let n1 = b1.cross(&b2);
    let n2 = b2.cross(&b3);

    let y = b2.norm() * b1.dot(&n2);
    let x = n1.dot(&n2);
    y.atan2(x).to_degrees()
}

/// Arithmetic mean of a set of points, `None` for an empty set.
pub fn centroid<'a, I>(points: I) -> Option<Point3<f64>>
where
    I: IntoIterator<Item = &'a Point3<f64>>,
{
    let (sum, count) = points
        .into_iter()
        .fold((Vector3::zeros(), 0usize), |(sum, n), p| (sum + p.coords, n + 1));
    if count == 0 {
        None
    } else {
        Some(Point3::from(sum / count as f64))
    }
}

/// Smallest distance between any point of `a` and any point of `b`.
pub fn min_pairwise_distance(a: &[Point3<f64>], b: &[Point3<f64>]) -> Option<f64> {
    a.iter()
        .flat_map(|p| b.iter().map(move |q| (p - q).norm_squared()))
        .min_by(|x, y| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal))
        .map(f64::sqrt)
}
