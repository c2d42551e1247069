use strum_macros::EnumIter;

/// Norm used to collapse a pointwise error sequence into one scalar.
/// Linf is the default choice of the convergence analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Norms {
    Linf,
    L1,
    L2,
}

impl Norms {
    /// Parses the norm key used in parameter files.
    pub fn from_key(key: &str) -> Result<Norms, String> {
        match key {
            "Linf" => Ok(Norms::Linf),
            "L1" => Ok(Norms::L1),
            "L2" => Ok(Norms::L2),
            _ => Err(format!("unknown norm '{}', expected Linf, L1 or L2", key)),
        }
    }

    /// Calculates the norm of the vector received as input using the norm
    /// chosen for the analysis.
    pub fn norm(&self, x: &[f64]) -> f64 {
        match self {
            Norms::Linf => norm_Linf(x),
            Norms::L1 => norm_L1(x),
            Norms::L2 => norm_L2(x),
        }
    }
}

/// Computes the Linf norm of a given vector: max |x_i|
pub fn norm_Linf(x: &[f64]) -> f64 {
    assert!(!x.is_empty(), "norm of an empty vector is undefined");
    x.iter().fold(0.0f64, |result, xi| result.max(xi.abs()))
}

/// Computes the L1 norm of a given vector: sum |x_i|
pub fn norm_L1(x: &[f64]) -> f64 {
    assert!(!x.is_empty(), "norm of an empty vector is undefined");
    x.iter().map(|xi| xi.abs()).sum()
}

/// Computes the L2 norm of a given vector: sqrt(sum x_i^2)
pub fn norm_L2(x: &[f64]) -> f64 {
    assert!(!x.is_empty(), "norm of an empty vector is undefined");
    x.iter().map(|xi| xi * xi).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::Rng;
    use strum::IntoEnumIterator;

    #[test]
    fn test_norms_known_values() {
        let v = vec![0.0, -0.2, -0.3, -0.4];
        assert_relative_eq!(norm_Linf(&v), 0.4, epsilon = 1e-12);
        assert_relative_eq!(norm_L1(&v), 0.9, epsilon = 1e-12);
        assert_relative_eq!(
            norm_L2(&v),
            (0.04f64 + 0.09 + 0.16).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_norms_do_not_mutate_input() {
        let v = vec![1.0, -2.0, 3.0];
        let copy = v.clone();
        let _ = norm_Linf(&v);
        let _ = norm_L1(&v);
        let _ = norm_L2(&v);
        assert_eq!(v, copy);
    }

    #[test]
    fn test_norm_inequalities_on_random_vectors() {
        // standard norm inequalities: ||x||inf <= ||x||1 and ||x||inf <= ||x||2
        let mut rng = rand::rng();
        for _ in 0..100 {
            let len = rng.random_range(1..50);
            let v: Vec<f64> = (0..len).map(|_| rng.random_range(-10.0..10.0)).collect();
            let linf = norm_Linf(&v);
            assert!(linf <= norm_L1(&v) + 1e-12);
            assert!(linf <= norm_L2(&v) + 1e-12);
        }
    }

    #[test]
    fn test_norm_dispatch() {
        let v = vec![-3.0, 4.0];
        assert_relative_eq!(Norms::Linf.norm(&v), 4.0, epsilon = 1e-12);
        assert_relative_eq!(Norms::L1.norm(&v), 7.0, epsilon = 1e-12);
        assert_relative_eq!(Norms::L2.norm(&v), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_norms_non_negative() {
        let v = vec![-1.0, -2.0, -3.0];
        for norm in Norms::iter() {
            assert!(norm.norm(&v) >= 0.0);
        }
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Norms::from_key("Linf").unwrap(), Norms::Linf);
        assert_eq!(Norms::from_key("L1").unwrap(), Norms::L1);
        assert_eq!(Norms::from_key("L2").unwrap(), Norms::L2);
        assert!(Norms::from_key("L3").is_err());
    }

    #[test]
    #[should_panic(expected = "empty")]
    fn test_empty_input_fails() {
        let empty: Vec<f64> = Vec::new();
        let _ = norm_Linf(&empty);
    }
}
