use std::ops::Index;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KnotVectorError {
    #[error("knot vector needs at least 2 knots, but {0} were provided")]
    TooFewKnots(usize),
    #[error("knot value at index {0} is not finite")]
    NotFinite(usize),
    #[error("knot vector must be non-decreasing, but knot[{0}] > knot[{1}]")]
    Decreasing(usize, usize),
}

/// 節點向量（knot vector）：非遞減的 f64 序列，建構後不再變動。
///
/// `new()` 不做任何檢查，評價核心假設呼叫端已備妥合法的節點序列；
/// 由 JSON 設定層建構時走 `validated()`，在進入核心之前就擋下壞資料。
#[derive(Clone)]
pub struct KnotVector {
    knots: Vec<f64>,
}

impl KnotVector {
    pub fn new(knots: Vec<f64>) -> KnotVector {
        KnotVector { knots }
    }

    pub fn validated(knots: Vec<f64>) -> Result<KnotVector, KnotVectorError> {
        if knots.len() < 2 {
            return Err(KnotVectorError::TooFewKnots(knots.len()));
        }
        for (i, &knot) in knots.iter().enumerate() {
            if !knot.is_finite() {
                return Err(KnotVectorError::NotFinite(i));
            }
        }
        for i in 1..knots.len() {
            if knots[i] < knots[i - 1] {
                return Err(KnotVectorError::Decreasing(i - 1, i));
            }
        }
        Ok(KnotVector { knots })
    }

    pub fn len(&self) -> usize {
        self.knots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.knots.iter().copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.knots
    }
}

impl Index<usize> for KnotVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.knots[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_accepts_non_decreasing_knots() {
        let knots = KnotVector::validated(vec![0.0, 0.0, 1.0, 2.5, 2.5, 4.0]).unwrap();
        assert_eq!(knots.len(), 6);
        assert_eq!(knots[3], 2.5);
    }

    #[test]
    fn validated_rejects_too_few_knots() {
        assert!(matches!(
            KnotVector::validated(vec![1.0]),
            Err(KnotVectorError::TooFewKnots(1))
        ));
    }

    #[test]
    fn validated_rejects_non_finite_knots() {
        assert!(matches!(
            KnotVector::validated(vec![0.0, f64::NAN, 2.0]),
            Err(KnotVectorError::NotFinite(1))
        ));
        assert!(matches!(
            KnotVector::validated(vec![0.0, 1.0, f64::INFINITY]),
            Err(KnotVectorError::NotFinite(2))
        ));
    }

    #[test]
    fn validated_rejects_decreasing_knots() {
        assert!(matches!(
            KnotVector::validated(vec![0.0, 2.0, 1.0, 3.0]),
            Err(KnotVectorError::Decreasing(1, 2))
        ));
    }

    #[test]
    #[should_panic]
    fn index_out_of_range_panics() {
        let knots = KnotVector::new(vec![0.0, 1.0]);
        let _ = knots[2];
    }
}
