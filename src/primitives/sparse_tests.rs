use super::*;

#[test]
fn test_from_pairs_sorts_and_merges() {
    let v = SparseVector::from_pairs(6, vec![(4, 1.0), (1, 2.0), (4, 0.5)]).unwrap();
    assert_eq!(v.indices(), &[1, 4]);
    assert_eq!(v.values(), &[2.0, 1.5]);
    assert_eq!(v.dim(), 6);
    assert_eq!(v.nnz(), 2);
}

#[test]
fn test_from_pairs_drops_zeros() {
    let v = SparseVector::from_pairs(3, vec![(0, 0.0), (2, 1.0)]).unwrap();
    assert_eq!(v.indices(), &[2]);
}

#[test]
fn test_from_pairs_out_of_range() {
    let err = SparseVector::from_pairs(3, vec![(3, 1.0)]).unwrap_err();
    assert!(matches!(err, SpamError::DimensionMismatch { .. }));
}

#[test]
fn test_zeros() {
    let v = SparseVector::zeros(4);
    assert_eq!(v.nnz(), 0);
    assert_eq!(v.norm(), 0.0);
    assert_eq!(v.dim(), 4);
}

#[test]
fn test_get_absent_and_out_of_range() {
    let v = SparseVector::from_pairs(3, vec![(1, 7.0)]).unwrap();
    assert_eq!(v.get(0), 0.0);
    assert_eq!(v.get(1), 7.0);
    assert_eq!(v.get(99), 0.0);
}

#[test]
fn test_l2_normalized() {
    let v = SparseVector::from_pairs(4, vec![(0, 3.0), (3, 4.0)]).unwrap();
    let n = v.l2_normalized();
    assert!((n.norm() - 1.0).abs() < 1e-12);
    assert!((n.get(0) - 0.6).abs() < 1e-12);
    assert!((n.get(3) - 0.8).abs() < 1e-12);
}

#[test]
fn test_l2_normalized_zero_stays_zero() {
    let v = SparseVector::zeros(2).l2_normalized();
    assert_eq!(v.nnz(), 0);
}

#[test]
fn test_from_dense_skips_zeros() {
    let v = SparseVector::from_dense(&[0.0, 1.5, 0.0, 2.0]);
    assert_eq!(v.dim(), 4);
    assert_eq!(v.indices(), &[1, 3]);
    assert_eq!(v.values(), &[1.5, 2.0]);
}
