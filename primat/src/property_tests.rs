//! Property-based tests for the matrix engine
//!
//! These tests use proptest to verify the structural laws of the transforms,
//! the skip-consistency of traversals, and that parallel execution produces
//! exactly what serial execution does.

use std::{fmt::Debug, ops::Range, sync::Arc};

use proptest::prelude::*;

use crate::{Matrix, ParallelConfig, ParallelExecutor, PositionalIterator};

// ============================================================================
// Test Utilities
// ============================================================================

/// Strategy for int matrices up to 12x12, empty shapes included
fn matrix_strategy() -> impl Strategy<Value = Matrix<i32>> {
    (0usize..12, 0usize..12).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec(any::<i32>(), cols), rows).prop_map(move |data| {
            if data.is_empty() {
                Matrix::zeros(0, cols).unwrap()
            } else {
                Matrix::from_rows(data).unwrap()
            }
        })
    })
}

/// Strategy for square int matrices up to 8x8
fn square_strategy() -> impl Strategy<Value = Matrix<i32>> {
    (0usize..8).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec(any::<i32>(), n), n).prop_map(|data| {
            if data.is_empty() {
                Matrix::empty()
            } else {
                Matrix::from_rows(data).unwrap()
            }
        })
    })
}

/// A traversal script: `None` pulls one element, `Some(n)` skips `n`
fn steps_strategy() -> impl Strategy<Value = Vec<Option<usize>>> {
    prop::collection::vec(prop::option::of(0usize..40), 0..12)
}

/// `lo..hi` within `0..len`, chosen by two arbitrary seeds
fn sub_range(len: usize, a: usize, b: usize) -> Range<usize> {
    let lo = a % (len + 1);
    lo..lo + b % (len + 1 - lo)
}

/// Run `steps` on a copy that skips through the cursor and a copy that
/// pulls one element at a time, comparing them after every step
fn skip_agrees<I>(it: I, steps: &[Option<usize>]) -> Result<(), TestCaseError>
where
    I: PositionalIterator + ExactSizeIterator + Clone,
    I::Item: PartialEq + Debug,
{
    let mut skipped = it.clone();
    let mut pulled = it;
    for step in steps {
        match *step {
            Some(n) => {
                skipped.advance(n);
                for _ in 0..n {
                    pulled.next();
                }
            }
            None => prop_assert_eq!(skipped.next(), pulled.next()),
        }
        prop_assert_eq!(skipped.remaining(), pulled.remaining());
        prop_assert_eq!(skipped.len(), pulled.len());
    }
    prop_assert_eq!(skipped.next(), pulled.next());
    Ok(())
}

fn always_parallel() -> Arc<ParallelExecutor> {
    Arc::new(
        ParallelExecutor::new(ParallelConfig::default().with_threshold(0).with_workers(4)).unwrap(),
    )
}

fn serial() -> Arc<ParallelExecutor> {
    Arc::new(ParallelExecutor::serial())
}

// ============================================================================
// Transform Laws
// ============================================================================

proptest! {
    #[test]
    fn prop_transpose_is_involution(m in matrix_strategy()) {
        prop_assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn prop_four_quarter_turns_are_identity(m in matrix_strategy()) {
        let turned = m.rotate90().rotate90().rotate90().rotate90();
        prop_assert_eq!(turned, m.clone());
        prop_assert_eq!(m.rotate90().rotate90(), m.rotate180());
        prop_assert_eq!(m.rotate90().rotate180(), m.rotate270());
    }

    #[test]
    fn prop_reshape_of_flatten_restores(m in matrix_strategy()) {
        let flat = Matrix::row_vector(m.flatten());
        let back = flat.reshape(m.rows(), m.cols()).unwrap();
        prop_assert_eq!(back, m);
    }

    #[test]
    fn prop_extend_then_copy_restores(
        m in matrix_strategy(),
        extra_rows in 0usize..4,
        extra_cols in 0usize..4,
        fill in any::<i32>(),
    ) {
        let grown = m.extend_with(m.rows() + extra_rows, m.cols() + extra_cols, fill).unwrap();
        let back = grown.copy_range(0..m.rows(), 0..m.cols()).unwrap();
        prop_assert_eq!(back, m);
    }

    #[test]
    fn prop_pad_then_copy_restores(
        m in matrix_strategy(),
        (up, down, left, right) in (0usize..3, 0usize..3, 0usize..3, 0usize..3),
    ) {
        let padded = m.pad_with(up, down, left, right, -1).unwrap();
        prop_assert_eq!(padded.rows(), up + m.rows() + down);
        let back = padded.copy_range(up..up + m.rows(), left..left + m.cols()).unwrap();
        prop_assert_eq!(back, m);
    }

    #[test]
    fn prop_tiling_shapes(m in matrix_strategy(), r in 1usize..4, c in 1usize..4) {
        let elem = m.repelem(r, c).unwrap();
        let mat = m.repmat(r, c).unwrap();
        prop_assert_eq!(elem.shape(), mat.shape());
        prop_assert_eq!(elem.count(), m.count() * (r * c) as u64);
        for i in 0..elem.rows() {
            for j in 0..elem.cols() {
                prop_assert_eq!(elem[(i, j)], m[(i / r, j / c)]);
                prop_assert_eq!(mat[(i, j)], m[(i % m.rows(), j % m.cols())]);
            }
        }
    }
}

// ============================================================================
// Traversal Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_stream_h_is_flatten(m in matrix_strategy()) {
        let streamed = m.stream_h().to_vec();
        prop_assert_eq!(streamed.len() as u64, m.count());
        prop_assert_eq!(streamed, m.flatten());
    }

    #[test]
    fn prop_stream_v_is_transposed_flatten(m in matrix_strategy()) {
        prop_assert_eq!(m.stream_v().to_vec(), m.transpose().flatten());
    }

    #[test]
    fn prop_advance_matches_repeated_next(m in matrix_strategy(), steps in steps_strategy()) {
        skip_agrees(m.stream_h(), &steps)?;
        skip_agrees(m.stream_v(), &steps)?;
        skip_agrees(m.points_h(), &steps)?;
        skip_agrees(m.points_v(), &steps)?;
    }

    #[test]
    fn prop_advance_on_sub_ranges(
        m in matrix_strategy(),
        (a, b, c, d) in (0usize..16, 0usize..16, 0usize..16, 0usize..16),
        steps in steps_strategy(),
    ) {
        let rows = sub_range(m.rows(), a, b);
        let cols = sub_range(m.cols(), c, d);
        skip_agrees(m.stream_h_rows(rows.clone()).unwrap(), &steps)?;
        skip_agrees(m.stream_v_columns(cols.clone()).unwrap(), &steps)?;
        skip_agrees(m.points_h_rows(rows).unwrap(), &steps)?;
        skip_agrees(m.points_v_columns(cols).unwrap(), &steps)?;
    }

    #[test]
    fn prop_advance_on_diagonals(m in square_strategy(), steps in steps_strategy()) {
        skip_agrees(m.stream_lu2rd().unwrap(), &steps)?;
        skip_agrees(m.stream_ru2ld().unwrap(), &steps)?;
        skip_agrees(m.points_lu2rd().unwrap(), &steps)?;
        skip_agrees(m.points_ru2ld().unwrap(), &steps)?;
    }

    #[test]
    fn prop_count_is_remaining(m in matrix_strategy(), n in 0usize..200) {
        let mut it = m.points_v();
        let expected = (m.count() as usize).saturating_sub(n);
        it.advance(n);
        prop_assert_eq!(it.count(), expected);
    }
}

// ============================================================================
// Serial/Parallel Equivalence
// ============================================================================

proptest! {
    #[test]
    fn prop_parallel_map_matches_serial(m in matrix_strategy()) {
        let s = m.clone().with_executor(serial());
        let p = m.with_executor(always_parallel());
        prop_assert_eq!(
            s.map(|v| v.wrapping_mul(31) ^ 7),
            p.map(|v| v.wrapping_mul(31) ^ 7)
        );
        prop_assert_eq!(s.transpose(), p.transpose());
        prop_assert_eq!(s.reshape(3, 5).unwrap(), p.reshape(3, 5).unwrap());
    }

    #[test]
    fn prop_parallel_update_matches_serial(m in matrix_strategy()) {
        let mut s = m.clone().with_executor(serial());
        let mut p = m.with_executor(always_parallel());
        s.update_all_indexed(|i, j, v| v.wrapping_add((i * 100 + j) as i32));
        p.update_all_indexed(|i, j, v| v.wrapping_add((i * 100 + j) as i32));
        prop_assert_eq!(&s, &p);

        s.replace_if(|v| v % 3 == 0, 0);
        p.replace_if(|v| v % 3 == 0, 0);
        prop_assert_eq!(s, p);
    }

    #[test]
    fn prop_parallel_multiply_matches_serial(
        a in matrix_strategy(),
        cols in 0usize..8,
    ) {
        let b = Matrix::from_fn(a.cols(), cols, |i, j| (i as i32) - (j as i32) * 3).unwrap();
        let s = a.clone().with_executor(serial()).multiply(&b).unwrap();
        let p = a.with_executor(always_parallel()).multiply(&b).unwrap();
        prop_assert_eq!(s, p);
    }
}
