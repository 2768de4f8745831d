//! Token-level diff: Myers' O(ND) shortest-edit-script algorithm.
//!
//! Scoring only depends on equal/insert/delete counts inside the trimmed
//! diff range, so any algorithm producing a minimal edit script would do;
//! Myers is implemented directly here rather than pulled in as a
//! dependency, in keeping with this crate hand-rolling its own matching
//! algorithms.

use crate::license_detection::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    Equal,
    Insert,
    Delete,
}

/// One entry of an edit script between a reference token slice and an
/// unknown token slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffEntry {
    pub kind: DiffKind,
    /// Index into the reference slice, present for `Equal`/`Delete`.
    pub reference_index: Option<usize>,
    /// Index into the unknown slice, present for `Equal`/`Insert`.
    pub unknown_index: Option<usize>,
}

/// Diff two token slices by comparing normalised token values.
pub fn diff_tokens(reference: &[Token], unknown: &[Token]) -> Vec<DiffEntry> {
    let a: Vec<&str> = reference.iter().map(|t| t.value.as_str()).collect();
    let b: Vec<&str> = unknown.iter().map(|t| t.value.as_str()).collect();
    myers(&a, &b)
}

/// Myers' shortest-edit-script diff over two generic slices.
fn myers<T: PartialEq>(a: &[T], b: &[T]) -> Vec<DiffEntry> {
    let n = a.len() as isize;
    let m = b.len() as isize;
    let max = n + m;
    if max == 0 {
        return Vec::new();
    }

    let width = (2 * max + 1) as usize;
    let idx = |k: isize| -> usize { (k + max) as usize };

    let mut v = vec![0isize; width];
    let mut trace: Vec<Vec<isize>> = Vec::with_capacity((max as usize) + 1);
    let mut final_d = max;

    'outer: for d in 0..=max {
        trace.push(v.clone());
        let mut k = -d;
        while k <= d {
            let mut x = if k == -d || (k != d && v[idx(k - 1)] < v[idx(k + 1)]) {
                v[idx(k + 1)]
            } else {
                v[idx(k - 1)] + 1
            };
            let mut y = x - k;
            while x < n && y < m && a[x as usize] == b[y as usize] {
                x += 1;
                y += 1;
            }
            v[idx(k)] = x;
            if x >= n && y >= m {
                final_d = d;
                break 'outer;
            }
            k += 2;
        }
    }

    // Backtrack through the recorded traces to recover the edit script.
    let mut x = n;
    let mut y = m;
    let mut edits: Vec<DiffEntry> = Vec::new();

    for d in (0..=final_d).rev() {
        let v = &trace[d as usize];
        let k = x - y;
        let prev_k = if k == -d || (k != d && v[idx(k - 1)] < v[idx(k + 1)]) {
            k + 1
        } else {
            k - 1
        };
        let prev_x = v[idx(prev_k)];
        let prev_y = prev_x - prev_k;

        while x > prev_x && y > prev_y {
            x -= 1;
            y -= 1;
            edits.push(DiffEntry {
                kind: DiffKind::Equal,
                reference_index: Some(x as usize),
                unknown_index: Some(y as usize),
            });
        }

        if d > 0 {
            if x == prev_x {
                y -= 1;
                edits.push(DiffEntry {
                    kind: DiffKind::Insert,
                    reference_index: None,
                    unknown_index: Some(y as usize),
                });
            } else {
                x -= 1;
                edits.push(DiffEntry {
                    kind: DiffKind::Delete,
                    reference_index: Some(x as usize),
                    unknown_index: None,
                });
            }
        }
        x = prev_x;
        y = prev_y;
    }

    edits.reverse();
    edits
}
