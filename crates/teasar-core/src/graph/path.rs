//! Path reconstruction from predecessor arrays

use crate::error::{Result, TeasarError};

/// Recover the path between `from` and `to` from a search rooted at `from`.
///
/// The returned path starts at `from` and ends at `to`. Fails when the
/// predecessor chain from `to` runs out before reaching `from`, or loops.
pub fn reconstruct_path(
    from: usize,
    to: usize,
    predecessors: &[Option<usize>],
) -> Result<Vec<usize>> {
    let mut path = vec![to];
    let mut current = to;
    while current != from {
        match predecessors[current] {
            Some(prev) if path.len() <= predecessors.len() => {
                path.push(prev);
                current = prev;
            }
            _ => {
                return Err(TeasarError::BrokenPredecessorChain {
                    from: to,
                    stopped: current,
                    expected: format!("vertex {}", from),
                })
            }
        }
    }
    path.reverse();
    Ok(path)
}

/// Walk the predecessor chain from `start` until a vertex satisfying
/// `is_stop` is found, and return that vertex.
///
/// Iterative so long chains cannot exhaust the stack.
pub fn walk_until(
    start: usize,
    predecessors: &[Option<usize>],
    is_stop: impl Fn(usize) -> bool,
) -> Result<usize> {
    let mut current = start;
    let mut steps = 0usize;
    while !is_stop(current) {
        match predecessors[current] {
            Some(prev) if steps < predecessors.len() => {
                current = prev;
                steps += 1;
            }
            _ => {
                return Err(TeasarError::BrokenPredecessorChain {
                    from: start,
                    stopped: current,
                    expected: "a skeleton vertex".to_string(),
                })
            }
        }
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconstruct_path_orders_from_source() {
        // search rooted at 4: 4 <- 3 <- 1 <- 0
        let pred = vec![Some(1), Some(3), None, Some(4), None];
        assert_eq!(reconstruct_path(4, 0, &pred).unwrap(), vec![4, 3, 1, 0]);
    }

    #[test]
    fn test_reconstruct_trivial_path() {
        let pred = vec![None, None];
        assert_eq!(reconstruct_path(1, 1, &pred).unwrap(), vec![1]);
    }

    #[test]
    fn test_reconstruct_broken_chain() {
        let pred = vec![None, Some(0), None];
        let err = reconstruct_path(2, 1, &pred).unwrap_err();
        assert!(matches!(
            err,
            TeasarError::BrokenPredecessorChain { stopped: 0, .. }
        ));
    }

    #[test]
    fn test_reconstruct_detects_cycle() {
        let pred = vec![Some(1), Some(0), None];
        assert!(reconstruct_path(2, 0, &pred).is_err());
    }

    #[test]
    fn test_walk_until_stops_at_first_match() {
        let pred = vec![None, Some(0), Some(1), Some(2)];
        let on_skeleton = [true, false, true, false];
        assert_eq!(walk_until(3, &pred, |v| on_skeleton[v]).unwrap(), 2);
        assert_eq!(walk_until(2, &pred, |v| on_skeleton[v]).unwrap(), 2);
    }

    #[test]
    fn test_walk_until_runs_off_chain() {
        let pred = vec![None, Some(0)];
        assert!(walk_until(1, &pred, |_| false).is_err());
    }
}
