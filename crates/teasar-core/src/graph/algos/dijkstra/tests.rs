use super::*;
use crate::error::TeasarError;

/// Path 0 - 1 - 2 - 3 - 4 with unit weights plus an isolated vertex 5
fn line_with_island() -> CsGraph {
    CsGraph::from_edges(
        6,
        &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0)],
    )
    .unwrap()
}

#[test]
fn test_single_source_distances_and_predecessors() {
    let g = line_with_island();
    let sp = dijkstra(&g, 0, None).unwrap();

    assert_eq!(&sp.distances[..5], &[0.0, 1.0, 2.0, 3.0, 4.0]);
    assert!(sp.distances[5].is_infinite());
    assert_eq!(sp.predecessors[0], None);
    assert_eq!(sp.predecessors[3], Some(2));
    assert_eq!(sp.predecessors[5], None);
    assert!(sp.sources.is_none());
    assert_eq!(sp.settled, 5);
}

#[test]
fn test_limit_is_inclusive() {
    let g = line_with_island();
    let sp = dijkstra(&g, 0, Some(2.0)).unwrap();

    assert_eq!(sp.distances[2], 2.0);
    assert!(sp.distances[3].is_infinite());
    assert_eq!(sp.predecessors[3], None);
    assert_eq!(sp.settled, 3);
}

#[test]
fn test_zero_limit_reaches_only_source() {
    let g = line_with_island();
    let sp = dijkstra(&g, 2, Some(0.0)).unwrap();

    assert_eq!(sp.distances[2], 0.0);
    assert_eq!(sp.settled, 1);
    assert!(sp.distances.iter().filter(|d| d.is_finite()).count() == 1);
}

#[test]
fn test_prefers_lighter_route() {
    // 0 -(1)- 1 -(1)- 2 and a heavy shortcut 0 -(5)- 2
    let g = CsGraph::from_edges(3, &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 5.0)]).unwrap();
    let sp = dijkstra(&g, 0, None).unwrap();

    assert_eq!(sp.distances[2], 2.0);
    assert_eq!(sp.predecessors[2], Some(1));
}

#[test]
fn test_equal_routes_keep_first_settled_predecessor() {
    // Square 0-1-2-3-0: vertex 2 is reachable at distance 2 via 1 or 3
    let g = CsGraph::from_edges(4, &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0)])
        .unwrap();
    let sp = dijkstra(&g, 0, None).unwrap();

    assert_eq!(sp.distances[2], 2.0);
    assert_eq!(sp.predecessors[2], Some(1));
}

#[test]
fn test_multi_source_attribution() {
    let g = line_with_island();
    let sp = dijkstra_multi(&g, &[0, 4], None).unwrap();

    assert_eq!(&sp.distances[..5], &[0.0, 1.0, 2.0, 1.0, 0.0]);
    let sources = sp.sources.unwrap();
    assert_eq!(sources[0], Some(0));
    assert_eq!(sources[1], Some(0));
    assert_eq!(sources[3], Some(4));
    assert_eq!(sources[4], Some(4));
    assert_eq!(sources[5], None);
    assert_eq!(sp.predecessors[4], None);
}

#[test]
fn test_multi_source_with_limit() {
    let g = line_with_island();
    let sp = dijkstra_multi(&g, &[1, 2], Some(1.0)).unwrap();

    assert_eq!(sp.distances[0], 1.0);
    assert_eq!(sp.distances[3], 1.0);
    assert!(sp.distances[4].is_infinite());
    let sources = sp.sources.unwrap();
    assert_eq!(sources[0], Some(1));
    assert_eq!(sources[3], Some(2));
}

#[test]
fn test_multi_source_duplicate_sources() {
    let g = line_with_island();
    let sp = dijkstra_multi(&g, &[2, 2], None).unwrap();

    assert_eq!(sp.distances[0], 2.0);
    assert_eq!(sp.sources.unwrap()[4], Some(2));
}

#[test]
fn test_rejects_out_of_range_source() {
    let g = line_with_island();
    assert!(matches!(
        dijkstra(&g, 6, None),
        Err(TeasarError::VertexOutOfRange { index: 6, .. })
    ));
    assert!(matches!(
        dijkstra_multi(&g, &[0, 9], None),
        Err(TeasarError::VertexOutOfRange { index: 9, .. })
    ));
}

#[test]
fn test_rejects_negative_limit() {
    let g = line_with_island();
    assert!(matches!(
        dijkstra(&g, 0, Some(-1.0)),
        Err(TeasarError::InvalidValue { .. })
    ));
    assert!(matches!(
        dijkstra(&g, 0, Some(f64::NAN)),
        Err(TeasarError::InvalidValue { .. })
    ));
}

#[test]
fn test_heap_entry_orders_by_cost_then_vertex() {
    let a = HeapEntry {
        vertex: 3,
        cost: 1.0,
    };
    let b = HeapEntry {
        vertex: 1,
        cost: 1.0,
    };
    let c = HeapEntry {
        vertex: 0,
        cost: 2.0,
    };
    assert!(b < a);
    assert!(a < c);
}
