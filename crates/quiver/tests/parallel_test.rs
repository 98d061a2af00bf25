use quiver::algo::ArrowLine;
use quiver::algo::parallel::{endpoints_coincide, find_group, parallel_and_overlapping};
use quiver::graph::geom::{Segment, point};
use quiver::graph::{ArrowId, NodeId};
use quiver::{LayoutOptions, ParallelMode};

fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
    Segment::new(point(x0, y0), point(x1, y1))
}

/// An arrow between its own pair of nodes (`2 * id` and `2 * id + 1`).
fn line(id: u64, segment: Segment) -> ArrowLine {
    ArrowLine {
        id: ArrowId(id),
        source: NodeId(2 * id),
        target: NodeId(2 * id + 1),
        segment,
    }
}

fn line_between(id: u64, source: u64, target: u64, segment: Segment) -> ArrowLine {
    ArrowLine {
        id: ArrowId(id),
        source: NodeId(source),
        target: NodeId(target),
        segment,
    }
}

#[test]
fn shared_endpoints_group_in_either_order() {
    let opts = LayoutOptions::default();
    let a = seg(0.0, 0.0, 200.0, 0.0);
    assert!(parallel_and_overlapping(&a, &seg(0.5, 0.0, 200.0, 0.5), &opts));
    assert!(parallel_and_overlapping(&a, &a.reversed(), &opts));
    assert!(endpoints_coincide(&a, &seg(199.5, 0.5, 0.5, -0.5), 1.0));
    assert!(!endpoints_coincide(&a, &seg(0.0, 0.0, 201.0, 0.0), 1.0));
}

#[test]
fn collinear_overlap_exactly_at_the_threshold_is_not_grouped() {
    let opts = LayoutOptions::default();
    let a = seg(0.0, 0.0, 100.0, 0.0);
    assert!(!parallel_and_overlapping(&a, &seg(90.0, 0.0, 200.0, 0.0), &opts));
    assert!(parallel_and_overlapping(&a, &seg(89.0, 0.0, 200.0, 0.0), &opts));
}

#[test]
fn opposite_direction_segments_can_overlap() {
    let opts = LayoutOptions::default();
    let a = seg(0.0, 0.0, 200.0, 0.0);
    let b = seg(150.0, 10.0, 20.0, 10.0);
    assert!(parallel_and_overlapping(&a, &b, &opts));
}

#[test]
fn perpendicular_distance_limit_is_inclusive() {
    let opts = LayoutOptions::default();
    let a = seg(0.0, 0.0, 200.0, 0.0);
    assert!(parallel_and_overlapping(&a, &seg(0.0, 50.0, 200.0, 50.0), &opts));
    assert!(!parallel_and_overlapping(&a, &seg(0.0, 50.5, 200.0, 50.5), &opts));
}

#[test]
fn far_apart_collinear_segments_are_not_grouped() {
    let opts = LayoutOptions::default();
    let a = seg(0.0, 0.0, 100.0, 0.0);
    assert!(!parallel_and_overlapping(&a, &seg(300.0, 0.0, 400.0, 0.0), &opts));
}

#[test]
fn short_near_duplicates_are_grouped() {
    let opts = LayoutOptions::default();
    // Overlap is only 6, but every end is within 5 of its partner.
    let a = seg(0.0, 0.0, 8.0, 0.0);
    let b = seg(2.0, 3.0, 10.0, 3.0);
    assert!(parallel_and_overlapping(&a, &b, &opts));
}

#[test]
fn slanted_segments_are_not_parallel() {
    let opts = LayoutOptions::default();
    let a = seg(0.0, 0.0, 200.0, 0.0);
    assert!(!parallel_and_overlapping(&a, &seg(0.0, 5.0, 200.0, 15.0), &opts));
}

#[test]
fn degenerate_segments_are_never_parallel() {
    let opts = LayoutOptions::default();
    let dot = seg(50.0, 0.0, 50.0, 0.0);
    assert!(!parallel_and_overlapping(&dot, &seg(0.0, 0.0, 100.0, 0.0), &opts));
    assert!(!parallel_and_overlapping(&seg(0.0, 0.0, 100.0, 0.0), &dot, &opts));
}

#[test]
fn find_group_excludes_self_and_self_loops() {
    let opts = LayoutOptions::default();
    let a = line(0, seg(0.0, 0.0, 200.0, 0.0));
    let b = line(1, seg(20.0, 3.0, 180.0, 3.0));
    let c = line(2, seg(0.0, 300.0, 200.0, 300.0));
    let lp = line_between(3, 0, 0, seg(0.0, 0.0, 0.0, 0.0));
    let lines = [a, b, c, lp];

    let group = find_group(&a, &lines, &opts);
    assert_eq!(group.iter().map(|l| l.id).collect::<Vec<_>>(), vec![ArrowId(1)]);
    assert!(find_group(&lp, &lines, &opts).is_empty());
}

#[test]
fn node_pair_mode_only_groups_arrows_between_the_same_nodes() {
    let opts = LayoutOptions {
        parallel_mode: ParallelMode::NodePair,
        ..LayoutOptions::default()
    };
    let ab = line_between(0, 0, 1, seg(0.0, 0.0, 200.0, 0.0));
    let ba = line_between(1, 1, 0, seg(200.0, 0.0, 0.0, 0.0));
    // Geometrically overlapping, but joins other nodes.
    let cd = line_between(2, 2, 3, seg(20.0, 3.0, 180.0, 3.0));
    let lines = [ab, ba, cd];

    let group = find_group(&ab, &lines, &opts);
    assert_eq!(group.iter().map(|l| l.id).collect::<Vec<_>>(), vec![ArrowId(1)]);
    let geometric = find_group(&ab, &lines, &LayoutOptions::default());
    assert_eq!(geometric.len(), 2);
}
