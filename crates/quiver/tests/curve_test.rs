use quiver::algo::ArrowLine;
use quiver::algo::curve::{CurvePlan, assign, control_points, plan};
use quiver::graph::geom::{Segment, point, size, vector};
use quiver::graph::{ArrowGeometry, ArrowId, NodeId, Scene};
use quiver::{LayoutOptions, recompute};

fn line(id: u64, source: u64, target: u64, from: (f64, f64), to: (f64, f64)) -> ArrowLine {
    ArrowLine {
        id: ArrowId(id),
        source: NodeId(source),
        target: NodeId(target),
        segment: Segment::new(point(from.0, from.1), point(to.0, to.1)),
    }
}

fn two_node_scene() -> (Scene, NodeId, NodeId) {
    let mut scene = Scene::new();
    let a = scene.add_node(point(0.0, 0.0), size(80.0, 80.0));
    let b = scene.add_node(point(300.0, 0.0), size(80.0, 80.0));
    (scene, a, b)
}

fn offsets(scene: &Scene) -> Vec<f64> {
    scene.arrows().map(|a| a.geometry.curve_offset()).collect()
}

#[test]
fn single_arrow_stays_straight() {
    let (mut scene, a, b) = two_node_scene();
    let id = scene.add_arrow(a, b).unwrap();
    recompute(&mut scene, &LayoutOptions::default());
    let g = scene.arrow(id).unwrap().geometry;
    assert!(!g.is_curved());
    assert_eq!(g.curve_offset(), 0.0);
    assert_eq!(g.control_points(), None);
}

#[test]
fn opposite_duplicates_get_opposite_offsets() {
    let (mut scene, a, b) = two_node_scene();
    scene.add_arrow(a, b).unwrap();
    scene.add_arrow(b, a).unwrap();
    recompute(&mut scene, &LayoutOptions::default());
    assert!(scene.arrows().all(|a| a.geometry.is_curved()));
    assert_eq!(offsets(&scene), vec![30.0, -30.0]);
}

#[test]
fn same_direction_duplicates_get_opposite_offsets() {
    let (mut scene, a, b) = two_node_scene();
    scene.add_arrow(a, b).unwrap();
    scene.add_arrow(a, b).unwrap();
    recompute(&mut scene, &LayoutOptions::default());
    assert_eq!(offsets(&scene), vec![30.0, -30.0]);

    // Same direction and opposite offsets: the two curves bulge to different sides.
    let ys: Vec<f64> = scene
        .arrows()
        .map(|a| a.geometry.control_points().unwrap().0.y)
        .collect();
    assert!(ys[0] > 0.0 && ys[1] < 0.0);
}

#[test]
fn opposite_duplicates_share_one_control_polygon() {
    let (mut scene, a, b) = two_node_scene();
    let ab = scene.add_arrow(a, b).unwrap();
    let ba = scene.add_arrow(b, a).unwrap();
    recompute(&mut scene, &LayoutOptions::default());

    let (ab1, ab2) = scene.arrow(ab).unwrap().geometry.control_points().unwrap();
    let (ba1, ba2) = scene.arrow(ba).unwrap().geometry.control_points().unwrap();
    assert!((ab1 - point(106.0, 30.0)).length() < 1e-6);
    assert!((ab2 - point(194.0, 30.0)).length() < 1e-6);
    // Opposite offsets along opposite perpendiculars: the same curve, traversed backwards.
    assert!((ab1 - ba2).length() < 1e-6);
    assert!((ab2 - ba1).length() < 1e-6);
}

#[test]
fn shared_endpoint_pair_ignores_a_longer_collinear_neighbor() {
    let mut scene = Scene::new();
    let n0 = scene.add_node(point(0.0, 0.0), size(80.0, 80.0));
    let n1 = scene.add_node(point(200.0, 0.0), size(80.0, 80.0));
    let n2 = scene.add_node(point(400.0, 0.0), size(80.0, 80.0));
    scene.add_arrow(n0, n1).unwrap();
    scene.add_arrow(n1, n0).unwrap();
    let long = scene.add_arrow(n0, n2).unwrap();
    recompute(&mut scene, &LayoutOptions::default());

    // The pair is ranked on its own; the long arrow joins the mixed fan as its last member.
    assert_eq!(offsets(&scene), vec![30.0, -30.0, 30.0]);
    let g = scene.arrow(long).unwrap().geometry;
    assert!(g.is_curved() && g.curve().unwrap().direction.is_none());
}

#[test]
fn three_duplicates_fan_symmetrically() {
    let (mut scene, a, b) = two_node_scene();
    scene.add_arrow(a, b).unwrap();
    scene.add_arrow(b, a).unwrap();
    scene.add_arrow(a, b).unwrap();
    recompute(&mut scene, &LayoutOptions::default());
    assert_eq!(offsets(&scene), vec![-30.0, 0.0, 30.0]);
    assert!(scene.arrows().all(|a| a.geometry.is_curved()));
}

#[test]
fn fan_order_follows_creation_order_not_group_order() {
    let opts = LayoutOptions::default();
    let a = line(0, 0, 1, (0.0, 0.0), (300.0, 0.0));
    let b = line(5, 0, 1, (0.0, 0.0), (300.0, 0.0));
    let c = line(9, 1, 0, (300.0, 0.0), (0.0, 0.0));
    let offset_of = |me: &ArrowLine, others: &[ArrowLine]| plan(me, others, &opts).unwrap().offset;
    assert_eq!(offset_of(&c, &[b, a]), 30.0);
    assert_eq!(offset_of(&a, &[c, b]), -30.0);
    assert_eq!(offset_of(&b, &[a, c]), 0.0);
}

#[test]
fn parallel_neighbors_without_visual_overlap_stay_straight() {
    let opts = LayoutOptions::default();
    let a = line(0, 0, 1, (0.0, 0.0), (300.0, 0.0));
    let b = line(1, 2, 3, (0.0, 20.0), (300.0, 20.0));
    assert_eq!(plan(&a, &[b], &opts), None);

    let mut g = ArrowGeometry {
        start_point: point(40.0, 0.0),
        end_point: point(260.0, 0.0),
        ..ArrowGeometry::default()
    };
    assign(&mut g, &a, &[b], &opts);
    assert!(!g.is_curved());
}

#[test]
fn overlapping_same_direction_arrows_stack_on_one_side() {
    let opts = LayoutOptions::default();
    let a = line(0, 0, 1, (0.0, 0.0), (300.0, 0.0));
    let b = line(1, 2, 3, (50.0, 3.0), (350.0, 3.0));

    let pa = plan(&a, &[b], &opts).unwrap();
    let pb = plan(&b, &[a], &opts).unwrap();
    assert_eq!(pa.offset, 30.0);
    assert_eq!(pb.offset, 60.0);
    let (da, db) = (pa.direction.unwrap(), pb.direction.unwrap());
    assert!((da - db).length() < 1e-12);
    assert!((da.y - 1.0).abs() < 1e-12);
}

#[test]
fn overlapping_opposite_arrows_curve_away_from_each_other() {
    let opts = LayoutOptions::default();
    let a = line(0, 0, 1, (0.0, 0.0), (300.0, 0.0));
    let b = line(1, 2, 3, (350.0, 3.0), (50.0, 3.0));

    let pa = plan(&a, &[b], &opts).unwrap();
    let pb = plan(&b, &[a], &opts).unwrap();
    assert_eq!((pa.offset, pb.offset), (-15.0, -15.0));
    assert_eq!((pa.direction, pb.direction), (None, None));

    let (ca, _) = control_points(a.segment.start, a.segment.end, &pa, &opts);
    let (cb, _) = control_points(b.segment.start, b.segment.end, &pb, &opts);
    assert!(ca.y < 0.0);
    assert!(cb.y > 3.0);
}

#[test]
fn mixed_fan_of_three_flips_backward_arrows() {
    let opts = LayoutOptions::default();
    let a = line(0, 0, 1, (0.0, 0.0), (300.0, 0.0));
    let b = line(1, 2, 3, (20.0, 2.0), (320.0, 2.0));
    let c = line(2, 4, 5, (350.0, 4.0), (50.0, 4.0));
    let offset_of = |me: &ArrowLine, others: &[ArrowLine]| plan(me, others, &opts).unwrap().offset;

    assert_eq!(offset_of(&a, &[b, c]), -30.0);
    assert_eq!(offset_of(&b, &[a, c]), 0.0);
    // Rank 2 of 3 would be +30; pointing backwards flips it.
    assert_eq!(offset_of(&c, &[a, b]), -30.0);
}

#[test]
fn vertical_mixed_pair_flips_on_the_vertical_component() {
    let opts = LayoutOptions::default();
    let down = line(0, 0, 1, (0.0, 0.0), (0.0, 300.0));
    let up = line(1, 2, 3, (3.0, 350.0), (4.0, 50.0));

    let pd = plan(&down, &[up], &opts).unwrap();
    let pu = plan(&up, &[down], &opts).unwrap();
    // `up` drifts right but points up, so its rank-1 offset is negated.
    assert_eq!((pd.offset, pu.offset), (-15.0, -15.0));
    assert_eq!((pd.direction, pu.direction), (None, None));
}

#[test]
fn control_points_sit_at_t1_and_t2_shifted_by_the_offset() {
    let opts = LayoutOptions::default();
    let p = CurvePlan {
        offset: 30.0,
        direction: None,
    };
    let (c1, c2) = control_points(point(0.0, 0.0), point(100.0, 0.0), &p, &opts);
    assert!((c1 - point(30.0, 30.0)).length() < 1e-9);
    assert!((c2 - point(70.0, 30.0)).length() < 1e-9);

    let fixed = CurvePlan {
        offset: 10.0,
        direction: Some(vector(0.0, -1.0)),
    };
    let (c1, _) = control_points(point(0.0, 0.0), point(0.0, 100.0), &fixed, &opts);
    assert!((c1 - point(0.0, 20.0)).length() < 1e-9);
}

#[test]
fn zero_length_anchors_keep_control_points_on_the_line() {
    let opts = LayoutOptions::default();
    let p = CurvePlan {
        offset: 30.0,
        direction: None,
    };
    let (c1, c2) = control_points(point(5.0, 5.0), point(5.0, 5.0), &p, &opts);
    assert_eq!((c1, c2), (point(5.0, 5.0), point(5.0, 5.0)));
}
