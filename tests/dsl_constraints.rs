//! Integration tests for the anchor DSL and the bundled solver

use pretty_assertions::assert_eq;

use snow_layout::constraints;
use snow_layout::prelude::*;

fn rendered(constraints: &[Constraint]) -> Vec<String> {
    constraints.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_offset_overrides_constant_only() {
    let view = View::new("v");
    for k in [-12.0, 0.0, 8.0, 1e6] {
        let anchor = view.leading_anchor().prioritized(Priority::HIGH);
        let offset = anchor.offset(k);
        assert_eq!(offset.constant(), k);
        assert_eq!(offset.multiplier(), anchor.multiplier());
        assert_eq!(offset.priority(), anchor.priority());
    }
}

#[test]
fn test_scale_overrides_multiplier_only() {
    let view = View::new("v");
    for k in [0.25, 2.0, -1.0] {
        let anchor = view.width_anchor() + 4.0;
        let scaled = anchor * k;
        assert_eq!(scaled.multiplier(), k);
        assert_eq!(scaled.constant(), 4.0);
        assert_eq!(scaled.priority(), Priority::REQUIRED);
    }
}

#[test]
fn test_chaining_is_not_distributive() {
    let view = View::new("v");
    let chained = (view.width_anchor() + 5.0) * 2.0;
    assert_eq!(chained.constant(), 5.0);
    assert_eq!(chained.multiplier(), 2.0);
}

#[test]
fn test_edges_and_center_counts() {
    let a = View::new("a");
    let b = View::new("b");

    assert_eq!(
        rendered(&a.edge_anchor().equal_to(b.edge_anchor())),
        vec![
            "a.leading == b.leading",
            "a.trailing == b.trailing",
            "a.top == b.top",
            "a.bottom == b.bottom",
        ]
    );
    assert_eq!(a.center_anchor().equal_to(b.center_anchor()).len(), 2);
}

#[test]
fn test_size_literals_have_no_target() {
    let icon = View::new("icon");
    let constraints = icon.size_anchor().equal_to_constants(&[44.0, 32.0]);
    assert_eq!(constraints.len(), 2);
    assert!(constraints.iter().all(|c| c.second_anchor().is_none()));
}

#[test]
fn test_builder_scenario() {
    let a = View::new("a");
    let b = View::new("b");

    let mut builder = ConstraintListBuilder::new();
    builder
        .add(a.top_anchor().equal_to(b.top_anchor()))
        .add_if(
            true,
            vec![
                a.width_anchor().equal_to_constant(10.0),
                a.height_anchor().equal_to_constant(20.0),
            ],
            (),
        )
        .add_if(
            false,
            vec![
                b.width_anchor().equal_to_constant(1.0),
                b.width_anchor().equal_to_constant(2.0),
                b.width_anchor().equal_to_constant(3.0),
            ],
            (),
        );
    let list = builder.build();

    assert_eq!(
        rendered(&list),
        vec!["a.top == b.top", "a.width == 10", "a.height == 20"]
    );
}

#[test]
fn test_priority_on_list_keeps_identity() {
    let view = View::new("v");
    let original = constraints![
        view.width_anchor().equal_to_constant(1.0),
        view.height_anchor().equal_to_constant(2.0),
        view.width_anchor().greater_than_or_equal_to_constant(0.0),
    ];
    let prioritized = original.clone().with_priority(Priority::LOW);

    assert_eq!(prioritized.len(), 3);
    for (before, after) in original.iter().zip(&prioritized) {
        assert!(before.ptr_eq(after));
        assert_eq!(before.priority(), Priority::LOW);
    }
}

#[test]
fn test_composite_pairing_truncates() {
    let a = View::new("a");
    let b = View::new("b");
    let partial = CompositeAnchor::new(
        vec![b.leading_anchor()],
        vec![b.top_anchor(), b.bottom_anchor()],
    );
    assert_eq!(
        rendered(&a.edge_anchor().equal_to(partial)),
        vec!["a.leading == b.leading", "a.top == b.top", "a.bottom == b.bottom"]
    );
}

#[test]
fn test_solver_lays_out_card_in_safe_area() {
    let root = View::new("root");
    let card = View::new("card");
    let badge = View::new("badge");

    let mut solver = ConstraintSolver::new();
    solver
        .suggest_frame(&root, Rect::new(0.0, 0.0, 375.0, 812.0))
        .unwrap();
    solver
        .set_safe_area_insets(&root, EdgeInsets::new(44.0, 0.0, 34.0, 0.0))
        .unwrap();

    let compact = true;
    let active = solver
        .activate_with(|list| {
            // No vertical members, so only the horizontal pairs are produced
            let sides = CompositeAnchor::new(vec![card.leading_anchor(), card.trailing_anchor()], vec![]);
            list.add(sides.equal_to(root.safe_area().horizontal_edge_anchor()))
                .add(card.top_anchor().equal_to(root.safe_area_layout_guide().top_anchor() + 16.0))
                .add(card.height_anchor().equal_to(root.height_anchor() * 0.25))
                .add(badge.size_anchor().equal_to_constants(&[24.0, 24.0]))
                .add(badge.center_anchor().equal_to(card.center_anchor()))
                .add_if(
                    compact,
                    card.width_anchor()
                        .less_than_or_equal_to_constant(320.0)
                        .with_priority(Priority::HIGH),
                    (),
                );
        })
        .unwrap();

    assert_eq!(active.len(), 9);
    assert_eq!(solver.active_count(), 9);
    assert!(active.iter().all(|c| c.is_active()));

    assert!(solver
        .frame(&root)
        .approx_eq(&Rect::new(0.0, 0.0, 375.0, 812.0)));
    assert!(solver
        .safe_area_frame(&root)
        .approx_eq(&Rect::new(0.0, 44.0, 375.0, 734.0)));

    let card_frame = solver.frame(&card);
    assert!((card_frame.width - 375.0).abs() < 0.001, "{}", card_frame);
    assert!((card_frame.y - 60.0).abs() < 0.001, "{}", card_frame);
    assert!((card_frame.height - 203.0).abs() < 0.001, "{}", card_frame);

    let badge_frame = solver.frame(&badge);
    assert!((badge_frame.mid_x() - card_frame.mid_x()).abs() < 0.001);
    assert!((badge_frame.mid_y() - card_frame.mid_y()).abs() < 0.001);

    solver.deactivate(&active).unwrap();
    assert_eq!(solver.active_count(), 0);
    assert!(active.iter().all(|c| !c.is_active()));
}

#[test]
fn test_failed_batch_leaves_nothing_active() {
    let view = View::new("v");
    let mut solver = ConstraintSolver::new();

    let batch = constraints![
        view.width_anchor().equal_to_constant(100.0),
        view.width_anchor().equal_to_constant(200.0),
    ];
    assert!(solver.activate(&batch).is_err());
    assert_eq!(solver.active_count(), 0);
    assert!(batch.iter().all(|c| !c.is_active()));
}
