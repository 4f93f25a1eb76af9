//! # Layout Properties
//!
//! Percentage layout checked over generated boxes and class fractions.

use overlay_core::Rect;
use overlay_ui::layout::resolve_area;
use overlay_ui::style::{Class, Offset, Size};
use overlay_ui::{compile_str, BehaviorRegistry, Scene};
use proptest::prelude::*;

const EPSILON: f32 = 1e-2;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

fn parent_box() -> impl Strategy<Value = Rect> {
    (-2048i32..2048, -2048i32..2048, 0i32..4096, 0i32..4096).prop_map(|(x, y, w, h)| {
        Rect::new(x as f32, y as f32, (x + w) as f32, (y + h) as f32)
    })
}

proptest! {
    #[test]
    fn resolved_area_follows_fractions(
        parent in parent_box(),
        fw in 0.0f32..=1.0,
        fh in 0.0f32..=1.0,
        fx in 0.0f32..=1.0,
        fy in 0.0f32..=1.0,
    ) {
        let class = Class {
            size: Some(Size { width: fw, height: fh }),
            offset: Some(Offset { left: fx, top: fy }),
            ..Class::default()
        };

        let area = resolve_area(Some(&class), parent);

        prop_assert!(close(area.width(), parent.width() * fw));
        prop_assert!(close(area.height(), parent.height() * fh));
        prop_assert!(close(area.x0, parent.x0 + parent.width() * fx));
        prop_assert!(close(area.y0, parent.y0 + parent.height() * fy));
    }

    #[test]
    fn absent_size_and_offset_collapse_to_origin(parent in parent_box(), fx in 0.0f32..=1.0) {
        let no_size = Class {
            offset: Some(Offset { left: fx, top: 0.0 }),
            ..Class::default()
        };
        let area = resolve_area(Some(&no_size), parent);
        prop_assert_eq!(area.width(), 0.0);
        prop_assert_eq!(area.height(), 0.0);

        let no_offset = Class {
            size: Some(Size { width: 0.5, height: 0.5 }),
            ..Class::default()
        };
        let area = resolve_area(Some(&no_offset), parent);
        prop_assert_eq!((area.x0, area.y0), (parent.x0, parent.y0));

        prop_assert_eq!(resolve_area(None, parent), Rect::new(parent.x0, parent.y0, parent.x0, parent.y0));
    }

    #[test]
    fn child_stays_inside_parent(
        parent in parent_box(),
        (width, left) in (0u32..=100).prop_flat_map(|w| (Just(w), 0..=100 - w)),
        (height, top) in (0u32..=100).prop_flat_map(|h| (Just(h), 0..=100 - h)),
    ) {
        let style = format!(
            r#"<Styles>
                <Class Name="Full"><Size Width="100" Height="100"/></Class>
                <Class Name="Inner">
                    <Size Width="{width}" Height="{height}"/>
                    <Offset Left="{left}" Top="{top}"/>
                </Class>
            </Styles>"#
        );
        let blueprint = r#"<Node Class="Full"><Node Class="Inner"><Node Class="Inner"/></Node></Node>"#;

        let mut scene = Scene::new();
        compile_str(parent, blueprint, &style, &BehaviorRegistry::new(), &mut scene).unwrap();

        for pair in [(0, 1), (1, 2)] {
            let outer = scene.nodes[pair.0].area;
            let inner = scene.nodes[pair.1].area;
            prop_assert!(inner.x0 >= outer.x0 - EPSILON);
            prop_assert!(inner.y0 >= outer.y0 - EPSILON);
            prop_assert!(inner.x1 <= outer.x1 + EPSILON);
            prop_assert!(inner.y1 <= outer.y1 + EPSILON);
        }
    }
}
