//! Integration tests for the coordinate transforms.

use regionlink::geometry::{
    click_to_source_point, dpi_scale, point_in_polygon, project_quad, resolve_resolution,
    resolve_resolution_with, resolve_view_box_size, rotate_point, unrotate_point, ViewBox,
    ViewContext, ViewOptions,
};
use regionlink::model::{Page, PageMetric, Point, Quad};

const EPS: f64 = 1e-9;

#[test]
fn test_resolution_from_width_ratio() {
    let page = Page::new(1).with_size(300.0, 400.0);
    let dpi = resolve_resolution(&page, &[], 200.0);
    assert_eq!(dpi, 144.0);

    let scale = dpi_scale(96.0, dpi).unwrap();
    assert!((scale - 2.0 / 3.0).abs() < EPS);
}

#[test]
fn test_resolution_chain_order() {
    let metrics = vec![PageMetric {
        page_id: 1,
        dpi: Some(300.0),
        ..Default::default()
    }];

    let explicit = Page::new(1).with_size(300.0, 400.0).with_resolution(72.0);
    assert_eq!(resolve_resolution(&explicit, &metrics, 200.0), 72.0);

    let same_width = Page::new(1).with_size(200.0, 400.0);
    assert_eq!(resolve_resolution(&same_width, &metrics, 200.0), 300.0);

    let other_page = Page::new(2);
    assert_eq!(resolve_resolution(&other_page, &metrics, 200.0), 144.0);

    let options = ViewOptions::new().with_fallback_resolution(200.0);
    assert_eq!(resolve_resolution_with(&other_page, &metrics, 200.0, &options), 200.0);
}

#[test]
fn test_dpi_scale_rejects_zero() {
    assert!((dpi_scale(96.0, 144.0).unwrap() - 2.0 / 3.0).abs() < EPS);
    assert!(dpi_scale(96.0, 0.0).is_err());
    assert!(dpi_scale(96.0, -1.0).is_err());
}

#[test]
fn test_rotation_round_trip_on_any_page() {
    let p = Point::new(12.5, 40.0);
    for rotation in [0, 90, 180, 270, 450, -90] {
        let rotated = rotate_point(p, rotation, 300.0, 450.0);
        let back = unrotate_point(rotated, rotation, 300.0, 450.0);
        assert!(back.approx_eq(&p, EPS), "rotation {}", rotation);
    }
}

#[test]
fn test_reverse_rotation_on_square_page() {
    let p = Point::new(3.0, 7.0);
    for rotation in [0, 90, 180, 270] {
        let rotated = rotate_point(p, rotation, 100.0, 100.0);
        let back = rotate_point(rotated, 360 - rotation, 100.0, 100.0);
        assert!(back.approx_eq(&p, EPS), "rotation {}", rotation);
    }
}

#[test]
fn test_view_box_scenario() {
    let scale = dpi_scale(96.0, 144.0).unwrap();
    let known = resolve_view_box_size(Some(300.0), Some(450.0), 200.0, 300.0, 1.0, scale).unwrap();
    assert_eq!(known, ViewBox { width: 300.0, height: 450.0 });

    let derived = resolve_view_box_size(None, None, 200.0, 300.0, 1.0, scale).unwrap();
    assert_eq!(derived, ViewBox { width: 300.0, height: 450.0 });
}

#[test]
fn test_click_maps_back_into_region() {
    let region = Quad::from_rect(30.0, 60.0, 30.0, 30.0).unwrap();
    let vb = ViewBox { width: 300.0, height: 450.0 };
    let scale = 2.0 / 3.0;

    for rotation in [0, 90, 180, 270] {
        let view = ViewContext::new(200.0, 300.0)
            .with_zoom(2.0)
            .with_rotation(rotation);
        let projected = project_quad(&region, &view, scale, &vb).unwrap();
        let center = regionlink::geometry::bounding_box(&projected).center();
        let source = click_to_source_point(center, &view, scale, &vb).unwrap();
        assert!(point_in_polygon(source, &region), "rotation {}", rotation);
    }
}
