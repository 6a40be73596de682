use eframe::egui::emath::TSTransform;
use eframe::egui::{vec2, Vec2};
use squaire::document::MapDocument;
use squaire::layout::Layout;
use squaire::options::{LabelStyle, TooltipMode, Whitelist};
use squaire::render::BoxGroup;
use squaire::tooltip::{Direction, DirectionFn, TooltipContent, TooltipLayout};
use squaire::{ColorScale, OptionsPatch, Record, Records, Squaire, SquaireError, TooltipPatch, Value};

fn quick_data() -> Records {
    let mut records = Records::new();
    for (id, value) in [("NY", "$4"), ("AL", "$1")] {
        let mut r = Record::new();
        r.insert("value".into(), Value::from(value));
        records.insert(id.into(), r);
    }
    records
}

fn quick_patch() -> OptionsPatch {
    OptionsPatch {
        colors: Some(ColorScale::quantize(
            (1.0, 5.0),
            vec!["#c9e2f5".into(), "#0098db".into()],
        )),
        ..Default::default()
    }
}

fn group<'a>(map: &'a Squaire, id: &str) -> &'a BoxGroup {
    map.scene().groups().iter().find(|g| g.id == id).unwrap()
}

fn tooltip_patch(mode: TooltipMode) -> OptionsPatch {
    OptionsPatch {
        tooltip: Some(TooltipPatch {
            enabled: Some(true),
            mode: Some(mode),
            ..Default::default()
        }),
        ..quick_patch()
    }
}

#[test]
fn quick_start_colors_regions() {
    let map = Squaire::new(quick_data(), &quick_patch(), 940.0).unwrap();
    assert_eq!(map.cells().len(), 51);
    assert_eq!(map.breakpoint(), "large");
    assert_eq!(group(&map, "NY").fill, "#0098db");
    assert_eq!(group(&map, "AL").fill, "#c9e2f5");
    assert_eq!(group(&map, "TX").fill, "#f3f3f3");
    assert_eq!(group(&map, "TX").label, "TX");
    assert!((map.height() - 940.0 * 8.0 / 11.0).abs() < 1e-3);
}

#[test]
fn update_with_same_inputs_is_idempotent() {
    let mut map = Squaire::new(quick_data(), &quick_patch(), 700.0).unwrap();
    let before: Vec<BoxGroup> = map.scene().groups().to_vec();
    map.update(Some(quick_data()), Some(&quick_patch())).unwrap();
    assert_eq!(map.scene().groups(), before.as_slice());
    map.update(None, None).unwrap();
    assert_eq!(map.scene().groups(), before.as_slice());
}

#[test]
fn update_switches_layout_and_labels() {
    let mut map = Squaire::new(quick_data(), &quick_patch(), 1000.0).unwrap();
    let patch = OptionsPatch {
        layout: Some(Layout::Grid("AL,,NY\n,TX,".into())),
        label_style: Some(LabelStyle::Ap),
        ..Default::default()
    };
    map.update(None, Some(&patch)).unwrap();
    assert_eq!(map.cells().len(), 3);
    assert_eq!(map.extent().boxes_wide, 3);
    assert_eq!(map.extent().boxes_tall, 2);
    assert_eq!(group(&map, "AL").label, "Ala.");
    assert!((group(&map, "NY").rect.min.x - 2000.0 / 3.0).abs() < 1e-3);
    // colors survive because the patch leaves them alone
    assert_eq!(group(&map, "NY").fill, "#0098db");
}

#[test]
fn resize_changes_breakpoint_and_labels() {
    let patch = OptionsPatch {
        label_style: Some(LabelStyle::Full),
        ..quick_patch()
    };
    let mut map = Squaire::new(quick_data(), &patch, 1000.0).unwrap();
    assert_eq!(group(&map, "NY").label, "New York");
    map.resize(400.0);
    assert_eq!(map.breakpoint(), "small");
    assert_eq!(group(&map, "NY").label, "NY");
    assert!((group(&map, "NY").rect.width() - 400.0 / 11.0).abs() < 1e-3);
}

#[test]
fn container_resize_is_debounced() {
    let mut map = Squaire::new(quick_data(), &quick_patch(), 1000.0).unwrap();
    map.container_resized(1000.0, 0.0);
    assert!(!map.tick(0.5));

    map.container_resized(600.0, 1.0);
    map.container_resized(300.0, 1.1);
    assert!(!map.tick(1.2));
    assert_eq!(map.width(), 1000.0);
    assert!(map.tick(1.5));
    assert_eq!(map.width(), 300.0);
    assert_eq!(map.breakpoint(), "small-xsmall");
}

#[test]
fn container_width_wins_after_direct_resize() {
    let mut map = Squaire::new(quick_data(), &quick_patch(), 1000.0).unwrap();
    map.resize(400.0);
    assert_eq!(map.breakpoint(), "small");

    map.container_resized(1000.0, 0.0);
    assert!(map.tick(1.0));
    assert_eq!(map.width(), 1000.0);
    assert_eq!(map.breakpoint(), "large");

    // the width just applied is not a change
    map.container_resized(1000.0, 2.0);
    assert!(!map.tick(3.0));
}

#[test]
fn wildcard_whitelist_follows_first_record_columns() {
    let doc = MapDocument::from_json(
        r#"{
            "data": {
                "NY": { "Population": "19,746,227", "Area": "54,555", "Bird": "Eastern Bluebird" },
                "AL": { "Area": "52,420" }
            },
            "options": { "tooltip": { "enabled": true, "whitelist": "*" } }
        }"#,
    )
    .unwrap();
    let map = Squaire::new(doc.data.clone(), &doc.patch().unwrap(), 940.0).unwrap();
    assert_eq!(
        map.options().tooltip.whitelist,
        Whitelist::Columns(vec!["Population".into(), "Area".into(), "Bird".into()])
    );
}

#[test]
fn toggle_mode_moves_content_to_toolbox_on_small_screens() {
    let mut map = Squaire::new(quick_data(), &tooltip_patch(TooltipMode::Toggle), 1000.0).unwrap();
    assert!(!map.tooltip().unwrap().toolbox.visible);

    let ny = map.cells().iter().position(|c| c.id == "NY").unwrap();
    map.hover(ny, &TSTransform::IDENTITY, Vec2::ZERO);
    let tip = map.tooltip().unwrap();
    assert!(tip.popup().unwrap().visible);
    assert_eq!(tip.toolbox.content.as_ref().unwrap().title, "New York");
    assert!(group(&map, "NY").active);

    map.unhover();
    map.resize(500.0);
    assert!(map.tooltip().unwrap().toolbox.visible);
    let al = map.cells().iter().position(|c| c.id == "AL").unwrap();
    map.hover(al, &TSTransform::IDENTITY, Vec2::ZERO);
    let tip = map.tooltip().unwrap();
    assert!(!tip.popup().unwrap().visible);
    assert_eq!(tip.toolbox.content.as_ref().unwrap().title, "Alabama");
}

#[test]
fn static_mode_never_shows_popup() {
    let mut map = Squaire::new(quick_data(), &tooltip_patch(TooltipMode::Static), 1000.0).unwrap();
    assert!(map.tooltip().unwrap().toolbox.visible);
    map.hover(0, &TSTransform::IDENTITY, Vec2::ZERO);
    let tip = map.tooltip().unwrap();
    assert!(!tip.popup().unwrap().visible);
    assert!(tip.toolbox.content.is_some());
}

#[test]
fn dynamic_mode_hides_toolbox_and_places_popup() {
    let mut map = Squaire::new(quick_data(), &tooltip_patch(TooltipMode::Dynamic), 1100.0).unwrap();
    assert!(!map.tooltip().unwrap().toolbox.visible);

    // AK sits at x=0, so the popup opens to the east of it
    let ak = map.cells().iter().position(|c| c.id == "AK").unwrap();
    map.tooltip_mut().unwrap().set_measured_size(vec2(100.0, 40.0));
    map.hover(ak, &TSTransform::from_translation(vec2(10.0, 20.0)), Vec2::ZERO);
    let popup = map.tooltip().unwrap().popup().unwrap();
    assert_eq!(popup.direction, Some(Direction::E));
    assert_eq!(popup.left, 10.0 + 100.0 + 6.0);
    assert_eq!(popup.top, 20.0 + 50.0 - 20.0);
}

#[test]
fn update_clears_toolbox_and_wildcard_whitelist_expands() {
    let mut map = Squaire::new(quick_data(), &tooltip_patch(TooltipMode::Static), 1000.0).unwrap();
    assert_eq!(
        map.options().tooltip.whitelist,
        Whitelist::Columns(vec!["value".into()])
    );
    map.hover(0, &TSTransform::IDENTITY, Vec2::ZERO);
    assert!(map.tooltip().unwrap().toolbox.content.is_some());
    map.update(None, None).unwrap();
    assert!(map.tooltip().unwrap().toolbox.content.is_none());
}

#[test]
fn tooltip_can_be_enabled_and_disabled_on_update() {
    let mut map = Squaire::new(quick_data(), &quick_patch(), 1000.0).unwrap();
    assert!(map.tooltip().is_none());
    map.update(None, Some(&tooltip_patch(TooltipMode::Dynamic))).unwrap();
    assert!(map.tooltip().is_some());
    let off = OptionsPatch {
        tooltip: Some(TooltipPatch {
            enabled: Some(false),
            ..Default::default()
        }),
        ..Default::default()
    };
    map.update(None, Some(&off)).unwrap();
    assert!(map.tooltip().is_none());
}

#[test]
fn custom_layout_and_direction_are_used() {
    let patch = OptionsPatch {
        tooltip: Some(TooltipPatch {
            enabled: Some(true),
            layout: Some(Some(TooltipLayout::new(|target, _| TooltipContent {
                title: format!("{} ({})", target.cell.id, target.fill),
                ..Default::default()
            }))),
            direction: Some(Some(DirectionFn::new(|_, _| Direction::SE))),
            ..Default::default()
        }),
        ..quick_patch()
    };
    let mut map = Squaire::new(quick_data(), &patch, 1000.0).unwrap();
    let ny = map.cells().iter().position(|c| c.id == "NY").unwrap();
    map.hover(ny, &TSTransform::IDENTITY, Vec2::ZERO);
    let popup = map.tooltip().unwrap().popup().unwrap();
    assert_eq!(popup.content.title, "NY (#0098db)");
    assert_eq!(popup.direction, Some(Direction::SE));
}

#[test]
fn class_index_assigns_group_class() {
    let mut records = quick_data();
    records.get_mut("NY").unwrap().insert("landlocked".into(), Value::from("coastal"));
    records.get_mut("AL").unwrap().insert("landlocked".into(), Value::Bool(false));
    let patch = OptionsPatch {
        class_index: Some(Some("landlocked".into())),
        ..quick_patch()
    };
    let map = Squaire::new(records, &patch, 1000.0).unwrap();
    assert_eq!(group(&map, "NY").class, "coastal");
    assert_eq!(group(&map, "AL").class, "");
}

#[test]
fn missing_label_fails_fast() {
    let patch = OptionsPatch {
        layout: Some(Layout::Grid("NY,ZZ".into())),
        ..Default::default()
    };
    match Squaire::new(Records::new(), &patch, 500.0) {
        Err(SquaireError::MissingLabel(id)) => assert_eq!(id, "ZZ"),
        other => panic!("expected MissingLabel, got {:?}", other.err()),
    }
}

#[test]
fn empty_layout_is_an_error() {
    let patch = OptionsPatch {
        layout: Some(Layout::Grid(String::new())),
        ..Default::default()
    };
    assert!(matches!(
        Squaire::new(Records::new(), &patch, 500.0),
        Err(SquaireError::EmptyLayout)
    ));
}

#[test]
fn non_finite_width_is_rejected() {
    assert!(matches!(
        Squaire::new(quick_data(), &quick_patch(), f32::INFINITY),
        Err(SquaireError::InvalidWidth(_))
    ));
    let mut map = Squaire::new(quick_data(), &quick_patch(), 700.0).unwrap();
    map.resize(f32::NAN);
    assert_eq!(map.width(), 700.0);
    assert_eq!(map.breakpoint(), "medium");
}

#[test]
fn failed_update_keeps_previous_state() {
    let mut map = Squaire::new(quick_data(), &quick_patch(), 1000.0).unwrap();
    let patch = OptionsPatch {
        layout: Some(Layout::Grid("ZZ".into())),
        ..Default::default()
    };
    assert!(map.update(None, Some(&patch)).is_err());
    assert_eq!(map.cells().len(), 51);
}

#[test]
fn document_drives_the_widget() {
    let doc = MapDocument::from_json(
        r##"{
            "data": {
                "CA": { "Population": "38,802,500", "Area": "163,695" },
                "TX": { "Population": "26,956,958", "Area": "268,596" },
                "WY": { "Population": "584,153", "Area": "97,813" }
            },
            "options": {
                "index": "Population",
                "colors": { "type": "quantize", "range": ["#e6eff9", "#0079ae"] }
            }
        }"##,
    )
    .unwrap();
    let mut map = Squaire::new(doc.data.clone(), &doc.patch().unwrap(), 940.0).unwrap();
    assert_eq!(group(&map, "CA").fill, "#0079ae");
    assert_eq!(group(&map, "WY").fill, "#e6eff9");

    map.update(None, Some(&doc.index_patch("Area"))).unwrap();
    assert_eq!(map.options().index, "Area");
    assert_eq!(group(&map, "TX").fill, "#0079ae");
    assert_eq!(group(&map, "CA").fill, "#e6eff9");
}
