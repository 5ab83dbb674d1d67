use lumen_editor::{
    Binding, LIGHT_DESCRIPTORS, LightRegistry, Panel, SliderRange, build_light_panel,
};
use lumen_engine::prelude::*;
use std::f32::consts::PI;

fn build(world: &mut World) -> Panel {
    let registry = LightRegistry::from_world(world);
    build_light_panel(Panel::new("Lights"), &registry, &LIGHT_DESCRIPTORS)
}

fn spawn(world: &mut World, order: u64, light: impl Into<Light>) -> Entity {
    world
        .spawn((
            Tag {
                label: format!("light {}", order),
            },
            SpawnOrder(order),
            light.into(),
            Transform::default(),
        ))
        .id()
}

fn range(min: f32, max: f32, step: f32) -> Option<SliderRange> {
    Some(SliderRange { min, max, step })
}

#[test]
fn single_point_light_gets_one_section() {
    let mut world = World::new();
    let point = spawn(&mut world, 0, PointLight::new(0xff9000, 0.5, 10.0, 2.0));

    let panel = build(&mut world);

    assert_eq!(panel.sections.len(), 1);
    let section = &panel.sections[0];
    assert_eq!(section.label, "PointLight");
    assert!(section.collapsed);

    let values: Vec<_> = section
        .controls
        .iter()
        .map(|control| control.value(&world))
        .collect();
    assert_eq!(values, [Some(0.5), Some(10.0), Some(2.0)]);

    let ranges: Vec<_> = section.controls.iter().map(|control| control.range).collect();
    assert_eq!(
        ranges,
        [
            range(0.0, 2.0, 0.001),
            range(0.0, 20.0, 0.01),
            range(0.0, 5.0, 0.01)
        ]
    );

    let labels: Vec<_> = section.controls.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, ["intensity", "distance", "decay"]);
    assert!(section.controls.iter().all(|c| c.binding.entity == point));
}

#[test]
fn empty_scene_gets_empty_panel() {
    let mut world = World::new();
    world.spawn((Tag { label: "Sphere".into() }, SpawnOrder(0), Mesh::sphere(0.5, 32, 32)));

    let panel = build(&mut world);

    assert!(panel.is_empty());
    assert_eq!(panel.title, "Lights");
}

#[test]
fn only_first_light_of_a_kind_is_bound() {
    let mut world = World::new();
    let first = spawn(&mut world, 0, SpotLight::new(0x78ff00, 0.5, 10.0, PI * 0.1, 0.25, 1.0));
    let second = spawn(&mut world, 1, SpotLight::new(0xffffff, 1.0, 5.0, 0.5, 0.0, 2.0));

    let panel = build(&mut world);

    let section = panel.section("SpotLight").unwrap();
    assert_eq!(section.controls.len(), 5);
    for control in &section.controls {
        assert_eq!(control.binding.entity, first);
        assert_ne!(control.binding.entity, second);
    }
    assert_eq!(panel.controls().count(), 5);
}

#[test]
fn demo_scene_exposes_every_kind() {
    let mut world = World::new();
    spawn(&mut world, 0, AmbientLight::new(0xffffff, 0.5));
    spawn(&mut world, 1, DirectionalLight::new(0x00fffc, 0.3));
    spawn(&mut world, 2, HemisphereLight::new(0xff0000, 0x0000ff, 0.3));
    spawn(&mut world, 3, PointLight::new(0xff9000, 0.5, 10.0, 2.0));
    spawn(&mut world, 4, RectAreaLight::new(0x4e00ff, 2.0, 1.0, 1.0));
    spawn(&mut world, 5, SpotLight::new(0x78ff00, 0.5, 10.0, PI * 0.1, 0.25, 1.0));

    let panel = build(&mut world);

    let sizes: Vec<_> = panel
        .sections
        .iter()
        .map(|section| (section.label.as_str(), section.controls.len()))
        .collect();
    assert_eq!(
        sizes,
        [
            ("AmbientLight", 1),
            ("DirectionalLight", 1),
            ("HemisphereLight", 1),
            ("PointLight", 3),
            ("RectAreaLight", 3),
            ("SpotLight", 5)
        ]
    );

    let ambient = panel.section("AmbientLight").unwrap();
    assert_eq!(ambient.controls[0].range, range(0.0, 1.0, 0.001));

    let rect = panel.section("RectAreaLight").unwrap();
    assert_eq!(rect.controls[0].range, range(0.0, 10.0, 0.01));
    assert_eq!(rect.controls[1].range, range(0.0, 10.0, 0.001));
}

#[test]
fn every_control_reads_its_light() {
    let mut world = World::new();
    spawn(&mut world, 0, HemisphereLight::new(0xff0000, 0x0000ff, 0.3));
    spawn(&mut world, 1, RectAreaLight::new(0x4e00ff, 2.0, 1.0, 1.0));

    let panel = build(&mut world);

    for control in panel.controls() {
        assert!(control.value(&world).is_some(), "{} is unbound", control.label);
    }
}

#[test]
fn edits_reach_the_scene_verbatim() {
    let mut world = World::new();
    let rect = spawn(&mut world, 0, RectAreaLight::new(0x4e00ff, 2.0, 1.0, 1.0));

    let panel = build(&mut world);
    let width = &panel.section("RectAreaLight").unwrap().controls[1];
    assert_eq!(
        width.binding,
        Binding {
            entity: rect,
            property: LightProperty::Width
        }
    );

    assert!(width.set_value(&mut world, 3.25));
    assert_eq!(width.value(&world), Some(3.25));

    let light = world.get::<Light>(rect).unwrap();
    assert_eq!(light.property(LightProperty::Width), Some(3.25));
    assert_eq!(light.property(LightProperty::Height), Some(1.0));
}

#[test]
fn panel_draws_headlessly() {
    let mut world = World::new();
    spawn(&mut world, 0, PointLight::new(0xff9000, 0.5, 10.0, 2.0));
    spawn(&mut world, 1, SpotLight::new(0x78ff00, 0.5, 10.0, PI * 0.1, 0.25, 1.0));

    let mut panel = build(&mut world);
    for section in &mut panel.sections {
        section.collapsed = false;
    }

    let ctx = egui::Context::default();
    let mut changed = false;
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        egui::Window::new(panel.title.clone()).show(ctx, |ui| {
            changed = panel.show(ui, &mut world);
        });
    });

    assert!(!changed);
    let point = panel.section("PointLight").unwrap();
    assert_eq!(point.controls[0].value(&world), Some(0.5));
}
