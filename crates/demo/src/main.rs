use lumen_editor::EditorLayer;
use lumen_engine::{
    AppConfig, Application, ApplicationBuilder, Result,
    layers::{DeviceLayer, RenderLayer, SceneLayer},
    prelude::*,
};
use std::f32::consts::PI;
use winit::event_loop::EventLoop;

fn spawn_lights(app: &mut Application) {
    app.spawn(
        "Ambient Light",
        (
            Light::from(AmbientLight::new(0xffffff, 0.5)),
            Transform::default(),
        ),
    );

    app.spawn(
        "Directional Light",
        (
            Light::from(DirectionalLight::new(0x00fffc, 0.3)),
            Transform::from_xyz(1.0, 0.25, 0.0),
        ),
    );

    app.spawn(
        "Hemisphere Light",
        (
            Light::from(HemisphereLight::new(0xff0000, 0x0000ff, 0.3)),
            Transform::from_xyz(0.0, 1.0, 0.0),
        ),
    );

    app.spawn(
        "Point Light",
        (
            Light::from(PointLight::new(0xff9000, 0.5, 10.0, 2.0)),
            Transform::from_xyz(1.0, -0.5, 1.0),
        ),
    );

    app.spawn(
        "Rect Area Light",
        (
            Light::from(RectAreaLight::new(0x4e00ff, 2.0, 1.0, 1.0)),
            Transform::from_xyz(-1.5, 0.0, 1.5).looking_at(Point3::origin()),
        ),
    );

    app.spawn(
        "Spot Light",
        (
            Light::from(SpotLight::new(0x78ff00, 0.5, 10.0, PI * 0.1, 0.25, 1.0)),
            Transform::from_xyz(0.0, 2.0, 3.0),
        ),
    );
}

fn spawn_objects(app: &mut Application) {
    let material = StandardMaterial::default().with_roughness(0.4);
    let spin = Spin::new(0.15, 0.1, 0.0);

    app.spawn(
        "Sphere",
        (
            Mesh::sphere(0.5, 32, 32),
            material,
            spin,
            Transform::from_xyz(-1.5, 0.0, 0.0),
        ),
    );

    app.spawn(
        "Cube",
        (
            Mesh::cuboid(0.75, 0.75, 0.75),
            material,
            spin,
            Transform::default(),
        ),
    );

    app.spawn(
        "Torus",
        (
            Mesh::torus(0.3, 0.2, 32, 64),
            material,
            spin,
            Transform::from_xyz(1.5, 0.0, 0.0),
        ),
    );

    app.spawn(
        "Plane",
        (
            Mesh::plane(5.0, 5.0),
            material,
            Transform::from_xyz(0.0, -0.65, 0.0)
                .with_rotation(UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -PI * 0.5)),
        ),
    );
}

fn spawn_camera(app: &mut Application) {
    let position = Point3::new(1.0, 1.0, 2.0);

    // Aspect ratio follows the viewport size
    app.spawn(
        "Camera",
        (
            Camera::perspective(75.0, 0.1, 100.0),
            Transform::from_xyz(position.x, position.y, position.z),
            OrbitController::looking_from(position, Point3::origin()).with_damping(0.05),
            RenderTarget {},
        ),
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_module("lumen", log::LevelFilter::Debug)
        .filter_module("bevy_ecs", log::LevelFilter::Debug)
        .init();

    let event_loop = EventLoop::new()?;

    let config = AppConfig::new("Lights")
        .with_size(1280, 720)
        .with_stats(cfg!(debug_assertions));

    let mut app = ApplicationBuilder::new()
        .with_config(config)
        .add_layer(|context| Ok(Box::new(DeviceLayer::new(context)?)))
        .add_layer(|context| Ok(Box::new(SceneLayer::new(context)?)))
        .add_layer(|context| Ok(Box::new(RenderLayer::new(context)?)))
        .add_layer(|context| Ok(Box::new(EditorLayer::new(context)?)))
        .build();

    spawn_lights(&mut app);
    spawn_objects(&mut app);
    spawn_camera(&mut app);

    event_loop.run_app(&mut app)?;

    Ok(())
}
