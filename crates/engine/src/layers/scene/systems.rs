use crate::prelude::*;

pub fn advance_clock(time: Res<Time>, mut elapsed: ResMut<Elapsed>) {
    elapsed.0 += time.0;
}

pub fn spin_objects(elapsed: Res<Elapsed>, mut query: Query<(&Spin, &mut Transform)>) {
    let seconds = elapsed.0.as_secs_f32();
    for (spin, mut transform) in query.iter_mut() {
        transform.rotation = spin.rotation_at(seconds);
    }
}

/// Feed pointer input into orbit controllers and move their cameras.
/// Input is ignored while the pointer is over the editor UI.
pub fn orbit_cameras(
    input: Res<InputState>,
    mut query: Query<(&mut OrbitController, &mut Camera, &mut Transform)>,
) {
    for (mut controller, mut camera, mut transform) in query.iter_mut() {
        if !input.pointer_over_ui {
            let (dx, dy) = input.mouse_delta;
            if dx != 0.0 || dy != 0.0 {
                controller.rotate(dx, dy, input.window_height as f32);
            }
            if input.scroll_delta != 0.0 {
                controller.zoom(input.scroll_delta);
            }
        }

        let eye = controller.update();

        if (transform.position - eye).norm() > 1e-6 {
            transform.position = eye;
        }
        if camera.target != controller.target {
            camera.target = controller.target;
        }
    }
}
