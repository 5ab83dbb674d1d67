use crate::layers::scene::systems::{advance_clock, orbit_cameras, spin_objects};
use crate::prelude::*;

use bevy_ecs::schedule::Schedule;

/// Drives the scene clock, spinning objects and orbit cameras
pub struct SceneLayer {
    schedule: Schedule,
}

impl SceneLayer {
    pub fn new(context: &LayerContext) -> Result<Self> {
        {
            let mut world = context.world.lock().unwrap();
            world.init_resource::<Time>();
            world.init_resource::<Elapsed>();
        }

        let mut schedule = Schedule::default();
        schedule.add_systems((advance_clock, (spin_objects, orbit_cameras)).chain());

        Ok(Self { schedule })
    }
}

impl Layer for SceneLayer {
    fn frame(&mut self, context: &LayerContext) -> std::result::Result<(), wgpu::SurfaceError> {
        let mut world = context.world.lock().unwrap();
        world.insert_resource(Time(context.delta_time));

        self.schedule.run(&mut world);

        Ok(())
    }

    fn detach(&mut self, _context: &LayerContext) {}
}
