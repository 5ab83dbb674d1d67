use lumen_engine::prelude::*;

use super::Control;

impl Control {
    /// Current value of the bound property, or `None` if the light is gone
    /// or has no such property
    pub fn value(&self, world: &World) -> Option<f32> {
        world
            .get::<Light>(self.binding.entity)?
            .property(self.binding.property)
    }

    /// Write `value` to the bound property as is. Range limits are the
    /// slider's business, not the binding's.
    pub fn set_value(&self, world: &mut World, value: f32) -> bool {
        if self.value(world).is_none() {
            return false;
        }

        world
            .get_mut::<Light>(self.binding.entity)
            .is_some_and(|mut light| light.set_property(self.binding.property, value))
    }
}
