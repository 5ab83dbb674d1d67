mod editor;
pub mod panel;

pub use editor::EditorLayer;
pub use panel::{
    Binding, Control, LIGHT_DESCRIPTORS, LightDescriptor, LightRegistry, Panel, PropertyControl,
    Section, SliderRange, build_light_panel,
};
