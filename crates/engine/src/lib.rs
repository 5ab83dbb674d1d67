pub use bevy_ecs::world::World;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use winit::{application::ApplicationHandler, event::WindowEvent, window::Window};

use crate::input::InputState;
pub type Result<T> = anyhow::Result<T>;

pub mod components;
pub mod config;
pub mod input;
pub mod layers;
pub mod prelude;

pub use config::AppConfig;

pub trait Layer: 'static {
    fn frame(&mut self, context: &LayerContext) -> std::result::Result<(), wgpu::SurfaceError>;
    fn detach(&mut self, context: &LayerContext);
    fn event(&mut self, _context: &LayerContext, _event: LayerEvent) {}
}

trait LayerFactory: 'static {
    fn create(&self, context: &LayerContext) -> Result<Box<dyn Layer>>;
}

pub struct LayerContext {
    pub window: Arc<Window>,
    pub world: Arc<Mutex<World>>,
    pub delta_time: Duration,
}

pub enum LayerEvent {
    WindowEvent(Arc<WindowEvent>),
}

pub struct ApplicationBuilder {
    layer_factories: Vec<Box<dyn LayerFactory>>,
    config: AppConfig,
}

impl ApplicationBuilder {
    pub fn new() -> Self {
        Self {
            layer_factories: Vec::new(),
            config: AppConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn add_layer<F>(mut self, factory_fn: F) -> Self
    where
        F: Fn(&LayerContext) -> Result<Box<dyn Layer>> + 'static,
    {
        self.layer_factories
            .push(Box::new(ClosureLayerFactory::new(factory_fn)));
        self
    }

    pub fn build(self) -> Application {
        let world = Arc::new(Mutex::new(World::new()));

        {
            let mut w = world.lock().unwrap();
            w.insert_resource(InputState::new());
            w.insert_resource(self.config.clone());
        }

        Application {
            layer_factories: self.layer_factories,
            state: None,
            world,
            config: self.config,
            next_spawn_order: 0,
        }
    }
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

struct ClosureLayerFactory<F> {
    factory_fn: F,
}

impl<F> ClosureLayerFactory<F> {
    fn new(factory_fn: F) -> Self {
        Self { factory_fn }
    }
}

impl<F> LayerFactory for ClosureLayerFactory<F>
where
    F: Fn(&LayerContext) -> Result<Box<dyn Layer>> + 'static,
{
    fn create(&self, context: &LayerContext) -> Result<Box<dyn Layer>> {
        (self.factory_fn)(context)
    }
}

pub struct Application {
    layer_factories: Vec<Box<dyn LayerFactory>>,
    state: Option<ApplicationState>,
    world: Arc<Mutex<World>>,
    config: AppConfig,
    next_spawn_order: u64,
}

pub struct ApplicationState {
    window: Arc<Window>,
    layers: Vec<Box<dyn Layer>>,
    last_frame_time: Instant,
}

impl Application {
    fn redraw(&mut self) -> std::result::Result<(), wgpu::SurfaceError> {
        let state = match &mut self.state {
            Some(state) => state,
            None => return Ok(()),
        };

        let now = Instant::now();
        let delta_time = now.duration_since(state.last_frame_time);
        state.last_frame_time = now;

        let context = LayerContext {
            window: state.window.clone(),
            world: self.world.clone(),
            delta_time,
        };

        for layer in &mut state.layers {
            layer.frame(&context)?;
        }

        // Per-frame input deltas are consumed by the layers above
        {
            let mut world = self.world.lock().unwrap();
            if let Some(mut input_state) = world.get_resource_mut::<InputState>() {
                input_state.reset_frame();
            }
            world.clear_trackers();
        }

        Ok(())
    }

    /// Spawn a labeled object into the scene.
    ///
    /// Objects remember the order they were spawned in, which is what "first
    /// light of a kind" means to the editor panel.
    pub fn spawn<B: bevy_ecs::bundle::Bundle>(&mut self, label: impl Into<String>, bundle: B) {
        use crate::prelude::*;
        let order = SpawnOrder(self.next_spawn_order);
        self.next_spawn_order += 1;

        let bundle = (
            Tag {
                label: label.into(),
            },
            order,
            bundle,
        );
        self.world.lock().unwrap().spawn(bundle);
    }

    fn create_layers(&self, context: &LayerContext) -> Result<Vec<Box<dyn Layer>>> {
        self.layer_factories
            .iter()
            .map(|factory| factory.create(context))
            .collect()
    }
}

impl ApplicationHandler for Application {
    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.width,
                self.config.height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Unable to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        {
            let mut world = self.world.lock().unwrap();
            if let Some(mut input_state) = world.get_resource_mut::<InputState>() {
                input_state.window_height = window.inner_size().height;
            }
        }

        let context = LayerContext {
            window: window.clone(),
            world: self.world.clone(),
            delta_time: Duration::ZERO,
        };

        let layers = match self.create_layers(&context) {
            Ok(layers) => layers,
            Err(e) => {
                log::error!("Failed to initialize layers: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        log::info!("Initialized {} layers", layers.len());

        self.state = Some(ApplicationState {
            window,
            layers,
            last_frame_time: Instant::now(),
        });
    }

    fn suspended(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        if let Some(state) = &mut self.state {
            let context = LayerContext {
                window: state.window.clone(),
                world: self.world.clone(),
                delta_time: Duration::ZERO,
            };

            for layer in &mut state.layers {
                layer.detach(&context);
            }
        }
        self.state = None;
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        // Handle input events
        {
            use winit::event::{ElementState, MouseScrollDelta};

            let mut world = self.world.lock().unwrap();
            if let Some(mut input_state) = world.get_resource_mut::<InputState>() {
                match &event {
                    WindowEvent::MouseInput { state, button, .. } => match state {
                        ElementState::Pressed => input_state.press_button(*button),
                        ElementState::Released => input_state.release_button(*button),
                    },
                    WindowEvent::Resized(size) => input_state.window_height = size.height,
                    WindowEvent::CursorMoved { position, .. } => {
                        input_state.set_mouse_position(position.x as f32, position.y as f32);
                    }
                    WindowEvent::MouseWheel { delta, .. } => match delta {
                        MouseScrollDelta::LineDelta(_, y) => input_state.add_scroll(*y),
                        MouseScrollDelta::PixelDelta(position) => {
                            input_state.add_scroll(position.y as f32 / 100.0)
                        }
                    },
                    _ => {}
                }
            }
        }

        let event = Arc::new(event);

        match *event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => match self.redraw() {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {}
                Err(e) => {
                    log::error!("Unable to render {}", e);
                }
            },
            _ => {}
        }

        if let Some(state) = &mut self.state {
            let context = LayerContext {
                window: state.window.clone(),
                world: self.world.clone(),
                delta_time: Duration::ZERO,
            };

            for layer in &mut state.layers {
                layer.event(&context, LayerEvent::WindowEvent(event.clone()));
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}
