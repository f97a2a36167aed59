use rooftop_engine::{
    build_render_buffer, snapshot, Camera, FrameClock, FrameSnapshot, InputQueue, KeyBindings,
    KeyState, Level, ProtocolLayout, RenderBuffer, SharedFrame, World, WorldConfig,
};

/// Drives the world from host callbacks.
///
/// The browser page owns one runner inside a `thread_local!` and forwards
/// key events and animation-frame ticks to it through the free functions in
/// `lib.rs`, because wasm-bindgen cannot export a struct holding the world
/// by reference.
pub struct GameRunner {
    world: World,
    clock: FrameClock,
    bindings: KeyBindings,
    keys: KeyState,
    input: InputQueue,
    camera: Camera,
    render_buffer: RenderBuffer,
    shared: SharedFrame,
    last_frame: Option<FrameSnapshot>,
}

impl GameRunner {
    pub fn new(config: WorldConfig) -> Self {
        let clock = FrameClock::new(config.fixed_dt);
        let camera = Camera::new(config.physics.world_width, config.physics.world_height);
        let mut world = World::new(config);
        let level = Level::rooftops(world.config());
        world.load_level(&level);

        let mut runner = Self {
            world,
            clock,
            bindings: KeyBindings::default(),
            keys: KeyState::new(),
            input: InputQueue::new(),
            camera: camera.with_level_width(level.width()),
            render_buffer: RenderBuffer::new(),
            shared: SharedFrame::new(ProtocolLayout::default()),
            last_frame: None,
        };
        runner.publish(Vec::new());
        runner
    }

    /// Replace the current level with one parsed from JSON.
    pub fn load_level(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let level = Level::from_json(json)?;
        self.world.load_level(&level);
        self.reset_view(level.width());
        self.publish(Vec::new());
        Ok(())
    }

    pub fn set_bindings(&mut self, json: &str) -> Result<(), serde_json::Error> {
        self.bindings = KeyBindings::from_json(json)?;
        self.keys.clear();
        Ok(())
    }

    pub fn key_down(&mut self, code: &str) {
        if let Some(event) = self.bindings.press(code) {
            self.input.push(event);
        }
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(event) = self.bindings.release(code) {
            self.input.push(event);
        }
    }

    /// Release every held key, e.g. when the page loses focus.
    pub fn release_all(&mut self) {
        self.input.drain();
        self.keys.clear();
    }

    pub fn restart(&mut self) {
        self.world.restart();
        let width = self.world.level().map(|l| l.width());
        self.reset_view(width.unwrap_or(self.world.physics().world_width));
        self.publish(Vec::new());
        log::info!("Game restarted");
    }

    /// Run one host frame: fold input, step the world as many fixed frames
    /// as `dt` covers, then refresh the camera and shared buffer.
    pub fn tick(&mut self, dt: f32) {
        for event in self.input.drain() {
            self.keys.apply(event);
        }

        let steps = self.clock.advance(dt);
        let input = self.keys.snapshot();
        for _ in 0..steps {
            self.world.step(&input);
        }

        let events = self.world.drain_events();
        self.publish(events);
    }

    fn reset_view(&mut self, level_width: f32) {
        self.clock.reset();
        self.keys.clear();
        self.camera.reset();
        self.camera.set_level_width(level_width);
    }

    fn publish(&mut self, events: Vec<rooftop_engine::WorldEvent>) {
        self.camera.follow(self.world.player.body.pos);
        let frame = snapshot(&self.world, &self.camera);
        build_render_buffer(&frame, &mut self.render_buffer);
        self.shared.write(&frame, &self.render_buffer, &events);
        self.last_frame = Some(frame);
    }

    // ---- Accessors for host reads ----

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.shared.as_ptr()
    }

    pub fn buffer_len(&self) -> u32 {
        self.shared.layout().buffer_total_floats as u32
    }

    pub fn hud_json(&self) -> String {
        self.last_frame
            .as_ref()
            .and_then(|frame| match serde_json::to_string(&frame.hud) {
                Ok(json) => Some(json),
                Err(err) => {
                    log::warn!("HUD serialization failed: {}", err);
                    None
                }
            })
            .unwrap_or_else(|| "{}".to_string())
    }

    pub fn frame_json(&self) -> String {
        self.last_frame
            .as_ref()
            .and_then(|frame| frame.to_json().ok())
            .unwrap_or_else(|| "{}".to_string())
    }

    pub fn world_width(&self) -> f32 {
        self.world.physics().world_width
    }

    pub fn world_height(&self) -> f32 {
        self.world.physics().world_height
    }
}
