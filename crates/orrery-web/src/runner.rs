use orrery::{
    AnimationClock, BodyCatalog, ControlMessage, ControlQueue, ControlState, Frame, Orrery,
    OrreryConfig, PoseBuffer, ProtocolLayout, Result,
};
use orrery::bridge::protocol::HEADER_FLOATS;

/// Wires the orrery to a frame-driven host.
///
/// Each concrete demo creates a `thread_local!` runner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic state directly.
pub struct OrreryRunner {
    orrery: Orrery,
    control: ControlState,
    queue: ControlQueue,
    clock: AnimationClock,
    buffer: PoseBuffer,
    last_frame: Option<Frame>,
}

impl OrreryRunner {
    pub fn new(catalog: &BodyCatalog, config: OrreryConfig) -> Result<Self> {
        let clock = AnimationClock::new(config.fixed_dt);
        let buffer = PoseBuffer::new(ProtocolLayout::from_config(&config));
        let orrery = Orrery::from_catalog(catalog, config)?;
        Ok(Self {
            orrery,
            control: ControlState::new(),
            queue: ControlQueue::new(),
            clock,
            buffer,
            last_frame: None,
        })
    }

    pub fn from_json(catalog_json: &str, config: OrreryConfig) -> Result<Self> {
        let catalog = BodyCatalog::from_json(catalog_json)?;
        Self::new(&catalog, config)
    }

    /// Queue a control change; it applies at the start of the next frame.
    pub fn push_control(&mut self, message: ControlMessage) {
        self.queue.push(message);
    }

    /// Queue a selection by name. Unknown names are logged and ignored.
    pub fn select(&mut self, name: &str) -> bool {
        match self.orrery.lookup(name) {
            Some(id) => {
                self.queue.push(ControlMessage::Select(Some(id)));
                true
            }
            None => {
                log::warn!("select: unknown body '{name}'");
                false
            }
        }
    }

    /// Run one host frame: apply queued controls, run the due ticks, repack buffers.
    /// Returns the number of ticks run.
    pub fn tick(&mut self, dt: f32) -> u32 {
        self.queue.apply_to(&mut self.control);
        let steps = self.clock.accumulate(dt);
        for _ in 0..steps {
            self.advance();
        }
        if steps > 0 {
            self.buffer.rebuild(&self.orrery, &self.control);
        }
        steps
    }

    /// Run exactly one tick regardless of elapsed time.
    pub fn step_once(&mut self) -> &Frame {
        self.queue.apply_to(&mut self.control);
        self.advance();
        self.buffer.rebuild(&self.orrery, &self.control);
        self.last_frame.get_or_insert_with(Frame::default)
    }

    fn advance(&mut self) {
        self.clock.request_tick();
        self.last_frame = Some(self.orrery.advance_one_tick(&self.control));
    }

    pub fn orrery(&self) -> &Orrery {
        &self.orrery
    }

    pub fn control(&self) -> &ControlState {
        &self.control
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    pub fn tick_count(&self) -> u64 {
        self.clock.ticks()
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn poses_ptr(&self) -> *const f32 {
        self.buffer.poses_ptr()
    }

    pub fn pose_count(&self) -> u32 {
        self.buffer.pose_count()
    }

    pub fn path_vertices_ptr(&self) -> *const f32 {
        self.buffer.path_vertices_ptr()
    }

    pub fn path_vertex_count(&self) -> u32 {
        self.buffer.path_vertex_count() as u32
    }

    /// Index of the selected body, or -1.
    pub fn selected_index(&self) -> i32 {
        self.control
            .selected_target
            .map(|id| id.0 as i32)
            .unwrap_or(-1)
    }

    /// Header section for the current buffers.
    pub fn header(&self) -> [f32; HEADER_FLOATS] {
        let selected = self.control.selected_target.map(|id| id.index());
        self.buffer.layout().header(
            self.tick_count(),
            self.buffer.poses.len(),
            self.buffer.path_vertex_count(),
            selected,
        )
    }

    // ---- Capacity accessors ----

    pub fn max_bodies(&self) -> u32 {
        self.buffer.layout().max_bodies as u32
    }

    pub fn max_path_vertices(&self) -> u32 {
        self.buffer.layout().max_path_vertices as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.buffer.layout().buffer_total_floats as u32
    }
}
