/// Mock graphics backend for unit tests (no GPU required)
///
/// Device, painter, textures and window share one `MockState`, which keeps
/// a software backbuffer and per-texture pixel arrays so tests can check
/// pixel-exact behavior of capture framebuffers.

use std::cell::RefCell;
use std::rc::Rc;
use glam::UVec2;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::graphics::{
    FramebufferId, FramebufferStatus, GraphicsDevice, Painter, Rect2D, Texture, TextureDesc,
    TextureFlags, TextureId, WindowSize,
};

// ============================================================================
// Shared state
// ============================================================================

pub struct MockState {
    pub window: UVec2,
    pub backbuffer: Vec<u32>,
    pub textures: FxHashMap<TextureId, (UVec2, Vec<u32>)>,
    pub next_texture_id: u32,
    pub next_fbo_id: u32,
    pub supports_fbo: bool,
    pub fail_fbo_creation: bool,
    pub fail_texture_creation: bool,
    /// Allocations left before `create_texture` starts failing
    pub textures_until_failure: Option<u32>,
    pub force_incomplete: bool,
    pub bound_fbo: Option<FramebufferId>,
    pub live_fbos: Vec<FramebufferId>,
    pub attachments: FxHashMap<FramebufferId, TextureId>,
    pub blending: bool,
    pub textures_created: u32,
    pub saved_states: u32,
    pub resolution: Option<UVec2>,
    pub commands: Vec<String>,
}

pub type SharedMockState = Rc<RefCell<MockState>>;

impl MockState {
    fn new(window: UVec2, supports_fbo: bool) -> Self {
        Self {
            window,
            backbuffer: vec![0; (window.x * window.y) as usize],
            textures: FxHashMap::default(),
            next_texture_id: 1,
            next_fbo_id: 1,
            supports_fbo,
            fail_fbo_creation: false,
            fail_texture_creation: false,
            textures_until_failure: None,
            force_incomplete: false,
            bound_fbo: None,
            live_fbos: Vec::new(),
            attachments: FxHashMap::default(),
            blending: true,
            textures_created: 0,
            saved_states: 0,
            resolution: None,
            commands: Vec::new(),
        }
    }

    /// Fill `rect` of the backbuffer with `color` (simulates draw calls)
    pub fn paint_screen(&mut self, rect: Rect2D, color: u32) {
        let window = self.window;
        for y in rect.y..rect.y + rect.height as i32 {
            for x in rect.x..rect.x + rect.width as i32 {
                if x >= 0 && y >= 0 && (x as u32) < window.x && (y as u32) < window.y {
                    self.backbuffer[(y as u32 * window.x + x as u32) as usize] = color;
                }
            }
        }
    }

    /// Fill the backbuffer with a deterministic pattern
    pub fn fill_pattern(&mut self) {
        for (i, px) in self.backbuffer.iter_mut().enumerate() {
            *px = 0xFF00_0000 | (i as u32).wrapping_mul(2_654_435_761) >> 8;
        }
    }

    pub fn texture_pixels(&self, id: TextureId) -> Option<&Vec<u32>> {
        self.textures.get(&id).map(|(_, pixels)| pixels)
    }

    pub fn count_commands(&self, name: &str) -> usize {
        self.commands.iter().filter(|c| c.as_str() == name).count()
    }
}

pub fn mock_state(window: UVec2, supports_fbo: bool) -> SharedMockState {
    Rc::new(RefCell::new(MockState::new(window, supports_fbo)))
}

// ============================================================================
// Mock Texture
// ============================================================================

pub struct MockTexture {
    pub id: TextureId,
    pub size: UVec2,
    pub flags: TextureFlags,
    state: SharedMockState,
}

impl Texture for MockTexture {
    fn id(&self) -> TextureId {
        self.id
    }

    fn size(&self) -> UVec2 {
        self.size
    }

    fn flags(&self) -> TextureFlags {
        self.flags
    }

    fn set_smooth(&mut self, smooth: bool) {
        self.flags.set(TextureFlags::SMOOTH, smooth);
    }

    fn copy_from_screen(&mut self, rect: Rect2D) {
        let mut state = self.state.borrow_mut();
        state.commands.push("copy_from_screen".to_string());
        let window = state.window;
        let mut copied = vec![0u32; (self.size.x * self.size.y) as usize];
        if let Some((_, pixels)) = state.textures.get(&self.id) {
            copied.copy_from_slice(pixels);
        }
        for y in 0..rect.height.min(self.size.y) {
            for x in 0..rect.width.min(self.size.x) {
                let sx = rect.x + x as i32;
                let sy = rect.y + y as i32;
                if sx >= 0 && sy >= 0 && (sx as u32) < window.x && (sy as u32) < window.y {
                    copied[(y * self.size.x + x) as usize] =
                        state.backbuffer[(sy as u32 * window.x + sx as u32) as usize];
                }
            }
        }
        state.textures.insert(self.id, (self.size, copied));
    }
}

impl Drop for MockTexture {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.textures.remove(&self.id);
        }
    }
}

// ============================================================================
// Mock Device
// ============================================================================

pub struct MockDevice {
    pub state: SharedMockState,
}

impl GraphicsDevice for MockDevice {
    fn supports_framebuffers(&self) -> bool {
        self.state.borrow().supports_fbo
    }

    fn create_framebuffer(&mut self) -> Result<FramebufferId> {
        let mut state = self.state.borrow_mut();
        state.commands.push("create_framebuffer".to_string());
        if state.fail_fbo_creation {
            return Err(Error::BackendError("glGenFramebuffers returned 0".to_string()));
        }
        let id = FramebufferId(state.next_fbo_id);
        state.next_fbo_id += 1;
        state.live_fbos.push(id);
        Ok(id)
    }

    fn destroy_framebuffer(&mut self, id: FramebufferId) {
        let mut state = self.state.borrow_mut();
        state.commands.push("destroy_framebuffer".to_string());
        state.live_fbos.retain(|fbo| *fbo != id);
        state.attachments.remove(&id);
    }

    fn bind_framebuffer(&mut self, id: Option<FramebufferId>) {
        let mut state = self.state.borrow_mut();
        state.commands.push("bind_framebuffer".to_string());
        state.bound_fbo = id;
    }

    fn attach_color_texture(&mut self, id: FramebufferId, texture: &dyn Texture) {
        let mut state = self.state.borrow_mut();
        state.commands.push("attach_color_texture".to_string());
        state.attachments.insert(id, texture.id());
    }

    fn framebuffer_status(&self, id: FramebufferId) -> FramebufferStatus {
        let state = self.state.borrow();
        if state.force_incomplete || state.bound_fbo != Some(id) || !state.attachments.contains_key(&id) {
            FramebufferStatus::Incomplete("incomplete attachment".to_string())
        } else {
            FramebufferStatus::Complete
        }
    }

    fn create_texture(&mut self, desc: TextureDesc) -> Result<Box<dyn Texture>> {
        let mut state = self.state.borrow_mut();
        if state.fail_texture_creation || state.textures_until_failure == Some(0) {
            return Err(Error::OutOfMemory);
        }
        if let Some(left) = state.textures_until_failure.as_mut() {
            *left -= 1;
        }
        let id = TextureId(state.next_texture_id);
        state.next_texture_id += 1;
        state.textures_created += 1;
        state.commands.push("create_texture".to_string());
        state.textures.insert(id, (desc.size(), vec![0; (desc.width * desc.height) as usize]));
        Ok(Box::new(MockTexture {
            id,
            size: desc.size(),
            flags: desc.flags,
            state: self.state.clone(),
        }))
    }

    fn set_blending(&mut self, enabled: bool) {
        let mut state = self.state.borrow_mut();
        state.commands.push(format!("set_blending({})", enabled));
        state.blending = enabled;
    }
}

// ============================================================================
// Mock Painter
// ============================================================================

pub struct MockPainter {
    pub state: SharedMockState,
}

impl Painter for MockPainter {
    fn save_and_reset_state(&mut self) {
        let mut state = self.state.borrow_mut();
        state.saved_states += 1;
        state.commands.push("save_and_reset_state".to_string());
    }

    fn restore_saved_state(&mut self) {
        let mut state = self.state.borrow_mut();
        assert!(state.saved_states > 0, "restore without save");
        state.saved_states -= 1;
        state.commands.push("restore_saved_state".to_string());
    }

    fn set_resolution(&mut self, resolution: UVec2) {
        let mut state = self.state.borrow_mut();
        state.resolution = Some(resolution);
        state.commands.push("set_resolution".to_string());
    }

    /// Nearest-neighbor copy; with blending on, fully transparent (0) source
    /// pixels leave the destination untouched.
    fn draw_textured_rect(&mut self, dest: Rect2D, texture: &dyn Texture, src: Rect2D) {
        let mut state = self.state.borrow_mut();
        state.commands.push("draw_textured_rect".to_string());
        if dest.is_empty() || src.is_empty() {
            return;
        }
        let Some((tex_size, source)) = state.textures.get(&texture.id()).cloned() else {
            return;
        };
        let blending = state.blending;

        let target_texture = state.bound_fbo.and_then(|fbo| state.attachments.get(&fbo).copied());
        let (target_size, mut target) = match target_texture {
            Some(id) => match state.textures.get(&id) {
                Some((size, pixels)) => (*size, pixels.clone()),
                None => return,
            },
            None => (state.window, state.backbuffer.clone()),
        };

        for dy in 0..dest.height {
            for dx in 0..dest.width {
                let sx = src.x as i64 + (dx as i64 * src.width as i64) / dest.width as i64;
                let sy = src.y as i64 + (dy as i64 * src.height as i64) / dest.height as i64;
                let tx = dest.x as i64 + dx as i64;
                let ty = dest.y as i64 + dy as i64;
                if sx < 0 || sy < 0 || sx >= tex_size.x as i64 || sy >= tex_size.y as i64 {
                    continue;
                }
                if tx < 0 || ty < 0 || tx >= target_size.x as i64 || ty >= target_size.y as i64 {
                    continue;
                }
                let pixel = source[(sy as u32 * tex_size.x + sx as u32) as usize];
                if blending && pixel == 0 {
                    continue;
                }
                target[(ty as u32 * target_size.x + tx as u32) as usize] = pixel;
            }
        }

        match target_texture {
            Some(id) => {
                state.textures.insert(id, (target_size, target));
            }
            None => state.backbuffer = target,
        }
    }

    fn reset_color(&mut self) {
        self.state.borrow_mut().commands.push("reset_color".to_string());
    }
}

// ============================================================================
// Mock Window
// ============================================================================

pub struct MockWindow {
    pub state: SharedMockState,
}

impl WindowSize for MockWindow {
    fn window_size(&self) -> UVec2 {
        self.state.borrow().window
    }
}
