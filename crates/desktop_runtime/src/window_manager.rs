//! Window collection, lifecycle transitions, geometry, and stacking order.
//!
//! Stacking uses a per-session counter: every `open`, `focus`, `maximize` and `restore` hands
//! the target `counter + 1`, so z-indices are never shared or reused. The active window is the
//! highest-stacked window that is not minimized.
//!
//! Maximize is a state flag. It never rewrites `rect`, so a maximize/restore cycle returns the
//! exact geometry the window had before; the presentation layer sizes maximized windows to the
//! viewport.

use crate::{
    config::DesktopConfig,
    model::{OpenWindowRequest, WindowId, WindowRecord, WindowRect, WindowSize, WindowState},
    use_cases::WindowManagerPort,
};

#[derive(Debug, Clone, PartialEq)]
pub struct WindowManager {
    windows: Vec<WindowRecord>,
    next_window_id: u64,
    z_counter: u32,
    default_size: WindowSize,
    default_min_size: WindowSize,
    cascade_origin: (i32, i32),
    cascade_step: i32,
    cascade_slots: u32,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new(&DesktopConfig::default())
    }
}

impl WindowManager {
    pub fn new(config: &DesktopConfig) -> Self {
        Self {
            windows: Vec::new(),
            next_window_id: 1,
            z_counter: 0,
            default_size: config.default_window_size,
            default_min_size: config.default_min_size,
            cascade_origin: (config.cascade_origin_x, config.cascade_origin_y),
            cascade_step: config.cascade_step,
            cascade_slots: config.cascade_slots.max(1),
        }
    }

    /// Highest-stacked window that is not minimized.
    pub fn active_window(&self) -> Option<&WindowRecord> {
        self.windows
            .iter()
            .filter(|w| !w.is_minimized())
            .max_by_key(|w| w.z_index)
    }

    pub fn active_window_id(&self) -> Option<WindowId> {
        self.active_window().map(|w| w.id)
    }

    /// Windows ordered back-to-front.
    pub fn stacking_order(&self) -> Vec<WindowId> {
        let mut ordered: Vec<&WindowRecord> = self.windows.iter().collect();
        ordered.sort_by_key(|w| w.z_index);
        ordered.into_iter().map(|w| w.id).collect()
    }

    /// Windows whose payload references `node_id`.
    pub fn windows_for_node(&self, node_id: crate::model::NodeId) -> Vec<&WindowRecord> {
        self.windows
            .iter()
            .filter(|w| w.node_ref() == Some(node_id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    fn next_window_id(&mut self) -> WindowId {
        let id = WindowId(self.next_window_id);
        self.next_window_id = self.next_window_id.saturating_add(1);
        id
    }

    fn allocate_z(&mut self) -> u32 {
        self.z_counter = self.z_counter.saturating_add(1);
        self.z_counter
    }

    fn top_z(&self) -> u32 {
        self.windows.iter().map(|w| w.z_index).max().unwrap_or(0)
    }

    fn cascade_rect(&self, window_id: WindowId) -> WindowRect {
        let slot = window_id.0.saturating_sub(1) % u64::from(self.cascade_slots);
        let slot = i32::try_from(slot).unwrap_or(i32::MAX);
        // Host-supplied tunables are unchecked; saturate instead of overflowing.
        let offset = slot.saturating_mul(self.cascade_step);
        WindowRect {
            x: self.cascade_origin.0.saturating_add(offset),
            y: self.cascade_origin.1.saturating_add(offset),
            w: self.default_size.w,
            h: self.default_size.h,
        }
    }

    fn find_mut(&mut self, window_id: WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == window_id)
    }

    fn raise(&mut self, window_id: WindowId) -> bool {
        let top = self.top_z();
        let Some(current) = self.get_by_id(window_id).map(|w| w.z_index) else {
            return false;
        };
        if current == top {
            return true;
        }
        let z_index = self.allocate_z();
        if let Some(window) = self.find_mut(window_id) {
            window.z_index = z_index;
        }
        true
    }
}

impl WindowManagerPort for WindowManager {
    fn open(&mut self, request: OpenWindowRequest) -> WindowRecord {
        let id = self.next_window_id();
        let min_size = request.min_size.unwrap_or(self.default_min_size);
        let rect = request
            .rect
            .unwrap_or_else(|| self.cascade_rect(id))
            .clamped_min(min_size);
        let z_index = self.allocate_z();
        let record = WindowRecord {
            id,
            title: request
                .title
                .unwrap_or_else(|| request.content.title().to_string()),
            content: request.content,
            icon: request
                .icon
                .or_else(|| Some(request.content.icon_id().to_string())),
            fc_icon: request.fc_icon,
            content_data: request.content_data,
            rect,
            min_size,
            is_open: true,
            state: WindowState::Normal,
            z_index,
            can_maximize: request.can_maximize,
        };
        self.windows.push(record.clone());
        record
    }

    fn close(&mut self, window_id: WindowId) -> bool {
        let before = self.windows.len();
        self.windows.retain(|w| w.id != window_id);
        self.windows.len() != before
    }

    fn minimize(&mut self, window_id: WindowId) -> bool {
        let Some(window) = self.find_mut(window_id) else {
            return false;
        };
        window.state = WindowState::Minimized;
        true
    }

    fn maximize(&mut self, window_id: WindowId) -> bool {
        let Some(window) = self.find_mut(window_id) else {
            return false;
        };
        if !window.maximizable() {
            return false;
        }
        window.state = WindowState::Maximized;
        self.raise(window_id)
    }

    fn restore(&mut self, window_id: WindowId) -> bool {
        let Some(window) = self.find_mut(window_id) else {
            return false;
        };
        if window.state == WindowState::Normal {
            return false;
        }
        window.state = WindowState::Normal;
        self.raise(window_id)
    }

    fn focus(&mut self, window_id: WindowId) -> bool {
        self.raise(window_id)
    }

    fn move_window(&mut self, window_id: WindowId, x: i32, y: i32) -> bool {
        let Some(window) = self.find_mut(window_id) else {
            return false;
        };
        window.rect = window.rect.moved_to(x, y);
        true
    }

    fn resize(&mut self, window_id: WindowId, w: i32, h: i32) -> bool {
        let Some(window) = self.find_mut(window_id) else {
            return false;
        };
        window.rect = WindowRect { w, h, ..window.rect }.clamped_min(window.min_size);
        true
    }

    fn get_all(&self) -> &[WindowRecord] {
        &self.windows
    }

    fn get_by_id(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }
}
