use super::{DrawTarget, InputSnapshot};

/// `update` runs zero or more times per frame on a fixed timestep; `draw` runs once after them.
pub trait Game {
    fn update(&mut self, input: &InputSnapshot);
    fn draw(&self, target: &mut dyn DrawTarget);
    fn layout(&self, outside_width: u32, outside_height: u32) -> (u32, u32);
}
