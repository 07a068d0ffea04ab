#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Camera {
    pub(crate) x: f64,
    pub(crate) y: f64,
}

impl Camera {
    pub(crate) fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub(crate) fn center_on(
        &mut self,
        target_x: f64,
        target_y: f64,
        _screen_width: f64,
        screen_height: f64,
    ) {
        // Half the screen height on both axes.
        self.x = -target_x + screen_height / 2.0;
        self.y = -target_y + screen_height / 2.0;
    }

    pub(crate) fn constrain(
        &mut self,
        world_width: f64,
        world_height: f64,
        screen_width: f64,
        screen_height: f64,
    ) {
        self.x = self.x.min(0.0);
        self.y = self.y.min(0.0);

        // Applied last, so it wins when the world is smaller than the screen.
        self.x = self.x.max(screen_width - world_width);
        self.y = self.y.max(screen_height - world_height);
    }

    pub(crate) fn offset(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}
