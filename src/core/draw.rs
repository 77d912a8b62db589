use glam::Vec2;

/// A single canvas operation produced by one render pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface.
    Clear { width: f32, height: f32 },
    /// Straight connection line between two particles.
    Line {
        from: Vec2,
        to: Vec2,
        alpha: f32,
        width: f32,
    },
    /// Filled particle disc.
    Circle { center: Vec2, radius: f32, alpha: f32 },
}

/// Ordered draw commands for one frame. The buffer is reused across frames.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    #[inline]
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    #[inline]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
