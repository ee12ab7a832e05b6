//! Vector outlines of laid-out text.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    QuadTo { cx: f32, cy: f32, x: f32, y: f32 },
    CubicTo { c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32 },
    Close,
}

impl PathCommand {
    fn translated(self, dx: f32, dy: f32) -> Self {
        match self {
            PathCommand::MoveTo { x, y } => PathCommand::MoveTo { x: x + dx, y: y + dy },
            PathCommand::LineTo { x, y } => PathCommand::LineTo { x: x + dx, y: y + dy },
            PathCommand::QuadTo { cx, cy, x, y } => PathCommand::QuadTo {
                cx: cx + dx,
                cy: cy + dy,
                x: x + dx,
                y: y + dy,
            },
            PathCommand::CubicTo { c1x, c1y, c2x, c2y, x, y } => PathCommand::CubicTo {
                c1x: c1x + dx,
                c1y: c1y + dy,
                c2x: c2x + dx,
                c2y: c2y + dy,
                x: x + dx,
                y: y + dy,
            },
            PathCommand::Close => PathCommand::Close,
        }
    }
}

/// A sequence of path commands in pixel space (y grows downwards).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::MoveTo { x, y });
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::LineTo { x, y });
    }

    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.commands.push(PathCommand::QuadTo { cx, cy, x, y });
    }

    pub fn cubic_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        self.commands.push(PathCommand::CubicTo { c1x, c1y, c2x, c2y, x, y });
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    /// Appends every command of `other`, offset by `(dx, dy)`.
    pub fn append_translated(&mut self, other: &Path, dx: f32, dy: f32) {
        self.commands
            .extend(other.commands.iter().map(|c| c.translated(dx, dy)));
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
