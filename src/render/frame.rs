use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{LinePrimitive, PathPrimitive, TextPrimitive};

/// Backend-agnostic scene for one chart draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub lines: Vec<LinePrimitive>,
    pub paths: Vec<PathPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            lines: Vec::new(),
            paths: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: PathPrimitive) -> Self {
        self.paths.push(path);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    /// Appends every primitive of `layer` in draw order.
    pub fn extend_from_layer(&mut self, layer: &LayerPrimitives) {
        self.lines.extend_from_slice(&layer.lines);
        self.paths.extend(layer.paths.iter().cloned());
        self.texts.extend(layer.texts.iter().cloned());
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for line in &self.lines {
            line.validate()?;
        }
        for path in &self.paths {
            path.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.paths.is_empty() && self.texts.is_empty()
    }
}

/// Primitives owned by one drawing handle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerPrimitives {
    pub lines: Vec<LinePrimitive>,
    pub paths: Vec<PathPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.paths.is_empty() && self.texts.is_empty()
    }
}
