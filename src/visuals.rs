//! Point sprite appearance.

/// Blend mode for particle rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard alpha blending.
    Alpha,

    /// Colors are added together; overlapping particles get brighter.
    #[default]
    Additive,
}

impl BlendMode {
    pub fn blend_state(self) -> wgpu::BlendState {
        match self {
            BlendMode::Alpha => wgpu::BlendState::ALPHA_BLENDING,
            BlendMode::Additive => wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            },
        }
    }
}

/// How galaxy particles are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointStyle {
    /// Sprite edge length in world units. Shrinks with distance.
    pub size: f32,
    pub blend: BlendMode,
    /// Additive sprites leave depth alone so they never occlude each other.
    pub depth_write: bool,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            size: 0.15,
            blend: BlendMode::Additive,
            depth_write: false,
        }
    }
}
