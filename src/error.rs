//! Error types for glyph-swarm.
//!
//! The morphing core itself never fails. Errors only come from the edges:
//! decoding images, reading configuration, and bringing up the window and GPU.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading source images.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Failed to decode an image file.
    #[error("failed to decode image '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// Raw pixel data does not match the declared dimensions.
    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    /// The image list is empty, so there is nothing to morph into.
    #[error("no images to display")]
    NoImages,
}

/// Errors that can occur while reading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write the config file.
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid JSON for [`MorphConfig`](crate::MorphConfig).
    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),
    /// A palette entry is not a `#RRGGBB` colour.
    #[error("invalid hex colour '{0}', expected #RRGGBB")]
    HexColor(String),
    /// The palette has no colours.
    #[error("palette must contain at least one colour")]
    EmptyPalette,
    /// The sampling canvas has a zero dimension.
    #[error("canvas must be at least 1x1, got {width}x{height}")]
    CanvasSize { width: u32, height: u32 },
}

/// Errors that can occur while assembling a [`MorphScene`](crate::MorphScene).
#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
}

/// Errors that can occur when running the viewer.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to create event loop.
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// Source images could not be loaded.
    #[error(transparent)]
    Asset(#[from] AssetError),
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The morphing scene could not be assembled.
    #[error(transparent)]
    Scene(#[from] SceneError),
}
