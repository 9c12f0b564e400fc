//! wgpu device and window surface.
//!
//! `Gpu` owns the instance, adapter, device, queue and the configured surface of one window.
//! Frames are acquired with [`Gpu::begin_frame`] and handed back with [`Gpu::submit`].

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
