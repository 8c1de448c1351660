//! Monocular processing: turns one raw camera frame into mono/color views

pub mod cpu_mono;
mod processor;

pub use cpu_mono::CpuMonoProcessor;
pub use processor::{MonoFlags, MonoProcessor};
