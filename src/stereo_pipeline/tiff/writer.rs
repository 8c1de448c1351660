use std::io::Write;

use crate::stereo_pipeline::common::error::Result;
use crate::stereo_pipeline::disparity::DisparityImage;

pub trait DisparityWriter {
    fn write_disparity(&self, image: &DisparityImage, output: &mut dyn Write) -> Result<()>;
}
