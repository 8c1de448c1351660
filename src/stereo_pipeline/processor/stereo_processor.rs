use tracing::{info, instrument};

use crate::stereo_pipeline::{
    camera::StereoCalibration,
    common::error::{Result, StereoError, StereoWarning},
    config::StereoConfig,
    disparity::{DisparityImage, normalize_disparity},
    image::{ColorImage, GrayImage, RawImage},
    matching::{CpuBlockMatcher, StereoMatcher},
    mono::{CpuMonoProcessor, MonoProcessor},
    points::{SparsePointCloud, StructuredPointCloud, build_sparse_cloud, build_structured_cloud},
    processor::{OutputFlags, StereoImageSet, StereoWorkspace},
};

pub struct StereoProcessor<M: StereoMatcher, P: MonoProcessor> {
    matcher: M,
    mono: P,
    config: StereoConfig,
}

impl StereoProcessor<CpuBlockMatcher, CpuMonoProcessor> {
    pub fn new(config: StereoConfig) -> Result<Self> {
        Ok(Self {
            matcher: CpuBlockMatcher::new(config.matcher.clone())?,
            mono: CpuMonoProcessor::new(),
            config,
        })
    }
}

impl<M: StereoMatcher, P: MonoProcessor> StereoProcessor<M, P> {
    pub fn with_custom(matcher: M, mono: P, config: StereoConfig) -> Self {
        Self {
            matcher,
            mono,
            config,
        }
    }

    fn validate_pair(&self, left: &GrayImage, right: &GrayImage) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        let (width, height) = left.dimensions();
        if width == 0 || height == 0 {
            return Err(StereoError::InvalidDimensions(width, height));
        }

        if right.dimensions() != left.dimensions() {
            return Err(StereoError::DimensionMismatch {
                expected: left.dimensions(),
                actual: right.dimensions(),
            });
        }

        Ok(())
    }

    /// Runs the pipeline on one raw stereo pair.
    ///
    /// `flags` is expanded with its prerequisites first. A failure of either
    /// monocular stage aborts the call before any stereo stage runs.
    #[instrument(skip_all, fields(flags = flags.bits()))]
    pub fn process<C: StereoCalibration + ?Sized>(
        &self,
        left_raw: &RawImage,
        right_raw: &RawImage,
        model: &C,
        workspace: &mut StereoWorkspace,
        flags: OutputFlags,
    ) -> Result<StereoImageSet> {
        let flags = flags.expand();
        info!("Starting stereo processing");

        let left = {
            let _span = tracing::info_span!("mono_left").entered();
            self.mono
                .process(left_raw, model.left(), flags.left())
                .map_err(|e| StereoError::Upstream {
                    side: "left",
                    reason: e.to_string(),
                })?
        };

        let right = {
            let _span = tracing::info_span!("mono_right").entered();
            self.mono
                .process(right_raw, model.right(), flags.right())
                .map_err(|e| StereoError::Upstream {
                    side: "right",
                    reason: e.to_string(),
                })?
        };

        let mut output = StereoImageSet {
            left,
            right,
            ..Default::default()
        };

        if !flags.contains(OutputFlags::DISPARITY) {
            return Ok(output);
        }

        let disparity = {
            let _span = tracing::info_span!("disparity").entered();
            let left_rect = output.left.rect.as_ref().ok_or_else(|| StereoError::Upstream {
                side: "left",
                reason: "rectified image was not produced".to_string(),
            })?;
            let right_rect = output.right.rect.as_ref().ok_or_else(|| StereoError::Upstream {
                side: "right",
                reason: "rectified image was not produced".to_string(),
            })?;
            self.process_disparity(left_rect, right_rect, model, workspace)?
        };

        if flags.intersects(OutputFlags::POINT_CLOUD | OutputFlags::POINT_CLOUD2) {
            let color = output.left.rect_color.as_ref().ok_or_else(|| StereoError::Upstream {
                side: "left",
                reason: "rectified color image was not produced".to_string(),
            })?;

            if flags.contains(OutputFlags::POINT_CLOUD) {
                let _span = tracing::info_span!("point_cloud").entered();
                output.points =
                    Some(self.process_points(&disparity, color, model, workspace, &mut output.warnings)?);
            }

            if flags.contains(OutputFlags::POINT_CLOUD2) {
                let _span = tracing::info_span!("point_cloud2").entered();
                output.points2 =
                    Some(self.process_points2(&disparity, color, model, workspace, &mut output.warnings)?);
            }
        }

        info!(
            width = disparity.width,
            height = disparity.height,
            warnings = output.warnings.len(),
            "Stereo processing complete"
        );
        output.disparity = Some(disparity);
        Ok(output)
    }

    /// Matches a rectified pair and normalizes the result to a [`DisparityImage`]
    pub fn process_disparity<C: StereoCalibration + ?Sized>(
        &self,
        left_rect: &GrayImage,
        right_rect: &GrayImage,
        model: &C,
        workspace: &mut StereoWorkspace,
    ) -> Result<DisparityImage> {
        self.validate_pair(left_rect, right_rect)?;
        self.matcher
            .compute(left_rect, right_rect, &mut workspace.raw_disparity)?;
        Ok(normalize_disparity(
            &workspace.raw_disparity,
            self.matcher.disparity_scale(),
            model,
        ))
    }

    /// Reprojects `disparity` and keeps the valid points
    pub fn process_points<C: StereoCalibration + ?Sized>(
        &self,
        disparity: &DisparityImage,
        color: &ColorImage,
        model: &C,
        workspace: &mut StereoWorkspace,
        warnings: &mut Vec<StereoWarning>,
    ) -> Result<SparsePointCloud> {
        model.unproject(disparity, &mut workspace.dense_points);
        build_sparse_cloud(&workspace.dense_points, color, warnings)
    }

    /// Reprojects `disparity` into one record per pixel
    pub fn process_points2<C: StereoCalibration + ?Sized>(
        &self,
        disparity: &DisparityImage,
        color: &ColorImage,
        model: &C,
        workspace: &mut StereoWorkspace,
        warnings: &mut Vec<StereoWarning>,
    ) -> Result<StructuredPointCloud> {
        model.unproject(disparity, &mut workspace.dense_points);
        build_structured_cloud(&workspace.dense_points, color, warnings)
    }

    pub fn config(&self) -> &StereoConfig {
        &self.config
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }
}
