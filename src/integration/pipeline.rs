//! AnalysisPipeline for combining pose estimation with motion analysis.

use crate::config::EngineConfig;
use crate::engine::{FrameAnalysis, MotionEngine};
use crate::error::ConfigError;
use crate::tracker::Frame;

use super::PoseSource;

/// A combined analyzer that bundles a pose estimator with the motion engine.
pub struct AnalysisPipeline<S: PoseSource> {
    source: S,
    engine: MotionEngine,
}

impl<S: PoseSource> AnalysisPipeline<S> {
    /// Create a new pipeline with the given pose source and engine config.
    pub fn new(source: S, config: EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            source,
            engine: MotionEngine::new(config)?,
        })
    }

    /// Create a new pipeline with the default engine configuration.
    pub fn with_default_config(source: S) -> Self {
        Self {
            source,
            engine: MotionEngine::default(),
        }
    }

    /// Estimate the pose in `frame` and advance the engine with it.
    ///
    /// An estimation error is returned before the engine is touched.
    pub fn process_frame(
        &mut self,
        frame: &Frame<'_>,
        timestamp: f64,
    ) -> Result<FrameAnalysis, S::Error> {
        let skeleton = self.source.estimate(frame)?;
        Ok(self.engine.advance(skeleton.as_ref(), frame, timestamp))
    }

    /// Get a reference to the underlying pose source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying pose source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Get a reference to the underlying engine.
    pub fn engine(&self) -> &MotionEngine {
        &self.engine
    }

    /// Get a mutable reference to the underlying engine.
    pub fn engine_mut(&mut self) -> &mut MotionEngine {
        &mut self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Joint, Skeleton};

    struct MockSource {
        skeleton: Option<Skeleton>,
    }

    impl PoseSource for MockSource {
        type Error = std::convert::Infallible;

        fn estimate(&mut self, _frame: &Frame<'_>) -> Result<Option<Skeleton>, Self::Error> {
            Ok(self.skeleton.clone())
        }
    }

    struct FailingSource;

    impl PoseSource for FailingSource {
        type Error = &'static str;

        fn estimate(&mut self, _frame: &Frame<'_>) -> Result<Option<Skeleton>, Self::Error> {
            Err("model not loaded")
        }
    }

    #[test]
    fn test_analysis_pipeline() {
        let source = MockSource {
            skeleton: Some(
                Skeleton::new()
                    .with(Joint::LeftHip, 0.45, 0.62)
                    .with(Joint::LeftKnee, 0.45, 0.60),
            ),
        };
        let data = vec![0u8; 64 * 64 * 3];
        let frame = Frame::packed(&data, 64, 64, 3).unwrap();

        let mut pipeline = AnalysisPipeline::with_default_config(source);
        let analysis = pipeline.process_frame(&frame, 0.0).unwrap();

        let verdict = analysis.verdict.unwrap();
        assert!(!verdict.is_good);
        assert_eq!(analysis.frame_index, 1);
        assert_eq!(pipeline.engine().frame_count(), 1);
    }

    #[test]
    fn test_source_error_skips_engine() {
        let data = vec![0u8; 8 * 8 * 3];
        let frame = Frame::packed(&data, 8, 8, 3).unwrap();

        let mut pipeline = AnalysisPipeline::with_default_config(FailingSource);
        assert_eq!(pipeline.process_frame(&frame, 0.0), Err("model not loaded"));
        assert_eq!(pipeline.engine().frame_count(), 0);
    }
}
