pub mod analyzers;
pub mod config;
pub mod engines;
pub mod error;
pub mod git;
pub mod meme;
pub mod mode;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod report;

use engines::{Engine, EngineInfo, EngineOptions, RoastAdapter};
use error::Result;
use meme::MemeSpec;
use mode::Mode;
use pipeline::Pipeline;
use report::{AnalysisResult, Issue, IssueType};

/// Analyze a source text with every check enabled.
pub fn analyze(source: &str) -> AnalysisResult {
    Pipeline::with_defaults().run(source)
}

/// Analyze a source text, keeping only issues of the given types.
pub fn analyze_with_checks(source: &str, checks: impl IntoIterator<Item = IssueType>) -> AnalysisResult {
    Pipeline::with_defaults().with_enabled_checks(checks).run(source)
}

/// Roast an analysis. Never fails for [`Engine::Static`]; chat engines fall
/// back to a canned roast when they fail.
pub async fn generate_roast(analysis: &AnalysisResult, mode: Mode, context: &str, engine: &Engine) -> Result<String> {
    RoastAdapter::new().roast(engine, analysis, mode, context).await
}

/// Availability of every engine, in a fixed order.
pub async fn list_engines(options: &EngineOptions) -> Vec<EngineInfo> {
    RoastAdapter::new().list_engines(options).await
}

/// Template and captions for a set of issues. `None` when there are none.
pub async fn build_meme(issues: &[Issue], mode: Mode, engine: &Engine) -> Option<MemeSpec> {
    meme::build_meme(&RoastAdapter::new(), issues, mode, engine).await
}
