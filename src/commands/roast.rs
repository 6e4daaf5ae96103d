use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use roastme::config::Config;
use roastme::engines::{Engine, EngineOptions, RoastAdapter};
use roastme::git::{Git2Inspector, GitInspector};
use roastme::meme::render::{save_meme, MemeRenderer, MemeStyle, MemegenRenderer};
use roastme::mode::Mode;
use roastme::output::{self, OutputFormat, RoastRecord, ROASTBOT_PREFIX};
use roastme::pipeline::Pipeline;
use roastme::report::AnalysisResult;

use super::{collect_files, parse_format, FileFilter};
use crate::RoastArgs;

const NOTHING_TO_ROAST: &str = "You need to specify a file, use --commit, or --staged. Even I can't roast nothing!";
const FILE_NOT_FOUND: &str = "File not found. Even I can't roast what doesn't exist!";
const NO_REPOSITORY: &str = "No git repository found. Even I need some context to roast!";
const NO_COMMITS: &str = "No commits yet. Even I need some history to roast!";
const NO_STAGED: &str = "No staged changes found. Stage something first, then I'll roast it!";
const NO_FILES: &str = "No source files found here. Even I can't roast an empty room!";
const CLEAN_FILE: &str = "This code is actually... decent? I'm as surprised as you are.";
const CLEAN_DIFF: &str = "The code changes look surprisingly clean. Are you feeling okay?";

const EXAMPLES: &str = "\
Examples:
  roastme index.js
  roastme --commit --mode savage
  roastme --staged --engine ollama
  roastme bad-code.js --mode toxic --engine openai
  roastme src/ --engine ollama --model mistral";

pub async fn run(args: RoastArgs) -> Result<()> {
    let format = parse_format(&args.format)?;

    if !args.commit && !args.staged && args.path.is_none() {
        println!("{ROASTBOT_PREFIX}{NOTHING_TO_ROAST}\n\n{EXAMPLES}");
        std::process::exit(1);
    }

    let config = Config::load(&args.config);
    for problem in config.validate() {
        warn!(config = %args.config.display(), "{problem}");
    }
    if config.ci || format == OutputFormat::Text {
        colored::control::set_override(false);
    }

    let mut session = Session::new(&args, config, format);
    session.banner();

    let cwd = std::env::current_dir().context("failed to read current directory")?;
    if args.commit {
        session.roast_commit(&Git2Inspector::discover(&cwd)).await?;
    } else if args.staged {
        session.roast_staged(&Git2Inspector::discover(&cwd)).await?;
    } else if let Some(path) = &args.path {
        session.roast_path(path).await?;
    }

    session.finish()
}

/// Settings and state for one invocation. Targets are roasted one at a time,
/// in order.
struct Session {
    mode: Mode,
    engine: Engine,
    adapter: RoastAdapter,
    renderer: MemegenRenderer,
    pipeline: Pipeline,
    filter: FileFilter,
    format: OutputFormat,
    generate_meme: bool,
    meme_dir: PathBuf,
    records: Vec<RoastRecord>,
}

impl Session {
    fn new(args: &RoastArgs, config: Config, format: OutputFormat) -> Self {
        let mode = args
            .mode
            .as_deref()
            .map(Mode::from_name)
            .unwrap_or_else(|| config.mode());

        let options = EngineOptions {
            model: args.model.clone().or_else(|| config.model.clone()),
            api_key: args.api_key.clone(),
            ..EngineOptions::default()
        };
        let engine = match args.engine {
            Some(kind) => Engine::new(kind, &options),
            None => Engine::resolve(&config.engine, &options),
        };

        let adapter = RoastAdapter::new();
        let renderer = MemegenRenderer::new(adapter.client().clone());

        Self {
            mode,
            engine,
            renderer,
            adapter,
            pipeline: Pipeline::with_defaults().with_enabled_checks(config.enabled_checks()),
            filter: FileFilter {
                ignore: config.ignore_globs(),
                max_file_size: config.max_file_size,
            },
            format,
            generate_meme: args.meme || config.generate_meme,
            meme_dir: config.meme_output_dir.clone(),
            records: Vec::new(),
        }
    }

    fn banner(&self) {
        if self.format == OutputFormat::Json {
            return;
        }
        println!(
            "Mode: {} | Engine: {}\n",
            self.mode.as_str().to_uppercase(),
            self.engine.kind().as_str().to_uppercase()
        );
    }

    /// Print in-character remarks that have no target attached.
    fn say(&self, message: &str) {
        if self.format != OutputFormat::Json {
            println!("{ROASTBOT_PREFIX}{message}");
        }
    }

    fn emit(&mut self, record: RoastRecord) {
        match self.format {
            OutputFormat::Json => {}
            OutputFormat::Text => println!("{}", output::format_text(&record)),
            OutputFormat::Pretty => println!("{}", output::format_pretty(&record)),
        }
        self.records.push(record);
    }

    fn finish(self) -> Result<()> {
        if self.format == OutputFormat::Json {
            println!("{}", output::format_json(&self.records)?);
        }
        Ok(())
    }

    async fn roast_path(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            self.say(FILE_NOT_FOUND);
            return Ok(());
        }

        let files = collect_files(path, &self.filter)
            .with_context(|| format!("failed to collect files under {}", path.display()))?;
        if files.is_empty() {
            self.say(NO_FILES);
        }
        for file in &files {
            self.roast_file(file).await?;
        }
        Ok(())
    }

    async fn roast_file(&mut self, path: &Path) -> Result<()> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                self.say(FILE_NOT_FOUND);
                return Ok(());
            }
            Err(err) if err.kind() == std::io::ErrorKind::InvalidData => {
                warn!(path = %path.display(), "not UTF-8 text, skipping");
                return Ok(());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()));
            }
        };

        let analysis = self.pipeline.run(&content);
        let record = self
            .roast_target(path.display().to_string(), analysis, &content, CLEAN_FILE)
            .await?;
        self.emit(record);
        Ok(())
    }

    /// Roast one analyzed target, or attach `clean_note` when it has no issues.
    async fn roast_target(
        &self,
        target: String,
        analysis: AnalysisResult,
        context: &str,
        clean_note: &str,
    ) -> Result<RoastRecord> {
        if analysis.is_clean() {
            let mut record = RoastRecord::new(target, self.mode, analysis);
            record.note = Some(clean_note.to_string());
            return Ok(record);
        }

        let roast = self
            .adapter
            .roast(&self.engine, &analysis, self.mode, context)
            .await
            .context("failed to generate roast")?;

        let meme = if self.generate_meme {
            self.meme_for(&analysis).await
        } else {
            None
        };

        let mut record = RoastRecord::new(target, self.mode, analysis);
        record.roast = Some(roast);
        record.meme = meme;
        Ok(record)
    }

    /// Build, render, and save a meme. Failures are logged and skipped.
    async fn meme_for(&self, analysis: &AnalysisResult) -> Option<PathBuf> {
        let spec = roastme::meme::build_meme(&self.adapter, &analysis.issues, self.mode, &self.engine).await?;
        info!(template = %spec.template, top = %spec.top_text, bottom = %spec.bottom_text, "meme chosen");

        let bytes = match self.renderer.render(&spec, &MemeStyle::default()).await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(error = %err, "meme rendering failed");
                return None;
            }
        };
        match save_meme(&bytes, &self.meme_dir) {
            Ok(path) => Some(path),
            Err(err) => {
                warn!(error = %err, "could not save meme");
                None
            }
        }
    }

    async fn roast_commit(&mut self, git: &impl GitInspector) -> Result<()> {
        if !git.is_repository() {
            self.say(NO_REPOSITORY);
            return Ok(());
        }
        let Some(commit) = git.latest_commit_info().context("failed to read latest commit")? else {
            self.say(NO_COMMITS);
            return Ok(());
        };

        let context = format!("Commit: {}", commit.message);
        let message_roast = self
            .adapter
            .roast(&self.engine, &AnalysisResult::empty(), self.mode, &context)
            .await
            .context("failed to roast commit message")?;
        let mut record = RoastRecord::new(
            format!("commit {} by {} on {}: \"{}\"", commit.hash, commit.author, commit.date, commit.message),
            self.mode,
            AnalysisResult::empty(),
        );
        record.roast = Some(message_roast);
        self.emit(record);

        if commit.diff.is_empty() {
            return Ok(());
        }
        let analysis = self.pipeline.run(&commit.diff);
        let record = self
            .roast_target(format!("commit {} changes", commit.hash), analysis, &commit.diff, CLEAN_DIFF)
            .await?;
        self.emit(record);
        Ok(())
    }

    async fn roast_staged(&mut self, git: &impl GitInspector) -> Result<()> {
        if !git.is_repository() {
            self.say(NO_REPOSITORY);
            return Ok(());
        }
        let files = git
            .staged_files()
            .context("failed to list staged files")?
            .unwrap_or_default();
        if files.is_empty() {
            self.say(NO_STAGED);
            return Ok(());
        }

        for file in &files {
            self.roast_file(file).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roastme::engines::{canned, EngineKind};
    use roastme::git::CommitInfo;

    impl Session {
        fn for_tests(format: OutputFormat) -> Self {
            let args = RoastArgs {
                path: None,
                mode: Some("gentle".into()),
                engine: Some(EngineKind::Static),
                model: None,
                api_key: None,
                commit: false,
                staged: false,
                meme: false,
                config: PathBuf::from(roastme::config::CONFIG_FILE),
                format: "json".into(),
            };
            Self::new(&args, Config::default(), format)
        }
    }

    struct FakeGit {
        repo: bool,
        commit: Option<CommitInfo>,
        staged: Option<Vec<PathBuf>>,
    }

    impl GitInspector for FakeGit {
        fn is_repository(&self) -> bool {
            self.repo
        }

        fn latest_commit_info(&self) -> roastme::error::Result<Option<CommitInfo>> {
            Ok(self.commit.clone())
        }

        fn staged_files(&self) -> roastme::error::Result<Option<Vec<PathBuf>>> {
            Ok(self.staged.clone())
        }
    }

    fn commit(diff: &str) -> CommitInfo {
        CommitInfo {
            hash: "deadbeef".into(),
            message: "fix stuff".into(),
            author: "Pat Coder".into(),
            date: "2024-03-01".into(),
            diff: diff.into(),
        }
    }

    #[tokio::test]
    async fn missing_file_is_not_an_error() {
        let mut session = Session::for_tests(OutputFormat::Json);
        session.roast_path(Path::new("/definitely/not/here.js")).await.unwrap();
        assert!(session.records.is_empty());
    }

    #[tokio::test]
    async fn clean_and_smelly_files() {
        let dir = tempfile::tempdir().unwrap();
        let clean = dir.path().join("clean.js");
        let smelly = dir.path().join("smelly.js");
        std::fs::write(&clean, "const total = price;\n").unwrap();
        std::fs::write(&smelly, "let temp = 1; console.log(temp); // TODO fix this\n").unwrap();

        let mut session = Session::for_tests(OutputFormat::Json);
        session.roast_path(dir.path()).await.unwrap();

        assert_eq!(session.records.len(), 2);
        let clean_record = &session.records[0];
        assert_eq!(clean_record.note.as_deref(), Some(CLEAN_FILE));
        assert_eq!(clean_record.roast, None);

        let smelly_record = &session.records[1];
        assert_eq!(smelly_record.analysis.summary.total_issues, 3);
        let roast = smelly_record.roast.as_deref().unwrap();
        assert!(canned::pool(Mode::Gentle).contains(&roast));
    }

    #[tokio::test]
    async fn commit_roasts_message_then_diff() {
        let git = FakeGit {
            repo: true,
            commit: Some(commit("+console.log(1337);\n")),
            staged: None,
        };
        let mut session = Session::for_tests(OutputFormat::Json);
        session.roast_commit(&git).await.unwrap();

        assert_eq!(session.records.len(), 2);
        assert!(session.records[0].target.contains("deadbeef"));
        assert!(session.records[0].analysis.is_clean());
        assert!(session.records[0].roast.is_some());
        assert_eq!(session.records[1].analysis.summary.total_issues, 2);
        assert!(session.records[1].roast.is_some());
    }

    #[tokio::test]
    async fn clean_commit_diff_gets_a_note() {
        let git = FakeGit {
            repo: true,
            commit: Some(commit("+const total = price;\n")),
            staged: None,
        };
        let mut session = Session::for_tests(OutputFormat::Json);
        session.roast_commit(&git).await.unwrap();
        assert_eq!(session.records[1].note.as_deref(), Some(CLEAN_DIFF));
    }

    #[tokio::test]
    async fn no_repository_or_nothing_staged_is_quiet() {
        let mut session = Session::for_tests(OutputFormat::Json);
        let outside = FakeGit {
            repo: false,
            commit: None,
            staged: None,
        };
        session.roast_commit(&outside).await.unwrap();
        session.roast_staged(&outside).await.unwrap();

        let empty = FakeGit {
            repo: true,
            commit: None,
            staged: Some(vec![]),
        };
        session.roast_commit(&empty).await.unwrap();
        session.roast_staged(&empty).await.unwrap();
        assert!(session.records.is_empty());
    }

    #[tokio::test]
    async fn staged_files_are_roasted_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.js");
        let b = dir.path().join("b.py");
        std::fs::write(&a, "console.log('a');\n").unwrap();
        std::fs::write(&b, "x = 1\n").unwrap();

        let git = FakeGit {
            repo: true,
            commit: None,
            staged: Some(vec![a.clone(), b.clone()]),
        };
        let mut session = Session::for_tests(OutputFormat::Json);
        session.roast_staged(&git).await.unwrap();

        let targets: Vec<&str> = session.records.iter().map(|r| r.target.as_str()).collect();
        assert_eq!(targets, vec![a.display().to_string(), b.display().to_string()]);
    }
}
