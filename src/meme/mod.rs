//! Meme captioning: choose a template and two captions for an issue list.

pub mod render;
pub mod templates;

use rand::seq::IndexedRandom;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engines::{Engine, RoastAdapter};
use crate::error::Result;
use crate::mode::Mode;
use crate::prompts;
use crate::report::{Issue, IssueType, Summary};
use templates::{MemeTemplate, TEMPLATES};

const DEFAULT_TOP: &str = "Good code";
const DEFAULT_BOTTOM: &str = "Bad code";

/// What the renderer needs to draw one meme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemeSpec {
    pub template: String,
    pub top_text: String,
    pub bottom_text: String,
}

/// Most frequent issue type. Ties go to the type declared first in
/// [`IssueType`]. `None` for an empty list.
pub fn dominant_issue_type(issues: &[Issue]) -> Option<IssueType> {
    let counts = Summary::from_issues(issues).by_type;
    let mut best: Option<(IssueType, usize)> = None;
    for kind in IssueType::all() {
        let count = counts.get(kind).copied().unwrap_or(0);
        if count > 0 && best.map_or(true, |(_, top)| count > top) {
            best = Some((*kind, count));
        }
    }
    best.map(|(kind, _)| kind)
}

/// Case-insensitive substring match in either direction, with whitespace
/// stripped from the tag.
fn tag_matches(tag: &str, kind: IssueType) -> bool {
    let tag: String = tag.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_lowercase();
    let issue = kind.key().to_lowercase();
    issue.contains(&tag) || tag.contains(&issue)
}

/// Templates whose tags match `kind`.
pub fn matching_templates(kind: IssueType) -> Vec<&'static MemeTemplate> {
    TEMPLATES
        .iter()
        .filter(|t| t.good_for.iter().any(|tag| tag_matches(tag, kind)))
        .collect()
}

/// Random pick among matching templates, else among all, else drake.
pub fn select_static_template(kind: IssueType) -> &'static MemeTemplate {
    let mut rng = rand::rng();
    let matches = matching_templates(kind);
    matches
        .choose(&mut rng)
        .copied()
        .or_else(|| TEMPLATES.choose(&mut rng))
        .unwrap_or_else(templates::default_template)
}

fn emoji_prefix(mode: Mode) -> (&'static str, &'static str) {
    match mode {
        Mode::Toxic => ("🔥 ", "💀 "),
        Mode::Gentle => ("💡 ", "🤔 "),
        Mode::Savage => ("", ""),
    }
}

/// Captions from the static tables for a chosen template.
pub fn static_captions(kind: IssueType, template: &MemeTemplate, mode: Mode) -> MemeSpec {
    let captions = templates::canned_captions(kind, template.name);
    let (top, bottom) = emoji_prefix(mode);
    MemeSpec {
        template: template.name.to_string(),
        top_text: format!("{top}{}", captions.top),
        bottom_text: format!("{bottom}{}", captions.bottom),
    }
}

/// Slice from the first `{` to the last `}`, so replies wrapped in prose
/// or code fences still parse.
fn json_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

/// Parse a chat reply as JSON, or fall back to `default` when the call
/// failed or the reply doesn't parse.
pub fn parse_json_or<T: DeserializeOwned>(reply: Result<String>, default: T) -> T {
    let text = match reply {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, "chat request failed, using default");
            return default;
        }
    };
    match serde_json::from_str(json_object(&text)) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(error = %err, "failed to parse JSON reply, using default");
            default
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct TemplateChoice {
    template: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionReply {
    top_text: Option<String>,
    bottom_text: Option<String>,
}

async fn ai_template(
    adapter: &RoastAdapter,
    engine: &Engine,
    issues: &[Issue],
    mode: Mode,
) -> &'static MemeTemplate {
    let prompt = prompts::select_template(issues, mode);
    let reply = adapter.complete(engine, None, &prompt, mode).await;
    let choice: TemplateChoice = parse_json_or(reply, TemplateChoice::default());

    match choice.template.as_deref() {
        Some(name) => templates::find(name).unwrap_or_else(|| {
            warn!(template = name, "model picked an unknown template, using drake");
            templates::default_template()
        }),
        None => templates::default_template(),
    }
}

async fn ai_captions(
    adapter: &RoastAdapter,
    engine: &Engine,
    issues: &[Issue],
    mode: Mode,
    template: &MemeTemplate,
) -> MemeSpec {
    let prompt = prompts::captions(issues, mode, template);
    let reply = adapter.complete(engine, None, &prompt, mode).await;
    let captions: CaptionReply = parse_json_or(reply, CaptionReply::default());

    MemeSpec {
        template: template.name.to_string(),
        top_text: captions.top_text.unwrap_or_else(|| DEFAULT_TOP.to_string()),
        bottom_text: captions.bottom_text.unwrap_or_else(|| DEFAULT_BOTTOM.to_string()),
    }
}

/// Pick a template and captions for `issues`. `None` when there is nothing
/// to meme about.
pub async fn build_meme(
    adapter: &RoastAdapter,
    issues: &[Issue],
    mode: Mode,
    engine: &Engine,
) -> Option<MemeSpec> {
    let dominant = dominant_issue_type(issues)?;

    let spec = match engine {
        Engine::Static => static_captions(dominant, select_static_template(dominant), mode),
        Engine::OpenAi(_) | Engine::Ollama(_) => {
            let template = ai_template(adapter, engine, issues, mode).await;
            ai_captions(adapter, engine, issues, mode, template).await
        }
    };
    Some(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::OllamaConfig;
    use crate::error::RoastError;
    use crate::report::Severity;

    fn issue(kind: IssueType) -> Issue {
        Issue {
            kind,
            line: 1,
            description: format!("{kind} here"),
            severity: Severity::Medium,
        }
    }

    #[test]
    fn dominant_type_is_most_frequent() {
        let issues = vec![
            issue(IssueType::TodoComments),
            issue(IssueType::MagicNumbers),
            issue(IssueType::TodoComments),
        ];
        assert_eq!(dominant_issue_type(&issues), Some(IssueType::TodoComments));
    }

    #[test]
    fn dominant_type_ties_follow_declaration_order() {
        let issues = vec![issue(IssueType::BadVariableNames), issue(IssueType::NestedIfs)];
        assert_eq!(dominant_issue_type(&issues), Some(IssueType::NestedIfs));
    }

    #[test]
    fn dominant_type_of_nothing_is_none() {
        assert_eq!(dominant_issue_type(&[]), None);
    }

    #[test]
    fn fuzzy_tag_matching() {
        assert!(tag_matches("magic numbers", IssueType::MagicNumbers));
        assert!(tag_matches("TODO comments", IssueType::TodoComments));
        assert!(!tag_matches("console.log spam", IssueType::ConsoleLog));
        assert!(tag_matches("consoleLog", IssueType::ConsoleLog));
    }

    #[test]
    fn matching_templates_per_type() {
        let names = |kind| -> Vec<&str> { matching_templates(kind).iter().map(|t| t.name).collect() };
        assert_eq!(names(IssueType::NestedIfs), vec!["one-does-not-simply"]);
        assert_eq!(names(IssueType::TodoComments), vec!["doge", "change-my-mind"]);
        assert_eq!(names(IssueType::ConsoleLog), vec!["drake", "distracted-boyfriend"]);
    }

    #[test]
    fn static_selection_stays_within_matches() {
        for _ in 0..20 {
            let template = select_static_template(IssueType::MagicNumbers);
            assert!(["drake", "change-my-mind"].contains(&template.name));
        }
    }

    #[test]
    fn static_captions_carry_mode_emoji() {
        let template = templates::find("one-does-not-simply").unwrap();
        let toxic = static_captions(IssueType::NestedIfs, template, Mode::Toxic);
        assert_eq!(toxic.top_text, "🔥 One does not simply");
        assert_eq!(toxic.bottom_text, "💀 Navigate nested ifs");

        let gentle = static_captions(IssueType::NestedIfs, template, Mode::Gentle);
        assert!(gentle.top_text.starts_with("💡 "));
        assert!(gentle.bottom_text.starts_with("🤔 "));

        let savage = static_captions(IssueType::NestedIfs, template, Mode::Savage);
        assert_eq!(savage.top_text, "One does not simply");
    }

    #[test]
    fn json_reply_parsing() {
        let parsed: CaptionReply = parse_json_or(
            Ok("Sure! ```json\n{\"topText\": \"CLEAN CODE\", \"bottomText\": \"CONSOLE SPAM\"}\n```".into()),
            CaptionReply::default(),
        );
        assert_eq!(parsed.top_text.as_deref(), Some("CLEAN CODE"));
        assert_eq!(parsed.bottom_text.as_deref(), Some("CONSOLE SPAM"));

        let garbage: TemplateChoice = parse_json_or(Ok("drake, obviously".into()), TemplateChoice::default());
        assert_eq!(garbage.template, None);

        let failed: TemplateChoice = parse_json_or(Err(RoastError::MissingApiKey), TemplateChoice {
            template: Some("doge".into()),
        });
        assert_eq!(failed.template.as_deref(), Some("doge"));
    }

    #[test]
    fn partial_caption_reply_keeps_present_field() {
        let parsed: CaptionReply = parse_json_or(Ok(r#"{"topText":"ONLY TOP"}"#.into()), CaptionReply::default());
        assert_eq!(parsed.top_text.as_deref(), Some("ONLY TOP"));
        assert_eq!(parsed.bottom_text, None);
    }

    #[tokio::test]
    async fn no_issues_no_meme() {
        let adapter = RoastAdapter::new();
        assert_eq!(build_meme(&adapter, &[], Mode::Savage, &Engine::Static).await, None);
    }

    #[tokio::test]
    async fn static_meme_for_long_functions() {
        let adapter = RoastAdapter::new();
        let spec = build_meme(&adapter, &[issue(IssueType::LongFunctions)], Mode::Savage, &Engine::Static)
            .await
            .unwrap();
        assert_eq!(spec.template, "one-does-not-simply");
        assert_eq!(spec.bottom_text, "Read a 100-line function");
    }

    #[tokio::test]
    async fn unreachable_ai_backend_uses_defaults() {
        let adapter = RoastAdapter::new();
        let engine = Engine::Ollama(OllamaConfig::new(None, Some("http://127.0.0.1:9".into())));
        let spec = build_meme(&adapter, &[issue(IssueType::ConsoleLog)], Mode::Toxic, &engine)
            .await
            .unwrap();
        assert_eq!(
            spec,
            MemeSpec {
                template: "drake".into(),
                top_text: DEFAULT_TOP.into(),
                bottom_text: DEFAULT_BOTTOM.into(),
            }
        );
    }
}
