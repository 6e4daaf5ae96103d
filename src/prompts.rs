//! Prompt text for the chat backends: the roast itself and the two meme
//! requests (template choice, captions).

use crate::meme::templates::{MemeTemplate, TEMPLATES};
use crate::mode::Mode;
use crate::report::{AnalysisResult, Issue};

/// Context longer than this is cut before it goes into a prompt.
pub const MAX_CONTEXT_CHARS: usize = 4000;

pub const ROASTBOT_SYSTEM: &str = "You are RoastBot, an AI that humorously roasts code.";

pub fn system_message(mode: Mode) -> String {
    format!("{ROASTBOT_SYSTEM} Be {mode} in your criticism.")
}

fn mode_rules(mode: Mode) -> &'static str {
    match mode {
        Mode::Gentle => {
            "- Keep it witty and sarcastic (1-2 sentences).\n\
             - Sound like a mischievous friend.\n\
             - Openers must vary: use slang, jokes, or silly metaphors."
        }
        Mode::Savage => {
            "- Keep it short and lethal (1-2 sentences).\n\
             - Sarcastic, cutting, and savage with creative variety.\n\
             - Start with something unexpected (NOT \"Wow\", \"Congrats\", \"Amazing\")."
        }
        Mode::Toxic => {
            "- Go full nuclear meltdown mode (2-4 sentences).\n\
             - Mix dark humor and absurd exaggerations.\n\
             - No generic intros: make each roast unpredictable and chaotic."
        }
    }
}

/// Cut `context` to at most `max` characters, on a char boundary.
pub fn truncate_context(context: &str, max: usize) -> String {
    match context.char_indices().nth(max) {
        Some((cut, _)) => format!("{}\n... (truncated)", &context[..cut]),
        None => context.to_string(),
    }
}

fn issue_lines(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(|i| format!("- line {} [{}] {}", i.line, i.kind, i.description))
        .collect::<Vec<_>>()
        .join("\n")
}

fn issue_summary(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.kind, i.description))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The user prompt for a roast.
pub fn roast(context: &str, mode: Mode, analysis: &AnalysisResult) -> String {
    let code = if context.trim().is_empty() {
        "Code analysis provided".to_string()
    } else {
        truncate_context(context, MAX_CONTEXT_CHARS)
    };
    let shouted = mode.as_str().to_uppercase();

    let findings = if analysis.is_clean() {
        "No static findings. Roast whatever you see.".to_string()
    } else {
        format!(
            "{} issue(s) detected:\n{}",
            analysis.summary.total_issues,
            issue_lines(&analysis.issues)
        )
    };

    format!(
        r#"You are RoastBot, a {shouted}-mode insult machine.

Rules of Engagement:
{rules}

NEVER start with: "Wow", "Congrats", "Amazing", "Great", "Looks like".
NEVER repeat roast structures or recycled lines.
NEVER give coding tips or fixes.

MUST call out specific code issues:
- Console.log statements (debugging spam)
- Magic numbers (hardcoded values like 42, 1337, 69, 420, 666)
- Nested if statements (spaghetti logic)
- Long functions (monolithic code)
- TODO comments (procrastination markers)
- Terrible variable names (x, y, z, temp, data)

Sample roasts (DO NOT REPEAT VERBATIM):
Input: let x = 1; let y = 2; let z = x + y; console.log(z);
Output (savage): "Variable names 'x', 'y', 'z'? Are you writing algebra or software? And that console.log is having a party all by itself."
Output (gentle): "Those variable names could use some personality, and maybe consider a proper logging library instead of console.log everywhere."

Static analysis findings:
{findings}

Now unleash your {shouted} roast on this code:

```
{code}
```"#,
        rules = mode_rules(mode),
    )
}

fn catalog_lines(templates: &[MemeTemplate]) -> String {
    templates
        .iter()
        .map(|t| format!("- {}: {} (best for: {})", t.name, t.description, t.good_for.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ask for a template choice as `{"template": "..."}`.
pub fn select_template(issues: &[Issue], mode: Mode) -> String {
    format!(
        r#"You are a meme template selector. Choose the BEST meme template for these code issues: {summary}

Available Templates:
{catalog}

Mode: {mode}

Selection Rules:
- Choose the template that BEST fits the code issues
- Consider the tone and style of the {mode} mode
- AVOID drake unless it's clearly the best choice (it's overused)
- Prefer more specific templates for better humor

Template Selection Logic:
- Console.log spam + magic numbers -> drake (good vs bad)
- Nested ifs + long functions -> one-does-not-simply (impossible tasks)
- TODO comments everywhere -> change-my-mind (controversial opinions)
- Bad variable names + copy-paste code -> distracted-boyfriend (choosing between options)
- Multiple bad practices -> doge (general humor)
- Binary choices/decisions -> two-buttons (decision making)

Format your response as JSON:
{{
  "template": "template-name-here"
}}"#,
        summary = issue_summary(issues),
        catalog = catalog_lines(TEMPLATES),
    )
}

/// Ask for captions as `{"topText": "...", "bottomText": "..."}`.
pub fn captions(issues: &[Issue], mode: Mode, template: &MemeTemplate) -> String {
    format!(
        r#"You are a meme caption generator. Create funny meme captions for a {name} template based on these code issues: {summary}

Template: {name}
Mode: {mode}

Styling rules:
- Keep each caption SHORT (max 20-25 characters)
- Use simple, bold words and CAPS for emphasis
- Text must fit within the image without overflow

Template guidelines: {hint}

Content rules:
- Top text: the "good" or "correct" approach
- Bottom text: the "bad" or "problematic" approach
- Be {mode} in tone and specific to the issues above

Format your response as JSON:
{{
  "topText": "SHORT CAPTION",
  "bottomText": "SHORT CAPTION"
}}"#,
        name = template.name,
        summary = issue_summary(issues),
        hint = template.caption_hint,
    )
}
