use crate::report::IssueType;

/// A meme template the captioner can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemeTemplate {
    pub name: &'static str,
    /// Template id on a memegen-compatible renderer.
    pub memegen_id: &'static str,
    pub description: &'static str,
    /// Tags matched against issue type names.
    pub good_for: &'static [&'static str],
    /// Caption format guidance for the chat backends.
    pub caption_hint: &'static str,
}

pub const DEFAULT_TEMPLATE: &str = "drake";

pub static TEMPLATES: &[MemeTemplate] = &[
    MemeTemplate {
        name: "drake",
        memegen_id: "drake",
        description: "Drake Hotline Bling - Good vs Bad comparison",
        good_for: &[
            "console.log spam",
            "consoleLog",
            "magic numbers",
            "magicNumbers",
            "bad variable names",
            "badVariableNames",
            "general comparisons",
        ],
        caption_hint: "\"GOOD THING\" / \"BAD THING\" (max 15 chars each)",
    },
    MemeTemplate {
        name: "doge",
        memegen_id: "doge",
        description: "Much wow, very doge style humor",
        good_for: &[
            "terrible code",
            "spaghetti logic",
            "TODO comments",
            "todoComments",
            "general humor",
        ],
        caption_hint: "\"Much X\" / \"Very Y\" (max 12 chars each)",
    },
    MemeTemplate {
        name: "distracted-boyfriend",
        memegen_id: "db",
        description: "Distracted boyfriend choosing between two things",
        good_for: &[
            "copy-paste code",
            "stack overflow solutions",
            "ignoring best practices",
            "choosing between options",
            "consoleLog",
        ],
        caption_hint: "\"CHOICE A\" / \"CHOICE B\" (max 15 chars each)",
    },
    MemeTemplate {
        name: "two-buttons",
        memegen_id: "ds",
        description: "Two buttons meme for decision making",
        good_for: &[
            "decision making",
            "choosing between bad options",
            "binary choices",
            "badVariableNames",
        ],
        caption_hint: "\"BUTTON 1\" / \"BUTTON 2\" (max 12 chars each)",
    },
    MemeTemplate {
        name: "change-my-mind",
        memegen_id: "cmm",
        description: "Steven Crowder change my mind format",
        good_for: &[
            "opinions about code quality",
            "defending bad practices",
            "controversial statements",
            "magicNumbers",
            "todoComments",
        ],
        caption_hint: "\"Change my mind\" / \"OPINION\" (max 20 chars bottom)",
    },
    MemeTemplate {
        name: "one-does-not-simply",
        memegen_id: "mordor",
        description: "Boromir meme for impossible tasks",
        good_for: &[
            "impossible tasks",
            "debugging production",
            "refactoring legacy code",
            "difficult challenges",
            "nestedIfs",
            "longFunctions",
        ],
        caption_hint: "\"One does not simply\" / \"ACTION\" (max 15 chars bottom)",
    },
];

pub fn find(name: &str) -> Option<&'static MemeTemplate> {
    TEMPLATES.iter().find(|t| t.name == name)
}

pub fn default_template() -> &'static MemeTemplate {
    &TEMPLATES[0]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CannedCaptions {
    pub top: &'static str,
    pub bottom: &'static str,
}

const fn captions(top: &'static str, bottom: &'static str) -> CannedCaptions {
    CannedCaptions { top, bottom }
}

const CAPTIONS: &[(IssueType, &str, CannedCaptions)] = &[
    (IssueType::ConsoleLog, "drake", captions("Write proper logging", "Console.log everywhere")),
    (IssueType::ConsoleLog, "doge", captions("Much debugging", "Very console.log spam")),
    (IssueType::ConsoleLog, "distracted-boyfriend", captions("Proper logging library", "Console.log statements")),
    (IssueType::MagicNumbers, "drake", captions("Use constants", "Magic numbers everywhere")),
    (IssueType::MagicNumbers, "doge", captions("Much constants", "Very magic numbers")),
    (IssueType::MagicNumbers, "change-my-mind", captions("Change my mind", "Magic numbers are fine")),
    (IssueType::NestedIfs, "drake", captions("Clean code", "Nested if hell")),
    (IssueType::NestedIfs, "doge", captions("Much nesting", "Very spaghetti")),
    (IssueType::NestedIfs, "one-does-not-simply", captions("One does not simply", "Navigate nested ifs")),
    (IssueType::BadVariableNames, "drake", captions("Descriptive names", "x, y, z, temp, data")),
    (IssueType::BadVariableNames, "doge", captions("Much naming", "Very confusion")),
    (IssueType::BadVariableNames, "two-buttons", captions("Good variable names", "Single letter variables")),
    (IssueType::TodoComments, "drake", captions("Fix issues now", "TODO comments everywhere")),
    (IssueType::TodoComments, "doge", captions("Much procrastination", "Very TODO")),
    (IssueType::TodoComments, "change-my-mind", captions("Change my mind", "TODO comments are fine")),
    (IssueType::LongFunctions, "drake", captions("Small functions", "Monolithic functions")),
    (IssueType::LongFunctions, "doge", captions("Much function", "Very long")),
    (IssueType::LongFunctions, "one-does-not-simply", captions("One does not simply", "Read a 100-line function")),
];

fn lookup(kind: IssueType, template: &str) -> Option<CannedCaptions> {
    CAPTIONS
        .iter()
        .find(|(k, t, _)| *k == kind && *t == template)
        .map(|(_, _, c)| *c)
}

/// Captions for a (type, template) pair, falling back to the type's drake
/// captions.
pub fn canned_captions(kind: IssueType, template: &str) -> CannedCaptions {
    lookup(kind, template)
        .or_else(|| lookup(kind, DEFAULT_TEMPLATE))
        .unwrap_or(captions("Good code", "Bad code"))
}
