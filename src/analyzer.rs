//! Heuristic quality analysis of a prompt outline.
//!
//! The analyzer is a pure function of the document and a [`Profile`]. It estimates size, checks
//! which functional categories (role, task, constraints, format, examples) have their own
//! section, scores the outline out of 100 and produces advisory suggestions. Keyword sets are
//! bilingual (Chinese and English) and match section titles case-insensitively.

use crate::profile::{Markup, Profile};
use crate::section::{walk, Section};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Token count below which a prompt is considered too short, and above which size earns points.
pub const SHORT_PROMPT_TOKENS: usize = 100;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\^.*?\^\}").expect("invalid placeholder regex"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Functional part of a prompt that deserves its own section.
pub enum Category {
    /// Who the model should be.
    Role,
    /// What the model should do.
    Task,
    /// Rules and limits.
    Constraints,
    /// Shape of the expected output.
    Format,
    /// Few-shot examples.
    Examples,
}

impl Category {
    /// All categories in scoring order.
    pub const ALL: [Category; 5] = [
        Category::Role,
        Category::Task,
        Category::Constraints,
        Category::Format,
        Category::Examples,
    ];

    fn index(self) -> usize {
        match self {
            Category::Role => 0,
            Category::Task => 1,
            Category::Constraints => 2,
            Category::Format => 3,
            Category::Examples => 4,
        }
    }

    #[must_use]
    /// Points awarded when the category is covered.
    pub fn weight(self) -> i32 {
        match self {
            Category::Role => 15,
            Category::Task => 25,
            Category::Constraints | Category::Format | Category::Examples => 10,
        }
    }

    #[must_use]
    /// Whether `title` names this category.
    pub fn covers(self, title: &str) -> bool {
        COVERAGE_PATTERNS[self.index()].is_match(title)
    }

    /// Narrower test used to spot a single section juggling several responsibilities.
    fn claims(self, title: &str) -> bool {
        RESPONSIBILITY_PATTERNS[self.index()].is_match(title)
    }
}

fn compile_all(patterns: [&str; 5]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).expect("invalid category regex"))
        .collect()
}

static COVERAGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all([
        "角色|身份|role|profile|persona|expert|you are|model",
        "任务|目标|功能|task|goal|objective|instruction|function|do|action",
        "约束|限制|准则|规则|要求|注意|constrain|rule|limit|attention|guideline|requirement",
        "格式|输出|风格|语气|format|output|style|response|tone",
        "示例|例子|样本|参考|example|shot|case|sample",
    ])
});

static RESPONSIBILITY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all([
        "角色|身份|role|profile|persona",
        "任务|目标|功能|task|goal|objective",
        "约束|限制|准则|规则|constrain|rule",
        "格式|输出|format|output",
        "示例|例子|example|shot",
    ])
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Size figures for an outline.
pub struct Stats {
    /// Sections at every depth.
    pub module_count: usize,
    /// Approximate token count.
    pub token_count: usize,
    /// Maximum nesting depth (0 when empty).
    pub depth: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Which categories have a dedicated section somewhere in the outline.
pub struct Coverage {
    /// A role or persona section exists.
    pub role: bool,
    /// A task or goal section exists.
    pub task: bool,
    /// A constraints or rules section exists.
    pub constraints: bool,
    /// An output format section exists.
    pub format: bool,
    /// An examples section exists.
    pub examples: bool,
}

impl Coverage {
    #[must_use]
    /// Whether `category` is covered.
    pub fn has(&self, category: Category) -> bool {
        match category {
            Category::Role => self.role,
            Category::Task => self.task,
            Category::Constraints => self.constraints,
            Category::Format => self.format,
            Category::Examples => self.examples,
        }
    }

    #[must_use]
    /// Number of covered categories.
    pub fn count(&self) -> usize {
        Category::ALL.into_iter().filter(|c| self.has(*c)).count()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Severity of a suggestion.
pub enum SuggestionKind {
    /// Likely to hurt results.
    Warning,
    /// Optional improvement.
    Tip,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One advisory message.
pub struct Suggestion {
    /// Severity.
    pub kind: SuggestionKind,
    /// Message shown to the user.
    pub text: String,
}

impl Suggestion {
    fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: SuggestionKind::Warning,
            text: text.into(),
        }
    }

    fn tip(text: impl Into<String>) -> Self {
        Self {
            kind: SuggestionKind::Tip,
            text: text.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Full analyzer report.
pub struct Analysis {
    /// Size figures.
    pub stats: Stats,
    /// Category coverage.
    pub coverage: Coverage,
    /// Quality score in `0..=100`.
    pub score: u8,
    /// Advisory messages, most structural first.
    pub suggestions: Vec<Suggestion>,
    /// Unique `{^...^}` placeholders in first-occurrence order.
    pub variables: Vec<String>,
}

#[must_use]
/// Analyzes `sections` against the thresholds of `profile`.
pub fn analyze(sections: &[Section], profile: &Profile) -> Analysis {
    let stats = stats(sections);
    let coverage = coverage(sections);
    let mixed = sections.iter().find(|s| is_mixed(&s.title));
    let compact = coverage.count() >= 3 && stats.module_count < 3;

    let mut score: i32 = 0;
    if stats.module_count >= 1 {
        score += 20;
    }
    if stats.module_count >= 3 {
        score += 10;
    }
    if stats.token_count > SHORT_PROMPT_TOKENS {
        score += 10;
    }
    for category in Category::ALL {
        if coverage.has(category) {
            score += category.weight();
        }
    }
    if mixed.is_some() {
        score -= 10;
    }
    if compact {
        score -= 15;
    }
    let score = u8::try_from(score.clamp(0, 100)).unwrap_or_default();

    let mut suggestions = Vec::new();
    if let Some(section) = mixed {
        suggestions.push(Suggestion::warning(format!(
            "Section \"{}\" seems to cover several topics; consider splitting it into separate sections.",
            section.title
        )));
    }
    if compact {
        suggestions.push(Suggestion::warning(
            "Structure is too compact; consider splitting role, task and constraints into separate sections.",
        ));
    }
    if !coverage.task && stats.module_count < 3 {
        suggestions.push(Suggestion::warning(
            "No explicit task or goal section detected; state clearly what the model should do.",
        ));
    }
    if !coverage.role {
        suggestions.push(Suggestion::tip(
            "Consider adding a role section to give the model more context.",
        ));
    }
    if !coverage.examples {
        suggestions.push(Suggestion::tip(
            "Providing examples (few-shot) usually improves answer accuracy noticeably.",
        ));
    }
    suggestions.extend(size_suggestions(stats.token_count, profile));
    if let Some(tip) = markup_suggestion(sections, profile) {
        suggestions.push(tip);
    }
    if stats.token_count > SHORT_PROMPT_TOKENS && !coverage.format {
        suggestions.push(Suggestion::tip(
            "For complex tasks, specify the output format explicitly (e.g. Markdown, JSON).",
        ));
    }

    Analysis {
        stats,
        coverage,
        score,
        suggestions,
        variables: variables(sections),
    }
}

#[must_use]
/// Counts sections, estimates tokens and measures depth.
pub fn stats(sections: &[Section]) -> Stats {
    let mut module_count = 0;
    let mut tokens = 0.0;
    walk(sections, &mut |s| {
        module_count += 1;
        tokens += estimate_tokens(&format!("{} {}", s.title, s.content));
    });
    Stats {
        module_count,
        token_count: round_up(tokens),
        depth: depth(sections),
    }
}

/// Fractional token estimate: dense CJK characters weigh 1.5, everything else 1/3.5.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn estimate_tokens(text: &str) -> f64 {
    let total = text.chars().count();
    let dense = text.chars().filter(|c| is_dense(*c)).count();
    dense as f64 * 1.5 + total.saturating_sub(dense) as f64 / 3.5
}

fn is_dense(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_up(tokens: f64) -> usize {
    tokens.ceil().max(0.0) as usize
}

fn depth(sections: &[Section]) -> usize {
    sections
        .iter()
        .map(|s| 1 + depth(&s.children))
        .max()
        .unwrap_or(0)
}

#[must_use]
/// Checks every title in the outline against the category keyword sets.
pub fn coverage(sections: &[Section]) -> Coverage {
    let mut found = [false; 5];
    walk(sections, &mut |s| {
        for category in Category::ALL {
            found[category.index()] |= category.covers(&s.title);
        }
    });
    let [role, task, constraints, format, examples] = found;
    Coverage {
        role,
        task,
        constraints,
        format,
        examples,
    }
}

fn is_mixed(title: &str) -> bool {
    Category::ALL.into_iter().filter(|c| c.claims(title)).count() >= 2
}

fn size_suggestions(tokens: usize, profile: &Profile) -> Vec<Suggestion> {
    let mut out = Vec::new();
    if tokens < SHORT_PROMPT_TOKENS {
        out.push(Suggestion::warning(format!(
            "Prompt is very short (<{SHORT_PROMPT_TOKENS} tokens) and only suits trivial questions; add detail for more stable answers."
        )));
    }
    if tokens > profile.attention_limit as usize {
        out.push(Suggestion::tip(format!(
            "Prompt is long (>{} tokens); for {} models, put the core instructions at the beginning or the end.",
            profile.attention_limit, profile.label
        )));
    }
    if tokens > profile.hard_maximum as usize {
        out.push(Suggestion::warning(format!(
            "Prompt exceeds the recommended maximum for {} models (>{} tokens); trim it or move reference material out (e.g. RAG).",
            profile.label, profile.hard_maximum
        )));
    }
    out
}

fn markup_suggestion(sections: &[Section], profile: &Profile) -> Option<Suggestion> {
    let mut titles = Vec::new();
    let mut text = String::new();
    walk(sections, &mut |s| {
        titles.push(s.title.to_lowercase());
        text.push_str(&s.title.to_lowercase());
        text.push(' ');
        text.push_str(&s.content.to_lowercase());
        text.push(' ');
    });
    let titled = |needle: &str| titles.iter().any(|t| t.contains(needle));

    match profile.markup {
        Markup::Any => None,
        Markup::Xml => {
            let cued = titled("xml") || (text.contains('<') && text.contains('>'));
            (!cued).then(|| {
                Suggestion::tip(format!(
                    "{} models handle XML markup very well; wrap the structure in tags such as <task> and <context>.",
                    profile.label
                ))
            })
        }
        Markup::Markdown => {
            let cued = titled("markdown") || text.contains("```") || text.contains('#');
            (!cued).then(|| {
                Suggestion::tip(format!(
                    "{} models understand Markdown best; use # headings and - lists.",
                    profile.label
                ))
            })
        }
    }
}

#[must_use]
/// Collects unique `{^...^}` placeholders from titles and contents in document order.
pub fn variables(sections: &[Section]) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    walk(sections, &mut |s| {
        let text = format!("{} {}", s.title, s.content);
        for m in PLACEHOLDER_RE.find_iter(&text) {
            if !found.iter().any(|v| v == m.as_str()) {
                found.push(m.as_str().to_string());
            }
        }
    });
    found
}

#[cfg(test)]
#[path = "tests/analyzer.rs"]
mod tests;
