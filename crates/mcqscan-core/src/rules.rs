//! Scan rules: question-header phrases, option labels, continuation guards.
//!
//! The defaults are tuned to one textbook's layout. They live in a
//! [`RulesConfig`] so other layouts can be handled from a config file, and
//! are compiled once into [`ScanRules`] before scanning.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// User-facing rule configuration, usually the `[rules]` table of `mcqscan.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Regexes that mark a line as a question header. Matched
    /// case-insensitively anywhere in the line.
    #[serde(default = "default_question_patterns")]
    pub question_patterns: Vec<String>,
    /// Contents of the character class used for option labels.
    #[serde(default = "default_label_class")]
    pub label_class: String,
    /// Case-sensitive prefixes that stop a line from being appended to the
    /// open question when it yields no options.
    #[serde(default = "default_continuation_guards")]
    pub continuation_guards: Vec<String>,
}

fn default_question_patterns() -> Vec<String> {
    [
        r"choose\s+the\s+correct\s+answer",
        r"fill\s+in\s+the\s+blanks",
        r"select\s+the\s+correct\s+answer",
        r"which\s+of\s+the\s+following",
        r"correct\s+option",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_label_class() -> String {
    "a-divx".to_string()
}

fn default_continuation_guards() -> Vec<String> {
    ["a)", "b)", "c)", "d)", "i)", "ii)", "iii)", "iv)"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            question_patterns: default_question_patterns(),
            label_class: default_label_class(),
            continuation_guards: default_continuation_guards(),
        }
    }
}

/// A warning from rule validation. Warnings never stop a run.
#[derive(Debug, Clone)]
pub struct RulesWarning {
    pub message: String,
}

/// Check a rule set for configurations that are legal but almost certainly
/// not what the user meant.
pub fn validate_rules(config: &RulesConfig) -> Vec<RulesWarning> {
    let mut warnings = Vec::new();

    if config.question_patterns.is_empty() {
        warnings.push(RulesWarning {
            message: "no question patterns configured, nothing will be extracted".into(),
        });
    }

    let mut seen = std::collections::HashSet::new();
    for pattern in &config.question_patterns {
        if pattern.trim().is_empty() {
            warnings.push(RulesWarning {
                message: "empty question pattern matches every line".into(),
            });
        } else if !seen.insert(pattern.as_str()) {
            warnings.push(RulesWarning {
                message: format!("duplicate question pattern: {pattern}"),
            });
        }
    }

    if config.continuation_guards.iter().any(|g| g.is_empty()) {
        warnings.push(RulesWarning {
            message: "empty continuation guard disables question continuation".into(),
        });
    }

    warnings
}

/// One option token found in a line. Both fields borrow from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionToken<'a> {
    pub label: &'a str,
    pub text: &'a str,
}

impl OptionToken<'_> {
    /// Render as `"<label>. <text>"` with the text trimmed.
    pub fn format(&self) -> String {
        format!("{}. {}", self.label, self.text.trim())
    }
}

/// Finds option tokens in a line.
///
/// Equivalent to a find-all of
/// `(?:^|\s)([<class>]+)\)?\s*(.+?)(?=\s+[<class>]+\)|$)` on a backtracking
/// engine. The `regex` crate has no lookahead, so the lookahead and the
/// backtracking order are driven by hand; each piece is still a regex.
#[derive(Debug, Clone)]
pub struct OptionMatcher {
    /// `^[<class>]+`, anchored at the candidate label start.
    label: Regex,
    /// `^\s+[<class>]+\)`, the lookahead that ends an option's text.
    terminator: Regex,
}

impl OptionMatcher {
    pub fn new(label_class: &str) -> Result<Self, RulesError> {
        if label_class.is_empty() {
            return Err(RulesError::EmptyLabelClass);
        }
        if label_class.contains('[') || label_class.contains(']') {
            return Err(RulesError::InvalidLabelClass {
                class: label_class.to_string(),
                message: "brackets are added automatically".into(),
            });
        }

        let build = |pattern: String| {
            RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| RulesError::InvalidLabelClass {
                    class: label_class.to_string(),
                    message: e.to_string(),
                })
        };

        Ok(Self {
            label: build(format!("^[{label_class}]+"))?,
            terminator: build(format!(r"^\s+[{label_class}]+\)"))?,
        })
    }

    /// All non-overlapping option tokens in `line`, left to right.
    pub fn find_all<'a>(&self, line: &'a str) -> Vec<OptionToken<'a>> {
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos <= line.len() {
            if let Some((token, end)) = self.match_at(line, pos) {
                tokens.push(token);
                pos = end;
                continue;
            }
            match line[pos..].chars().next() {
                Some(c) => pos += c.len_utf8(),
                None => break,
            }
        }

        tokens
    }

    /// Attempt a match starting exactly at `start`.
    fn match_at<'a>(&self, line: &'a str, start: usize) -> Option<(OptionToken<'a>, usize)> {
        // (?:^|\s): the `^` branch is tried first.
        let mut label_starts = Vec::with_capacity(2);
        if start == 0 {
            label_starts.push(0);
        }
        if let Some(c) = line[start..].chars().next().filter(|c| c.is_whitespace()) {
            label_starts.push(start + c.len_utf8());
        }

        label_starts
            .into_iter()
            .find_map(|label_start| self.match_label_at(line, label_start))
    }

    fn match_label_at<'a>(
        &self,
        line: &'a str,
        label_start: usize,
    ) -> Option<(OptionToken<'a>, usize)> {
        let run = self.label.find(&line[label_start..])?;
        let run = &line[label_start..label_start + run.end()];

        // Greedy label: longest first, giving back one char at a time.
        let label_ends: Vec<usize> = run
            .char_indices()
            .map(|(i, c)| label_start + i + c.len_utf8())
            .collect();

        for &label_end in label_ends.iter().rev() {
            let mut paren_ends = Vec::with_capacity(2);
            if line[label_end..].starts_with(')') {
                paren_ends.push(label_end + 1);
            }
            paren_ends.push(label_end);

            for paren_end in paren_ends {
                // Greedy \s*: every whitespace boundary, longest first.
                let mut text_starts = vec![paren_end];
                text_starts.extend(
                    line[paren_end..]
                        .char_indices()
                        .take_while(|(_, c)| c.is_whitespace())
                        .map(|(i, c)| paren_end + i + c.len_utf8()),
                );

                // `(.+?)` needs one char; `$` then always satisfies the lookahead.
                if let Some(&text_start) = text_starts.iter().rev().find(|&&s| s < line.len()) {
                    let text_end = self.text_end(line, text_start);
                    let token = OptionToken {
                        label: &line[label_start..label_end],
                        text: &line[text_start..text_end],
                    };
                    return Some((token, text_end));
                }
            }
        }

        None
    }

    /// Shortest non-empty text from `text_start` that is followed by another
    /// label token or the end of the line.
    fn text_end(&self, line: &str, text_start: usize) -> usize {
        line[text_start..]
            .char_indices()
            .skip(1)
            .map(|(i, _)| text_start + i)
            .find(|&end| self.terminator.is_match(&line[end..]))
            .unwrap_or(line.len())
    }
}

/// Compiled form of [`RulesConfig`], ready for scanning.
#[derive(Debug, Clone)]
pub struct ScanRules {
    question_patterns: Vec<Regex>,
    options: OptionMatcher,
    continuation_guards: Vec<String>,
}

impl ScanRules {
    pub fn compile(config: &RulesConfig) -> Result<Self, RulesError> {
        let question_patterns = config
            .question_patterns
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| RulesError::InvalidPattern {
                        pattern: pattern.clone(),
                        message: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            question_patterns,
            options: OptionMatcher::new(&config.label_class)?,
            continuation_guards: config.continuation_guards.clone(),
        })
    }

    /// Whether `line` starts a new question.
    pub fn is_question_header(&self, line: &str) -> bool {
        self.question_patterns.iter().any(|re| re.is_match(line))
    }

    /// Option tokens in `line`, formatted as `"<label>. <text>"`.
    pub fn options_in(&self, line: &str) -> Vec<String> {
        self.options
            .find_all(line)
            .iter()
            .map(OptionToken::format)
            .collect()
    }

    /// Whether `line` begins with a bare option label such as `b)`.
    pub fn starts_with_label(&self, line: &str) -> bool {
        self.continuation_guards
            .iter()
            .any(|guard| line.starts_with(guard.as_str()))
    }
}
