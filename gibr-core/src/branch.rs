//! # Branch Name Templates
//!
//! Renders branch names from a format string such as `{issue}-{title}`.
//! Templates are parsed once up front so that unknown placeholders are
//! reported before any tracker call is made.

use std::fmt;

use thiserror::Error;

use crate::issue::Issue;

/// Errors raised while parsing a branch name template
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
  #[error("Unknown placeholder in format: {0}")]
  UnknownPlaceholder(String),
  #[error("Malformed branch name format '{format}': {reason}")]
  Malformed { format: String, reason: String },
}

/// Issue fields that may appear in a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
  /// `{issue}`: the issue id
  Issue,
  /// `{issuetype}`: the issue type
  IssueType,
  /// `{title}`: the slugified title
  Title,
  /// `{assignee}`: the normalized assignee
  Assignee,
}

impl Placeholder {
  /// Look up a placeholder by its name inside the braces.
  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "issue" => Some(Self::Issue),
      "issuetype" => Some(Self::IssueType),
      "title" => Some(Self::Title),
      "assignee" => Some(Self::Assignee),
      _ => None,
    }
  }

  /// Name of the placeholder as written in templates.
  pub const fn name(self) -> &'static str {
    match self {
      Self::Issue => "issue",
      Self::IssueType => "issuetype",
      Self::Title => "title",
      Self::Assignee => "assignee",
    }
  }

  fn render(self, issue: &Issue) -> String {
    match self {
      Self::Issue => issue.id.clone(),
      Self::IssueType => issue.issue_type.clone(),
      Self::Title => issue.sanitized_title(),
      // Literal substitution; callers check `requires_assignee` first.
      Self::Assignee => issue.assignee.clone().unwrap_or_else(|| "None".to_string()),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
  Literal(String),
  Field(Placeholder),
}

/// A parsed branch name template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchNameTemplate {
  format: String,
  segments: Vec<Segment>,
}

impl BranchNameTemplate {
  /// Parse a template, rejecting unknown placeholders and stray braces.
  ///
  /// `{{` and `}}` produce literal braces.
  pub fn parse(format: &str) -> Result<Self, TemplateError> {
    let malformed = |reason: &str| TemplateError::Malformed {
      format: format.to_string(),
      reason: reason.to_string(),
    };

    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
      match c {
        '{' if chars.peek() == Some(&'{') => {
          chars.next();
          literal.push('{');
        }
        '}' if chars.peek() == Some(&'}') => {
          chars.next();
          literal.push('}');
        }
        '{' => {
          let mut name = String::new();
          let mut closed = false;
          for next in chars.by_ref() {
            match next {
              '}' => {
                closed = true;
                break;
              }
              '{' => return Err(malformed("nested '{' inside a placeholder")),
              other => name.push(other),
            }
          }
          if !closed {
            return Err(malformed("unclosed '{'"));
          }
          if name.is_empty() {
            return Err(malformed("empty placeholder '{}'"));
          }
          let placeholder = Placeholder::from_name(&name).ok_or(TemplateError::UnknownPlaceholder(name))?;
          if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
          }
          segments.push(Segment::Field(placeholder));
        }
        '}' => return Err(malformed("single '}' encountered")),
        other => literal.push(other),
      }
    }

    if !literal.is_empty() {
      segments.push(Segment::Literal(literal));
    }

    Ok(Self {
      format: format.to_string(),
      segments,
    })
  }

  /// The original format string.
  pub fn format(&self) -> &str {
    &self.format
  }

  /// Whether the template references `placeholder`.
  pub fn uses(&self, placeholder: Placeholder) -> bool {
    self.segments.iter().any(|s| *s == Segment::Field(placeholder))
  }

  /// Whether rendering needs an assigned issue.
  pub fn requires_assignee(&self) -> bool {
    self.uses(Placeholder::Assignee)
  }

  /// Render the branch name for `issue`.
  pub fn generate(&self, issue: &Issue) -> String {
    self
      .segments
      .iter()
      .map(|segment| match segment {
        Segment::Literal(text) => text.clone(),
        Segment::Field(placeholder) => placeholder.render(issue),
      })
      .collect()
  }
}

impl fmt::Display for BranchNameTemplate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.format)
  }
}

/// Parse `format` and render it for `issue` in one step.
pub fn generate(format: &str, issue: &Issue) -> Result<String, TemplateError> {
  Ok(BranchNameTemplate::parse(format)?.generate(issue))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_issue() -> Issue {
    Issue::new(17, "Fix login bug")
      .with_type("Bug")
      .with_assignee(Some("alice".to_string()))
  }

  #[test]
  fn test_generate_issue_and_title() {
    let branch = generate("{issue}-{title}", &Issue::new(17, "Fix login bug")).unwrap();
    assert_eq!(branch, "17-fix-login-bug");
  }

  #[test]
  fn test_generate_all_placeholders() {
    let branch = generate("{assignee}/{issuetype}/{issue}-{title}", &sample_issue()).unwrap();
    assert_eq!(branch, "alice/Bug/17-fix-login-bug");
  }

  #[test]
  fn test_unknown_placeholder_is_named() {
    let err = generate("{issue}-{unknown}", &sample_issue()).unwrap_err();
    assert_eq!(err, TemplateError::UnknownPlaceholder("unknown".to_string()));
    assert!(err.to_string().contains("unknown"));
  }

  #[test]
  fn test_missing_assignee_renders_literal_none() {
    let issue = Issue::new(3, "Unowned");
    let template = BranchNameTemplate::parse("{assignee}/{issue}").unwrap();

    assert!(template.requires_assignee());
    assert_eq!(template.generate(&issue), "None/3");
  }

  #[test]
  fn test_escaped_braces() {
    let branch = generate("{{team}}-{issue}", &sample_issue()).unwrap();
    assert_eq!(branch, "{team}-17");
  }

  #[test]
  fn test_malformed_templates() {
    for format in ["{issue", "issue}", "{}", "{iss{ue}"] {
      let result = BranchNameTemplate::parse(format);
      assert!(
        matches!(result, Err(TemplateError::Malformed { .. })),
        "expected malformed error for {format}"
      );
    }
  }

  #[test]
  fn test_template_without_placeholders() {
    let template = BranchNameTemplate::parse("static-name").unwrap();
    assert!(!template.requires_assignee());
    assert_eq!(template.generate(&sample_issue()), "static-name");
    assert_eq!(template.to_string(), "static-name");
  }
}
