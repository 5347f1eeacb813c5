use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::{Message, Role};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("no value supplied for template variable '{0}'")]
    MissingVariable(String),

    #[error("template references undeclared variable '{0}'")]
    UndeclaredVariable(String),

    #[error("declared variable '{0}' never appears in the template")]
    UnusedVariable(String),

    #[error("unbalanced brace at byte {0}")]
    UnbalancedBrace(usize),
}

/// A text template with `{name}` placeholders. `{{` and `}}` escape literal
/// braces. Declared variables must match the placeholders exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub template: String,
    pub input_variables: Vec<String>,
}

impl PromptTemplate {
    /// Build a template, rejecting it up front if declaration and body disagree.
    pub fn new(
        template: impl Into<String>,
        input_variables: Vec<String>,
    ) -> Result<Self, TemplateError> {
        let prompt = Self {
            template: template.into(),
            input_variables,
        };
        prompt.validate()?;
        Ok(prompt)
    }

    /// Variable names referenced by the template, in order of first use.
    pub fn placeholders(&self) -> Result<Vec<String>, TemplateError> {
        let mut names = Vec::new();
        for token in tokenize(&self.template)? {
            if let Token::Variable(name) = token {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        Ok(names)
    }

    /// Check declared variables against the placeholders in the body.
    pub fn validate(&self) -> Result<(), TemplateError> {
        let referenced = self.placeholders()?;
        for name in &referenced {
            if !self.input_variables.iter().any(|v| v == name) {
                return Err(TemplateError::UndeclaredVariable(name.clone()));
            }
        }
        for declared in &self.input_variables {
            if !referenced.iter().any(|v| v == declared) {
                return Err(TemplateError::UnusedVariable(declared.clone()));
            }
        }
        Ok(())
    }

    /// Substitute placeholder values. Values for names the template never
    /// references are ignored.
    pub fn render(&self, values: &HashMap<String, String>) -> Result<String, TemplateError> {
        render_template(&self.template, values)
    }
}

/// Escape literal braces so arbitrary text can be embedded in a template body.
pub fn escape(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

/// One element of a chat prompt: either a templated message or a placeholder
/// that splices a named message list (typically prior chat history).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChatSegment {
    Message { role: Role, template: String },
    Placeholder { variable: String },
}

/// An ordered chat prompt rendered into a full message list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatPromptTemplate {
    pub segments: Vec<ChatSegment>,
}

impl ChatPromptTemplate {
    pub fn new(segments: Vec<ChatSegment>) -> Self {
        Self { segments }
    }

    /// Render every segment, substituting values into message templates and
    /// splicing the named history lists into placeholder positions.
    pub fn render(
        &self,
        values: &HashMap<String, String>,
        histories: &HashMap<String, Vec<Message>>,
    ) -> Result<Vec<Message>, TemplateError> {
        let mut messages = Vec::new();
        for segment in &self.segments {
            match segment {
                ChatSegment::Message { role, template } => {
                    messages.push(Message::new(*role, render_template(template, values)?));
                }
                ChatSegment::Placeholder { variable } => match histories.get(variable) {
                    Some(history) => messages.extend(history.iter().cloned()),
                    None => return Err(TemplateError::MissingVariable(variable.clone())),
                },
            }
        }
        Ok(messages)
    }
}

/// Chat-mode prompt: system instructions, saved history, then the new query.
pub fn chat_prompt(system_prompt: &str) -> ChatPromptTemplate {
    ChatPromptTemplate::new(vec![
        ChatSegment::Message {
            role: Role::System,
            template: escape(system_prompt),
        },
        ChatSegment::Placeholder {
            variable: "chat_history".to_string(),
        },
        ChatSegment::Message {
            role: Role::User,
            template: "{query}".to_string(),
        },
    ])
}

/// Built-in research-paper summary template, matching the variables the
/// summarize mode asks for.
pub fn research_summary_template() -> PromptTemplate {
    let template = "\
Summarize the research paper titled \"{paper_input}\" with the following specifications:
Explanation Style: {style_input}
Explanation Length: {length_input}

1. Mathematical details: include the key equations (LaTeX) and walk through the derivations step by step.
2. Code and implementation: include representative code snippets and explain the implementation choices.
3. Visualizations: describe the important figures and what they show.
4. Applications: describe real-world applications and what the results mean for them.
5. Future work: state the open problems the paper leaves behind.
6. Conclusion: close with the paper's main takeaway.

If information for a section is not in the paper, say so instead of inventing it.";
    PromptTemplate {
        template: template.to_string(),
        input_variables: vec![
            "paper_input".to_string(),
            "style_input".to_string(),
            "length_input".to_string(),
        ],
    }
}

enum Token {
    Literal(String),
    Variable(String),
}

fn tokenize(template: &str) -> Result<Vec<Token>, TemplateError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();
    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    literal.push('{');
                    continue;
                }
                let mut name = String::new();
                let mut closed = false;
                for (_, inner) in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    name.push(inner);
                }
                if !closed {
                    return Err(TemplateError::UnbalancedBrace(pos));
                }
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(Token::Variable(name.trim().to_string()));
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                    literal.push('}');
                } else {
                    return Err(TemplateError::UnbalancedBrace(pos));
                }
            }
            other => literal.push(other),
        }
    }
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    Ok(tokens)
}

fn render_template(
    template: &str,
    values: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    for token in tokenize(template)? {
        match token {
            Token::Literal(text) => out.push_str(&text),
            Token::Variable(name) => match values.get(&name) {
                Some(value) => out.push_str(value),
                None => return Err(TemplateError::MissingVariable(name)),
            },
        }
    }
    Ok(out)
}
