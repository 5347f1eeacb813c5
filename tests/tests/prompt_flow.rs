use std::collections::HashMap;
use std::fs;

use domain::prompt::{chat_prompt, research_summary_template, PromptTemplate};
use domain::session::{ChatSession, Message, Role};
use infrastructure::{history_store, template_store};
use tests::scratch_dir;

fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn research_template_survives_a_disk_round_trip() {
    let dir = scratch_dir("template");
    let path = dir.join("template.json");

    let template = research_summary_template();
    template_store::save_prompt(&path, &template).unwrap();
    let loaded = template_store::load_prompt(&path).unwrap();
    assert_eq!(loaded, template);

    let rendered = loaded
        .render(&values(&[
            ("paper_input", "Deep Residual Learning for Image Recognition"),
            ("style_input", "Academic"),
            ("length_input", "Medium (3-4 paragraphs)"),
        ]))
        .unwrap();
    assert!(rendered.contains("Deep Residual Learning"));
    assert!(rendered.contains("Academic"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn invalid_templates_are_rejected_on_load() {
    let dir = scratch_dir("bad_template");
    let path = dir.join("template.json");

    // Declares a variable the body never references.
    let broken = PromptTemplate {
        template: "no placeholders here".to_string(),
        input_variables: vec!["ghost".to_string()],
    };
    fs::create_dir_all(&dir).unwrap();
    fs::write(&path, serde_json::to_string_pretty(&broken).unwrap()).unwrap();

    assert!(template_store::load_prompt(&path).is_err());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn chat_prompt_replays_a_persisted_transcript() {
    let dir = scratch_dir("history");
    let path = dir.join("history.json");

    let mut session = ChatSession::new("You are a helpful assistant.");
    session.push_user("Hello, how are you?");
    session.push_assistant("Doing well, thanks.");
    history_store::save_history(&path, session.transcript()).unwrap();

    let restored = history_store::load_history(&path).unwrap();
    assert_eq!(restored, session.transcript().to_vec());

    let prompt = chat_prompt("You are a helpful assistant.");
    let mut histories = HashMap::new();
    histories.insert("chat_history".to_string(), restored);
    let messages = prompt
        .render(&values(&[("query", "And what can you do?")]), &histories)
        .unwrap();

    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0].role, Role::System);
    assert_eq!(messages[1], Message::new(Role::User, "Hello, how are you?"));
    assert_eq!(messages[3].content, "And what can you do?");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_history_file_is_an_empty_transcript() {
    let dir = scratch_dir("no_history");
    let restored = history_store::load_history(&dir.join("history.json")).unwrap();
    assert!(restored.is_empty());
}
