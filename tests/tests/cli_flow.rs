use clap::Parser;
use presentation::cli::Cli;
use shared::utils::parse_var;

#[test]
fn similar_mode_takes_docs_and_a_trailing_query() {
    let cli = Cli::try_parse_from([
        "sage-cli",
        "--similar",
        "--docs",
        "documents.txt",
        "--top",
        "3",
        "Tell",
        "me",
        "about",
        "Harry",
        "Potter",
    ])
    .unwrap();

    assert!(cli.similar);
    assert_eq!(cli.docs.as_deref().unwrap().to_str(), Some("documents.txt"));
    assert_eq!(cli.top, Some(3));
    assert_eq!(cli.args.join(" "), "Tell me about Harry Potter");
}

#[test]
fn default_mode_collects_the_prompt_from_trailing_args() {
    let cli = Cli::try_parse_from(["sage-cli", "list", "all", "files"]).unwrap();
    assert!(!cli.chat && !cli.similar && !cli.render && !cli.summarize);
    assert_eq!(cli.args.join(" "), "list all files");
}

#[test]
fn template_vars_are_repeatable() {
    let cli = Cli::try_parse_from([
        "sage-cli",
        "--render",
        "--template",
        "template.json",
        "--var",
        "paper_input=Recurrent Neural Network",
        "--var",
        "style_input=Informal",
        "--var",
        "length_input=Short (1-2 paragraphs)",
    ])
    .unwrap();

    assert!(cli.render);
    assert_eq!(cli.vars.len(), 3);

    let (key, value) = parse_var(&cli.vars[0]).unwrap();
    assert_eq!(key, "paper_input");
    assert_eq!(value, "Recurrent Neural Network");
}
