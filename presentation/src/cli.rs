use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use application::chat_service::ChatService;
use application::recipe_service::RecipeExplorer;
use application::similarity_service::SimilarityService;
use application::summarize_service::SummarizeService;
use clap::Parser;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect, Select};
use domain::prompt;
use domain::recipe::{self, Difficulty, Recipe, RecipeCatalog, RecipeFilter, SortOrder};
use domain::session::ChatSession;
use infrastructure::config::Config;
use infrastructure::embedder::Embedder;
use infrastructure::favorites_store::FavoritesStore;
use infrastructure::ollama_client::OllamaClient;
use infrastructure::response_cache::ResponseCache;
use infrastructure::template_store;
use shared::confirmation::ask_confirmation;
use shared::types::Result;
use shared::utils::parse_var;

// Option lists for the interactive summarize mode.
const PAPER_CHOICES: &[&str] = &[
    "Attention Is All You Need",
    "GPT: A Language Model API",
    "Deep Residual Learning for Image Recognition",
    "Knowledge Distillation of Neural Networks",
    "BERT: Pre-training of Deep Bidirectional Transformers for Language Understanding",
    "Recurrent Neural Network",
    "Transformer: A Novel Architecture for Neural Machine Translation",
    "Universal Language Model Capability with Deep Residual Learning",
];
const STYLE_CHOICES: &[&str] = &["Academic", "Informal", "Technical", "Non-Technical"];
const LENGTH_CHOICES: &[&str] = &[
    "Short (1-2 paragraphs)",
    "Medium (3-4 paragraphs)",
    "Long (5-6 paragraphs)",
];

#[derive(Parser)]
#[command(name = "sage-cli")]
#[command(about = "Local-LLM playground: chat, prompt templates, and document similarity via Ollama")]
pub struct Cli {
    /// Enter interactive chat mode (history persists between runs)
    #[arg(long)]
    pub chat: bool,

    /// Rank documents from --docs against a query
    #[arg(long)]
    pub similar: bool,

    /// Render a prompt template with --var values and print it
    #[arg(long)]
    pub render: bool,

    /// Summarize a research paper through a prompt template
    #[arg(long)]
    pub summarize: bool,

    /// Browse the recipe demo catalog
    #[arg(long)]
    pub recipes: bool,

    /// Write the built-in research template to --template (default template.json)
    #[arg(long)]
    pub init_template: bool,

    /// File with one document per line (for --similar)
    #[arg(long)]
    pub docs: Option<PathBuf>,

    /// Prompt template file (for --render / --summarize / --init-template)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Template variable, repeatable: --var key=value
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Chat history file (defaults to the data directory)
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Also show the top N ranked documents (for --similar)
    #[arg(long)]
    pub top: Option<usize>,

    /// Print the similarity report as JSON (for --similar)
    #[arg(long)]
    pub json: bool,

    /// Skip the response cache
    #[arg(long)]
    pub no_cache: bool,

    /// Clear the response cache and exit
    #[arg(long)]
    pub clear_cache: bool,

    /// The query or prompt to process
    #[arg(trailing_var_arg = true)]
    pub args: Vec<String>,
}

pub struct CliApp {
    config: Config,
}

impl CliApp {
    pub fn new() -> Self {
        Self {
            config: Config::load(),
        }
    }

    pub async fn run(&mut self, cli: Cli) -> Result<()> {
        let args_str = cli.args.join(" ");

        if cli.clear_cache {
            ResponseCache::new(self.config.cache_path()).clear()?;
            println!("Response cache cleared.");
            return Ok(());
        }

        if cli.chat {
            self.handle_chat(cli.history).await
        } else if cli.similar {
            self.handle_similar(cli.docs.as_deref(), &args_str, cli.top, cli.json)
                .await
        } else if cli.render {
            self.handle_render(cli.template.as_deref(), &cli.vars)
        } else if cli.summarize {
            self.handle_summarize(cli.template.as_deref(), &cli.vars).await
        } else if cli.recipes {
            self.handle_recipes()
        } else if cli.init_template {
            self.handle_init_template(cli.template.as_deref())
        } else {
            self.handle_ask(&args_str, cli.no_cache).await
        }
    }

    async fn handle_ask(&self, prompt_text: &str, no_cache: bool) -> Result<()> {
        let prompt_text = if prompt_text.trim().is_empty() {
            ask_text("Prompt")?
        } else {
            prompt_text.to_string()
        };

        let cache = ResponseCache::new(self.config.cache_path());
        if !no_cache {
            if let Some(cached) = cache.lookup(&prompt_text)? {
                println!("{}", "Cached answer:".green().bold());
                println!("{}", cached);
                if ask_confirmation("Use the cached answer?", true)? {
                    return Ok(());
                }
            }
        }

        let client = OllamaClient::new(&self.config);
        let mut session = ChatSession::new(&self.config.system_prompt);
        session.push_user(prompt_text.clone());

        eprintln!("Thinking...");
        let answer = client.chat(&session.messages).await?;
        session.push_assistant(answer.clone());

        println!("{}", answer);
        if !no_cache {
            cache.store(&prompt_text, &answer)?;
        }
        Ok(())
    }

    async fn handle_chat(&self, history_path: Option<PathBuf>) -> Result<()> {
        let client = OllamaClient::new(&self.config);
        let service = ChatService::new(client, &self.config, history_path);
        let mut history = service.load_history()?;
        if !history.is_empty() {
            println!(
                "{}",
                format!("Resuming chat with {} saved messages.", history.len()).cyan()
            );
        }
        println!("Chat mode. Type 'exit' to quit.");

        loop {
            let input: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("You")
                .interact_text()?;
            let trimmed = input.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
                break;
            }

            eprintln!("Thinking...");
            let reply = service.turn(&mut history, trimmed).await?;
            println!("{} {}", "AI:".green().bold(), reply);
            service.save_history(&history)?;
        }
        Ok(())
    }

    async fn handle_similar(
        &self,
        docs: Option<&Path>,
        query: &str,
        top: Option<usize>,
        json: bool,
    ) -> Result<()> {
        let docs_path =
            docs.ok_or_else(|| anyhow!("--similar needs --docs <file> with one document per line"))?;
        let raw = std::fs::read_to_string(docs_path)
            .with_context(|| format!("failed to read documents from {:?}", docs_path))?;
        let documents: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        if documents.is_empty() {
            return Err(anyhow!("{:?} contains no documents", docs_path));
        }

        let query = if query.trim().is_empty() {
            ask_text("Query")?
        } else {
            query.to_string()
        };

        let client = OllamaClient::new(&self.config);
        let service = SimilarityService::new(Embedder::new(client));
        let report = service.search(&documents, &query).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!("{} {}", "Query:".green().bold(), report.query);
        println!("{} {}", "Best match:".green().bold(), report.best.text);
        println!(
            "{} {:.4} (document {})",
            "Similarity score:".green().bold(),
            report.best.score,
            report.best.index
        );

        if let Some(top) = top {
            println!("\n{}", "Ranking:".cyan().bold());
            for m in report.ranking.iter().take(top) {
                println!("  {} {:.4}  {}", format!("[{}]", m.index).blue(), m.score, m.text);
            }
        }
        Ok(())
    }

    fn handle_render(&self, template_path: Option<&Path>, vars: &[String]) -> Result<()> {
        let template_path =
            template_path.ok_or_else(|| anyhow!("--render needs --template <file>"))?;
        let template = template_store::load_prompt(template_path)?;
        let values = collect_vars(vars)?;
        let rendered = template.render(&values)?;
        println!("{}", rendered);
        Ok(())
    }

    async fn handle_summarize(&self, template_path: Option<&Path>, vars: &[String]) -> Result<()> {
        let template = match template_path {
            Some(path) => template_store::load_prompt(path)?,
            None => prompt::research_summary_template(),
        };

        let mut values = collect_vars(vars)?;
        for variable in template.placeholders()? {
            if !values.contains_key(&variable) {
                let value = select_value(&variable)?;
                values.insert(variable, value);
            }
        }

        let client = OllamaClient::new(&self.config);
        let service = SummarizeService::new(client);
        eprintln!("Summarizing...");
        let summary = service.run(&template, &values).await?;
        println!("{}", summary);
        Ok(())
    }

    fn handle_init_template(&self, template_path: Option<&Path>) -> Result<()> {
        let path = template_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("template.json"));
        if path.exists()
            && !ask_confirmation(&format!("{} exists. Overwrite?", path.display()), false)?
        {
            println!("{}", "Left the existing template untouched.".yellow());
            return Ok(());
        }
        let template = prompt::research_summary_template();
        template_store::save_prompt(&path, &template)?;
        println!("{} {}", "Template written to".green(), path.display());
        Ok(())
    }

    fn handle_recipes(&self) -> Result<()> {
        let store = FavoritesStore::new(self.config.favorites_path());
        let mut explorer = RecipeExplorer::new(RecipeCatalog::sample(), store)?;

        loop {
            let actions = [
                "Browse",
                "Search",
                "Pantry check",
                "Favorites",
                "Compare two recipes",
                "Quit",
            ];
            let action = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Recipe explorer")
                .items(&actions)
                .default(0)
                .interact()?;

            match action {
                0 => self.browse_recipes(&mut explorer)?,
                1 => self.search_recipes(&explorer)?,
                2 => self.pantry_check(&explorer)?,
                3 => self.show_favorites(&explorer)?,
                4 => self.compare_recipes(&explorer)?,
                _ => break,
            }
        }
        Ok(())
    }

    fn browse_recipes(&self, explorer: &mut RecipeExplorer) -> Result<()> {
        let mut cuisines = vec!["All".to_string()];
        cuisines.extend(explorer.catalog().cuisines());
        let cuisine_idx = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Cuisine")
            .items(&cuisines)
            .default(0)
            .interact()?;

        let max_time: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Max cook time in minutes (blank for any)")
            .allow_empty(true)
            .interact_text()?;
        let max_time_mins = max_time.trim().parse::<u32>().ok();

        let labels: Vec<&str> = Difficulty::ALL.iter().map(|d| d.as_str()).collect();
        let picked = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Difficulty")
            .items(&labels)
            .defaults(&[true, true, true])
            .interact()?;
        let difficulties: Vec<Difficulty> = picked.into_iter().map(|i| Difficulty::ALL[i]).collect();

        let orders = ["Recommended", "Time (asc)", "Rating (desc)"];
        let order = match Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Sort by")
            .items(&orders)
            .default(0)
            .interact()?
        {
            1 => SortOrder::TimeAscending,
            2 => SortOrder::RatingDescending,
            _ => SortOrder::Recommended,
        };

        let filter = RecipeFilter {
            search: None,
            cuisine: (cuisine_idx > 0).then(|| cuisines[cuisine_idx].clone()),
            max_time_mins,
            difficulties,
        };

        let results: Vec<Recipe> = explorer
            .browse(&filter, order)
            .into_iter()
            .cloned()
            .collect();
        println!("\n{}", format!("{} recipe(s)", results.len()).cyan().bold());
        for recipe in &results {
            print_recipe_card(recipe, explorer.is_favorite(recipe.id));
        }
        if results.is_empty() {
            return Ok(());
        }

        let toggle: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Toggle favorite by id (blank to skip)")
            .allow_empty(true)
            .interact_text()?;
        if let Ok(id) = toggle.trim().parse::<u32>() {
            let title = explorer.catalog().get(id).map(|r| r.title.clone());
            match title {
                Some(title) => {
                    if explorer.toggle_favorite(id)? {
                        println!("{}", format!("Saved '{}' to favorites.", title).green());
                    } else {
                        println!("{}", format!("Removed '{}' from favorites.", title).yellow());
                    }
                }
                None => println!("{}", format!("No recipe with id {}.", id).red()),
            }
        }
        Ok(())
    }

    fn search_recipes(&self, explorer: &RecipeExplorer) -> Result<()> {
        let needle: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Search recipes")
            .interact_text()?;
        let filter = RecipeFilter {
            search: Some(needle.clone()),
            ..RecipeFilter::default()
        };
        let results = explorer.browse(&filter, SortOrder::Recommended);
        if results.is_empty() {
            println!("{}", format!("No recipes match '{}'.", needle).yellow());
            return Ok(());
        }
        for recipe in results {
            print_recipe_card(recipe, explorer.is_favorite(recipe.id));
        }
        Ok(())
    }

    fn pantry_check(&self, explorer: &RecipeExplorer) -> Result<()> {
        let pantry_raw: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("What you have (comma separated)")
            .allow_empty(true)
            .interact_text()?;
        let pantry: Vec<String> = pantry_raw
            .split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if pantry.is_empty() {
            println!("{}", "Enter at least one ingredient.".yellow());
            return Ok(());
        }

        for recipe in explorer.catalog().recipes() {
            let check = recipe::pantry_check(recipe, &pantry);
            if check.is_complete() {
                println!(
                    "{}",
                    format!("{} — you have everything you need.", recipe.title).green()
                );
            } else {
                println!(
                    "{} missing: {}",
                    format!("{} —", recipe.title).yellow(),
                    check.missing.join(", ")
                );
            }
        }
        Ok(())
    }

    fn show_favorites(&self, explorer: &RecipeExplorer) -> Result<()> {
        let favorites = explorer.favorites();
        if favorites.is_empty() {
            println!("{}", "No favorites yet. Toggle one while browsing.".yellow());
            return Ok(());
        }
        for recipe in favorites {
            print_recipe_card(recipe, true);
        }
        Ok(())
    }

    fn compare_recipes(&self, explorer: &RecipeExplorer) -> Result<()> {
        let titles: Vec<String> = explorer
            .catalog()
            .recipes()
            .iter()
            .map(|r| r.title.clone())
            .collect();
        let left = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Left recipe")
            .items(&titles)
            .default(0)
            .interact()?;
        let right = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Right recipe")
            .items(&titles)
            .default(0)
            .interact()?;

        let recipes = explorer.catalog().recipes();
        let (a, b) = (&recipes[left], &recipes[right]);
        println!();
        println!("{:<20} {:<26} {}", "metric", a.title.bold(), b.title.bold());
        for (metric, left_value, right_value) in recipe::compare(a, b) {
            println!("{:<20} {:<26} {}", metric, left_value, right_value);
        }
        Ok(())
    }
}

fn ask_text(label: &str) -> Result<String> {
    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .interact_text()?;
    Ok(value)
}

fn collect_vars(vars: &[String]) -> Result<HashMap<String, String>> {
    let mut values = HashMap::new();
    for raw in vars {
        let (key, value) = parse_var(raw)?;
        values.insert(key, value);
    }
    Ok(values)
}

/// Pick a value for a template variable: a fixed list for the known research
/// variables, free text for anything else.
fn select_value(variable: &str) -> Result<String> {
    let choices = match variable {
        "paper_input" => Some(("Research paper", PAPER_CHOICES)),
        "style_input" => Some(("Explanation style", STYLE_CHOICES)),
        "length_input" => Some(("Explanation length", LENGTH_CHOICES)),
        _ => None,
    };
    match choices {
        Some((label, options)) => {
            let picked = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(label)
                .items(options)
                .default(0)
                .interact()?;
            Ok(options[picked].to_string())
        }
        None => ask_text(variable),
    }
}

fn print_recipe_card(recipe: &Recipe, favorite: bool) {
    let marker = if favorite { "★".yellow() } else { "☆".dimmed() };
    println!(
        "{} {} {}  ·  {}  ·  {} mins  ·  {}  ·  {:.1}",
        marker,
        format!("[{}]", recipe.id).blue(),
        recipe.title.bold(),
        recipe.cuisine,
        recipe.time_mins,
        recipe.difficulty,
        recipe.rating
    );
    println!("    {}", recipe.ingredients.join(", "));
}
