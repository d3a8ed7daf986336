use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::sync::watch;

use formflow::config::Config;
use formflow::form::FormSnapshot;
use formflow::logging::init_tracing;
use formflow::person::{Person, PersonField, PersonForm, SimulatedServer};
use formflow::view::{field_info, SubmitAction};

/// Pause between simulated keystrokes; shorter than the debounce window.
const KEYSTROKE_INTERVAL: Duration = Duration::from_millis(80);

#[derive(Parser, Debug)]
#[command(
    name = "formflow",
    version,
    about = "Create-person form with debounced validation and server-side submit errors"
)]
struct Cli {
    /// Config file (defaults to ~/.config/formflow/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the final form state as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill in the form and submit it
    Submit {
        #[arg(long)]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, value_enum, default_value_t = ActionArg::Close)]
        action: ActionArg,
    },
    /// Type a first name and report what the validators say
    Validate { value: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ActionArg {
    /// Create and close
    Close,
    /// Create and continue editing
    Continue,
}

impl From<ActionArg> for SubmitAction {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Close => SubmitAction::CreateAndClose,
            ActionArg::Continue => SubmitAction::CreateAndContinue,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    let server = Arc::new(SimulatedServer::new(&config.server));
    let person_form = PersonForm::new(&config.validation, server);
    let renderer = tokio::spawn(render_updates(person_form.form().subscribe()));

    match cli.command {
        Command::Validate { value } => {
            type_into(&person_form, PersonField::FirstName, &value).await;
            person_form.form().handle_blur(PersonField::FirstName);
            person_form.form().validation_settled().await;
        }
        Command::Submit {
            first_name,
            last_name,
            action,
        } => {
            let action = SubmitAction::from(action);
            type_into(&person_form, PersonField::FirstName, &first_name).await;
            person_form.form().handle_blur(PersonField::FirstName);
            type_into(&person_form, PersonField::LastName, &last_name).await;
            person_form.form().handle_blur(PersonField::LastName);

            println!("[{}]", action.label(person_form.form().is_submitting()));
            match person_form.submit().await {
                Ok(Some(person)) => println!("{}", action.success_message(&person)),
                Ok(None) => println!("Not created; the form stays open for editing."),
                Err(err) => println!("Not submitted: {err}"),
            }
        }
    }

    let snapshot = person_form.form().snapshot();
    // Closing the last sender ends the renderer once it has drained every update.
    drop(person_form);
    let _ = renderer.await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_summary(&snapshot);
    }
    Ok(())
}

/// Feed `text` into `field` one keystroke at a time.
async fn type_into(form: &PersonForm, field: PersonField, text: &str) {
    if text.is_empty() {
        form.form().handle_change(field, "");
        return;
    }
    for (end, _) in text.char_indices().skip(1) {
        form.form().handle_change(field, &text[..end]);
        tokio::time::sleep(KEYSTROKE_INTERVAL).await;
    }
    form.form().handle_change(field, text);
}

/// Print a field's inline status whenever it changes.
async fn render_updates(mut updates: watch::Receiver<FormSnapshot<Person>>) {
    let mut shown: HashMap<&'static str, Option<String>> = HashMap::new();
    while updates.changed().await.is_ok() {
        let infos: Vec<_> = {
            let snapshot = updates.borrow_and_update();
            snapshot
                .fields
                .iter()
                .map(|field| (field.name, field_info(field)))
                .collect()
        };
        for (name, info) in infos {
            if shown.get(name) == Some(&info) {
                continue;
            }
            if let Some(text) = &info {
                println!("  {name}: {text}");
            }
            shown.insert(name, info);
        }
    }
}

fn print_summary(snapshot: &FormSnapshot<Person>) {
    for field in &snapshot.fields {
        let status = field_info(field).unwrap_or_else(|| "ok".to_string());
        println!("{} = {:?} ({})", field.name, field.value, status);
        for (source, message) in field.meta.error_map.iter() {
            println!("  {source}: {message}");
        }
    }
    println!("canSubmit: {}", snapshot.can_submit);
}
