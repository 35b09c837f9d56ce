use clap::Parser;
use front::{
    api,
    command::{self, Command},
    ui, Data, Msg,
};
use rustyline::{error::ReadlineError, DefaultEditor};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Terminal client for the tally todo list")]
struct Args {
    #[arg(long, env = "API_URL", default_value = "http://localhost:5000")]
    api_url: String,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // request failures are logged here; the screen only shows a short message
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let args = Args::parse();
    let client = api::Client::new(&args.api_url);

    match client.health().await {
        Ok(health) => info!(url = client.base_url(), status = %health.status, "server is up"),
        Err(err) => warn!(url = client.base_url(), "health check failed: {:?}", err),
    }

    let mut data = Data::default();
    data.begin_load();
    println!("{}", ui::view(&data));
    data.update(Msg::Loaded(client.get_todos().await));

    let mut editor = DefaultEditor::new()?;

    loop {
        println!("\n{}\n", ui::view(&data));

        let line = match editor.readline("tally> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };

        if !line.trim().is_empty() {
            editor.add_history_entry(line.as_str())?;
        }

        match Command::parse(&line) {
            Command::Draft(text) => data.draft = text,
            Command::Add(text) => {
                if let Some(text) = text {
                    data.draft = text;
                }

                match data.begin_create() {
                    Some(body) => data.update(Msg::Created(client.add_todo(&body).await)),
                    None => println!("nothing to add"),
                }
            }
            Command::Toggle(position) => match data.toggle(position - 1) {
                Some((id, body)) => {
                    data.update(Msg::Toggled(client.update_todo(id, &body).await));
                }
                None => println!("no todo #{}", position),
            },
            Command::Delete(position) => match data.delete(position - 1) {
                Some(id) => {
                    let result = client.delete_todo(id).await;
                    data.update(Msg::Deleted(id, result));
                }
                None => println!("no todo #{}", position),
            },
            Command::Refresh => {
                data.begin_load();
                data.update(Msg::Loaded(client.get_todos().await));
            }
            Command::Help => println!("{}", command::HELP),
            Command::Quit => break,
            Command::Invalid(reason) => println!("{}", reason),
        }
    }

    Ok(())
}
