use fetchbin_client::client::delete_token;
use fetchbin_client::errors::ClientError;
use fetchbin_client::humanize::{humanize, parse_timestamp, year_stamp};
use fetchbin_client::share::{capture, share_request};
use fetchbin_client::state::VotableCard;
use fetchbin_client::{ApiClient, App, ClientConfig, Submission, VoteController, VoteType};
use std::env;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

const USAGE: &str = "usage: fetchbin_client <list | upvote <public_id> | downvote <public_id> \
                     | page [path] | share [-s|--hidden] <command...> | delete <token|url>>";

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env()?;
    let client = ApiClient::new(&config);
    info!(base_url = %client.base_url(), "using fetchbin server");

    let args: Vec<String> = env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["list"] => list(&client).await,
        ["share", "-s" | "--hidden", command @ ..] => share(&client, command, true).await,
        ["share", command @ ..] => share(&client, command, false).await,
        ["delete", token] => delete(&client, token).await,
        [vote, public_id] if vote.parse::<VoteType>().is_ok() => {
            let vote_type = vote.parse::<VoteType>()?;
            cast(client, public_id, vote_type).await
        }
        ["page"] => page(&client, &config.page_path).await,
        ["page", path] => page(&client, path).await,
        _ => Err(USAGE.into()),
    }
}

async fn list(client: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    for output in client.list_outputs().await? {
        println!(
            "{:>5}  {}  {}  ({})",
            output.score(),
            output.public_id,
            output.command.as_deref().unwrap_or("-"),
            parse_timestamp(&output.created_at)
                .map(humanize)
                .unwrap_or_else(|| output.created_at.clone()),
        );
    }
    Ok(())
}

async fn share(
    client: &ApiClient,
    command: &[&str],
    hidden: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let command: Vec<String> = command.iter().map(|word| word.to_string()).collect();
    let content = capture(&command).await?;
    let shared = client
        .share(&share_request(&command, content, hidden))
        .await?;

    println!("Success! Your output has been shared.");
    println!("URL: {}", shared.url);
    println!("Delete URL: {}", shared.delete_url);
    Ok(())
}

async fn delete(client: &ApiClient, input: &str) -> Result<(), Box<dyn std::error::Error>> {
    let token = delete_token(input).ok_or(ClientError::MissingDeleteToken)?;
    client.delete(token).await?;
    println!("Success! The share has been deleted.");
    Ok(())
}

async fn cast(
    client: ApiClient,
    public_id: &str,
    vote_type: VoteType,
) -> Result<(), Box<dyn std::error::Error>> {
    let score = client.get_output(public_id).await?.score();

    let mut controller = VoteController::new(client);
    let card = controller.register(VotableCard::new(public_id, score));
    let submission = controller.submit_vote(&card, vote_type).await;
    let card = card.snapshot().await;

    println!("{}: score {} ({:?})", card.public_id, card.score, card.vote_state());
    if let Some(diagnostic) = &card.diagnostic {
        println!("{}", diagnostic.message);
    }

    match submission {
        Submission::Completed(outcome) if outcome.is_terminal() => Ok(()),
        _ => Err(format!("{vote_type} for {public_id} did not go through").into()),
    }
}

async fn page(client: &ApiClient, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let html = client.fetch_page(path).await?;
    let app = App::load(&html, client.clone());

    for handle in app.controller.cards() {
        let card = handle.snapshot().await;
        println!("{:>5}  {}", card.score, card.public_id);
    }
    for date in &app.dates {
        println!("{} -> {}", date.raw, date.text);
    }
    println!("(c) {}", app.year.clone().unwrap_or_else(year_stamp));
    Ok(())
}
