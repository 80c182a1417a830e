//! Ask command - answers a single query from the command line

use clap::Args;
use tracing::debug;

/// Arguments for `ask`
#[derive(Args, Debug)]
pub struct AskArgs {
    /// Query text; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub words: Vec<String>,
}

impl AskArgs {
    pub fn query(&self) -> String {
        self.words.join(" ")
    }
}

/// Answer the query and print the answer to stdout
pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    let config = super::load_config()?;
    let service = crate::build_answer_service(&config).await?;

    let answer = service.answer(&args.query()).await?;
    debug!(source = answer.source.as_str(), "Answered from command line");

    println!("{}", answer.text);

    Ok(())
}
