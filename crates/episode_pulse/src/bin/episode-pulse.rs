use clap::{Parser, Subcommand};
use episode_datastore::{DataStore, NewEpisode, PgDataStore, SourceType};
use episode_pulse::{
    extract_video_id, gemini::GeminiClient, tracing::init_tracing_subscriber,
    yt::transcript::YtTranscriptClient, EpisodeProcessorBuilder,
};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "episode-pulse", about = "Podcast episode transcript analysis pipeline")]
struct Cli {
    /// Database connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY")]
    gemini_key: String,

    /// Preferred transcript language code (first available track when unset)
    #[arg(long, env = "TRANSCRIPT_LANGUAGE")]
    language: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an episode record and run the analysis pipeline to completion
    Ingest {
        source_url: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, default_value = "youtube")]
        source_type: SourceType,

        #[arg(long)]
        category: Option<String>,

        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Fetch and analyze a video without persisting anything
    Analyze { source_url: String },
    /// Show the processing status of an episode
    Status { id: Uuid },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let store = PgDataStore::init(&cli.database_url).await?;

    let mut transcript_client = YtTranscriptClient::new();
    if let Some(language) = cli.language {
        transcript_client = transcript_client.with_language(language);
    }

    let processor = EpisodeProcessorBuilder::new()
        .store(store.clone())
        .transcript_provider(transcript_client)
        .analyzer(GeminiClient::new(&cli.gemini_key))
        .build();

    match cli.command {
        Command::Ingest {
            source_url,
            title,
            description,
            source_type,
            category,
            tags,
        } => {
            let episode = processor
                .ingest(NewEpisode {
                    title,
                    description,
                    source_url,
                    source_type,
                    category,
                    tags,
                })
                .await?;

            tracing::info!(
                episode_id = %episode.id,
                status = %episode.processing_status,
                "Ingest finished"
            );
            print_status(&episode);
        }
        Command::Analyze { source_url } => {
            let video_id = extract_video_id(&source_url)
                .ok_or_else(|| anyhow::anyhow!("Invalid YouTube URL: {source_url}"))?;
            let metadata = YtTranscriptClient::new()
                .fetch_video_metadata(&video_id)
                .await?;
            println!("{}\n", metadata.title);

            let processed = processor.process(&source_url).await?;
            let sections = &processed.analysis.sections;

            println!("# Summary\n{}\n", sections.summary);
            print_section("Business Ideas", &sections.business_ideas);
            print_section("Frameworks", &sections.frameworks);
            print_section("Founder Stories", &sections.founder_stories);
        }
        Command::Status { id } => match store.get_episode(id).await? {
            Some(episode) => print_status(&episode),
            None => anyhow::bail!("Episode {id} not found"),
        },
    }

    Ok(())
}

fn print_status(episode: &episode_datastore::Episode) {
    println!("{}  {}  {}", episode.id, episode.processing_status, episode.title);
    if let Some(error) = &episode.processing_error {
        println!("  error: {error}");
    }
}

fn print_section(heading: &str, items: &[String]) {
    println!("# {heading}");
    for item in items {
        println!("- {item}");
    }
    println!();
}
