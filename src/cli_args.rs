use clap::{Parser, Subcommand};
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineArgs {
    #[arg(
        long,
        default_value = "settings.json",
        help = "Path to the settings file"
    )]
    pub settings: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch a blog's posts page by page and save them as an XML archive
    Archive {
        #[arg(long, help = "Blog host, e.g. demo.tumblr.com, or a full URL")]
        host: String,

        #[arg(long, help = "Posts per page (defaults to the settings value)")]
        num: Option<u32>,

        #[arg(long = "type", help = "Only archive posts of this type")]
        post_type: Option<String>,

        #[arg(long, help = "Archive file path (defaults to the save location)")]
        output: Option<String>,
    },

    /// Publish one post built from the given fields
    Publish {
        #[arg(long = "type", help = "Post type: regular, quote, photo, link, conversation, video")]
        post_type: String,

        #[arg(long, help = "Title (regular, conversation)")]
        title: Option<String>,

        #[arg(long, help = "Body text (regular)")]
        body: Option<String>,

        #[arg(long, help = "Quoted text (quote)")]
        text: Option<String>,

        #[arg(long, help = "Quote attribution or photo source (quote, photo)")]
        source: Option<String>,

        #[arg(long, help = "Caption (photo, video)")]
        caption: Option<String>,

        #[arg(long, help = "Link target (link)")]
        url: Option<String>,

        #[arg(long, help = "Link text (link)")]
        name: Option<String>,

        #[arg(long, help = "Link description (link)")]
        description: Option<String>,

        #[arg(long, help = "Conversation transcript (conversation)")]
        conversation: Option<String>,

        #[arg(long, help = "Embed markup or URL (video)")]
        embed: Option<String>,
    },

    /// Summarize a saved archive file
    Info {
        #[arg(long, help = "Archive file to inspect")]
        file: String,
    },
}

impl CommandLineArgs {
    pub fn parse_args() -> Self {
        let args = CommandLineArgs::parse();

        match &args.command {
            Command::Archive { host, .. } => info!("Archive requested for {}", host),
            Command::Publish { post_type, .. } => info!("Publish requested ({})", post_type),
            Command::Info { file } => info!("Info requested for {}", file),
        }

        args
    }
}
