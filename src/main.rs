use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tumblr_archive::api::{base_url_for, NewPost, Reader, Writer};
use tumblr_archive::cli_args::{Command, CommandLineArgs};
use tumblr_archive::common::constants::{PROGRESS_BAR_CHARS, PROGRESS_BAR_TEMPLATE};
use tumblr_archive::error::Error;
use tumblr_archive::model::Data;
use tumblr_archive::settings::Settings;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let start_time = Instant::now();
    info!(
        "Tumblr Archive Tool v{} starting up...",
        env!("CARGO_PKG_VERSION")
    );

    debug!("Parsing command line arguments...");
    let cli_args = CommandLineArgs::parse_args();

    debug!("Loading application settings...");
    let settings = Settings::load(&cli_args.settings)?;

    match &cli_args.command {
        Command::Archive {
            host,
            num,
            post_type,
            output,
        } => run_archive(&settings, host, *num, post_type.clone(), output.clone())?,
        Command::Publish { .. } => run_publish(&settings, &cli_args.command)?,
        Command::Info { file } => run_info(file)?,
    }

    let elapsed = start_time.elapsed();
    info!("Done in {:.2} seconds", elapsed.as_secs_f64());
    Ok(())
}

fn run_archive(
    settings: &Settings,
    host: &str,
    num: Option<u32>,
    post_type: Option<String>,
    output: Option<String>,
) -> Result<()> {
    let base_url = base_url_for(host);
    let num = num.unwrap_or(settings.page_size);

    info!("Probing {} for post count...", base_url);
    let reader = Reader::new(&base_url, num, post_type)
        .with_context(|| format!("Failed to reach {}", base_url))?;

    let pages = reader.last_page();
    info!(
        "{} posts reported, fetching {} page(s) of {}",
        reader.total(),
        pages,
        num
    );

    let pb = create_progress_bar(pages);
    let mut data = Data::new();
    for pos in 0..pages {
        pb.set_message(format!("page {}/{}", pos + 1, pages));
        let page = reader
            .page(pos)
            .with_context(|| format!("Failed to fetch page {}", pos))?;
        debug!("Page {} carried {} posts", pos, page.post_count());
        data.merge(page);
        pb.inc(1);
    }
    pb.finish_with_message(format!("Fetched {} posts", data.post_count()));

    let output = match output {
        Some(path) => PathBuf::from(path),
        None => default_archive_path(&settings.default_save_location, host),
    };
    write_archive(&data, &output)?;

    info!("Archive of {} saved at {}", host, output.display());
    Ok(())
}

fn create_progress_bar(pages: u32) -> ProgressBar {
    let pb = ProgressBar::new(pages as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_BAR_TEMPLATE)
            .unwrap()
            .progress_chars(PROGRESS_BAR_CHARS),
    );
    pb
}

fn default_archive_path(save_location: &str, host: &str) -> PathBuf {
    let file_name: String = host
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
        .chars()
        .map(|c| if c == '/' || c == ':' { '_' } else { c })
        .collect();
    Path::new(save_location).join(format!("{}.xml", file_name))
}

fn write_archive(data: &Data, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            debug!("Creating directory structure: {:?}", parent);
            fs::create_dir_all(parent)?;
        }
    }
    data.save(path)
        .with_context(|| format!("Failed to save archive to {}", path.display()))?;
    Ok(())
}

fn run_publish(settings: &Settings, command: &Command) -> Result<()> {
    let post = build_new_post(command)?;
    let writer = Writer::new(
        &settings.write_base_url,
        &settings.auth.email,
        &settings.auth.password,
        &settings.generator,
    );

    match writer.publish(&post) {
        Ok(id) => {
            info!("Published new {} post", post.type_name());
            println!("{}", id);
            Ok(())
        }
        Err(Error::Auth) => {
            error!("Credentials rejected. Check the auth section of settings.json.");
            Err(Error::Auth.into())
        }
        Err(Error::BadRequest(msg)) => {
            error!("Server rejected the post: {}", msg);
            Err(Error::BadRequest(msg).into())
        }
        Err(e) => {
            error!("Publish failed: {}", e);
            Err(e.into())
        }
    }
}

fn build_new_post(command: &Command) -> Result<NewPost> {
    let Command::Publish {
        post_type,
        title,
        body,
        text,
        source,
        caption,
        url,
        name,
        description,
        conversation,
        embed,
    } = command
    else {
        unreachable!("publish driver called for a non-publish command");
    };

    let post = match post_type.as_str() {
        "regular" => NewPost::Regular {
            title: title.clone(),
            body: required_field(body, "--body")?,
        },
        "quote" => NewPost::Quote {
            text: required_field(text, "--text")?,
            source: source.clone(),
        },
        "photo" => NewPost::Photo {
            source: required_field(source, "--source")?,
            caption: caption.clone(),
        },
        "link" => NewPost::Link {
            url: required_field(url, "--url")?,
            name: name.clone(),
            description: description.clone(),
        },
        "conversation" => NewPost::Conversation {
            conversation: required_field(conversation, "--conversation")?,
            title: title.clone(),
        },
        "video" => NewPost::Video {
            embed: required_field(embed, "--embed")?,
            caption: caption.clone(),
        },
        other => anyhow::bail!(
            "Unknown post type '{}'. Expected one of: regular, quote, photo, link, conversation, video",
            other
        ),
    };

    Ok(post)
}

fn required_field(value: &Option<String>, flag: &str) -> Result<String> {
    value
        .clone()
        .ok_or_else(|| anyhow::anyhow!("{} is required for this post type", flag))
}

fn run_info(file: &str) -> Result<()> {
    let data = Data::load(file).with_context(|| format!("Failed to load archive {}", file))?;

    match &data.tumblelog {
        Some(log) => info!(
            "Blog '{}' ({}), timezone {}",
            log.title,
            log.name,
            log.timezone.name()
        ),
        None => info!("Archive carries no blog metadata"),
    }

    match &data.posts {
        Some(posts) => info!(
            "{} posts in archive, {} reported by source",
            posts.posts.len(),
            posts.total
        ),
        None => info!("Archive carries no posts"),
    }

    Ok(())
}
