//! Community feed commands

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::Subcommand;

use advoca::feed::{self, ensure_topic, FeedFilter, Post};
use advoca::store::StateKey;

use super::AppContext;

#[derive(Subcommand)]
pub enum FeedCommand {
    /// Share a post with the community
    Post {
        /// Post text
        text: String,
        /// Topic (new topics are registered automatically)
        #[arg(long)]
        topic: String,
        /// Location tag
        #[arg(long)]
        location: String,
        /// Display name to sign the post with
        #[arg(long)]
        author: Option<String>,
    },

    /// List posts, newest first
    List {
        /// Only these topics (repeatable)
        #[arg(long = "topic")]
        topics: Vec<String>,
        /// Only these locations (repeatable)
        #[arg(long = "location")]
        locations: Vec<String>,
    },

    /// List known topics
    Topics,
}

pub fn run(ctx: &AppContext, command: FeedCommand) -> Result<()> {
    match command {
        FeedCommand::Post {
            text,
            topic,
            location,
            author,
        } => post_command(ctx, text, topic, location, author),
        FeedCommand::List { topics, locations } => list_command(ctx, topics, locations),
        FeedCommand::Topics => topics_command(ctx),
    }
}

fn load_topics(ctx: &AppContext) -> Vec<String> {
    ctx.store
        .load_or(StateKey::Topics, feed::default_topics())
}

fn post_command(
    ctx: &AppContext,
    text: String,
    topic: String,
    location: String,
    author: Option<String>,
) -> Result<()> {
    let text = text.trim().to_string();
    anyhow::ensure!(!text.is_empty(), "Post cannot be empty");

    let mut topics = load_topics(ctx);
    if ensure_topic(&mut topics, &topic) {
        ctx.store.save(StateKey::Topics, &topics)?;
    }

    if let Some(client) = ctx.remote() {
        client
            .insert_post(&text, &topic, &location)
            .context("Remote post failed; nothing was saved")?;
        println!("Posted!");
        return Ok(());
    }

    let mut posts: Vec<Post> = ctx.store.load_or(StateKey::Posts, Vec::new());
    posts.push(Post::new(text, topic, location, author));
    ctx.store.save(StateKey::Posts, &posts)?;
    println!("Posted!");
    Ok(())
}

fn list_command(ctx: &AppContext, topics: Vec<String>, locations: Vec<String>) -> Result<()> {
    let posts: Vec<Post> = match ctx.remote() {
        Some(client) => client.list_posts().context("Failed to load posts")?,
        None => ctx.store.load_or(StateKey::Posts, Vec::new()),
    };

    let filter = FeedFilter { topics, locations };
    let matching = feed::filtered(&posts, &filter);

    if matching.is_empty() {
        println!("No posts yet that match these filters.");
        return Ok(());
    }

    for post in matching {
        let when = DateTime::from_timestamp_millis(post.ts)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let author = post.author.as_deref().unwrap_or("anonymous");
        println!("{} • {} • {} • {}", post.location, post.topic, when, author);
        println!("  {}\n", post.text);
    }

    Ok(())
}

fn topics_command(ctx: &AppContext) -> Result<()> {
    for topic in load_topics(ctx) {
        println!("{topic}");
    }
    Ok(())
}
