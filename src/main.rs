//! # chatstats CLI
//!
//! Command-line interface for the chatstats library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chatstats::ChatstatsError;
use chatstats::cli::Args;
use chatstats::config::{ChannelConfig, ExtractConfig};
use chatstats::core::stats::{SummaryMetric, sum_by_user};
use chatstats::core::{
    ActivityStats, FilterConfig, MessageTable, OutputConfig, UserCounts, apply_filters,
    tagged_users, top_n,
};
use chatstats::extractor::{ChannelReader, extract_replies};
use chatstats::format::{OutputFormat, write_replies_to_format, write_to_format};
use chatstats::users::UserDirectory;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), ChatstatsError> {
    let total_start = Instant::now();
    let output_path = adjust_output_extension(&args.output, args.format);

    println!("📦 chatstats v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Channel: {}", args.channel_dir.display());
    println!("💾 Output:  {}", output_path);
    println!("📄 Format:  {}", args.format);

    let mut channel_config = ChannelConfig::new()
        .with_extract(ExtractConfig::new().with_skip_incomplete(args.skip_incomplete));
    if let Some(ref ext) = args.ext {
        channel_config = channel_config.with_extension(ext.as_str());
        println!("🗂️  Files:   *.{}", ext.trim_start_matches('.'));
    }

    let mut filter_config = FilterConfig::new();
    if let Some(ref after) = args.after {
        filter_config = filter_config.with_date_from(after)?;
        println!("📅 After:   {}", after);
    }
    if let Some(ref before) = args.before {
        filter_config = filter_config.with_date_to(before)?;
        println!("📅 Before:  {}", before);
    }
    if let Some(ref user) = args.user {
        filter_config = filter_config.with_user(user.clone());
        println!("👤 User:    {}", user);
    }

    println!();

    // Step 1: Load export files
    let reader = ChannelReader::with_config(channel_config);
    println!("⏳ Reading channel...");
    let load_start = Instant::now();
    let batches = reader.load(&args.channel_dir)?;
    let raw_count: usize = batches.iter().map(|b| b.messages.len()).sum();
    println!(
        "   Found {} messages in {} files ({:.2}s)",
        raw_count,
        batches.len(),
        load_start.elapsed().as_secs_f64()
    );

    // Step 2: Extract rows
    println!("🧩 Extracting messages...");
    let extract_start = Instant::now();
    let table = reader.extract_batches(&batches)?;
    let extracted_count = table.len();
    info!(
        channel = %args.channel_dir.display(),
        "Number of messages in channel: {}",
        extracted_count
    );
    println!(
        "   {} content messages ({:.2}s)",
        extracted_count,
        extract_start.elapsed().as_secs_f64()
    );

    // Step 3: Filter
    let table = if filter_config.is_active() {
        println!("🔍 Filtering messages...");
        let filter_start = Instant::now();
        let filtered = apply_filters(table, &filter_config);
        println!(
            "   {} messages after filtering ({:.2}s)",
            filtered.len(),
            filter_start.elapsed().as_secs_f64()
        );
        filtered
    } else {
        table
    };

    // Step 4: Write table
    let lib_format: OutputFormat = args.format.into();
    let output_config = OutputConfig::new();
    println!("💾 Writing {}...", lib_format);
    let write_start = Instant::now();
    write_to_format(&table, &output_path, lib_format, &output_config)?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    // Step 5: Reply table
    let mut reply_count = None;
    if let Some(ref replies_path) = args.replies_out {
        let replies: Vec<_> = batches
            .iter()
            .flat_map(|batch| extract_replies(&batch.messages))
            .collect();
        let format = OutputFormat::from_path(replies_path)?;
        println!("🧵 Writing {} replies to {}...", replies.len(), replies_path.display());
        write_replies_to_format(&replies, replies_path, format, &output_config)?;
        reply_count = Some(replies.len());
    }

    println!();
    println!("✅ Done! Output saved to {}", output_path);

    // Step 6: Statistics
    if args.stats {
        let users = match args.users {
            Some(ref path) => UserDirectory::from_path(path)?,
            None => UserDirectory::new(),
        };
        print_stats(&table, &batches, &users, args.top);
    }

    println!();
    println!("📊 Summary:");
    println!("   Raw:       {} messages", raw_count);
    println!("   Extracted: {} rows", extracted_count);
    if filter_config.is_active() {
        println!("   Filtered:  {} rows", table.len());
    }
    if let Some(count) = reply_count {
        println!("   Replies:   {} records", count);
    }

    let total_time = total_start.elapsed();
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());

    Ok(())
}

fn print_stats(
    table: &MessageTable,
    batches: &[chatstats::extractor::ChannelBatch],
    users: &UserDirectory,
    top: usize,
) {
    let stats = ActivityStats::from_table(table);

    let section = |title: &str, counts: &UserCounts| {
        println!();
        println!("{}", title);
        let ranked = if users.is_empty() {
            top_n(counts, top)
        } else {
            users.map_counts(counts).into_iter().take(top).collect()
        };
        if ranked.is_empty() {
            println!("   (none)");
        }
        for (name, count) in ranked {
            println!("   {:<24} {}", name, count);
        }
    };

    section("💬 Messages per user:", &stats.messages);
    section("🧵 Replies per user:", &stats.replies);
    section("📣 Mentions per user:", &stats.mentions);
    section("🔗 Links per user:", &stats.links);

    let tagged = tagged_users(table.texts());
    println!();
    println!("🏷️  Users tagged in text: {}", tagged.len());

    let summaries: chatstats::Result<Vec<_>> = batches
        .iter()
        .map(|batch| batch.summarize().map(|(summaries, _)| summaries))
        .collect();
    match summaries.map(|per_file| per_file.concat()) {
        Ok(summaries) if !summaries.is_empty() => {
            println!();
            println!("🪡 Thread replies received per author:");
            for (user, total) in sum_by_user(&summaries, SummaryMetric::ReplyCount).into_iter().take(top) {
                println!("   {:<24} {}", users.display_name(&user), total);
            }
        }
        Ok(_) => {}
        Err(e) => warn!("skipping thread summary: {}", e),
    }
}

/// Adjusts the output file extension to the format when using the default name.
fn adjust_output_extension(output: &str, format: chatstats::cli::OutputFormat) -> String {
    if output != "messages.csv" {
        return output.to_string();
    }
    let stem = Path::new(output).with_extension(format.extension());
    stem.display().to_string()
}
