//! Costar CLI
//!
//! Command-line front end for degrees-of-separation queries:
//! - `search`: shortest co-star connection between two people
//! - `lookup`: everyone carrying a name, with their movies
//! - `neighbors`: co-stars of one person, grouped by movie
//! - `stats`: dataset summary

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use costar_graph::{
    co_stars, connections, neighbors, people_named, resolve_name, Connection, Dataset, DatasetStats,
    MovieId, Path, PersonId, SearchLimits, SearchStats, Searcher,
};
use costar_ingest_csv::{CsvDataset, IngestOptions, IngestReport};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

mod logging;
mod prompt;

use prompt::Prompt;

#[derive(Parser)]
#[command(name = "costar")]
#[command(
    author,
    version,
    about = "Costar: degrees of separation between actors"
)]
struct Cli {
    #[command(flatten)]
    log: logging::LogArgs,
    #[command(flatten)]
    data: DataArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct DataArgs {
    /// Dataset directory holding people.csv, movies.csv and stars.csv
    #[arg(long, env = "COSTAR_DATA", default_value = "data/small", global = true)]
    data: PathBuf,
    /// Fail on malformed CSV rows instead of skipping them
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the shortest co-star connection between two people.
    ///
    /// Explicit ids (`--source-id`, `--target-id`) take precedence; positional
    /// names fill the remaining endpoints in order, and anything still missing
    /// is prompted for on stdin.
    Search(SearchArgs),

    /// List everyone with the given name and the movies they starred in.
    Lookup {
        /// Person name (case-insensitive)
        name: String,
        #[arg(long)]
        json: bool,
    },

    /// List a person's co-stars, grouped by movie.
    Neighbors {
        /// Person name (case-insensitive)
        name: String,
        #[arg(long)]
        json: bool,
    },

    /// Print dataset counts.
    Stats {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Names of the people to connect
    #[arg(num_args = 0..=2)]
    names: Vec<String>,
    /// Source person id (skips name resolution)
    #[arg(long)]
    source_id: Option<String>,
    /// Target person id (skips name resolution)
    #[arg(long)]
    target_id: Option<String>,
    /// Give up after expanding this many people
    #[arg(long)]
    max_explored: Option<usize>,
    /// Do not look further than this many degrees
    #[arg(long)]
    max_depth: Option<usize>,
    /// Emit machine-readable JSON on stdout
    #[arg(long)]
    json: bool,
}

impl SearchArgs {
    fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_explored: self.max_explored,
            max_depth: self.max_depth,
        }
    }

    fn endpoints(&self) -> Result<(Endpoint, Endpoint)> {
        let ids = usize::from(self.source_id.is_some()) + usize::from(self.target_id.is_some());
        if self.names.len() + ids > 2 {
            bail!(
                "too many people: {} name(s) given alongside {} id(s); a search connects exactly two",
                self.names.len(),
                ids
            );
        }

        let mut names = self.names.iter().cloned();
        let mut pick = |id: &Option<String>| match id {
            Some(id) => Endpoint::Id(PersonId::new(id.as_str())),
            None => names.next().map(Endpoint::Name).unwrap_or(Endpoint::Prompt),
        };
        let source = pick(&self.source_id);
        let target = pick(&self.target_id);
        Ok((source, target))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Endpoint {
    Id(PersonId),
    Name(String),
    Prompt,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log)?;

    match cli.command {
        Commands::Search(args) => cmd_search(&cli.data, &args),
        Commands::Lookup { name, json } => cmd_lookup(&cli.data, &name, json),
        Commands::Neighbors { name, json } => cmd_neighbors(&cli.data, &name, json),
        Commands::Stats { json } => cmd_stats(&cli.data, json),
    }
}

// ============================================================================
// Dataset Loading
// ============================================================================

fn load_dataset(args: &DataArgs) -> Result<(Dataset, IngestReport)> {
    let options = if args.strict {
        IngestOptions::strict()
    } else {
        IngestOptions::lenient()
    };
    let (dataset, report) = CsvDataset::new(&args.data)
        .load(options)
        .with_context(|| format!("failed to load dataset from {}", args.data.display()))?;

    if report.skipped_rows() > 0 {
        eprintln!(
            "{} skipped {} malformed CSV rows in {}",
            "warn:".yellow().bold(),
            report.skipped_rows(),
            args.data.display()
        );
    }
    Ok((dataset, report))
}

// ============================================================================
// Name Resolution
// ============================================================================

/// Resolve a name given on the command line, noting ambiguity on stderr.
fn resolve_with_advisory<'a>(dataset: &'a Dataset, name: &str) -> Result<&'a PersonId> {
    let found = resolve_name(dataset, name).ok_or_else(|| anyhow!("person not found: {name}"))?;
    if found.is_ambiguous() {
        let ids: Vec<&str> = found.candidates.iter().map(|id| id.as_str()).collect();
        eprintln!(
            "{} \"{}\" matches {} people ({}); using {}. Pass --source-id/--target-id to pick another.",
            "info:".yellow().bold(),
            name,
            ids.len(),
            ids.join(", "),
            found.person_id
        );
    }
    Ok(found.person_id)
}

fn resolve_endpoint<'a>(
    dataset: &'a Dataset,
    endpoint: Endpoint,
    prompter: &mut Option<Box<dyn Prompt>>,
) -> Result<&'a PersonId> {
    match endpoint {
        Endpoint::Id(id) => dataset
            .person(&id)
            .map(|p| &p.id)
            .ok_or_else(|| anyhow!("unknown person id `{id}`")),
        Endpoint::Name(name) => resolve_with_advisory(dataset, &name),
        Endpoint::Prompt => {
            let prompter = prompter
                .as_mut()
                .ok_or_else(|| anyhow!("no interactive input available"))?;
            let name = prompter.ask("Name: ")?;
            prompter
                .choose_person(dataset, &name)?
                .ok_or_else(|| anyhow!("person not found: {name}"))
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

#[derive(Serialize)]
struct SearchOutput<'a> {
    source: &'a PersonId,
    target: &'a PersonId,
    degrees: Option<usize>,
    path: Option<&'a Path>,
    connections: &'a [Connection],
    stats: SearchStats,
}

fn cmd_search(data: &DataArgs, args: &SearchArgs) -> Result<()> {
    let (dataset, _) = load_dataset(data)?;
    let (source, target) = args.endpoints()?;

    let mut prompter = if source == Endpoint::Prompt || target == Endpoint::Prompt {
        Some(prompt::interactive()?)
    } else {
        None
    };
    let source = resolve_endpoint(&dataset, source, &mut prompter)?;
    let target = resolve_endpoint(&dataset, target, &mut prompter)?;

    let report = Searcher::new(&dataset)
        .with_limits(args.limits())
        .search(source, target)?;
    let narrated = match &report.path {
        Some(path) => connections(&dataset, source, path)?,
        None => Vec::new(),
    };

    if args.json {
        let out = SearchOutput {
            source,
            target,
            degrees: report.path.as_ref().map(Path::degrees),
            path: report.path.as_ref(),
            connections: &narrated,
            stats: report.stats,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match &report.path {
        None => println!("Not connected."),
        Some(path) => {
            println!("{} degrees of separation.", path.degrees());
            for (i, connection) in narrated.iter().enumerate() {
                println!("{}: {}", i + 1, connection);
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct MovieView<'a> {
    id: &'a MovieId,
    title: &'a str,
    year: Option<&'a str>,
}

#[derive(Serialize)]
struct PersonView<'a> {
    id: &'a PersonId,
    name: &'a str,
    birth: Option<&'a str>,
    movies: Vec<MovieView<'a>>,
}

fn movie_view<'a>(dataset: &'a Dataset, id: &MovieId) -> Result<MovieView<'a>> {
    let movie = dataset.require_movie(id)?;
    Ok(MovieView {
        id: &movie.id,
        title: &movie.title,
        year: movie.year.as_deref(),
    })
}

fn titled(movie: &MovieView<'_>) -> String {
    match movie.year {
        Some(year) => format!("{} ({})", movie.title, year),
        None => movie.title.to_string(),
    }
}

fn cmd_lookup(data: &DataArgs, name: &str, json: bool) -> Result<()> {
    let (dataset, _) = load_dataset(data)?;
    let people = people_named(&dataset, name);
    if people.is_empty() {
        bail!("person not found: {name}");
    }

    let views = people
        .into_iter()
        .map(|person| {
            Ok(PersonView {
                id: &person.id,
                name: &person.name,
                birth: person.birth.as_deref(),
                movies: person
                    .movies
                    .iter()
                    .map(|id| movie_view(&dataset, id))
                    .collect::<Result<_>>()?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    for view in &views {
        println!(
            "{} {} (born {})",
            view.id.as_str().bold(),
            view.name,
            view.birth.unwrap_or("unknown")
        );
        for movie in &view.movies {
            println!("  - {}", titled(movie));
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct CoStarView<'a> {
    id: &'a PersonId,
    name: &'a str,
}

#[derive(Serialize)]
struct MovieCastView<'a> {
    movie: MovieView<'a>,
    co_stars: Vec<CoStarView<'a>>,
}

fn cmd_neighbors(data: &DataArgs, name: &str, json: bool) -> Result<()> {
    let (dataset, _) = load_dataset(data)?;
    let person = resolve_with_advisory(&dataset, name)?;

    let mut by_movie: BTreeMap<&MovieId, Vec<&PersonId>> = BTreeMap::new();
    for (movie, star) in neighbors(&dataset, person)? {
        by_movie.entry(movie).or_default().push(star);
    }

    let casts = by_movie
        .into_iter()
        .map(|(movie, stars)| {
            Ok(MovieCastView {
                movie: movie_view(&dataset, movie)?,
                co_stars: stars
                    .into_iter()
                    .map(|id| {
                        let p = dataset.require_person(id)?;
                        Ok(CoStarView {
                            id: &p.id,
                            name: &p.name,
                        })
                    })
                    .collect::<Result<_>>()?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&casts)?);
        return Ok(());
    }

    let distinct = co_stars(&dataset, person)?.len();
    if distinct == 0 {
        println!("No co-stars.");
        return Ok(());
    }
    println!("{} co-star(s) across {} movie(s).", distinct, casts.len());
    for cast in &casts {
        let names: Vec<&str> = cast.co_stars.iter().map(|c| c.name).collect();
        println!("{}: {}", titled(&cast.movie), names.join(", "));
    }
    Ok(())
}

#[derive(Serialize)]
struct StatsOutput {
    dataset: DatasetStats,
    ingest: IngestReport,
}

fn cmd_stats(data: &DataArgs, json: bool) -> Result<()> {
    let (dataset, report) = load_dataset(data)?;
    let stats = dataset.stats();

    if json {
        let out = StatsOutput {
            dataset: stats,
            ingest: report,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    eprintln!(
        "{} {}",
        "loaded".green().bold(),
        data.data.display().to_string().bold()
    );
    println!("people:        {}", stats.people);
    println!("movies:        {}", stats.movies);
    println!("links:         {}", stats.links);
    println!("skipped links: {}", stats.skipped_links);
    println!("names:         {}", stats.names);
    Ok(())
}
