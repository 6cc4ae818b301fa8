use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use tracing::{debug, info, info_span};

use rgm_cli::roster::load_roster;
use rgm_doi::{Doi, DoiClient, DoiClientConfig, parse_metadata};
use rgm_match::{AuthorMatcher, MatcherConfig};
use rgm_model::PublicationMetadata;

use crate::cli::{FetchArgs, LinkArgs, MatchArgs, NormalizeArgs, RegistryArgs, ScoreArgs};
use crate::summary::{print_breakdown, print_link_report, print_publication, print_ranking};

pub fn run_normalize(args: &NormalizeArgs, config: Option<&Path>) -> Result<()> {
    let matcher = build_matcher(config, None)?;
    for name in &args.names {
        println!("{}", matcher.normalize(name));
    }
    Ok(())
}

pub fn run_score(args: &ScoreArgs, config: Option<&Path>) -> Result<()> {
    let matcher = build_matcher(config, None)?;
    let breakdown = matcher.explain_names(&args.name_a, &args.name_b);
    if args.explain {
        print_breakdown(
            &matcher.normalize(&args.name_a),
            &matcher.normalize(&args.name_b),
            &breakdown,
        );
    } else {
        println!("{:.3}", breakdown.score());
    }
    Ok(())
}

pub fn run_match(args: &MatchArgs, config: Option<&Path>) -> Result<()> {
    let span = info_span!("match", name = %args.name);
    let _guard = span.enter();

    let matcher = build_matcher(config, args.threshold)?;
    let roster = load_roster(&args.roster)?;
    info!(candidates = roster.len(), "roster loaded");

    let best = matcher.find_best(&args.name, &roster);
    let ranked = matcher.rank(&args.name, &roster, Some(args.top));
    print_ranking(&args.name, best.as_ref(), &ranked);
    Ok(())
}

pub fn run_fetch(args: &FetchArgs) -> Result<()> {
    let doi = Doi::parse(&args.doi).context("parse DOI")?;
    let metadata = fetch(&doi, &args.registry)?;
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&metadata).context("serialize metadata")?
        );
    } else {
        print_publication(&metadata);
    }
    Ok(())
}

pub fn run_link(args: &LinkArgs, config: Option<&Path>) -> Result<()> {
    let matcher = build_matcher(config, args.threshold)?;
    let roster = load_roster(&args.roster)?;

    let metadata = match (&args.doi, &args.metadata) {
        (Some(raw), _) => {
            let doi = Doi::parse(raw).context("parse DOI")?;
            fetch(&doi, &args.registry)?
        }
        (None, Some(path)) => read_metadata(path)?,
        (None, None) => anyhow::bail!("either --doi or --metadata is required"),
    };

    let span = info_span!("link", doi = %metadata.doi);
    let _guard = span.enter();
    let report = matcher.link_publication(&metadata, &roster);
    info!(
        linked = report.links.len(),
        unlinked = report.unlinked.len(),
        "authors linked"
    );

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serialize link report")?
        );
    } else {
        print_link_report(&metadata, &report);
    }
    Ok(())
}

fn build_matcher(config: Option<&Path>, threshold: Option<f64>) -> Result<AuthorMatcher> {
    let config = match config {
        Some(path) => {
            debug!(path = %path.display(), "loading matcher config");
            MatcherConfig::load(path)?
        }
        None => MatcherConfig::default(),
    };
    let matcher = AuthorMatcher::from_config(&config).context("build matcher")?;
    match threshold {
        Some(threshold) => {
            ensure!(
                (0.0..=1.0).contains(&threshold),
                "--threshold must be between 0 and 1, got {threshold}"
            );
            Ok(matcher.with_threshold(threshold))
        }
        None => Ok(matcher),
    }
}

fn fetch(doi: &Doi, registry: &RegistryArgs) -> Result<PublicationMetadata> {
    let client = DoiClient::new(DoiClientConfig {
        mailto: registry.mailto.clone(),
        timeout: Duration::from_secs(registry.timeout),
        ..DoiClientConfig::default()
    })?;
    client
        .fetch(doi)
        .map_err(|error| {
            let hint = error.user_message().to_string();
            anyhow::Error::new(error).context(hint)
        })
        .with_context(|| format!("fetch {doi}"))
}

fn read_metadata(path: &Path) -> Result<PublicationMetadata> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read metadata: {}", path.display()))?;
    parse_metadata(&json).with_context(|| format!("decode metadata: {}", path.display()))
}
