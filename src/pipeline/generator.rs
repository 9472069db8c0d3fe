// file: src/pipeline/generator.rs
// description: coordinates selection, enrichment, image search, rendering and writing
// reference: orchestrates the single-pass post generation workflow

use crate::clients::{
    Encyclopedia, GoogleImageSearch, GoogleTrendsClient, ImageSearch, NeutralTrendScorer,
    NoEncyclopedia, TrendScorer, WikipediaClient,
};
use crate::config::{Config, SelectionStrategy};
use crate::error::{PipelineError, Result};
use crate::models::{PLACES, Place};
use crate::pipeline::enricher::PlaceEnricher;
use crate::pipeline::images::ImageFinder;
use crate::pipeline::progress::RunSummary;
use crate::pipeline::selector::{PlaceSelector, ScoredPlace, rank};
use crate::post::{
    PostInputs, PostRenderer, PostTemplate, PostWriter, RenderedPost, post_filename,
};
use crate::utils::Validator;
use chrono::{Local, NaiveDateTime};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub struct PostGenerator<'a> {
    search: &'a dyn ImageSearch,
    encyclopedia: &'a dyn Encyclopedia,
    config: &'a Config,
    renderer: PostRenderer,
    writer: PostWriter,
    request_delay: Option<Duration>,
}

impl<'a> PostGenerator<'a> {
    pub fn new(
        config: &'a Config,
        search: &'a dyn ImageSearch,
        encyclopedia: &'a dyn Encyclopedia,
    ) -> Self {
        Self {
            search,
            encyclopedia,
            config,
            renderer: PostRenderer::new(&config.output, config.search.date_restrict_days),
            writer: PostWriter::new(config.output.posts_dir.clone()),
            request_delay: None,
        }
    }

    /// Overrides the delay between search calls.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = Some(delay);
        self
    }

    pub fn with_template(mut self, template: PostTemplate) -> Self {
        self.renderer = self.renderer.with_template(template);
        self
    }

    /// Enriches the place, searches images and renders the post in memory.
    pub async fn build_post(&self, place: &Place, now: NaiveDateTime) -> (RenderedPost, RunSummary) {
        let start = Instant::now();

        info!("Enriching '{}'...", place.name);
        let enrichment = PlaceEnricher::new(self.encyclopedia).enrich(place).await;

        let mut finder = ImageFinder::new(self.search, &self.config.search);
        if let Some(delay) = self.request_delay {
            finder = finder.with_request_delay(delay);
        }

        info!("Searching for images of '{}'...", place.name);
        let current_images = finder.find_current(place, &enrichment.keywords).await;
        let historical_images = finder.find_historical(place).await;

        if current_images.is_empty() {
            warn!("No recent images found for '{}', using placeholder text", place.name);
        }

        let post = self.renderer.render(PostInputs {
            place,
            enrichment: &enrichment,
            current_images: &current_images,
            historical_images: &historical_images,
            date: now,
        });

        let summary = RunSummary {
            place: place.name.to_string(),
            keywords: enrichment.keywords.clone(),
            historical_events: enrichment.historical_events.len(),
            current_images: current_images.len(),
            historical_images: historical_images.len(),
            output: None,
            duration_secs: start.elapsed().as_secs_f64(),
        };

        (post, summary)
    }

    /// Writes the post for `place` dated `now`. Returns `None` when a post
    /// with the same filename already exists, before any external call.
    pub async fn create_post(&self, place: &Place, now: NaiveDateTime) -> Result<Option<PathBuf>> {
        Validator::validate_place(place)?;
        Validator::validate_output_dir(self.writer.posts_dir())?;

        let filename = post_filename(now.date(), place.name);
        if self.writer.exists(&filename) {
            warn!(
                "{} already exists. Skipping.",
                self.writer.target_path(&filename).display()
            );
            return Ok(None);
        }

        let (post, mut summary) = self.build_post(place, now).await;
        let written = self.writer.write(&post)?;

        summary.output = written.clone();
        summary.log();
        Ok(written)
    }

    pub async fn preview_post(&self, place: &Place, now: NaiveDateTime) -> Result<String> {
        Validator::validate_place(place)?;
        let (post, summary) = self.build_post(place, now).await;
        summary.log();
        post.to_markdown()
    }
}

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub strategy: SelectionStrategy,
    pub place: Option<String>,
    pub dry_run: bool,
    pub show_progress: bool,
    pub colored: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    Written(PathBuf),
    Skipped,
    Preview(String),
}

/// Full run: validates credentials, picks a place and writes (or previews)
/// its post. Missing credentials are the only configuration failure.
pub async fn run_generate(config: &Config, options: &GenerateOptions) -> Result<GenerateOutcome> {
    let search = GoogleImageSearch::new(&config.search)?;
    let encyclopedia = build_encyclopedia(config)?;

    let place = match &options.place {
        Some(name) => Place::find(name)
            .ok_or_else(|| PipelineError::Validation(format!("Unknown place: {}", name)))?,
        None => {
            let chosen = select_place(
                config,
                options.strategy,
                options.show_progress,
                options.colored,
            )
            .await
            .ok_or_else(|| PipelineError::Validation("Place catalog is empty".to_string()))?;
            if options.strategy.needs_scores() {
                info!("Trend score of selected place: {}", chosen.score);
            }
            chosen.place
        }
    };

    info!("Selected place: {}", place.name);
    if place.has_location() {
        info!("Location: {}", place.location);
    }

    let mut generator = PostGenerator::new(config, &search, encyclopedia.as_ref());
    if let Some(path) = &config.output.template {
        info!("Using post template {}", path.display());
        generator = generator.with_template(PostTemplate::from_file(path)?);
    }
    let now = Local::now().naive_local();

    if options.dry_run {
        return Ok(GenerateOutcome::Preview(generator.preview_post(&place, now).await?));
    }

    Ok(match generator.create_post(&place, now).await? {
        Some(path) => GenerateOutcome::Written(path),
        None => GenerateOutcome::Skipped,
    })
}

/// Trend scores for the whole catalog, highest first.
pub async fn score_catalog(
    config: &Config,
    show_progress: bool,
    colored: bool,
) -> Vec<ScoredPlace> {
    let scorer = build_trend_scorer(config).await;
    let selector = PlaceSelector::new(
        scorer.as_ref(),
        config.trends.default_score,
        config.selection.top_candidates,
    )
    .with_request_delay(config.trends.request_delay())
    .with_progress(show_progress, colored);

    rank(&selector.collect_scores(PLACES).await)
}

pub async fn select_place(
    config: &Config,
    strategy: SelectionStrategy,
    show_progress: bool,
    colored: bool,
) -> Option<ScoredPlace> {
    let live = if strategy.needs_scores() {
        connect_trend_scorer(config).await
    } else {
        None
    };

    let neutral = NeutralTrendScorer::new(config.trends.default_score);
    let scorer: &dyn TrendScorer = match &live {
        Some(client) => client,
        None => &neutral,
    };

    let selector = PlaceSelector::new(
        scorer,
        config.trends.default_score,
        config.selection.top_candidates,
    )
    .with_request_delay(config.trends.request_delay())
    .with_progress(show_progress, colored);

    // without a live scorer every place would score the default
    let scored = if live.is_some() {
        selector.collect_scores(PLACES).await
    } else {
        Vec::new()
    };

    selector.choose(strategy, PLACES, &scored, &mut rand::rng())
}

fn build_encyclopedia(config: &Config) -> Result<Box<dyn Encyclopedia>> {
    if config.encyclopedia.enabled {
        Ok(Box::new(WikipediaClient::new(&config.encyclopedia)?))
    } else {
        info!("Encyclopedia enrichment disabled");
        Ok(Box::new(NoEncyclopedia))
    }
}

async fn build_trend_scorer(config: &Config) -> Box<dyn TrendScorer> {
    match connect_trend_scorer(config).await {
        Some(client) => Box::new(client),
        None => Box::new(NeutralTrendScorer::new(config.trends.default_score)),
    }
}

async fn connect_trend_scorer(config: &Config) -> Option<GoogleTrendsClient> {
    if !config.trends.enabled {
        info!("Trend scoring disabled, every place scores {}", config.trends.default_score);
        return None;
    }

    match GoogleTrendsClient::connect(&config.trends).await {
        Ok(client) => Some(client),
        Err(e) => {
            warn!("Trend scorer unavailable ({}), using default scores", e);
            None
        }
    }
}
