// file: src/pipeline/selector.rs
// description: place selection by uniform choice or trend score
// reference: sequential scoring with fixed delays and ctrl-c aware collection

use crate::clients::TrendScorer;
use crate::config::SelectionStrategy;
use crate::error::PipelineError;
use crate::models::Place;
use crate::pipeline::progress::ScoringProgress;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredPlace {
    pub place: Place,
    pub score: u8,
}

pub struct PlaceSelector<'a> {
    scorer: &'a dyn TrendScorer,
    default_score: u8,
    request_delay: Duration,
    top_candidates: usize,
    show_progress: bool,
    colored: bool,
}

impl<'a> PlaceSelector<'a> {
    pub fn new(scorer: &'a dyn TrendScorer, default_score: u8, top_candidates: usize) -> Self {
        Self {
            scorer,
            default_score,
            request_delay: Duration::ZERO,
            top_candidates: top_candidates.max(1),
            show_progress: false,
            colored: false,
        }
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn with_progress(mut self, show_progress: bool, colored: bool) -> Self {
        self.show_progress = show_progress;
        self.colored = colored;
        self
    }

    /// Scores one place; any failure yields the default score.
    pub async fn score_place(&self, place: &Place) -> u8 {
        match self.scorer.score(place.name).await {
            Ok(score) => score.min(100),
            Err(PipelineError::RateLimited { service }) => {
                warn!(
                    "{} rate limited while scoring {}, using {}",
                    service, place.name, self.default_score
                );
                self.default_score
            }
            Err(e) => {
                warn!(
                    "Trend score for {} unavailable ({}), using {}",
                    place.name, e, self.default_score
                );
                self.default_score
            }
        }
    }

    /// Scores places one at a time with the configured delay between calls.
    /// Ctrl-C stops collection and returns what was scored so far.
    pub async fn collect_scores(&self, places: &[Place]) -> Vec<ScoredPlace> {
        let progress = if self.show_progress {
            ScoringProgress::new(places.len(), self.colored)
        } else {
            ScoringProgress::hidden()
        };

        let mut scored = Vec::with_capacity(places.len());
        let interrupt = tokio::signal::ctrl_c();
        tokio::pin!(interrupt);

        for (index, place) in places.iter().enumerate() {
            let next = async {
                if index > 0 && !self.request_delay.is_zero() {
                    tokio::time::sleep(self.request_delay).await;
                }
                self.score_place(place).await
            };

            let score = tokio::select! {
                _ = &mut interrupt => {
                    warn!("Interrupted, continuing with {} scored places", scored.len());
                    progress.abandon(scored.len());
                    return scored;
                }
                score = next => score,
            };

            progress.record(place.name, score);
            scored.push(ScoredPlace {
                place: *place,
                score,
            });
        }

        progress.finish(scored.len());
        info!(
            "Scored {} places in {:.1}s",
            scored.len(),
            progress.elapsed().as_secs_f64()
        );
        scored
    }

    /// Picks a place. Score-based strategies fall back to a uniform choice
    /// when no score carries signal.
    pub fn choose<R: Rng + ?Sized>(
        &self,
        strategy: SelectionStrategy,
        places: &[Place],
        scored: &[ScoredPlace],
        rng: &mut R,
    ) -> Option<ScoredPlace> {
        let uniform = |rng: &mut R| {
            places.choose(rng).map(|place| ScoredPlace {
                place: *place,
                score: self.default_score,
            })
        };

        if strategy == SelectionStrategy::Random {
            return uniform(rng);
        }

        if scored.is_empty() || scored.iter().all(|s| s.score == self.default_score) {
            info!("No usable trend scores, falling back to random selection");
            return uniform(rng);
        }

        let ranked = rank(scored);

        match strategy {
            SelectionStrategy::Trending => ranked.first().copied(),
            _ => {
                let top = &ranked[..ranked.len().min(self.top_candidates)];
                // +1 keeps zero-score candidates eligible
                top.choose_weighted(rng, |s| u32::from(s.score) + 1)
                    .ok()
                    .copied()
            }
        }
    }
}

/// Highest score first; ties keep catalog order.
pub fn rank(scored: &[ScoredPlace]) -> Vec<ScoredPlace> {
    let mut ranked = scored.to_vec();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}
