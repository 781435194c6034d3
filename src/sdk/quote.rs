//! The route quote builder: turns provider alternatives into a fee quote.
//!
//! Everything in here is pure; the HTTP layer and the outbound clients stay
//! out of this module so the selection and fee rules can be tested directly.

use crate::sdk::routing::service::RouteLeg;
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Per-kilometer rate in currency units.
const RATE_PER_KM: f64 = 3.0;

#[derive(Debug, Error, PartialEq)]
pub enum QuoteError {
    #[error("no route found")]
    NoRoute,
}

/// One candidate alternative, as exposed to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRoute {
    pub distance_km: f64,
    pub duration_min: i64,
}

/// The full quote for one origin/destination pair.
#[derive(Debug, Clone)]
pub struct Quote {
    pub routes: Vec<CandidateRoute>,
    pub distance_km: f64,
    pub duration_min: i64,
    pub fee: i64,
    pub report: String,
    pub map_link: String,
    /// Overview polyline of the first alternative, kept for map rendering.
    pub map_polyline: String,
}

/// Builds a quote from the provider's alternatives, in provider order.
///
/// The fastest alternative (smallest whole-minute duration, first wins on
/// ties) sets the billed distance. Empty input is `NoRoute`.
pub fn build_quote(
    origin: &str,
    destination: &str,
    legs: &[RouteLeg],
    today: NaiveDate,
) -> Result<Quote, QuoteError> {
    let first = legs.first().ok_or(QuoteError::NoRoute)?;
    let best = fastest(legs).ok_or(QuoteError::NoRoute)?;

    let routes = legs
        .iter()
        .map(|leg| CandidateRoute {
            distance_km: round1(leg.distance_m / 1000.0),
            duration_min: leg.duration_s / 60,
        })
        .collect();

    let best_km = best.distance_m / 1000.0;
    let fee = fee_for(best_km);

    Ok(Quote {
        routes,
        distance_km: round1(best_km),
        duration_min: best.duration_s / 60,
        fee,
        report: render_report(today, origin, destination, best_km, fee),
        map_link: map_link(origin, destination),
        map_polyline: first.polyline.clone(),
    })
}

/// Picks the fastest alternative. Durations are compared after flooring to
/// whole minutes, which is also what clients see; provider order breaks ties.
fn fastest(legs: &[RouteLeg]) -> Option<&RouteLeg> {
    let mut best: Option<&RouteLeg> = None;
    for leg in legs {
        let better = match best {
            Some(b) => leg.duration_s / 60 < b.duration_s / 60,
            None => true,
        };
        if better {
            best = Some(leg);
        }
    }
    best
}

/// Round-trip fee from the unrounded distance, so display rounding never
/// shifts the charge. `f64::round` is half-away-from-zero.
pub fn fee_for(distance_km: f64) -> i64 {
    (distance_km * 2.0 * RATE_PER_KM).round() as i64
}

fn render_report(
    today: NaiveDate,
    origin: &str,
    destination: &str,
    distance_km: f64,
    fee: i64,
) -> String {
    format!(
        "{} {}-{}【自行開車 {:.1}(公里數)*{}(元/公里)*2(來回)={}(費用)】",
        today.format("%Y-%m-%d"),
        origin,
        destination,
        distance_km,
        RATE_PER_KM as i64,
        fee
    )
}

/// Deep link into the Google Maps directions UI. Path segments are
/// percent-encoded; raw addresses with spaces produce broken links.
pub fn map_link(origin: &str, destination: &str) -> String {
    format!(
        "https://www.google.com/maps/dir/{}/{}",
        urlencoding::encode(origin),
        urlencoding::encode(destination)
    )
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
