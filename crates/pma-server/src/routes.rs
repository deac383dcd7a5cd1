//! HTTP routes under `/api/market-analysis`

use crate::error::ServerError;
use crate::service::MarketAnalysisService;
use pma_market::{MarketAnalysisRequest, DEFAULT_PROPERTY_TYPE};
use serde::Deserialize;
use std::convert::Infallible;
use tracing::{info, warn};
use warp::http::Method;
use warp::{Filter, Rejection, Reply};

/// Body returned by the health probe
pub const HEALTH_MESSAGE: &str = "Market Analysis API is running";

/// Largest accepted JSON body
const MAX_BODY_BYTES: u64 = 64 * 1024;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoricalQuery {
    location: String,
    #[serde(default = "default_property_type")]
    property_type: String,
    #[serde(default = "default_timeframe")]
    timeframe: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrendQuery {
    location: String,
    #[serde(default = "default_property_type")]
    property_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompareQuery {
    locations: String,
    #[serde(default = "default_property_type")]
    property_type: String,
    #[serde(default = "default_timeframe")]
    timeframe: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastQuery {
    location: String,
    #[serde(default = "default_property_type")]
    property_type: String,
    #[serde(default = "default_forecast_period")]
    forecast_period: String,
}

fn default_property_type() -> String {
    DEFAULT_PROPERTY_TYPE.to_string()
}

fn default_timeframe() -> String {
    "1Y".to_string()
}

fn default_forecast_period() -> String {
    "6M".to_string()
}

/// Every API route with CORS, error recovery, and request logging
pub fn routes(
    service: MarketAnalysisService,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let analyze = warp::path!("api" / "market-analysis")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with_service(service.clone()))
        .and_then(analyze);

    let historical = warp::path!("api" / "market-analysis" / "historical")
        .and(warp::get())
        .and(warp::query::<HistoricalQuery>())
        .and(with_service(service.clone()))
        .and_then(historical);

    let trend = warp::path!("api" / "market-analysis" / "trend")
        .and(warp::get())
        .and(warp::query::<TrendQuery>())
        .and(with_service(service.clone()))
        .and_then(trend);

    let compare = warp::path!("api" / "market-analysis" / "compare")
        .and(warp::post())
        .and(warp::query::<CompareQuery>())
        .and(with_service(service.clone()))
        .and_then(compare);

    let forecast = warp::path!("api" / "market-analysis" / "forecast")
        .and(warp::get())
        .and(warp::query::<ForecastQuery>())
        .and(with_service(service.clone()))
        .and_then(forecast);

    let housing = warp::path!("api" / "market-analysis" / "housing")
        .and(warp::get())
        .and(with_service(service.clone()))
        .and_then(housing);

    let housing_stats = warp::path!("api" / "market-analysis" / "housing" / "stats")
        .and(warp::get())
        .and(with_service(service))
        .and_then(housing_stats);

    let health = warp::path!("api" / "market-analysis" / "health")
        .and(warp::get())
        .map(|| HEALTH_MESSAGE);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(["content-type"]);

    analyze
        .or(historical)
        .or(trend)
        .or(compare)
        .or(forecast)
        .or(housing)
        .or(housing_stats)
        .or(health)
        .with(cors)
        .recover(handle_rejection)
        .with(warp::log::custom(log_request))
}

fn with_service(
    service: MarketAnalysisService,
) -> impl Filter<Extract = (MarketAnalysisService,), Error = Infallible> + Clone {
    warp::any().map(move || service.clone())
}

async fn analyze(
    request: MarketAnalysisRequest,
    service: MarketAnalysisService,
) -> Result<impl Reply, Rejection> {
    let response = service.market_analysis(&request)?;
    Ok(warp::reply::json(&response))
}

async fn historical(
    query: HistoricalQuery,
    service: MarketAnalysisService,
) -> Result<impl Reply, Rejection> {
    let series = service.historical_data(&query.location, &query.property_type, &query.timeframe)?;
    Ok(warp::reply::json(&series))
}

async fn trend(query: TrendQuery, service: MarketAnalysisService) -> Result<impl Reply, Rejection> {
    let trend = service.current_trend(&query.location, &query.property_type)?;
    Ok(warp::reply::json(&trend))
}

async fn compare(
    query: CompareQuery,
    service: MarketAnalysisService,
) -> Result<impl Reply, Rejection> {
    let comparisons =
        service.compare_markets(&query.locations, &query.property_type, &query.timeframe)?;
    Ok(warp::reply::json(&comparisons))
}

async fn forecast(
    query: ForecastQuery,
    service: MarketAnalysisService,
) -> Result<impl Reply, Rejection> {
    let forecast =
        service.market_forecast(&query.location, &query.property_type, &query.forecast_period)?;
    Ok(warp::reply::json(&forecast))
}

async fn housing(service: MarketAnalysisService) -> Result<impl Reply, Rejection> {
    let records = service.housing_data().await?;
    Ok(warp::reply::json(&records))
}

async fn housing_stats(service: MarketAnalysisService) -> Result<impl Reply, Rejection> {
    let stats = service.housing_stats().await?;
    Ok(warp::reply::json(&*stats))
}

/// Render any rejection as a JSON error body
///
/// # Errors
/// Never fails; every rejection becomes a response.
pub async fn handle_rejection(rejection: Rejection) -> Result<impl Reply, Infallible> {
    let error = if rejection.is_not_found() {
        ServerError::NotFound
    } else if let Some(err) = rejection.find::<ServerError>() {
        err.clone()
    } else if let Some(err) = rejection.find::<warp::filters::body::BodyDeserializeError>() {
        ServerError::invalid_request(err.to_string())
    } else if let Some(err) = rejection.find::<warp::reject::InvalidQuery>() {
        ServerError::invalid_request(err.to_string())
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        ServerError::MethodNotAllowed
    } else {
        warn!(?rejection, "unhandled rejection");
        ServerError::invalid_request(format!("{rejection:?}"))
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&error.body()),
        error.status(),
    ))
}

fn log_request(info: warp::log::Info<'_>) {
    info!(
        method = %info.method(),
        path = info.path(),
        status = info.status().as_u16(),
        elapsed = ?info.elapsed(),
        "request"
    );
}
