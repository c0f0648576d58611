//! OpenAPI description assembled from the handler annotations.

use utoipa::OpenApi;

use crate::api::dto::{RegionDto, SummonerDto, SummonerResponse};
use crate::api::handlers::{summoner, system};
use crate::error::{ErrorBody, ErrorResponse};

/// OpenAPI document for every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "summoner-gateway",
        description = "Caching gateway in front of the League of Legends statistics API."
    ),
    paths(
        summoner::get_summoner,
        summoner::refresh_summoner,
        system::health_handler,
        system::regions_handler,
    ),
    components(schemas(
        SummonerResponse,
        SummonerDto,
        RegionDto,
        system::HealthResponse,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Summoners", description = "Cached summoner lookups"),
        (name = "System", description = "Health and configuration"),
    )
)]
pub struct ApiDoc;
