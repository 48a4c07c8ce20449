use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub label: String,
    pub value: String,
}

#[derive(Deserialize)]
pub struct AddressQuery {
    pub address: Option<String>,
}

pub fn app() -> Router {
    Router::new()
        .route("/parse", get(parse))
        .route("/expand", get(expand))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn parse(Query(query): Query<AddressQuery>) -> Result<Json<Vec<Component>>, StatusCode> {
    let address = query.address.ok_or(StatusCode::BAD_REQUEST)?;
    tracing::debug!(%address, "parse");
    Ok(Json(segment(&address)))
}

async fn expand(Query(query): Query<AddressQuery>) -> Result<Json<Vec<String>>, StatusCode> {
    let address = query.address.ok_or(StatusCode::BAD_REQUEST)?;
    tracing::debug!(%address, "expand");
    Ok(Json(variants(&address)))
}

/// Deterministic stand-in for the Libpostal parser: leading digits are the
/// house number, text after the last comma is the city, the rest is the road.
pub fn segment(address: &str) -> Vec<Component> {
    let lowered = address.trim().to_lowercase();
    let (street, city) = match lowered.rsplit_once(',') {
        Some((street, city)) => (street.trim(), Some(city.trim())),
        None => (lowered.as_str(), None),
    };

    let digits = street.find(|c: char| !c.is_ascii_digit()).unwrap_or(street.len());
    let (number, road) = street.split_at(digits);

    let mut components = Vec::new();
    let mut push = |label: &str, value: &str| {
        if !value.is_empty() {
            components.push(Component {
                label: label.to_string(),
                value: value.to_string(),
            });
        }
    };
    push("house_number", number);
    push("road", road.trim());
    if let Some(city) = city {
        push("city", city);
    }
    components
}

/// Deterministic stand-in for Libpostal expansion: the lowercased address,
/// then a variant with `st` and `street` swapped when either word appears.
pub fn variants(address: &str) -> Vec<String> {
    let lowered = address.trim().to_lowercase();
    let swapped: Vec<&str> = lowered
        .split_whitespace()
        .map(|word| match word {
            "st" => "street",
            "street" => "st",
            other => other,
        })
        .collect();
    let swapped = swapped.join(" ");

    if swapped == lowered {
        vec![lowered]
    } else {
        vec![swapped, lowered]
    }
}
