use crate::domain::model::Coordinates;
use crate::domain::ports::Geocoder;
use crate::utils::error::{EngineError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const BUILTIN_PLACES: [(&str, f64, f64); 10] = [
    ("São Paulo", -23.5505, -46.6333),
    ("Rio de Janeiro", -22.9068, -43.1729),
    ("Brasília", -15.7939, -47.8828),
    ("Belo Horizonte", -19.9167, -43.9345),
    ("Lisboa", 38.7223, -9.1393),
    ("Lisbon", 38.7223, -9.1393),
    ("Buenos Aires", -34.6037, -58.3816),
    ("London", 51.5074, -0.1278),
    ("New York", 40.7128, -74.0060),
    ("Tokyo", 35.6762, 139.6503),
];

/// Lowercase, accent-free, single-spaced form used as lookup key.
pub fn place_key(place_name: &str) -> String {
    let folded: String = place_name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Geocoder backed by a fixed place table.
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    places: HashMap<String, Coordinates>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtin_places() -> Self {
        let mut geocoder = Self::new();
        for (name, latitude, longitude) in BUILTIN_PLACES {
            geocoder.insert(
                name,
                Coordinates {
                    latitude,
                    longitude,
                },
            );
        }
        geocoder
    }

    pub fn insert(&mut self, place_name: &str, coordinates: Coordinates) {
        self.places.insert(place_key(place_name), coordinates);
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn geocode(&self, place_name: &str) -> Result<Coordinates> {
        self.places
            .get(&place_key(place_name))
            .copied()
            .ok_or_else(|| EngineError::lookup(place_name, "place is not in the gazetteer"))
    }
}

/// Nominatim-style search endpoint: `GET ?q=<place>&format=json&limit=1`.
#[derive(Debug, Clone)]
pub struct HttpGeocoder {
    client: Client,
    endpoint: String,
    timeout: Option<Duration>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn value(&self) -> Option<f64> {
        match self {
            Degrees::Number(n) => Some(*n),
            Degrees::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: Degrees,
    lon: Degrees,
}

impl HttpGeocoder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn geocode(&self, place_name: &str) -> Result<Coordinates> {
        let mut request = self
            .client
            .get(&self.endpoint)
            .query(&[("q", place_name), ("format", "json"), ("limit", "1")]);

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Geocoding '{}' via {}", place_name, self.endpoint);
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(EngineError::lookup(
                place_name,
                format!("geocoder returned status {}", response.status()),
            ));
        }

        let hits: Vec<SearchHit> = response.json().await?;
        let hit = hits
            .into_iter()
            .next()
            .ok_or_else(|| EngineError::lookup(place_name, "geocoder found no match"))?;

        match (hit.lat.value(), hit.lon.value()) {
            (Some(latitude), Some(longitude)) => Ok(Coordinates {
                latitude,
                longitude,
            }),
            _ => Err(EngineError::lookup(
                place_name,
                "geocoder returned unparsable coordinates",
            )),
        }
    }
}
