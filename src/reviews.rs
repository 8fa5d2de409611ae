//! Community testimonial store client.
//!
//! The store is a generic REST collection that has accumulated two payload
//! shapes over time (`testimonialText`/`review`, `profileImage`/`avatar`) and
//! keeps ratings on a 0-100 scale. Everything is normalized once, here, into
//! [`Review`] with a 0-5 star rating.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::config::ReviewsConfig;
use crate::error::{FinderError, Result};

/// Rating assumed when a stored review carries none or an unreadable one.
///
/// Five stars, not zero: an unrated review shows as full marks.
const DEFAULT_RATING: f64 = 100.0;

/// Position shown for reviewers who did not give one.
const DEFAULT_POSITION: &str = "User";

/// Rating points per star.
const POINTS_PER_STAR: u32 = 20;

/// A normalized testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub id: String,
    pub name: String,
    pub position: String,
    pub text: String,
    /// Star rating, 0 to 5.
    pub stars: u8,
    pub image: String,
    pub created_at: Option<String>,
}

/// A testimonial to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub name: String,
    pub position: String,
    pub text: String,
    /// Star rating, 1 to 5.
    pub stars: u8,
    /// Optional image URL; a placeholder avatar is derived from the name if absent.
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(u64),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireReview {
    id: Option<WireId>,
    name: Option<String>,
    position: Option<String>,
    testimonial_text: Option<String>,
    review: Option<String>,
    rating: Option<Value>,
    profile_image: Option<String>,
    avatar: Option<String>,
    created_at: Option<Value>,
}

/// Convert a 0-100 stored rating into 0-5 stars.
pub fn rating_to_stars(rating: f64) -> u8 {
    let stars = (rating / f64::from(POINTS_PER_STAR)).round();
    stars.clamp(0.0, 5.0) as u8
}

/// Convert 1-5 stars into the 0-100 stored scale.
pub fn stars_to_rating(stars: u8) -> u32 {
    u32::from(stars) * POINTS_PER_STAR
}

/// Read a stored rating that may be a number or a numeric string.
fn parse_rating(raw: Option<&Value>) -> f64 {
    let parsed = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|r| r.is_finite())
        .unwrap_or(DEFAULT_RATING)
}

fn first_non_empty(candidates: [Option<String>; 2]) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .unwrap_or_default()
}

/// Decode one stored review, applying the defaulting rules.
pub fn decode_review(raw: &Value) -> Result<Review> {
    let wire = WireReview::deserialize(raw)
        .map_err(|e| FinderError::Reviews(format!("undecodable review: {e}")))?;

    let id = match wire.id {
        Some(WireId::Text(id)) => id,
        Some(WireId::Number(id)) => id.to_string(),
        None => String::new(),
    };
    let created_at = wire.created_at.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });

    Ok(Review {
        id,
        name: wire.name.unwrap_or_default(),
        position: wire
            .position
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_POSITION.to_string()),
        text: first_non_empty([wire.testimonial_text, wire.review]),
        stars: rating_to_stars(parse_rating(wire.rating.as_ref())),
        image: first_non_empty([wire.profile_image, wire.avatar]),
        created_at,
    })
}

/// Decode a list response, skipping entries that do not decode.
///
/// # Errors
///
/// Returns [`FinderError::Reviews`] if the body is not a JSON array.
pub fn decode_reviews(body: &Value) -> Result<Vec<Review>> {
    let items = body
        .as_array()
        .ok_or_else(|| FinderError::Reviews("expected a JSON array of reviews".into()))?;
    Ok(items
        .iter()
        .filter_map(|raw| match decode_review(raw) {
            Ok(review) => Some(review),
            Err(e) => {
                tracing::debug!(error = %e, "skipping review");
                None
            }
        })
        .collect())
}

/// Sort highest-rated first, keeping store order among equal ratings.
pub fn sort_by_rating(reviews: &mut [Review]) {
    reviews.sort_by(|a, b| b.stars.cmp(&a.stars));
}

impl NewReview {
    /// Check required fields and the star range.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::InvalidInput`] describing the first problem.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FinderError::InvalidInput("review name is empty".into()));
        }
        if self.text.trim().is_empty() {
            return Err(FinderError::InvalidInput("review text is empty".into()));
        }
        if !(1..=5).contains(&self.stars) {
            return Err(FinderError::InvalidInput(
                "rating must be between 1 and 5 stars".into(),
            ));
        }
        Ok(())
    }

    /// Payload in the shape the store expects, with both legacy field names.
    pub fn to_payload(&self) -> Value {
        let image = self.image.clone().unwrap_or_default();
        let profile_image = if image.trim().is_empty() {
            placeholder_avatar(&self.name)
        } else {
            image.clone()
        };
        serde_json::json!({
            "name": self.name.trim(),
            "position": self.position.trim(),
            "testimonialText": self.text.trim(),
            "review": self.text.trim(),
            "rating": stars_to_rating(self.stars),
            "profileImage": profile_image,
            "avatar": image,
        })
    }
}

/// Deterministic placeholder avatar (one of 70) for a reviewer name.
fn placeholder_avatar(name: &str) -> String {
    let index = name.bytes().map(u32::from).sum::<u32>() % 70 + 1;
    format!("https://i.pravatar.cc/150?img={index}")
}

/// Client for the testimonial collection.
#[derive(Debug, Clone)]
pub struct ReviewStore {
    client: reqwest::Client,
    url: Url,
}

impl ReviewStore {
    /// Build a store client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Config`] for an invalid URL, or
    /// [`FinderError::Reviews`] if the HTTP client cannot be built.
    pub fn new(config: &ReviewsConfig) -> Result<Self> {
        let url = Url::parse(&config.url)
            .map_err(|e| FinderError::Config(format!("reviews.url is not a valid URL: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| FinderError::Reviews(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, url })
    }

    /// Fetch all reviews, highest-rated first.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Reviews`] on request, status or decode failure.
    pub async fn list(&self) -> Result<Vec<Review>> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| FinderError::Reviews(format!("list request failed: {e}")))?;
        let body = read_json(response, "list").await?;
        let mut reviews = decode_reviews(&body)?;
        sort_by_rating(&mut reviews);
        tracing::debug!(count = reviews.len(), "reviews loaded");
        Ok(reviews)
    }

    /// Submit a review and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::InvalidInput`] if `review` is invalid, or
    /// [`FinderError::Reviews`] on request, status or decode failure.
    pub async fn create(&self, review: &NewReview) -> Result<Review> {
        review.validate()?;
        let response = self
            .client
            .post(self.url.clone())
            .json(&review.to_payload())
            .send()
            .await
            .map_err(|e| FinderError::Reviews(format!("create request failed: {e}")))?;
        let body = read_json(response, "create").await?;
        let saved = decode_review(&body)?;
        tracing::info!(id = %saved.id, stars = saved.stars, "review saved");
        Ok(saved)
    }
}

async fn read_json(response: reqwest::Response, context: &str) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        return Err(FinderError::Reviews(format!(
            "{context} returned status {}",
            status.as_u16()
        )));
    }
    response
        .json::<Value>()
        .await
        .map_err(|e| FinderError::Reviews(format!("{context} response is not JSON: {e}")))
}
