//! Shared test doubles and fixtures.

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use placebot::prelude::*;
use serde_json::{Value, json};

/// A scripted completion.
pub enum Reply {
    Text(String),
    Fail(LlmError),
}

/// A provider that returns scripted replies in order and records requests.
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn texts<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        Self::new(texts.into_iter().map(|t| Reply::Text(t.into())))
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Text(text)) => Ok(ChatResponse::from_text(text)),
            Some(Reply::Fail(e)) => Err(e.into()),
            None => Err(LlmError::internal("no scripted reply left").into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

/// A dataset store backed by fixtures that counts loads.
#[derive(Default)]
pub struct FixtureStore {
    loads: AtomicUsize,
}

impl FixtureStore {
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatasetStore for FixtureStore {
    async fn load(&self, category: Category) -> Result<Dataset> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let records = match category {
            Category::Sushi => json!([sushi_record(), {"title": "Kaito Sushi"}]),
            Category::Parking => json!([parking_record()]),
        };
        Dataset::from_value(category, records)
    }
}

pub fn sushi_record() -> Value {
    json!({
        "address": "Theresienstraße 70, 80333 München",
        "businessHours": {
            "formattedHours": ["Mon-Sat: 11:30-22:00", "Sun: closed"],
            "nextStatusChange": "2024-11-25T22:00:00+01:00",
            "currentStatus": "Open"
        },
        "categories": ["Restaurant", "Japanese"],
        "contactInfo": {"phoneNumber": "+49 89 12345678"},
        "distance_from_current_location": "1.2 km",
        "duration_from_current_location": "15 min",
        "foodTypes": ["Sushi", "Ramen"],
        "position": {"lat": 48.1507, "lng": 11.5691},
        "priceSummary": {"priceRangeLevel": "€€", "free": false},
        "reviews": {"averageRating": 4.6, "reviewCount": 312},
        "title": "Sushi Sano"
    })
}

pub fn parking_record() -> Value {
    json!({
        "address": "Hochbrückenstraße 9, 80331 München",
        "availability": "Available",
        "businessHours": {
            "formattedHours": ["Mon-Sun: 00:00-24:00"],
            "nextStatusChange": "",
            "currentStatus": "Open 24 hours"
        },
        "categories": ["Parking garage"],
        "contactInfo": {"phoneNumber": "+49 89 2222333"},
        "distance_from_current_location": "600 m",
        "duration_from_current_location": "8 min",
        "parking": {
            "spotsNumber": 420,
            "freeSpotsNumber": 37,
            "disabledSpotsNumber": 8,
            "parkingDimensionRestriction": {"height": 2.0, "width": 2.1},
            "services": ["EV charging"],
            "types": ["Underground"],
            "operator": "Contipark"
        },
        "paymentMethods": ["Cash", "Credit card"],
        "position": {"lat": 48.1371, "lng": 11.5797},
        "priceStructured": {
            "listPrices": [
                {"service": "1 hour", "price": "€3.50"},
                {"service": "Day ticket", "price": "€25.00"}
            ]
        },
        "priceSummary": {"priceRangeLevel": "€€", "free": false},
        "title": "Parkhaus am Hofbräuhaus"
    })
}

/// A fixture with one top-level field removed.
pub fn without(mut record: Value, field: &str) -> Value {
    record.as_object_mut().unwrap().remove(field);
    record
}

pub fn sushi_dataset() -> Dataset {
    Dataset::from_value(Category::Sushi, json!([sushi_record()])).unwrap()
}

pub fn parking_dataset() -> Dataset {
    Dataset::from_value(Category::Parking, json!([parking_record()])).unwrap()
}
