//! Reference fixture set and fixture files
//!
//! The reference set is two collections of five documents each: `red`
//! (`red-001`..`red-005`) and `blue` (`blue-001`..`blue-005`). It mixes
//! songs, products, customers, an article and an event so that queries
//! have varied shapes to work against.
//!
//! Fixture files are JSON arrays of batches:
//!
//! ```json
//! [
//!   {"collection": "red", "documents": [{"uri": "/test-data/red/song1.json", "content": {}}]}
//! ]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use fixturedb_core::{Error, Result};
use serde_json::json;

use crate::batch::{Batch, FixtureDocument};

/// Name of the first reference collection
pub const RED: &str = "red";

/// Name of the second reference collection
pub const BLUE: &str = "blue";

/// Both reference batches, `red` then `blue`
pub fn reference_batches() -> Vec<Batch> {
    vec![red_documents(), blue_documents()]
}

/// Expected counts after loading the reference batches into an empty store
pub fn reference_expectations() -> BTreeMap<String, usize> {
    BTreeMap::from([(RED.to_string(), 5), (BLUE.to_string(), 5)])
}

/// Read batches from a fixture file.
///
/// # Errors
///
/// `Error::Io` if the file cannot be read, `Error::InvalidInput` if it is
/// not a JSON array of batches.
pub fn read_fixture_file(path: &Path) -> Result<Vec<Batch>> {
    let content = std::fs::read_to_string(path)?;
    parse_fixtures(&content).map_err(|e| {
        Error::invalid_input(format!("fixture file '{}': {}", path.display(), e))
    })
}

/// Parse batches from fixture JSON text
pub fn parse_fixtures(content: &str) -> std::result::Result<Vec<Batch>, serde_json::Error> {
    serde_json::from_str(content)
}

/// Render batches as pretty fixture JSON
pub fn to_fixture_json(batches: &[Batch]) -> Result<String> {
    Ok(serde_json::to_string_pretty(batches)?)
}

/// The `red` reference batch
pub fn red_documents() -> Batch {
    Batch::new(
        RED,
        vec![
            FixtureDocument::new(
                "/test-data/red/song1.json",
                json!({
                    "id": "red-001",
                    "title": "Tom Sawyer",
                    "artist": "Rush",
                    "album": "Moving Pictures",
                    "year": 1981,
                    "genre": "Progressive Rock",
                    "duration": 285,
                    "lyrics_sample": "A modern day warrior, mean mean stride",
                    "rating": 5,
                    "instruments": ["guitar", "bass", "drums", "keyboards"],
                    "collections": ["red"],
                    "metadata": {
                        "songwriter": ["Geddy Lee", "Alex Lifeson", "Neil Peart"],
                        "producer": "Terry Brown",
                        "studio": "Le Studio",
                        "country": "Canada"
                    }
                }),
            ),
            FixtureDocument::new(
                "/test-data/red/song2.json",
                json!({
                    "id": "red-002",
                    "title": "Limelight",
                    "artist": "Rush",
                    "album": "Moving Pictures",
                    "year": 1981,
                    "genre": "Progressive Rock",
                    "duration": 263,
                    "lyrics_sample": "Living on a lighted stage approaches the unreal",
                    "rating": 5,
                    "instruments": ["guitar", "bass", "drums"],
                    "collections": ["red"],
                    "metadata": {
                        "songwriter": ["Geddy Lee", "Alex Lifeson", "Neil Peart"],
                        "producer": "Terry Brown",
                        "studio": "Le Studio",
                        "country": "Canada"
                    }
                }),
            ),
            FixtureDocument::new(
                "/test-data/red/product1.json",
                json!({
                    "id": "red-003",
                    "name": "Epic Guitar Amplifier",
                    "category": "Musical Equipment",
                    "price": 1299.99,
                    "brand": "RushTone",
                    "model": "2112-Pro",
                    "year": 2024,
                    "specifications": {
                        "watts": 100,
                        "tubes": ["12AX7", "EL34"],
                        "channels": 3,
                        "reverb": true
                    },
                    "collections": ["red"],
                    "metadata": {
                        "manufacturer": "Progressive Audio",
                        "warranty": "5 years",
                        "country": "USA"
                    }
                }),
            ),
            FixtureDocument::new(
                "/test-data/red/customer1.json",
                json!({
                    "id": "red-004",
                    "name": "Neil Percussion",
                    "email": "neil.drums@rush.com",
                    "age": 45,
                    "location": "Toronto, Canada",
                    "preferences": ["progressive rock", "complex rhythms", "philosophical lyrics"],
                    "purchase_history": [
                        {"item": "Drum Kit", "price": 3500.00, "date": "2024-01-15"},
                        {"item": "Cymbals Set", "price": 850.00, "date": "2024-02-20"}
                    ],
                    "collections": ["red"],
                    "metadata": {
                        "customer_since": "2020-03-15",
                        "loyalty_tier": "Platinum",
                        "total_spent": 4350.00
                    }
                }),
            ),
            FixtureDocument::new(
                "/test-data/red/article1.json",
                json!({
                    "id": "red-005",
                    "title": "The Evolution of Progressive Rock",
                    "author": "Music Historian",
                    "publication_date": "2024-06-01",
                    "category": "Music Analysis",
                    "content": "Progressive rock emerged in the late 1960s and reached its pinnacle with bands like Rush, Yes, and Genesis. The genre is characterized by complex compositions, virtuosic musicianship, and conceptual themes.",
                    "tags": ["progressive rock", "music history", "Rush", "complex compositions"],
                    "word_count": 2500,
                    "collections": ["red"],
                    "metadata": {
                        "publisher": "Rock Chronicles",
                        "language": "English",
                        "views": 15420
                    }
                }),
            ),
        ],
    )
}

/// The `blue` reference batch
pub fn blue_documents() -> Batch {
    Batch::new(
        BLUE,
        vec![
            FixtureDocument::new(
                "/test-data/blue/song3.json",
                json!({
                    "id": "blue-001",
                    "title": "Freewill",
                    "artist": "Rush",
                    "album": "Permanent Waves",
                    "year": 1980,
                    "genre": "Progressive Rock",
                    "duration": 320,
                    "lyrics_sample": "You can choose a ready guide in some celestial voice",
                    "rating": 5,
                    "instruments": ["guitar", "bass", "drums"],
                    "collections": ["blue"],
                    "metadata": {
                        "songwriter": ["Geddy Lee", "Alex Lifeson", "Neil Peart"],
                        "producer": "Terry Brown",
                        "studio": "Advision Studios",
                        "country": "Canada"
                    }
                }),
            ),
            FixtureDocument::new(
                "/test-data/blue/song4.json",
                json!({
                    "id": "blue-002",
                    "title": "The Spirit of Radio",
                    "artist": "Rush",
                    "album": "Permanent Waves",
                    "year": 1980,
                    "genre": "Progressive Rock",
                    "duration": 297,
                    "lyrics_sample": "Begin the day with a friendly voice",
                    "rating": 4,
                    "instruments": ["guitar", "bass", "drums"],
                    "collections": ["blue"],
                    "metadata": {
                        "songwriter": ["Geddy Lee", "Alex Lifeson", "Neil Peart"],
                        "producer": "Terry Brown",
                        "studio": "Advision Studios",
                        "country": "Canada"
                    }
                }),
            ),
            FixtureDocument::new(
                "/test-data/blue/product2.json",
                json!({
                    "id": "blue-003",
                    "name": "Synthesizer Workstation",
                    "category": "Musical Equipment",
                    "price": 2499.99,
                    "brand": "ProgreSynth",
                    "model": "Geddy-2112",
                    "year": 2024,
                    "specifications": {
                        "keys": 88,
                        "voices": 256,
                        "presets": 1000,
                        "sequencer": true
                    },
                    "collections": ["blue"],
                    "metadata": {
                        "manufacturer": "Electronic Music Co",
                        "warranty": "3 years",
                        "country": "Japan"
                    }
                }),
            ),
            FixtureDocument::new(
                "/test-data/blue/customer2.json",
                json!({
                    "id": "blue-004",
                    "name": "Alex Strings",
                    "email": "alex.guitar@rush.com",
                    "age": 38,
                    "location": "Vancouver, Canada",
                    "preferences": ["guitar solos", "intricate compositions", "vintage gear"],
                    "purchase_history": [
                        {"item": "Electric Guitar", "price": 2200.00, "date": "2024-03-10"},
                        {"item": "Effects Pedals", "price": 450.00, "date": "2024-04-15"}
                    ],
                    "collections": ["blue"],
                    "metadata": {
                        "customer_since": "2021-07-20",
                        "loyalty_tier": "Gold",
                        "total_spent": 2650.00
                    }
                }),
            ),
            FixtureDocument::new(
                "/test-data/blue/event1.json",
                json!({
                    "id": "blue-005",
                    "title": "Progressive Rock Festival 2024",
                    "location": "Toronto Music Centre",
                    "date": "2024-08-15",
                    "time": "19:00",
                    "category": "Music Event",
                    "description": "A celebration of progressive rock featuring tribute bands and original compositions inspired by the greatest prog rock legends.",
                    "ticket_price": 75.00,
                    "capacity": 5000,
                    "featured_bands": ["Rush Tribute", "Genesis Revival", "Yes Reimagined"],
                    "collections": ["blue"],
                    "metadata": {
                        "organizer": "Prog Rock Productions",
                        "venue_type": "Indoor Arena",
                        "age_restriction": "All Ages"
                    }
                }),
            ),
        ],
    )
}
