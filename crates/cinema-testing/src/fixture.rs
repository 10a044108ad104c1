//! JSON request bodies for catalog tests.

use serde_json::{Value, json};

pub fn actor_body(name: &str, gender: &str, birth_date: &str) -> Value {
    json!({
        "name": name,
        "gender": gender,
        "birth_date": birth_date,
    })
}

pub fn movie_body(name: &str, rating: f64, release_date: &str, actors: &[&str]) -> Value {
    json!({
        "name": name,
        "description": format!("{name} description"),
        "release_date": release_date,
        "rating": rating,
        "actor_list": actors,
    })
}
