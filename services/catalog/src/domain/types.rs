use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use uuid::Uuid;

use cinema_domain::role::Role;
use cinema_domain::sort::Sort;

pub const NAME_MAX_CHARS: usize = 150;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
pub const RATING_MIN: f64 = 0.0;
pub const RATING_MAX: f64 = 10.0;

/// A performer.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub id: Uuid,
    pub name: String,
    pub gender: String,
    pub birth_date: Option<NaiveDate>,
}

/// Actor fields supplied on create.
#[derive(Debug, Clone, Default)]
pub struct NewActor {
    pub name: String,
    pub gender: String,
    pub birth_date: Option<NaiveDate>,
}

/// Partial actor update. `None` and `Some("")` both keep the stored value.
#[derive(Debug, Clone, Default)]
pub struct ActorPatch {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl ActorPatch {
    /// Merge onto `current`, returning the updated actor.
    pub fn apply(&self, current: &Actor) -> Actor {
        Actor {
            id: current.id,
            name: pick_text(&self.name, &current.name),
            gender: pick_text(&self.gender, &current.gender),
            birth_date: self.birth_date.or(current.birth_date),
        }
    }
}

/// A film and its ordered cast (actor names as supplied by the client).
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub release_date: Option<NaiveDate>,
    pub rating: f64,
    pub actor_list: Vec<String>,
}

impl Movie {
    pub fn validate(&self) -> Result<(), Vec<MovieViolation>> {
        validate_movie_fields(&self.name, &self.description, self.rating)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewMovie {
    pub name: String,
    pub description: String,
    pub release_date: Option<NaiveDate>,
    pub rating: f64,
    pub actor_list: Vec<String>,
}

impl NewMovie {
    pub fn validate(&self) -> Result<(), Vec<MovieViolation>> {
        validate_movie_fields(&self.name, &self.description, self.rating)
    }

    pub fn into_movie(self, id: Uuid) -> Movie {
        Movie {
            id,
            name: self.name,
            description: self.description,
            release_date: self.release_date,
            rating: self.rating,
            actor_list: self.actor_list,
        }
    }
}

/// Partial movie update.
///
/// Empty strings, a zero rating and an empty cast all count as "not
/// provided", so a rating of exactly `0.0` cannot be set through an update.
#[derive(Debug, Clone, Default)]
pub struct MoviePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub rating: Option<f64>,
    pub actor_list: Option<Vec<String>>,
}

impl MoviePatch {
    /// `true` when the update carries a cast that replaces the stored one.
    pub fn replaces_cast(&self) -> bool {
        self.actor_list.as_ref().is_some_and(|list| !list.is_empty())
    }

    pub fn apply(&self, current: &Movie) -> Movie {
        let rating = match self.rating {
            Some(r) if r != 0.0 => r,
            _ => current.rating,
        };
        let actor_list = if self.replaces_cast() {
            self.actor_list.clone().unwrap_or_default()
        } else {
            current.actor_list.clone()
        };
        Movie {
            id: current.id,
            name: pick_text(&self.name, &current.name),
            description: pick_text(&self.description, &current.description),
            release_date: self.release_date.or(current.release_date),
            rating,
            actor_list,
        }
    }
}

fn pick_text(incoming: &Option<String>, current: &str) -> String {
    match incoming.as_deref() {
        Some(v) if !v.is_empty() => v.to_owned(),
        _ => current.to_owned(),
    }
}

/// A movie field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieViolation {
    NameLength,
    DescriptionLength,
    RatingRange,
}

impl MovieViolation {
    pub fn field(self) -> &'static str {
        match self {
            Self::NameLength => "name",
            Self::DescriptionLength => "description",
            Self::RatingRange => "rating",
        }
    }
}

impl fmt::Display for MovieViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameLength => write!(f, "name must be 1-{NAME_MAX_CHARS} characters"),
            Self::DescriptionLength => {
                write!(f, "description must be at most {DESCRIPTION_MAX_CHARS} characters")
            }
            Self::RatingRange => write!(f, "rating must be between {RATING_MIN} and {RATING_MAX}"),
        }
    }
}

/// Lengths are counted in chars, not bytes.
pub fn validate_movie_fields(
    name: &str,
    description: &str,
    rating: f64,
) -> Result<(), Vec<MovieViolation>> {
    let mut violations = Vec::new();
    let name_len = name.chars().count();
    if name_len == 0 || name_len > NAME_MAX_CHARS {
        violations.push(MovieViolation::NameLength);
    }
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        violations.push(MovieViolation::DescriptionLength);
    }
    // NaN fails both comparisons.
    if !(RATING_MIN..=RATING_MAX).contains(&rating) {
        violations.push(MovieViolation::RatingRange);
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// One entry of a movie's cast as stored in the join table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCredit {
    pub actor_name: String,
    /// Set once an actor with `actor_name` exists.
    pub actor_id: Option<Uuid>,
}

/// Column a movie list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovieSortBy {
    Name,
    Description,
    ReleaseDate,
    #[default]
    Rating,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort column: {0}")]
pub struct UnknownSortColumn(pub String);

impl FromStr for MovieSortBy {
    type Err = UnknownSortColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "description" => Ok(Self::Description),
            "release_date" | "release-date" => Ok(Self::ReleaseDate),
            "rating" => Ok(Self::Rating),
            other => Err(UnknownSortColumn(other.to_owned())),
        }
    }
}

/// Ordering of a movie list. Ties always break on movie id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovieOrder {
    pub by: MovieSortBy,
    pub direction: Sort,
}

/// Substring filters for movie search. Empty fragments match everything.
#[derive(Debug, Clone, Default)]
pub struct MovieSearch {
    pub title: String,
    pub actor: String,
}

/// `LIKE` pattern matching `fragment` anywhere, with `\`, `%` and `_` in the
/// fragment taken literally.
pub fn like_contains(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Actor name to the sorted names of the movies they appear in.
pub type Filmography = BTreeMap<String, Vec<String>>;

/// Login account.
#[derive(Debug, Clone)]
pub struct User {
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub role: Role,
}
